use crossterm::event::KeyEvent;

use crate::command::Command;
use crate::input::{
    KeymapPreset, PromptKeyResult, handle_prompt_key, map_key_to_command_with_preset,
};

use super::core::App;

#[derive(Debug, Clone, Default)]
pub(crate) struct KeyEventOutcome {
    pub redraw: bool,
    pub quit_requested: bool,
    pub command: Option<Command>,
}

impl App {
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) -> KeyEventOutcome {
        let preset = KeymapPreset::parse(&self.config.keymap.preset);
        if let Some(command) = map_key_to_command_with_preset(key, self.state.mode, preset) {
            return outcome_for(command);
        }

        if !self.state.mode.is_prompt() {
            return KeyEventOutcome::default();
        }

        match handle_prompt_key(&mut self.state, key) {
            PromptKeyResult::Consumed { redraw } => KeyEventOutcome {
                redraw,
                ..KeyEventOutcome::default()
            },
            PromptKeyResult::Submit(command) => KeyEventOutcome {
                redraw: true,
                ..outcome_for(command)
            },
        }
    }
}

fn outcome_for(command: Command) -> KeyEventOutcome {
    if matches!(command, Command::Quit) {
        return KeyEventOutcome {
            redraw: false,
            quit_requested: true,
            command: None,
        };
    }

    KeyEventOutcome {
        redraw: false,
        quit_requested: false,
        command: Some(command),
    }
}
