use crossterm::event::{Event, KeyEventKind};

use crate::app::App;
use crate::command::Command;

#[derive(Debug, Default)]
pub(crate) struct InputEventOutcome {
    pub(crate) redraw: bool,
    pub(crate) quit_requested: bool,
    pub(crate) command: Option<Command>,
}

impl App {
    pub(crate) fn handle_input_event(&mut self, event: Event) -> InputEventOutcome {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let outcome = self.handle_key_event(key);
                InputEventOutcome {
                    redraw: outcome.redraw,
                    quit_requested: outcome.quit_requested,
                    command: outcome.command,
                }
            }
            Event::Paste(text) if self.state.mode.is_prompt() => {
                let value = format!("{}{}", self.state.prompt.value(), text.replace('\n', " "));
                self.state.prompt = self.state.prompt.clone().with_value(value);
                InputEventOutcome {
                    redraw: true,
                    ..InputEventOutcome::default()
                }
            }
            Event::Resize(_, _) => InputEventOutcome {
                redraw: true,
                ..InputEventOutcome::default()
            },
            _ => InputEventOutcome::default(),
        }
    }
}
