use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;

use crate::app::{AppState, Mode};
use crate::command::{ActionId, Command, parse_command_text};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKeyResult {
    Consumed { redraw: bool },
    Submit(Command),
}

/// Edits the open prompt, or turns it into a command on Enter.
pub fn handle_prompt_key(app: &mut AppState, key: KeyEvent) -> PromptKeyResult {
    if key.code != KeyCode::Enter {
        let changed = app.prompt.handle_event(&Event::Key(key)).is_some();
        return PromptKeyResult::Consumed { redraw: changed };
    }

    let value = app.prompt.value().to_string();
    match app.mode {
        Mode::Search => PromptKeyResult::Submit(Command::SubmitSearch { query: value }),
        Mode::Command => match parse_command_text(&value) {
            Ok(command) => {
                app.close_prompt();
                PromptKeyResult::Submit(command)
            }
            Err(err) => {
                app.status.last_action_id = Some(ActionId::ParseCommand);
                app.status.message = err.to_string();
                PromptKeyResult::Consumed { redraw: true }
            }
        },
        Mode::Normal => PromptKeyResult::Consumed { redraw: false },
    }
}
