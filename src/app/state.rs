use tui_input::Input;

use crate::command::ActionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Editing the search prompt.
    Search,
    /// Editing a `:` command line.
    Command,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
            Self::Command => "COMMAND",
        }
    }

    pub fn is_prompt(self) -> bool {
        matches!(self, Self::Search | Self::Command)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: Mode,
    pub status: StatusState,
    pub prompt: Input,
    /// 0-based index into the items of the current page.
    pub selected: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            status: StatusState::default(),
            prompt: Input::default(),
            selected: 0,
        }
    }
}

impl AppState {
    pub fn open_prompt(&mut self, mode: Mode, seed: &str) {
        self.mode = mode;
        self.prompt = Input::new(seed.to_string());
    }

    pub fn close_prompt(&mut self) {
        self.mode = Mode::Normal;
        self.prompt.reset();
    }

    pub fn clamp_selection(&mut self, page_len: usize) {
        self.selected = self.selected.min(page_len.saturating_sub(1));
    }
}
