use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;
use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, mode: Mode) -> Option<Command> {
    map_key_to_command_with_preset(key, mode, KeymapPreset::Default)
}

/// Prompt modes only map cancel keys; everything else is text input.
pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    mode: Mode,
    preset: KeymapPreset,
) -> Option<Command> {
    match mode {
        Mode::Normal => match preset {
            KeymapPreset::Default => map_normal_mode_key_default(key),
            KeymapPreset::Emacs => map_normal_mode_key_emacs(key),
        },
        Mode::Search | Mode::Command => map_prompt_key(key, preset),
    }
}

fn map_prompt_key(key: KeyEvent, preset: KeymapPreset) -> Option<Command> {
    match key.code {
        KeyCode::Esc => Some(Command::Cancel),
        KeyCode::Char('g')
            if preset == KeymapPreset::Emacs && key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Command::Cancel)
        }
        _ => None,
    }
}

fn map_normal_mode_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('o') => Some(Command::HistoryBack),
            KeyCode::Char('i') => Some(Command::HistoryForward),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Left => Some(Command::HistoryBack),
            KeyCode::Right => Some(Command::HistoryForward),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('/') => Some(Command::OpenSearch),
        KeyCode::Char(':') => Some(Command::OpenCommandLine),
        KeyCode::Char('l') | KeyCode::Right => Some(Command::NextPage),
        KeyCode::Char('h') | KeyCode::Left => Some(Command::PrevPage),
        KeyCode::Char('g') => Some(Command::FirstPage),
        KeyCode::Char('G') => Some(Command::LastPage),
        KeyCode::Char('j') | KeyCode::Down => Some(Command::SelectNext),
        KeyCode::Char('k') | KeyCode::Up => Some(Command::SelectPrev),
        KeyCode::Char('x') => Some(Command::ClearSearch),
        // Most terminals report Ctrl-i as Tab.
        KeyCode::Tab => Some(Command::HistoryForward),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}

fn map_normal_mode_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('x') => Some(Command::OpenCommandLine),
            _ => map_normal_mode_key_default(key),
        };
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::NextPage),
            KeyCode::Char('p') => Some(Command::PrevPage),
            KeyCode::Char('s') => Some(Command::OpenSearch),
            KeyCode::Char('g') => Some(Command::Cancel),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => map_normal_mode_key_default(key),
        };
    }

    match key.code {
        KeyCode::PageDown => Some(Command::NextPage),
        KeyCode::PageUp => Some(Command::PrevPage),
        _ => map_normal_mode_key_default(key),
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::Mode;
    use crate::command::Command;

    use super::{KeymapPreset, map_key_to_command, map_key_to_command_with_preset};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keymap_preset_parse_defaults_on_unknown_values() {
        assert_eq!(KeymapPreset::parse("default"), KeymapPreset::Default);
        assert_eq!(KeymapPreset::parse("emacs"), KeymapPreset::Emacs);
        assert_eq!(KeymapPreset::parse("unknown"), KeymapPreset::Default);
    }

    #[test]
    fn default_preset_maps_paging_and_prompts() {
        assert_eq!(
            map_key_to_command(key(KeyCode::Char('/')), Mode::Normal),
            Some(Command::OpenSearch)
        );
        assert_eq!(
            map_key_to_command(key(KeyCode::Right), Mode::Normal),
            Some(Command::NextPage)
        );
        assert_eq!(
            map_key_to_command(key(KeyCode::Char('h')), Mode::Normal),
            Some(Command::PrevPage)
        );
        assert_eq!(
            map_key_to_command(
                KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT),
                Mode::Normal
            ),
            Some(Command::LastPage)
        );
        assert_eq!(
            map_key_to_command(key(KeyCode::Char('x')), Mode::Normal),
            Some(Command::ClearSearch)
        );
    }

    #[test]
    fn history_keys_cover_ctrl_and_alt_arrows() {
        assert_eq!(
            map_key_to_command(
                KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
                Mode::Normal
            ),
            Some(Command::HistoryBack)
        );
        assert_eq!(
            map_key_to_command(key(KeyCode::Tab), Mode::Normal),
            Some(Command::HistoryForward)
        );
        assert_eq!(
            map_key_to_command(KeyEvent::new(KeyCode::Left, KeyModifiers::ALT), Mode::Normal),
            Some(Command::HistoryBack)
        );
    }

    #[test]
    fn prompt_modes_only_map_cancel() {
        assert_eq!(
            map_key_to_command(key(KeyCode::Char('q')), Mode::Search),
            None
        );
        assert_eq!(
            map_key_to_command(key(KeyCode::Esc), Mode::Command),
            Some(Command::Cancel)
        );
        assert_eq!(
            map_key_to_command_with_preset(
                KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL),
                Mode::Search,
                KeymapPreset::Emacs,
            ),
            Some(Command::Cancel)
        );
    }

    #[test]
    fn emacs_preset_maps_ctrl_n_and_alt_x() {
        let next = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert_eq!(next, Some(Command::NextPage));

        let command_line = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert_eq!(command_line, Some(Command::OpenCommandLine));

        let back = map_key_to_command_with_preset(
            KeyEvent::new(KeyCode::Char('o'), KeyModifiers::CONTROL),
            Mode::Normal,
            KeymapPreset::Emacs,
        );
        assert_eq!(back, Some(Command::HistoryBack));
    }
}
