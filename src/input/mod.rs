pub mod handler;
pub mod keymap;
pub mod prompt;

pub use keymap::{KeymapPreset, map_key_to_command, map_key_to_command_with_preset};
pub use prompt::{PromptKeyResult, handle_prompt_key};
