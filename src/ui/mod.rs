mod chrome;
mod layout;
mod overlay;
mod results;
mod screen;
pub mod snippet;

pub use layout::{UiLayout, split_layout};
pub use screen::{ScreenView, draw_screen};
pub use snippet::{SnippetSegment, sanitize_snippet};
