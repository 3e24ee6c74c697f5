mod core;
mod dispatch;
mod parse;
mod spec;
mod types;

pub use dispatch::{CommandDispatchResult, apply_fetch_event, dispatch, handle_app_event};
pub use parse::parse_command_text;
pub use spec::{command_registry, find_command_spec, usage};
pub use types::{ActionId, ArgKind, ArgSpec, Command, CommandOutcome, CommandSpec};
