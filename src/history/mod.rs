pub mod location;
pub mod state;

pub use location::{HistoryEntry, ROOT_LOCATION, encode_component};
pub use state::HistoryState;
