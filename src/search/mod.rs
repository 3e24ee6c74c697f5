pub mod engine;
pub mod pagination;
pub mod state;
pub mod store;

pub use engine::{FetchEngine, FetchEvent, FetchMode, FetchRequest};
pub use pagination::Pagination;
pub use state::{SearchAction, SearchEffect, SearchPhase, SearchState};
pub use store::ResultStore;
