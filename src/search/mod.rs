pub mod controller;
pub mod state;

pub use controller::{SearchController, Submission};
pub use state::{RequestState, SearchState};

/// Query the search box starts with.
pub const DEFAULT_QUERY: &str = "Samsung Galaxy M14";
