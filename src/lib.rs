//! Compareason library
//!
//! Search controller, comparison-service client and the terminal front end.

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod render;
pub mod search;
pub mod tui;

pub use error::SearchError;
