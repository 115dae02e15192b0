//! Saved scenarios.

pub mod store;
pub mod types;

pub use store::ScenarioLibrary;
pub use types::ScenarioSummary;
