//! Surplus impact heuristics attached to change log entries.
//!
//! Rules are loaded from TOML (embedded defaults, or an override file named
//! in the config). The figures are display placeholders only.

mod estimator;
mod rules;
mod types;

pub use estimator::ImpactEstimator;
pub use rules::{default_rules, load_rules};
pub use types::*;
