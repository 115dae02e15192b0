//! Scenario editing and change tracking for mortgage serviceability
//! assessments.
//!
//! A [`Workshop`] holds a working copy of an application next to its
//! immutable baseline. Edits are applied as typed [`Command`]s, each field
//! change is recorded in the change log, and [`Workshop::net_changes`]
//! collapses that log to the fields that still differ from the baseline.

pub mod calc;
pub mod changelog;
pub mod config;
pub mod edit;
pub mod error;
pub mod impact;
pub mod library;
pub mod model;
pub mod store;

pub use calc::{Calculator, ServiceabilityClient};
pub use changelog::{ChangeLogEntry, ChangeSummary, FieldPath};
pub use config::WorkshopConfig;
pub use edit::Command;
pub use error::{CalculationError, WorkshopError};
pub use library::ScenarioLibrary;
pub use model::{ApplicationState, CalculationResult};
pub use store::{Scenario, Workshop};

/// Install the global fmt subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
