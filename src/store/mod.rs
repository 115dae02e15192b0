//! Working state: the editable scenario and its baseline.

pub mod ids;
pub mod scenario;
pub mod workshop;

pub use ids::{generate_change_id, generate_rental_id, generate_scenario_id};
pub use scenario::Scenario;
pub use workshop::Workshop;
