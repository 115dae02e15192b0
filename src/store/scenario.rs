use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::generate_scenario_id;
use crate::changelog::ChangeLogEntry;
use crate::model::{ApplicationState, CalculationResult};

/// A named snapshot of an application with its calculation result and the
/// edits that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub application: ApplicationState,
    #[serde(default)]
    pub result: Option<CalculationResult>,
    #[serde(default)]
    pub is_baseline: bool,
    /// Newest first.
    #[serde(default)]
    pub change_log: Vec<ChangeLogEntry>,
}

impl Scenario {
    /// The reference snapshot every edit is compared against.
    pub fn baseline(
        name: impl Into<String>,
        application: ApplicationState,
        result: Option<CalculationResult>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: generate_scenario_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            application,
            result,
            is_baseline: true,
            change_log: Vec::new(),
        }
    }

    pub fn surplus(&self) -> Option<f64> {
        self.result.as_ref().map(|r| r.net_surplus_or_deficit)
    }
}
