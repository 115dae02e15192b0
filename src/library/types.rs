use chrono::{DateTime, Utc};
use serde::Serialize;

/// A saved scenario for list views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_baseline: bool,
    pub change_count: usize,
}
