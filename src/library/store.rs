use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::info;

use super::types::ScenarioSummary;
use crate::error::WorkshopError;
use crate::store::Scenario;

fn storage(context: &str, e: impl std::fmt::Display) -> WorkshopError {
    WorkshopError::Storage(format!("{}: {}", context, e))
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e)))
}

/// SQLite-backed collection of saved scenarios.
///
/// Each scenario is stored whole as JSON next to the columns list views
/// need. All operations are synchronous.
pub struct ScenarioLibrary {
    conn: Connection,
}

impl ScenarioLibrary {
    /// Create or open the library database at `db_path`.
    pub fn new(db_path: &Path) -> Result<Self, WorkshopError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage("Failed to create data dir", e))?;
        }

        let conn = Connection::open(db_path).map_err(|e| storage("Failed to open library db", e))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS scenarios (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                is_baseline INTEGER NOT NULL DEFAULT 0,
                change_count INTEGER NOT NULL DEFAULT 0,
                scenario_json TEXT NOT NULL
            )",
            [],
        )
        .map_err(|e| storage("Failed to create table", e))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_scenarios_updated ON scenarios(updated_at DESC)",
            [],
        )
        .map_err(|e| storage("Failed to create date index", e))?;

        info!("Opened scenario library at {:?}", db_path);
        Ok(Self { conn })
    }

    /// Insert or replace a scenario by id. Returns the id.
    pub fn save(&self, scenario: &Scenario) -> Result<String, WorkshopError> {
        let json = serde_json::to_string(scenario)
            .map_err(|e| storage("Failed to serialize scenario", e))?;

        self.conn
            .execute(
                "INSERT INTO scenarios
                    (id, name, created_at, updated_at, is_baseline, change_count, scenario_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    updated_at = excluded.updated_at,
                    is_baseline = excluded.is_baseline,
                    change_count = excluded.change_count,
                    scenario_json = excluded.scenario_json",
                params![
                    scenario.id,
                    scenario.name,
                    timestamp(&scenario.created_at),
                    timestamp(&scenario.updated_at),
                    scenario.is_baseline,
                    scenario.change_log.len() as i64,
                    json,
                ],
            )
            .map_err(|e| storage("Failed to save scenario", e))?;

        info!(
            "Saved scenario '{}' ({}) with {} changes",
            scenario.name,
            scenario.id,
            scenario.change_log.len()
        );
        Ok(scenario.id.clone())
    }

    /// Every saved scenario, most recently updated first.
    pub fn list(&self) -> Result<Vec<ScenarioSummary>, WorkshopError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, created_at, updated_at, is_baseline, change_count
                 FROM scenarios
                 ORDER BY updated_at DESC, name ASC",
            )
            .map_err(|e| storage("Failed to prepare query", e))?;

        let rows = stmt
            .query_map([], |row| {
                let created_at: String = row.get(2)?;
                let updated_at: String = row.get(3)?;
                let change_count: i64 = row.get(5)?;
                Ok(ScenarioSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: parse_timestamp(&created_at)?,
                    updated_at: parse_timestamp(&updated_at)?,
                    is_baseline: row.get(4)?,
                    change_count: change_count.max(0) as usize,
                })
            })
            .map_err(|e| storage("Failed to query scenarios", e))?;

        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| storage("Failed to collect scenarios", e))
    }

    pub fn get(&self, id: &str) -> Result<Scenario, WorkshopError> {
        let json: Option<String> = self
            .conn
            .query_row(
                "SELECT scenario_json FROM scenarios WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| storage("Failed to load scenario", e))?;

        let json = json.ok_or_else(|| WorkshopError::not_found("Scenario", id))?;
        serde_json::from_str(&json).map_err(|e| storage("Corrupt scenario record", e))
    }

    pub fn delete(&self, id: &str) -> Result<(), WorkshopError> {
        let deleted = self
            .conn
            .execute("DELETE FROM scenarios WHERE id = ?1", params![id])
            .map_err(|e| storage("Failed to delete scenario", e))?;

        if deleted == 0 {
            return Err(WorkshopError::not_found("Scenario", id));
        }
        info!("Deleted scenario {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn create_test_library() -> (ScenarioLibrary, TempDir) {
        let dir = TempDir::new().unwrap();
        let library = ScenarioLibrary::new(&dir.path().join("scenarios.db")).unwrap();
        (library, dir)
    }

    fn scenario(id: &str, name: &str, updated_minutes_ago: i64) -> Scenario {
        let application = serde_json::from_str(include_str!("../../tests/fixtures/application.json"))
            .unwrap();
        let mut scenario = Scenario::baseline(name, application, None);
        scenario.id = id.to_string();
        scenario.updated_at = Utc::now() - Duration::minutes(updated_minutes_ago);
        scenario
    }

    #[test]
    fn test_save_and_get() {
        let (library, _dir) = create_test_library();
        let original = scenario("scenario-a", "Original Application", 0);

        let id = library.save(&original).unwrap();
        assert_eq!(id, "scenario-a");

        let loaded = library.get("scenario-a").unwrap();
        assert_eq!(loaded.name, "Original Application");
        assert_eq!(loaded.application, original.application);
        assert!(loaded.is_baseline);
    }

    #[test]
    fn test_save_replaces_existing() {
        let (library, _dir) = create_test_library();
        let mut s = scenario("scenario-a", "Draft", 5);
        library.save(&s).unwrap();

        s.name = "Reduced loan".to_string();
        s.application.loan.loan_amount = 850000.0;
        s.updated_at = Utc::now();
        library.save(&s).unwrap();

        let all = library.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Reduced loan");
        assert_eq!(
            library.get("scenario-a").unwrap().application.loan.loan_amount,
            850000.0
        );
    }

    #[test]
    fn test_list_newest_first() {
        let (library, _dir) = create_test_library();
        library.save(&scenario("scenario-old", "Old", 60)).unwrap();
        library.save(&scenario("scenario-new", "New", 1)).unwrap();
        library.save(&scenario("scenario-mid", "Mid", 30)).unwrap();

        let ids: Vec<String> = library.list().unwrap().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["scenario-new", "scenario-mid", "scenario-old"]);
    }

    #[test]
    fn test_list_empty() {
        let (library, _dir) = create_test_library();
        assert!(library.list().unwrap().is_empty());
    }

    #[test]
    fn test_get_and_delete_not_found() {
        let (library, _dir) = create_test_library();
        assert!(matches!(
            library.get("missing"),
            Err(WorkshopError::NotFound { kind: "Scenario", .. })
        ));
        assert!(library.delete("missing").is_err());

        library.save(&scenario("scenario-a", "A", 0)).unwrap();
        library.delete("scenario-a").unwrap();
        assert!(library.get("scenario-a").is_err());
    }
}
