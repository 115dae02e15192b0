use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use super::types::ApplicationState;
use crate::store::Scenario;

/// Read an application JSON document (the "Import JSON" action).
pub fn read_application(path: &Path) -> Result<ApplicationState> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read application file {:?}", path))?;
    let application: ApplicationState = serde_json::from_str(&content)
        .with_context(|| format!("Invalid application JSON in {:?}", path))?;
    info!(
        "Imported application from {:?} ({} applicants)",
        path,
        application.applicants.len()
    );
    Ok(application)
}

/// Read a scenario previously written by [`write_scenario_atomic`].
pub fn read_scenario(path: &Path) -> Result<Scenario> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file {:?}", path))?;
    let scenario: Scenario = serde_json::from_str(&content)
        .with_context(|| format!("Invalid scenario JSON in {:?}", path))?;
    Ok(scenario)
}

/// Serialize with 2-space indentation and a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    let mut s = String::from_utf8(buf)?;
    if !s.ends_with('\n') {
        s.push('\n');
    }
    Ok(s)
}

/// Write a scenario to disk atomically (the "Export Scenario" action).
///
/// Writes to a temporary file in the target directory, then renames it over
/// the target so an interrupted export never leaves a partial file.
pub fn write_scenario_atomic(scenario: &Scenario, target_path: &Path) -> Result<()> {
    let json = to_pretty_json(scenario)?;

    let parent = target_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    std::fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    temp.write_all(json.as_bytes())?;
    temp.flush()?;
    temp.persist(target_path)?;

    info!("Exported scenario '{}' to {:?}", scenario.name, target_path);
    Ok(())
}
