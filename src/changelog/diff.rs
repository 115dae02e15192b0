//! Net changes of a working application against its baseline.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use super::path::FieldPath;
use super::types::{change_value_json, ChangeLogEntry, ChangeValue, FieldValue};
use crate::model::ApplicationState;

/// Numbers closer than this are treated as equal.
pub const NUMERIC_TOLERANCE: f64 = 0.001;

/// Numbers compare within [`NUMERIC_TOLERANCE`]; anything else compares
/// structurally.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => (x - y).abs() < NUMERIC_TOLERANCE,
        _ => a == b,
    }
}

/// Payout status named by a log value. An unset flag is an active debt.
fn payout_status(value: &Option<ChangeValue>) -> Option<&'static str> {
    match value {
        None => Some("Active"),
        Some(ChangeValue::Text(text)) => match text.as_str() {
            "true" | "Paying out" => Some("Paying out"),
            "false" | "Active" => Some("Active"),
            _ => None,
        },
        Some(ChangeValue::Number(_)) => None,
    }
}

fn at_baseline(entry: &ChangeLogEntry, raw: &FieldValue, formatted: &Option<ChangeValue>) -> bool {
    let current = change_value_json(&entry.new_value);
    values_equal(&current, &change_value_json(formatted)) || values_equal(&current, &raw.to_json())
}

/// Collapse a newest-first change log to the fields that currently differ
/// from `baseline`.
///
/// The latest entry per field wins. Its `previous_value` is replaced by the
/// baseline's formatted value, and it is dropped when its `new_value`
/// matches the baseline either formatted or raw. Fields absent from the
/// baseline resolve to nothing, so an edit that sets a value there is
/// always kept. Output is newest first.
///
/// Both debt payout paths collapse to one status compared against the
/// baseline's "Active" / "Paying out". Edits of a rental's fields are
/// dropped once that rental is added or removed again later.
pub fn net_changes(log: &[ChangeLogEntry], baseline: &ApplicationState) -> Vec<ChangeLogEntry> {
    let mut latest: HashMap<FieldPath, usize> = HashMap::new();
    for (position, entry) in log.iter().enumerate().rev() {
        latest.insert(entry.field.net_key(), position);
    }

    let superseded = |position: usize, field: &FieldPath| {
        field
            .whole_rental()
            .and_then(|whole| latest.get(&whole))
            .is_some_and(|&whole_position| whole_position < position)
    };

    let mut retained: Vec<(usize, ChangeLogEntry)> = latest
        .values()
        .filter_map(|&position| {
            let entry = &log[position];
            if superseded(position, &entry.field) {
                debug!("{} superseded by a later rental add or remove", entry.field);
                return None;
            }

            let raw = entry.field.resolve(baseline);
            let formatted = raw.display(entry.field.is_currency());

            let unchanged = if entry.field.is_payout_status() {
                match (entry.field.net_key().resolve(baseline), payout_status(&entry.new_value)) {
                    (FieldValue::Text(status), Some(new)) => status == new,
                    _ => false,
                }
            } else {
                at_baseline(entry, &raw, &formatted)
            };
            if unchanged {
                debug!("{} is back at its baseline value", entry.field);
                return None;
            }

            let mut net = entry.clone();
            net.previous_value = formatted;
            Some((position, net))
        })
        .collect();

    retained.sort_by(|(pos_a, a), (pos_b, b)| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| pos_a.cmp(pos_b))
    });
    retained.into_iter().map(|(_, entry)| entry).collect()
}
