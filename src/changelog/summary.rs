use chrono::Local;
use serde::Serialize;

use super::types::{ChangeCategory, ChangeLogEntry};
use crate::model::format::format_signed_currency;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category: ChangeCategory,
    pub count: usize,
    /// Sum of the estimated impacts recorded in this category.
    pub impact: f64,
}

/// Totals shown above the change log.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSummary {
    pub baseline_surplus: f64,
    pub current_surplus: f64,
    /// `current_surplus - baseline_surplus`.
    pub total_impact: f64,
    pub categories: Vec<CategorySummary>,
}

pub fn summarize(
    log: &[ChangeLogEntry],
    baseline_surplus: f64,
    current_surplus: f64,
) -> ChangeSummary {
    let categories = ChangeCategory::ALL
        .iter()
        .map(|&category| {
            let entries = log.iter().filter(|e| e.category == category);
            CategorySummary {
                category,
                count: entries.clone().count(),
                impact: entries.filter_map(|e| e.impact_on_surplus).sum(),
            }
        })
        .collect();

    ChangeSummary {
        baseline_surplus,
        current_surplus,
        total_impact: current_surplus - baseline_surplus,
        categories,
    }
}

/// One log line without the time prefix.
pub fn describe_entry(entry: &ChangeLogEntry) -> String {
    let show = |value: &Option<super::ChangeValue>| {
        value
            .as_ref()
            .map_or_else(|| "none".to_string(), |v| v.to_string())
    };

    let mut line = format!(
        "[{}] {}: {} -> {}",
        entry.category.code(),
        entry.description,
        show(&entry.previous_value),
        show(&entry.new_value)
    );
    if let Some(impact) = entry.impact_on_surplus {
        line.push_str(&format!(" (Impact: {}/mo)", format_signed_currency(impact)));
    }
    line
}

/// Plain-text listing for copying into notes, one entry per line with the
/// local time of the edit.
pub fn render_text(entries: &[ChangeLogEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} {}",
                entry.timestamp.with_timezone(&Local).format("%H:%M"),
                describe_entry(entry)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::path::{FieldPath, LoanField};
    use crate::changelog::types::ChangeValue;
    use chrono::Utc;

    fn entry(path: &str, impact: Option<f64>) -> ChangeLogEntry {
        let field: FieldPath = path.parse().unwrap();
        ChangeLogEntry {
            id: "change-1".to_string(),
            timestamp: Utc::now(),
            category: field.category(),
            field,
            description: "Loan amount updated".to_string(),
            previous_value: Some(ChangeValue::from("$920,000")),
            new_value: Some(ChangeValue::from("$850,000")),
            impact_on_surplus: impact,
        }
    }

    #[test]
    fn test_summarize_groups_by_category() {
        let log = vec![
            entry("loan.loanAmount", Some(560.0)),
            entry("otherDebts.debt-001.isBeingPaidOut", Some(450.0)),
            entry("otherMortgages.mort-001.lender", None),
        ];
        let summary = summarize(&log, 1240.0, 2100.0);

        assert_eq!(summary.total_impact, 860.0);
        assert_eq!(summary.categories.len(), 5);

        let liability = summary
            .categories
            .iter()
            .find(|c| c.category == ChangeCategory::Liability)
            .unwrap();
        assert_eq!(liability.count, 2);
        assert_eq!(liability.impact, 450.0);

        let expense = summary
            .categories
            .iter()
            .find(|c| c.category == ChangeCategory::Expense)
            .unwrap();
        assert_eq!(expense.count, 0);
        assert_eq!(expense.impact, 0.0);
    }

    #[test]
    fn test_describe_entry() {
        let e = entry("loan.loanAmount", Some(560.0));
        assert_eq!(
            describe_entry(&e),
            "[LN] Loan amount updated: $920,000 -> $850,000 (Impact: +$560/mo)"
        );

        let mut removed = entry("applicants.app-001.rentals.rent-001", Some(-1344.0));
        removed.description = "Removed rental income for James Mitchell".to_string();
        removed.new_value = None;
        assert_eq!(
            describe_entry(&removed),
            "[IN] Removed rental income for James Mitchell: $920,000 -> none (Impact: -$1,344/mo)"
        );
    }

    #[test]
    fn test_render_text_one_line_per_entry() {
        let log = vec![
            entry("loan.loanAmount", None),
            ChangeLogEntry {
                field: FieldPath::loan(LoanField::LoanTerm),
                ..entry("loan.loanTerm", None)
            },
        ];
        let text = render_text(&log);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[LN] Loan amount updated: $920,000 -> $850,000"));
        assert_eq!(lines[0].as_bytes()[2], b':');
    }
}
