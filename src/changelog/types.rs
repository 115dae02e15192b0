use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::path::FieldPath;
use crate::model::format::{format_currency, format_number};

/// Which section of the application a change belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeCategory {
    Loan,
    Income,
    Expense,
    Liability,
    Applicant,
}

impl ChangeCategory {
    pub const ALL: [ChangeCategory; 5] = [
        ChangeCategory::Loan,
        ChangeCategory::Income,
        ChangeCategory::Expense,
        ChangeCategory::Liability,
        ChangeCategory::Applicant,
    ];

    /// Two-letter badge used in compact listings.
    pub fn code(self) -> &'static str {
        match self {
            ChangeCategory::Loan => "LN",
            ChangeCategory::Income => "IN",
            ChangeCategory::Expense => "EX",
            ChangeCategory::Liability => "LB",
            ChangeCategory::Applicant => "AP",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeCategory::Loan => "loan",
            ChangeCategory::Income => "income",
            ChangeCategory::Expense => "expense",
            ChangeCategory::Liability => "liability",
            ChangeCategory::Applicant => "applicant",
        }
    }
}

/// A previous/new value as shown in the change log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChangeValue {
    Number(f64),
    Text(String),
}

impl ChangeValue {
    pub fn to_json(&self) -> Value {
        match self {
            ChangeValue::Number(n) => Value::from(*n),
            ChangeValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl std::fmt::Display for ChangeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeValue::Number(n) => write!(f, "{}", n),
            ChangeValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ChangeValue {
    fn from(s: &str) -> Self {
        ChangeValue::Text(s.to_string())
    }
}

impl From<String> for ChangeValue {
    fn from(s: String) -> Self {
        ChangeValue::Text(s)
    }
}

impl From<f64> for ChangeValue {
    fn from(n: f64) -> Self {
        ChangeValue::Number(n)
    }
}

/// JSON form of an optional log value; `None` is `null`.
pub fn change_value_json(value: &Option<ChangeValue>) -> Value {
    value.as_ref().map_or(Value::Null, ChangeValue::to_json)
}

/// Raw value of a field read out of an application.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Entity absent, or optional field unset.
    Missing,
    Number(f64),
    Text(String),
    Flag(bool),
}

impl FieldValue {
    pub fn number(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Number)
    }

    pub fn whole(value: Option<u32>) -> Self {
        value.map_or(FieldValue::Missing, |v| FieldValue::Number(f64::from(v)))
    }

    pub fn text(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Missing, |s| FieldValue::Text(s.to_string()))
    }

    pub fn flag(value: Option<bool>) -> Self {
        value.map_or(FieldValue::Missing, FieldValue::Flag)
    }

    pub fn wire<T: Serialize>(value: Option<&T>) -> Self {
        value.map_or(FieldValue::Missing, |v| {
            FieldValue::Text(crate::model::wire_name(v))
        })
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Missing => Value::Null,
            FieldValue::Number(n) => Value::from(*n),
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Flag(b) => Value::Bool(*b),
        }
    }

    /// Format for the change log. Numbers on currency fields become
    /// `$` strings; everything else is stringified as-is.
    pub fn display(&self, currency: bool) -> Option<ChangeValue> {
        match self {
            FieldValue::Missing => None,
            FieldValue::Number(n) if currency => Some(ChangeValue::Text(format_currency(*n))),
            FieldValue::Number(n) => Some(ChangeValue::Text(format_number(*n))),
            FieldValue::Text(s) => Some(ChangeValue::Text(s.clone())),
            FieldValue::Flag(b) => Some(ChangeValue::Text(b.to_string())),
        }
    }
}

/// An immutable record of one field edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub field: FieldPath,
    pub category: ChangeCategory,
    pub description: String,
    #[serde(default)]
    pub previous_value: Option<ChangeValue>,
    #[serde(default)]
    pub new_value: Option<ChangeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_on_surplus: Option<f64>,
}

/// Everything in a [`ChangeLogEntry`] except its id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub field: FieldPath,
    pub category: ChangeCategory,
    pub description: String,
    pub previous_value: Option<ChangeValue>,
    pub new_value: Option<ChangeValue>,
    pub impact_on_surplus: Option<f64>,
}

impl EntryDraft {
    /// Draft for a field edit, formatting both values with the field's
    /// currency rule.
    pub fn field_change(
        field: FieldPath,
        description: String,
        previous: &FieldValue,
        new: &FieldValue,
    ) -> Self {
        let currency = field.is_currency();
        Self {
            category: field.category(),
            field,
            description,
            previous_value: previous.display(currency),
            new_value: new.display(currency),
            impact_on_surplus: None,
        }
    }

    pub fn with_impact(mut self, impact: Option<f64>) -> Self {
        self.impact_on_surplus = impact;
        self
    }

    pub fn into_entry(self, id: String, timestamp: DateTime<Utc>) -> ChangeLogEntry {
        ChangeLogEntry {
            id,
            timestamp,
            field: self.field,
            category: self.category,
            description: self.description,
            previous_value: self.previous_value,
            new_value: self.new_value,
            impact_on_surplus: self.impact_on_surplus,
        }
    }
}
