//! Change log entries, typed field paths and the baseline diff.

pub mod diff;
pub mod path;
pub mod summary;
pub mod types;

pub use diff::{net_changes, values_equal, NUMERIC_TOLERANCE};
pub use path::{
    is_currency_key, ApplicantField, DebtField, EmploymentField, ExpenseField, FieldPath,
    FieldPathError, LoanField, MortgageField, OtherIncomeField, RentalField,
};
pub use summary::{render_text, summarize, CategorySummary, ChangeSummary};
pub use types::{ChangeCategory, ChangeLogEntry, ChangeValue, EntryDraft, FieldValue};
