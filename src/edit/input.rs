//! Raw text input from inline editors.
//!
//! Editors hand over whatever the user typed. These helpers turn that text
//! into typed values and build the matching single-change [`Command`], or
//! reject the input so nothing is applied or logged.

use serde::de::DeserializeOwned;

use super::commands::*;
use crate::changelog::{
    ApplicantField, DebtField, EmploymentField, ExpenseField, FieldPath, LoanField,
    MortgageField, OtherIncomeField, RentalField,
};
use crate::error::WorkshopError;
use crate::model::parse_wire_name;

/// Parse a dollar amount, ignoring `$`, thousands separators and whitespace.
pub fn parse_amount(field: &str, raw: &str) -> Result<f64, WorkshopError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| WorkshopError::invalid(field, format!("'{}' is not a number", raw.trim())))?;
    if !value.is_finite() {
        return Err(WorkshopError::invalid(field, "must be a finite number"));
    }
    Ok(value)
}

/// Parse a percentage; a trailing `%` is allowed.
pub fn parse_rate(field: &str, raw: &str) -> Result<f64, WorkshopError> {
    parse_amount(field, raw.trim().trim_end_matches('%'))
}

/// Parse a non-negative whole number.
pub fn parse_whole(field: &str, raw: &str) -> Result<u32, WorkshopError> {
    raw.trim().parse::<u32>().map_err(|_| {
        WorkshopError::invalid(
            field,
            format!("'{}' is not a non-negative whole number", raw.trim()),
        )
    })
}

pub fn parse_flag(field: &str, raw: &str) -> Result<bool, WorkshopError> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" => Ok(true),
        "false" | "no" => Ok(false),
        other => Err(WorkshopError::invalid(
            field,
            format!("'{}' is not true/false/yes/no", other),
        )),
    }
}

/// Parse an enum from its wire name. Case, spaces and hyphens are
/// normalised, so `owner occupied` reads as `OWNER_OCCUPIED`.
pub fn parse_enum<T: DeserializeOwned>(field: &str, raw: &str) -> Result<T, WorkshopError> {
    let trimmed = raw.trim();
    parse_wire_name(trimmed)
        .or_else(|| {
            let normalised: String = trimmed
                .to_uppercase()
                .chars()
                .map(|c| if c == ' ' || c == '-' { '_' } else { c })
                .collect();
            parse_wire_name(&normalised)
        })
        .ok_or_else(|| WorkshopError::invalid(field, format!("unknown value '{}'", trimmed)))
}

/// Blank input clears an optional field.
fn optional<T>(
    field: &str,
    raw: &str,
    parse: impl FnOnce(&str, &str) -> Result<T, WorkshopError>,
) -> Result<Option<T>, WorkshopError> {
    if raw.trim().is_empty() {
        Ok(None)
    } else {
        parse(field, raw).map(Some)
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Build the single-change command that writes `raw` to `path`.
pub fn command_for(path: &FieldPath, raw: &str) -> Result<Command, WorkshopError> {
    let key = path.field_key().unwrap_or("");
    let command = match path {
        FieldPath::Loan(field) => {
            let change = match field {
                LoanField::LoanAmount => LoanChange::LoanAmount(parse_amount(key, raw)?),
                LoanField::LoanTerm => LoanChange::LoanTerm(parse_whole(key, raw)?),
                LoanField::InterestRateOngoing => {
                    LoanChange::InterestRateOngoing(parse_rate(key, raw)?)
                }
                LoanField::InterestOnlyPeriod => {
                    LoanChange::InterestOnlyPeriod(optional(key, raw, parse_whole)?)
                }
                LoanField::NegativeGearingPercentage => {
                    LoanChange::NegativeGearingPercentage(optional(key, raw, parse_rate)?)
                }
                LoanField::ShouldUseLowerRateBuffer => {
                    LoanChange::ShouldUseLowerRateBuffer(optional(key, raw, parse_flag)?)
                }
            };
            Command::UpdateLoan {
                changes: vec![change],
            }
        }
        FieldPath::Applicant { applicant, field } => {
            let change = match field {
                ApplicantField::Name => ApplicantChange::Name(raw.trim().to_string()),
                ApplicantField::AddressPostcode => {
                    ApplicantChange::AddressPostcode(optional_text(raw))
                }
                ApplicantField::MaritalStatus => {
                    ApplicantChange::MaritalStatus(optional(key, raw, parse_enum)?)
                }
                ApplicantField::NoOfDependents => {
                    ApplicantChange::NoOfDependents(optional(key, raw, parse_whole)?)
                }
                ApplicantField::Hem => ApplicantChange::Hem(optional(key, raw, parse_amount)?),
            };
            Command::UpdateApplicant {
                applicant_id: applicant.clone(),
                changes: vec![change],
            }
        }
        FieldPath::Employment {
            applicant,
            employment,
            field,
        } => {
            use EmploymentChange as C;
            use EmploymentField as F;
            let change = match field {
                F::JobType => C::JobType(parse_enum(key, raw)?),
                F::Employer => C::Employer(optional_text(raw)),
                F::Salary => C::Salary(parse_amount(key, raw)?),
                F::SalaryFrequency => C::SalaryFrequency(parse_enum(key, raw)?),
                F::Bonus => C::Bonus(optional(key, raw, parse_amount)?),
                F::BonusFrequency => C::BonusFrequency(optional(key, raw, parse_enum)?),
                F::RegularOvertimeAndShiftAllowance => {
                    C::RegularOvertimeAndShiftAllowance(optional(key, raw, parse_amount)?)
                }
                F::RegularOvertimeAndShiftAllowanceFrequency => {
                    C::RegularOvertimeAndShiftAllowanceFrequency(optional(key, raw, parse_enum)?)
                }
                F::Commission => C::Commission(optional(key, raw, parse_amount)?),
                F::CommissionFrequency => C::CommissionFrequency(optional(key, raw, parse_enum)?),
                F::CarAllowance => C::CarAllowance(optional(key, raw, parse_amount)?),
                F::CarAllowanceFrequency => {
                    C::CarAllowanceFrequency(optional(key, raw, parse_enum)?)
                }
            };
            Command::UpdateEmployment {
                applicant_id: applicant.clone(),
                employment_id: employment.clone(),
                changes: vec![change],
            }
        }
        FieldPath::Rental {
            applicant,
            income,
            field: Some(field),
        } => {
            let change = match field {
                RentalField::PropertyAddress => RentalChange::PropertyAddress(optional_text(raw)),
                RentalField::ProportionalAmount => {
                    RentalChange::ProportionalAmount(parse_amount(key, raw)?)
                }
                RentalField::ProportionalAmountFrequency => {
                    RentalChange::ProportionalAmountFrequency(parse_enum(key, raw)?)
                }
                RentalField::PropertyPostcode => RentalChange::PropertyPostcode(optional_text(raw)),
            };
            Command::UpdateRentalIncome {
                applicant_id: applicant.clone(),
                income_id: income.clone(),
                changes: vec![change],
            }
        }
        FieldPath::OtherIncome {
            applicant,
            income,
            field,
        } => {
            let change = match field {
                OtherIncomeField::IncomeType => {
                    OtherIncomeChange::IncomeType(parse_enum(key, raw)?)
                }
                OtherIncomeField::Description => {
                    OtherIncomeChange::Description(optional_text(raw))
                }
                OtherIncomeField::ProportionalAmount => {
                    OtherIncomeChange::ProportionalAmount(parse_amount(key, raw)?)
                }
                OtherIncomeField::ProportionalAmountFrequency => {
                    OtherIncomeChange::ProportionalAmountFrequency(parse_enum(key, raw)?)
                }
            };
            Command::UpdateOtherIncome {
                applicant_id: applicant.clone(),
                income_id: income.clone(),
                changes: vec![change],
            }
        }
        FieldPath::Expense {
            applicant,
            expense,
            field,
        } => {
            let change = match field {
                ExpenseField::ExpenseType => ExpenseChange::ExpenseType(parse_enum(key, raw)?),
                ExpenseField::Description => ExpenseChange::Description(optional_text(raw)),
                ExpenseField::Amount => ExpenseChange::Amount(parse_amount(key, raw)?),
                ExpenseField::AmountFrequency => {
                    ExpenseChange::AmountFrequency(parse_enum(key, raw)?)
                }
            };
            Command::UpdateExpense {
                applicant_id: applicant.clone(),
                expense_id: expense.clone(),
                changes: vec![change],
            }
        }
        FieldPath::Debt {
            debt,
            field: Some(field),
        } => {
            let change = match field {
                DebtField::DebtType => DebtChange::DebtType(parse_enum(key, raw)?),
                DebtField::Description => DebtChange::Description(optional_text(raw)),
                DebtField::LimitValue => DebtChange::LimitValue(parse_amount(key, raw)?),
                DebtField::Balance => DebtChange::Balance(optional(key, raw, parse_amount)?),
                DebtField::CustomerDeclaredRepaymentAmount => {
                    DebtChange::CustomerDeclaredRepaymentAmount(optional(key, raw, parse_amount)?)
                }
                DebtField::RepaymentFrequency => {
                    DebtChange::RepaymentFrequency(optional(key, raw, parse_enum)?)
                }
                DebtField::IsBeingPaidOut => DebtChange::IsBeingPaidOut(parse_flag(key, raw)?),
            };
            Command::UpdateDebt {
                debt_id: debt.clone(),
                changes: vec![change],
            }
        }
        FieldPath::Mortgage { mortgage, field } => {
            use MortgageChange as C;
            use MortgageField as F;
            let change = match field {
                F::Lender => C::Lender(optional_text(raw)),
                F::OutstandingBalance => C::OutstandingBalance(parse_amount(key, raw)?),
                F::LimitValue => C::LimitValue(parse_amount(key, raw)?),
                F::CustomerDeclaredRepaymentAmount => {
                    C::CustomerDeclaredRepaymentAmount(parse_amount(key, raw)?)
                }
                F::RepaymentFrequency => C::RepaymentFrequency(parse_enum(key, raw)?),
                F::Purpose => C::Purpose(optional(key, raw, parse_enum)?),
                F::RepaymentType => C::RepaymentType(optional(key, raw, parse_enum)?),
                F::RemainingTerm => C::RemainingTerm(optional(key, raw, parse_whole)?),
                F::InterestRate => C::InterestRate(optional(key, raw, parse_rate)?),
                F::IsBeingRefinanced => C::IsBeingRefinanced(optional(key, raw, parse_flag)?),
            };
            Command::UpdateMortgage {
                mortgage_id: mortgage.clone(),
                changes: vec![change],
            }
        }
        FieldPath::Rental { field: None, .. } | FieldPath::Debt { field: None, .. } => {
            return Err(WorkshopError::invalid(
                path.to_string(),
                "whole entities cannot be set from text",
            ));
        }
    };
    Ok(command)
}
