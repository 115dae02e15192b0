//! Display helpers for amounts, enum labels and field keys.

use super::types::{wire_name, DebtType, ExpenseType, OtherIncomeType};

/// Format a dollar amount the way the change log displays it:
/// whole dollars, thousands separators, sign before the symbol.
///
/// `850000.0` -> `"$850,000"`, `-1240.0` -> `"-$1,240"`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Signed currency with an explicit `+` for non-negative amounts.
pub fn format_signed_currency(amount: f64) -> String {
    if amount >= 0.0 {
        format!("+{}", format_currency(amount))
    } else {
        format_currency(amount)
    }
}

/// Plain number formatting: integers without a fractional part.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// `"OTHER_EXPENSES"` -> `"Other Expenses"`.
pub fn format_expense_type(expense_type: ExpenseType) -> String {
    wire_name(&expense_type)
        .split('_')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_debt_type(debt_type: DebtType) -> &'static str {
    match debt_type {
        DebtType::CreditCard => "Credit Card",
        DebtType::PersonalLoan => "Personal Loan",
        DebtType::AutomotiveLoan => "Car Loan",
        DebtType::LineOfCredit => "Line of Credit",
        DebtType::StoreCard => "Store Card",
        DebtType::Overdrafts => "Overdraft",
        DebtType::Investment => "Investment Loan",
        DebtType::OtherLoan => "Other Loan",
    }
}

pub fn format_other_income_type(income_type: OtherIncomeType) -> &'static str {
    match income_type {
        OtherIncomeType::InvestmentIncome => "Investment Income",
        OtherIncomeType::IncomeFromCashSavingsOrTermDeposits => "Term Deposits",
        OtherIncomeType::SuperannuationIncome => "Superannuation",
        OtherIncomeType::OtherIncome => "Other Income",
        OtherIncomeType::ChildSupportIncome => "Child Support",
        OtherIncomeType::GovernmentFamilyPayments => "Family Payments",
        OtherIncomeType::GovernmentPension => "Government Pension",
        OtherIncomeType::GovernmentBenefitsNewstartOrSickness => "Centrelink Benefits",
        OtherIncomeType::CompanyProfitAfterTax => "Company Profits",
        OtherIncomeType::GovernmentIncomeOther => "Other Govt Income",
        OtherIncomeType::ForeignIncome => "Foreign Income",
    }
}

/// Convert a camelCase field key to lowercase words.
///
/// `"salaryFrequency"` -> `"salary frequency"`.
pub fn humanize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_uppercase() {
            out.push(' ');
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(850000.0), "$850,000");
        assert_eq!(format_currency(920000.0), "$920,000");
        assert_eq!(format_currency(450.0), "$450");
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(-1240.0), "-$1,240");
        assert_eq!(format_currency(1150000.4), "$1,150,000");
        assert_eq!(format_currency(999.5), "$1,000");
    }

    #[test]
    fn test_format_signed_currency() {
        assert_eq!(format_signed_currency(450.0), "+$450");
        assert_eq!(format_signed_currency(-1344.0), "-$1,344");
        assert_eq!(format_signed_currency(0.0), "+$0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(30.0), "30");
        assert_eq!(format_number(6.29), "6.29");
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(format_expense_type(ExpenseType::OtherExpenses), "Other Expenses");
        assert_eq!(format_expense_type(ExpenseType::Groceries), "Groceries");
        assert_eq!(format_debt_type(DebtType::AutomotiveLoan), "Car Loan");
        assert_eq!(
            format_other_income_type(OtherIncomeType::GovernmentFamilyPayments),
            "Family Payments"
        );
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("salaryFrequency"), "salary frequency");
        assert_eq!(humanize_key("salary"), "salary");
        assert_eq!(
            humanize_key("customerDeclaredRepaymentAmount"),
            "customer declared repayment amount"
        );
    }
}
