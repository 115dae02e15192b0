//! Typed addresses of editable fields.
//!
//! A [`FieldPath`] names one field of one entity by id, e.g. the salary of
//! employment `emp-001` held by applicant `app-001`. It renders to and
//! parses from the dotted strings stored in change logs
//! (`applicants.app-001.employments.emp-001.salary`), and can read its
//! value out of any [`ApplicationState`] without failing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::FieldValue;
use crate::model::{
    Applicant, ApplicationState, Employment, Expense, LoanDetails, OtherDebt, OtherIncome,
    OtherMortgage, RentalIncome,
};

/// Declares a field enum together with its camelCase JSON key.
macro_rules! field_keys {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $key:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

field_keys!(LoanField {
    LoanAmount => "loanAmount",
    LoanTerm => "loanTerm",
    InterestRateOngoing => "interestRateOngoing",
    InterestOnlyPeriod => "interestOnlyPeriod",
    NegativeGearingPercentage => "negativeGearingPercentage",
    ShouldUseLowerRateBuffer => "shouldUseLowerRateBuffer",
});

field_keys!(ApplicantField {
    Name => "name",
    AddressPostcode => "addressPostcode",
    MaritalStatus => "maritalStatus",
    NoOfDependents => "noOfDependents",
    Hem => "hem",
});

field_keys!(EmploymentField {
    JobType => "jobType",
    Employer => "employer",
    Salary => "salary",
    SalaryFrequency => "salaryFrequency",
    Bonus => "bonus",
    BonusFrequency => "bonusFrequency",
    RegularOvertimeAndShiftAllowance => "regularOvertimeAndShiftAllowance",
    RegularOvertimeAndShiftAllowanceFrequency => "regularOvertimeAndShiftAllowanceFrequency",
    Commission => "commission",
    CommissionFrequency => "commissionFrequency",
    CarAllowance => "carAllowance",
    CarAllowanceFrequency => "carAllowanceFrequency",
});

field_keys!(RentalField {
    PropertyAddress => "propertyAddress",
    ProportionalAmount => "proportionalAmount",
    ProportionalAmountFrequency => "proportionalAmountFrequency",
    PropertyPostcode => "propertyPostcode",
});

field_keys!(OtherIncomeField {
    IncomeType => "type",
    Description => "description",
    ProportionalAmount => "proportionalAmount",
    ProportionalAmountFrequency => "proportionalAmountFrequency",
});

field_keys!(ExpenseField {
    ExpenseType => "type",
    Description => "description",
    Amount => "amount",
    AmountFrequency => "amountFrequency",
});

field_keys!(DebtField {
    DebtType => "type",
    Description => "description",
    LimitValue => "limitValue",
    Balance => "balance",
    CustomerDeclaredRepaymentAmount => "customerDeclaredRepaymentAmount",
    RepaymentFrequency => "repaymentFrequency",
    IsBeingPaidOut => "isBeingPaidOut",
});

field_keys!(MortgageField {
    Lender => "lender",
    OutstandingBalance => "outstandingBalance",
    LimitValue => "limitValue",
    CustomerDeclaredRepaymentAmount => "customerDeclaredRepaymentAmount",
    RepaymentFrequency => "repaymentFrequency",
    Purpose => "purpose",
    RepaymentType => "repaymentType",
    RemainingTerm => "remainingTerm",
    InterestRate => "interestRate",
    IsBeingRefinanced => "isBeingRefinanced",
});

impl LoanField {
    pub fn read(self, loan: &LoanDetails) -> FieldValue {
        match self {
            LoanField::LoanAmount => FieldValue::Number(loan.loan_amount),
            LoanField::LoanTerm => FieldValue::Number(f64::from(loan.loan_term)),
            LoanField::InterestRateOngoing => FieldValue::Number(loan.interest_rate_ongoing),
            LoanField::InterestOnlyPeriod => FieldValue::whole(loan.interest_only_period),
            LoanField::NegativeGearingPercentage => {
                FieldValue::number(loan.negative_gearing_percentage)
            }
            LoanField::ShouldUseLowerRateBuffer => {
                FieldValue::flag(loan.should_use_lower_rate_buffer)
            }
        }
    }
}

impl ApplicantField {
    pub fn read(self, applicant: &Applicant) -> FieldValue {
        match self {
            ApplicantField::Name => FieldValue::Text(applicant.name.clone()),
            ApplicantField::AddressPostcode => {
                FieldValue::text(applicant.address_postcode.as_deref())
            }
            ApplicantField::MaritalStatus => FieldValue::wire(applicant.marital_status.as_ref()),
            ApplicantField::NoOfDependents => FieldValue::whole(applicant.no_of_dependents),
            ApplicantField::Hem => FieldValue::number(applicant.hem),
        }
    }
}

impl EmploymentField {
    pub fn read(self, employment: &Employment) -> FieldValue {
        use EmploymentField::*;
        match self {
            JobType => FieldValue::wire(Some(&employment.job_type)),
            Employer => FieldValue::text(employment.employer.as_deref()),
            Salary => FieldValue::Number(employment.salary),
            SalaryFrequency => FieldValue::wire(Some(&employment.salary_frequency)),
            Bonus => FieldValue::number(employment.bonus),
            BonusFrequency => FieldValue::wire(employment.bonus_frequency.as_ref()),
            RegularOvertimeAndShiftAllowance => {
                FieldValue::number(employment.regular_overtime_and_shift_allowance)
            }
            RegularOvertimeAndShiftAllowanceFrequency => FieldValue::wire(
                employment
                    .regular_overtime_and_shift_allowance_frequency
                    .as_ref(),
            ),
            Commission => FieldValue::number(employment.commission),
            CommissionFrequency => FieldValue::wire(employment.commission_frequency.as_ref()),
            CarAllowance => FieldValue::number(employment.car_allowance),
            CarAllowanceFrequency => FieldValue::wire(employment.car_allowance_frequency.as_ref()),
        }
    }
}

impl RentalField {
    pub fn read(self, rental: &RentalIncome) -> FieldValue {
        match self {
            RentalField::PropertyAddress => FieldValue::text(rental.property_address.as_deref()),
            RentalField::ProportionalAmount => FieldValue::Number(rental.proportional_amount),
            RentalField::ProportionalAmountFrequency => {
                FieldValue::wire(Some(&rental.proportional_amount_frequency))
            }
            RentalField::PropertyPostcode => FieldValue::text(rental.property_postcode.as_deref()),
        }
    }
}

impl OtherIncomeField {
    pub fn read(self, income: &OtherIncome) -> FieldValue {
        match self {
            OtherIncomeField::IncomeType => FieldValue::wire(Some(&income.income_type)),
            OtherIncomeField::Description => FieldValue::text(income.description.as_deref()),
            OtherIncomeField::ProportionalAmount => FieldValue::Number(income.proportional_amount),
            OtherIncomeField::ProportionalAmountFrequency => {
                FieldValue::wire(Some(&income.proportional_amount_frequency))
            }
        }
    }
}

impl ExpenseField {
    pub fn read(self, expense: &Expense) -> FieldValue {
        match self {
            ExpenseField::ExpenseType => FieldValue::wire(Some(&expense.expense_type)),
            ExpenseField::Description => FieldValue::text(expense.description.as_deref()),
            ExpenseField::Amount => FieldValue::Number(expense.amount),
            ExpenseField::AmountFrequency => FieldValue::wire(Some(&expense.amount_frequency)),
        }
    }
}

impl DebtField {
    pub fn read(self, debt: &OtherDebt) -> FieldValue {
        match self {
            DebtField::DebtType => FieldValue::wire(Some(&debt.debt_type)),
            DebtField::Description => FieldValue::text(debt.description.as_deref()),
            DebtField::LimitValue => FieldValue::Number(debt.limit_value),
            DebtField::Balance => FieldValue::number(debt.balance),
            DebtField::CustomerDeclaredRepaymentAmount => {
                FieldValue::number(debt.customer_declared_repayment_amount)
            }
            DebtField::RepaymentFrequency => FieldValue::wire(debt.repayment_frequency.as_ref()),
            DebtField::IsBeingPaidOut => FieldValue::flag(debt.is_being_paid_out),
        }
    }
}

impl MortgageField {
    pub fn read(self, mortgage: &OtherMortgage) -> FieldValue {
        use MortgageField::*;
        match self {
            Lender => FieldValue::text(mortgage.lender.as_deref()),
            OutstandingBalance => FieldValue::Number(mortgage.outstanding_balance),
            LimitValue => FieldValue::Number(mortgage.limit_value),
            CustomerDeclaredRepaymentAmount => {
                FieldValue::Number(mortgage.customer_declared_repayment_amount)
            }
            RepaymentFrequency => FieldValue::wire(Some(&mortgage.repayment_frequency)),
            Purpose => FieldValue::wire(mortgage.purpose.as_ref()),
            RepaymentType => FieldValue::wire(mortgage.repayment_type.as_ref()),
            RemainingTerm => FieldValue::whole(mortgage.remaining_term),
            InterestRate => FieldValue::number(mortgage.interest_rate),
            IsBeingRefinanced => FieldValue::flag(mortgage.is_being_refinanced),
        }
    }
}

/// Payout status shown for a debt addressed as a whole.
pub fn debt_status(debt: &OtherDebt) -> &'static str {
    if debt.is_being_paid_out.unwrap_or(false) {
        "Paying out"
    } else {
        "Active"
    }
}

/// Keys whose numeric values are shown as dollar amounts.
///
/// Substring match on the lowercased key, plus the HEM benchmark.
pub fn is_currency_key(key: &str) -> bool {
    const MARKERS: [&str; 8] = [
        "amount",
        "salary",
        "bonus",
        "commission",
        "allowance",
        "balance",
        "limit",
        "value",
    ];
    let lower = key.to_lowercase();
    lower == "hem" || MARKERS.iter().any(|m| lower.contains(m))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized field path: {0}")]
pub struct FieldPathError(pub String);

/// Address of one editable field, keyed by entity ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FieldPath {
    Loan(LoanField),
    Applicant {
        applicant: String,
        field: ApplicantField,
    },
    Employment {
        applicant: String,
        employment: String,
        field: EmploymentField,
    },
    /// `field: None` addresses the rental as a whole (add/remove).
    Rental {
        applicant: String,
        income: String,
        field: Option<RentalField>,
    },
    OtherIncome {
        applicant: String,
        income: String,
        field: OtherIncomeField,
    },
    Expense {
        applicant: String,
        expense: String,
        field: ExpenseField,
    },
    /// `field: None` addresses the debt's payout status.
    Debt {
        debt: String,
        field: Option<DebtField>,
    },
    Mortgage {
        mortgage: String,
        field: MortgageField,
    },
}

impl FieldPath {
    pub fn loan(field: LoanField) -> Self {
        FieldPath::Loan(field)
    }

    pub fn applicant(applicant: &str, field: ApplicantField) -> Self {
        FieldPath::Applicant {
            applicant: applicant.to_string(),
            field,
        }
    }

    pub fn employment(applicant: &str, employment: &str, field: EmploymentField) -> Self {
        FieldPath::Employment {
            applicant: applicant.to_string(),
            employment: employment.to_string(),
            field,
        }
    }

    pub fn rental(applicant: &str, income: &str, field: Option<RentalField>) -> Self {
        FieldPath::Rental {
            applicant: applicant.to_string(),
            income: income.to_string(),
            field,
        }
    }

    pub fn other_income(applicant: &str, income: &str, field: OtherIncomeField) -> Self {
        FieldPath::OtherIncome {
            applicant: applicant.to_string(),
            income: income.to_string(),
            field,
        }
    }

    pub fn expense(applicant: &str, expense: &str, field: ExpenseField) -> Self {
        FieldPath::Expense {
            applicant: applicant.to_string(),
            expense: expense.to_string(),
            field,
        }
    }

    pub fn debt(debt: &str, field: Option<DebtField>) -> Self {
        FieldPath::Debt {
            debt: debt.to_string(),
            field,
        }
    }

    pub fn mortgage(mortgage: &str, field: MortgageField) -> Self {
        FieldPath::Mortgage {
            mortgage: mortgage.to_string(),
            field,
        }
    }

    pub fn category(&self) -> super::ChangeCategory {
        use super::ChangeCategory;
        match self {
            FieldPath::Loan(_) => ChangeCategory::Loan,
            FieldPath::Applicant { .. } => ChangeCategory::Applicant,
            FieldPath::Employment { .. }
            | FieldPath::Rental { .. }
            | FieldPath::OtherIncome { .. } => ChangeCategory::Income,
            FieldPath::Expense { .. } => ChangeCategory::Expense,
            FieldPath::Debt { .. } | FieldPath::Mortgage { .. } => ChangeCategory::Liability,
        }
    }

    /// The JSON key of the addressed field, or `None` for a whole entity.
    pub fn field_key(&self) -> Option<&'static str> {
        match self {
            FieldPath::Loan(f) => Some(f.key()),
            FieldPath::Applicant { field, .. } => Some(field.key()),
            FieldPath::Employment { field, .. } => Some(field.key()),
            FieldPath::Rental { field, .. } => field.map(RentalField::key),
            FieldPath::OtherIncome { field, .. } => Some(field.key()),
            FieldPath::Expense { field, .. } => Some(field.key()),
            FieldPath::Debt { field, .. } => field.map(DebtField::key),
            FieldPath::Mortgage { field, .. } => Some(field.key()),
        }
    }

    pub fn is_currency(&self) -> bool {
        match self {
            FieldPath::Rental { field: None, .. } => true,
            FieldPath::Debt { field: None, .. } => false,
            other => other.field_key().is_some_and(is_currency_key),
        }
    }

    /// Whether this path records the payout status of a debt, either as
    /// the whole debt or its `isBeingPaidOut` flag.
    pub fn is_payout_status(&self) -> bool {
        matches!(
            self,
            FieldPath::Debt {
                field: None | Some(DebtField::IsBeingPaidOut),
                ..
            }
        )
    }

    /// Key under which edits collapse when netting against the baseline.
    /// Both payout status paths share the whole-debt key.
    pub fn net_key(&self) -> FieldPath {
        match self {
            FieldPath::Debt { debt, .. } if self.is_payout_status() => FieldPath::debt(debt, None),
            other => other.clone(),
        }
    }

    /// The whole rental a rental field belongs to. Adding or removing that
    /// rental supersedes earlier edits of its fields.
    pub fn whole_rental(&self) -> Option<FieldPath> {
        match self {
            FieldPath::Rental {
                applicant,
                income,
                field: Some(_),
            } => Some(FieldPath::rental(applicant, income, None)),
            _ => None,
        }
    }

    /// Read the addressed value. Missing entities and unset optionals
    /// resolve to [`FieldValue::Missing`].
    pub fn resolve(&self, app: &ApplicationState) -> FieldValue {
        match self {
            FieldPath::Loan(field) => field.read(&app.loan),
            FieldPath::Applicant { applicant, field } => app
                .applicant(applicant)
                .map_or(FieldValue::Missing, |a| field.read(a)),
            FieldPath::Employment {
                applicant,
                employment,
                field,
            } => app
                .applicant(applicant)
                .and_then(|a| a.employment(employment))
                .map_or(FieldValue::Missing, |e| field.read(e)),
            FieldPath::Rental {
                applicant,
                income,
                field,
            } => {
                let Some(rental) = app.applicant(applicant).and_then(|a| a.rental(income)) else {
                    return FieldValue::Missing;
                };
                match field {
                    Some(field) => field.read(rental),
                    None => FieldValue::Number(rental.proportional_amount),
                }
            }
            FieldPath::OtherIncome {
                applicant,
                income,
                field,
            } => app
                .applicant(applicant)
                .and_then(|a| a.other_income(income))
                .map_or(FieldValue::Missing, |o| field.read(o)),
            FieldPath::Expense {
                applicant,
                expense,
                field,
            } => app
                .applicant(applicant)
                .and_then(|a| a.expense(expense))
                .map_or(FieldValue::Missing, |e| field.read(e)),
            FieldPath::Debt { debt, field } => {
                let Some(debt) = app.debt(debt) else {
                    return FieldValue::Missing;
                };
                match field {
                    Some(field) => field.read(debt),
                    None => FieldValue::Text(debt_status(debt).to_string()),
                }
            }
            FieldPath::Mortgage { mortgage, field } => app
                .mortgage(mortgage)
                .map_or(FieldValue::Missing, |m| field.read(m)),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Loan(field) => write!(f, "loan.{}", field),
            FieldPath::Applicant { applicant, field } => {
                write!(f, "applicants.{}.{}", applicant, field)
            }
            FieldPath::Employment {
                applicant,
                employment,
                field,
            } => write!(
                f,
                "applicants.{}.employments.{}.{}",
                applicant, employment, field
            ),
            FieldPath::Rental {
                applicant,
                income,
                field: Some(field),
            } => write!(f, "applicants.{}.rentals.{}.{}", applicant, income, field),
            FieldPath::Rental {
                applicant,
                income,
                field: None,
            } => write!(f, "applicants.{}.rentals.{}", applicant, income),
            FieldPath::OtherIncome {
                applicant,
                income,
                field,
            } => write!(f, "applicants.{}.others.{}.{}", applicant, income, field),
            FieldPath::Expense {
                applicant,
                expense,
                field,
            } => write!(f, "applicants.{}.expenses.{}.{}", applicant, expense, field),
            FieldPath::Debt {
                debt,
                field: Some(field),
            } => write!(f, "otherDebts.{}.{}", debt, field),
            FieldPath::Debt { debt, field: None } => write!(f, "otherDebts.{}", debt),
            FieldPath::Mortgage { mortgage, field } => {
                write!(f, "otherMortgages.{}.{}", mortgage, field)
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || FieldPathError(s.to_string());
        let mut segments: Vec<&str> = s.split('.').collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(err());
        }

        // Older logs nest income collections under `incomes`.
        if segments.len() > 3 && segments[0] == "applicants" && segments[2] == "incomes" {
            segments.remove(2);
        }

        let path = match segments.as_slice() {
            ["loan", field] => LoanField::from_key(field).map(FieldPath::Loan),
            ["applicants", applicant, field] => ApplicantField::from_key(field)
                .map(|field| FieldPath::applicant(applicant, field)),
            ["applicants", applicant, "employments", employment, field] => {
                EmploymentField::from_key(field)
                    .map(|field| FieldPath::employment(applicant, employment, field))
            }
            ["applicants", applicant, "rentals", income] => {
                Some(FieldPath::rental(applicant, income, None))
            }
            ["applicants", applicant, "rentals", income, field] => {
                RentalField::from_key(field)
                    .map(|field| FieldPath::rental(applicant, income, Some(field)))
            }
            ["applicants", applicant, "others", income, field] => {
                OtherIncomeField::from_key(field)
                    .map(|field| FieldPath::other_income(applicant, income, field))
            }
            ["applicants", applicant, "expenses", expense, field] => {
                ExpenseField::from_key(field)
                    .map(|field| FieldPath::expense(applicant, expense, field))
            }
            ["otherDebts", debt] => Some(FieldPath::debt(debt, None)),
            ["otherDebts", debt, field] => {
                DebtField::from_key(field).map(|field| FieldPath::debt(debt, Some(field)))
            }
            ["otherMortgages", mortgage, field] => MortgageField::from_key(field)
                .map(|field| FieldPath::mortgage(mortgage, field)),
            _ => None,
        };

        path.ok_or_else(err)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = FieldPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::ChangeCategory;

    const PATHS: [&str; 10] = [
        "loan.loanAmount",
        "applicants.app-001.maritalStatus",
        "applicants.app-001.employments.emp-001.salaryFrequency",
        "applicants.app-001.rentals.rent-001",
        "applicants.app-001.rentals.rent-001.proportionalAmount",
        "applicants.app-002.others.oth-001.type",
        "applicants.app-001.expenses.exp-003.amount",
        "otherDebts.debt-001",
        "otherDebts.debt-001.isBeingPaidOut",
        "otherMortgages.mort-001.interestRate",
    ];

    #[test]
    fn test_display_matches_parsed_input() {
        for raw in PATHS {
            let path: FieldPath = raw.parse().unwrap();
            assert_eq!(path.to_string(), raw);
        }
    }

    #[test]
    fn test_parse_legacy_incomes_segment() {
        let path: FieldPath = "applicants.app-001.incomes.employments.emp-001.bonus"
            .parse()
            .unwrap();
        assert_eq!(
            path,
            FieldPath::employment("app-001", "emp-001", EmploymentField::Bonus)
        );
        assert_eq!(
            path.to_string(),
            "applicants.app-001.employments.emp-001.bonus"
        );
    }

    #[test]
    fn test_payout_paths_share_net_key() {
        let whole: FieldPath = "otherDebts.debt-002".parse().unwrap();
        let flag: FieldPath = "otherDebts.debt-002.isBeingPaidOut".parse().unwrap();
        let limit: FieldPath = "otherDebts.debt-002.limitValue".parse().unwrap();

        assert!(whole.is_payout_status());
        assert!(flag.is_payout_status());
        assert!(!limit.is_payout_status());
        assert_eq!(flag.net_key(), whole);
        assert_eq!(whole.net_key(), whole);
        assert_eq!(limit.net_key(), limit);
    }

    #[test]
    fn test_whole_rental_of_rental_field() {
        let field: FieldPath = "applicants.app-001.rentals.rent-001.proportionalAmount"
            .parse()
            .unwrap();
        assert_eq!(
            field.whole_rental(),
            Some(FieldPath::rental("app-001", "rent-001", None))
        );
        assert_eq!(FieldPath::rental("app-001", "rent-001", None).whole_rental(), None);
        assert_eq!(FieldPath::loan(LoanField::LoanAmount).whole_rental(), None);
    }

    #[test]
    fn test_parse_rejects_unknown_paths() {
        for raw in [
            "",
            "loan",
            "loan.notAField",
            "applicants.app-001.employments.emp-001",
            "otherMortgages.mort-001",
            "collaterals.col-001.value",
            "loan..loanAmount",
        ] {
            assert!(raw.parse::<FieldPath>().is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in MortgageField::ALL {
            assert_eq!(MortgageField::from_key(field.key()), Some(*field));
        }
        assert_eq!(ExpenseField::from_key("type"), Some(ExpenseField::ExpenseType));
        assert_eq!(LoanField::from_key("LoanAmount"), None);
    }

    #[test]
    fn test_currency_heuristic() {
        assert!(is_currency_key("loanAmount"));
        assert!(is_currency_key("salary"));
        assert!(is_currency_key("regularOvertimeAndShiftAllowance"));
        assert!(is_currency_key("outstandingBalance"));
        assert!(is_currency_key("limitValue"));
        assert!(is_currency_key("hem"));
        assert!(!is_currency_key("interestRate"));
        assert!(!is_currency_key("loanTerm"));
        assert!(!is_currency_key("noOfDependents"));

        assert!(FieldPath::rental("a", "r", None).is_currency());
        assert!(!FieldPath::debt("d", None).is_currency());
        assert!(!FieldPath::mortgage("m", MortgageField::InterestRate).is_currency());
    }

    #[test]
    fn test_categories() {
        assert_eq!(
            FieldPath::loan(LoanField::LoanTerm).category(),
            ChangeCategory::Loan
        );
        assert_eq!(
            FieldPath::rental("a", "r", None).category(),
            ChangeCategory::Income
        );
        assert_eq!(
            FieldPath::expense("a", "e", ExpenseField::Amount).category(),
            ChangeCategory::Expense
        );
        assert_eq!(
            FieldPath::mortgage("m", MortgageField::Lender).category(),
            ChangeCategory::Liability
        );
        assert_eq!(
            FieldPath::applicant("a", ApplicantField::Hem).category(),
            ChangeCategory::Applicant
        );
    }

    #[test]
    fn test_serde_uses_dotted_string() {
        let path = FieldPath::debt("debt-001", Some(DebtField::IsBeingPaidOut));
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"otherDebts.debt-001.isBeingPaidOut\"");
        let back: FieldPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(serde_json::from_str::<FieldPath>("\"application\"").is_err());
    }
}
