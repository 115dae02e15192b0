//! Mutation commands.
//!
//! Every edit is one [`Command`] carrying a list of per-entity changes.
//! Each change knows which field it writes, how to validate its value and
//! how to apply itself, so the store can log field edits without reaching
//! into the model by name.

use serde::{Deserialize, Serialize};

use crate::changelog::{
    ApplicantField, DebtField, EmploymentField, ExpenseField, FieldValue, LoanField,
    MortgageField, OtherIncomeField, RentalField,
};
use crate::error::WorkshopError;
use crate::model::{
    Applicant, DebtType, Employment, Expense, ExpenseType, Frequency, JobType, LoanDetails,
    MaritalStatus, MortgagePurpose, NewRentalIncome, OtherDebt, OtherIncome, OtherIncomeType,
    OtherMortgage, Ownership, RentalIncome, RentalOwnership, RepaymentType,
};

/// A single field assignment on one entity type.
pub trait EntityChange {
    type Target;
    type Field: Copy;

    /// The logged field, or `None` for changes that are applied silently.
    fn field(&self) -> Option<Self::Field>;

    /// The value being written, in change log form.
    fn value(&self) -> FieldValue;

    /// What the logged field currently holds on `target`.
    fn current_value(&self, target: &Self::Target) -> FieldValue;

    fn validate(&self) -> Result<(), WorkshopError>;

    fn apply(&self, target: &mut Self::Target);
}

fn finite(field: &str, value: f64) -> Result<(), WorkshopError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(WorkshopError::invalid(field, "must be a finite number"))
    }
}

fn amount(field: &str, value: f64) -> Result<(), WorkshopError> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(WorkshopError::invalid(field, "must not be negative"));
    }
    Ok(())
}

fn rate(field: &str, value: f64) -> Result<(), WorkshopError> {
    amount(field, value)?;
    if value > 100.0 {
        return Err(WorkshopError::invalid(field, "must be at most 100"));
    }
    Ok(())
}

fn proportion(field: &str, value: f64) -> Result<(), WorkshopError> {
    amount(field, value)?;
    if value > 1.0 {
        return Err(WorkshopError::invalid(field, "must be between 0 and 1"));
    }
    Ok(())
}

fn optional(
    field: &str,
    value: Option<f64>,
    check: fn(&str, f64) -> Result<(), WorkshopError>,
) -> Result<(), WorkshopError> {
    value.map_or(Ok(()), |v| check(field, v))
}

pub(crate) fn validate_new_rental(rental: &NewRentalIncome) -> Result<(), WorkshopError> {
    amount("proportionalAmount", rental.proportional_amount)?;
    validate_rental_ownerships(rental.ownerships.as_deref())
}

fn validate_rental_ownerships(ownerships: Option<&[RentalOwnership]>) -> Result<(), WorkshopError> {
    for ownership in ownerships.unwrap_or_default() {
        proportion("ownerships.proportion", ownership.proportion)?;
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum LoanChange {
    LoanAmount(f64),
    LoanTerm(u32),
    InterestRateOngoing(f64),
    InterestOnlyPeriod(Option<u32>),
    NegativeGearingPercentage(Option<f64>),
    ShouldUseLowerRateBuffer(Option<bool>),
}

impl EntityChange for LoanChange {
    type Target = LoanDetails;
    type Field = LoanField;

    fn field(&self) -> Option<LoanField> {
        Some(match self {
            LoanChange::LoanAmount(_) => LoanField::LoanAmount,
            LoanChange::LoanTerm(_) => LoanField::LoanTerm,
            LoanChange::InterestRateOngoing(_) => LoanField::InterestRateOngoing,
            LoanChange::InterestOnlyPeriod(_) => LoanField::InterestOnlyPeriod,
            LoanChange::NegativeGearingPercentage(_) => LoanField::NegativeGearingPercentage,
            LoanChange::ShouldUseLowerRateBuffer(_) => LoanField::ShouldUseLowerRateBuffer,
        })
    }

    fn value(&self) -> FieldValue {
        match self {
            LoanChange::LoanAmount(v) | LoanChange::InterestRateOngoing(v) => FieldValue::Number(*v),
            LoanChange::LoanTerm(v) => FieldValue::Number(f64::from(*v)),
            LoanChange::InterestOnlyPeriod(v) => FieldValue::whole(*v),
            LoanChange::NegativeGearingPercentage(v) => FieldValue::number(*v),
            LoanChange::ShouldUseLowerRateBuffer(v) => FieldValue::flag(*v),
        }
    }

    fn current_value(&self, target: &LoanDetails) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        match self {
            LoanChange::LoanAmount(v) => amount("loanAmount", *v),
            LoanChange::LoanTerm(0) => Err(WorkshopError::invalid(
                "loanTerm",
                "must be greater than zero",
            )),
            LoanChange::InterestRateOngoing(v) => rate("interestRateOngoing", *v),
            LoanChange::NegativeGearingPercentage(v) => {
                optional("negativeGearingPercentage", *v, rate)
            }
            _ => Ok(()),
        }
    }

    fn apply(&self, loan: &mut LoanDetails) {
        match self {
            LoanChange::LoanAmount(v) => loan.loan_amount = *v,
            LoanChange::LoanTerm(v) => loan.loan_term = *v,
            LoanChange::InterestRateOngoing(v) => loan.interest_rate_ongoing = *v,
            LoanChange::InterestOnlyPeriod(v) => loan.interest_only_period = *v,
            LoanChange::NegativeGearingPercentage(v) => loan.negative_gearing_percentage = *v,
            LoanChange::ShouldUseLowerRateBuffer(v) => loan.should_use_lower_rate_buffer = *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ApplicantChange {
    Name(String),
    AddressPostcode(Option<String>),
    MaritalStatus(Option<MaritalStatus>),
    NoOfDependents(Option<u32>),
    Hem(Option<f64>),
}

impl EntityChange for ApplicantChange {
    type Target = Applicant;
    type Field = ApplicantField;

    fn field(&self) -> Option<ApplicantField> {
        Some(match self {
            ApplicantChange::Name(_) => ApplicantField::Name,
            ApplicantChange::AddressPostcode(_) => ApplicantField::AddressPostcode,
            ApplicantChange::MaritalStatus(_) => ApplicantField::MaritalStatus,
            ApplicantChange::NoOfDependents(_) => ApplicantField::NoOfDependents,
            ApplicantChange::Hem(_) => ApplicantField::Hem,
        })
    }

    fn value(&self) -> FieldValue {
        match self {
            ApplicantChange::Name(v) => FieldValue::Text(v.clone()),
            ApplicantChange::AddressPostcode(v) => FieldValue::text(v.as_deref()),
            ApplicantChange::MaritalStatus(v) => FieldValue::wire(v.as_ref()),
            ApplicantChange::NoOfDependents(v) => FieldValue::whole(*v),
            ApplicantChange::Hem(v) => FieldValue::number(*v),
        }
    }

    fn current_value(&self, target: &Applicant) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        match self {
            ApplicantChange::Name(name) if name.trim().is_empty() => {
                Err(WorkshopError::invalid("name", "must not be blank"))
            }
            ApplicantChange::Hem(v) => optional("hem", *v, amount),
            _ => Ok(()),
        }
    }

    fn apply(&self, applicant: &mut Applicant) {
        match self {
            ApplicantChange::Name(v) => applicant.name = v.clone(),
            ApplicantChange::AddressPostcode(v) => applicant.address_postcode = v.clone(),
            ApplicantChange::MaritalStatus(v) => applicant.marital_status = *v,
            ApplicantChange::NoOfDependents(v) => applicant.no_of_dependents = *v,
            ApplicantChange::Hem(v) => applicant.hem = *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum EmploymentChange {
    JobType(JobType),
    Employer(Option<String>),
    Salary(f64),
    SalaryFrequency(Frequency),
    Bonus(Option<f64>),
    BonusFrequency(Option<Frequency>),
    RegularOvertimeAndShiftAllowance(Option<f64>),
    RegularOvertimeAndShiftAllowanceFrequency(Option<Frequency>),
    Commission(Option<f64>),
    CommissionFrequency(Option<Frequency>),
    CarAllowance(Option<f64>),
    CarAllowanceFrequency(Option<Frequency>),
}

impl EntityChange for EmploymentChange {
    type Target = Employment;
    type Field = EmploymentField;

    fn field(&self) -> Option<EmploymentField> {
        use EmploymentChange as C;
        use EmploymentField as F;
        Some(match self {
            C::JobType(_) => F::JobType,
            C::Employer(_) => F::Employer,
            C::Salary(_) => F::Salary,
            C::SalaryFrequency(_) => F::SalaryFrequency,
            C::Bonus(_) => F::Bonus,
            C::BonusFrequency(_) => F::BonusFrequency,
            C::RegularOvertimeAndShiftAllowance(_) => F::RegularOvertimeAndShiftAllowance,
            C::RegularOvertimeAndShiftAllowanceFrequency(_) => {
                F::RegularOvertimeAndShiftAllowanceFrequency
            }
            C::Commission(_) => F::Commission,
            C::CommissionFrequency(_) => F::CommissionFrequency,
            C::CarAllowance(_) => F::CarAllowance,
            C::CarAllowanceFrequency(_) => F::CarAllowanceFrequency,
        })
    }

    fn value(&self) -> FieldValue {
        use EmploymentChange as C;
        match self {
            C::JobType(v) => FieldValue::wire(Some(v)),
            C::Employer(v) => FieldValue::text(v.as_deref()),
            C::Salary(v) => FieldValue::Number(*v),
            C::SalaryFrequency(v) => FieldValue::wire(Some(v)),
            C::Bonus(v)
            | C::RegularOvertimeAndShiftAllowance(v)
            | C::Commission(v)
            | C::CarAllowance(v) => FieldValue::number(*v),
            C::BonusFrequency(v)
            | C::RegularOvertimeAndShiftAllowanceFrequency(v)
            | C::CommissionFrequency(v)
            | C::CarAllowanceFrequency(v) => FieldValue::wire(v.as_ref()),
        }
    }

    fn current_value(&self, target: &Employment) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        use EmploymentChange as C;
        match self {
            C::Salary(v) => amount("salary", *v),
            C::Bonus(v) => optional("bonus", *v, amount),
            C::RegularOvertimeAndShiftAllowance(v) => {
                optional("regularOvertimeAndShiftAllowance", *v, amount)
            }
            C::Commission(v) => optional("commission", *v, amount),
            C::CarAllowance(v) => optional("carAllowance", *v, amount),
            _ => Ok(()),
        }
    }

    fn apply(&self, employment: &mut Employment) {
        use EmploymentChange as C;
        match self {
            C::JobType(v) => employment.job_type = *v,
            C::Employer(v) => employment.employer = v.clone(),
            C::Salary(v) => employment.salary = *v,
            C::SalaryFrequency(v) => employment.salary_frequency = *v,
            C::Bonus(v) => employment.bonus = *v,
            C::BonusFrequency(v) => employment.bonus_frequency = *v,
            C::RegularOvertimeAndShiftAllowance(v) => {
                employment.regular_overtime_and_shift_allowance = *v
            }
            C::RegularOvertimeAndShiftAllowanceFrequency(v) => {
                employment.regular_overtime_and_shift_allowance_frequency = *v
            }
            C::Commission(v) => employment.commission = *v,
            C::CommissionFrequency(v) => employment.commission_frequency = *v,
            C::CarAllowance(v) => employment.car_allowance = *v,
            C::CarAllowanceFrequency(v) => employment.car_allowance_frequency = *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum RentalChange {
    PropertyAddress(Option<String>),
    ProportionalAmount(f64),
    ProportionalAmountFrequency(Frequency),
    PropertyPostcode(Option<String>),
    /// Applied without a log entry.
    Ownerships(Option<Vec<RentalOwnership>>),
}

impl EntityChange for RentalChange {
    type Target = RentalIncome;
    type Field = RentalField;

    fn field(&self) -> Option<RentalField> {
        match self {
            RentalChange::PropertyAddress(_) => Some(RentalField::PropertyAddress),
            RentalChange::ProportionalAmount(_) => Some(RentalField::ProportionalAmount),
            RentalChange::ProportionalAmountFrequency(_) => {
                Some(RentalField::ProportionalAmountFrequency)
            }
            RentalChange::PropertyPostcode(_) => Some(RentalField::PropertyPostcode),
            RentalChange::Ownerships(_) => None,
        }
    }

    fn value(&self) -> FieldValue {
        match self {
            RentalChange::PropertyAddress(v) | RentalChange::PropertyPostcode(v) => {
                FieldValue::text(v.as_deref())
            }
            RentalChange::ProportionalAmount(v) => FieldValue::Number(*v),
            RentalChange::ProportionalAmountFrequency(v) => FieldValue::wire(Some(v)),
            RentalChange::Ownerships(_) => FieldValue::Missing,
        }
    }

    fn current_value(&self, target: &RentalIncome) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        match self {
            RentalChange::ProportionalAmount(v) => amount("proportionalAmount", *v),
            RentalChange::Ownerships(v) => validate_rental_ownerships(v.as_deref()),
            _ => Ok(()),
        }
    }

    fn apply(&self, rental: &mut RentalIncome) {
        match self {
            RentalChange::PropertyAddress(v) => rental.property_address = v.clone(),
            RentalChange::ProportionalAmount(v) => rental.proportional_amount = *v,
            RentalChange::ProportionalAmountFrequency(v) => {
                rental.proportional_amount_frequency = *v
            }
            RentalChange::PropertyPostcode(v) => rental.property_postcode = v.clone(),
            RentalChange::Ownerships(v) => rental.ownerships = v.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum OtherIncomeChange {
    #[serde(rename = "type")]
    IncomeType(OtherIncomeType),
    Description(Option<String>),
    ProportionalAmount(f64),
    ProportionalAmountFrequency(Frequency),
}

impl EntityChange for OtherIncomeChange {
    type Target = OtherIncome;
    type Field = OtherIncomeField;

    fn field(&self) -> Option<OtherIncomeField> {
        Some(match self {
            OtherIncomeChange::IncomeType(_) => OtherIncomeField::IncomeType,
            OtherIncomeChange::Description(_) => OtherIncomeField::Description,
            OtherIncomeChange::ProportionalAmount(_) => OtherIncomeField::ProportionalAmount,
            OtherIncomeChange::ProportionalAmountFrequency(_) => {
                OtherIncomeField::ProportionalAmountFrequency
            }
        })
    }

    fn value(&self) -> FieldValue {
        match self {
            OtherIncomeChange::IncomeType(v) => FieldValue::wire(Some(v)),
            OtherIncomeChange::Description(v) => FieldValue::text(v.as_deref()),
            OtherIncomeChange::ProportionalAmount(v) => FieldValue::Number(*v),
            OtherIncomeChange::ProportionalAmountFrequency(v) => FieldValue::wire(Some(v)),
        }
    }

    fn current_value(&self, target: &OtherIncome) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        match self {
            OtherIncomeChange::ProportionalAmount(v) => amount("proportionalAmount", *v),
            _ => Ok(()),
        }
    }

    fn apply(&self, income: &mut OtherIncome) {
        match self {
            OtherIncomeChange::IncomeType(v) => income.income_type = *v,
            OtherIncomeChange::Description(v) => income.description = v.clone(),
            OtherIncomeChange::ProportionalAmount(v) => income.proportional_amount = *v,
            OtherIncomeChange::ProportionalAmountFrequency(v) => {
                income.proportional_amount_frequency = *v
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ExpenseChange {
    #[serde(rename = "type")]
    ExpenseType(ExpenseType),
    Description(Option<String>),
    Amount(f64),
    AmountFrequency(Frequency),
}

impl EntityChange for ExpenseChange {
    type Target = Expense;
    type Field = ExpenseField;

    fn field(&self) -> Option<ExpenseField> {
        Some(match self {
            ExpenseChange::ExpenseType(_) => ExpenseField::ExpenseType,
            ExpenseChange::Description(_) => ExpenseField::Description,
            ExpenseChange::Amount(_) => ExpenseField::Amount,
            ExpenseChange::AmountFrequency(_) => ExpenseField::AmountFrequency,
        })
    }

    fn value(&self) -> FieldValue {
        match self {
            ExpenseChange::ExpenseType(v) => FieldValue::wire(Some(v)),
            ExpenseChange::Description(v) => FieldValue::text(v.as_deref()),
            ExpenseChange::Amount(v) => FieldValue::Number(*v),
            ExpenseChange::AmountFrequency(v) => FieldValue::wire(Some(v)),
        }
    }

    fn current_value(&self, target: &Expense) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        match self {
            ExpenseChange::Amount(v) => amount("amount", *v),
            _ => Ok(()),
        }
    }

    fn apply(&self, expense: &mut Expense) {
        match self {
            ExpenseChange::ExpenseType(v) => expense.expense_type = *v,
            ExpenseChange::Description(v) => expense.description = v.clone(),
            ExpenseChange::Amount(v) => expense.amount = *v,
            ExpenseChange::AmountFrequency(v) => expense.amount_frequency = *v,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DebtChange {
    #[serde(rename = "type")]
    DebtType(DebtType),
    Description(Option<String>),
    LimitValue(f64),
    Balance(Option<f64>),
    CustomerDeclaredRepaymentAmount(Option<f64>),
    RepaymentFrequency(Option<Frequency>),
    IsBeingPaidOut(bool),
}

impl EntityChange for DebtChange {
    type Target = OtherDebt;
    type Field = DebtField;

    fn field(&self) -> Option<DebtField> {
        Some(match self {
            DebtChange::DebtType(_) => DebtField::DebtType,
            DebtChange::Description(_) => DebtField::Description,
            DebtChange::LimitValue(_) => DebtField::LimitValue,
            DebtChange::Balance(_) => DebtField::Balance,
            DebtChange::CustomerDeclaredRepaymentAmount(_) => {
                DebtField::CustomerDeclaredRepaymentAmount
            }
            DebtChange::RepaymentFrequency(_) => DebtField::RepaymentFrequency,
            DebtChange::IsBeingPaidOut(_) => DebtField::IsBeingPaidOut,
        })
    }

    fn value(&self) -> FieldValue {
        match self {
            DebtChange::DebtType(v) => FieldValue::wire(Some(v)),
            DebtChange::Description(v) => FieldValue::text(v.as_deref()),
            DebtChange::LimitValue(v) => FieldValue::Number(*v),
            DebtChange::Balance(v) | DebtChange::CustomerDeclaredRepaymentAmount(v) => {
                FieldValue::number(*v)
            }
            DebtChange::RepaymentFrequency(v) => FieldValue::wire(v.as_ref()),
            DebtChange::IsBeingPaidOut(v) => FieldValue::Flag(*v),
        }
    }

    fn current_value(&self, target: &OtherDebt) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        match self {
            DebtChange::LimitValue(v) => amount("limitValue", *v),
            DebtChange::Balance(v) => optional("balance", *v, amount),
            DebtChange::CustomerDeclaredRepaymentAmount(v) => {
                optional("customerDeclaredRepaymentAmount", *v, amount)
            }
            _ => Ok(()),
        }
    }

    fn apply(&self, debt: &mut OtherDebt) {
        match self {
            DebtChange::DebtType(v) => debt.debt_type = *v,
            DebtChange::Description(v) => debt.description = v.clone(),
            DebtChange::LimitValue(v) => debt.limit_value = *v,
            DebtChange::Balance(v) => debt.balance = *v,
            DebtChange::CustomerDeclaredRepaymentAmount(v) => {
                debt.customer_declared_repayment_amount = *v
            }
            DebtChange::RepaymentFrequency(v) => debt.repayment_frequency = *v,
            DebtChange::IsBeingPaidOut(v) => debt.is_being_paid_out = Some(*v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum MortgageChange {
    Lender(Option<String>),
    OutstandingBalance(f64),
    LimitValue(f64),
    CustomerDeclaredRepaymentAmount(f64),
    RepaymentFrequency(Frequency),
    Purpose(Option<MortgagePurpose>),
    RepaymentType(Option<RepaymentType>),
    RemainingTerm(Option<u32>),
    InterestRate(Option<f64>),
    IsBeingRefinanced(Option<bool>),
    /// Applied without a log entry.
    Ownerships(Vec<Ownership>),
}

impl EntityChange for MortgageChange {
    type Target = OtherMortgage;
    type Field = MortgageField;

    fn field(&self) -> Option<MortgageField> {
        use MortgageChange as C;
        use MortgageField as F;
        match self {
            C::Lender(_) => Some(F::Lender),
            C::OutstandingBalance(_) => Some(F::OutstandingBalance),
            C::LimitValue(_) => Some(F::LimitValue),
            C::CustomerDeclaredRepaymentAmount(_) => Some(F::CustomerDeclaredRepaymentAmount),
            C::RepaymentFrequency(_) => Some(F::RepaymentFrequency),
            C::Purpose(_) => Some(F::Purpose),
            C::RepaymentType(_) => Some(F::RepaymentType),
            C::RemainingTerm(_) => Some(F::RemainingTerm),
            C::InterestRate(_) => Some(F::InterestRate),
            C::IsBeingRefinanced(_) => Some(F::IsBeingRefinanced),
            C::Ownerships(_) => None,
        }
    }

    fn value(&self) -> FieldValue {
        use MortgageChange as C;
        match self {
            C::Lender(v) => FieldValue::text(v.as_deref()),
            C::OutstandingBalance(v) | C::LimitValue(v) | C::CustomerDeclaredRepaymentAmount(v) => {
                FieldValue::Number(*v)
            }
            C::RepaymentFrequency(v) => FieldValue::wire(Some(v)),
            C::Purpose(v) => FieldValue::wire(v.as_ref()),
            C::RepaymentType(v) => FieldValue::wire(v.as_ref()),
            C::RemainingTerm(v) => FieldValue::whole(*v),
            C::InterestRate(v) => FieldValue::number(*v),
            C::IsBeingRefinanced(v) => FieldValue::flag(*v),
            C::Ownerships(_) => FieldValue::Missing,
        }
    }

    fn current_value(&self, target: &OtherMortgage) -> FieldValue {
        self.field().map_or(FieldValue::Missing, |f| f.read(target))
    }

    fn validate(&self) -> Result<(), WorkshopError> {
        use MortgageChange as C;
        match self {
            C::OutstandingBalance(v) => amount("outstandingBalance", *v),
            C::LimitValue(v) => amount("limitValue", *v),
            C::CustomerDeclaredRepaymentAmount(v) => amount("customerDeclaredRepaymentAmount", *v),
            C::InterestRate(v) => optional("interestRate", *v, rate),
            C::Ownerships(owners) => owners
                .iter()
                .try_for_each(|o| proportion("ownerships.proportion", o.proportion)),
            _ => Ok(()),
        }
    }

    fn apply(&self, mortgage: &mut OtherMortgage) {
        use MortgageChange as C;
        match self {
            C::Lender(v) => mortgage.lender = v.clone(),
            C::OutstandingBalance(v) => mortgage.outstanding_balance = *v,
            C::LimitValue(v) => mortgage.limit_value = *v,
            C::CustomerDeclaredRepaymentAmount(v) => mortgage.customer_declared_repayment_amount = *v,
            C::RepaymentFrequency(v) => mortgage.repayment_frequency = *v,
            C::Purpose(v) => mortgage.purpose = *v,
            C::RepaymentType(v) => mortgage.repayment_type = *v,
            C::RemainingTerm(v) => mortgage.remaining_term = *v,
            C::InterestRate(v) => mortgage.interest_rate = *v,
            C::IsBeingRefinanced(v) => mortgage.is_being_refinanced = *v,
            C::Ownerships(v) => mortgage.ownerships = v.clone(),
        }
    }
}

/// Validate every change before any of them is applied.
pub fn validate_all<C: EntityChange>(changes: &[C]) -> Result<(), WorkshopError> {
    changes.iter().try_for_each(|change| change.validate())
}

/// One edit to the working application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    UpdateLoan {
        changes: Vec<LoanChange>,
    },
    UpdateApplicant {
        applicant_id: String,
        changes: Vec<ApplicantChange>,
    },
    UpdateEmployment {
        applicant_id: String,
        employment_id: String,
        changes: Vec<EmploymentChange>,
    },
    AddRentalIncome {
        applicant_id: String,
        rental: NewRentalIncome,
    },
    UpdateRentalIncome {
        applicant_id: String,
        income_id: String,
        changes: Vec<RentalChange>,
    },
    RemoveRentalIncome {
        applicant_id: String,
        income_id: String,
    },
    UpdateOtherIncome {
        applicant_id: String,
        income_id: String,
        changes: Vec<OtherIncomeChange>,
    },
    UpdateExpense {
        applicant_id: String,
        expense_id: String,
        changes: Vec<ExpenseChange>,
    },
    UpdateDebt {
        debt_id: String,
        changes: Vec<DebtChange>,
    },
    UpdateMortgage {
        mortgage_id: String,
        changes: Vec<MortgageChange>,
    },
}

impl Command {
    /// Check every carried value without touching any state.
    pub fn validate(&self) -> Result<(), WorkshopError> {
        match self {
            Command::UpdateLoan { changes } => validate_all(changes),
            Command::UpdateApplicant { changes, .. } => validate_all(changes),
            Command::UpdateEmployment { changes, .. } => validate_all(changes),
            Command::AddRentalIncome { rental, .. } => validate_new_rental(rental),
            Command::UpdateRentalIncome { changes, .. } => validate_all(changes),
            Command::RemoveRentalIncome { .. } => Ok(()),
            Command::UpdateOtherIncome { changes, .. } => validate_all(changes),
            Command::UpdateExpense { changes, .. } => validate_all(changes),
            Command::UpdateDebt { changes, .. } => validate_all(changes),
            Command::UpdateMortgage { changes, .. } => validate_all(changes),
        }
    }
}
