//! Loan application data model.
//!
//! Field names and enum spellings follow the serviceability API's JSON
//! shape (camelCase keys, upper snake case enum values) so applications
//! exported by other tools import unchanged.

use serde::{Deserialize, Serialize};

/// How often an amount is received or paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Yearly,
    Monthly,
    Fortnightly,
    Weekly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Married,
    Defacto,
    Relative,
    Friends,
    BusinessPartners,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicantType {
    PrimaryApplicant,
    SecondaryApplicant,
    NonBorrower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Individual,
    NonIndividual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Single,
    Married,
    Defacto,
    Divorced,
    Widowed,
    Separated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    FullTime,
    PartTime,
    Casual,
    Contract,
    VariableContract,
    SoleTrader,
    SelfEmployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtherIncomeType {
    InvestmentIncome,
    IncomeFromCashSavingsOrTermDeposits,
    SuperannuationIncome,
    OtherIncome,
    ChildSupportIncome,
    GovernmentFamilyPayments,
    GovernmentPension,
    GovernmentBenefitsNewstartOrSickness,
    CompanyProfitAfterTax,
    GovernmentIncomeOther,
    ForeignIncome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseType {
    Entertainment,
    Media,
    ChildSupport,
    RentOrBoard,
    Utilities,
    Groceries,
    Clothing,
    Education,
    Transport,
    Medical,
    Insurance,
    OtherExpenses,
    InvestmentPropertyExpenses,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebtType {
    CreditCard,
    PersonalLoan,
    AutomotiveLoan,
    LineOfCredit,
    StoreCard,
    Overdrafts,
    Investment,
    OtherLoan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MortgagePurpose {
    Investment,
    OwnerOccupied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepaymentType {
    #[serde(rename = "P&I")]
    PrincipalAndInterest,
    #[serde(rename = "IO")]
    InterestOnly,
}

/// Share of an asset or liability held by one applicant role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ownership {
    pub owner: ApplicantType,
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employment {
    pub id: String,
    pub job_type: JobType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer: Option<String>,
    pub salary: f64,
    pub salary_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_overtime_and_shift_allowance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular_overtime_and_shift_allowance_frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commission_frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_allowance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_allowance_frequency: Option<Frequency>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalOwnership {
    pub party_id: String,
    /// 0.0 - 1.0
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalIncome {
    pub income_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    pub proportional_amount: f64,
    pub proportional_amount_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_postcode: Option<String>,
    /// When absent the whole rental belongs to the applicant holding it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownerships: Option<Vec<RentalOwnership>>,
}

/// A rental income before it has been assigned an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRentalIncome {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_address: Option<String>,
    pub proportional_amount: f64,
    pub proportional_amount_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownerships: Option<Vec<RentalOwnership>>,
}

impl NewRentalIncome {
    pub fn with_id(self, income_id: String) -> RentalIncome {
        RentalIncome {
            income_id,
            property_address: self.property_address,
            proportional_amount: self.proportional_amount,
            proportional_amount_frequency: self.proportional_amount_frequency,
            property_postcode: self.property_postcode,
            ownerships: self.ownerships,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherIncome {
    pub id: String,
    #[serde(rename = "type")]
    pub income_type: OtherIncomeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub proportional_amount: f64,
    pub proportional_amount_frequency: Frequency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    pub amount_frequency: Frequency,
}

/// A non-mortgage liability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherDebt {
    pub id: String,
    #[serde(rename = "type")]
    pub debt_type: DebtType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub limit_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_declared_repayment_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repayment_frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_being_paid_out: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtherMortgage {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lender: Option<String>,
    pub outstanding_balance: f64,
    pub limit_value: f64,
    pub customer_declared_repayment_amount: f64,
    pub repayment_frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<MortgagePurpose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repayment_type: Option<RepaymentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_term: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_being_refinanced: Option<bool>,
    #[serde(default)]
    pub ownerships: Vec<Ownership>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Incomes {
    #[serde(default)]
    pub employments: Vec<Employment>,
    #[serde(default)]
    pub rentals: Vec<RentalIncome>,
    #[serde(default)]
    pub others: Vec<OtherIncome>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub party_id: String,
    pub name: String,
    pub applicant_type: ApplicantType,
    pub entity_type: EntityType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_of_dependents: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hem: Option<f64>,
    #[serde(default)]
    pub incomes: Incomes,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Applicant {
    pub fn employment(&self, id: &str) -> Option<&Employment> {
        self.incomes.employments.iter().find(|e| e.id == id)
    }

    pub fn rental(&self, income_id: &str) -> Option<&RentalIncome> {
        self.incomes.rentals.iter().find(|r| r.income_id == income_id)
    }

    pub fn other_income(&self, id: &str) -> Option<&OtherIncome> {
        self.incomes.others.iter().find(|o| o.id == id)
    }

    pub fn expense(&self, id: &str) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn employment_mut(&mut self, id: &str) -> Option<&mut Employment> {
        self.incomes.employments.iter_mut().find(|e| e.id == id)
    }

    pub fn rental_mut(&mut self, income_id: &str) -> Option<&mut RentalIncome> {
        self.incomes
            .rentals
            .iter_mut()
            .find(|r| r.income_id == income_id)
    }

    pub fn other_income_mut(&mut self, id: &str) -> Option<&mut OtherIncome> {
        self.incomes.others.iter_mut().find(|o| o.id == id)
    }

    pub fn expense_mut(&mut self, id: &str) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdMember {
    pub party_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub household_id: String,
    #[serde(default)]
    pub applicants: Vec<HouseholdMember>,
    pub address_postcode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_between_applicants: Option<RelationshipType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_of_dependents: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collateral {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// One product split of the proposed loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSplit {
    pub id: String,
    pub product_name: String,
    pub amount: f64,
    pub interest_rate: f64,
    pub loan_term: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_only_period: Option<u32>,
    pub repayment_type: RepaymentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_fixed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_period: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    pub loan_amount: f64,
    /// Years.
    pub loan_term: u32,
    /// Percent per annum.
    pub interest_rate_ongoing: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_only_period: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative_gearing_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_use_lower_rate_buffer: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub splits: Option<Vec<LoanSplit>>,
}

/// Full snapshot of a loan application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationState {
    pub loan: LoanDetails,
    #[serde(default)]
    pub applicants: Vec<Applicant>,
    #[serde(default)]
    pub households: Vec<Household>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_between_applicants: Option<RelationshipType>,
    #[serde(default)]
    pub collaterals: Vec<Collateral>,
    #[serde(default)]
    pub ownerships: Vec<Ownership>,
    #[serde(default)]
    pub other_mortgages: Vec<OtherMortgage>,
    #[serde(default)]
    pub other_debts: Vec<OtherDebt>,
}

impl ApplicationState {
    pub fn applicant(&self, party_id: &str) -> Option<&Applicant> {
        self.applicants.iter().find(|a| a.party_id == party_id)
    }

    pub fn applicant_mut(&mut self, party_id: &str) -> Option<&mut Applicant> {
        self.applicants.iter_mut().find(|a| a.party_id == party_id)
    }

    pub fn debt(&self, id: &str) -> Option<&OtherDebt> {
        self.other_debts.iter().find(|d| d.id == id)
    }

    pub fn debt_mut(&mut self, id: &str) -> Option<&mut OtherDebt> {
        self.other_debts.iter_mut().find(|d| d.id == id)
    }

    pub fn mortgage(&self, id: &str) -> Option<&OtherMortgage> {
        self.other_mortgages.iter().find(|m| m.id == id)
    }

    pub fn mortgage_mut(&mut self, id: &str) -> Option<&mut OtherMortgage> {
        self.other_mortgages.iter_mut().find(|m| m.id == id)
    }
}

/// Wire spelling of a unit-variant enum (e.g. `"MONTHLY"`, `"P&I"`).
pub fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

/// Parse a unit-variant enum from its wire spelling.
pub fn parse_wire_name<T: for<'de> Deserialize<'de>>(raw: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_string())).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repayment_type_wire_names() {
        assert_eq!(wire_name(&RepaymentType::PrincipalAndInterest), "P&I");
        assert_eq!(
            parse_wire_name::<RepaymentType>("IO"),
            Some(RepaymentType::InterestOnly)
        );
    }

    #[test]
    fn test_long_enum_wire_names() {
        assert_eq!(
            wire_name(&OtherIncomeType::GovernmentBenefitsNewstartOrSickness),
            "GOVERNMENT_BENEFITS_NEWSTART_OR_SICKNESS"
        );
        assert_eq!(
            parse_wire_name::<ExpenseType>("RENT_OR_BOARD"),
            Some(ExpenseType::RentOrBoard)
        );
        assert_eq!(parse_wire_name::<Frequency>("monthly"), None);
    }

    #[test]
    fn test_expense_deserialize_camel_case() {
        let json = r#"{
            "id": "exp-001",
            "type": "UTILITIES",
            "amount": 350,
            "amountFrequency": "MONTHLY"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.expense_type, ExpenseType::Utilities);
        assert_eq!(expense.amount, 350.0);
        assert_eq!(expense.amount_frequency, Frequency::Monthly);
        assert!(expense.description.is_none());
    }

    #[test]
    fn test_optional_fields_skipped_on_serialize() {
        let debt = OtherDebt {
            id: "debt-002".to_string(),
            debt_type: DebtType::CreditCard,
            description: None,
            limit_value: 25000.0,
            balance: Some(0.0),
            customer_declared_repayment_amount: None,
            repayment_frequency: None,
            is_being_paid_out: None,
        };
        let json = serde_json::to_string(&debt).unwrap();
        assert!(json.contains("\"limitValue\":25000.0"));
        assert!(json.contains("\"type\":\"CREDIT_CARD\""));
        assert!(!json.contains("isBeingPaidOut"));
    }
}
