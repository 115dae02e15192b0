//! The working-scenario store.
//!
//! `Workshop` owns the application being edited, the last calculation
//! result and the change log, next to the baseline scenario they are
//! compared against. Every edit goes through one of its command methods so
//! that the log and the application cannot drift apart.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::ids::{generate_change_id, generate_rental_id, generate_scenario_id};
use super::scenario::Scenario;
use crate::calc::Calculator;
use crate::changelog::{
    self, ChangeLogEntry, ChangeSummary, DebtField, EntryDraft, FieldPath, FieldValue, LoanField,
    RentalField,
};
use crate::edit::commands::validate_new_rental;
use crate::edit::{
    validate_all, ApplicantChange, Command, DebtChange, EmploymentChange, EntityChange,
    ExpenseChange, LoanChange, MortgageChange, OtherIncomeChange, RentalChange,
};
use crate::error::{CalculationError, WorkshopError};
use crate::impact::ImpactEstimator;
use crate::model::format::{
    format_debt_type, format_expense_type, format_other_income_type, humanize_key,
};
use crate::model::{ApplicationState, CalculationResult, NewRentalIncome};

pub struct Workshop {
    baseline: Scenario,
    application: ApplicationState,
    result: Option<CalculationResult>,
    /// Newest first.
    change_log: Vec<ChangeLogEntry>,
    estimator: ImpactEstimator,
    result_stale: bool,
}

fn loan_label(field: LoanField) -> &'static str {
    match field {
        LoanField::LoanAmount => "Loan amount",
        LoanField::LoanTerm => "Loan term",
        LoanField::InterestRateOngoing => "Interest rate",
        LoanField::InterestOnlyPeriod => "Interest-only period",
        LoanField::NegativeGearingPercentage => "Negative gearing percentage",
        LoanField::ShouldUseLowerRateBuffer => "Lower rate buffer",
    }
}

/// Apply `changes` to `target` in order, drafting one entry for every
/// logged field whose value actually changes.
///
/// `describe` and `impact` see the target as it was just before that
/// change was applied.
fn edit_entity<C: EntityChange>(
    target: &mut C::Target,
    changes: &[C],
    path: impl Fn(C::Field) -> FieldPath,
    describe: impl Fn(&C, C::Field, &C::Target) -> String,
    impact: impl Fn(&C, &C::Target) -> Option<f64>,
) -> Vec<EntryDraft> {
    let mut drafts = Vec::new();
    for change in changes {
        if let Some(field) = change.field() {
            let previous = change.current_value(target);
            let new = change.value();
            if previous != new {
                let draft = EntryDraft::field_change(
                    path(field),
                    describe(change, field, &*target),
                    &previous,
                    &new,
                )
                .with_impact(impact(change, &*target));
                drafts.push(draft);
            }
        }
        change.apply(target);
    }
    drafts
}

impl Workshop {
    /// Start editing a copy of `baseline`.
    pub fn new(baseline: Scenario) -> Self {
        Self::with_estimator(baseline, ImpactEstimator::default())
    }

    pub fn with_estimator(baseline: Scenario, estimator: ImpactEstimator) -> Self {
        info!("Opened workshop on baseline '{}' ({})", baseline.name, baseline.id);
        Self {
            application: baseline.application.clone(),
            result: baseline.result.clone(),
            change_log: Vec::new(),
            baseline,
            estimator,
            result_stale: false,
        }
    }

    /// Continue a saved working scenario against its baseline.
    pub fn resume(baseline: Scenario, working: Scenario) -> Self {
        info!(
            "Resuming scenario '{}' with {} logged changes",
            working.name,
            working.change_log.len()
        );
        let mut workshop = Self::new(baseline);
        workshop.application = working.application;
        workshop.result = working.result;
        workshop.change_log = working.change_log;
        workshop
    }

    pub fn set_estimator(&mut self, estimator: ImpactEstimator) {
        self.estimator = estimator;
    }

    pub fn application(&self) -> &ApplicationState {
        &self.application
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    pub fn change_log(&self) -> &[ChangeLogEntry] {
        &self.change_log
    }

    pub fn baseline(&self) -> &Scenario {
        &self.baseline
    }

    pub fn estimator(&self) -> &ImpactEstimator {
        &self.estimator
    }

    /// True when the application changed after the current result was
    /// calculated.
    pub fn is_result_stale(&self) -> bool {
        self.result_stale
    }

    /// Dispatch a command to its handler.
    pub fn apply(&mut self, command: Command) -> Result<(), WorkshopError> {
        match command {
            Command::UpdateLoan { changes } => self.update_loan(&changes),
            Command::UpdateApplicant {
                applicant_id,
                changes,
            } => self.update_applicant(&applicant_id, &changes),
            Command::UpdateEmployment {
                applicant_id,
                employment_id,
                changes,
            } => self.update_employment(&applicant_id, &employment_id, &changes),
            Command::AddRentalIncome {
                applicant_id,
                rental,
            } => self.add_rental_income(&applicant_id, rental).map(|_| ()),
            Command::UpdateRentalIncome {
                applicant_id,
                income_id,
                changes,
            } => self.update_rental_income(&applicant_id, &income_id, &changes),
            Command::RemoveRentalIncome {
                applicant_id,
                income_id,
            } => self.remove_rental_income(&applicant_id, &income_id),
            Command::UpdateOtherIncome {
                applicant_id,
                income_id,
                changes,
            } => self.update_other_income(&applicant_id, &income_id, &changes),
            Command::UpdateExpense {
                applicant_id,
                expense_id,
                changes,
            } => self.update_expense(&applicant_id, &expense_id, &changes),
            Command::UpdateDebt { debt_id, changes } => self.update_debt(&debt_id, &changes),
            Command::UpdateMortgage {
                mortgage_id,
                changes,
            } => self.update_mortgage(&mortgage_id, &changes),
        }
    }

    pub fn update_loan(&mut self, changes: &[LoanChange]) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let estimator = &self.estimator;
        let drafts = edit_entity(
            &mut self.application.loan,
            changes,
            FieldPath::loan,
            |_, field, _| format!("{} updated", loan_label(field)),
            |change, loan| match change {
                LoanChange::LoanAmount(new) => {
                    Some(estimator.loan_amount_change(loan.loan_amount, *new))
                }
                _ => None,
            },
        );
        self.commit(drafts);
        Ok(())
    }

    pub fn update_applicant(
        &mut self,
        applicant_id: &str,
        changes: &[ApplicantChange],
    ) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let applicant = self
            .application
            .applicant_mut(applicant_id)
            .ok_or_else(|| WorkshopError::not_found("Applicant", applicant_id))?;
        let drafts = edit_entity(
            applicant,
            changes,
            |field| FieldPath::applicant(applicant_id, field),
            |_, field, applicant| format!("{}'s {} updated", applicant.name, humanize_key(field.key())),
            |_, _| None,
        );
        self.commit(drafts);
        Ok(())
    }

    pub fn update_employment(
        &mut self,
        applicant_id: &str,
        employment_id: &str,
        changes: &[EmploymentChange],
    ) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let applicant = self
            .application
            .applicant_mut(applicant_id)
            .ok_or_else(|| WorkshopError::not_found("Applicant", applicant_id))?;
        let name = applicant.name.clone();
        let employment = applicant
            .employment_mut(employment_id)
            .ok_or_else(|| WorkshopError::not_found("Employment", employment_id))?;

        let drafts = edit_entity(
            employment,
            changes,
            |field| FieldPath::employment(applicant_id, employment_id, field),
            |_, field, _| format!("{}'s {} updated", name, humanize_key(field.key())),
            |_, _| None,
        );
        self.commit(drafts);
        Ok(())
    }

    /// Attach a new rental income to an applicant. Returns its generated id.
    pub fn add_rental_income(
        &mut self,
        applicant_id: &str,
        rental: NewRentalIncome,
    ) -> Result<String, WorkshopError> {
        validate_new_rental(&rental)?;

        let applicant = self
            .application
            .applicant_mut(applicant_id)
            .ok_or_else(|| WorkshopError::not_found("Applicant", applicant_id))?;
        let income_id = generate_rental_id();
        let amount = rental.proportional_amount;
        let path = FieldPath::rental(applicant_id, &income_id, None);
        let draft = EntryDraft::field_change(
            path,
            format!("Added rental income for {}", applicant.name),
            &FieldValue::Missing,
            &FieldValue::Number(amount),
        )
        .with_impact(Some(self.estimator.rental_added(amount)));

        applicant.incomes.rentals.push(rental.with_id(income_id.clone()));
        self.commit(vec![draft]);
        Ok(income_id)
    }

    pub fn update_rental_income(
        &mut self,
        applicant_id: &str,
        income_id: &str,
        changes: &[RentalChange],
    ) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let applicant = self
            .application
            .applicant_mut(applicant_id)
            .ok_or_else(|| WorkshopError::not_found("Applicant", applicant_id))?;
        let name = applicant.name.clone();
        let rental = applicant
            .rental_mut(income_id)
            .ok_or_else(|| WorkshopError::not_found("Rental income", income_id))?;

        let drafts = edit_entity(
            rental,
            changes,
            |field| FieldPath::rental(applicant_id, income_id, Some(field)),
            |_, field, _| {
                let what = match field {
                    RentalField::ProportionalAmount => "amount".to_string(),
                    other => humanize_key(other.key()),
                };
                format!("{}'s rental {} updated", name, what)
            },
            |_, _| None,
        );
        self.commit(drafts);
        Ok(())
    }

    pub fn remove_rental_income(
        &mut self,
        applicant_id: &str,
        income_id: &str,
    ) -> Result<(), WorkshopError> {
        let applicant = self
            .application
            .applicant_mut(applicant_id)
            .ok_or_else(|| WorkshopError::not_found("Applicant", applicant_id))?;
        let index = applicant
            .incomes
            .rentals
            .iter()
            .position(|r| r.income_id == income_id)
            .ok_or_else(|| WorkshopError::not_found("Rental income", income_id))?;

        let removed = applicant.incomes.rentals.remove(index);
        let amount = removed.proportional_amount;
        let draft = EntryDraft::field_change(
            FieldPath::rental(applicant_id, income_id, None),
            format!("Removed rental income for {}", applicant.name),
            &FieldValue::Number(amount),
            &FieldValue::Missing,
        )
        .with_impact(Some(self.estimator.rental_removed(amount)));

        self.commit(vec![draft]);
        Ok(())
    }

    pub fn update_other_income(
        &mut self,
        applicant_id: &str,
        income_id: &str,
        changes: &[OtherIncomeChange],
    ) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let applicant = self
            .application
            .applicant_mut(applicant_id)
            .ok_or_else(|| WorkshopError::not_found("Applicant", applicant_id))?;
        let name = applicant.name.clone();
        let income = applicant
            .other_income_mut(income_id)
            .ok_or_else(|| WorkshopError::not_found("Other income", income_id))?;

        let drafts = edit_entity(
            income,
            changes,
            |field| FieldPath::other_income(applicant_id, income_id, field),
            |_, field, income| {
                format!(
                    "{}'s {} {} updated",
                    name,
                    format_other_income_type(income.income_type).to_lowercase(),
                    humanize_key(field.key())
                )
            },
            |_, _| None,
        );
        self.commit(drafts);
        Ok(())
    }

    pub fn update_expense(
        &mut self,
        applicant_id: &str,
        expense_id: &str,
        changes: &[ExpenseChange],
    ) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let applicant = self
            .application
            .applicant_mut(applicant_id)
            .ok_or_else(|| WorkshopError::not_found("Applicant", applicant_id))?;
        let name = applicant.name.clone();
        let expense = applicant
            .expense_mut(expense_id)
            .ok_or_else(|| WorkshopError::not_found("Expense", expense_id))?;

        let drafts = edit_entity(
            expense,
            changes,
            |field| FieldPath::expense(applicant_id, expense_id, field),
            |_, _, expense| {
                format!(
                    "{}'s {} expense updated",
                    name,
                    format_expense_type(expense.expense_type).to_lowercase()
                )
            },
            |_, _| None,
        );
        self.commit(drafts);
        Ok(())
    }

    pub fn update_debt(&mut self, debt_id: &str, changes: &[DebtChange]) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let estimator = &self.estimator;
        let debt = self
            .application
            .debt_mut(debt_id)
            .ok_or_else(|| WorkshopError::not_found("Debt", debt_id))?;

        let drafts = edit_entity(
            debt,
            changes,
            |field| FieldPath::debt(debt_id, Some(field)),
            |change, field, debt| {
                let label = debt
                    .description
                    .clone()
                    .unwrap_or_else(|| format_debt_type(debt.debt_type).to_string());
                let action = match (field, change) {
                    (DebtField::IsBeingPaidOut, DebtChange::IsBeingPaidOut(true)) => {
                        "marked for payout"
                    }
                    (DebtField::IsBeingPaidOut, _) => "payout cancelled",
                    _ => "updated",
                };
                format!("{} {}", label, action)
            },
            |change, debt| match change {
                DebtChange::IsBeingPaidOut(true) => Some(estimator.debt_payout(debt.limit_value)),
                _ => None,
            },
        );
        self.commit(drafts);
        Ok(())
    }

    /// Ownership changes are applied without a log entry.
    pub fn update_mortgage(
        &mut self,
        mortgage_id: &str,
        changes: &[MortgageChange],
    ) -> Result<(), WorkshopError> {
        validate_all(changes)?;

        let mortgage = self
            .application
            .mortgage_mut(mortgage_id)
            .ok_or_else(|| WorkshopError::not_found("Mortgage", mortgage_id))?;

        let drafts = edit_entity(
            mortgage,
            changes,
            |field| FieldPath::mortgage(mortgage_id, field),
            |_, field, mortgage| {
                format!(
                    "{} {} updated",
                    mortgage.lender.as_deref().unwrap_or("Mortgage"),
                    humanize_key(field.key())
                )
            },
            |_, _| None,
        );
        self.commit(drafts);
        Ok(())
    }

    /// Stamp a draft with an id and the current time and put it at the
    /// head of the log.
    pub fn add_change_log_entry(&mut self, draft: EntryDraft) -> &ChangeLogEntry {
        let entry = draft.into_entry(generate_change_id(), Utc::now());
        debug!("Logged change {} on {}", entry.id, entry.field);
        self.change_log.insert(0, entry);
        &self.change_log[0]
    }

    fn commit(&mut self, drafts: Vec<EntryDraft>) {
        let count = drafts.len();
        for draft in drafts {
            self.add_change_log_entry(draft);
        }
        self.result_stale = true;
        info!(
            "Applied edit ({} logged, {} total in log)",
            count,
            self.change_log.len()
        );
    }

    /// Discard every edit and restore the baseline application and result.
    pub fn reset_to_baseline(&mut self) {
        info!(
            "Resetting to baseline '{}', discarding {} changes",
            self.baseline.name,
            self.change_log.len()
        );
        self.application = self.baseline.application.clone();
        self.result = self.baseline.result.clone();
        self.change_log.clear();
        self.result_stale = false;
    }

    /// Fields whose current value differs from the baseline, newest first.
    pub fn net_changes(&self) -> Vec<ChangeLogEntry> {
        changelog::net_changes(&self.change_log, &self.baseline.application)
    }

    pub fn summary(&self) -> ChangeSummary {
        let current = self
            .result
            .as_ref()
            .map(|r| r.net_surplus_or_deficit)
            .unwrap_or(0.0);
        changelog::summarize(
            &self.change_log,
            self.baseline.surplus().unwrap_or(0.0),
            current,
        )
    }

    /// A named copy of the current working state.
    pub fn snapshot(&self, name: impl Into<String>) -> Scenario {
        let now = Utc::now();
        Scenario {
            id: generate_scenario_id(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            application: self.application.clone(),
            result: self.result.clone(),
            is_baseline: false,
            change_log: self.change_log.clone(),
        }
    }

    /// Send the working application to `calculator`.
    ///
    /// On failure the previous result is kept and stays marked stale.
    pub async fn recalculate<C: Calculator>(
        &mut self,
        calculator: &C,
    ) -> Result<&CalculationResult, CalculationError> {
        match calculator.calculate(&self.application).await {
            Ok(result) => {
                info!(
                    "Recalculated: net surplus {:.0}",
                    result.net_surplus_or_deficit
                );
                self.result_stale = false;
                Ok(self.result.insert(result))
            }
            Err(e) => {
                warn!("Recalculation failed, keeping previous result: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::changelog::ChangeValue;
    use crate::model::{ApplicantType, ExpenseType, Frequency, Ownership};

    fn baseline() -> Scenario {
        let application: ApplicationState =
            serde_json::from_str(include_str!("../../tests/fixtures/application.json")).unwrap();
        let result: CalculationResult = serde_json::from_value(serde_json::json!({
            "netSurplusOrDeficit": -2750,
            "debtIncomeRatio": 6.2,
            "debtServiceRatio": 0.45,
            "rateBuffer": 3.0,
            "athBufferedRepayments": 6500,
            "extBufferedDebtRepayments": 3850
        }))
        .unwrap();
        Scenario::baseline("Original Application", application, Some(result))
    }

    fn text(s: &str) -> Option<ChangeValue> {
        Some(ChangeValue::Text(s.to_string()))
    }

    struct StubCalculator {
        surplus: Option<f64>,
    }

    impl Calculator for StubCalculator {
        async fn calculate(
            &self,
            _application: &ApplicationState,
        ) -> Result<CalculationResult, CalculationError> {
            match self.surplus {
                Some(surplus) => Ok(CalculationResult {
                    net_surplus_or_deficit: surplus,
                    debt_income_ratio: 5.8,
                    debt_service_ratio: 0.42,
                    rate_buffer: 3.0,
                    ath_buffered_repayments: 6234.0,
                    ext_buffered_debt_repayments: 3850.0,
                    applicants: Vec::new(),
                }),
                None => Err(CalculationError::Timeout(30)),
            }
        }
    }

    #[test]
    fn test_edit_back_to_baseline_nets_out() {
        let mut workshop = Workshop::new(baseline());
        workshop.update_loan(&[LoanChange::LoanAmount(850000.0)]).unwrap();
        workshop.update_loan(&[LoanChange::LoanAmount(920000.0)]).unwrap();

        assert_eq!(workshop.change_log().len(), 2);
        assert!(workshop.net_changes().is_empty());
    }

    #[test]
    fn test_net_change_previous_is_baseline_value() {
        let mut workshop = Workshop::new(baseline());
        workshop.update_loan(&[LoanChange::LoanAmount(880000.0)]).unwrap();
        workshop.update_loan(&[LoanChange::LoanAmount(850000.0)]).unwrap();

        assert_eq!(workshop.change_log().len(), 2);
        assert_eq!(workshop.change_log()[0].previous_value, text("$880,000"));

        let net = workshop.net_changes();
        assert_eq!(net.len(), 1);
        assert_eq!(net[0].previous_value, text("$920,000"));
        assert_eq!(net[0].new_value, text("$850,000"));
    }

    #[test]
    fn test_loan_amount_entry() {
        let mut workshop = Workshop::new(baseline());
        workshop.update_loan(&[LoanChange::LoanAmount(850000.0)]).unwrap();

        let entry = &workshop.change_log()[0];
        assert_eq!(entry.field.to_string(), "loan.loanAmount");
        assert_eq!(entry.description, "Loan amount updated");
        assert_eq!(entry.impact_on_surplus, Some(5600.0));
        assert!(entry.id.starts_with("change-"));
        assert!(workshop.is_result_stale());
    }

    #[test]
    fn test_unchanged_value_is_not_logged() {
        let mut workshop = Workshop::new(baseline());
        workshop
            .update_loan(&[LoanChange::LoanTerm(30), LoanChange::InterestRateOngoing(6.29)])
            .unwrap();
        assert_eq!(workshop.change_log().len(), 1);
        assert_eq!(workshop.change_log()[0].description, "Interest rate updated");
        assert_eq!(workshop.change_log()[0].new_value, text("6.29"));
    }

    #[test]
    fn test_debt_payout_impact() {
        let mut workshop = Workshop::new(baseline());
        workshop
            .update_debt("debt-001", &[DebtChange::IsBeingPaidOut(true)])
            .unwrap();

        let entry = &workshop.change_log()[0];
        assert_eq!(entry.description, "Westpac Altitude Platinum marked for payout");
        assert_eq!(entry.impact_on_surplus, Some(450.0));
        assert_eq!(entry.field.to_string(), "otherDebts.debt-001.isBeingPaidOut");

        workshop
            .update_debt("debt-001", &[DebtChange::IsBeingPaidOut(false)])
            .unwrap();
        let entry = &workshop.change_log()[0];
        assert_eq!(entry.description, "Westpac Altitude Platinum payout cancelled");
        assert_eq!(entry.impact_on_surplus, None);
    }

    #[test]
    fn test_added_rental_always_in_net_changes() {
        let mut workshop = Workshop::new(baseline());
        let income_id = workshop
            .add_rental_income(
                "app-002",
                NewRentalIncome {
                    property_address: Some("7 Harbour St, Wollongong".to_string()),
                    proportional_amount: 2800.0,
                    proportional_amount_frequency: Frequency::Monthly,
                    property_postcode: None,
                    ownerships: None,
                },
            )
            .unwrap();
        assert!(income_id.starts_with("rental-"));

        let entry = &workshop.change_log()[0];
        assert_eq!(entry.description, "Added rental income for Sarah Mitchell");
        assert_eq!(entry.previous_value, None);
        assert_eq!(entry.new_value, text("$2,800"));
        assert_eq!(entry.impact_on_surplus, Some(1344.0));

        let net = workshop.net_changes();
        assert_eq!(net.len(), 1);
        assert_eq!(
            net[0].field.to_string(),
            format!("applicants.app-002.rentals.{}", income_id)
        );
    }

    #[test]
    fn test_remove_rental() {
        let mut workshop = Workshop::new(baseline());
        workshop.remove_rental_income("app-001", "rent-001").unwrap();

        let entry = &workshop.change_log()[0];
        assert_eq!(entry.description, "Removed rental income for James Mitchell");
        assert_eq!(entry.previous_value, text("$2,800"));
        assert_eq!(entry.new_value, None);
        assert_eq!(entry.impact_on_surplus, Some(-1344.0));
        assert!(workshop
            .application()
            .applicant("app-001")
            .unwrap()
            .rental("rent-001")
            .is_none());
        assert_eq!(workshop.net_changes().len(), 1);
    }

    #[test]
    fn test_add_edit_remove_rental_nets_out() {
        let mut workshop = Workshop::new(baseline());
        let income_id = workshop
            .add_rental_income(
                "app-002",
                NewRentalIncome {
                    property_address: None,
                    proportional_amount: 2800.0,
                    proportional_amount_frequency: Frequency::Monthly,
                    property_postcode: None,
                    ownerships: None,
                },
            )
            .unwrap();
        workshop
            .update_rental_income("app-002", &income_id, &[RentalChange::ProportionalAmount(3000.0)])
            .unwrap();
        workshop.remove_rental_income("app-002", &income_id).unwrap();

        assert_eq!(workshop.change_log().len(), 3);
        assert_eq!(workshop.application(), &workshop.baseline().application);
        assert!(workshop.net_changes().is_empty());
    }

    #[test]
    fn test_edited_then_removed_rental_shows_only_removal() {
        let mut workshop = Workshop::new(baseline());
        workshop
            .update_rental_income("app-001", "rent-001", &[RentalChange::ProportionalAmount(3000.0)])
            .unwrap();
        workshop.remove_rental_income("app-001", "rent-001").unwrap();

        let net = workshop.net_changes();
        assert_eq!(net.len(), 1);
        assert_eq!(net[0].field.to_string(), "applicants.app-001.rentals.rent-001");
        assert_eq!(net[0].previous_value, text("$2,800"));
        assert_eq!(net[0].new_value, None);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut workshop = Workshop::new(baseline());
        workshop.update_loan(&[LoanChange::LoanAmount(850000.0)]).unwrap();
        workshop
            .update_debt("debt-002", &[DebtChange::IsBeingPaidOut(true)])
            .unwrap();

        workshop.reset_to_baseline();
        let first = workshop.application().clone();
        assert!(workshop.change_log().is_empty());
        assert!(!workshop.is_result_stale());

        workshop.reset_to_baseline();
        assert_eq!(workshop.application(), &first);
        assert_eq!(workshop.application(), &workshop.baseline().application);
        assert!(workshop.change_log().is_empty());
        assert_eq!(workshop.result(), workshop.baseline().result.as_ref());
    }

    #[test]
    fn test_invalid_command_changes_nothing() {
        let mut workshop = Workshop::new(baseline());
        let err = workshop
            .update_loan(&[LoanChange::LoanTerm(25), LoanChange::LoanAmount(f64::NAN)])
            .unwrap_err();
        assert!(matches!(err, WorkshopError::InvalidInput { .. }));
        assert_eq!(workshop.application().loan.loan_term, 30);
        assert!(workshop.change_log().is_empty());
        assert!(!workshop.is_result_stale());
    }

    #[test]
    fn test_unknown_entity_changes_nothing() {
        let mut workshop = Workshop::new(baseline());
        let err = workshop
            .update_expense("app-001", "exp-999", &[ExpenseChange::Amount(100.0)])
            .unwrap_err();
        assert!(matches!(err, WorkshopError::NotFound { kind: "Expense", .. }));

        assert!(workshop.remove_rental_income("app-009", "rent-001").is_err());
        assert!(workshop.change_log().is_empty());
        assert_eq!(workshop.application(), &workshop.baseline().application);
    }

    #[test]
    fn test_descriptions() {
        let mut workshop = Workshop::new(baseline());
        workshop
            .update_employment(
                "app-001",
                "emp-001",
                &[EmploymentChange::SalaryFrequency(Frequency::Monthly)],
            )
            .unwrap();
        assert_eq!(
            workshop.change_log()[0].description,
            "James Mitchell's salary frequency updated"
        );

        workshop
            .update_expense("app-001", "exp-002", &[ExpenseChange::Amount(950.0)])
            .unwrap();
        assert_eq!(
            workshop.change_log()[0].description,
            "James Mitchell's groceries expense updated"
        );

        workshop
            .update_expense(
                "app-001",
                "exp-002",
                &[
                    ExpenseChange::ExpenseType(ExpenseType::RentOrBoard),
                    ExpenseChange::Amount(1000.0),
                ],
            )
            .unwrap();
        assert_eq!(
            workshop.change_log()[0].description,
            "James Mitchell's rent or board expense updated"
        );

        workshop
            .update_rental_income(
                "app-001",
                "rent-001",
                &[RentalChange::ProportionalAmount(3000.0)],
            )
            .unwrap();
        assert_eq!(
            workshop.change_log()[0].description,
            "James Mitchell's rental amount updated"
        );

        workshop
            .update_mortgage("mort-001", &[MortgageChange::InterestRate(Some(5.99))])
            .unwrap();
        let entry = &workshop.change_log()[0];
        assert_eq!(entry.description, "Commonwealth Bank interest rate updated");
        assert_eq!(entry.previous_value, text("6.45"));
    }

    #[test]
    fn test_mortgage_ownerships_applied_but_unlogged() {
        let mut workshop = Workshop::new(baseline());
        let owners = vec![
            Ownership {
                owner: ApplicantType::PrimaryApplicant,
                proportion: 0.5,
            },
            Ownership {
                owner: ApplicantType::SecondaryApplicant,
                proportion: 0.5,
            },
        ];
        workshop
            .update_mortgage("mort-001", &[MortgageChange::Ownerships(owners.clone())])
            .unwrap();

        assert!(workshop.change_log().is_empty());
        assert_eq!(
            workshop.application().mortgage("mort-001").unwrap().ownerships,
            owners
        );
    }

    #[test]
    fn test_apply_dispatches_command() {
        let mut workshop = Workshop::new(baseline());
        workshop
            .apply(Command::UpdateApplicant {
                applicant_id: "app-002".to_string(),
                changes: vec![ApplicantChange::NoOfDependents(Some(3))],
            })
            .unwrap();
        let entry = &workshop.change_log()[0];
        assert_eq!(entry.description, "Sarah Mitchell's no of dependents updated");
        assert_eq!(entry.field.to_string(), "applicants.app-002.noOfDependents");
    }

    #[test]
    fn test_summary_and_snapshot() {
        let mut workshop = Workshop::new(baseline());
        workshop.update_loan(&[LoanChange::LoanAmount(850000.0)]).unwrap();
        workshop
            .update_debt("debt-001", &[DebtChange::IsBeingPaidOut(true)])
            .unwrap();

        let summary = workshop.summary();
        assert_eq!(summary.baseline_surplus, -2750.0);
        let liability = summary
            .categories
            .iter()
            .find(|c| c.category == crate::changelog::ChangeCategory::Liability)
            .unwrap();
        assert_eq!(liability.count, 1);
        assert_eq!(liability.impact, 450.0);

        let snapshot = workshop.snapshot("Reduced loan");
        assert!(!snapshot.is_baseline);
        assert_eq!(snapshot.change_log.len(), 2);
        assert_eq!(snapshot.application.loan.loan_amount, 850000.0);
    }

    #[tokio::test]
    async fn test_recalculate_success_clears_stale() {
        let mut workshop = Workshop::new(baseline());
        workshop.update_loan(&[LoanChange::LoanAmount(850000.0)]).unwrap();
        assert!(workshop.is_result_stale());

        let calculator = StubCalculator {
            surplus: Some(-1240.0),
        };
        let result = workshop.recalculate(&calculator).await.unwrap();
        assert_eq!(result.net_surplus_or_deficit, -1240.0);
        assert!(!workshop.is_result_stale());
        assert_eq!(workshop.summary().total_impact, 1510.0);
    }

    #[tokio::test]
    async fn test_recalculate_failure_keeps_previous_result() {
        let mut workshop = Workshop::new(baseline());
        workshop.update_loan(&[LoanChange::LoanAmount(850000.0)]).unwrap();

        let calculator = StubCalculator { surplus: None };
        let err = workshop.recalculate(&calculator).await.unwrap_err();
        assert!(matches!(err, CalculationError::Timeout(30)));
        assert!(workshop.is_result_stale());
        assert_eq!(
            workshop.result().map(|r| r.net_surplus_or_deficit),
            Some(-2750.0)
        );
    }
}
