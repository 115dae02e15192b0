use std::path::PathBuf;

use serviceability_workshop::changelog::{ChangeValue, FieldPath};
use serviceability_workshop::edit::{command_for, Command, DebtChange};
use serviceability_workshop::model::io::{read_application, read_scenario, write_scenario_atomic};
use serviceability_workshop::{Scenario, ScenarioLibrary, Workshop, WorkshopError};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn baseline() -> Scenario {
    read_scenario(&fixture_path("baseline_scenario.json")).expect("Failed to read baseline fixture")
}

fn text(s: &str) -> Option<ChangeValue> {
    Some(ChangeValue::Text(s.to_string()))
}

#[test]
fn test_resume_working_scenario_nets_out_bonus() {
    let working = read_scenario(&fixture_path("working_scenario.json")).unwrap();
    let workshop = Workshop::resume(baseline(), working);

    assert_eq!(workshop.change_log().len(), 3);

    let net = workshop.net_changes();
    let fields: Vec<String> = net.iter().map(|e| e.field.to_string()).collect();
    assert_eq!(fields, vec!["otherDebts.debt-002", "loan.loanAmount"]);

    assert_eq!(net[0].previous_value, text("Active"));
    assert_eq!(net[0].new_value, text("Paying out"));
    assert_eq!(net[1].previous_value, text("$920,000"));
    assert_eq!(net[1].new_value, Some(ChangeValue::Number(850000.0)));
}

#[test]
fn test_cancelling_resumed_payout_nets_out() {
    let working = read_scenario(&fixture_path("working_scenario.json")).unwrap();
    let mut workshop = Workshop::resume(baseline(), working);

    workshop
        .update_debt("debt-002", &[DebtChange::IsBeingPaidOut(false)])
        .unwrap();
    assert_eq!(workshop.change_log().len(), 4);
    assert_eq!(
        workshop.change_log()[0].field.to_string(),
        "otherDebts.debt-002.isBeingPaidOut"
    );

    let fields: Vec<String> = workshop
        .net_changes()
        .iter()
        .map(|e| e.field.to_string())
        .collect();
    assert_eq!(fields, vec!["loan.loanAmount"]);
}

#[test]
fn test_resumed_summary_uses_both_results() {
    let working = read_scenario(&fixture_path("working_scenario.json")).unwrap();
    let workshop = Workshop::resume(baseline(), working);

    let summary = workshop.summary();
    assert_eq!(summary.baseline_surplus, -2750.0);
    assert_eq!(summary.current_surplus, -1240.0);
    assert_eq!(summary.total_impact, 1510.0);
}

#[test]
fn test_edits_file_applies_in_order() {
    let content = std::fs::read_to_string(fixture_path("edits.json")).unwrap();
    let commands: Vec<Command> = serde_json::from_str(&content).expect("Invalid edits fixture");
    assert_eq!(commands.len(), 5);

    let mut workshop = Workshop::new(baseline());
    for command in commands {
        workshop.apply(command).unwrap();
    }

    assert_eq!(workshop.change_log().len(), 5);
    assert_eq!(workshop.application().loan.loan_amount, 850000.0);

    let net = workshop.net_changes();
    assert_eq!(net.len(), 4);
    let loan = net
        .iter()
        .find(|e| e.field.to_string() == "loan.loanAmount")
        .unwrap();
    assert_eq!(loan.previous_value, text("$920,000"));
    assert_eq!(loan.new_value, text("$850,000"));

    let rental = net
        .iter()
        .find(|e| e.description.starts_with("Added rental income"))
        .unwrap();
    assert_eq!(rental.impact_on_surplus, Some(1008.0));
}

#[test]
fn test_raw_input_round_trip_to_baseline() {
    let mut workshop = Workshop::new(baseline());
    let path: FieldPath = "applicants.app-001.expenses.exp-002.amount".parse().unwrap();

    workshop.apply(command_for(&path, "$950").unwrap()).unwrap();
    assert_eq!(workshop.net_changes().len(), 1);
    assert_eq!(
        workshop.change_log()[0].description,
        "James Mitchell's groceries expense updated"
    );

    workshop.apply(command_for(&path, "1,200").unwrap()).unwrap();
    assert_eq!(workshop.change_log().len(), 2);
    assert!(workshop.net_changes().is_empty());
}

#[test]
fn test_malformed_input_is_rejected_before_apply() {
    let workshop = Workshop::new(baseline());
    let path: FieldPath = "loan.loanAmount".parse().unwrap();

    let err = command_for(&path, "eight hundred").unwrap_err();
    assert!(matches!(err, WorkshopError::InvalidInput { .. }));
    assert!(workshop.change_log().is_empty());
}

#[test]
fn test_legacy_income_path_parses() {
    let legacy: FieldPath = "applicants.app-001.incomes.employments.emp-001.bonus"
        .parse()
        .unwrap();
    let canonical: FieldPath = "applicants.app-001.employments.emp-001.bonus".parse().unwrap();
    assert_eq!(legacy, canonical);
    assert_eq!(legacy.to_string(), "applicants.app-001.employments.emp-001.bonus");
}

#[test]
fn test_export_and_reimport_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("exports").join("reduced.json");

    let mut workshop = Workshop::new(baseline());
    let path: FieldPath = "loan.loanAmount".parse().unwrap();
    workshop.apply(command_for(&path, "850000").unwrap()).unwrap();

    let snapshot = workshop.snapshot("Reduced loan");
    write_scenario_atomic(&snapshot, &target).unwrap();

    let reread = read_scenario(&target).unwrap();
    assert_eq!(reread, snapshot);

    let resumed = Workshop::resume(baseline(), reread);
    assert_eq!(resumed.net_changes().len(), 1);
}

#[test]
fn test_library_keeps_baseline_and_working() {
    let dir = tempfile::tempdir().unwrap();
    let library = ScenarioLibrary::new(&dir.path().join("data").join("scenarios.db")).unwrap();

    let base = baseline();
    let working = read_scenario(&fixture_path("working_scenario.json")).unwrap();
    library.save(&base).unwrap();
    library.save(&working).unwrap();

    let summaries = library.list().unwrap();
    assert_eq!(summaries.len(), 2);
    let current = summaries.iter().find(|s| s.id == "scenario-current").unwrap();
    assert_eq!(current.change_count, 3);
    assert!(!current.is_baseline);

    let loaded = library.get("scenario-baseline").unwrap();
    assert_eq!(loaded, base);
}

#[test]
fn test_application_import_matches_baseline() {
    let application = read_application(&fixture_path("application.json")).unwrap();
    assert_eq!(application, baseline().application);
    assert_eq!(application.applicants.len(), 2);
    assert_eq!(application.other_debts.len(), 3);
}
