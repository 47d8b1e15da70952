//! Integration tests for billsplit-core

use billsplit_core::{
    aggregate_statements, process_statement, process_statements,
    utils::MemoryContactStore,
    BillError, Contact, ContactStore, StatementSummary, TOTAL_ROW_NAME, UNKNOWN_CONTACT,
};
use bigdecimal::BigDecimal;
use std::collections::HashMap;
use std::str::FromStr;

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

fn contacts() -> HashMap<String, String> {
    let mut map = HashMap::new();
    map.insert("(940) 218-8816".to_string(), "Alice".to_string());
    map.insert("(817) 555-0123".to_string(), "Bob".to_string());
    map
}

fn statement_text(issue_date: &str) -> String {
    format!(
        "\
T-Mobile statement page\n\
Bill issue date Account Page\n\
{} 987654321 2 of 8\n\
THIS BILL SUMMARY\n\
Line Type Plans Equipment Services One-time charges Total\n\
(940) 218-8816 Voice $40.00 $10.00 $5.00 - $55.00\n\
(817) 555-0123 Voice $30.00 - Included - $30.00\n\
Totals $70.00 $10.00 $5.00 $0.00 $85.00\n\
DETAILED CHARGES\n\
detail lines follow\n",
        issue_date
    )
}

#[test]
fn test_complete_bill_workflow() {
    let text = statement_text("Apr 15, 2024");
    let summary = process_statement(&text, &contacts(), true).unwrap();

    assert_eq!(summary.issue_date, "Apr 15, 2024");

    // lines come back sorted by display name with the total row appended
    let names: Vec<&str> = summary.rows().map(|row| row.display_name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Bob", TOTAL_ROW_NAME]);

    // equal split: both lines carry half the plan pool and half the service pool
    let alice = &summary.lines[0];
    let bob = &summary.lines[1];
    assert_eq!(alice.plan_cost, dec("35.00"));
    assert_eq!(bob.plan_cost, dec("35.00"));
    assert_eq!(alice.service_cost, dec("2.50"));
    assert_eq!(bob.service_cost, dec("2.50"));
    assert_eq!(alice.total_amount, dec("47.50"));
    assert_eq!(bob.total_amount, dec("37.50"));

    // the total row repeats the vendor-reported figures
    assert_eq!(summary.total_row.total_amount, dec("85.00"));
    assert!(summary.reconciliation.is_reconciled);
    assert_eq!(summary.reconciliation.discrepancy, dec("0"));
}

#[test]
fn test_as_billed_plan_costs_are_kept() {
    let text = statement_text("Apr 15, 2024");
    let summary = process_statement(&text, &contacts(), false).unwrap();

    assert_eq!(summary.lines[0].plan_cost, dec("40.00"));
    assert_eq!(summary.lines[1].plan_cost, dec("30.00"));
    assert!(summary.reconciliation.is_reconciled);
}

#[test]
fn test_single_line_statement_with_older_layout() {
    let text = "\
Bill issue date Account Page\n\
Apr 15, 2024 987654321 2 of 8\n\
THIS BILL SUMMARY\n\
Line Type Plans Equipment Services Total\n\
(940) 218-8816 John -10.00 Included -\n\
Totals $40.00 $0.00 $0.00 $0.00 $40.00\n\
DETAILED CHARGES\n";

    let summary = process_statement(text, &HashMap::new(), true).unwrap();

    assert_eq!(summary.lines.len(), 1);
    let line = &summary.lines[0];
    assert_eq!(line.display_name, UNKNOWN_CONTACT);
    assert_eq!(line.plan_cost, dec("40.00"));
    assert_eq!(line.equipment_cost, dec("0"));
    assert_eq!(line.one_time_charges, dec("0"));
    assert_eq!(line.total_amount, dec("40.00"));
    assert!(summary.reconciliation.is_reconciled);
    assert_eq!(summary.reconciliation.discrepancy, dec("0"));
}

#[test]
fn test_batch_returns_results_for_surviving_statements() {
    let good_april = statement_text("Apr 15, 2024");
    let good_may = statement_text("May 15, 2024");
    let missing_marker = good_april.replace("DETAILED CHARGES", "OTHER SECTION");

    let results = process_statements(
        [good_april.as_str(), missing_marker.as_str(), good_may.as_str()],
        &contacts(),
        true,
    );

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1].as_ref().unwrap_err(),
        BillError::SectionNotFound(_)
    ));
    assert_eq!(results[2].as_ref().unwrap().issue_date, "May 15, 2024");
}

#[test]
fn test_multi_period_aggregation() {
    let contacts = contacts();
    let summaries: Vec<StatementSummary> = [
        statement_text("Apr 15, 2024"),
        statement_text("May 15, 2024"),
    ]
    .iter()
    .map(|text| process_statement(text, &contacts, true).unwrap())
    .collect();

    let aggregate = aggregate_statements(&summaries);

    // one group per line, each summing two periods
    assert_eq!(aggregate.groups.len(), 2);
    assert_eq!(aggregate.groups[0].display_name, "Alice");
    assert_eq!(aggregate.groups[0].plan_cost, dec("70.00"));
    assert_eq!(aggregate.groups[0].total_amount, dec("95.00"));
    assert_eq!(aggregate.groups[1].display_name, "Bob");
    assert_eq!(aggregate.groups[1].total_amount, dec("75.00"));

    let group_sum: BigDecimal = aggregate
        .groups
        .iter()
        .map(|group| &group.total_amount)
        .sum();
    assert_eq!(aggregate.total_row.total_amount, group_sum);
    assert_eq!(aggregate.total_row.total_amount, dec("170.00"));
}

#[test]
fn test_processing_is_deterministic_and_serializable() {
    let text = statement_text("Apr 15, 2024");
    let first = process_statement(&text, &contacts(), true).unwrap();
    let second = process_statement(&text, &contacts(), true).unwrap();
    assert_eq!(first, second);

    let json = serde_json::to_string(&first).unwrap();
    let restored: StatementSummary = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, first);
}

#[tokio::test]
async fn test_contact_store_feeds_statement_processing() {
    let mut store = MemoryContactStore::new();
    store
        .save_contact(&Contact::new(
            "940.218.8816".to_string(),
            "Alice".to_string(),
        ))
        .await
        .unwrap();

    let text = statement_text("Apr 15, 2024");
    let summary = process_statement(&text, &store, true).unwrap();

    // the saved contact resolves through its canonicalized key; the other
    // line stays unknown
    let names: Vec<&str> = summary
        .lines
        .iter()
        .map(|line| line.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["Alice", UNKNOWN_CONTACT]);

    store.delete_contact("(940) 218-8816").await.unwrap();
    let summary = process_statement(&text, &store.directory(), true).unwrap();
    assert!(summary
        .lines
        .iter()
        .all(|line| line.display_name == UNKNOWN_CONTACT));
}
