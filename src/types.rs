//! Core types and data structures for the bill-splitting system

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Display name assigned to a subscriber line with no contact mapping
pub const UNKNOWN_CONTACT: &str = "Unknown";

/// Display name of the synthesized grand-total row
pub const TOTAL_ROW_NAME: &str = "Total";

/// Canonical per-subscriber record within one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Canonical-format phone number, e.g. `(940) 218-8816`; unique per statement
    pub phone_number: String,
    /// Free-text plan label as printed on the statement
    pub plan_type: String,
    /// Monthly plan charge (after allocation policy is applied)
    pub plan_cost: BigDecimal,
    /// Equipment installment charge
    pub equipment_cost: BigDecimal,
    /// Service charge (always redistributed equally across lines)
    pub service_cost: BigDecimal,
    /// One-time charges for the period
    pub one_time_charges: BigDecimal,
    /// Sum of the four cost fields; kept exact at all times
    pub total_amount: BigDecimal,
    /// Resolved contact name, or [`UNKNOWN_CONTACT`]
    pub display_name: String,
}

impl LineItem {
    /// Create a new line item, deriving `total_amount` from the cost fields
    pub fn new(
        phone_number: String,
        plan_type: String,
        plan_cost: BigDecimal,
        equipment_cost: BigDecimal,
        service_cost: BigDecimal,
        one_time_charges: BigDecimal,
        display_name: String,
    ) -> Self {
        let total_amount = &plan_cost + &equipment_cost + &service_cost + &one_time_charges;
        Self {
            phone_number,
            plan_type,
            plan_cost,
            equipment_cost,
            service_cost,
            one_time_charges,
            total_amount,
            display_name,
        }
    }

    /// Restore the `total_amount` invariant after a cost field changed
    pub fn recompute_total(&mut self) {
        self.total_amount =
            &self.plan_cost + &self.equipment_cost + &self.service_cost + &self.one_time_charges;
    }
}

/// Vendor-reported grand totals per cost category, parsed from the
/// statement's `Totals` row
///
/// These figures size the shared-cost pools and back the reconciliation
/// check; they are never overwritten by computed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementTotals {
    /// Pooled plan cost across all lines
    pub plan_cost: BigDecimal,
    /// Total equipment charges
    pub equipment_cost: BigDecimal,
    /// Total service charges
    pub service_cost: BigDecimal,
    /// Total one-time charges
    pub one_time_charges: BigDecimal,
    /// Vendor-reported grand total for the statement
    pub grand_total: BigDecimal,
}

/// Outcome of comparing computed per-line totals against the
/// vendor-reported grand total
///
/// A mismatch is a data-quality warning, not an error; the allocation
/// result remains usable either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Sum of the allocated per-line totals
    pub computed_total: BigDecimal,
    /// Grand total as reported by the vendor
    pub reported_total: BigDecimal,
    /// `computed_total - reported_total`
    pub discrepancy: BigDecimal,
    /// Whether the discrepancy stays below the tolerance
    pub is_reconciled: bool,
}

impl Reconciliation {
    /// Compare a computed total against the reported one with the given tolerance
    pub fn compare(
        computed_total: BigDecimal,
        reported_total: BigDecimal,
        tolerance: &BigDecimal,
    ) -> Self {
        let discrepancy = &computed_total - &reported_total;
        let is_reconciled = discrepancy.abs() < *tolerance;
        Self {
            computed_total,
            reported_total,
            discrepancy,
            is_reconciled,
        }
    }
}

/// Fully processed statement for one billing period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSummary {
    /// Issue date exactly as printed on the statement
    pub issue_date: String,
    /// Issue date parsed from the printed form, when it matches the
    /// vendor's `Apr 15, 2024` style
    pub issued_on: Option<NaiveDate>,
    /// Allocated subscriber lines, sorted by display name
    pub lines: Vec<LineItem>,
    /// Synthesized grand-total row carrying the vendor-reported figures
    pub total_row: LineItem,
    /// Vendor-reported totals used for allocation pools and reconciliation
    pub totals: StatementTotals,
    /// Reconciliation of allocated lines against the reported grand total
    pub reconciliation: Reconciliation,
}

impl StatementSummary {
    /// The full output table: subscriber lines followed by the total row
    pub fn rows(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter().chain(std::iter::once(&self.total_row))
    }

    /// Per-line records tagged with this statement's issue date, ready for
    /// multi-period aggregation (the total row is excluded)
    pub fn period_records(&self) -> Vec<PeriodRecord> {
        self.lines
            .iter()
            .map(|line| PeriodRecord::new(self.issue_date.clone(), line.clone()))
            .collect()
    }
}

/// A line item tagged with its originating statement's issue date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Issue date of the statement the line came from, as printed
    pub issue_date: String,
    /// The allocated line item
    pub line: LineItem,
}

impl PeriodRecord {
    /// Create a new period record
    pub fn new(issue_date: String, line: LineItem) -> Self {
        Self { issue_date, line }
    }
}

/// Multi-period aggregate of line items grouped by line identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedBill {
    /// One row per `(display_name, phone_number, plan_type)` group, with
    /// all monetary fields summed across periods
    pub groups: Vec<LineItem>,
    /// Grand-total row summing every group
    pub total_row: LineItem,
}

impl AggregatedBill {
    /// The full aggregate table: group rows followed by the total row
    pub fn rows(&self) -> impl Iterator<Item = &LineItem> {
        self.groups.iter().chain(std::iter::once(&self.total_row))
    }
}

/// A phone-number-to-name mapping entry managed by the contact collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Canonical-format phone number
    pub phone_number: String,
    /// Name shown for this line on processed statements
    pub display_name: String,
}

impl Contact {
    /// Create a new contact entry
    pub fn new(phone_number: String, display_name: String) -> Self {
        Self {
            phone_number,
            display_name,
        }
    }
}

/// Errors that can occur while processing a statement
///
/// Each variant is a per-statement failure: a batch caller skips the
/// offending statement and keeps processing the rest.
#[derive(Debug, thiserror::Error)]
pub enum BillError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),
    #[error("Malformed row: {0}")]
    MalformedRow(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for bill-processing operations
pub type BillResult<T> = Result<T, BillError>;
