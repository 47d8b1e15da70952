//! Statement parsing pipeline: section slicing, row tokenization, field
//! normalization, and orchestration into allocated summaries

pub mod normalize;
pub mod section;
pub mod table;

pub use normalize::*;
pub use section::*;
pub use table::*;

use chrono::NaiveDate;

use crate::allocation;
use crate::traits::ContactDirectory;
use crate::types::*;

// The boundary markers are part of the contract with the vendor's
// statement format and are versioned alongside the table layouts.

/// Start of the bill-summary section (exclusive)
pub const SUMMARY_START_MARKER: &str = "THIS BILL SUMMARY";

/// End of the bill-summary section (exclusive)
pub const SUMMARY_END_MARKER: &str = "DETAILED CHARGES";

/// Page header preceding the printed issue date
pub const PAGE_HEADER_MARKER: &str = "Bill issue date Account Page";

/// Print format of the issue date, e.g. `Apr 15, 2024`
const ISSUE_DATE_FORMAT: &str = "%b %d, %Y";

/// Process the raw page text of one statement into an allocated summary.
///
/// The pipeline slices the bill-summary section, tokenizes it against the
/// detected layout, normalizes amounts and phone numbers, resolves display
/// names through the read-only `contacts` directory, and applies the
/// allocation policy. Any failure is per-statement: callers processing a
/// batch skip the failed statement and keep going.
pub fn process_statement<D>(
    text: &str,
    contacts: &D,
    split_plan_cost_equally: bool,
) -> BillResult<StatementSummary>
where
    D: ContactDirectory + ?Sized,
{
    let section = section::slice_section(text, SUMMARY_START_MARKER, SUMMARY_END_MARKER)?;
    let issue_date = section::extract_issue_date(text, PAGE_HEADER_MARKER, SUMMARY_START_MARKER)?;
    let issued_on = NaiveDate::parse_from_str(&issue_date, ISSUE_DATE_FORMAT).ok();

    let summary_table = table::tokenize(&section)?;
    let totals = normalize_totals(&summary_table.totals)?;
    let lines = normalize_rows(&summary_table.rows, contacts)?;

    tracing::debug!(
        lines = lines.len(),
        issue_date = %issue_date,
        "parsed bill summary table"
    );

    let allocation = allocation::allocate(lines, &totals, split_plan_cost_equally);

    Ok(StatementSummary {
        issue_date,
        issued_on,
        lines: allocation.lines,
        total_row: allocation.total_row,
        totals,
        reconciliation: allocation.reconciliation,
    })
}

/// Process a batch of statements, isolating failures per statement.
///
/// The result preserves input order; a failed statement yields its error
/// in place while the remaining statements still produce summaries.
pub fn process_statements<'a, D, I>(
    texts: I,
    contacts: &D,
    split_plan_cost_equally: bool,
) -> Vec<BillResult<StatementSummary>>
where
    D: ContactDirectory + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    texts
        .into_iter()
        .map(|text| {
            process_statement(text, contacts, split_plan_cost_equally).map_err(|err| {
                tracing::warn!(error = %err, "skipping statement that failed to process");
                err
            })
        })
        .collect()
}

fn normalize_rows<D>(rows: &[LineItemRow], contacts: &D) -> BillResult<Vec<LineItem>>
where
    D: ContactDirectory + ?Sized,
{
    rows.iter()
        .map(|row| {
            let phone_number = normalize::normalize_phone_number(&row.phone_number)?;
            let display_name = contacts
                .display_name(&phone_number)
                .unwrap_or_else(|| UNKNOWN_CONTACT.to_string());

            Ok(LineItem::new(
                phone_number,
                row.plan_type.clone(),
                normalize::parse_amount(&row.plan_cost)?,
                normalize::parse_amount(&row.equipment_cost)?,
                normalize::parse_amount(&row.service_cost)?,
                normalize::parse_amount(&row.one_time_charges)?,
                display_name,
            ))
        })
        .collect()
}

fn normalize_totals(totals: &TotalsRow) -> BillResult<StatementTotals> {
    Ok(StatementTotals {
        plan_cost: normalize::parse_amount(&totals.plan_cost)?,
        equipment_cost: normalize::parse_amount(&totals.equipment_cost)?,
        service_cost: normalize::parse_amount(&totals.service_cost)?,
        one_time_charges: normalize::parse_amount(&totals.one_time_charges)?,
        grand_total: normalize::parse_amount(&totals.grand_total)?,
    })
}
