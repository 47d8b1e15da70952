//! Shared-cost allocation across the subscriber lines of one statement

use bigdecimal::BigDecimal;
use once_cell::sync::Lazy;
use std::str::FromStr;

use crate::types::*;

/// Reconciliation tolerance of one cent
static CENT: Lazy<BigDecimal> =
    Lazy::new(|| BigDecimal::from_str("0.01").expect("Failed to parse CENT"));

/// Result of applying the allocation policy to one statement's lines
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Allocated lines sorted by display name
    pub lines: Vec<LineItem>,
    /// Synthesized total row carrying the vendor-reported figures
    pub total_row: LineItem,
    /// Comparison of the allocated totals against the reported grand total
    pub reconciliation: Reconciliation,
}

/// Apply the cost-splitting policy and reconcile against the vendor totals.
///
/// Service cost is always divided equally across the lines. Plan cost is
/// divided equally only when `split_plan_cost_equally` is set; otherwise
/// each line keeps its billed amount. Every line's `total_amount` is
/// recomputed as the exact sum of its four cost fields.
///
/// The appended total row repeats the vendor-reported totals rather than
/// the allocated sum, so the two can be reconciled: a discrepancy of one
/// cent or more flags the result and logs a warning, but the allocation is
/// still returned and usable.
pub fn allocate(
    mut lines: Vec<LineItem>,
    totals: &StatementTotals,
    split_plan_cost_equally: bool,
) -> Allocation {
    if !lines.is_empty() {
        let line_count = BigDecimal::from(lines.len() as u64);
        let service_share = &totals.service_cost / &line_count;
        let plan_share = &totals.plan_cost / &line_count;

        for line in &mut lines {
            line.service_cost = service_share.clone();
            if split_plan_cost_equally {
                line.plan_cost = plan_share.clone();
            }
            line.recompute_total();
        }
    }

    // display-name order, phone number as tie-break for deterministic output
    lines.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.phone_number.cmp(&b.phone_number))
    });

    let computed_total: BigDecimal = lines.iter().map(|line| &line.total_amount).sum();
    let reconciliation = Reconciliation::compare(computed_total, totals.grand_total.clone(), &CENT);

    if !reconciliation.is_reconciled {
        tracing::warn!(
            computed = %reconciliation.computed_total,
            reported = %reconciliation.reported_total,
            "allocated line totals do not reconcile with the reported grand total"
        );
    }

    Allocation {
        lines,
        total_row: total_row(totals),
        reconciliation,
    }
}

fn total_row(totals: &StatementTotals) -> LineItem {
    LineItem {
        phone_number: String::new(),
        plan_type: String::new(),
        plan_cost: totals.plan_cost.clone(),
        equipment_cost: totals.equipment_cost.clone(),
        service_cost: totals.service_cost.clone(),
        one_time_charges: totals.one_time_charges.clone(),
        total_amount: totals.grand_total.clone(),
        display_name: TOTAL_ROW_NAME.to_string(),
    }
}
