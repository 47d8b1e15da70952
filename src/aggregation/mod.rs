//! Multi-period aggregation of allocated line items

use std::collections::HashMap;

use crate::types::*;

/// Merge allocated lines from multiple billing periods into running totals.
///
/// Rows group by `(display_name, phone_number, plan_type)`; the four cost
/// fields and `total_amount` are summed across periods. Grouping is
/// commutative, so the order statements were processed in does not matter;
/// groups are returned sorted by key so repeated runs produce identical
/// output. A grand-total row summing every group is appended last and is
/// authoritative, with no external figure to reconcile against.
///
/// The display name is part of the key on purpose: a line whose contact
/// name changed between periods aggregates as two groups, and editing the
/// contact directory never rewrites historical records.
pub fn aggregate_periods<I>(records: I) -> AggregatedBill
where
    I: IntoIterator<Item = PeriodRecord>,
{
    let mut merged: HashMap<(String, String, String), LineItem> = HashMap::new();

    for record in records {
        let line = record.line;
        let key = (
            line.display_name.clone(),
            line.phone_number.clone(),
            line.plan_type.clone(),
        );

        match merged.get_mut(&key) {
            Some(group) => {
                group.plan_cost += &line.plan_cost;
                group.equipment_cost += &line.equipment_cost;
                group.service_cost += &line.service_cost;
                group.one_time_charges += &line.one_time_charges;
                group.total_amount += &line.total_amount;
            }
            None => {
                merged.insert(key, line);
            }
        }
    }

    let mut groups: Vec<LineItem> = merged.into_values().collect();
    groups.sort_by(|a, b| {
        (&a.display_name, &a.phone_number, &a.plan_type)
            .cmp(&(&b.display_name, &b.phone_number, &b.plan_type))
    });

    let total_row = grand_total_row(&groups);

    AggregatedBill { groups, total_row }
}

/// Aggregate the subscriber lines of already-processed statements.
///
/// Total rows are excluded; only per-subscriber lines feed the aggregate.
pub fn aggregate_statements(summaries: &[StatementSummary]) -> AggregatedBill {
    aggregate_periods(
        summaries
            .iter()
            .flat_map(|summary| summary.period_records()),
    )
}

fn grand_total_row(groups: &[LineItem]) -> LineItem {
    LineItem {
        phone_number: String::new(),
        plan_type: String::new(),
        plan_cost: groups.iter().map(|group| &group.plan_cost).sum(),
        equipment_cost: groups.iter().map(|group| &group.equipment_cost).sum(),
        service_cost: groups.iter().map(|group| &group.service_cost).sum(),
        one_time_charges: groups.iter().map(|group| &group.one_time_charges).sum(),
        total_amount: groups.iter().map(|group| &group.total_amount).sum(),
        display_name: TOTAL_ROW_NAME.to_string(),
    }
}
