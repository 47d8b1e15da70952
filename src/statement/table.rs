//! Tokenization of the bill-summary section into a record-oriented table

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{BillError, BillResult};

/// Label of the vendor-reported totals row
pub const TOTALS_ROW_LABEL: &str = "Totals";

/// Placeholder substituted for charge columns a row or revision never prints
const ABSENT_COLUMN_PLACEHOLDER: &str = "-";

static AREA_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d{3}\)$").expect("Failed to compile AREA_CODE_RE"));

/// Canonical columns a subscriber row carries after the two phone tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    PlanType,
    PlanCost,
    EquipmentCost,
    ServiceCost,
    OneTimeCharges,
    LineTotal,
}

/// Known header signatures, each paired with the canonical column the data
/// under every label actually holds.
///
/// The printed labels sit one position to the left of their data: the
/// `Line` label spans the two phone-number tokens, so `Plans` heads the
/// plan-type column, `Equipment` the plan cost, and so on. The mapping is
/// spelled out per revision rather than inferred from label positions.
const LAYOUTS: &[(&[&str], &[Column])] = &[
    // Revision whose `One-time charges` label splits into two tokens
    (
        &[
            "Line",
            "Type",
            "Plans",
            "Equipment",
            "Services",
            "One-time",
            "charges",
            "Total",
        ],
        &[
            Column::PlanType,
            Column::PlanCost,
            Column::EquipmentCost,
            Column::ServiceCost,
            Column::OneTimeCharges,
            Column::LineTotal,
        ],
    ),
    // Earlier revision without a one-time charges column; the drift puts
    // the service amounts under the printed `Total` label
    (
        &["Line", "Type", "Plans", "Equipment", "Services", "Total"],
        &[
            Column::PlanType,
            Column::PlanCost,
            Column::EquipmentCost,
            Column::ServiceCost,
        ],
    ),
];

/// Column schema of one statement-format revision, selected from the
/// header row of the summary table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    columns: &'static [Column],
}

impl TableLayout {
    /// Match the header row against the known signatures.
    ///
    /// An unknown header means the statement format is unrecognized, the
    /// same condition a missing boundary marker signals.
    pub fn detect(header_line: &str) -> BillResult<Self> {
        let labels: Vec<&str> = header_line.split_whitespace().collect();

        LAYOUTS
            .iter()
            .find(|(header, _)| *header == labels.as_slice())
            .map(|&(_, columns)| Self { columns })
            .ok_or_else(|| {
                BillError::SectionNotFound(format!(
                    "no summary-table layout matches header \"{}\"",
                    header_line.trim()
                ))
            })
    }

    /// Whether this revision prints a one-time-charges column
    pub fn has_one_time_charges(&self) -> bool {
        self.index_of(Column::OneTimeCharges).is_some()
    }

    fn index_of(&self, column: Column) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }
}

/// Raw positional tokens of one subscriber row, rectangularized to the
/// canonical column set
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    /// The two merged phone tokens, e.g. `(940) 218-8816`
    pub phone_number: String,
    pub plan_type: String,
    pub plan_cost: String,
    pub equipment_cost: String,
    pub service_cost: String,
    pub one_time_charges: String,
}

/// Raw amounts of the vendor's `Totals` row, rectangularized the same way
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRow {
    pub plan_cost: String,
    pub equipment_cost: String,
    pub service_cost: String,
    pub one_time_charges: String,
    pub grand_total: String,
}

/// Record-oriented view of the bill-summary section
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryTable {
    pub layout: TableLayout,
    /// Subscriber rows in statement order
    pub rows: Vec<LineItemRow>,
    /// The vendor-reported totals row
    pub totals: TotalsRow,
}

/// Tokenize a sliced bill-summary section.
///
/// The first non-empty line is the header and selects the layout. Rows
/// whose first two tokens form a 10-digit phone number become subscriber
/// rows; the `Totals` row is captured for reconciliation; any other
/// metadata row is dropped.
pub fn tokenize(section: &[String]) -> BillResult<SummaryTable> {
    let mut lines = section
        .iter()
        .map(String::as_str)
        .filter(|line| !line.trim().is_empty());

    let header = lines
        .next()
        .ok_or_else(|| BillError::SectionNotFound("bill summary table is empty".to_string()))?;
    let layout = TableLayout::detect(header)?;

    let mut rows = Vec::new();
    let mut totals = None;

    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if is_subscriber_row(&tokens) {
            rows.push(parse_subscriber_row(&tokens, &layout)?);
        } else if tokens.first() == Some(&TOTALS_ROW_LABEL) {
            totals = Some(parse_totals_row(&tokens)?);
        }
    }

    let totals = totals.ok_or_else(|| {
        BillError::MalformedRow(format!(
            "no \"{}\" row in the bill summary table",
            TOTALS_ROW_LABEL
        ))
    })?;

    Ok(SummaryTable {
        layout,
        rows,
        totals,
    })
}

/// A row is a subscriber row iff its first token is a parenthesized area
/// code and its second token supplies the remaining seven digits of a
/// 10-digit phone number.
fn is_subscriber_row(tokens: &[&str]) -> bool {
    match tokens {
        [area, local, ..] => AREA_CODE_RE.is_match(area) && digit_count(local) == 7,
        _ => false,
    }
}

fn digit_count(token: &str) -> usize {
    token.chars().filter(|c| c.is_ascii_digit()).count()
}

fn parse_subscriber_row(tokens: &[&str], layout: &TableLayout) -> BillResult<LineItemRow> {
    let field = |column: Column| -> Option<&str> {
        // data tokens start after the two phone tokens
        layout
            .index_of(column)
            .and_then(|index| tokens.get(index + 2))
            .copied()
    };

    let required = |column: Column| -> BillResult<String> {
        field(column).map(str::to_string).ok_or_else(|| {
            BillError::MalformedRow(format!(
                "subscriber row has {} fields, fewer than the schema requires: \"{}\"",
                tokens.len(),
                tokens.join(" ")
            ))
        })
    };

    // A missing one-time column reads as the dash placeholder so every row
    // stays rectangular; the printed per-line total is recomputed
    // downstream and never read here.
    let one_time_charges = field(Column::OneTimeCharges)
        .unwrap_or(ABSENT_COLUMN_PLACEHOLDER)
        .to_string();

    Ok(LineItemRow {
        phone_number: format!("{} {}", tokens[0], tokens[1]),
        plan_type: required(Column::PlanType)?,
        plan_cost: required(Column::PlanCost)?,
        equipment_cost: required(Column::EquipmentCost)?,
        service_cost: required(Column::ServiceCost)?,
        one_time_charges,
    })
}

/// The totals row prints every cost category regardless of revision: the
/// first amount is the pooled plan total, the last is the grand total, and
/// the middle amounts fill equipment, service, and one-time in order.
fn parse_totals_row(tokens: &[&str]) -> BillResult<TotalsRow> {
    let amounts = &tokens[1..];
    if amounts.len() < 2 {
        return Err(BillError::MalformedRow(format!(
            "totals row needs a plan total and a grand total: \"{}\"",
            tokens.join(" ")
        )));
    }

    let mut middle = amounts[1..amounts.len() - 1].iter().copied();

    Ok(TotalsRow {
        plan_cost: amounts[0].to_string(),
        equipment_cost: middle
            .next()
            .unwrap_or(ABSENT_COLUMN_PLACEHOLDER)
            .to_string(),
        service_cost: middle
            .next()
            .unwrap_or(ABSENT_COLUMN_PLACEHOLDER)
            .to_string(),
        one_time_charges: middle
            .next()
            .unwrap_or(ABSENT_COLUMN_PLACEHOLDER)
            .to_string(),
        grand_total: amounts[amounts.len() - 1].to_string(),
    })
}
