//! Basic bill-splitting walkthrough

use billsplit_core::utils::MemoryContactStore;
use billsplit_core::{aggregate_statements, process_statement, Contact, ContactStore};

const APRIL_STATEMENT: &str = "\
T-Mobile statement page\n\
Bill issue date Account Page\n\
Apr 15, 2024 987654321 2 of 8\n\
THIS BILL SUMMARY\n\
Line Type Plans Equipment Services One-time charges Total\n\
(940) 218-8816 Voice $40.00 $10.00 $5.00 - $55.00\n\
(817) 555-0123 Voice $30.00 - Included - $30.00\n\
Totals $70.00 $10.00 $5.00 $0.00 $85.00\n\
DETAILED CHARGES\n";

const MAY_STATEMENT: &str = "\
T-Mobile statement page\n\
Bill issue date Account Page\n\
May 15, 2024 987654321 2 of 8\n\
THIS BILL SUMMARY\n\
Line Type Plans Equipment Services One-time charges Total\n\
(940) 218-8816 Voice $40.00 $10.00 $5.00 $12.99 $67.99\n\
(817) 555-0123 Voice $30.00 - Included - $30.00\n\
Totals $70.00 $10.00 $5.00 $12.99 $97.99\n\
DETAILED CHARGES\n";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📱 Billsplit Core - Bill Splitting Example\n");

    // 1. Register the people sharing the plan
    println!("👥 Saving contacts...");
    let mut store = MemoryContactStore::new();
    store
        .save_contact(&Contact::new(
            "940.218.8816".to_string(),
            "Alice".to_string(),
        ))
        .await?;
    store
        .save_contact(&Contact::new(
            "(817) 555-0123".to_string(),
            "Bob".to_string(),
        ))
        .await?;
    println!("  ✓ Saved {} contacts\n", store.list_contacts().await?.len());

    // 2. Process each statement with the plan pool split equally
    println!("🧾 Processing statements...\n");
    let mut summaries = Vec::new();
    for text in [APRIL_STATEMENT, MAY_STATEMENT] {
        let summary = process_statement(text, &store, true)?;
        println!("  Statement issued {}", summary.issue_date);
        for row in summary.rows() {
            println!(
                "    {:<10} {:>16}  ${}",
                row.display_name,
                row.phone_number,
                row.total_amount.with_scale(2)
            );
        }
        if !summary.reconciliation.is_reconciled {
            println!(
                "    ⚠ discrepancy vs reported total: {}",
                summary.reconciliation.discrepancy
            );
        }
        println!();
        summaries.push(summary);
    }

    // 3. Running totals across both periods
    println!("📊 Two-month totals per person:");
    let aggregate = aggregate_statements(&summaries);
    for row in aggregate.rows() {
        println!(
            "  {:<10} ${}",
            row.display_name,
            row.total_amount.with_scale(2)
        );
    }

    Ok(())
}
