//! Summary report over a generated transaction export.
//!
//! Demonstrates the dashboard's analytics pass: direction breakdown,
//! top transfers and headline totals, without the precomputed tables.

use txflow::analytics::summary::{by_direction, top_transactions};
use txflow::core::entity::BankCode;
use txflow::sample::{generate_sample, SampleConfig};
use txflow::view::dashboard::format_trillions;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  txflow: Overview Report Example         ║");
    println!("╚══════════════════════════════════════════╝\n");

    let config = SampleConfig {
        home: BankCode::new("B1"),
        customers: 10,
        externals: 30,
        rows: 120,
        ..Default::default()
    };
    let set = generate_sample(&config);

    println!("━━━ Export ━━━\n");
    println!("Transactions:  {}", set.len());
    println!("Total volume:  {}", format_trillions(set.total_amount()));
    if let Some((min, max)) = set.amount_bounds() {
        println!("Amount range:  {} to {} IDR", min, max);
    }
    println!();

    // Direction breakdown, the dashboard's pie chart
    println!("━━━ By Direction ━━━\n");
    let breakdown = by_direction(&set);
    for entry in breakdown.entries() {
        println!(
            "  {:<10} {:>5} transfers  {:>25} IDR",
            entry.direction, entry.count, entry.total_idr
        );
    }
    println!(
        "  {:<10} {:>5} transfers  {:>25} IDR\n",
        "TOTAL",
        breakdown.grand_count(),
        breakdown.grand_total_idr()
    );

    // Largest transfers, the dashboard's bar chart
    println!("━━━ Top 5 Transfers ━━━\n");
    for tx in top_transactions(&set, 5) {
        println!(
            "  {} → {}  {:>25} IDR",
            tx.debitor().label(),
            tx.counterpart().label(),
            tx.amount_idr()
        );
    }
}
