//! Top-N selection over a small hand-built money-flow network.
//!
//! Demonstrates direction normalization and the value ranking that
//! drives the interactive network page.

use rust_decimal_macros::dec;
use txflow::prelude::*;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  txflow: Top-N Subgraph Example          ║");
    println!("╚══════════════════════════════════════════╝\n");

    let home = BankCode::new("B1");
    let andi = Entity::new("Andi", home.clone());
    let budi = Entity::new("Budi", home.clone());
    let supplier = Entity::new("PT Sumber", BankCode::new("B2"));
    let vendor = Entity::new("CV Karya", BankCode::new("B3"));

    let mut set = TransactionSet::new();
    set.add(Transaction::new(
        Direction::Incoming,
        andi.clone(),
        supplier.clone(),
        dec!(2_000_000_000),
        4,
    ));
    set.add(Transaction::new(
        Direction::Outgoing,
        andi.clone(),
        vendor.clone(),
        dec!(1_500_000_000),
        2,
    ));
    set.add(Transaction::new(
        Direction::Incoming,
        budi.clone(),
        supplier.clone(),
        dec!(500_000_000),
        1,
    ));

    // Normalize: edges point toward the receiving side
    let graph = graph_from_transactions(&set);
    println!("━━━ Full Graph ━━━\n");
    println!("Nodes: {}", graph.node_count());
    println!("Edges: {}", graph.edge_count());
    for (source, target, attrs) in graph.edges() {
        println!(
            "  {} → {}  {} IDR over {} transfers",
            source, target, attrs.amount_idr, attrs.count
        );
    }
    println!();

    // Keep the three highest-value nodes
    println!("━━━ Top 3 by Incident Value ━━━\n");
    let selection = top_subgraph(&graph, 3);
    for ranked in &selection.ranked {
        let status = if ranked.entity.is_customer_of(&home) {
            "CUSTOMER"
        } else {
            "EXTERNAL"
        };
        println!(
            "  {:<20} {:>15} IDR  [{}]",
            ranked.entity.label(),
            ranked.value,
            status
        );
    }
    println!();
    println!(
        "Subgraph: {} nodes, {} edges (scale max {})",
        selection.subgraph.node_count(),
        selection.subgraph.edge_count(),
        selection.max_value
    );
}
