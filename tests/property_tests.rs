use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashSet;
use txflow::analytics::summary::by_direction;
use txflow::core::entity::{BankCode, Entity};
use txflow::core::transaction::{Direction, Transaction, TransactionSet};
use txflow::graph::normalize::{direction_edge, graph_from_transactions};
use txflow::graph::selection::{rank_by_value, top_subgraph};
use txflow::view::filter::FilterState;
use txflow::view::network::NetworkView;

/// Generate a random entity from a small pool (to increase edge reuse).
fn arb_entity() -> impl Strategy<Value = Entity> {
    let names = prop::sample::select(vec!["Alpha", "Beta", "Gamma", "Delta", "Epsilon", "Zeta"]);
    let banks = prop::sample::select(vec!["B1", "B2", "B3"]);
    (names, banks).prop_map(|(name, bank)| Entity::new(name, BankCode::new(bank)))
}

fn arb_direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(vec![Direction::Incoming, Direction::Outgoing])
}

/// Generate a random non-negative amount (0 to 10,000,000).
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0u64..10_000_000u64).prop_map(Decimal::from)
}

/// Generate a random transfer (ensuring debitor != counterpart).
fn arb_transaction() -> impl Strategy<Value = Transaction> {
    (
        arb_direction(),
        arb_entity(),
        arb_entity(),
        arb_amount(),
        1u64..100u64,
    )
        .prop_filter_map(
            "debitor must differ from counterpart",
            |(direction, debitor, counterpart, amount, count)| {
                if debitor == counterpart {
                    None
                } else {
                    Some(Transaction::new(direction, debitor, counterpart, amount, count))
                }
            },
        )
}

/// Generate a random transaction set of 1..50 rows (duplicates collapsed).
fn arb_transaction_set() -> impl Strategy<Value = TransactionSet> {
    prop::collection::vec(arb_transaction(), 1..50)
        .prop_map(|rows| TransactionSet::from_rows(rows).0)
}

proptest! {
    // ===================================================================
    // INVARIANT 1: Direction normalization is total and exhaustive.
    //
    // Every transaction maps to exactly one directed edge, and the money
    // always flows toward the receiving side: INCOMING means counterpart
    // to debitor, OUTGOING means debitor to counterpart.
    // ===================================================================
    #[test]
    fn normalization_points_at_receiver(tx in arb_transaction()) {
        let edge = direction_edge(&tx);
        match tx.direction() {
            Direction::Incoming => {
                prop_assert_eq!(&edge.source, tx.counterpart());
                prop_assert_eq!(&edge.target, tx.debitor());
            }
            Direction::Outgoing => {
                prop_assert_eq!(&edge.source, tx.debitor());
                prop_assert_eq!(&edge.target, tx.counterpart());
            }
        }
        prop_assert_eq!(edge.attrs.amount_idr, tx.amount_idr());
        prop_assert_eq!(edge.attrs.count, tx.count());
    }

    // ===================================================================
    // INVARIANT 2: Top-N selection keeps exactly min(N, node count).
    // ===================================================================
    #[test]
    fn selection_size_is_clamped(set in arb_transaction_set(), n in 0usize..10) {
        let graph = graph_from_transactions(&set);
        let selection = top_subgraph(&graph, n);
        prop_assert_eq!(
            selection.ranked.len(),
            n.min(graph.node_count()),
            "Selection must keep min(N, node count) nodes"
        );
        prop_assert_eq!(selection.subgraph.node_count(), selection.ranked.len());
    }

    // ===================================================================
    // INVARIANT 3: No excluded node outranks an included one.
    //
    // Every node left out of the top-N selection must have a total
    // incident value no greater than the smallest selected value.
    // ===================================================================
    #[test]
    fn no_outside_node_outranks_selection(set in arb_transaction_set(), n in 1usize..6) {
        let graph = graph_from_transactions(&set);
        let selection = top_subgraph(&graph, n);
        let Some(floor) = selection.ranked.last().map(|r| r.value) else {
            return Ok(());
        };
        let kept: HashSet<_> = selection.ranked.iter().map(|r| r.entity.clone()).collect();
        for (entity, value) in graph.node_values() {
            if !kept.contains(&entity) {
                prop_assert!(
                    value <= floor,
                    "Excluded node {} with value {} outranks selection floor {}",
                    entity.label(),
                    value,
                    floor
                );
            }
        }
    }

    // ===================================================================
    // INVARIANT 4: Induced subgraph edges stay inside the selection.
    //
    // Every edge of the top-N subgraph must exist in the full graph with
    // identical attributes, and both endpoints must be selected nodes.
    // ===================================================================
    #[test]
    fn induced_edges_are_contained(set in arb_transaction_set(), n in 1usize..8) {
        let graph = graph_from_transactions(&set);
        let selection = top_subgraph(&graph, n);
        let kept: HashSet<_> = selection.ranked.iter().map(|r| r.entity.clone()).collect();
        let full: Vec<_> = graph.edges().collect();
        for (source, target, attrs) in selection.subgraph.edges() {
            prop_assert!(kept.contains(source));
            prop_assert!(kept.contains(target));
            prop_assert!(
                full.iter().any(|(s, t, a)| *s == source && *t == target && *a == attrs),
                "Subgraph edge {} -> {} must exist in the full graph",
                source.label(),
                target.label()
            );
        }
    }

    // ===================================================================
    // INVARIANT 5: Direction breakdown conserves totals.
    //
    // Summing the per-direction totals must reproduce the grand totals,
    // which in turn equal the sums over the raw set.
    // ===================================================================
    #[test]
    fn breakdown_conserves_totals(set in arb_transaction_set()) {
        let breakdown = by_direction(&set);
        let entry_count: usize = breakdown.entries().iter().map(|e| e.count).sum();
        let entry_total: Decimal = breakdown.entries().iter().map(|e| e.total_idr).sum();
        prop_assert_eq!(entry_count, breakdown.grand_count());
        prop_assert_eq!(entry_total, breakdown.grand_total_idr());
        prop_assert_eq!(breakdown.grand_count(), set.len());
        prop_assert_eq!(breakdown.grand_total_idr(), set.total_amount());
    }

    // ===================================================================
    // INVARIANT 6: Ranking and selection are deterministic.
    //
    // Same input, same output. Ties are broken by the entity ordering,
    // never by hash iteration order.
    // ===================================================================
    #[test]
    fn selection_is_deterministic(set in arb_transaction_set(), n in 1usize..8) {
        let graph = graph_from_transactions(&set);
        prop_assert_eq!(rank_by_value(&graph), rank_by_value(&graph));
        let first = top_subgraph(&graph, n);
        let second = top_subgraph(&graph, n);
        prop_assert_eq!(first.ranked, second.ranked);
        prop_assert_eq!(first.max_value, second.max_value);
    }

    // ===================================================================
    // INVARIANT 7: Ranked values are non-increasing.
    // ===================================================================
    #[test]
    fn ranking_is_sorted(set in arb_transaction_set()) {
        let graph = graph_from_transactions(&set);
        let ranked = rank_by_value(&graph);
        for pair in ranked.windows(2) {
            prop_assert!(
                pair[0].value >= pair[1].value,
                "Ranking must be non-increasing: {} before {}",
                pair[0].value,
                pair[1].value
            );
        }
    }

    // ===================================================================
    // INVARIANT 8: Network node sizes stay in the documented range.
    //
    // Sizes scale from the base upward by relative degree, so every node
    // lands in [15, 115] regardless of the filter applied.
    // ===================================================================
    #[test]
    fn node_sizes_in_range(set in arb_transaction_set(), n in 1usize..10) {
        let home = BankCode::new("B1");
        let mut filter = FilterState::for_set(&set);
        filter.top_n = n;
        let view = NetworkView::build(&set, &filter, &home);
        for node in &view.nodes {
            prop_assert!(
                (15.0..=115.0).contains(&node.size),
                "Node size {} out of range for {}",
                node.size,
                node.entity.label()
            );
        }
    }
}
