//! Canonical edge-direction normalization.
//!
//! The export records every row from the debitor's point of view: an
//! `INCOMING` row means the counterpart sent money to the debitor, an
//! `OUTGOING` row means the debitor sent money to the counterpart. The
//! flow graph wants a single `(source, target)` convention — source pays
//! target — which this module derives.

use crate::core::transaction::{Direction, Transaction, TransactionSet};
use crate::graph::flow_graph::{EdgeAttrs, FlowEdge, FlowGraph};

/// Map a transaction record into its canonical directed edge.
///
/// - `Incoming`: source = counterpart, target = debitor.
/// - `Outgoing`: source = debitor, target = counterpart.
///
/// Pure and deterministic. Rows with an unrecognized raw `type` never
/// reach this function; the typed loader rejects them.
pub fn direction_edge(tx: &Transaction) -> FlowEdge {
    let (source, target) = match tx.direction() {
        Direction::Incoming => (tx.counterpart().clone(), tx.debitor().clone()),
        Direction::Outgoing => (tx.debitor().clone(), tx.counterpart().clone()),
    };
    FlowEdge {
        source,
        target,
        attrs: EdgeAttrs {
            amount_idr: tx.amount_idr(),
            count: tx.count(),
            direction: tx.direction(),
        },
    }
}

/// Build the flow graph for a transaction set.
pub fn graph_from_transactions(set: &TransactionSet) -> FlowGraph {
    FlowGraph::from_edges(set.iter().map(direction_edge))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{BankCode, Entity};
    use rust_decimal_macros::dec;

    fn entity(name: &str, bank: &str) -> Entity {
        Entity::new(name, BankCode::new(bank))
    }

    #[test]
    fn test_incoming_points_at_debitor() {
        let tx = Transaction::new(
            Direction::Incoming,
            entity("A", "BankX"),
            entity("B", "BankY"),
            dec!(100),
            1,
        );
        let edge = direction_edge(&tx);
        assert_eq!(edge.source, entity("B", "BankY"));
        assert_eq!(edge.target, entity("A", "BankX"));
        assert_eq!(edge.attrs.amount_idr, dec!(100));
    }

    #[test]
    fn test_outgoing_points_at_counterpart() {
        let tx = Transaction::new(
            Direction::Outgoing,
            entity("A", "BankX"),
            entity("C", "BankZ"),
            dec!(50),
            2,
        );
        let edge = direction_edge(&tx);
        assert_eq!(edge.source, entity("A", "BankX"));
        assert_eq!(edge.target, entity("C", "BankZ"));
        assert_eq!(edge.attrs.count, 2);
    }

    #[test]
    fn test_graph_from_transactions() {
        let (set, _) = TransactionSet::from_rows(vec![
            Transaction::new(
                Direction::Incoming,
                entity("A", "BankX"),
                entity("B", "BankY"),
                dec!(100),
                1,
            ),
            Transaction::new(
                Direction::Outgoing,
                entity("A", "BankX"),
                entity("C", "BankZ"),
                dec!(50),
                1,
            ),
        ]);
        let graph = graph_from_transactions(&set);
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        let values = graph.node_values();
        assert_eq!(values[&entity("A", "BankX")], dec!(150));
    }
}
