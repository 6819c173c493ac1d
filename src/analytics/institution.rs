//! Institution-level aggregates over the precomputed network tables.

use crate::core::entity::{BankCode, Entity};
use crate::core::transaction::Direction;
use crate::data::tables::{EdgeRecord, NodeRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

fn label_is_customer(label: &str, home: &BankCode) -> bool {
    Entity::parse_label(label).is_some_and(|e| e.is_customer_of(home))
}

/// Headline figures for the institution's view of the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkOverview {
    /// Nodes whose label carries the institution's own bank code.
    pub customer_nodes: usize,
    /// All other nodes.
    pub external_nodes: usize,
    /// Edge rows in the precomputed table.
    pub connections: usize,
    /// INCOMING edges whose target is a customer.
    pub incoming_idr: Decimal,
    /// OUTGOING edges whose source is a customer.
    pub outgoing_idr: Decimal,
}

impl NetworkOverview {
    pub fn from_tables(nodes: &[NodeRecord], edges: &[EdgeRecord], home: &BankCode) -> Self {
        let customer_nodes = nodes
            .iter()
            .filter(|n| label_is_customer(&n.entity, home))
            .count();
        let external_nodes = nodes.len() - customer_nodes;

        let mut incoming_idr = Decimal::ZERO;
        let mut outgoing_idr = Decimal::ZERO;
        for edge in edges {
            match edge.direction {
                Direction::Incoming if label_is_customer(&edge.target, home) => {
                    incoming_idr += edge.amount_tx_idr;
                }
                Direction::Outgoing if label_is_customer(&edge.source, home) => {
                    outgoing_idr += edge.amount_tx_idr;
                }
                _ => {}
            }
        }

        Self {
            customer_nodes,
            external_nodes,
            connections: edges.len(),
            incoming_idr,
            outgoing_idr,
        }
    }

    /// Money into plus money out of the institution.
    pub fn total_volume(&self) -> Decimal {
        self.incoming_idr + self.outgoing_idr
    }
}

impl fmt::Display for NetworkOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Network Overview ===")?;
        writeln!(f, "Customer nodes:    {}", self.customer_nodes)?;
        writeln!(f, "External entities: {}", self.external_nodes)?;
        writeln!(f, "Connections:       {}", self.connections)?;
        writeln!(f, "Incoming (IDR):    {}", self.incoming_idr)?;
        writeln!(f, "Outgoing (IDR):    {}", self.outgoing_idr)?;
        writeln!(f, "Total volume:      {}", self.total_volume())
    }
}
