//! Top-N subgraph selection by total incident transaction value.

use crate::core::entity::Entity;
use crate::graph::flow_graph::FlowGraph;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A node together with its total incident transaction value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedNode {
    pub entity: Entity,
    pub value: Decimal,
}

/// The outcome of a top-N selection.
#[derive(Debug, Clone)]
pub struct TopSelection {
    /// The selected nodes, highest value first.
    pub ranked: Vec<RankedNode>,
    /// Induced subgraph on exactly the selected nodes.
    pub subgraph: FlowGraph,
    /// Greatest selected value, floored at 1 so it can serve as a scale
    /// denominator even for an empty or all-zero graph.
    pub max_value: Decimal,
}

/// Rank every node by total incident transaction value, descending.
///
/// Ties break ascending by entity ordering (name, then bank code), so the
/// ranking is deterministic regardless of map iteration order.
pub fn rank_by_value(graph: &FlowGraph) -> Vec<RankedNode> {
    let mut ranked: Vec<RankedNode> = graph
        .node_values()
        .into_iter()
        .map(|(entity, value)| RankedNode { entity, value })
        .collect();
    ranked.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.entity.cmp(&b.entity)));
    ranked
}

/// The induced subgraph over the `n` highest-valued nodes.
///
/// `n` larger than the node count is clamped; the subgraph contains only
/// edges whose both endpoints were selected.
pub fn top_subgraph(graph: &FlowGraph, n: usize) -> TopSelection {
    let mut ranked = rank_by_value(graph);
    ranked.truncate(n.min(ranked.len()));

    let keep: HashSet<Entity> = ranked.iter().map(|r| r.entity.clone()).collect();
    let subgraph = graph.induced(&keep);

    let max_value = ranked
        .first()
        .map(|r| r.value)
        .filter(|v| *v > Decimal::ZERO)
        .unwrap_or(Decimal::ONE);

    TopSelection {
        ranked,
        subgraph,
        max_value,
    }
}
