use crate::core::entity::Entity;
use crate::core::transaction::Direction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Attributes carried on a directed edge of the flow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeAttrs {
    /// Transaction value in IDR.
    pub amount_idr: Decimal,
    /// Number of underlying transfers.
    pub count: u64,
    /// Direction of the originating record.
    pub direction: Direction,
}

/// A canonical directed edge: money moves from `source` to `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: Entity,
    pub target: Entity,
    pub attrs: EdgeAttrs,
}

/// A directed graph of money flows between entities.
///
/// Nodes are entities, kept in first-insertion order. Edges are keyed by
/// the ordered `(source, target)` pair; inserting the same pair again
/// overwrites the previous attributes, so parallel edges collapse and the
/// last attribute set wins.
///
/// # Examples
///
/// ```
/// use txflow::core::entity::{BankCode, Entity};
/// use txflow::core::transaction::Direction;
/// use txflow::graph::flow_graph::{EdgeAttrs, FlowGraph};
/// use rust_decimal_macros::dec;
///
/// let mut graph = FlowGraph::new();
/// let a = Entity::new("A", BankCode::new("B1"));
/// let b = Entity::new("B", BankCode::new("B2"));
///
/// graph.add_edge(b.clone(), a.clone(), EdgeAttrs {
///     amount_idr: dec!(100),
///     count: 1,
///     direction: Direction::Incoming,
/// });
///
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    /// Nodes in first-insertion order.
    nodes: Vec<Entity>,
    node_index: HashMap<Entity, usize>,
    /// (source, target) -> attributes, last write wins.
    edges: HashMap<(Entity, Entity), EdgeAttrs>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, entity: &Entity) {
        if !self.node_index.contains_key(entity) {
            self.node_index.insert(entity.clone(), self.nodes.len());
            self.nodes.push(entity.clone());
        }
    }

    /// Insert a directed edge, registering both endpoints as nodes.
    /// Re-inserting an existing `(source, target)` pair replaces its
    /// attributes.
    pub fn add_edge(&mut self, source: Entity, target: Entity, attrs: EdgeAttrs) {
        self.intern(&source);
        self.intern(&target);
        self.edges.insert((source, target), attrs);
    }

    pub fn from_edges(edges: impl IntoIterator<Item = FlowEdge>) -> Self {
        let mut graph = Self::new();
        for edge in edges {
            graph.add_edge(edge.source, edge.target, edge.attrs);
        }
        graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in first-insertion order.
    pub fn nodes(&self) -> &[Entity] {
        &self.nodes
    }

    pub fn contains_node(&self, entity: &Entity) -> bool {
        self.node_index.contains_key(entity)
    }

    /// All edges as `(source, target, attrs)`.
    pub fn edges(&self) -> impl Iterator<Item = (&Entity, &Entity, &EdgeAttrs)> {
        self.edges.iter().map(|((s, t), a)| (s, t, a))
    }

    /// Edges arriving at `node`, as `(source, attrs)`.
    pub fn in_edges(&self, node: &Entity) -> Vec<(&Entity, &EdgeAttrs)> {
        self.edges
            .iter()
            .filter(|((_, t), _)| t == node)
            .map(|((s, _), a)| (s, a))
            .collect()
    }

    /// Edges leaving `node`, as `(target, attrs)`.
    pub fn out_edges(&self, node: &Entity) -> Vec<(&Entity, &EdgeAttrs)> {
        self.edges
            .iter()
            .filter(|((s, _), _)| s == node)
            .map(|((_, t), a)| (t, a))
            .collect()
    }

    /// Number of edges touching `node` (in + out; a self-loop counts twice).
    pub fn degree(&self, node: &Entity) -> usize {
        self.edges
            .keys()
            .map(|(s, t)| usize::from(s == node) + usize::from(t == node))
            .sum()
    }

    /// The largest degree in the graph, or 0 when empty.
    pub fn max_degree(&self) -> usize {
        self.nodes.iter().map(|n| self.degree(n)).max().unwrap_or(0)
    }

    /// Total incident transaction value per node: the sum of `amount_idr`
    /// over all incoming plus all outgoing edges.
    pub fn node_values(&self) -> HashMap<Entity, Decimal> {
        let mut values: HashMap<Entity, Decimal> = self
            .nodes
            .iter()
            .map(|n| (n.clone(), Decimal::ZERO))
            .collect();
        for ((source, target), attrs) in &self.edges {
            if let Some(v) = values.get_mut(source) {
                *v += attrs.amount_idr;
            }
            if let Some(v) = values.get_mut(target) {
                *v += attrs.amount_idr;
            }
        }
        values
    }

    /// The induced subgraph on `keep`: those nodes (in their original
    /// insertion order) and only the edges with both endpoints in the set.
    pub fn induced(&self, keep: &HashSet<Entity>) -> FlowGraph {
        let mut sub = FlowGraph::new();
        for node in &self.nodes {
            if keep.contains(node) {
                sub.intern(node);
            }
        }
        for ((source, target), attrs) in &self.edges {
            if keep.contains(source) && keep.contains(target) {
                sub.edges
                    .insert((source.clone(), target.clone()), attrs.clone());
            }
        }
        sub
    }
}
