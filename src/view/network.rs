use crate::core::entity::{BankCode, Entity};
use crate::core::transaction::{Direction, TransactionSet};
use crate::graph::normalize::graph_from_transactions;
use crate::graph::selection::top_subgraph;
use crate::view::filter::FilterState;
use crate::view::Notice;
use rust_decimal::Decimal;
use serde::Serialize;

/// Node fill for the institution's own customers.
pub const CUSTOMER_COLOR: &str = "#FFC700";
/// Node fill for external counterparties.
pub const EXTERNAL_COLOR: &str = "#547792";

/// Smallest rendered node size.
const BASE_NODE_SIZE: f64 = 15.0;
/// Size span added proportionally to relative degree.
const NODE_SIZE_SPAN: f64 = 100.0;

/// One rendered node of the network graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeView {
    pub entity: Entity,
    /// Total incident transaction value.
    pub value: Decimal,
    /// Degree in the full filtered graph (not the subgraph).
    pub degree: usize,
    /// Rendered size, `15 + degree/max_degree * 100`.
    pub size: f64,
    pub color: &'static str,
}

/// One rendered edge of the network graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeView {
    pub source: Entity,
    pub target: Entity,
    pub amount_idr: Decimal,
    pub count: u64,
    pub direction: Direction,
}

/// The network page for one filter pass: the top-N subgraph with display
/// attributes resolved.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkView {
    /// Selected nodes, highest value first.
    pub nodes: Vec<NodeView>,
    /// Subgraph edges, ordered by (source, target).
    pub edges: Vec<EdgeView>,
    pub notices: Vec<Notice>,
}

impl NetworkView {
    /// Apply the filter and build the view.
    ///
    /// An empty filtered dataset short-circuits: the view carries a
    /// warning notice and no nodes, and the caller stops rendering the
    /// section for this interaction cycle.
    pub fn build(set: &TransactionSet, filter: &FilterState, home: &BankCode) -> Self {
        let filtered = filter.apply(set);
        if filtered.is_empty() {
            return Self {
                nodes: Vec::new(),
                edges: Vec::new(),
                notices: vec![Notice::Warning(
                    "no transactions match the current filter".to_string(),
                )],
            };
        }

        let graph = graph_from_transactions(&filtered);
        let selection = top_subgraph(&graph, filter.top_n);

        // Sizing is relative to the full filtered graph, so a node keeps
        // its visual weight no matter how small the selection is.
        let max_degree = graph.max_degree().max(1);
        let nodes = selection
            .ranked
            .iter()
            .map(|ranked| {
                let degree = graph.degree(&ranked.entity);
                NodeView {
                    entity: ranked.entity.clone(),
                    value: ranked.value,
                    degree,
                    size: BASE_NODE_SIZE + degree as f64 / max_degree as f64 * NODE_SIZE_SPAN,
                    color: if ranked.entity.is_customer_of(home) {
                        CUSTOMER_COLOR
                    } else {
                        EXTERNAL_COLOR
                    },
                }
            })
            .collect();

        let mut edges: Vec<EdgeView> = selection
            .subgraph
            .edges()
            .map(|(source, target, attrs)| EdgeView {
                source: source.clone(),
                target: target.clone(),
                amount_idr: attrs.amount_idr,
                count: attrs.count,
                direction: attrs.direction,
            })
            .collect();
        edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

        Self {
            nodes,
            edges,
            notices: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
