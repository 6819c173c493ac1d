//! # txflow
//!
//! Transaction network analytics over bank transfer exports.
//!
//! Given a tabular export of transfers between a bank's customers and
//! external entities, this crate normalizes each row into a canonical
//! directed money-flow edge, aggregates summary metrics, selects the
//! top-N subgraph by total incident transaction value, and builds the
//! view models a dashboard renders.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: entities, bank codes, transactions
//! - **graph** — Flow graph, direction normalization, top-N selection
//! - **analytics** — Direction breakdowns, counterpart institutions, overview
//! - **data** — Typed CSV loading and the memoized, mtime-keyed cache
//! - **view** — Filter state, dashboard/network view models, HTML output
//! - **sample** — Random dataset generation for testing

pub mod analytics;
pub mod core;
pub mod data;
pub mod graph;
pub mod sample;
pub mod view;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::entity::{BankCode, Entity};
    pub use crate::core::transaction::{Direction, Transaction, TransactionSet};
    pub use crate::data::cache::DataCache;
    pub use crate::data::layout::DataDir;
    pub use crate::graph::flow_graph::{EdgeAttrs, FlowEdge, FlowGraph};
    pub use crate::graph::normalize::{direction_edge, graph_from_transactions};
    pub use crate::graph::selection::{rank_by_value, top_subgraph, TopSelection};
    pub use crate::view::dashboard::DashboardView;
    pub use crate::view::filter::{FilterState, WeightMode};
    pub use crate::view::network::NetworkView;
}
