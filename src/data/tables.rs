//! Row shapes of the precomputed input tables.
//!
//! These tables are produced upstream by the graph-metrics batch job and
//! consumed read-only: `nodes.csv` / `edges.csv` describe the already
//! normalized network, and the per-mode ranking tables carry externally
//! computed retention / acquisition centrality scores.

use crate::core::transaction::Direction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Row of the precomputed `nodes.csv` table. The `entity` column holds the
/// `"Name (CODE)"` label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub entity: String,
}

/// Row of the precomputed `edges.csv` table. Endpoints are label strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    pub amount_tx_idr: Decimal,
    #[serde(default)]
    pub trx: Option<u64>,
    #[serde(rename = "type")]
    pub direction: Direction,
}

/// Row of a ranking table (`Entity,Score` columns).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingRecord {
    #[serde(rename = "Entity")]
    pub entity: String,
    #[serde(rename = "Score")]
    pub score: f64,
}

/// The optional precomputed node and edge tables, loaded together.
#[derive(Debug, Clone, Default)]
pub struct PrecomputedTables {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}
