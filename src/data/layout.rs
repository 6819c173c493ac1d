use crate::view::filter::WeightMode;
use std::path::{Path, PathBuf};

/// File layout of the read-only input directory.
///
/// All inputs must pre-exist; nothing is written back here except the
/// transient graph document produced by the `network` command (and that
/// goes wherever the caller points it).
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The primary transaction export.
    pub fn transactions(&self) -> PathBuf {
        self.root.join("transactions.csv")
    }

    /// Optional precomputed node table.
    pub fn nodes(&self) -> PathBuf {
        self.root.join("nodes.csv")
    }

    /// Optional precomputed edge table.
    pub fn edges(&self) -> PathBuf {
        self.root.join("edges.csv")
    }

    /// The pre-rendered graph document for a weighting mode.
    pub fn graph_document(&self, mode: WeightMode) -> PathBuf {
        self.root.join(mode.graph_document())
    }

    /// The retention ranking table for a weighting mode.
    pub fn retention_ranking(&self, mode: WeightMode) -> PathBuf {
        self.root.join(mode.retention_table())
    }

    /// The acquisition ranking table for a weighting mode.
    pub fn acquisition_ranking(&self, mode: WeightMode) -> PathBuf {
        self.root.join(mode.acquisition_table())
    }
}
