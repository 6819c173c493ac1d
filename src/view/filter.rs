use crate::core::transaction::{Direction, Transaction, TransactionSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Interactive filter state for the network view.
///
/// Passed explicitly into every render pass; there is no global page
/// state. [`FilterState::for_set`] produces the widest filter for a
/// dataset, the starting position of the UI controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Node-count slider.
    pub top_n: usize,
    /// Inclusive amount range slider.
    pub min_amount: Decimal,
    pub max_amount: Decimal,
    /// Transaction-type multi-select.
    pub directions: Vec<Direction>,
}

impl FilterState {
    /// Default node-count slider position, clamped to the entity count.
    pub const DEFAULT_TOP_N: usize = 200;

    /// The widest filter over a dataset: full amount range, every
    /// direction present, default top-N.
    pub fn for_set(set: &TransactionSet) -> Self {
        let (min_amount, max_amount) = set
            .amount_bounds()
            .unwrap_or((Decimal::ZERO, Decimal::ZERO));
        Self {
            top_n: Self::DEFAULT_TOP_N.min(set.entities().len()),
            min_amount,
            max_amount,
            directions: set.directions(),
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        tx.amount_idr() >= self.min_amount
            && tx.amount_idr() <= self.max_amount
            && self.directions.contains(&tx.direction())
    }

    /// The records passing the filter, in source order.
    pub fn apply(&self, set: &TransactionSet) -> TransactionSet {
        set.iter().filter(|tx| self.matches(tx)).cloned().collect()
    }
}

/// Weighting mode of the pre-rendered network documents and ranking
/// tables: by transaction value, by transfer frequency, or structure only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightMode {
    Value,
    Frequency,
    Unweighted,
}

impl WeightMode {
    pub fn all() -> [WeightMode; 3] {
        [
            WeightMode::Value,
            WeightMode::Frequency,
            WeightMode::Unweighted,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeightMode::Value => "value",
            WeightMode::Frequency => "frequency",
            WeightMode::Unweighted => "unweighted",
        }
    }

    /// File name of the pre-rendered graph document for this mode.
    pub fn graph_document(&self) -> &'static str {
        match self {
            WeightMode::Value => "graph_value.html",
            WeightMode::Frequency => "graph_frequency.html",
            WeightMode::Unweighted => "graph_unweighted.html",
        }
    }

    /// File name of the retention ranking table for this mode.
    pub fn retention_table(&self) -> &'static str {
        match self {
            WeightMode::Value => "rankings_value_retention.csv",
            WeightMode::Frequency => "rankings_frequency_retention.csv",
            WeightMode::Unweighted => "rankings_unweighted_retention.csv",
        }
    }

    /// File name of the acquisition ranking table for this mode.
    pub fn acquisition_table(&self) -> &'static str {
        match self {
            WeightMode::Value => "rankings_value_acquisition.csv",
            WeightMode::Frequency => "rankings_frequency_acquisition.csv",
            WeightMode::Unweighted => "rankings_unweighted_acquisition.csv",
        }
    }
}

impl fmt::Display for WeightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown weighting mode: {0:?} (expected value, frequency or unweighted)")]
pub struct UnknownWeightMode(pub String);

impl FromStr for WeightMode {
    type Err = UnknownWeightMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "value" => Ok(WeightMode::Value),
            "frequency" => Ok(WeightMode::Frequency),
            "unweighted" => Ok(WeightMode::Unweighted),
            _ => Err(UnknownWeightMode(s.to_string())),
        }
    }
}
