//! Random dataset generation.
//!
//! Produces synthetic transaction exports with a realistic shape: a pool
//! of the institution's own customers exchanging money with a larger pool
//! of external entities. Used by tests, benches, demos and the
//! `generate` CLI command.

use crate::core::entity::{BankCode, Entity};
use crate::core::transaction::{Direction, Transaction, TransactionSet};
use rand::Rng;
use rust_decimal::Decimal;

/// Configuration for generating a random transaction export.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// The institution's own bank code.
    pub home: BankCode,
    /// Number of customer entities at the home bank.
    pub customers: usize,
    /// Number of external counterparties.
    pub externals: usize,
    /// Bank codes for the external pool, assigned round-robin.
    pub external_banks: Vec<BankCode>,
    /// Number of rows to generate (before deduplication).
    pub rows: usize,
    /// Minimum row amount.
    pub min_amount: Decimal,
    /// Maximum row amount.
    pub max_amount: Decimal,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            home: BankCode::new("B1"),
            customers: 20,
            externals: 60,
            external_banks: (2..=9).map(|i| BankCode::new(format!("B{}", i))).collect(),
            rows: 200,
            min_amount: Decimal::from(1_000_000u64),
            max_amount: Decimal::from(5_000_000_000u64),
        }
    }
}

/// Generate a random transaction set.
///
/// Every row has a home customer as its debitor and an external entity as
/// its counterpart, with direction chosen at random — the shape of the
/// real export, which always records the institution's side as the
/// debitor.
pub fn generate_sample(config: &SampleConfig) -> TransactionSet {
    // Nothing to draw from: an empty pool yields an empty export.
    if config.customers == 0 || config.externals == 0 || config.external_banks.is_empty() {
        return TransactionSet::new();
    }

    let mut rng = rand::thread_rng();

    let customers: Vec<Entity> = (0..config.customers)
        .map(|i| Entity::new(format!("Customer-{:03}", i), config.home.clone()))
        .collect();
    let externals: Vec<Entity> = (0..config.externals)
        .map(|i| {
            let bank = config.external_banks[i % config.external_banks.len()].clone();
            Entity::new(format!("External-{:03}", i), bank)
        })
        .collect();

    let min: f64 = config.min_amount.to_string().parse().unwrap_or(1.0);
    let max: f64 = config.max_amount.to_string().parse().unwrap_or(1_000_000.0);

    let mut rows = Vec::with_capacity(config.rows);
    for _ in 0..config.rows {
        let debitor = customers[rng.gen_range(0..customers.len())].clone();
        let counterpart = externals[rng.gen_range(0..externals.len())].clone();
        let direction = if rng.gen_bool(0.5) {
            Direction::Incoming
        } else {
            Direction::Outgoing
        };
        let amount = if min < max {
            Decimal::from_f64_retain(rng.gen_range(min..max))
                .unwrap_or(config.min_amount)
                .round_dp(2)
        } else {
            config.min_amount
        };
        rows.push(Transaction::new(
            direction,
            debitor,
            counterpart,
            amount,
            rng.gen_range(1..20),
        ));
    }

    let (set, _) = TransactionSet::from_rows(rows);
    set
}
