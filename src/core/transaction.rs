use crate::core::entity::Entity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Transaction direction relative to the debitor (the account holder on
/// the institution's side of the export).
///
/// `Incoming` means money flows from the counterpart into the debitor's
/// account; `Outgoing` is the reverse. The serialized form is upper-case,
/// matching the export files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Incoming,
    Outgoing,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Incoming => "INCOMING",
            Direction::Outgoing => "OUTGOING",
        }
    }

    /// Both directions, in display order.
    pub fn all() -> [Direction; 2] {
        [Direction::Incoming, Direction::Outgoing]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Raised when a raw `type` value is neither INCOMING nor OUTGOING.
#[derive(Debug, Clone, Error)]
#[error("unrecognized transaction type: {0:?}")]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INCOMING" => Ok(Direction::Incoming),
            "OUTGOING" => Ok(Direction::Outgoing),
            _ => Err(UnknownDirection(s.to_string())),
        }
    }
}

/// One row of the transaction export.
///
/// Immutable once constructed. The two parties are the debitor (the
/// account holder) and the counterpart (the `sender_recipient` columns);
/// which one money flows *from* depends on the direction and is resolved
/// by [`crate::graph::normalize::direction_edge`].
///
/// # Examples
///
/// ```
/// use txflow::core::entity::{BankCode, Entity};
/// use txflow::core::transaction::{Direction, Transaction};
/// use rust_decimal_macros::dec;
///
/// let tx = Transaction::new(
///     Direction::Incoming,
///     Entity::new("A", BankCode::new("B1")),
///     Entity::new("B", BankCode::new("B2")),
///     dec!(100_000_000),
///     3,
/// );
/// assert_eq!(tx.amount_idr(), dec!(100_000_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    direction: Direction,
    debitor: Entity,
    counterpart: Entity,
    /// Transaction value in IDR. Never negative.
    amount_idr: Decimal,
    /// Number of underlying transfers this row aggregates (`trx` column).
    count: u64,
}

impl Transaction {
    /// Create a new transaction record.
    ///
    /// # Panics
    ///
    /// Panics if `amount_idr` is negative.
    pub fn new(
        direction: Direction,
        debitor: Entity,
        counterpart: Entity,
        amount_idr: Decimal,
        count: u64,
    ) -> Self {
        assert!(
            amount_idr >= Decimal::ZERO,
            "transaction amount must be non-negative, got {}",
            amount_idr
        );
        Self {
            direction,
            debitor,
            counterpart,
            amount_idr,
            count,
        }
    }

    // --- Accessors ---

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn debitor(&self) -> &Entity {
        &self.debitor
    }

    pub fn counterpart(&self) -> &Entity {
        &self.counterpart
    }

    pub fn amount_idr(&self) -> Decimal {
        self.amount_idr
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// An ordered, deduplicated collection of transaction records.
///
/// Exact duplicate rows are removed on construction, keeping the first
/// occurrence; iteration order is the order of the source export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
}

impl TransactionSet {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    /// Build a set from rows, dropping exact duplicates. Returns the set
    /// and the number of rows removed.
    pub fn from_rows(rows: Vec<Transaction>) -> (Self, usize) {
        let mut seen: HashSet<Transaction> = HashSet::with_capacity(rows.len());
        let mut transactions = Vec::with_capacity(rows.len());
        let mut dropped = 0;
        for row in rows {
            if seen.insert(row.clone()) {
                transactions.push(row);
            } else {
                dropped += 1;
            }
        }
        (Self { transactions }, dropped)
    }

    /// Append a record without duplicate checking.
    pub fn add(&mut self, tx: Transaction) {
        self.transactions.push(tx);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Sum of all transaction amounts.
    pub fn total_amount(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount_idr()).sum()
    }

    /// Smallest and largest amount present, or `None` for an empty set.
    pub fn amount_bounds(&self) -> Option<(Decimal, Decimal)> {
        let mut iter = self.transactions.iter().map(|t| t.amount_idr());
        let first = iter.next()?;
        let (mut lo, mut hi) = (first, first);
        for amount in iter {
            lo = lo.min(amount);
            hi = hi.max(amount);
        }
        Some((lo, hi))
    }

    /// The distinct directions present, in display order.
    pub fn directions(&self) -> Vec<Direction> {
        Direction::all()
            .into_iter()
            .filter(|d| self.transactions.iter().any(|t| t.direction() == *d))
            .collect()
    }

    /// All unique entities referenced as debitor or counterpart.
    pub fn entities(&self) -> Vec<Entity> {
        let mut entities: Vec<Entity> = self
            .transactions
            .iter()
            .flat_map(|t| [t.debitor().clone(), t.counterpart().clone()])
            .collect();
        entities.sort();
        entities.dedup();
        entities
    }
}

impl FromIterator<Transaction> for TransactionSet {
    fn from_iter<T: IntoIterator<Item = Transaction>>(iter: T) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}
