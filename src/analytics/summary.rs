use crate::core::transaction::{Direction, Transaction, TransactionSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Count and summed amount for one transaction direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSummary {
    pub direction: Direction,
    pub count: usize,
    pub total_idr: Decimal,
}

/// Per-direction breakdown of a transaction set.
///
/// Grand totals always equal the set's own totals: every record lands in
/// exactly one bucket, so nothing is dropped or double-counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionBreakdown {
    entries: Vec<DirectionSummary>,
    grand_count: usize,
    grand_total_idr: Decimal,
}

impl DirectionBreakdown {
    /// Summaries in display order; directions absent from the set are
    /// omitted.
    pub fn entries(&self) -> &[DirectionSummary] {
        &self.entries
    }

    pub fn grand_count(&self) -> usize {
        self.grand_count
    }

    pub fn grand_total_idr(&self) -> Decimal {
        self.grand_total_idr
    }

    /// The summary for one direction, if any records carry it.
    pub fn for_direction(&self, direction: Direction) -> Option<&DirectionSummary> {
        self.entries.iter().find(|e| e.direction == direction)
    }
}

/// Group a transaction set by direction.
pub fn by_direction(set: &TransactionSet) -> DirectionBreakdown {
    let mut entries = Vec::new();
    for direction in Direction::all() {
        let mut count = 0usize;
        let mut total_idr = Decimal::ZERO;
        for tx in set.iter().filter(|t| t.direction() == direction) {
            count += 1;
            total_idr += tx.amount_idr();
        }
        if count > 0 {
            entries.push(DirectionSummary {
                direction,
                count,
                total_idr,
            });
        }
    }
    DirectionBreakdown {
        entries,
        grand_count: set.len(),
        grand_total_idr: set.total_amount(),
    }
}

/// The `n` largest transactions by amount, descending. Equal amounts keep
/// their source order (stable sort).
pub fn top_transactions(set: &TransactionSet, n: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = set.iter().collect();
    sorted.sort_by(|a, b| b.amount_idr().cmp(&a.amount_idr()));
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{BankCode, Entity};
    use rust_decimal_macros::dec;

    fn tx(direction: Direction, counterpart: &str, amount: Decimal) -> Transaction {
        Transaction::new(
            direction,
            Entity::new("A", BankCode::new("B1")),
            Entity::new(counterpart, BankCode::new("B2")),
            amount,
            1,
        )
    }

    #[test]
    fn test_breakdown_totals_conserved() {
        let (set, _) = TransactionSet::from_rows(vec![
            tx(Direction::Incoming, "B", dec!(100)),
            tx(Direction::Incoming, "C", dec!(30)),
            tx(Direction::Outgoing, "D", dec!(50)),
        ]);
        let breakdown = by_direction(&set);

        assert_eq!(breakdown.grand_count(), set.len());
        assert_eq!(breakdown.grand_total_idr(), set.total_amount());

        let incoming = breakdown.for_direction(Direction::Incoming).unwrap();
        assert_eq!(incoming.count, 2);
        assert_eq!(incoming.total_idr, dec!(130));
        let outgoing = breakdown.for_direction(Direction::Outgoing).unwrap();
        assert_eq!(outgoing.count, 1);
        assert_eq!(outgoing.total_idr, dec!(50));

        let entry_total: Decimal = breakdown.entries().iter().map(|e| e.total_idr).sum();
        assert_eq!(entry_total, breakdown.grand_total_idr());
    }

    #[test]
    fn test_breakdown_omits_absent_direction() {
        let (set, _) = TransactionSet::from_rows(vec![tx(Direction::Incoming, "B", dec!(10))]);
        let breakdown = by_direction(&set);
        assert_eq!(breakdown.entries().len(), 1);
        assert!(breakdown.for_direction(Direction::Outgoing).is_none());
    }

    #[test]
    fn test_empty_set_breakdown() {
        let breakdown = by_direction(&TransactionSet::new());
        assert!(breakdown.entries().is_empty());
        assert_eq!(breakdown.grand_count(), 0);
        assert_eq!(breakdown.grand_total_idr(), Decimal::ZERO);
    }

    #[test]
    fn test_top_transactions_sorted_and_truncated() {
        let (set, _) = TransactionSet::from_rows(vec![
            tx(Direction::Incoming, "B", dec!(10)),
            tx(Direction::Incoming, "C", dec!(300)),
            tx(Direction::Outgoing, "D", dec!(200)),
        ]);
        let top = top_transactions(&set, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].amount_idr(), dec!(300));
        assert_eq!(top[1].amount_idr(), dec!(200));
    }
}
