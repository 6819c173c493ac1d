use crate::core::entity::{BankCode, Entity};
use crate::data::tables::EdgeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A counterpart institution aggregated from edge source labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankPartner {
    pub bank: BankCode,
    /// Number of edges originating at this bank.
    pub count: usize,
    pub total_idr: Decimal,
}

/// Group precomputed edges by the bank code of their source entity.
///
/// The institution's own code and labels without a parseable bank token
/// are excluded. Result is sorted by edge count descending, ties by code,
/// truncated to `limit`.
pub fn top_partners(edges: &[EdgeRecord], home: &BankCode, limit: usize) -> Vec<BankPartner> {
    let mut grouped: HashMap<BankCode, (usize, Decimal)> = HashMap::new();
    for edge in edges {
        let Some(entity) = Entity::parse_label(&edge.source) else {
            continue;
        };
        if entity.is_customer_of(home) {
            continue;
        }
        let slot = grouped
            .entry(entity.bank().clone())
            .or_insert((0, Decimal::ZERO));
        slot.0 += 1;
        slot.1 += edge.amount_tx_idr;
    }

    let mut partners: Vec<BankPartner> = grouped
        .into_iter()
        .map(|(bank, (count, total_idr))| BankPartner {
            bank,
            count,
            total_idr,
        })
        .collect();
    partners.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.bank.cmp(&b.bank)));
    partners.truncate(limit);
    partners
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transaction::Direction;
    use rust_decimal_macros::dec;

    fn edge(source: &str, amount: Decimal) -> EdgeRecord {
        EdgeRecord {
            source: source.to_string(),
            target: "X (B1)".to_string(),
            amount_tx_idr: amount,
            trx: Some(1),
            direction: Direction::Incoming,
        }
    }

    #[test]
    fn test_groups_and_excludes_home() {
        let edges = vec![
            edge("A (B2)", dec!(100)),
            edge("B (B2)", dec!(50)),
            edge("C (B3)", dec!(500)),
            edge("D (B1)", dec!(999)),
        ];
        let partners = top_partners(&edges, &BankCode::new("B1"), 10);

        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].bank, BankCode::new("B2"));
        assert_eq!(partners[0].count, 2);
        assert_eq!(partners[0].total_idr, dec!(150));
        assert_eq!(partners[1].bank, BankCode::new("B3"));
        assert!(partners.iter().all(|p| p.bank != BankCode::new("B1")));
    }

    #[test]
    fn test_unparseable_labels_skipped() {
        let edges = vec![edge("no code here", dec!(10)), edge("A (B2)", dec!(20))];
        let partners = top_partners(&edges, &BankCode::new("B1"), 10);
        assert_eq!(partners.len(), 1);
        assert_eq!(partners[0].bank, BankCode::new("B2"));
    }

    #[test]
    fn test_limit_and_tie_break() {
        let edges = vec![
            edge("A (B4)", dec!(1)),
            edge("B (B2)", dec!(1)),
            edge("C (B3)", dec!(1)),
        ];
        let partners = top_partners(&edges, &BankCode::new("B1"), 2);
        // Equal counts: codes sort ascending, then truncate.
        assert_eq!(partners.len(), 2);
        assert_eq!(partners[0].bank, BankCode::new("B2"));
        assert_eq!(partners[1].bank, BankCode::new("B3"));
    }
}
