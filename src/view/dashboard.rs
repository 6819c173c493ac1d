use crate::analytics::institution::NetworkOverview;
use crate::analytics::partners::{top_partners, BankPartner};
use crate::analytics::summary::{by_direction, top_transactions, DirectionSummary};
use crate::core::entity::BankCode;
use crate::data::cache::DataCache;
use crate::data::layout::DataDir;
use crate::data::loader::LoadError;
use crate::data::tables::RankingRecord;
use crate::view::filter::WeightMode;
use crate::view::Notice;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// How many top transactions the bar chart shows.
const TOP_TRANSACTIONS: usize = 5;
/// How many counterpart institutions the partner chart shows.
const TOP_PARTNERS: usize = 10;
/// How many rows each ranking table shows.
const RANKING_ROWS: usize = 10;

/// One headline metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub caption: String,
}

/// One bar of the top-transactions chart: `"debitor → counterpart"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionBar {
    pub label: String,
    pub amount_idr: Decimal,
}

/// Everything the dashboard page renders, computed in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub cards: Vec<MetricCard>,
    pub top_transactions: Vec<TransactionBar>,
    pub direction_distribution: Vec<DirectionSummary>,
    pub top_partners: Vec<BankPartner>,
    /// First rows of the mode's retention ranking; empty when unavailable.
    pub retention: Vec<RankingRecord>,
    /// First rows of the mode's acquisition ranking; empty when unavailable.
    pub acquisition: Vec<RankingRecord>,
    /// Pre-rendered graph document for the selected mode, if present.
    pub graph_document: Option<PathBuf>,
    pub notices: Vec<Notice>,
}

/// Format an IDR amount in trillions, the way the metric cards show it.
pub fn format_trillions(amount: Decimal) -> String {
    format!("Rp {:.2} T", amount / dec!(1_000_000_000_000))
}

impl DashboardView {
    /// Build the dashboard for one render pass.
    ///
    /// The transaction export is required; everything precomputed is
    /// optional and degrades into a notice naming the missing artifact.
    pub fn build(
        cache: &mut DataCache,
        dir: &DataDir,
        home: &BankCode,
        mode: WeightMode,
    ) -> Result<Self, LoadError> {
        let mut notices = Vec::new();

        let loaded = cache.transactions(&dir.transactions())?;
        if loaded.skipped > 0 {
            notices.push(Notice::Warning(format!(
                "{} rows had an unrecognized type or negative amount and were skipped",
                loaded.skipped
            )));
        }
        let top_transactions = top_transactions(&loaded.set, TOP_TRANSACTIONS)
            .into_iter()
            .map(|tx| TransactionBar {
                label: format!("{} → {}", tx.debitor().name(), tx.counterpart().name()),
                amount_idr: tx.amount_idr(),
            })
            .collect();
        let direction_distribution = by_direction(&loaded.set).entries().to_vec();

        let (cards, partners) = match cache.precomputed(&dir.nodes(), &dir.edges()) {
            Ok(tables) => {
                let overview = NetworkOverview::from_tables(&tables.nodes, &tables.edges, home);
                let partners = top_partners(&tables.edges, home, TOP_PARTNERS);
                (overview_cards(&overview, home), partners)
            }
            Err(err) => {
                warn!("precomputed tables unavailable: {}", err);
                notices.push(Notice::Warning(format!(
                    "network overview unavailable: {}",
                    err
                )));
                (Vec::new(), Vec::new())
            }
        };

        let document = dir.graph_document(mode);
        let graph_document = if document.exists() {
            Some(document)
        } else {
            notices.push(Notice::Error(format!(
                "graph document '{}' not found",
                document.display()
            )));
            None
        };

        let retention = ranking_rows(cache, dir.retention_ranking(mode), &mut notices);
        let acquisition = ranking_rows(cache, dir.acquisition_ranking(mode), &mut notices);

        Ok(Self {
            cards,
            top_transactions,
            direction_distribution,
            top_partners: partners,
            retention,
            acquisition,
            graph_document,
            notices,
        })
    }
}

fn ranking_rows(cache: &mut DataCache, path: PathBuf, notices: &mut Vec<Notice>) -> Vec<RankingRecord> {
    match cache.ranking(&path) {
        Ok(rows) => rows.iter().take(RANKING_ROWS).cloned().collect(),
        Err(err) => {
            warn!("ranking table unavailable: {}", err);
            notices.push(Notice::Error(format!(
                "ranking table '{}' could not be loaded: {}",
                path.display(),
                err
            )));
            Vec::new()
        }
    }
}

fn overview_cards(overview: &NetworkOverview, home: &BankCode) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "Active customers".to_string(),
            value: overview.customer_nodes.to_string(),
            caption: format!("entities with code ({})", home),
        },
        MetricCard {
            title: "External entities".to_string(),
            value: overview.external_nodes.to_string(),
            caption: format!("entities outside ({})", home),
        },
        MetricCard {
            title: "Transaction connections".to_string(),
            value: overview.connections.to_string(),
            caption: "edges in the network".to_string(),
        },
        MetricCard {
            title: "Money in".to_string(),
            value: format_trillions(overview.incoming_idr),
            caption: format!("INCOMING into ({})", home),
        },
        MetricCard {
            title: "Money out".to_string(),
            value: format_trillions(overview.outgoing_idr),
            caption: format!("OUTGOING from ({})", home),
        },
        MetricCard {
            title: "Total volume".to_string(),
            value: format_trillions(overview.total_volume()),
            caption: "in + out".to_string(),
        },
    ]
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Dashboard ===")?;
        for card in &self.cards {
            writeln!(f, "{:<26} {:>16}  ({})", card.title, card.value, card.caption)?;
        }

        writeln!(f, "\nTop transactions:")?;
        for bar in &self.top_transactions {
            writeln!(f, "  {:<40} {}", bar.label, bar.amount_idr)?;
        }

        writeln!(f, "\nBy direction:")?;
        for entry in &self.direction_distribution {
            writeln!(
                f,
                "  {:<10} {:>6} rows  {}",
                entry.direction, entry.count, entry.total_idr
            )?;
        }

        writeln!(f, "\nTop counterpart institutions:")?;
        for partner in &self.top_partners {
            writeln!(
                f,
                "  {:<6} {:>6} edges  {}",
                partner.bank, partner.count, partner.total_idr
            )?;
        }

        if !self.retention.is_empty() {
            writeln!(f, "\nTop retention:")?;
            for row in &self.retention {
                writeln!(f, "  {:<40} {:.4}", row.entity, row.score)?;
            }
        }
        if !self.acquisition.is_empty() {
            writeln!(f, "\nTop acquisition:")?;
            for row in &self.acquisition {
                writeln!(f, "  {:<40} {:.4}", row.entity, row.score)?;
            }
        }

        for notice in &self.notices {
            writeln!(f, "\n{}", notice)?;
        }
        Ok(())
    }
}
