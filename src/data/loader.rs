use crate::core::entity::{BankCode, Entity};
use crate::core::transaction::{Direction, Transaction, TransactionSet};
use crate::data::tables::{EdgeRecord, NodeRecord, PrecomputedTables, RankingRecord};
use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors arising from reading the input tables.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// One raw row of the transaction export, column-for-column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "type")]
    pub kind: String,
    pub debitor_name: String,
    pub debitor_bank: String,
    pub sender_recipient_name: String,
    pub sender_recipient_bank: String,
    pub amount_tx_idr: Decimal,
    pub trx: u64,
}

impl ExportRow {
    fn from_transaction(tx: &Transaction) -> Self {
        Self {
            kind: tx.direction().as_str().to_string(),
            debitor_name: tx.debitor().name().to_string(),
            debitor_bank: tx.debitor().bank().as_str().to_string(),
            sender_recipient_name: tx.counterpart().name().to_string(),
            sender_recipient_bank: tx.counterpart().bank().as_str().to_string(),
            amount_tx_idr: tx.amount_idr(),
            trx: tx.count(),
        }
    }
}

/// Result of loading the transaction export: the deduplicated set plus
/// counts of what was dropped on the way in.
#[derive(Debug, Clone, Default)]
pub struct LoadedTransactions {
    pub set: TransactionSet,
    /// Exact duplicate rows removed.
    pub duplicates: usize,
    /// Rows rejected for an unrecognized `type` or a negative amount.
    pub skipped: usize,
}

/// Load and validate the transaction export.
///
/// The `type` column is parsed case-insensitively. Rows with an
/// unrecognized type or a negative amount are skipped, each with a
/// warning; exact duplicates are removed, keeping the first occurrence.
/// Both counts are reported so data quality stays visible without
/// failing the load.
pub fn load_transactions(path: &Path) -> Result<LoadedTransactions, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| LoadError::csv(path, e))?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, result) in reader.deserialize::<ExportRow>().enumerate() {
        // Header is line 1; the first record is line 2.
        let line = idx + 2;
        let row = result.map_err(|e| LoadError::csv(path, e))?;

        let direction = match row.kind.parse::<Direction>() {
            Ok(direction) => direction,
            Err(err) => {
                warn!("{}: line {}: {}, row skipped", path.display(), line, err);
                skipped += 1;
                continue;
            }
        };
        if row.amount_tx_idr < Decimal::ZERO {
            warn!(
                "{}: line {}: negative amount {}, row skipped",
                path.display(),
                line,
                row.amount_tx_idr
            );
            skipped += 1;
            continue;
        }

        rows.push(Transaction::new(
            direction,
            Entity::new(row.debitor_name, BankCode::new(row.debitor_bank)),
            Entity::new(
                row.sender_recipient_name,
                BankCode::new(row.sender_recipient_bank),
            ),
            row.amount_tx_idr,
            row.trx,
        ));
    }

    let (set, duplicates) = TransactionSet::from_rows(rows);
    if duplicates > 0 {
        debug!(
            "{}: removed {} duplicate rows",
            path.display(),
            duplicates
        );
    }
    Ok(LoadedTransactions {
        set,
        duplicates,
        skipped,
    })
}

fn load_table<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, LoadError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| LoadError::csv(path, e))?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(|e| LoadError::csv(path, e))
}

/// Load the precomputed node table.
pub fn load_nodes(path: &Path) -> Result<Vec<NodeRecord>, LoadError> {
    load_table(path)
}

/// Load the precomputed edge table.
pub fn load_edges(path: &Path) -> Result<Vec<EdgeRecord>, LoadError> {
    load_table(path)
}

/// Load the node and edge tables together. Either file missing or
/// malformed fails the pair; callers degrade this into an in-view notice.
pub fn load_precomputed(nodes_path: &Path, edges_path: &Path) -> Result<PrecomputedTables, LoadError> {
    Ok(PrecomputedTables {
        nodes: load_nodes(nodes_path)?,
        edges: load_edges(edges_path)?,
    })
}

/// Load one precomputed ranking table (`Entity,Score`).
pub fn load_ranking(path: &Path) -> Result<Vec<RankingRecord>, LoadError> {
    load_table(path)
}

/// Write a transaction set back out in the export's column layout.
/// Used by the `generate` command to create fixture files.
pub fn write_transactions(set: &TransactionSet, path: &Path) -> Result<(), LoadError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| LoadError::csv(path, e))?;
    for tx in set {
        writer
            .serialize(ExportRow::from_transaction(tx))
            .map_err(|e| LoadError::csv(path, e))?;
    }
    writer.flush().map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "type,debitor_name,debitor_bank,sender_recipient_name,sender_recipient_bank,amount_tx_idr,trx\n";

    fn write_export(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}{}", HEADER, body).unwrap();
        file
    }

    #[test]
    fn test_load_typed_rows() {
        let file = write_export(
            "INCOMING,A,B1,B,B2,100.50,3\n\
             OUTGOING,A,B1,C,B3,40,1\n",
        );
        let loaded = load_transactions(file.path()).unwrap();
        assert_eq!(loaded.set.len(), 2);
        assert_eq!(loaded.skipped, 0);
        let first = &loaded.set.transactions()[0];
        assert_eq!(first.direction(), Direction::Incoming);
        assert_eq!(first.debitor().label(), "A (B1)");
        assert_eq!(first.amount_idr(), dec!(100.50));
        assert_eq!(first.count(), 3);
    }

    #[test]
    fn test_case_insensitive_type_column() {
        let file = write_export("incoming,A,B1,B,B2,10,1\nOutGoing,A,B1,C,B3,20,1\n");
        let loaded = load_transactions(file.path()).unwrap();
        assert_eq!(loaded.set.len(), 2);
        assert_eq!(loaded.skipped, 0);
    }

    #[test]
    fn test_unrecognized_type_skipped_and_counted() {
        let file = write_export(
            "INCOMING,A,B1,B,B2,10,1\n\
             TRANSFER,A,B1,B,B2,10,1\n",
        );
        let loaded = load_transactions(file.path()).unwrap();
        assert_eq!(loaded.set.len(), 1);
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn test_negative_amount_skipped() {
        let file = write_export("OUTGOING,A,B1,B,B2,-5,1\n");
        let loaded = load_transactions(file.path()).unwrap();
        assert!(loaded.set.is_empty());
        assert_eq!(loaded.skipped, 1);
    }

    #[test]
    fn test_duplicates_removed() {
        let file = write_export(
            "INCOMING,A,B1,B,B2,10,1\n\
             INCOMING,A,B1,B,B2,10,1\n",
        );
        let loaded = load_transactions(file.path()).unwrap();
        assert_eq!(loaded.set.len(), 1);
        assert_eq!(loaded.duplicates, 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let err = load_transactions(Path::new("/nonexistent/transactions.csv"));
        assert!(err.is_err());
    }

    #[test]
    fn test_round_trip_through_writer() {
        let file = write_export("INCOMING,A,B1,B,B2,100,2\n");
        let loaded = load_transactions(file.path()).unwrap();

        let out = NamedTempFile::new().unwrap();
        write_transactions(&loaded.set, out.path()).unwrap();
        let again = load_transactions(out.path()).unwrap();
        assert_eq!(again.set.transactions(), loaded.set.transactions());
    }

    #[test]
    fn test_load_edge_table() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "source,target,amount_tx_idr,trx,type\n\
             B (B2),A (B1),100,1,INCOMING\n\
             A (B1),C (B3),50,2,OUTGOING\n"
        )
        .unwrap();
        let edges = load_edges(file.path()).unwrap();
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].direction, Direction::Incoming);
        assert_eq!(edges[1].amount_tx_idr, dec!(50));
    }

    #[test]
    fn test_load_ranking_table() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "Entity,Score\n\
             A (B1),0.91\n\
             B (B2),0.45\n"
        )
        .unwrap();
        let rows = load_ranking(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entity, "A (B1)");
        assert!((rows[0].score - 0.91).abs() < f64::EPSILON);
    }
}
