//! Memoized data loading.
//!
//! The dashboard re-renders on every interaction but only needs to read
//! its input files once. `DataCache` keeps each loaded table keyed by its
//! source path; an entry is reused until the file's modification time
//! changes, and can be dropped explicitly via [`DataCache::invalidate`].

use crate::data::loader::{
    load_precomputed, load_ranking, load_transactions, LoadError, LoadedTransactions,
};
use crate::data::tables::{PrecomputedTables, RankingRecord};
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    modified: SystemTime,
    loaded_at: DateTime<Utc>,
    value: T,
}

impl<T> CacheEntry<T> {
    fn new(modified: SystemTime, value: T) -> Self {
        Self {
            modified,
            loaded_at: Utc::now(),
            value,
        }
    }
}

fn source_mtime(path: &Path) -> Result<SystemTime, LoadError> {
    let to_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };
    std::fs::metadata(path)
        .map_err(to_err)?
        .modified()
        .map_err(to_err)
}

fn fetch<'a, T, F>(
    map: &'a mut HashMap<PathBuf, CacheEntry<T>>,
    path: &Path,
    load: F,
) -> Result<&'a T, LoadError>
where
    F: FnOnce(&Path) -> Result<T, LoadError>,
{
    let modified = source_mtime(path)?;
    match map.entry(path.to_path_buf()) {
        Entry::Occupied(entry) if entry.get().modified == modified => {
            debug!("cache hit: {}", path.display());
            Ok(&entry.into_mut().value)
        }
        Entry::Occupied(entry) => {
            debug!("cache stale, reloading: {}", path.display());
            let slot = entry.into_mut();
            *slot = CacheEntry::new(modified, load(path)?);
            Ok(&slot.value)
        }
        Entry::Vacant(entry) => {
            debug!("cache miss, loading: {}", path.display());
            let value = load(path)?;
            Ok(&entry.insert(CacheEntry::new(modified, value)).value)
        }
    }
}

/// Caches loaded input tables for the lifetime of the process.
///
/// Keys are source paths; an entry is invalidated when the file's
/// modification time changes or when dropped explicitly.
#[derive(Debug, Default)]
pub struct DataCache {
    transactions: HashMap<PathBuf, CacheEntry<LoadedTransactions>>,
    precomputed: HashMap<PathBuf, CacheEntry<PrecomputedTables>>,
    rankings: HashMap<PathBuf, CacheEntry<Vec<RankingRecord>>>,
}

impl DataCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The transaction export at `path`, loading it on first access or
    /// after the file changed.
    pub fn transactions(&mut self, path: &Path) -> Result<&LoadedTransactions, LoadError> {
        fetch(&mut self.transactions, path, load_transactions)
    }

    /// The precomputed node/edge table pair, cached under the edge-table
    /// path (both files reload together when it changes).
    pub fn precomputed(
        &mut self,
        nodes_path: &Path,
        edges_path: &Path,
    ) -> Result<&PrecomputedTables, LoadError> {
        fetch(&mut self.precomputed, edges_path, |_| {
            load_precomputed(nodes_path, edges_path)
        })
    }

    /// A ranking table (`Entity,Score`).
    pub fn ranking(&mut self, path: &Path) -> Result<&[RankingRecord], LoadError> {
        fetch(&mut self.rankings, path, load_ranking).map(Vec::as_slice)
    }

    /// When the entry for `path` was last loaded, if it is cached.
    pub fn loaded_at(&self, path: &Path) -> Option<DateTime<Utc>> {
        self.transactions
            .get(path)
            .map(|e| e.loaded_at)
            .or_else(|| self.precomputed.get(path).map(|e| e.loaded_at))
            .or_else(|| self.rankings.get(path).map(|e| e.loaded_at))
    }

    /// Drop any cached entry for `path`.
    pub fn invalidate(&mut self, path: &Path) {
        self.transactions.remove(path);
        self.precomputed.remove(path);
        self.rankings.remove(path);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.precomputed.clear();
        self.rankings.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str =
        "type,debitor_name,debitor_bank,sender_recipient_name,sender_recipient_bank,amount_tx_idr,trx\n";

    fn write_export(rows: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}{}", HEADER, rows).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_second_access_is_memoized() {
        let file = write_export("INCOMING,A,B1,B,B2,10,1\n");
        let mut cache = DataCache::new();
        let len = cache.transactions(file.path()).unwrap().set.len();
        assert_eq!(len, 1);
        assert!(cache.loaded_at(file.path()).is_some());
        // Same mtime: served from the cache, same contents.
        let again = cache.transactions(file.path()).unwrap();
        assert_eq!(again.set.len(), 1);
    }

    #[test]
    fn test_mtime_change_reloads() {
        let file = write_export("INCOMING,A,B1,B,B2,10,1\n");
        let mut cache = DataCache::new();
        assert_eq!(cache.transactions(file.path()).unwrap().set.len(), 1);

        // Rewrite with one more row and an older-than-now mtime bump.
        {
            let mut f = std::fs::File::create(file.path()).unwrap();
            write!(
                f,
                "{}INCOMING,A,B1,B,B2,10,1\nOUTGOING,A,B1,C,B3,20,1\n",
                HEADER
            )
            .unwrap();
        }
        let past = SystemTime::now() - std::time::Duration::from_secs(60);
        let times = std::fs::File::options()
            .write(true)
            .open(file.path())
            .unwrap();
        times.set_modified(past).unwrap();

        assert_eq!(cache.transactions(file.path()).unwrap().set.len(), 2);
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let file = write_export("INCOMING,A,B1,B,B2,10,1\n");
        let mut cache = DataCache::new();
        cache.transactions(file.path()).unwrap();
        cache.invalidate(file.path());
        assert!(cache.loaded_at(file.path()).is_none());
        assert_eq!(cache.transactions(file.path()).unwrap().set.len(), 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut cache = DataCache::new();
        assert!(cache.transactions(Path::new("/nonexistent.csv")).is_err());
    }
}
