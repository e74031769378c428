use crate::{
    config::Config,
    error::Result,
    index::Index,
    record::Record,
    write_ahead_log::{self, WriteAheadLog},
};
use std::path::{Path, PathBuf};

use tracing::info;

/// A persistent key-value store: an append-only log plus the in-memory index
/// rebuilt from it.
///
/// A `StorageEngine` only exists once replay has finished, so every value of
/// this type is ready to serve `set` and `get`.
pub struct StorageEngine {
    index: Index,
    wal: WriteAheadLog,
    recovery: RecoveryStats,
}

/// What happened while the log was replayed on open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryStats {
    /// Well-formed records applied to the index.
    pub replayed: u64,
    /// Lines skipped because they were not well-formed records.
    pub skipped: u64,
}

impl StorageEngine {
    /// Opens the store backed by the log at `path`, replaying it in full.
    ///
    /// A missing log is a fresh, empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        // Replay the log into a fresh index, in write order.
        let mut index = Index::new();
        let mut replay = write_ahead_log::replay(&path)?;
        let mut replayed = 0;
        for record in replay.by_ref() {
            index.apply(record?);
            replayed += 1;
        }

        let recovery = RecoveryStats {
            replayed,
            skipped: replay.skipped(),
        };

        info!(
            path = %path.display(),
            replayed = recovery.replayed,
            skipped = recovery.skipped,
            keys = index.len(),
            "opened store"
        );

        Ok(Self {
            index,
            wal: WriteAheadLog::new(path),
            recovery,
        })
    }

    /// Opens the store at the data file named by `config`.
    pub fn with_config(config: &Config) -> Result<Self> {
        Self::open(config.data_file())
    }

    /// Durably stores `value` under `key`.
    ///
    /// The record is appended and fsynced before the index is touched; if the
    /// append fails the index is left as it was.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let record = Record::new(key, value)?;

        self.wal.append(&record)?;
        self.index.apply(record);

        Ok(())
    }

    /// Returns the value of the last `set` for `key`. Never touches the log.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.index.lookup(key)
    }

    pub fn path(&self) -> &Path {
        self.wal.path()
    }

    /// Number of distinct keys in the store.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn recovery(&self) -> RecoveryStats {
        self.recovery
    }
}
