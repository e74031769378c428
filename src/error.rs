use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors surfaced by the storage engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The log could not be opened, read, written or synced.
    ///
    /// An acknowledged write never produces this error; a `set` that returns it
    /// was neither persisted nor indexed.
    #[error("storage error on {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record that cannot be represented in the line encoding.
    #[error("malformed input: {0}")]
    Malformed(String),

    /// Reading commands or writing responses failed.
    #[error("command stream error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for [`Error::Storage`].
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
