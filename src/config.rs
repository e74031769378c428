use std::path::{Path, PathBuf};

use crate::write_ahead_log::DEFAULT_LOG_FILE;

/// What the command loop does when a write cannot be persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageErrorPolicy {
    /// Drop the failed write, log it and keep serving commands.
    #[default]
    Continue,
    /// Stop serving and return the error.
    Exit,
}

/// Runtime configuration for a store and its command loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    data_file: PathBuf,
    on_storage_error: StorageErrorPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_LOG_FILE),
            on_storage_error: StorageErrorPolicy::default(),
        }
    }
}

impl Config {
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    pub fn with_storage_error_policy(mut self, policy: StorageErrorPolicy) -> Self {
        self.on_storage_error = policy;
        self
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn storage_error_policy(&self) -> StorageErrorPolicy {
        self.on_storage_error
    }
}
