//! Append-Only Key-Value Store Library
//!
//! A minimal persistent key-value store. Every write is appended to a text log and
//! fsynced before it is acknowledged; on open the log is replayed into an in-memory
//! index that answers reads with last-write-wins semantics.
//!
//! # Modules
//!
//! - `api`: Entry point to the store. Opens, writes to and reads from it.
//! - `command`: Parser for the `SET`/`GET`/`EXIT` line protocol.
//! - `config`: Data file location and storage-error policy.
//! - `shell`: Command loop that drives a store from a line-oriented input stream.
//!
//! # Log format
//!
//! One record per line, UTF-8, `\n` terminated:
//!
//! ```text
//! SET <key> <value>
//! ```
//!
//! The key ends at the first space after `SET `; the value is the rest of the line
//! and may itself contain spaces. Lines that do not have this shape are skipped on
//! replay.
//!
//! # Examples
//!
//! ```rust
//! use appendkv::api::StorageEngine;
//!
//! fn main() -> appendkv::Result<()> {
//!     let dir = tempfile::tempdir().expect("create temp dir");
//!     let path = dir.path().join("data.db");
//!
//!     let mut store = StorageEngine::open(&path)?;
//!     store.set("greeting", "hello world")?;
//!     assert_eq!(store.get("greeting"), Some("hello world"));
//!
//!     // Reopening replays the log.
//!     drop(store);
//!     let store = StorageEngine::open(&path)?;
//!     assert_eq!(store.get("greeting"), Some("hello world"));
//!     assert_eq!(store.get("missing"), None);
//!
//!     Ok(())
//! }
//! ```

/// Entry point to the store
pub mod api;
pub mod command;
pub mod config;
pub mod shell;

mod error;
mod index;
mod record;
mod write_ahead_log;

pub use error::{Error, Result};
pub use record::Record;
pub use write_ahead_log::DEFAULT_LOG_FILE;
