//! # Store - Flat-File Record Store
//!
//! Durable, append-and-patch storage of fixed-width encoded lines produced by
//! the [`codec`] crate.
//!
//! ## Architecture
//!
//! ```text
//! caller
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                    STORE                      │
//! │                                               │
//! │ write.rs  → insert(): parse → exists → append │
//! │             append(): O_APPEND + "\n"         │
//! │                                               │
//! │ read.rs   → list() / records() / entry()      │
//! │             exists(): linear scan             │
//! │                                               │
//! │ update.rs → update_field(): scan for target,  │
//! │             seek(line_offset + field.offset)  │
//! │             overwrite field.width() bytes     │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Access Model
//!
//! A [`Store`] is only a handle: it remembers the [`StoreConfig`] and holds no
//! open file. Every operation opens the file, makes a single pass and drops
//! the handle before returning, on error paths too. There is no locking, so
//! the store assumes **exclusive external access** to its file; a second
//! writer (thread or process) may observe torn reads or stale offsets.
//!
//! ## Record Identity
//!
//! A record is identified by its whole encoded line, compared byte for byte
//! with the terminator stripped. There is no separate key. Two identical
//! lines are indistinguishable and only the first can be updated; `insert`
//! refuses duplicates to keep that from happening through this API.

mod read;
mod update;
mod write;

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

use codec::CodecError;
pub use codec::{Field, Record};
pub use config::StoreConfig;
use thiserror::Error;
use tracing::{debug, info};

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Raw input, a target line or a replacement value was rejected.
    #[error(transparent)]
    InvalidFormat(#[from] CodecError),

    /// The encoded line is already present in the file.
    #[error("entry already exists: {0:?}")]
    DuplicateEntry(String),

    /// No stored line matches the update target.
    #[error("no entry matches {0:?}")]
    NotFound(String),

    /// A stored line could not be decoded.
    #[error("corrupt entry at line {line}: {reason}")]
    Corrupt {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// An underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Returns `true` for errors the user can fix by retrying with other input.
    ///
    /// I/O failures and corrupt files are not recoverable this way.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidFormat(_) | StoreError::DuplicateEntry(_) | StoreError::NotFound(_)
        )
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Handle to a flat record file.
#[derive(Debug, Clone)]
pub struct Store {
    pub(crate) config: StoreConfig,
}

impl Store {
    /// Creates a handle for `config` and makes sure the file exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the file cannot be created.
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = Self { config };
        store.ensure_file()?;
        Ok(store)
    }

    /// Creates the record file if it is absent. Never truncates.
    ///
    /// Calling this on an existing file is a no-op.
    pub fn ensure_file(&self) -> Result<()> {
        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.path())
        {
            Ok(_) => {
                info!(path = %self.path().display(), "created record file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %self.path().display(), "record file already exists");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Path of the record file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Settings this store was opened with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests;
