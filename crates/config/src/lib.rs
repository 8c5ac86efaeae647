//! # Config - Store Settings
//!
//! [`StoreConfig`] carries everything a `store::Store` needs to find and
//! write its data file. It is built once at startup and handed to the store,
//! so nothing below the binary reads the environment.
//!
//! ## Environment
//!
//! ```text
//! FLATDB_PATH   data file path               (default: "fun.dat")
//! FLATDB_SYNC   fsync after every mutation   (default: "false")
//! ```

use std::path::{Path, PathBuf};

/// Default data file, relative to the working directory.
pub const DEFAULT_PATH: &str = "fun.dat";

/// Env var naming the data file.
pub const PATH_VAR: &str = "FLATDB_PATH";

/// Env var enabling `fsync` after each append or update.
pub const SYNC_VAR: &str = "FLATDB_SYNC";

/// Reads a configuration value from the environment, falling back to `default`.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Location and durability settings for the record file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the newline-delimited record file.
    pub path: PathBuf,
    /// If `true`, every append and in-place update is followed by `sync_all`.
    pub sync: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            sync: false,
        }
    }
}

impl StoreConfig {
    /// Config for `path` with default durability.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Sets whether mutations are fsynced.
    #[must_use]
    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Loads the config from `FLATDB_PATH` / `FLATDB_SYNC`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = lookup(PATH_VAR)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.path);
        let sync = lookup(SYNC_VAR)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.sync);
        Self { path, sync }
    }
}
