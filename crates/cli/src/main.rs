//! # CLI - FlatDB Interactive Shell
//!
//! A menu-driven front end for the flat-file record store. Reads choices from
//! stdin, applies them through the `store` crate and prints the file listing
//! after every step. Works interactively or with piped input.
//!
//! ## Menus
//!
//! ```text
//! Main          1: add   2: update   9: exit
//! Add           "Color, 12345, ST"               9: exit
//! Select line   1-based line number              9: exit
//! Select field  1: color 2: zipcode 3: state     9: exit
//! Edit field    new value                        9: exit
//! ```
//!
//! ## Configuration
//!
//! ```text
//! FLATDB_PATH   data file path               (default: "fun.dat")
//! FLATDB_SYNC   fsync after every mutation   (default: "false")
//! FLATDB_LOG    log level for stderr output  (default: "info")
//! ```
//!
//! ## Example
//!
//! ```text
//! $ cargo run -p cli
//! fun.dat data:
//!
//! 1: Add data to the file
//! 2: Update existing data within file
//! 9: Exit
//! 1
//! data format: (Color, Zipcode (00000-99999), State Abbreviation)
//! 9: Exit
//! Red, 12345, CA
//! OK Red     ,12345,CA
//! fun.dat data:
//! 1: Red     ,12345,CA
//! ...
//! ```

mod shell;

use std::io;

use anyhow::{Context, Result};
use config::{env_or, StoreConfig};
use store::Store;
use tracing::info;

use crate::shell::Shell;

fn main() -> Result<()> {
    // Logs go to stderr so piped stdout only carries the shell output.
    let level = env_or("FLATDB_LOG", "info")
        .parse()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let config = StoreConfig::from_env();
    let store = Store::open(config.clone())
        .with_context(|| format!("failed to open record file {}", config.path.display()))?;
    info!(path = %config.path.display(), sync = config.sync, "flatdb started");

    let mut shell = Shell::new(store);
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    shell.run(stdin.lock(), &mut stdout)
}
