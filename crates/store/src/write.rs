/// Write path: `append()` and `insert()`.
///
/// New records only ever go to the end of the file. `append` trusts its
/// caller about duplicates; `insert` is the checked add flow.
use std::fs::OpenOptions;
use std::io::Write;

use codec::LINE_LEN;
use tracing::{debug, warn};

use crate::{Result, Store, StoreError};

impl Store {
    /// Appends `line` plus a `\n` terminator at end-of-file.
    ///
    /// Does **not** check for duplicates; call [`Store::exists`] first, or use
    /// [`Store::insert`].
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidFormat`] if `line` is not a 17-byte encoded line.
    /// - [`StoreError::Io`] if the file is missing or the write fails.
    pub fn append(&self, line: &str) -> Result<()> {
        codec::decode(line)?;

        let mut buf = Vec::with_capacity(LINE_LEN + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');

        // The file is created by `ensure_file` only; a file deleted
        // mid-session surfaces as an io error here.
        let mut file = OpenOptions::new().append(true).open(self.path())?;
        file.write_all(&buf)?;
        file.flush()?;
        if self.config.sync {
            file.sync_all()?;
        }

        debug!(line, "appended entry");
        Ok(())
    }

    /// Validates raw `color, zipcode, state` input, encodes it and appends it
    /// unless the same line is already stored. Returns the stored line.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidFormat`] if `raw` fails the input grammar.
    /// - [`StoreError::DuplicateEntry`] if the encoded line already exists.
    /// - [`StoreError::Io`] on file failure.
    pub fn insert(&self, raw: &str) -> Result<String> {
        let line = codec::parse(raw)?.encode();

        if self.exists(&line)? {
            warn!(line = %line, "rejected duplicate entry");
            return Err(StoreError::DuplicateEntry(line));
        }

        self.append(&line)?;
        Ok(line)
    }
}
