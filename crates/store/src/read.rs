/// Read path: line scanning, `list()`, `records()`, `entry()`, `exists()`.
///
/// Every read opens the file, walks it once front to back and closes it.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::ControlFlow;

use codec::{Record, LINE_LEN};
use tracing::debug;

use crate::{Result, Store, StoreError};

/// Strips one `\n` and then one `\r` from the end of a raw line.
pub(crate) fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Walks `reader` line by line, handing `visit` the byte offset at which each
/// line starts and its terminator-stripped content.
///
/// Stops early when `visit` breaks and returns the break value; returns
/// `Ok(None)` once the input is exhausted.
pub(crate) fn scan_lines<R, F, T>(mut reader: R, mut visit: F) -> std::io::Result<Option<T>>
where
    R: BufRead,
    F: FnMut(u64, &[u8]) -> ControlFlow<T>,
{
    let mut buf = Vec::with_capacity(LINE_LEN + 2);
    let mut offset = 0u64;

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        if let ControlFlow::Break(v) = visit(offset, strip_terminator(&buf)) {
            return Ok(Some(v));
        }
        offset += n as u64;
    }
}

impl Store {
    pub(crate) fn reader(&self) -> Result<BufReader<File>> {
        Ok(BufReader::new(File::open(self.path())?))
    }

    /// Returns every stored line, terminator stripped, in file order.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] on read failure, [`StoreError::Corrupt`] if a line
    /// is not valid UTF-8.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut raw = Vec::new();
        scan_lines(self.reader()?, |_, line| {
            raw.push(line.to_vec());
            ControlFlow::<()>::Continue(())
        })?;

        let lines = raw
            .into_iter()
            .enumerate()
            .map(|(idx, bytes)| {
                String::from_utf8(bytes).map_err(|e| StoreError::Corrupt {
                    line: idx + 1,
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(count = lines.len(), "listed entries");
        Ok(lines)
    }

    /// Returns every record decoded, paired with its 1-based position.
    ///
    /// # Errors
    ///
    /// [`StoreError::Corrupt`] if any line does not have the fixed layout.
    pub fn records(&self) -> Result<Vec<(usize, Record)>> {
        self.list()?
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                codec::decode(line)
                    .map(|rec| (idx + 1, rec))
                    .map_err(|e| StoreError::Corrupt {
                        line: idx + 1,
                        reason: e.to_string(),
                    })
            })
            .collect()
    }

    /// Returns the line at 1-based `position`, or `None` if out of range.
    pub fn entry(&self, position: usize) -> Result<Option<String>> {
        if position == 0 {
            return Ok(None);
        }
        Ok(self.list()?.into_iter().nth(position - 1))
    }

    /// Returns `true` if some stored line is byte-identical to `line`.
    ///
    /// Linear in the number of records; no index is kept.
    pub fn exists(&self, line: &str) -> Result<bool> {
        let target = line.as_bytes();
        let found = scan_lines(self.reader()?, |_, stored| {
            if stored == target {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?
        .is_some();

        debug!(line, found, "exists");
        Ok(found)
    }
}
