/// In-place field updates.
///
/// An update never rewrites the file. It finds the byte offset of the first
/// line equal to the target, seeks to `line_offset + field.offset()` and
/// overwrites exactly `field.width()` bytes. Because every canonicalized value
/// has the field's exact width, the line length and every byte outside the
/// field window are left as they were.
use std::fs::OpenOptions;
use std::io::{BufReader, Seek, SeekFrom, Write};
use std::ops::ControlFlow;

use codec::Field;
use tracing::{debug, warn};

use crate::read::scan_lines;
use crate::{Result, Store, StoreError};

impl Store {
    /// Overwrites `field` of the first line equal to `target` with the
    /// canonical form of `new_value`, returning the patched line.
    ///
    /// Later lines identical to `target` are left untouched.
    ///
    /// # Errors
    ///
    /// - [`StoreError::InvalidFormat`] if `target` is not an encoded line or
    ///   `new_value` is not acceptable for `field`. The file is not opened.
    /// - [`StoreError::NotFound`] if no line equals `target`. Nothing is written.
    /// - [`StoreError::Io`] on file failure.
    pub fn update_field(&self, target: &str, field: Field, new_value: &str) -> Result<String> {
        codec::decode(target)?;
        field.check(new_value)?;

        let replacement = field.canonicalize(new_value);
        debug_assert_eq!(replacement.len(), field.width());

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(self.path())?;

        let wanted = target.as_bytes();
        let line_offset = scan_lines(BufReader::new(&file), |offset, line| {
            if line == wanted {
                ControlFlow::Break(offset)
            } else {
                ControlFlow::Continue(())
            }
        })?;

        let Some(line_offset) = line_offset else {
            warn!(line = target, %field, "update target not found");
            return Err(StoreError::NotFound(target.to_string()));
        };

        let mut handle = &file;
        handle.seek(SeekFrom::Start(line_offset + field.offset() as u64))?;
        handle.write_all(replacement.as_bytes())?;
        handle.flush()?;
        if self.config.sync {
            file.sync_all()?;
        }

        let mut patched = target.to_string();
        patched.replace_range(field.range(), &replacement);

        debug!(
            offset = line_offset,
            %field,
            before = target,
            after = %patched,
            "updated entry in place"
        );
        Ok(patched)
    }

    /// Replaces the color of `target` (left-justified to 8 bytes).
    pub fn update_color(&self, target: &str, color: &str) -> Result<String> {
        self.update_field(target, Field::Color, color)
    }

    /// Replaces the zipcode of `target` (zero-padded to 5 digits).
    pub fn update_zipcode(&self, target: &str, zipcode: &str) -> Result<String> {
        self.update_field(target, Field::Zipcode, zipcode)
    }

    /// Replaces the state of `target` (uppercased, 2 letters).
    pub fn update_state(&self, target: &str, state: &str) -> Result<String> {
        self.update_field(target, Field::State, state)
    }
}
