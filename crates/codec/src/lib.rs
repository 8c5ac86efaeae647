//! # Codec - Fixed-Width Record Encoding
//!
//! Turns user-supplied text such as `"Red, 12345, CA"` into the fixed-width
//! line stored by the `store` crate, and back.
//!
//! ## Input grammar
//!
//! ```text
//! [ws] color{1..20 letters or spaces} [ws] , [ws] zipcode{5 digits} [ws] , [ws] state{2 A-Z} [ws]
//! ```
//!
//! ## Encoded line (17 bytes, `\n` terminated on disk)
//!
//! ```text
//! CCCCCCCC,ZZZZZ,SS
//! 0       8 9   14 15
//! ```
//!
//! The color is left-justified and truncated to 8 bytes; zipcode and state
//! already have their final width once the input passed [`validate`].
//!
//! ## Example
//!
//! ```rust
//! let line = codec::encode("Red, 12345, CA");
//! assert_eq!(line, "Red     ,12345,CA");
//!
//! let rec = codec::decode(&line).unwrap();
//! assert_eq!(rec.zipcode, "12345");
//! ```

mod field;
mod layout;

use std::fmt;

use thiserror::Error;

pub use field::Field;
pub use layout::{
    canon_color, canon_state, canon_zip, left_justify_truncate, zero_pad_left_truncate,
    COLOR_OFFSET, COLOR_WIDTH, DELIMITER, LINE_LEN, MAX_COLOR_INPUT, STATE_OFFSET, STATE_WIDTH,
    ZIPCODE_OFFSET, ZIPCODE_WIDTH,
};

/// Errors produced while validating, encoding or decoding records.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Raw input does not match `color, zipcode, state`.
    #[error("invalid format: {0:?}")]
    InvalidFormat(String),

    /// A replacement value is not acceptable for its field.
    #[error("invalid {field}: {value:?}")]
    InvalidField {
        /// The field being updated.
        field: Field,
        /// The rejected value, as given.
        value: String,
    },

    /// A stored line does not have the fixed 17-byte layout.
    #[error("malformed line: {0:?}")]
    Malformed(String),
}

/// A decoded record. Fields hold their stored (padded) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 8 bytes, space padded.
    pub color: String,
    /// 5 digits.
    pub zipcode: String,
    /// 2 uppercase letters.
    pub state: String,
}

impl Record {
    /// Returns the stored value of `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Color => &self.color,
            Field::Zipcode => &self.zipcode,
            Field::State => &self.state,
        }
    }

    /// Renders the record as an encoded line (no terminator).
    #[must_use]
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.color, self.zipcode, self.state)
    }
}

pub(crate) fn is_color_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' '
}

/// `[ws] [A-Za-z ]{1,20} [ws]`
///
/// Leading and trailing whitespace may be absorbed either by the optional
/// whitespace or by the color itself, so a segment of spaces only still
/// carries a (blank) color.
pub(crate) fn is_color_segment(seg: &str) -> bool {
    let core = seg.trim();
    if core.is_empty() {
        return seg.contains(' ');
    }
    core.len() <= MAX_COLOR_INPUT && core.chars().all(is_color_char)
}

/// `[ws] [0-9]{5} [ws]`
fn is_zip_segment(seg: &str) -> bool {
    let core = seg.trim();
    core.len() == ZIPCODE_WIDTH && core.bytes().all(|b| b.is_ascii_digit())
}

/// `[ws] [A-Z]{2} [ws]`
fn is_state_segment(seg: &str) -> bool {
    let core = seg.trim();
    core.len() == STATE_WIDTH && core.bytes().all(|b| b.is_ascii_uppercase())
}

/// Returns `true` if `raw` is a well-formed `color, zipcode, state` entry.
///
/// Wrong digit counts, lowercase states, extra or missing fields are all
/// rejected. This is the only gate before a record reaches the store.
#[must_use]
pub fn validate(raw: &str) -> bool {
    let mut parts = raw.split(char::from(DELIMITER));
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(color), Some(zip), Some(state), None) => {
            is_color_segment(color) && is_zip_segment(zip) && is_state_segment(state)
        }
        _ => false,
    }
}

/// Splits raw input into a record without checking it.
fn split_fields(raw: &str) -> Record {
    let mut parts = raw.split(char::from(DELIMITER)).map(str::trim);
    let color = parts.next().unwrap_or("");
    let zipcode = parts.next().unwrap_or("");
    let state = parts.next().unwrap_or("");
    Record {
        color: canon_color(color),
        zipcode: zipcode.to_string(),
        state: state.to_string(),
    }
}

/// Encodes raw input into its fixed-width line.
///
/// Callers must run [`validate`] first: zipcode and state are passed through
/// as given, so only validated input is guaranteed to yield [`LINE_LEN`]
/// bytes. Use [`parse`] for a checked conversion.
#[must_use]
pub fn encode(raw: &str) -> String {
    split_fields(raw).encode()
}

/// Validates `raw` and returns its canonical record.
///
/// # Errors
///
/// [`CodecError::InvalidFormat`] if `raw` fails [`validate`].
pub fn parse(raw: &str) -> Result<Record, CodecError> {
    if !validate(raw) {
        return Err(CodecError::InvalidFormat(raw.to_string()));
    }
    Ok(split_fields(raw))
}

/// Decodes an encoded line by position.
///
/// Fields are sliced at their fixed offsets rather than split on commas, so
/// the padded color is returned untouched.
///
/// # Errors
///
/// [`CodecError::Malformed`] if `line` is not [`LINE_LEN`] bytes, has no
/// delimiter at the expected positions, or contains a control byte (a stray
/// `\n` or `\r` would split it into several lines on disk).
pub fn decode(line: &str) -> Result<Record, CodecError> {
    let bytes = line.as_bytes();
    if bytes.len() != LINE_LEN
        || bytes[ZIPCODE_OFFSET - 1] != DELIMITER
        || bytes[STATE_OFFSET - 1] != DELIMITER
        || bytes.iter().any(u8::is_ascii_control)
    {
        return Err(CodecError::Malformed(line.to_string()));
    }

    let slice = |field: Field| {
        line.get(field.range())
            .map(str::to_string)
            .ok_or_else(|| CodecError::Malformed(line.to_string()))
    };

    Ok(Record {
        color: slice(Field::Color)?,
        zipcode: slice(Field::Zipcode)?,
        state: slice(Field::State)?,
    })
}
