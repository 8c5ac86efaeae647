use std::fmt;

use crate::layout::{
    canon_color, canon_state, canon_zip, COLOR_OFFSET, COLOR_WIDTH, STATE_OFFSET, STATE_WIDTH,
    ZIPCODE_OFFSET, ZIPCODE_WIDTH,
};
use crate::{is_color_segment, CodecError};

/// One of the three fixed-width fields of an encoded line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Color,
    Zipcode,
    State,
}

impl Field {
    /// All fields in on-disk order.
    pub const ALL: [Field; 3] = [Field::Color, Field::Zipcode, Field::State];

    /// Byte offset of the field within an encoded line.
    #[must_use]
    pub const fn offset(self) -> usize {
        match self {
            Field::Color => COLOR_OFFSET,
            Field::Zipcode => ZIPCODE_OFFSET,
            Field::State => STATE_OFFSET,
        }
    }

    /// Width of the field in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Field::Color => COLOR_WIDTH,
            Field::Zipcode => ZIPCODE_WIDTH,
            Field::State => STATE_WIDTH,
        }
    }

    /// Byte range the field occupies in an encoded line.
    #[must_use]
    pub const fn range(self) -> std::ops::Range<usize> {
        self.offset()..self.offset() + self.width()
    }

    /// Checks a replacement value before it is written over this field.
    ///
    /// - color: 1-20 letters or spaces (all spaces gives a blank color)
    /// - zipcode: 1-5 ASCII digits (zero padded afterwards)
    /// - state: exactly 2 ASCII letters, either case
    ///
    /// Surrounding whitespace is ignored for all three.
    pub fn check(self, value: &str) -> Result<(), CodecError> {
        let v = value.trim();
        let ok = match self {
            Field::Color => is_color_segment(value),
            Field::Zipcode => {
                !v.is_empty() && v.len() <= ZIPCODE_WIDTH && v.bytes().all(|b| b.is_ascii_digit())
            }
            Field::State => v.len() == STATE_WIDTH && v.bytes().all(|b| b.is_ascii_alphabetic()),
        };
        if ok {
            Ok(())
        } else {
            Err(CodecError::InvalidField {
                field: self,
                value: value.to_string(),
            })
        }
    }

    /// Produces the exact-width bytes written for `value`.
    ///
    /// The result is always [`Field::width`] bytes long, whatever the input.
    #[must_use]
    pub fn canonicalize(self, value: &str) -> String {
        let v = value.trim();
        match self {
            Field::Color => canon_color(v),
            Field::Zipcode => canon_zip(v),
            Field::State => canon_state(v),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Color => "color",
            Field::Zipcode => "zipcode",
            Field::State => "state",
        };
        f.write_str(name)
    }
}
