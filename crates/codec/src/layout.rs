//! Fixed-width line layout constants and width helpers.
//!
//! ```text
//! offset:  0        8 9    14 15 17
//!          CCCCCCCC , ZZZZZ , SS
//! ```
//!
//! Every offset is derived from the widths above it, so a width change only
//! has to be made in one place.

/// Byte that separates the fields of an encoded line.
pub const DELIMITER: u8 = b',';

/// Start of the color field.
pub const COLOR_OFFSET: usize = 0;

/// Width of the stored color field in bytes.
pub const COLOR_WIDTH: usize = 8;

/// Start of the zipcode field: color + one delimiter.
pub const ZIPCODE_OFFSET: usize = COLOR_OFFSET + COLOR_WIDTH + 1;

/// Width of the zipcode field in bytes.
pub const ZIPCODE_WIDTH: usize = 5;

/// Start of the state field: zipcode + one delimiter.
pub const STATE_OFFSET: usize = ZIPCODE_OFFSET + ZIPCODE_WIDTH + 1;

/// Width of the state field in bytes.
pub const STATE_WIDTH: usize = 2;

/// Total length of an encoded line, terminator excluded.
pub const LINE_LEN: usize = STATE_OFFSET + STATE_WIDTH;

/// Longest color accepted at input time (before truncation to [`COLOR_WIDTH`]).
pub const MAX_COLOR_INPUT: usize = 20;

/// Keeps the longest prefix of `s` that fits in `width` bytes without
/// splitting a character.
fn prefix_within(s: &str, width: usize) -> &str {
    let mut end = 0;
    for (idx, c) in s.char_indices() {
        if idx + c.len_utf8() > width {
            break;
        }
        end = idx + c.len_utf8();
    }
    &s[..end]
}

/// Left-justifies `s` in exactly `width` bytes: truncates on a char boundary,
/// then pads with spaces.
pub fn left_justify_truncate(s: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    out.push_str(prefix_within(s, width));
    while out.len() < width {
        out.push(' ');
    }
    out
}

/// Right-justifies the trimmed `s` in exactly `width` bytes using leading
/// zeros. Longer input keeps its leading characters.
pub fn zero_pad_left_truncate(s: &str, width: usize) -> String {
    let kept = prefix_within(s.trim(), width).trim_end();
    let mut out = String::with_capacity(width);
    for _ in kept.len()..width {
        out.push('0');
    }
    out.push_str(kept);
    out
}

/// Canonical stored form of a color: 8 bytes, space padded.
pub fn canon_color(s: &str) -> String {
    left_justify_truncate(s, COLOR_WIDTH)
}

/// Canonical stored form of a zipcode: 5 bytes, zero padded on the left.
pub fn canon_zip(s: &str) -> String {
    zero_pad_left_truncate(s, ZIPCODE_WIDTH)
}

/// Canonical stored form of a state: ASCII-uppercased, 2 bytes.
pub fn canon_state(s: &str) -> String {
    left_justify_truncate(&s.to_ascii_uppercase(), STATE_WIDTH)
}
