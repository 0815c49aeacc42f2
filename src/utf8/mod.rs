// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Stateless UTF-8 navigation primitives that convert between the three coordinate
//! systems ([`ByteIndex`], [`CharIndex`]/[`CharLength`],
//! [`ColIndex`](crate::ColIndex)/[`ColWidth`]) over
//! a `&str` span.
//!
//! Codepoint display width is delegated to the [`unicode-width`] crate. All conversions
//! are O(distance) linear scans from the start of the span - UTF-8 is variable-width, and
//! this crate deliberately keeps no per-string offset cache.
//!
//! [`unicode-width`]: https://docs.rs/unicode-width

use unicode_width::UnicodeWidthChar;

use crate::{ByteIndex, ByteLength, CharIndex, CharLength, ColWidth, byte_index,
            byte_len, char_len, width};

/// Display width of a single codepoint.
///
/// Control codepoints (for which `unicode-width` reports no width) count as one column,
/// so that every codepoint advances the column cursor deterministically.
#[must_use]
pub fn codepoint_width(codepoint: char) -> ColWidth {
    width(UnicodeWidthChar::width(codepoint).unwrap_or(1))
}

/// Encoded size of a single codepoint in UTF-8 bytes (1 to 4).
#[must_use]
pub fn codepoint_size(codepoint: char) -> ByteLength { byte_len(codepoint.len_utf8()) }

/// Byte position of the boundary after `count` codepoints, clamped to the end of the
/// span.
#[must_use]
pub fn advance_by_chars(span: &str, count: CharLength) -> ByteIndex {
    let mut remaining = count.as_usize();
    for (boundary, _) in span.char_indices() {
        if remaining == 0 {
            return byte_index(boundary);
        }
        remaining -= 1;
    }
    byte_index(span.len())
}

/// Byte position reached by advancing `count` display columns into the span, clamped to
/// the end.
///
/// A wide codepoint that straddles the requested column is consumed whole - the result
/// is always a codepoint boundary, never the middle of one.
#[must_use]
pub fn advance_by_cols(span: &str, count: ColWidth) -> ByteIndex {
    let mut remaining = count.as_usize();
    let mut boundary = 0;
    for codepoint in span.chars() {
        if remaining == 0 {
            break;
        }
        // Saturates when a wide codepoint overshoots the target column.
        remaining = remaining.saturating_sub(codepoint_width(codepoint).as_usize());
        boundary += codepoint.len_utf8();
    }
    byte_index(boundary)
}

/// Number of codepoints in the span.
#[must_use]
pub fn char_distance(span: &str) -> CharLength { char_len(span.chars().count()) }

/// Total display width of the span.
#[must_use]
pub fn col_distance(span: &str) -> ColWidth {
    span.chars()
        .fold(width(0), |acc, codepoint| acc + codepoint_width(codepoint))
}

/// Codepoint at the given character position, or `None` past the end of the span.
#[must_use]
pub fn codepoint_at(span: &str, position: CharIndex) -> Option<char> {
    span.chars().nth(position.as_usize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codepoint_width() {
        assert_eq!(codepoint_width('a'), width(1));
        assert_eq!(codepoint_width('世'), width(2));
        // Control codepoints deterministically count as one column.
        assert_eq!(codepoint_width('\u{1}'), width(1));
    }

    #[test]
    fn test_codepoint_size() {
        assert_eq!(codepoint_size('a'), byte_len(1));
        assert_eq!(codepoint_size('é'), byte_len(2));
        assert_eq!(codepoint_size('世'), byte_len(3));
        assert_eq!(codepoint_size('🦀'), byte_len(4));
    }

    #[test]
    fn test_advance_by_chars_ascii() {
        let span = "hello";
        assert_eq!(advance_by_chars(span, char_len(0)), byte_index(0));
        assert_eq!(advance_by_chars(span, char_len(3)), byte_index(3));
        assert_eq!(advance_by_chars(span, char_len(5)), byte_index(5));
        // Clamped to the end.
        assert_eq!(advance_by_chars(span, char_len(99)), byte_index(5));
    }

    #[test]
    fn test_advance_by_chars_multibyte() {
        let span = "a世b"; // 1 + 3 + 1 bytes.
        assert_eq!(advance_by_chars(span, char_len(1)), byte_index(1));
        assert_eq!(advance_by_chars(span, char_len(2)), byte_index(4));
        assert_eq!(advance_by_chars(span, char_len(3)), byte_index(5));
    }

    #[test]
    fn test_advance_by_cols_wide() {
        let span = "a世b"; // Columns: 1 + 2 + 1.
        assert_eq!(advance_by_cols(span, width(0)), byte_index(0));
        assert_eq!(advance_by_cols(span, width(1)), byte_index(1));
        // Column 2 lands in the middle of the wide codepoint; the whole codepoint is
        // consumed so the result stays on a boundary.
        assert_eq!(advance_by_cols(span, width(2)), byte_index(4));
        assert_eq!(advance_by_cols(span, width(3)), byte_index(4));
        assert_eq!(advance_by_cols(span, width(4)), byte_index(5));
        assert_eq!(advance_by_cols(span, width(99)), byte_index(5));
    }

    #[test]
    fn test_distances() {
        assert_eq!(char_distance(""), char_len(0));
        assert_eq!(char_distance("a世b"), char_len(3));
        assert_eq!(col_distance("a世b"), width(4));
        assert_eq!(col_distance("hello"), width(5));
    }

    #[test]
    fn test_codepoint_at() {
        let span = "a世b";
        assert_eq!(codepoint_at(span, crate::char_index(0)), Some('a'));
        assert_eq!(codepoint_at(span, crate::char_index(1)), Some('世'));
        assert_eq!(codepoint_at(span, crate::char_index(2)), Some('b'));
        assert_eq!(codepoint_at(span, crate::char_index(3)), None);
    }
}
