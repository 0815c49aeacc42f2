// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared UTF-8 navigation surface for [`crate::TextOwned`] and [`crate::TextRef`].
//!
//! Two traits split the responsibilities, mirroring the data/operations separation used
//! throughout this crate:
//!
//! - [`TextData`] is the minimal capability: "give me the span". It does not care about
//!   the ownership model, which is exactly what lets one set of navigation functions
//!   serve both the owning and the borrowed type.
//! - [`TextNav`] is the public operations trait. Every method has a default body that
//!   delegates to the generic `nav_*` free functions in this module, so the navigation
//!   logic exists once. Dispatch is static; nothing here is object-safe on purpose.
//!
//! All coordinate conversions are O(distance): UTF-8 is variable-width and this crate
//! keeps no per-string offset cache.

use std::cmp;

use crate::{ByteIndex, ByteLength, CharIndex, CharLength, ColIndex, ColWidth, TextRef,
            byte_len, utf8};

/// Minimal capability contract for text navigation: access to the underlying span and
/// its byte length.
pub trait TextData {
    /// The underlying UTF-8 span.
    fn text_data(&self) -> &str;

    /// Byte length of the span.
    fn byte_size(&self) -> ByteLength { byte_len(self.text_data().len()) }
}

// ╭─────────────────────────────────────────────────────────────────────────────╮
// │                     Generic navigation free functions                       │
// ╰─────────────────────────────────────────────────────────────────────────────╯

/// Number of codepoints across the whole span.
pub fn nav_char_length<T: TextData + ?Sized>(data: &T) -> CharLength {
    utf8::char_distance(data.text_data())
}

/// Number of display columns across the whole span.
pub fn nav_column_length<T: TextData + ?Sized>(data: &T) -> ColWidth {
    utf8::col_distance(data.text_data())
}

/// Byte position of the boundary before the codepoint at `position`, clamped to the
/// end of the span.
pub fn nav_byte_index_at_char<T: TextData + ?Sized>(
    data: &T,
    position: CharIndex,
) -> ByteIndex {
    utf8::advance_by_chars(data.text_data(), CharLength(position.as_usize()))
}

/// Byte position reached by advancing `position` display columns, clamped to the end
/// of the span.
pub fn nav_byte_index_at_col<T: TextData + ?Sized>(
    data: &T,
    position: ColIndex,
) -> ByteIndex {
    utf8::advance_by_cols(data.text_data(), ColWidth(position.as_usize()))
}

/// Number of codepoints in the first `up_to` bytes of the span.
///
/// `up_to` must lie on a codepoint boundary (all byte positions handed out by this
/// crate do).
pub fn nav_char_count_to<T: TextData + ?Sized>(data: &T, up_to: ByteIndex) -> CharLength {
    let span = data.text_data();
    debug_assert!(span.is_char_boundary(cmp::min(up_to.as_usize(), span.len())));
    utf8::char_distance(&span[..cmp::min(up_to.as_usize(), span.len())])
}

/// Display width of the first `up_to` bytes of the span. Same boundary contract as
/// [`nav_char_count_to`].
pub fn nav_column_count_to<T: TextData + ?Sized>(data: &T, up_to: ByteIndex) -> ColWidth {
    let span = data.text_data();
    debug_assert!(span.is_char_boundary(cmp::min(up_to.as_usize(), span.len())));
    utf8::col_distance(&span[..cmp::min(up_to.as_usize(), span.len())])
}

/// Substring by byte offset and byte count. The start offset must be within
/// `[0, byte_size]` and on a codepoint boundary. An oversized length clamps to the rest
/// of the span, and a length whose end lands inside a multi-byte codepoint clamps back
/// to the previous codepoint boundary - the result is always a whole-codepoint view.
pub fn nav_substr_bytes<T: TextData + ?Sized>(
    data: &T,
    from: ByteIndex,
    length: ByteLength,
) -> TextRef<'_> {
    let span = data.text_data();
    debug_assert!(from.as_usize() <= span.len());
    let start = cmp::min(from.as_usize(), span.len());
    let mut end = start + cmp::min(length.as_usize(), span.len() - start);
    while !span.is_char_boundary(end) {
        end -= 1;
    }
    TextRef::new(&span[start..end])
}

/// Substring by character offset and character count. Never splits a multi-byte
/// codepoint; an oversized length clamps to the rest of the span.
pub fn nav_substr_chars<T: TextData + ?Sized>(
    data: &T,
    from: CharIndex,
    length: CharLength,
) -> TextRef<'_> {
    let span = data.text_data();
    debug_assert!(from.as_usize() <= utf8::char_distance(span).as_usize());
    let start = utf8::advance_by_chars(span, CharLength(from.as_usize())).as_usize();
    let end = start + utf8::advance_by_chars(&span[start..], length).as_usize();
    TextRef::new(&span[start..end])
}

/// Substring by column offset and column width. Wide codepoints straddling either edge
/// are consumed whole (the result is always codepoint-aligned); an oversized width
/// clamps to the rest of the span.
pub fn nav_substr_cols<T: TextData + ?Sized>(
    data: &T,
    from: ColIndex,
    length: ColWidth,
) -> TextRef<'_> {
    let span = data.text_data();
    debug_assert!(from.as_usize() <= utf8::col_distance(span).as_usize());
    let start = utf8::advance_by_cols(span, ColWidth(from.as_usize())).as_usize();
    let end = start + utf8::advance_by_cols(&span[start..], length).as_usize();
    TextRef::new(&span[start..end])
}

// ╭─────────────────────────────────────────────────────────────────────────────╮
// │                          Public navigation trait                            │
// ╰─────────────────────────────────────────────────────────────────────────────╯

/// UTF-8-aware navigation operations, exposed identically by [`crate::TextOwned`] and
/// [`crate::TextRef`].
///
/// Substring results are [`TextRef`] views into the source storage - no copying - and
/// their validity is bounded by the source's lifetime like any other borrow.
pub trait TextNav: TextData {
    /// Byte length of the span (same as [`TextData::byte_size`], re-exposed here so
    /// call sites only need one trait in scope).
    fn byte_len(&self) -> ByteLength { self.byte_size() }

    fn is_empty(&self) -> bool { self.byte_size().is_zero() }

    /// Raw byte at the given byte offset. Offsets past the end are a contract
    /// violation.
    fn byte_at(&self, arg_position: impl Into<ByteIndex>) -> u8 {
        let position = arg_position.into();
        debug_assert!(position.as_usize() < self.text_data().len());
        self.text_data().as_bytes()[position.as_usize()]
    }

    /// Codepoint at the given character offset, or `None` past the end. O(offset).
    fn char_at(&self, arg_position: impl Into<CharIndex>) -> Option<char> {
        utf8::codepoint_at(self.text_data(), arg_position.into())
    }

    /// Count of codepoints across the whole span. O(length).
    fn char_length(&self) -> CharLength { nav_char_length(self) }

    /// Count of display columns across the whole span. O(length).
    fn column_length(&self) -> ColWidth { nav_column_length(self) }

    fn byte_index_at_char(&self, arg_position: impl Into<CharIndex>) -> ByteIndex {
        nav_byte_index_at_char(self, arg_position.into())
    }

    fn byte_index_at_col(&self, arg_position: impl Into<ColIndex>) -> ByteIndex {
        nav_byte_index_at_col(self, arg_position.into())
    }

    fn char_count_to(&self, arg_up_to: impl Into<ByteIndex>) -> CharLength {
        nav_char_count_to(self, arg_up_to.into())
    }

    fn column_count_to(&self, arg_up_to: impl Into<ByteIndex>) -> ColWidth {
        nav_column_count_to(self, arg_up_to.into())
    }

    /// Substring by byte offset/count; pass [`ByteLength::MAX`] for "rest of span".
    fn substr_bytes(
        &self,
        arg_from: impl Into<ByteIndex>,
        arg_length: impl Into<ByteLength>,
    ) -> TextRef<'_> {
        nav_substr_bytes(self, arg_from.into(), arg_length.into())
    }

    /// Substring by character offset/count; pass [`CharLength::MAX`] for "rest of
    /// span".
    fn substr_chars(
        &self,
        arg_from: impl Into<CharIndex>,
        arg_length: impl Into<CharLength>,
    ) -> TextRef<'_> {
        nav_substr_chars(self, arg_from.into(), arg_length.into())
    }

    /// Substring by column offset/width; pass [`ColWidth::MAX`] for "rest of span".
    fn substr_cols(
        &self,
        arg_from: impl Into<ColIndex>,
        arg_length: impl Into<ColWidth>,
    ) -> TextRef<'_> {
        nav_substr_cols(self, arg_from.into(), arg_length.into())
    }

    /// Forward/reverse byte iteration.
    fn byte_iter(&self) -> impl DoubleEndedIterator<Item = u8> + '_ {
        self.text_data().bytes()
    }

    /// Forward/reverse codepoint iteration.
    fn char_iter(&self) -> impl DoubleEndedIterator<Item = char> + '_ {
        self.text_data().chars()
    }
}
