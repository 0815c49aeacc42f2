// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`TextRef`] - the non-owning view over a contiguous UTF-8 byte range.

use std::{fmt::{Debug, Display, Formatter, Result as FmtResult},
          hash::{Hash, Hasher},
          ops::Add};

use crate::{ByteLength, TextData, TextNav, TextOwned, ZeroTerminated};

/// Convenience constructor for [`TextRef`].
pub fn text_ref<'a>(arg_from: impl Into<TextRef<'a>>) -> TextRef<'a> { arg_from.into() }

/// Non-owning view over a contiguous UTF-8 byte range: a (pointer, length) pair,
/// trivially copyable.
///
/// Validity is tied to the lifetime of whatever owns the bytes - a [`TextOwned`], a
/// `String`, or a static literal - and the borrow checker enforces that a view never
/// outlives its source. Construction is `const`, so views over literals work in
/// constant contexts.
///
/// Deliberately *not* constructible from a bare integer or codepoint value: a decoded
/// codepoint must go through [`TextOwned::from(char)`] to be encoded, which prevents
/// "number formatted as one raw byte" bugs. Equality is byte-for-byte content
/// comparison, never pointer identity; ordering is lexicographic by byte value.
///
/// [`TextOwned::from(char)`]: TextOwned#impl-From<char>-for-TextOwned
#[derive(Copy, Clone)]
pub struct TextRef<'a> {
    span: &'a str,
}

impl<'a> TextRef<'a> {
    /// The empty view.
    pub const EMPTY: TextRef<'static> = TextRef::new("");

    #[must_use]
    pub const fn new(span: &'a str) -> Self { Self { span } }

    #[must_use]
    pub const fn as_str(&self) -> &'a str { self.span }

    #[must_use]
    pub const fn as_bytes(&self) -> &'a [u8] { self.span.as_bytes() }

    /// Produce an owning copy of the viewed bytes.
    #[must_use]
    pub fn to_text(&self) -> TextOwned { TextOwned::from(self.span) }

    /// NUL-terminated adapter: one owned, NUL-terminated copy of the viewed bytes.
    ///
    /// An arbitrary view carries no provenance past its end, so it cannot borrow a
    /// terminator that may already sit there; borrow-without-copy is offered where it
    /// is provably sound, on [`TextOwned::as_zstr`].
    #[must_use]
    pub fn to_zstr(&self) -> ZeroTerminated<'a> { ZeroTerminated::owned_copy(self.span) }
}

impl Default for TextRef<'_> {
    fn default() -> Self { Self::EMPTY }
}

// ╭─────────────────────────────────────────────────────────────────────────────╮
// │                              Conversion traits                              │
// ╰─────────────────────────────────────────────────────────────────────────────╯

impl<'a> From<&'a str> for TextRef<'a> {
    fn from(span: &'a str) -> Self { Self::new(span) }
}

impl<'a> From<&'a TextOwned> for TextRef<'a> {
    /// Borrows the owner's current buffer. Mutating the owner afterwards requires
    /// dropping this view first; re-derive it to observe the mutation.
    fn from(owner: &'a TextOwned) -> Self { Self::new(owner.as_str()) }
}

impl<'a> From<&'a String> for TextRef<'a> {
    fn from(value: &'a String) -> Self { Self::new(value.as_str()) }
}

// ╭─────────────────────────────────────────────────────────────────────────────╮
// │                      Navigation / comparison / display                      │
// ╰─────────────────────────────────────────────────────────────────────────────╯

impl TextData for TextRef<'_> {
    fn text_data(&self) -> &str { self.span }

    fn byte_size(&self) -> ByteLength { ByteLength(self.span.len()) }
}

impl TextNav for TextRef<'_> {}

impl AsRef<str> for TextRef<'_> {
    fn as_ref(&self) -> &str { self.span }
}

impl PartialEq for TextRef<'_> {
    /// Byte-for-byte content comparison (not pointer identity).
    fn eq(&self, other: &Self) -> bool { self.span == other.span }
}

impl Eq for TextRef<'_> {}

impl PartialEq<&str> for TextRef<'_> {
    fn eq(&self, other: &&str) -> bool { self.span == *other }
}

impl PartialEq<TextOwned> for TextRef<'_> {
    fn eq(&self, other: &TextOwned) -> bool { self.span == other.as_str() }
}

impl PartialOrd for TextRef<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextRef<'_> {
    /// Lexicographic by byte value.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for TextRef<'_> {
    /// Hashes identically to a [`TextOwned`] with the same content.
    fn hash<H: Hasher>(&self, state: &mut H) { self.span.hash(state); }
}

impl Add for TextRef<'_> {
    type Output = TextOwned;

    /// Concatenation produces an owning string sized for both operands up front.
    fn add(self, rhs: Self) -> Self::Output {
        let mut it = TextOwned::new();
        it.reserve(ByteLength(self.span.len() + rhs.span.len()));
        it.push_str(self.span);
        it.push_str(rhs.span);
        it
    }
}

impl Debug for TextRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "TextRef({:?})", self.span)
    }
}

impl Display for TextRef<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { write!(f, "{}", self.span) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{byte_index, byte_len};
    use pretty_assertions::assert_eq;

    // Views over literals are usable in constant contexts.
    const GREETING: TextRef<'static> = TextRef::new("hello");

    #[test]
    fn test_const_construction() {
        assert_eq!(GREETING.as_str(), "hello");
        assert_eq!(TextRef::EMPTY.as_str(), "");
    }

    #[test]
    fn test_view_is_copy() {
        let view = TextRef::new("copied");
        let duplicate = view;
        // Both copies usable: a view is a trivial (pointer, length) pair.
        assert_eq!(view, duplicate);
        assert_eq!(view.as_str().as_ptr(), duplicate.as_str().as_ptr());
    }

    #[test]
    fn test_equality_is_content_not_identity() {
        let left = String::from("same");
        let right = String::from("same");
        let view_left = TextRef::from(&left);
        let view_right = TextRef::from(&right);

        assert_ne!(view_left.as_str().as_ptr(), view_right.as_str().as_ptr());
        assert_eq!(view_left, view_right);
    }

    #[test]
    fn test_ordering_is_bytewise_lexicographic() {
        assert!(TextRef::new("ab") < TextRef::new("b"));
        assert!(TextRef::new("") < TextRef::new("a"));
        assert!(TextRef::new("a") <= TextRef::new("a"));
    }

    #[test]
    fn test_cross_type_equality() {
        let owned = TextOwned::from("both");
        let view = TextRef::from(&owned);
        assert_eq!(view, owned);
        assert_eq!(owned, view);
        assert_eq!(view, "both");
    }

    #[test]
    fn test_to_text_is_independent_copy() {
        let source = TextOwned::from("original");
        let copy = TextRef::from(&source).to_text();
        drop(source);
        assert_eq!(copy.as_str(), "original");
    }

    #[test]
    fn test_view_borrows_owner_storage() {
        let owned = TextOwned::from("zero copy");
        let view = TextRef::from(&owned);
        assert_eq!(view.as_str().as_ptr(), owned.as_str().as_ptr());
        assert_eq!(view.byte_len(), byte_len(9));
    }

    #[test]
    fn test_substr_of_view_points_into_same_storage() {
        let view = TextRef::new("a window");
        let sub = view.substr_bytes(byte_index(2), byte_len(6));
        assert_eq!(sub.as_str(), "window");
        assert_eq!(sub.as_str().as_ptr(), view.as_str()[2..].as_ptr());
    }

    #[test]
    fn test_concat_operator() {
        let joined = TextRef::new("left ") + TextRef::new("right");
        assert_eq!(joined.as_str(), "left right");
        assert!(joined.capacity() >= byte_len(10));
    }

    #[test]
    fn test_zstr_from_view_copies() {
        let view = TextRef::new("copy me");
        let zstr = view.to_zstr();
        assert!(!zstr.is_borrowed());
        assert_eq!(zstr.as_bytes_with_nul(), b"copy me\0");
    }

    #[test]
    fn test_debug_and_display() {
        let view = TextRef::new("shown");
        assert_eq!(format!("{view}"), "shown");
        assert_eq!(format!("{view:?}"), "TextRef(\"shown\")");
    }
}
