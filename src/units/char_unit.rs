// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::{Add, Deref, DerefMut, Sub};

/// Represents a 0-based position measured in decoded Unicode codepoints.
///
/// A `CharIndex` of `k` names the `k`-th codepoint of a text span. Because UTF-8 is a
/// variable-width encoding, converting a `CharIndex` to a [`crate::ByteIndex`] requires a
/// linear scan from a known boundary; see [`crate::TextNav::byte_index_at_char`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub struct CharIndex(pub usize);

/// Creates a new [`CharIndex`] from any type that can be converted into it.
pub fn char_index(arg_char_index: impl Into<CharIndex>) -> CharIndex {
    arg_char_index.into()
}

impl CharIndex {
    #[must_use]
    pub fn as_usize(&self) -> usize { self.0 }
}

impl Deref for CharIndex {
    type Target = usize;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for CharIndex {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl From<usize> for CharIndex {
    fn from(it: usize) -> Self { Self(it) }
}

impl Add<CharLength> for CharIndex {
    type Output = CharIndex;
    fn add(self, rhs: CharLength) -> Self::Output {
        CharIndex(self.0.saturating_add(rhs.0))
    }
}

impl Sub for CharIndex {
    type Output = CharLength;
    /// Distance in codepoints between two positions, saturating at zero.
    fn sub(self, rhs: Self) -> Self::Output { CharLength(self.0.saturating_sub(rhs.0)) }
}

/// Represents a count of decoded Unicode codepoints (1-based).
#[derive(Debug, Copy, Clone, Default, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub struct CharLength(pub usize);

/// Creates a new [`CharLength`] from any type that can be converted into it.
pub fn char_len(arg_char_length: impl Into<CharLength>) -> CharLength {
    arg_char_length.into()
}

impl CharLength {
    /// Spells "the rest of the span" when passed as the length argument of a substring
    /// operation.
    pub const MAX: CharLength = CharLength(usize::MAX);

    #[must_use]
    pub fn as_usize(&self) -> usize { self.0 }

    #[must_use]
    pub fn is_zero(&self) -> bool { self.0 == 0 }
}

impl Deref for CharLength {
    type Target = usize;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for CharLength {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl From<usize> for CharLength {
    fn from(it: usize) -> Self { Self(it) }
}

impl From<CharIndex> for CharLength {
    /// Convert a 0-based index to the 1-based length of the span it terminates.
    fn from(it: CharIndex) -> Self { Self(it.as_usize() + 1) }
}

impl Add for CharLength {
    type Output = CharLength;
    fn add(self, rhs: Self) -> Self::Output { CharLength(self.0.saturating_add(rhs.0)) }
}
