// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::{Add, AddAssign, Deref, DerefMut, Sub};

/// Represents a 0-based position measured in raw encoded bytes inside the payload of a
/// [`crate::TextOwned`] or [`crate::TextRef`].
///
/// Pairs with [`ByteLength`], which is the 1-based measurement of the same unit. Keeping
/// byte positions in their own type prevents them from being mixed up with character or
/// display column positions, which use different units for the same underlying text.
#[derive(Debug, Copy, Clone, Default, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub struct ByteIndex(pub usize);

/// Creates a new [`ByteIndex`] from any type that can be converted into it.
pub fn byte_index(arg_byte_index: impl Into<ByteIndex>) -> ByteIndex {
    arg_byte_index.into()
}

impl ByteIndex {
    #[must_use]
    pub fn as_usize(&self) -> usize { self.0 }
}

impl Deref for ByteIndex {
    type Target = usize;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for ByteIndex {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl From<usize> for ByteIndex {
    fn from(it: usize) -> Self { Self(it) }
}

impl Add<ByteLength> for ByteIndex {
    type Output = ByteIndex;
    fn add(self, rhs: ByteLength) -> Self::Output {
        ByteIndex(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign<ByteLength> for ByteIndex {
    fn add_assign(&mut self, rhs: ByteLength) { self.0 = self.0.saturating_add(rhs.0); }
}

impl Sub for ByteIndex {
    type Output = ByteLength;
    /// Distance in bytes between two positions, saturating at zero.
    fn sub(self, rhs: Self) -> Self::Output { ByteLength(self.0.saturating_sub(rhs.0)) }
}

/// Represents a byte length measurement (1-based).
///
/// A `ByteLength` is the number of bytes in a buffer or text span. Unlike [`ByteIndex`],
/// which is 0-based (a position), `ByteLength` is 1-based (a size/count).
#[derive(Debug, Copy, Clone, Default, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub struct ByteLength(pub usize);

/// Creates a new [`ByteLength`] from any type that can be converted into it.
pub fn byte_len(arg_byte_length: impl Into<ByteLength>) -> ByteLength {
    arg_byte_length.into()
}

impl ByteLength {
    /// Spells "the rest of the span" when passed as the length argument of a substring
    /// operation; any length that overflows the remaining content clamps to it.
    pub const MAX: ByteLength = ByteLength(usize::MAX);

    #[must_use]
    pub fn as_usize(&self) -> usize { self.0 }

    #[must_use]
    pub fn is_zero(&self) -> bool { self.0 == 0 }

    /// Convert this length to the corresponding 0-based index of the last valid
    /// position, saturating at 0 for an empty span.
    #[must_use]
    pub fn convert_to_index(&self) -> ByteIndex {
        ByteIndex(self.0.saturating_sub(1))
    }
}

impl Deref for ByteLength {
    type Target = usize;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for ByteLength {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl From<usize> for ByteLength {
    fn from(it: usize) -> Self { Self(it) }
}

impl From<ByteIndex> for ByteLength {
    /// Convert a 0-based index to the 1-based length of the span it terminates.
    fn from(it: ByteIndex) -> Self { Self(it.as_usize() + 1) }
}

impl Add for ByteLength {
    type Output = ByteLength;
    fn add(self, rhs: Self) -> Self::Output { ByteLength(self.0.saturating_add(rhs.0)) }
}
