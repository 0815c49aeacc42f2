// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::{Add, Deref, DerefMut, Sub, SubAssign};

/// Represents a 0-based position measured in display column units.
///
/// Wide codepoints (eg: CJK ideographs, many emoji) occupy more than one column, so a
/// `ColIndex` advances faster than a [`crate::CharIndex`] over such text. Column
/// positions are what terminal-style rendering cares about.
#[derive(Debug, Copy, Clone, Default, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub struct ColIndex(pub usize);

/// Creates a new [`ColIndex`] from any type that can be converted into it.
pub fn col(arg_col_index: impl Into<ColIndex>) -> ColIndex { arg_col_index.into() }

impl ColIndex {
    #[must_use]
    pub fn as_usize(&self) -> usize { self.0 }
}

impl Deref for ColIndex {
    type Target = usize;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for ColIndex {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl From<usize> for ColIndex {
    fn from(it: usize) -> Self { Self(it) }
}

impl Add<ColWidth> for ColIndex {
    type Output = ColIndex;
    fn add(self, rhs: ColWidth) -> Self::Output { ColIndex(self.0.saturating_add(rhs.0)) }
}

impl Sub for ColIndex {
    type Output = ColWidth;
    /// Distance in columns between two positions, saturating at zero.
    fn sub(self, rhs: Self) -> Self::Output { ColWidth(self.0.saturating_sub(rhs.0)) }
}

/// Represents a width measurement in display column units (1-based).
#[derive(Debug, Copy, Clone, Default, PartialEq, Ord, PartialOrd, Eq, Hash)]
pub struct ColWidth(pub usize);

/// Creates a new [`ColWidth`] from any type that can be converted into it.
pub fn width(arg_col_width: impl Into<ColWidth>) -> ColWidth { arg_col_width.into() }

impl ColWidth {
    /// Spells "the rest of the span" when passed as the length argument of a substring
    /// operation.
    pub const MAX: ColWidth = ColWidth(usize::MAX);

    #[must_use]
    pub fn as_usize(&self) -> usize { self.0 }

    #[must_use]
    pub fn is_zero(&self) -> bool { self.0 == 0 }
}

impl Deref for ColWidth {
    type Target = usize;
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl DerefMut for ColWidth {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.0 }
}

impl From<usize> for ColWidth {
    fn from(it: usize) -> Self { Self(it) }
}

impl Add for ColWidth {
    type Output = ColWidth;
    fn add(self, rhs: Self) -> Self::Output { ColWidth(self.0.saturating_add(rhs.0)) }
}

impl Sub for ColWidth {
    type Output = ColWidth;
    fn sub(self, rhs: Self) -> Self::Output { ColWidth(self.0.saturating_sub(rhs.0)) }
}

impl SubAssign for ColWidth {
    fn sub_assign(&mut self, rhs: Self) { self.0 = self.0.saturating_sub(rhs.0); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_col_construction() {
        assert_eq!(col(3).as_usize(), 3);
        assert_eq!(width(2), ColWidth::from(2usize));
    }

    #[test]
    fn test_col_arithmetic() {
        assert_eq!(col(3) + width(2), col(5));
        assert_eq!(col(5) - col(3), width(2));
        assert_eq!(col(3) - col(5), width(0));
    }

    #[test]
    fn test_width_arithmetic_saturates() {
        assert_eq!(width(1) - width(4), width(0));
        assert_eq!(ColWidth::MAX + width(1), ColWidth::MAX);

        let mut remaining = width(2);
        remaining -= width(3);
        assert_eq!(remaining, width(0));
    }
}
