// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`TextOwned`] - the owning, growable text type over a [`TextStorage`] cell.

use std::{fmt::{Debug, Display, Formatter, Result as FmtResult, Write},
          hash::{Hash, Hasher},
          ops::{Add, AddAssign}};

use crate::{ByteLength, CharLength, ColWidth, TextData, TextNav, TextRef, TextStorage,
            ZeroTerminated, utf8};

/// Convenience constructor for [`TextOwned`].
pub fn text(arg_from: impl Into<TextOwned>) -> TextOwned { arg_from.into() }

/// Owning, growable UTF-8 text with small-string optimization.
///
/// Wraps exactly one [`TextStorage`] cell and adds no representational state of its
/// own: every mutation funnels through the cell's operations. Payloads up to
/// [`crate::INLINE_CAPACITY`] bytes need no heap allocation; longer content lives in a
/// single owned heap buffer (see the [`crate::storage`] module docs for the layout).
///
/// The payload is always valid UTF-8: constructors and mutators accept only
/// `&str`/`char`/ASCII fill values, so malformed input is unrepresentable. Navigation
/// (byte/character/column indexing, substrings, iteration) comes from the [`TextNav`]
/// trait and is shared verbatim with [`TextRef`].
///
/// Copying (`Clone`) always produces an independent cell. Moving transfers the cell's
/// bits; [`std::mem::take`] leaves the canonical empty inline cell behind and never
/// allocates.
#[derive(Clone, Default)]
pub struct TextOwned {
    storage: TextStorage,
}

impl TextOwned {
    /// Empty text, inline mode, no allocation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: TextStorage::new(),
        }
    }

    /// A single codepoint repeated `count` times (counted in characters).
    #[must_use]
    pub fn from_char_repeated(codepoint: char, arg_count: impl Into<CharLength>) -> Self {
        let count = arg_count.into();
        let mut it = Self::new();
        it.reserve(utf8::codepoint_size(codepoint).as_usize() * count.as_usize());
        for _ in 0..count.as_usize() {
            it.push(codepoint);
        }
        it
    }

    /// A single codepoint repeated to fill `count` display columns.
    ///
    /// The codepoint's display width must evenly divide the requested column count;
    /// anything else is a contract violation. Zero-width codepoints (eg: combining
    /// marks) count as one column per repetition.
    #[must_use]
    pub fn from_char_cols(codepoint: char, arg_count: impl Into<ColWidth>) -> Self {
        let count = arg_count.into();
        let codepoint_width = utf8::codepoint_width(codepoint).as_usize().max(1);
        debug_assert!(count.as_usize() % codepoint_width == 0);
        Self::from_char_repeated(codepoint, count.as_usize() / codepoint_width)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: every constructor and mutator of this type preserves UTF-8 validity
        // of the cell's payload.
        unsafe { std::str::from_utf8_unchecked(self.storage.as_bytes()) }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { self.storage.as_bytes() }

    /// Bytes available without reallocating.
    #[must_use]
    pub fn capacity(&self) -> ByteLength { ByteLength(self.storage.capacity()) }

    /// True while the payload still lives inside the cell's own footprint.
    #[must_use]
    pub fn is_inline(&self) -> bool { self.storage.is_inline() }

    /// Borrow the whole payload as a view.
    #[must_use]
    pub fn as_ref_text(&self) -> TextRef<'_> { TextRef::new(self.as_str()) }

    /// NUL-terminated adapter over the whole payload. Borrows the cell's trailing NUL;
    /// never copies.
    #[must_use]
    pub fn as_zstr(&self) -> ZeroTerminated<'_> {
        ZeroTerminated::borrowed(self.storage.as_bytes_with_nul())
    }

    pub fn push(&mut self, codepoint: char) {
        let mut buf = [0u8; 4];
        self.storage.append(codepoint.encode_utf8(&mut buf).as_bytes());
    }

    pub fn push_str(&mut self, span: &str) { self.storage.append(span.as_bytes()); }

    /// Set size to 0; capacity (and heap mode, if promoted) is retained for reuse.
    pub fn clear(&mut self) { self.storage.clear(); }

    /// Ensure capacity for at least `new_capacity` payload bytes.
    pub fn reserve(&mut self, arg_new_capacity: impl Into<ByteLength>) {
        self.storage.reserve(arg_new_capacity.into().as_usize());
    }

    /// Resize to `new_size` bytes. Shrinking truncates (the cut must land on a
    /// codepoint boundary); growing fills with `fill`, which must be ASCII. Both
    /// restrictions exist to keep the payload valid UTF-8.
    pub fn resize(&mut self, arg_new_size: impl Into<ByteLength>, fill: u8) {
        let new_size = arg_new_size.into().as_usize();
        if new_size <= self.storage.size() {
            assert!(self.as_str().is_char_boundary(new_size));
            // SAFETY: `new_size <= size <= capacity`, bytes below `new_size` are the
            // existing (initialized, UTF-8 valid up to the checked boundary) payload.
            unsafe { self.storage.force_size(new_size) };
        } else {
            assert!(fill.is_ascii());
            let old_size = self.storage.size();
            self.storage.reserve(new_size);
            // SAFETY: capacity now covers `new_size`; every byte in
            // `[old_size, new_size)` is written with an ASCII value before the size is
            // published.
            unsafe {
                let tail = self.storage.as_mut_ptr().add(old_size);
                tail.write_bytes(fill, new_size - old_size);
                self.storage.force_size(new_size);
            }
        }
    }

    /// Set the size without touching payload bytes, for writing into pre-reserved
    /// capacity.
    ///
    /// # Safety
    ///
    /// `new_size <= capacity()` must hold, and bytes `[0, new_size)` must be
    /// initialized, valid UTF-8.
    pub unsafe fn force_size(&mut self, arg_new_size: impl Into<ByteLength>) {
        // SAFETY: forwarded caller contract.
        unsafe { self.storage.force_size(arg_new_size.into().as_usize()) };
    }

    /// Raw tail access for filling pre-reserved capacity (pair with
    /// [`Self::force_size`]).
    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut u8 { self.storage.as_mut_ptr() }
}

// ╭─────────────────────────────────────────────────────────────────────────────╮
// │                              Conversion traits                              │
// ╰─────────────────────────────────────────────────────────────────────────────╯

impl From<&str> for TextOwned {
    fn from(span: &str) -> Self {
        Self {
            storage: TextStorage::from_bytes(span.as_bytes()),
        }
    }
}

impl From<String> for TextOwned {
    fn from(value: String) -> Self { Self::from(value.as_str()) }
}

impl From<&String> for TextOwned {
    fn from(value: &String) -> Self { Self::from(value.as_str()) }
}

impl From<char> for TextOwned {
    fn from(codepoint: char) -> Self {
        let mut buf = [0u8; 4];
        Self::from(&*codepoint.encode_utf8(&mut buf))
    }
}

impl From<TextRef<'_>> for TextOwned {
    fn from(view: TextRef<'_>) -> Self { Self::from(view.as_str()) }
}

// ╭─────────────────────────────────────────────────────────────────────────────╮
// │                          Append / concat operators                         │
// ╰─────────────────────────────────────────────────────────────────────────────╯

impl AddAssign<TextRef<'_>> for TextOwned {
    fn add_assign(&mut self, rhs: TextRef<'_>) { self.push_str(rhs.as_str()); }
}

impl AddAssign<&str> for TextOwned {
    fn add_assign(&mut self, rhs: &str) { self.push_str(rhs); }
}

impl Add<TextRef<'_>> for TextOwned {
    type Output = TextOwned;
    fn add(mut self, rhs: TextRef<'_>) -> Self::Output {
        self += rhs;
        self
    }
}

impl Write for TextOwned {
    fn write_str(&mut self, span: &str) -> std::fmt::Result {
        self.push_str(span);
        Ok(())
    }
}

// ╭─────────────────────────────────────────────────────────────────────────────╮
// │                      Navigation / comparison / display                      │
// ╰─────────────────────────────────────────────────────────────────────────────╯

impl TextData for TextOwned {
    fn text_data(&self) -> &str { self.as_str() }

    fn byte_size(&self) -> ByteLength { ByteLength(self.storage.size()) }
}

impl TextNav for TextOwned {}

impl AsRef<str> for TextOwned {
    fn as_ref(&self) -> &str { self.as_str() }
}

impl PartialEq for TextOwned {
    /// Byte-for-byte content comparison, independent of storage mode.
    fn eq(&self, other: &Self) -> bool { self.as_str() == other.as_str() }
}

impl Eq for TextOwned {}

impl PartialEq<&str> for TextOwned {
    fn eq(&self, other: &&str) -> bool { self.as_str() == *other }
}

impl PartialEq<TextRef<'_>> for TextOwned {
    fn eq(&self, other: &TextRef<'_>) -> bool { self.as_str() == other.as_str() }
}

impl PartialOrd for TextOwned {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextOwned {
    /// Lexicographic by byte value.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_bytes().cmp(other.as_bytes())
    }
}

impl Hash for TextOwned {
    /// Exposes the raw byte span to the hasher; no hashing logic lives here. Hashes
    /// identically to a [`TextRef`] over the same content.
    fn hash<H: Hasher>(&self, state: &mut H) { self.as_str().hash(state); }
}

impl Debug for TextOwned {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "TextOwned({:?})", self.as_str())
    }
}

impl Display for TextOwned {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult { write!(f, "{}", self.as_str()) }
}
