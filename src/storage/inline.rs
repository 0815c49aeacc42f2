// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::heap::HeapStorage;

/// Fixed payload capacity of the inline layout, in bytes.
///
/// Sized so that [`InlineStorage`] occupies exactly the same footprint as
/// [`HeapStorage`]: the payload array keeps one spare byte for the trailing NUL, and the
/// final byte of the cell holds the length-and-tag field.
pub const INLINE_CAPACITY: usize = std::mem::size_of::<HeapStorage>() - 2;

/// Inline layout of a [`super::TextStorage`] cell: the payload lives directly in the
/// cell's own footprint, no heap allocation.
///
/// The last byte of the cell is `len_and_tag`: the payload length shifted left once,
/// with the LSB always set. That set bit is the discriminant for the whole cell - a
/// heap-mode cell keeps the same bit clear (see [`super::heap::MAX_CAPACITY`]). Packing
/// the tag into the length byte costs half the length range of a `u8`, which the inline
/// capacity never comes close to anyway.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub(crate) struct InlineStorage {
    /// Payload bytes plus one spare slot so `bytes[len] == 0` always holds.
    pub bytes: [u8; INLINE_CAPACITY + 1],
    pub len_and_tag: u8,
}

impl InlineStorage {
    /// The canonical empty cell: length 0, inline mode, NUL-terminated.
    pub const EMPTY: Self = Self {
        bytes: [0; INLINE_CAPACITY + 1],
        len_and_tag: 1,
    };

    /// Caller guarantees `payload.len() <= INLINE_CAPACITY`.
    pub fn new(payload: &[u8]) -> Self {
        debug_assert!(payload.len() <= INLINE_CAPACITY);
        let mut bytes = [0u8; INLINE_CAPACITY + 1];
        bytes[..payload.len()].copy_from_slice(payload);
        Self {
            bytes,
            len_and_tag: ((payload.len() as u8) << 1) | 1,
        }
    }

    pub fn len(&self) -> usize { (self.len_and_tag >> 1) as usize }

    /// Set the payload length and restore the NUL terminator. Bytes in `[0, len)` are
    /// left untouched. Caller guarantees `len <= INLINE_CAPACITY`.
    pub fn set_len(&mut self, len: usize) {
        debug_assert!(len <= INLINE_CAPACITY);
        self.len_and_tag = ((len as u8) << 1) | 1;
        self.bytes[len] = 0;
    }
}
