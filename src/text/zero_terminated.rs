// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! [`ZeroTerminated`] - a scoped NUL-terminated adapter for FFI-style consumers.

use std::ffi::c_char;

use crate::TextStorage;

/// Short-lived NUL-terminated byte run over some text.
///
/// The backing storage is decided once, at construction:
///
/// - *Borrowed*: the source already guarantees a NUL immediately past its payload -
///   every [`crate::TextOwned`] cell does, by invariant - so the adapter borrows those
///   bytes without copying. See [`crate::TextOwned::as_zstr`].
/// - *Owned*: the source is an arbitrary view with no such guarantee, so the adapter
///   makes one NUL-terminated copy in its own [`TextStorage`] cell. See
///   [`crate::TextRef::to_zstr`].
///
/// Either way the adapter is meant to live for the duration of one call expression;
/// the owned copy (if any) is released when it drops.
#[derive(Debug)]
pub struct ZeroTerminated<'a> {
    repr: Repr<'a>,
}

#[derive(Debug)]
enum Repr<'a> {
    /// Payload plus trailing NUL, borrowed from the source's storage.
    Borrowed(&'a [u8]),
    /// One independent NUL-terminated copy.
    Owned(TextStorage),
}

impl<'a> ZeroTerminated<'a> {
    /// `bytes_with_nul` is the payload followed by its NUL terminator, borrowed from
    /// storage that outlives `'a`.
    pub(crate) fn borrowed(bytes_with_nul: &'a [u8]) -> Self {
        debug_assert!(matches!(bytes_with_nul.last(), Some(0)));
        Self {
            repr: Repr::Borrowed(bytes_with_nul),
        }
    }

    /// Make one owned, NUL-terminated copy of `payload`.
    pub(crate) fn owned_copy(payload: &str) -> Self {
        Self {
            repr: Repr::Owned(TextStorage::from_bytes(payload.as_bytes())),
        }
    }

    /// Payload bytes including the trailing NUL.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        match &self.repr {
            Repr::Borrowed(bytes) => bytes,
            Repr::Owned(storage) => storage.as_bytes_with_nul(),
        }
    }

    /// Pointer to the NUL-terminated run, for C-style consumers. Valid while `self`
    /// lives.
    #[must_use]
    pub fn as_ptr(&self) -> *const c_char {
        self.as_bytes_with_nul().as_ptr().cast()
    }

    /// True when the adapter borrowed the source's terminator instead of copying.
    #[must_use]
    pub fn is_borrowed(&self) -> bool { matches!(self.repr, Repr::Borrowed(_)) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TextNav, TextOwned, TextRef, byte_index, byte_len};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_owned_string_borrows_its_terminator() {
        let text = TextOwned::from("borrowed");
        let zstr = text.as_zstr();

        assert!(zstr.is_borrowed());
        assert_eq!(zstr.as_bytes_with_nul(), b"borrowed\0");
        // No copy: the run points into the owner's cell.
        assert_eq!(zstr.as_ptr().cast::<u8>(), text.as_bytes().as_ptr());
    }

    #[test]
    fn test_view_copies_into_owned_terminated_run() {
        let text = TextOwned::from("abcdef");
        let view = text.substr_bytes(byte_index(0), byte_len(3));
        let zstr = view.to_zstr();

        // The view's span has no NUL after byte 3 ('d' is there), so a copy is made.
        assert!(!zstr.is_borrowed());
        assert_eq!(zstr.as_bytes_with_nul(), b"abc\0");
        assert_ne!(zstr.as_ptr().cast::<u8>(), text.as_bytes().as_ptr());
    }

    #[test]
    fn test_heap_mode_owner_still_borrows() {
        let text = TextOwned::from(&"n".repeat(100));
        assert!(!text.is_inline());

        let zstr = text.as_zstr();
        assert!(zstr.is_borrowed());
        assert_eq!(zstr.as_bytes_with_nul().len(), 101);
        assert_eq!(zstr.as_bytes_with_nul()[100], 0);
    }

    #[test]
    fn test_empty_text() {
        let text = TextOwned::new();
        let zstr = text.as_zstr();
        assert_eq!(zstr.as_bytes_with_nul(), b"\0");
        // SAFETY: `as_ptr` points at the one-byte NUL run read back here.
        assert_eq!(unsafe { *zstr.as_ptr() }, 0);
    }

    #[test]
    fn test_scoped_use_in_expression() {
        fn c_strlen(ptr: *const std::ffi::c_char) -> usize {
            let mut len = 0;
            // SAFETY: callers pass a NUL-terminated run.
            unsafe {
                while *ptr.add(len) != 0 {
                    len += 1;
                }
            }
            len
        }

        let text = TextOwned::from("measure");
        assert_eq!(c_strlen(text.as_zstr().as_ptr()), 7);
        assert_eq!(c_strlen(TextRef::new("me").to_zstr().as_ptr()), 2);
    }
}
