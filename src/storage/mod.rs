// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The small-string-optimized storage cell underlying [`crate::TextOwned`].
//!
//! A [`TextStorage`] is one of two mutually exclusive layouts sharing the same three
//! machine words of storage:
//!
//! ```text
//! Inline mode (tag bit = 1)                Heap mode (tag bit = 0)
//! ┌───────────────────────────┬───┐        ┌─────────┬─────────┬─────────┐
//! │ payload bytes + NUL (23)  │L|1│        │ ptr     │ size    │capacity │
//! └───────────────────────────┴───┘        └─────────┴─────────┴─────────┘
//!                               ↑                                      ↑
//!                  len_and_tag byte                  top byte always 0 on LE
//! ```
//!
//! The discriminant is the LSB of the cell's final byte: set for inline mode (where the
//! byte also stores the length, shifted left once), clear for heap mode (guaranteed by
//! capping and rounding the capacity word - see [`heap::MAX_CAPACITY`]). No separate tag
//! byte, no extra pointer.
//!
//! Two invariants hold in both modes: `size <= capacity`, and `data[size] == 0` (the
//! trailing NUL that [`crate::ZeroTerminated`] borrows). Promotion from inline to heap
//! happens exactly once, when content outgrows [`INLINE_CAPACITY`]; a promoted cell
//! never demotes, even if later truncated. Demoting would save nothing on the fast path
//! and the one-way rule keeps the mode of a cell a function of its history, which the
//! tests pin.

// Attach.
pub mod heap;
pub mod inline;

use std::{cmp, ptr, slice};

use heap::HeapStorage;
pub use heap::MAX_CAPACITY;
use inline::InlineStorage;
pub use inline::INLINE_CAPACITY;

/// The two layouts overlay exactly; see the module docs for the byte picture.
#[repr(C)]
union Repr {
    inline: InlineStorage,
    heap: HeapStorage,
}

const _: () = assert!(std::mem::size_of::<InlineStorage>() == std::mem::size_of::<HeapStorage>());
const _: () = assert!(std::mem::size_of::<Repr>() == 3 * std::mem::size_of::<usize>());

/// Owning, growable byte storage with small-string optimization.
///
/// Payloads up to [`INLINE_CAPACITY`] bytes live directly in the cell; longer payloads
/// live in a single heap allocation tagged under
/// [`crate::mem::MemoryDomain::Text`]. All mode dispatch is O(1) off the tag bit.
///
/// This cell is byte-oriented and does not know about UTF-8; [`crate::TextOwned`] layers
/// the UTF-8 guarantee on top.
pub struct TextStorage {
    repr: Repr,
}

// SAFETY: a cell exclusively owns its heap allocation (no aliasing, no sharing), so
// transferring or sharing a reference across threads is sound; `&TextStorage` exposes
// only reads.
unsafe impl Send for TextStorage {}
unsafe impl Sync for TextStorage {}

impl TextStorage {
    /// The canonical empty cell: inline mode, size 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            repr: Repr {
                inline: InlineStorage::EMPTY,
            },
        }
    }

    /// Construct from a payload, choosing inline or heap mode by size.
    #[must_use]
    pub fn from_bytes(payload: &[u8]) -> Self {
        if payload.len() <= INLINE_CAPACITY {
            Self {
                repr: Repr {
                    inline: InlineStorage::new(payload),
                },
            }
        } else {
            let mut heap = HeapStorage::allocate(payload.len());
            // SAFETY: the new buffer holds `capacity + 1 > payload.len()` bytes.
            unsafe {
                ptr::copy_nonoverlapping(payload.as_ptr(), heap.ptr.as_ptr(), payload.len());
                heap.ptr.as_ptr().add(payload.len()).write(0);
            }
            heap.size = payload.len();
            Self {
                repr: Repr { heap },
            }
        }
    }

    /// Reads the byte that holds the discriminant bit. In heap mode this overlays the
    /// capacity word, whose representation is constrained to keep the bit clear.
    fn tag_byte(&self) -> u8 {
        // SAFETY: the final byte of the cell is initialized in both layouts.
        unsafe { self.repr.inline.len_and_tag }
    }

    #[must_use]
    pub fn is_inline(&self) -> bool { self.tag_byte() & 1 == 1 }

    #[must_use]
    pub fn size(&self) -> usize {
        if self.is_inline() {
            // SAFETY: tag bit says the inline layout is active.
            unsafe { self.repr.inline.len() }
        } else {
            // SAFETY: tag bit says the heap layout is active.
            unsafe { self.repr.heap.size }
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        if self.is_inline() {
            INLINE_CAPACITY
        } else {
            // SAFETY: tag bit says the heap layout is active.
            unsafe { self.repr.heap.capacity }
        }
    }

    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        if self.is_inline() {
            // SAFETY: tag bit says the inline layout is active.
            unsafe { self.repr.inline.bytes.as_ptr() }
        } else {
            // SAFETY: tag bit says the heap layout is active.
            unsafe { self.repr.heap.ptr.as_ptr() }
        }
    }

    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        if self.is_inline() {
            // SAFETY: tag bit says the inline layout is active.
            unsafe { self.repr.inline.bytes.as_mut_ptr() }
        } else {
            // SAFETY: tag bit says the heap layout is active.
            unsafe { self.repr.heap.ptr.as_ptr() }
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: `size <= capacity` bytes are initialized payload in both modes.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.size()) }
    }

    /// Payload plus the trailing NUL byte.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        // SAFETY: `data[size] == 0` is a cell invariant and the byte is in bounds in
        // both modes (inline array has a spare slot; heap allocations are
        // `capacity + 1`).
        unsafe { slice::from_raw_parts(self.as_ptr(), self.size() + 1) }
    }

    /// Ensure room for at least `new_capacity` payload bytes, preserving content.
    ///
    /// No-op when the current capacity suffices. Otherwise grows by at least 2x (the
    /// standard amortized policy), copies the payload and NUL, releases any prior heap
    /// block, and switches to heap mode. Growing past the inline capacity is the sole
    /// trigger for inline-to-heap promotion.
    pub fn reserve(&mut self, new_capacity: usize) { self.grow::<true>(new_capacity); }

    /// Growth engine behind [`Self::reserve`] and `clone_from`. With `COPY = false` the
    /// new buffer starts empty (size 0) - used when the caller overwrites the content
    /// immediately anyway, saving the copy of bytes about to die.
    fn grow<const COPY: bool>(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return;
        }
        let new_capacity = cmp::max(new_capacity, 2 * self.capacity());
        let mut new_heap = HeapStorage::allocate(new_capacity);
        if COPY {
            let size = self.size();
            // SAFETY: source holds `size + 1` readable bytes (payload + NUL); the new
            // buffer holds `new_capacity + 1 > size + 1` writable bytes. The two
            // allocations are distinct.
            unsafe {
                ptr::copy_nonoverlapping(self.as_ptr(), new_heap.ptr.as_ptr(), size + 1);
            }
            new_heap.size = size;
        } else {
            // SAFETY: slot 0 of the fresh `new_capacity + 1` byte buffer.
            unsafe { new_heap.ptr.as_ptr().write(0) };
        }
        self.release_heap();
        self.repr.heap = new_heap;
    }

    /// Release the heap allocation iff in heap mode. Leaves `repr` dangling; every
    /// caller overwrites it immediately.
    fn release_heap(&mut self) {
        if !self.is_inline() {
            // SAFETY: tag bit says the heap layout is active, and the allocation is
            // released exactly once because callers overwrite `repr` right after.
            unsafe { self.repr.heap.release() };
        }
    }

    /// Set the payload size and restore the trailing NUL. Bytes in `[0, new_size)` are
    /// untouched. Internal contract: `new_size <= capacity()`.
    fn set_size(&mut self, new_size: usize) {
        debug_assert!(new_size <= self.capacity());
        if self.is_inline() {
            // SAFETY: tag bit says the inline layout is active.
            unsafe { self.repr.inline.set_len(new_size) };
        } else {
            // SAFETY: tag bit says the heap layout is active; the NUL slot at
            // `new_size <= capacity` is within the `capacity + 1` byte allocation.
            unsafe {
                self.repr.heap.size = new_size;
                self.repr.heap.ptr.as_ptr().add(new_size).write(0);
            }
        }
    }

    /// Copy `payload` to the tail, growing as needed.
    pub fn append(&mut self, payload: &[u8]) {
        let old_size = self.size();
        let new_size = old_size + payload.len();
        self.reserve(new_size);
        // SAFETY: `reserve` guaranteed `capacity >= new_size`; `payload` cannot alias
        // this cell's buffer (it is borrowed immutably while `self` is borrowed
        // mutably).
        unsafe {
            ptr::copy_nonoverlapping(
                payload.as_ptr(),
                self.as_mut_ptr().add(old_size),
                payload.len(),
            );
        }
        self.set_size(new_size);
    }

    /// Set the size without clearing or copying payload bytes, for writing into
    /// pre-reserved capacity.
    ///
    /// # Safety
    ///
    /// `new_size <= capacity()` must hold, and bytes `[old_size, new_size)` must
    /// already be initialized.
    pub unsafe fn force_size(&mut self, new_size: usize) {
        debug_assert!(new_size <= self.capacity());
        self.set_size(new_size);
    }

    /// Set size to 0. Does not release a heap allocation - capacity is retained for
    /// reuse, and the cell stays in heap mode if it was promoted.
    pub fn clear(&mut self) { self.set_size(0); }

    /// Move the cell out, leaving the canonical empty inline cell behind. Never
    /// allocates.
    #[must_use]
    pub fn take(&mut self) -> Self { std::mem::take(self) }
}

impl Default for TextStorage {
    fn default() -> Self { Self::new() }
}

impl Drop for TextStorage {
    fn drop(&mut self) { self.release_heap(); }
}

impl Clone for TextStorage {
    /// Always an independent allocation (or inline copy) - no sharing. A heap-mode
    /// source whose payload fits inline clones into inline mode.
    fn clone(&self) -> Self { Self::from_bytes(self.as_bytes()) }

    /// Reuses the existing allocation when the source payload fits.
    fn clone_from(&mut self, source: &Self) {
        let src = source.as_bytes();
        if src.len() > self.capacity() {
            self.grow::<false>(src.len());
        }
        // SAFETY: capacity now covers `src.len()`; distinct cells cannot alias.
        unsafe {
            ptr::copy_nonoverlapping(src.as_ptr(), self.as_mut_ptr(), src.len());
        }
        self.set_size(src.len());
    }
}

impl std::fmt::Debug for TextStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextStorage")
            .field("mode", if self.is_inline() { &"inline" } else { &"heap" })
            .field("size", &self.size())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl PartialEq for TextStorage {
    /// Content equality, independent of storage mode.
    fn eq(&self, other: &Self) -> bool { self.as_bytes() == other.as_bytes() }
}

impl Eq for TextStorage {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ╭─────────────────────────────────────────────────────────────────────────────╮
    // │                               Layout pins                                   │
    // ╰─────────────────────────────────────────────────────────────────────────────╯

    #[test]
    fn test_cell_is_three_words() {
        assert_eq!(
            std::mem::size_of::<TextStorage>(),
            3 * std::mem::size_of::<usize>()
        );
        assert_eq!(
            std::mem::align_of::<TextStorage>(),
            std::mem::align_of::<usize>()
        );
    }

    #[test]
    fn test_inline_capacity_value() {
        assert_eq!(INLINE_CAPACITY, 3 * std::mem::size_of::<usize>() - 2);
    }

    #[test]
    fn test_tag_bit_in_both_modes() {
        let inline = TextStorage::from_bytes(b"short");
        assert!(inline.is_inline());
        assert_eq!(inline.tag_byte() & 1, 1);

        let heap = TextStorage::from_bytes(&[b'x'; INLINE_CAPACITY + 1]);
        assert!(!heap.is_inline());
        assert_eq!(heap.tag_byte() & 1, 0);
    }

    // ╭─────────────────────────────────────────────────────────────────────────────╮
    // │                          Round-trip construction                            │
    // ╰─────────────────────────────────────────────────────────────────────────────╯

    #[test]
    fn test_round_trip_across_boundary_sizes() {
        for n in [
            0,
            INLINE_CAPACITY - 1,
            INLINE_CAPACITY,
            INLINE_CAPACITY + 1,
            4096,
        ] {
            let payload: Vec<u8> = (0..n).map(|i| (i % 251 + 1) as u8).collect();
            let cell = TextStorage::from_bytes(&payload);
            assert_eq!(cell.size(), n);
            assert_eq!(cell.as_bytes(), &payload[..]);
            assert_eq!(cell.is_inline(), n <= INLINE_CAPACITY);
        }
    }

    #[test]
    fn test_nul_invariant_in_both_modes() {
        let inline = TextStorage::from_bytes(b"abc");
        assert_eq!(inline.as_bytes_with_nul(), b"abc\0");

        let big = vec![b'y'; 100];
        let heap = TextStorage::from_bytes(&big);
        assert_eq!(heap.as_bytes_with_nul()[100], 0);
    }

    // ╭─────────────────────────────────────────────────────────────────────────────╮
    // │                            Mode transitions                                 │
    // ╰─────────────────────────────────────────────────────────────────────────────╯

    #[test]
    fn test_append_one_byte_at_a_time_across_threshold() {
        let mut cell = TextStorage::new();
        let mut expected = Vec::new();
        let mut last_capacity = cell.capacity();

        for i in 0..(INLINE_CAPACITY * 3) {
            let byte = (i % 253 + 1) as u8;
            cell.append(&[byte]);
            expected.push(byte);

            assert_eq!(cell.as_bytes(), &expected[..], "corruption at byte {i}");
            assert!(cell.capacity() >= last_capacity, "capacity shrank at byte {i}");
            assert_eq!(cell.as_bytes_with_nul()[cell.size()], 0);
            last_capacity = cell.capacity();
        }
        assert!(!cell.is_inline());
    }

    #[test]
    fn test_promotion_is_one_way() {
        let mut cell = TextStorage::from_bytes(&[b'a'; INLINE_CAPACITY + 10]);
        assert!(!cell.is_inline());

        // Shrinking below the inline threshold does not demote.
        // SAFETY: 3 <= capacity and bytes [0, 3) are initialized.
        unsafe { cell.force_size(3) };
        assert!(!cell.is_inline());
        assert_eq!(cell.as_bytes(), b"aaa");

        cell.clear();
        assert!(!cell.is_inline());
        assert_eq!(cell.size(), 0);
    }

    #[test]
    fn test_reserve_is_noop_within_capacity() {
        let mut cell = TextStorage::from_bytes(b"abc");
        let ptr_before = cell.as_ptr();
        cell.reserve(INLINE_CAPACITY);
        assert!(cell.is_inline());
        assert_eq!(cell.as_ptr(), ptr_before);
    }

    #[test]
    fn test_reserve_grows_at_least_double() {
        let mut cell = TextStorage::from_bytes(&[b'z'; 100]);
        let capacity_before = cell.capacity();
        cell.reserve(capacity_before + 1);
        assert!(cell.capacity() >= 2 * capacity_before);
        assert_eq!(cell.size(), 100);
        assert_eq!(cell.as_bytes(), &[b'z'; 100][..]);
    }

    #[test]
    fn test_promotion_preserves_content() {
        let mut cell = TextStorage::from_bytes(b"hold on");
        assert!(cell.is_inline());
        cell.reserve(1000);
        assert!(!cell.is_inline());
        assert!(cell.capacity() >= 1000);
        assert_eq!(cell.as_bytes(), b"hold on");
        assert_eq!(cell.as_bytes_with_nul()[7], 0);
    }

    // ╭─────────────────────────────────────────────────────────────────────────────╮
    // │                        Copy / move / force_size                             │
    // ╰─────────────────────────────────────────────────────────────────────────────╯

    #[test]
    fn test_clone_independence_inline_and_heap() {
        for payload in [&b"tiny"[..], &[b'q'; 200][..]] {
            let original = TextStorage::from_bytes(payload);
            let mut copy = original.clone();

            copy.append(b"!");
            assert_eq!(original.as_bytes(), payload);
            assert_eq!(copy.size(), payload.len() + 1);
        }
    }

    #[test]
    fn test_clone_of_shrunk_heap_cell_may_inline() {
        let mut cell = TextStorage::from_bytes(&[b'w'; 100]);
        // SAFETY: 4 <= capacity and bytes [0, 4) are initialized.
        unsafe { cell.force_size(4) };
        assert!(!cell.is_inline());

        // The clone copies content, not mode.
        let copy = cell.clone();
        assert!(copy.is_inline());
        assert_eq!(copy.as_bytes(), cell.as_bytes());
    }

    #[test]
    fn test_clone_from_reuses_capacity() {
        let mut target = TextStorage::from_bytes(&[b'a'; 100]);
        let ptr_before = target.as_ptr();

        let source = TextStorage::from_bytes(b"replacement");
        target.clone_from(&source);

        assert_eq!(target.as_bytes(), b"replacement");
        assert_eq!(target.as_ptr(), ptr_before);
        assert!(target.capacity() >= 100);
    }

    #[test]
    fn test_take_leaves_canonical_empty() {
        let mut cell = TextStorage::from_bytes(&[b'm'; 50]);
        let moved = cell.take();

        assert_eq!(moved.as_bytes(), &[b'm'; 50][..]);
        assert!(cell.is_inline());
        assert_eq!(cell.size(), 0);
        assert_eq!(cell.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn test_force_size_into_reserved_capacity() {
        let mut cell = TextStorage::new();
        cell.reserve(64);
        let base = cell.as_mut_ptr();
        // SAFETY: 8 bytes within the 64 reserved above.
        unsafe {
            for i in 0..8u8 {
                base.add(i as usize).write(b'0' + i);
            }
            cell.force_size(8);
        }
        assert_eq!(cell.as_bytes(), b"01234567");
    }

    #[test]
    fn test_content_equality_is_mode_independent() {
        let mut heap = TextStorage::from_bytes(&[b'k'; 100]);
        // SAFETY: 2 <= capacity and bytes [0, 2) are initialized.
        unsafe { heap.force_size(2) };
        let inline = TextStorage::from_bytes(b"kk");

        assert!(!heap.is_inline());
        assert!(inline.is_inline());
        assert_eq!(heap, inline);
    }
}
