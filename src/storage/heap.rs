// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ptr::NonNull;

use crate::mem::{self, MemoryDomain};

/// Exclusive (non-inclusive) upper bound on the capacity a heap-mode cell may report.
///
/// The byte of the cell that carries the inline discriminant bit overlays the
/// `capacity` word of this layout:
///
/// - Little-endian: it is the most significant byte of `capacity`, so any capacity
///   strictly below `2^(8 * (word_size - 1))` keeps that byte zero and the tag bit
///   clear. This caps text at 2^56 bytes on 64-bit targets and 2^24 on 32-bit.
/// - Big-endian: it is the least significant byte of `capacity`, so capacities are
///   additionally rounded up to an even value (see [`HeapStorage::round_capacity`]),
///   keeping the tag bit clear.
pub const MAX_CAPACITY: usize = 1 << (8 * (std::mem::size_of::<usize>() - 1));

/// Heap layout of a [`super::TextStorage`] cell: a pointer to a separately allocated
/// buffer plus explicit size and capacity words.
///
/// The allocation is always `capacity + 1` bytes so the trailing NUL invariant
/// (`data[size] == 0`) can be maintained at any size up to `capacity`. A cell in this
/// mode owns exactly one live allocation; release happens once, in
/// [`super::TextStorage`]'s drop or reallocation paths.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub(crate) struct HeapStorage {
    pub ptr: NonNull<u8>,
    pub size: usize,
    pub capacity: usize,
}

impl HeapStorage {
    /// Adjust a requested capacity so its representation cannot collide with the inline
    /// tag bit on big-endian targets. No-op on little-endian.
    pub fn round_capacity(capacity: usize) -> usize {
        if cfg!(target_endian = "big") {
            (capacity + 1) & !1
        } else {
            capacity
        }
    }

    /// Allocate a buffer for `capacity` payload bytes (plus the NUL slot). The returned
    /// storage has size 0 and uninitialized payload; the caller writes content and the
    /// terminator before exposing it.
    ///
    /// Capacity overflow past [`MAX_CAPACITY`] is fatal: a larger value could set the
    /// discriminant bit and silently corrupt the representation.
    pub fn allocate(capacity: usize) -> Self {
        let capacity = Self::round_capacity(capacity);
        assert!(capacity < MAX_CAPACITY, "text capacity overflow: {capacity}");
        let ptr = mem::allocate(MemoryDomain::Text, capacity + 1);
        Self {
            ptr,
            size: 0,
            capacity,
        }
    }

    /// Release the owned allocation.
    ///
    /// # Safety
    ///
    /// Must be called at most once per allocation, and the buffer must not be used
    /// afterwards.
    pub unsafe fn release(&self) {
        // SAFETY: `ptr` came from `mem::allocate` with `capacity + 1` bytes in
        // `allocate`; caller guarantees single release.
        unsafe { mem::deallocate(MemoryDomain::Text, self.ptr, self.capacity + 1) };
    }
}
