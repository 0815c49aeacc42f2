// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Domain-tagged raw buffer allocation.
//!
//! Every heap block owned by a [`crate::TextStorage`] cell is acquired and released
//! through this module, tagged with a [`MemoryDomain`] label so that live heap usage can
//! be inspected per domain (eg: in leak assertions in tests, or diagnostics dumps).
//! Allocation failure is fatal - this crate has no partial-success states to fall back
//! to, so it reports through [`std::alloc::handle_alloc_error`] rather than returning a
//! recoverable error.

use std::{alloc::{self, Layout, handle_alloc_error},
          ptr::NonNull,
          sync::atomic::{AtomicUsize, Ordering}};

use strum_macros::Display;

/// Accounting label for a heap allocation. Each domain's live byte count is tracked
/// independently.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MemoryDomain {
    /// Buffers owned by [`crate::TextStorage`] cells in heap mode.
    Text,
}

static TEXT_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

fn live_counter(domain: MemoryDomain) -> &'static AtomicUsize {
    match domain {
        MemoryDomain::Text => &TEXT_ALLOCATED,
    }
}

/// Number of heap bytes currently live under the given domain.
#[must_use]
pub fn allocated_bytes(domain: MemoryDomain) -> usize {
    live_counter(domain).load(Ordering::Relaxed)
}

fn layout_for(size: usize) -> Layout {
    // Byte buffers only; the largest primitive stored in them is `u8`.
    debug_assert!(size > 0);
    Layout::array::<u8>(size).unwrap_or_else(|_| {
        handle_alloc_error(Layout::new::<u8>());
    })
}

/// Allocate a raw byte buffer of `size` bytes under the given domain.
///
/// The returned memory is uninitialized. Allocation failure is fatal.
#[must_use]
pub fn allocate(domain: MemoryDomain, size: usize) -> NonNull<u8> {
    let layout = layout_for(size);
    // SAFETY: `layout` has non-zero size, checked above.
    let raw = unsafe { alloc::alloc(layout) };
    let Some(ptr) = NonNull::new(raw) else {
        handle_alloc_error(layout);
    };
    live_counter(domain).fetch_add(size, Ordering::Relaxed);
    tracing::trace!(%domain, size, "allocate");
    ptr
}

/// Release a buffer previously returned by [`allocate`] with the same `domain` and
/// `size`.
///
/// # Safety
///
/// `ptr` must have come from [`allocate`] with exactly this `size`, and must not be
/// used again after this call.
pub unsafe fn deallocate(domain: MemoryDomain, ptr: NonNull<u8>, size: usize) {
    let layout = layout_for(size);
    // SAFETY: caller guarantees `ptr`/`size` match a prior `allocate`.
    unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
    live_counter(domain).fetch_sub(size, Ordering::Relaxed);
    tracing::trace!(%domain, size, "deallocate");
}
