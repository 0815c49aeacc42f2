// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Strongly distinct coordinate types for the three unit systems text positions are
//! measured in: raw bytes, decoded codepoints, and display columns. Every public API
//! boundary in this crate takes and returns these types instead of bare `usize` so the
//! compiler catches unit confusion.

// Attach.
pub mod byte_unit;
pub mod char_unit;
pub mod col_unit;

// Re-export.
pub use byte_unit::*;
pub use char_unit::*;
pub use col_unit::*;
