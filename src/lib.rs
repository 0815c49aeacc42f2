// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # compact_text
//!
//! Compact, UTF-8-aware text types for code that moves a lot of small strings around:
//!
//! - [`TextOwned`] - an owning, growable buffer with small-string optimization. Short
//!   payloads (up to [`INLINE_CAPACITY`] bytes) live inline in the value's own three
//!   machine words; longer payloads transparently promote to a single heap allocation.
//!   The inline/heap discriminant is packed into one bit of an existing field - no tag
//!   byte, no extra pointer. See the [`storage`] module docs for the exact byte layout.
//! - [`TextRef`] - a trivially copyable, non-owning view over a contiguous UTF-8 byte
//!   range, constructible in `const` contexts.
//! - [`TextNav`] - byte/character/display-column navigation (element access, offset
//!   conversions, substrings, iteration), written once against a minimal capability
//!   trait ([`TextData`]) and exposed identically by both types.
//!
//! # Three coordinate systems
//!
//! Text positions are measured in raw bytes ([`ByteIndex`]/[`ByteLength`]), decoded
//! codepoints ([`CharIndex`]/[`CharLength`]), or display columns
//! ([`ColIndex`]/[`ColWidth`]). These are distinct types, so mixing units is a compile
//! error rather than an off-by-N bug:
//!
//! ```text
//! "a 世 b"
//!  byte:   0  1  2  3  4  5  6     (世 is 3 bytes)
//!  char:   0  1  2     3  4        (one codepoint each)
//!  col:    0  1  2  3  4  5        (世 is 2 columns wide)
//! ```
//!
//! # Example
//!
//! ```rust
//! use compact_text::{TextNav, TextOwned, TextRef, char_index, char_len, width};
//!
//! let mut greeting = TextOwned::from("hola");
//! greeting.push('!');
//! assert_eq!(greeting.as_str(), "hola!");
//! assert!(greeting.is_inline()); // 5 bytes: no heap allocation.
//!
//! let line = TextRef::new("a世b");
//! assert_eq!(line.char_length(), char_len(3));
//! assert_eq!(line.column_length(), width(4));
//! assert_eq!(line.substr_chars(char_index(1), char_len(1)).as_str(), "世");
//! ```
//!
//! # Value semantics
//!
//! Cloning always produces independent storage (never shared, never reference
//! counted); moving transfers the cell's bits and [`std::mem::take`] leaves the empty
//! inline cell behind. There is no internal synchronization - copy values across
//! thread boundaries, or synchronize externally. Heap buffers are accounted under
//! [`mem::MemoryDomain::Text`] and released exactly once.

// Attach.
pub mod mem;
pub mod storage;
pub mod text;
pub mod units;
pub mod utf8;

// Re-export.
pub use storage::{INLINE_CAPACITY, MAX_CAPACITY, TextStorage};
pub use text::*;
pub use units::*;
