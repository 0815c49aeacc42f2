// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The public text types: [`TextOwned`], [`TextRef`], the [`TextNav`] navigation
//! surface they share, and the [`ZeroTerminated`] FFI adapter.

// Attach.
pub mod nav;
pub mod text_owned;
pub mod text_ref;
pub mod zero_terminated;

// Re-export.
pub use nav::*;
pub use text_owned::*;
pub use text_ref::*;
pub use zero_terminated::*;
