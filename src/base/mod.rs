//! Foundation types for the analysis engine.
//!
//! This module provides the position model used throughout the crate:
//! - [`LineChr`], [`Span`] - Zero-based line/character positions
//! - [`DocumentText`] - Document text with memoized line starts and
//!   offset <-> position conversion
//!
//! This module has NO dependencies on other modules of the crate.

mod position;
mod text;

pub use position::{LineChr, Span};
pub use text::DocumentText;

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
