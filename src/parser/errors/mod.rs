//! Tokenizer and parser error handling
//!
//! - Categorized error codes for filtering and documentation
//! - Positioned syntax errors with 1-based script coordinates
//! - Severity levels shared with the IDE layer

mod codes;
mod error;

pub use codes::ErrorCode;
pub use error::{DslSyntaxError, FilePosition, Severity};
