//! Error code definitions for DSL diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Tokenizer errors (quoted strings, external text)
//! - E02xx: Structural errors (statement terminators, braces)
//! - E03xx: Concept errors (keywords, member values)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for tokenizer and parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Tokenizer errors
    // =========================================================================
    /// Unterminated quoted string
    E0101,
    /// Unterminated external text reference `<...`
    E0102,
    /// External text file could not be read
    E0103,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Missing `;` or `{` after a concept
    E0201,
    /// Unclosed brace `{` at end of script
    E0202,
    /// Unexpected closing brace `}`
    E0203,

    // =========================================================================
    // E03xx: Concept errors
    // =========================================================================
    /// Unrecognized concept keyword
    E0301,
    /// Invalid or missing member value
    E0302,
    /// More than one concept type matches the statement
    E0303,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected failure inside the analysis
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0999 => "E0999",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
