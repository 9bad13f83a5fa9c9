//! Positioned syntax errors raised by the tokenizer and the concept parser.

use std::fmt;

use text_size::{TextRange, TextSize};

use super::codes::ErrorCode;
use crate::base::DocumentText;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error that prevents valid parsing
    #[default]
    Error,
    /// A warning that doesn't prevent parsing
    Warning,
    /// Informational message
    Information,
    /// An informational hint
    Hint,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Information => "information",
            Self::Hint => "hint",
        }
    }

    /// Convert to LSP severity number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            Self::Error => 1,
            Self::Warning => 2,
            Self::Information => 3,
            Self::Hint => 4,
        }
    }
}

/// A 1-based line/column location in a DSL script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FilePosition {
    pub line: usize,
    pub column: usize,
}

impl FilePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Script position of a byte offset.
    pub fn of_offset(text: &DocumentText, offset: TextSize) -> Self {
        let position = text.line_chr_of(offset);
        Self::new(position.line + 1, position.chr + 1)
    }
}

impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.line, self.column)
    }
}

/// A fatal tokenizer or parser error.
///
/// Positions use the grammar's 1-based convention; `range` holds the same
/// location as byte offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DslSyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Categorized error code
    pub code: ErrorCode,
    /// Byte range in the script
    pub range: TextRange,
    /// 1-based start position
    pub begin: FilePosition,
    /// 1-based end position
    pub end: FilePosition,
}

impl DslSyntaxError {
    pub fn new(message: impl Into<String>, code: ErrorCode, text: &DocumentText, range: TextRange) -> Self {
        Self {
            message: message.into(),
            code,
            range,
            begin: FilePosition::of_offset(text, range.start()),
            end: FilePosition::of_offset(text, range.end()),
        }
    }
}

impl fmt::Display for DslSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.begin, self.message)
    }
}

impl std::error::Error for DslSyntaxError {}
