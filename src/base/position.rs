//! Position tracking for documents
//!
//! Stores zero-based line/character locations for LSP-facing features
//! like hover, signature help and diagnostics.

/// A span representing a range in a document (0-indexed for LSP compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: LineChr,
    pub end: LineChr,
}

/// A position in a document (0-indexed).
///
/// `chr` counts characters (Unicode scalar values) from the start of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LineChr {
    pub line: usize,
    pub chr: usize,
}

impl Span {
    pub fn new(start: LineChr, end: LineChr) -> Self {
        Self { start, end }
    }

    /// Create a span from line/character coordinates
    pub fn from_coords(start_line: usize, start_chr: usize, end_line: usize, end_chr: usize) -> Self {
        Self {
            start: LineChr::new(start_line, start_chr),
            end: LineChr::new(end_line, end_chr),
        }
    }

    /// Zero-width span at a single position
    pub fn empty(at: LineChr) -> Self {
        Self { start: at, end: at }
    }

    /// Check if a position falls within this span
    pub fn contains(&self, position: LineChr) -> bool {
        self.start <= position && position <= self.end
    }
}

impl LineChr {
    pub const ZERO: LineChr = LineChr { line: 0, chr: 0 };

    pub fn new(line: usize, chr: usize) -> Self {
        Self { line, chr }
    }
}

impl std::fmt::Display for LineChr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.line, self.chr)
    }
}
