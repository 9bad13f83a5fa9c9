//! Document text with line/character <-> offset conversion.
//!
//! Offsets are UTF-8 byte offsets. A `\r\n` terminator occupies a single
//! "end of line" slot: any character index at or past the end of a line
//! resolves to the offset of the terminator's first byte.

use std::sync::{Arc, OnceLock};

use text_size::TextSize;

use super::LineChr;

/// Immutable document text plus a lazily computed table of line starts.
///
/// Cloning is cheap and shares the memoized line table.
#[derive(Clone, Debug)]
pub struct DocumentText {
    text: Arc<str>,
    line_starts: Arc<OnceLock<Vec<TextSize>>>,
}

impl Default for DocumentText {
    fn default() -> Self {
        Self::new("")
    }
}

impl PartialEq for DocumentText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for DocumentText {}

impl From<&str> for DocumentText {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for DocumentText {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl DocumentText {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self {
            text: text.into(),
            line_starts: Arc::new(OnceLock::new()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn line_starts(&self) -> &[TextSize] {
        self.line_starts.get_or_init(|| {
            let mut starts = vec![TextSize::new(0)];
            for (i, b) in self.text.bytes().enumerate() {
                if b == b'\n' {
                    starts.push(TextSize::new(i as u32 + 1));
                }
            }
            starts
        })
    }

    /// Number of lines; an empty document has one (empty) line.
    pub fn line_count(&self) -> usize {
        self.line_starts().len()
    }

    /// Offset where the content of `line` ends, excluding its terminator.
    fn line_content_end(&self, line: usize) -> usize {
        let starts = self.line_starts();
        let Some(next) = starts.get(line + 1) else {
            return self.text.len();
        };
        let next = usize::from(*next);
        let bytes = self.text.as_bytes();
        if next >= 2 && bytes[next - 2] == b'\r' {
            next - 2
        } else {
            next - 1
        }
    }

    /// Length of a line in characters, without its terminator.
    pub fn line_length(&self, line: usize) -> usize {
        let line = line.min(self.line_count() - 1);
        let start = usize::from(self.line_starts()[line]);
        self.text[start..self.line_content_end(line)].chars().count()
    }

    /// Absolute offset of a position. Out-of-range lines clamp to the last
    /// line, out-of-range characters clamp to the end of the line.
    pub fn offset_of(&self, position: LineChr) -> TextSize {
        if self.text.is_empty() {
            return TextSize::new(0);
        }
        let line = position.line.min(self.line_count() - 1);
        let start = usize::from(self.line_starts()[line]);
        let end = self.line_content_end(line);
        let offset = self.text[start..end]
            .char_indices()
            .nth(position.chr)
            .map(|(i, _)| start + i)
            .unwrap_or(end);
        TextSize::new(offset as u32)
    }

    /// Position of an absolute offset. Offsets past the end clamp to the end
    /// of the document; the `\n` of a `\r\n` pair maps to the `\r`.
    pub fn line_chr_of(&self, offset: TextSize) -> LineChr {
        if self.text.is_empty() {
            return LineChr::ZERO;
        }
        let mut offset = usize::from(offset).min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        let bytes = self.text.as_bytes();
        if offset > 0 && bytes.get(offset) == Some(&b'\n') && bytes[offset - 1] == b'\r' {
            offset -= 1;
        }
        let starts = self.line_starts();
        let line = starts.partition_point(|s| usize::from(*s) <= offset) - 1;
        let start = usize::from(starts[line]);
        LineChr::new(line, self.text[start..offset].chars().count())
    }

    /// Offset just past the first `\n` at or after `offset`, or the end of
    /// the document when no line ending follows.
    pub fn end_of_line_after(&self, offset: TextSize) -> TextSize {
        let from = usize::from(offset).min(self.text.len());
        match self.text[from..].find('\n') {
            Some(i) => TextSize::new((from + i + 1) as u32),
            None => self.len(),
        }
    }

    /// The document cut just past the line ending that follows `offset`.
    pub fn truncate_at_line_end(&self, offset: TextSize) -> DocumentText {
        let end = self.end_of_line_after(offset);
        if end == self.len() {
            return self.clone();
        }
        DocumentText::new(&self.text[..usize::from(end)])
    }
}
