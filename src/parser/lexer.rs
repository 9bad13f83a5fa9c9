//! Logos-based lexer for DSL scripts
//!
//! This is the low-level "read one token" primitive. It does not drop
//! comments and does not report errors: unterminated quotes and external
//! text references are returned as their own token kinds so that the
//! [`Tokenizer`](super::Tokenizer) can decide what is fatal.

use logos::Logos;
use text_size::{TextRange, TextSize};

/// A raw token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexToken<'a> {
    pub kind: LogosToken,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }

    /// Read the next raw token, skipping whitespace.
    pub fn read_token(&mut self) -> Option<LexToken<'a>> {
        let logos_token = self.inner.next()?;
        let span = self.inner.span();
        let range = TextRange::new(TextSize::new(span.start as u32), TextSize::new(span.end as u32));

        // Everything that is not a word, a quote or an external text reference
        // is a single special character.
        let kind = logos_token.unwrap_or(LogosToken::Special);

        Some(LexToken {
            kind,
            text: self.inner.slice(),
            range,
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_token()
    }
}

/// Logos token enum
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"\s+")]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"//[^\r\n]*")]
    LineComment,

    // =========================================================================
    // WORDS
    // =========================================================================
    #[regex(r"[\p{L}\p{N}_]+")]
    Text,

    // =========================================================================
    // QUOTED STRINGS (a doubled quote escapes itself)
    // =========================================================================
    #[regex(r"'([^']|'')*'")]
    SingleQuoted,

    #[regex(r"'([^']|'')*")]
    UnterminatedSingleQuoted,

    #[regex(r#""([^"]|"")*""#)]
    DoubleQuoted,

    #[regex(r#""([^"]|"")*"#)]
    UnterminatedDoubleQuoted,

    // =========================================================================
    // EXTERNAL TEXT FILE REFERENCE `<relative/path.sql>`
    // =========================================================================
    #[regex(r"<[^>]*>")]
    ExternalText,

    #[regex(r"<[^>]*")]
    UnterminatedExternalText,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[regex(r#"[^\s\p{L}\p{N}_'"<]"#)]
    Special,
}

impl LogosToken {
    pub fn is_comment(&self) -> bool {
        matches!(self, Self::LineComment)
    }

    pub fn is_unterminated(&self) -> bool {
        matches!(
            self,
            Self::UnterminatedSingleQuoted | Self::UnterminatedDoubleQuoted | Self::UnterminatedExternalText
        )
    }
}
