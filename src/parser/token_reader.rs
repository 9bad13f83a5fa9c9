//! Cursor over a token stream.

use super::tokenizer::{Token, TokenKind};

/// A copyable read position in a token list that ends with `EndOfFile`.
///
/// Concept parsers try alternatives on copies and the winning copy replaces
/// the original.
#[derive(Debug, Clone, Copy)]
pub struct TokenReader<'t> {
    tokens: &'t [Token],
    position: usize,
}

impl<'t> TokenReader<'t> {
    /// # Panics
    /// Panics if `tokens` is empty; the tokenizer always emits `EndOfFile`.
    pub fn new(tokens: &'t [Token]) -> Self {
        assert!(!tokens.is_empty(), "token stream must end with EndOfFile");
        Self { tokens, position: 0 }
    }

    pub fn tokens(&self) -> &'t [Token] {
        self.tokens
    }

    /// Index of the next token to read.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The next token to read; stays on `EndOfFile` at the end.
    pub fn current(&self) -> &'t Token {
        let index = self.position.min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub fn end_of_input(&self) -> bool {
        self.current().kind == TokenKind::EndOfFile
    }

    /// The token most recently consumed, if any.
    pub fn last_token_read(&self) -> Option<&'t Token> {
        self.position.checked_sub(1).map(|i| &self.tokens[i])
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.current();
        if !self.end_of_input() {
            self.position += 1;
        }
        token
    }

    /// Read a word, a quoted string or external text.
    pub fn read_text(&mut self) -> Result<&'t Token, String> {
        let token = self.current();
        if token.kind.is_value() {
            Ok(self.advance())
        } else {
            Err(format!("Expected text, found {}.", describe(token)))
        }
    }

    /// Consume the current token if it is exactly this special character or word.
    pub fn try_read(&mut self, text: &str) -> bool {
        if self.current().is(text) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the current token if it is this keyword (case-insensitive).
    pub fn try_read_keyword(&mut self, keyword: &str) -> bool {
        let token = self.current();
        if token.kind == TokenKind::Text && token.value.eq_ignore_ascii_case(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }
}

/// Human-readable token description for error messages.
pub fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::EndOfFile => "end of script".to_string(),
        _ => format!("\"{}\"", token.value),
    }
}
