//! Token stream provider.
//!
//! The primary stream handed to the concept parser is comment-free and ends
//! with a single [`TokenKind::EndOfFile`] token. Comments are recovered by an
//! independent second scan ([`Tokenizer::comments`]) over the same raw text.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use smol_str::SmolStr;
use text_size::{TextRange, TextSize};

use super::errors::{DslSyntaxError, ErrorCode};
use super::lexer::{LexToken, Lexer, LogosToken};
use crate::base::DocumentText;

/// A DSL script: the text being tokenized and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DslScript {
    pub name: SmolStr,
    pub path: Option<PathBuf>,
    pub text: DocumentText,
}

impl DslScript {
    pub fn new(name: impl Into<SmolStr>, text: impl Into<DocumentText>) -> Self {
        Self {
            name: name.into(),
            path: None,
            text: text.into(),
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Kind of a token in the primary stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A word: keyword or identifier
    Text,
    SingleQuotedString,
    DoubleQuotedString,
    /// Content of a `<file>` reference
    ExternalText,
    /// Any single punctuation character
    Special,
    Comment,
    EndOfFile,
}

impl TokenKind {
    /// Token kinds that can be read as a member value.
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Self::Text | Self::SingleQuotedString | Self::DoubleQuotedString | Self::ExternalText
        )
    }
}

/// A token with its decoded value and byte span in the owning script.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: SmolStr,
    pub start: TextSize,
    pub end: TextSize,
    pub script: Arc<DslScript>,
}

impl Token {
    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// Check whether this token is the given special character or word.
    pub fn is(&self, text: &str) -> bool {
        match self.kind {
            TokenKind::Special | TokenKind::Text => self.value == text,
            _ => false,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})@{:?}", self.kind, self.value, self.range())
    }
}

/// Reads the content of `<file>` references.
pub trait ExternalTextReader: Send + Sync {
    fn read(&self, script: &DslScript, relative_path: &str) -> Result<String, String>;
}

/// Resolves external text relative to the directory of the script.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSystemReader;

impl ExternalTextReader for FileSystemReader {
    fn read(&self, script: &DslScript, relative_path: &str) -> Result<String, String> {
        let base = script
            .path
            .as_deref()
            .and_then(Path::parent)
            .ok_or_else(|| format!("script '{}' has no location on disk", script.name))?;
        let path = base.join(relative_path);
        std::fs::read_to_string(&path).map_err(|e| format!("{}: {}", path.display(), e))
    }
}

/// Output of the primary tokenization pass.
#[derive(Debug, Clone)]
pub struct TokenizerOutput {
    /// Tokens read before the first fatal error, always ending with `EndOfFile`.
    pub tokens: Vec<Token>,
    pub error: Option<DslSyntaxError>,
}

/// Wraps the lexer with value decoding and error reporting.
pub struct Tokenizer<'a> {
    script: Arc<DslScript>,
    reader: &'a dyn ExternalTextReader,
}

impl<'a> Tokenizer<'a> {
    pub fn new(script: Arc<DslScript>, reader: &'a dyn ExternalTextReader) -> Self {
        Self { script, reader }
    }

    /// Tokenize the whole script, stopping at the first fatal error.
    pub fn tokenize(&self) -> TokenizerOutput {
        let mut tokens = Vec::new();
        let error = self.tokenize_into(&mut tokens);
        TokenizerOutput { tokens, error }
    }

    /// Like [`Tokenizer::tokenize`], but appends to `tokens` as it goes, so
    /// the tokens read so far stay in place if the external text reader
    /// panics.
    pub fn tokenize_into(&self, tokens: &mut Vec<Token>) -> Option<DslSyntaxError> {
        let mut error = None;
        for raw in Lexer::new(self.script.text.as_str()) {
            if raw.kind.is_comment() {
                continue;
            }
            match self.convert(&raw) {
                Ok(token) => tokens.push(token),
                Err(e) => {
                    error = Some(e);
                    break;
                }
            }
        }

        let eof = self.script.text.len();
        tokens.push(Token {
            kind: TokenKind::EndOfFile,
            value: SmolStr::default(),
            start: eof,
            end: eof,
            script: self.script.clone(),
        });
        error
    }

    /// Second, independent scan that keeps only comment tokens.
    ///
    /// Never fails: the primary pass already reports real errors.
    pub fn comments(&self) -> Vec<Token> {
        Lexer::new(self.script.text.as_str())
            .filter(|raw| raw.kind.is_comment())
            .map(|raw| self.token(TokenKind::Comment, raw.text, raw.range))
            .collect()
    }

    fn token(&self, kind: TokenKind, value: &str, range: TextRange) -> Token {
        Token {
            kind,
            value: SmolStr::new(value),
            start: range.start(),
            end: range.end(),
            script: self.script.clone(),
        }
    }

    fn convert(&self, raw: &LexToken<'_>) -> Result<Token, DslSyntaxError> {
        let text = &self.script.text;
        match raw.kind {
            LogosToken::Text => Ok(self.token(TokenKind::Text, raw.text, raw.range)),
            LogosToken::Special => Ok(self.token(TokenKind::Special, raw.text, raw.range)),
            LogosToken::LineComment => Ok(self.token(TokenKind::Comment, raw.text, raw.range)),
            LogosToken::SingleQuoted => Ok(self.token(
                TokenKind::SingleQuotedString,
                &unquote(raw.text, '\''),
                raw.range,
            )),
            LogosToken::DoubleQuoted => Ok(self.token(
                TokenKind::DoubleQuotedString,
                &unquote(raw.text, '"'),
                raw.range,
            )),
            LogosToken::ExternalText => {
                let relative = &raw.text[1..raw.text.len() - 1];
                match self.reader.read(&self.script, relative) {
                    Ok(content) => Ok(self.token(TokenKind::ExternalText, &content, raw.range)),
                    Err(reason) => Err(DslSyntaxError::new(
                        format!("Cannot read the external text file '{}': {}", relative, reason),
                        ErrorCode::E0103,
                        text,
                        raw.range,
                    )),
                }
            }
            LogosToken::UnterminatedSingleQuoted | LogosToken::UnterminatedDoubleQuoted => {
                let quote = &raw.text[..1];
                Err(DslSyntaxError::new(
                    format!(
                        "Unexpected end of script within quoted string. Missing closing character: {}",
                        quote
                    ),
                    ErrorCode::E0101,
                    text,
                    raw.range,
                ))
            }
            LogosToken::UnterminatedExternalText => Err(DslSyntaxError::new(
                "Unexpected end of script within external text reference. Missing closing character: >",
                ErrorCode::E0102,
                text,
                raw.range,
            )),
        }
    }
}

/// Strip the surrounding quotes and collapse doubled quote characters.
fn unquote(quoted: &str, quote: char) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let doubled: String = [quote, quote].iter().collect();
    inner.replace(&doubled, &quote.to_string())
}
