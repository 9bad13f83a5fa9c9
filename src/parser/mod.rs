//! Tokenizer and concept parser for the DSL.
//!
//! ## Architecture
//!
//! ```text
//! Script text
//!     ↓
//! Lexer (logos) → raw tokens, comments included
//!     ↓
//! Tokenizer → decoded Token stream ending with EndOfFile
//!     ↓
//! DslParser → ConceptNode list, with ParseObserver events along the way
//! ```
//!
//! The parser is driven entirely by the [`DslSyntax`](crate::syntax::DslSyntax)
//! model: there is no hard-coded grammar.

mod concept_parser;
mod dsl_parser;
mod errors;
mod lexer;
mod node;
mod token_reader;
mod tokenizer;

pub use concept_parser::{ConceptParser, ParseFailure};
pub use dsl_parser::{DslParser, NoopObserver, ParseObserver};
pub use errors::{DslSyntaxError, ErrorCode, FilePosition, Severity};
pub use lexer::{LexToken, Lexer, LogosToken};
pub use node::{ConceptNode, MemberValue};
pub use token_reader::TokenReader;
pub use tokenizer::{
    DslScript, ExternalTextReader, FileSystemReader, Token, TokenKind, Tokenizer, TokenizerOutput,
};
