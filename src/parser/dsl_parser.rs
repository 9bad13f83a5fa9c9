//! Statement-level DSL parser.
//!
//! A script is a sequence of concept statements. Each statement starts with a
//! keyword and ends with `;` or with a `{ ... }` block whose statements are
//! nested in it. When several concept types share a keyword, every one is
//! tried from the same position and the interpretation that reads the most
//! tokens wins.

use std::sync::Arc;

use super::concept_parser::{ConceptParser, ParseFailure};
use super::errors::{DslSyntaxError, ErrorCode};
use super::node::{ConceptNode, MemberValue};
use super::token_reader::{TokenReader, describe};
use super::tokenizer::{Token, TokenKind};
use crate::syntax::{ConceptTypeId, DslSyntax};

/// Hooks called while parsing, in token order.
///
/// Every method has an empty default so observers only implement what they
/// need.
pub trait ParseObserver {
    /// Before a statement is parsed. `keyword` is the word at the reader
    /// position, or `None` when the statement does not start with a word.
    fn on_keyword(&mut self, _reader: &TokenReader<'_>, _keyword: Option<&str>) {}

    /// After each attempt to read a parsable member of a top-level statement.
    fn on_member_read(
        &mut self,
        _reader: &TokenReader<'_>,
        _concept: ConceptTypeId,
        _member_index: usize,
        _value: Result<&MemberValue, &str>,
    ) {
    }

    /// After a `{` opened (`is_opening`) or a `}` closed a block.
    /// `context` lists the enclosing concepts, outermost first.
    fn on_update_context(&mut self, _reader: &TokenReader<'_>, _context: &[Arc<ConceptNode>], _is_opening: bool) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

pub struct DslParser<'s> {
    syntax: &'s DslSyntax,
}

impl<'s> DslParser<'s> {
    pub fn new(syntax: &'s DslSyntax) -> Self {
        Self { syntax }
    }

    /// Parse a token stream produced by the tokenizer into concepts, in
    /// statement order. Stops at the first error.
    pub fn parse(
        &self,
        tokens: &[Token],
        observer: &mut dyn ParseObserver,
    ) -> Result<Vec<Arc<ConceptNode>>, DslSyntaxError> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = TokenReader::new(tokens);
        let mut context: Vec<Arc<ConceptNode>> = Vec::new();
        let mut concepts = Vec::new();

        while !reader.end_of_input() {
            let node = Arc::new(self.parse_next_concept(&mut reader, &context, observer)?);
            concepts.push(node.clone());
            self.update_context(&mut reader, &mut context, node, observer)?;
        }

        if let Some(open) = context.last() {
            return Err(error_at(
                reader.current(),
                format!(
                    "Expected \"}}\" at the end of the script to close concept \"{}\".",
                    open.describe(self.syntax)
                ),
                ErrorCode::E0202,
            ));
        }

        tracing::trace!("Parsed {} concepts", concepts.len());
        Ok(concepts)
    }

    fn parse_next_concept(
        &self,
        reader: &mut TokenReader<'_>,
        context: &[Arc<ConceptNode>],
        observer: &mut dyn ParseObserver,
    ) -> Result<ConceptNode, DslSyntaxError> {
        let token = reader.current();
        let keyword = (token.kind == TokenKind::Text).then_some(token.value.as_str());
        observer.on_keyword(reader, keyword);

        if token.is("}") {
            return Err(error_at(token, "Unexpected \"}\".", ErrorCode::E0203));
        }
        let candidates = keyword.map(|k| self.syntax.by_keyword(k)).unwrap_or_default();
        if candidates.is_empty() {
            let message = match keyword {
                Some(word) => format!("Unrecognized concept keyword \"{}\".", word),
                None => format!("Expected a concept keyword, found {}.", describe(token)),
            };
            return Err(error_at(token, message, ErrorCode::E0301));
        }

        let mut interpretations: Vec<(ConceptNode, TokenReader<'_>)> = Vec::new();
        let mut furthest: Option<ParseFailure> = None;
        for &id in candidates {
            let mut attempt = *reader;
            match ConceptParser::new(self.syntax, id).parse(&mut attempt, context, observer) {
                Ok(node) => interpretations.push((node, attempt)),
                Err(failure) => {
                    if furthest.as_ref().is_none_or(|f| failure.position > f.position) {
                        furthest = Some(failure);
                    }
                }
            }
        }

        let Some(longest) = interpretations.iter().map(|(_, r)| r.position()).max() else {
            let failure = furthest.unwrap_or_else(|| ParseFailure {
                message: "Invalid concept.".to_string(),
                position: reader.position(),
            });
            let at = &reader.tokens()[failure.position.min(reader.tokens().len() - 1)];
            let message = format!("Cannot parse {}: {}", token.value, failure.message);
            return Err(error_at(at, message, ErrorCode::E0302));
        };
        interpretations.retain(|(_, r)| r.position() == longest);

        if interpretations.len() > 1 {
            let names = interpretations
                .iter()
                .map(|(node, _)| self.syntax.concept_type(node.concept_type).type_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(error_at(
                token,
                format!(
                    "Ambiguous syntax. There are multiple possible interpretations of keyword \"{}\": {}.",
                    token.value, names
                ),
                ErrorCode::E0303,
            ));
        }

        match interpretations.pop() {
            Some((node, next)) => {
                *reader = next;
                Ok(node)
            }
            None => Err(error_at(token, "Invalid concept.", ErrorCode::E0302)),
        }
    }

    fn update_context(
        &self,
        reader: &mut TokenReader<'_>,
        context: &mut Vec<Arc<ConceptNode>>,
        node: Arc<ConceptNode>,
        observer: &mut dyn ParseObserver,
    ) -> Result<(), DslSyntaxError> {
        if reader.try_read("{") {
            context.push(node);
            observer.on_update_context(reader, context, true);
        } else if !reader.try_read(";") {
            let token = reader.current();
            return Err(error_at(
                token,
                format!(
                    "Expected \";\" or \"{{\" after {}, found {}.",
                    node.describe(self.syntax),
                    describe(token)
                ),
                ErrorCode::E0201,
            ));
        }

        while reader.try_read("}") {
            if context.pop().is_none() {
                let brace = reader.last_token_read().unwrap_or_else(|| reader.current());
                return Err(error_at(brace, "Unexpected \"}\".", ErrorCode::E0203));
            }
            observer.on_update_context(reader, context, false);
        }
        Ok(())
    }
}

fn error_at(token: &Token, message: impl Into<String>, code: ErrorCode) -> DslSyntaxError {
    DslSyntaxError::new(message, code, &token.script.text, token.range())
}
