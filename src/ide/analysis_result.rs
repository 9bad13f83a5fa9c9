//! The output of one analysis run.

use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextSize;

use crate::base::{DocumentText, LineChr, Span};
use crate::parser::{ConceptNode, DslSyntaxError, ErrorCode, Severity, Token, TokenKind};
use crate::syntax::signature::parsable_member_index;
use crate::syntax::{ConceptTypeId, DslSyntax};

/// A positioned error or warning found while analyzing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisError {
    pub message: String,
    /// Zero-based range; message-only errors use an empty range at the start
    pub range: Span,
    pub severity: Severity,
    pub code: Option<ErrorCode>,
}

impl AnalysisError {
    /// Convert a tokenizer or parser error from 1-based to 0-based coordinates.
    pub fn from_syntax_error(error: &DslSyntaxError) -> Self {
        let begin = LineChr::new(error.begin.line.saturating_sub(1), error.begin.column.saturating_sub(1));
        let end = LineChr::new(error.end.line.saturating_sub(1), error.end.column.saturating_sub(1));
        Self {
            message: error.message.clone(),
            range: Span::new(begin, end),
            severity: Severity::Error,
            code: Some(error.code),
        }
    }

    /// An error with no usable position.
    pub fn message_only(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            range: Span::empty(LineChr::ZERO),
            severity,
            code: None,
        }
    }
}

/// What the parser saw around one cursor position.
///
/// Populated by a single [`AnalysisRun`](super::AnalysisRun) and never
/// modified afterwards; shared between requests as `Arc<AnalysisResult>`.
#[derive(Debug, Clone, Default)]
pub struct AnalysisResult {
    /// The analyzed (possibly truncated) text
    pub text: DocumentText,
    /// Cursor position, `None` for a whole-document run
    pub position: Option<LineChr>,
    pub target_offset: TextSize,
    pub tokens: Vec<Token>,
    pub comment_tokens: Vec<Token>,
    /// Distinct words that are not keywords, sorted
    pub non_keyword_words: Vec<SmolStr>,
    /// Concepts whose blocks enclose the cursor, outermost first
    pub concept_context: Vec<Arc<ConceptNode>>,
    pub keyword_token: Option<Token>,
    pub next_keyword_token: Option<Token>,
    pub inside_comment: bool,
    pub successful_run: bool,
    pub errors: Vec<AnalysisError>,
    /// Last token read for each concept type before the cursor
    pub last_token_parsed: FxHashMap<ConceptTypeId, Token>,
    /// Index (in the concept type) of the member that read `last_token_parsed`
    pub last_member_read: FxHashMap<ConceptTypeId, usize>,
    /// Concept types still being matched at the cursor, in discovery order
    pub concepts_valid_at_cursor: IndexSet<ConceptTypeId>,
}

impl AnalysisResult {
    /// A result standing in for an analysis that could not run.
    pub fn blocked(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            errors: vec![AnalysisError::message_only(message, severity)],
            ..Self::default()
        }
    }

    /// True for results produced by [`AnalysisResult::blocked`].
    pub fn is_blocked(&self) -> bool {
        !self.successful_run && self.tokens.is_empty() && !self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.severity.is_error())
    }

    /// The innermost concept whose block encloses the cursor.
    pub fn innermost_concept(&self) -> Option<&Arc<ConceptNode>> {
        self.concept_context.last()
    }

    /// The non-EOF token touching `offset` (start <= offset <= end).
    pub fn token_at(&self, offset: TextSize) -> Option<&Token> {
        self.tokens
            .iter()
            .filter(|t| t.kind != TokenKind::EndOfFile)
            .find(|t| t.start <= offset && offset <= t.end)
    }

    pub fn is_cursor_on_keyword(&self) -> bool {
        self.keyword_token
            .as_ref()
            .is_some_and(|t| t.start <= self.target_offset && self.target_offset <= t.end)
    }

    /// The keyword of the statement at the cursor, falling back to the
    /// keyword of the enclosing block's concept.
    pub fn effective_keyword(&self, syntax: &DslSyntax) -> Option<SmolStr> {
        if let Some(token) = &self.keyword_token {
            return Some(token.value.clone());
        }
        self.innermost_concept()
            .and_then(|node| syntax.concept_type(node.concept_type).keyword.clone())
    }

    /// Ordinal, among the parsable members of `concept`, of the member the
    /// cursor is at.
    pub fn active_parameter(&self, syntax: &DslSyntax, concept: ConceptTypeId) -> usize {
        let Some(token) = self.last_token_parsed.get(&concept) else {
            return 0;
        };
        let concept_type = syntax.concept_type(concept);
        let member = self.last_member_read.get(&concept).copied().unwrap_or(0);
        let mut index = parsable_member_index(concept_type, member).unwrap_or(0);

        let at_keyword = concept_type
            .keyword
            .as_deref()
            .is_some_and(|k| token.value.eq_ignore_ascii_case(k));
        let touching_token = token.start <= self.target_offset && self.target_offset <= token.end;
        if at_keyword || !touching_token {
            index += 1;
        }
        index
    }

    /// Every concept type valid at the cursor with its active parameter.
    pub fn valid_concepts_with_active_parameter(&self, syntax: &DslSyntax) -> Vec<(ConceptTypeId, usize)> {
        self.concepts_valid_at_cursor
            .iter()
            .map(|&id| (id, self.active_parameter(syntax, id)))
            .collect()
    }
}
