//! Position-aware re-analysis of a document.
//!
//! A run tokenizes and parses the document cut just past the line that holds
//! the cursor, and watches the parser through [`ParseObserver`] events to work
//! out which keyword, block context and member the cursor is at.
//!
//! ```text
//! text ──truncate──▶ tokens ──DslParser──▶ observer events ──▶ AnalysisResult
//!                      │                                           ▲
//!                      └──── comment re-scan ──── comment overlay ─┘
//! ```

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexSet;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;
use text_size::TextSize;

use super::analysis_result::{AnalysisError, AnalysisResult};
use crate::base::{DocumentText, LineChr};
use crate::parser::{
    ConceptNode, DslParser, DslScript, ErrorCode, MemberValue, ParseObserver, Severity, Token, TokenKind,
    TokenReader, Tokenizer,
};
use crate::project::ProjectContext;
use crate::syntax::{ConceptTypeId, DslSyntax};

/// One analysis of one document snapshot at one cursor position.
///
/// [`AnalysisRun::run`] consumes the run, so a run can only execute once.
pub struct AnalysisRun<'c> {
    text: DocumentText,
    position: Option<LineChr>,
    context: &'c ProjectContext,
    script_path: Option<PathBuf>,
}

impl<'c> AnalysisRun<'c> {
    /// `position: None` analyzes the whole document (used for diagnostics).
    pub fn new(text: DocumentText, position: Option<LineChr>, context: &'c ProjectContext) -> Self {
        Self {
            text,
            position,
            context,
            script_path: None,
        }
    }

    /// Location of the script on disk, for resolving `<external>` text.
    pub fn with_script_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.script_path = Some(path.into());
        self
    }

    pub fn run(self) -> AnalysisResult {
        let text = match self.position {
            Some(position) => self.text.truncate_at_line_end(self.text.offset_of(position)),
            None => self.text.clone(),
        };
        let target_offset = self.position.map(|p| text.offset_of(p)).unwrap_or_default();

        let mut result = AnalysisResult {
            text: text.clone(),
            position: self.position,
            target_offset,
            ..AnalysisResult::default()
        };
        let mut tracker = CursorTracker::new(target_offset);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.tokenize_and_parse(&text, &mut result, &mut tracker);
        }));
        tracker.apply_to(&mut result);
        if let Err(payload) = outcome {
            let message = format!("Unexpected error during analysis: {}", panic_message(payload.as_ref()));
            tracing::warn!("{}", message);
            result.errors.push(AnalysisError {
                code: Some(ErrorCode::E0999),
                ..AnalysisError::message_only(message, Severity::Error)
            });
        }

        overlay_comments(&mut result);
        result.successful_run = true;

        tracing::debug!(
            "Analysis at {:?}: {} tokens, keyword {:?}, {} errors",
            self.position,
            result.tokens.len(),
            result.keyword_token.as_ref().map(|t| t.value.as_str()),
            result.errors.len()
        );
        result
    }

    fn tokenize_and_parse(&self, text: &DocumentText, result: &mut AnalysisResult, tracker: &mut CursorTracker) {
        let syntax = self.context.syntax();
        let mut script = DslScript::new("document", text.clone());
        if let Some(path) = &self.script_path {
            script = script.with_path(path.clone());
        }

        let tokenizer = Tokenizer::new(Arc::new(script), self.context.external_text_reader());
        result.comment_tokens = tokenizer.comments();
        let tokenizer_error = tokenizer.tokenize_into(&mut result.tokens);
        let tokenizer_failed = tokenizer_error.is_some();
        if let Some(error) = &tokenizer_error {
            result.errors.push(AnalysisError::from_syntax_error(error));
        }
        result.non_keyword_words = non_keyword_words(syntax, &result.tokens);

        let tokens = result.tokens.clone();
        tracker.last_token_before_target = last_token_before(&tokens, result.target_offset);

        if let Err(error) = DslParser::new(syntax).parse(&tokens, tracker) {
            // A truncated token stream always fails to parse; the tokenizer
            // error is the one worth reporting.
            if !tokenizer_failed {
                result.errors.push(AnalysisError::from_syntax_error(&error));
            }
        }
    }
}

/// Index of the last token starting strictly before `target`.
fn last_token_before(tokens: &[Token], target: TextSize) -> Option<usize> {
    if target == TextSize::new(0) {
        return None;
    }
    let limit = target - TextSize::new(1);
    tokens
        .iter()
        .rposition(|t| t.kind != TokenKind::EndOfFile && t.start <= limit)
}

fn non_keyword_words(syntax: &DslSyntax, tokens: &[Token]) -> Vec<SmolStr> {
    let mut seen = FxHashSet::default();
    let mut words: Vec<SmolStr> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Text && !syntax.is_keyword(&t.value))
        .filter(|t| seen.insert(t.value.clone()))
        .map(|t| t.value.clone())
        .collect();
    words.sort_by_key(|w| w.to_lowercase());
    words
}

/// Comments suppress keyword features: inside a comment, or at the end of a
/// line whose trailing comment precedes the cursor.
fn overlay_comments(result: &mut AnalysisResult) {
    let target = result.target_offset;
    let mut preceding: Option<&Token> = None;
    let mut inside = false;
    for comment in &result.comment_tokens {
        if comment.start < target && target < comment.end {
            inside = true;
            break;
        }
        if comment.end <= target {
            preceding = Some(comment);
        }
    }
    if !inside {
        inside = preceding
            .is_some_and(|comment| result.text.line_chr_of(comment.end).line == result.text.line_chr_of(target).line);
    }
    if inside {
        result.inside_comment = true;
        result.keyword_token = None;
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Parser observer that records cursor-relative state.
struct CursorTracker {
    target_offset: TextSize,
    last_token_before_target: Option<usize>,
    keyword_token: Option<Token>,
    next_keyword_token: Option<Token>,
    concept_context: Vec<Arc<ConceptNode>>,
    last_token_parsed: FxHashMap<ConceptTypeId, Token>,
    last_member_read: FxHashMap<ConceptTypeId, usize>,
    concepts_valid_at_cursor: IndexSet<ConceptTypeId>,
}

impl CursorTracker {
    fn new(target_offset: TextSize) -> Self {
        Self {
            target_offset,
            last_token_before_target: None,
            keyword_token: None,
            next_keyword_token: None,
            concept_context: Vec::new(),
            last_token_parsed: FxHashMap::default(),
            last_member_read: FxHashMap::default(),
            concepts_valid_at_cursor: IndexSet::new(),
        }
    }

    fn apply_to(self, result: &mut AnalysisResult) {
        result.keyword_token = self.keyword_token;
        result.next_keyword_token = self.next_keyword_token;
        result.concept_context = self.concept_context;
        result.last_token_parsed = self.last_token_parsed;
        result.last_member_read = self.last_member_read;
        result.concepts_valid_at_cursor = self.concepts_valid_at_cursor;
    }
}

impl ParseObserver for CursorTracker {
    fn on_keyword(&mut self, reader: &TokenReader<'_>, keyword: Option<&str>) {
        let token = reader.current();
        if token.start <= self.target_offset {
            if keyword.is_some() {
                self.keyword_token = Some(token.clone());
                self.last_token_parsed.clear();
                self.last_member_read.clear();
                self.concepts_valid_at_cursor.clear();
            } else if self.target_offset > token.end {
                self.keyword_token = None;
            }
        } else if self.next_keyword_token.is_none() {
            self.next_keyword_token = Some(token.clone());
        }
        tracing::trace!("keyword {:?} at {:?}", keyword, token.range());
    }

    fn on_member_read(
        &mut self,
        reader: &TokenReader<'_>,
        concept: ConceptTypeId,
        member_index: usize,
        value: Result<&MemberValue, &str>,
    ) {
        if self.next_keyword_token.is_some() {
            return;
        }
        let (Some(last_before), Some(read)) = (self.last_token_before_target, reader.position().checked_sub(1)) else {
            return;
        };

        if read <= last_before && value.is_ok() {
            self.last_token_parsed.insert(concept, reader.tokens()[read].clone());
            self.last_member_read.insert(concept, member_index);
        }
        if read >= last_before {
            self.concepts_valid_at_cursor.insert(concept);
        }
        tracing::trace!("member {} of {:?} read up to token {}: {}", member_index, concept, read, value.is_ok());
    }

    fn on_update_context(&mut self, reader: &TokenReader<'_>, context: &[Arc<ConceptNode>], is_opening: bool) {
        let Some(trigger) = reader.last_token_read() else {
            return;
        };
        if trigger.end <= self.target_offset {
            self.concept_context = context.to_vec();
            self.keyword_token = None;
        }
        tracing::trace!("context depth {} (opening: {})", context.len(), is_opening);
    }
}
