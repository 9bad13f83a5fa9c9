//! Keyword completion.

use std::sync::Arc;

use smol_str::SmolStr;

use super::analysis_result::AnalysisResult;
use super::concept_queries::ConceptQueries;
use crate::syntax::DslSyntax;

/// Kind of completion item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionKind {
    Keyword,
    /// A word already used in the document
    Word,
}

impl CompletionKind {
    /// Convert to LSP completion item kind number.
    pub fn to_lsp(&self) -> u32 {
        match self {
            CompletionKind::Keyword => 14, // Keyword
            CompletionKind::Word => 1,     // Text
        }
    }
}

/// A completion suggestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    /// The text to insert.
    pub label: Arc<str>,
    pub kind: CompletionKind,
    /// Signatures of the keyword (shown after label).
    pub detail: Option<Arc<str>>,
    /// Documentation (shown in popup).
    pub documentation: Option<Arc<str>>,
}

impl CompletionItem {
    pub fn new(label: impl Into<Arc<str>>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: None,
            documentation: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<Arc<str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_documentation(mut self, doc: impl Into<Arc<str>>) -> Self {
        self.documentation = Some(doc.into());
        self
    }
}

/// Words to offer at the cursor, in display order.
///
/// - inside a comment: nothing
/// - after a keyword that is not under the cursor: words used elsewhere in the document
/// - otherwise: keywords valid in the enclosing block
pub fn completion_keywords(result: &AnalysisResult, syntax: &DslSyntax) -> Vec<SmolStr> {
    if result.inside_comment || result.is_blocked() {
        return Vec::new();
    }
    if result.keyword_token.is_some() && !result.is_cursor_on_keyword() {
        return result.non_keyword_words.clone();
    }
    let parent = result.innermost_concept().map(|node| node.concept_type);
    ConceptQueries::new(syntax).keywords_for_parent(parent)
}

/// Completion items with signature details for keywords.
pub fn completions(result: &AnalysisResult, syntax: &DslSyntax) -> Vec<CompletionItem> {
    let queries = ConceptQueries::new(syntax);
    completion_keywords(result, syntax)
        .into_iter()
        .map(|word| match queries.signatures_for(&word) {
            Some(signatures) => {
                let detail = signatures.iter().map(|s| s.label.as_str()).collect::<Vec<_>>().join("\n");
                let item = CompletionItem::new(word.as_str(), CompletionKind::Keyword).with_detail(detail);
                match signatures.iter().find_map(|s| s.documentation.as_deref()) {
                    Some(doc) => item.with_documentation(doc),
                    None => item,
                }
            }
            None => CompletionItem::new(word.as_str(), CompletionKind::Word),
        })
        .collect()
}
