//! Diagnostics: errors and warnings of a whole-document analysis.

use std::sync::Arc;

use super::analysis_result::AnalysisResult;
use crate::base::Span;
use crate::parser::Severity;

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Range in the document (0-indexed).
    pub span: Span,
    pub severity: Severity,
    /// Error code (e.g., "E0201").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Diagnostics for a result. An empty list clears the document's diagnostics.
pub fn diagnostics(result: &AnalysisResult) -> Vec<Diagnostic> {
    result
        .errors
        .iter()
        .map(|error| {
            let diagnostic = Diagnostic {
                span: error.range,
                severity: error.severity,
                code: None,
                message: error.message.as_str().into(),
            };
            match error.code {
                Some(code) => diagnostic.with_code(code.as_str()),
                None => diagnostic,
            }
        })
        .collect()
}
