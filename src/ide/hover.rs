//! Hover documentation for concept keywords.

use smol_str::SmolStr;

use super::analysis_result::AnalysisResult;
use super::concept_queries::ConceptQueries;
use crate::base::LineChr;
use crate::syntax::DslSyntax;

/// Result of a hover request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// Signatures of the keyword with their documentation.
    pub contents: String,
    pub keyword: SmolStr,
    /// Start of the hovered keyword (0-indexed).
    pub start: LineChr,
    /// End of the hovered keyword (0-indexed).
    pub end: LineChr,
}

/// Describe the keyword under the cursor.
pub fn hover(result: &AnalysisResult, syntax: &DslSyntax) -> Option<HoverResult> {
    if !result.is_cursor_on_keyword() {
        return None;
    }
    let token = result.keyword_token.as_ref()?;
    let contents = ConceptQueries::new(syntax).full_description(&token.value)?;
    Some(HoverResult {
        contents,
        keyword: token.value.clone(),
        start: result.text.line_chr_of(token.start),
        end: result.text.line_chr_of(token.end),
    })
}
