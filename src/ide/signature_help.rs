//! Parameter signature help.

use super::analysis_result::AnalysisResult;
use super::concept_queries::{ConceptQueries, SignatureInfo};
use crate::syntax::DslSyntax;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHelp {
    pub signatures: Vec<SignatureInfo>,
    /// Index into `signatures` of the first concept type still matched at the cursor
    pub active_signature: Option<usize>,
    pub active_parameter: Option<usize>,
}

/// Signatures of the keyword at the cursor and the parameter being typed.
///
/// Returns `None` when no keyword is active. When the cursor is past every
/// interpretation of the statement the signatures are still listed, with no
/// active entry.
pub fn signature_help(result: &AnalysisResult, syntax: &DslSyntax) -> Option<SignatureHelp> {
    let keyword = result.keyword_token.as_ref()?;
    let signatures = ConceptQueries::new(syntax).signatures_for(&keyword.value)?;

    let active = result.concepts_valid_at_cursor.iter().find_map(|concept| {
        signatures
            .iter()
            .position(|s| s.concept_type == *concept)
            .map(|index| (index, result.active_parameter(syntax, *concept)))
    });

    Some(SignatureHelp {
        active_signature: active.map(|(index, _)| index),
        active_parameter: active.map(|(_, parameter)| parameter),
        signatures,
    })
}
