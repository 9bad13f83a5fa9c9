//! Parsed concept instances.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::syntax::signature::keyword_or_type_name;
use crate::syntax::{ConceptTypeId, DslSyntax};

/// Value of one member of a parsed concept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValue {
    Text(SmolStr),
    Concept(Arc<ConceptNode>),
}

/// One parsed occurrence of a concept type.
///
/// Members are stored by their index in the concept type; unparsable members
/// and referenced concepts' non-key members stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptNode {
    pub concept_type: ConceptTypeId,
    pub members: Vec<Option<MemberValue>>,
}

impl ConceptNode {
    pub fn new(concept_type: ConceptTypeId, member_count: usize) -> Self {
        Self {
            concept_type,
            members: vec![None; member_count],
        }
    }

    pub fn member(&self, index: usize) -> Option<&MemberValue> {
        self.members.get(index).and_then(Option::as_ref)
    }

    /// Key values joined with `.`, e.g. `Common.Principal.Name`.
    pub fn key_text(&self, syntax: &DslSyntax) -> String {
        let concept = syntax.concept_type(self.concept_type);
        concept
            .key_members()
            .filter_map(|(i, _)| self.member(i))
            .map(|value| match value {
                MemberValue::Text(text) => text.to_string(),
                MemberValue::Concept(node) => node.key_text(syntax),
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// `Keyword Key.Text`
    pub fn describe(&self, syntax: &DslSyntax) -> String {
        let concept = syntax.concept_type(self.concept_type);
        let keys = self.key_text(syntax);
        if keys.is_empty() {
            keyword_or_type_name(concept).to_string()
        } else {
            format!("{} {}", keyword_or_type_name(concept), keys)
        }
    }
}
