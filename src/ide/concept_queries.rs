//! Queries over the syntax model: signatures and valid nesting.

use smol_str::SmolStr;

use crate::syntax::signature::{parameters, signature};
use crate::syntax::{ConceptTypeId, DslSyntax, ValueKind};

/// One signature of a keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureInfo {
    pub concept_type: ConceptTypeId,
    /// `Keyword <Key1: Type>.<Key2: Type> <Param: Type>`
    pub label: String,
    pub documentation: Option<String>,
    /// Parameter labels in parse order
    pub parameters: Vec<String>,
}

pub struct ConceptQueries<'s> {
    syntax: &'s DslSyntax,
}

impl<'s> ConceptQueries<'s> {
    pub fn new(syntax: &'s DslSyntax) -> Self {
        Self { syntax }
    }

    /// One signature per concept type registered under `keyword`
    /// (case-insensitive), or `None` for an unknown keyword.
    pub fn signatures_for(&self, keyword: &str) -> Option<Vec<SignatureInfo>> {
        let ids = self.syntax.by_keyword(keyword);
        if ids.is_empty() {
            return None;
        }
        Some(
            ids.iter()
                .map(|&id| {
                    let concept = self.syntax.concept_type(id);
                    SignatureInfo {
                        concept_type: id,
                        label: signature(self.syntax, concept),
                        documentation: concept.documentation.clone(),
                        parameters: parameters(self.syntax, concept),
                    }
                })
                .collect(),
        )
    }

    /// Concept types that can be nested directly in a block of `parent`.
    ///
    /// A type qualifies when its parent member accepts any concept, or when
    /// `parent` is the member's declared type or derives from it. A type is
    /// never valid inside itself.
    pub fn valid_concepts_for_parent(&self, parent: ConceptTypeId) -> Vec<ConceptTypeId> {
        self.syntax
            .concept_types()
            .iter()
            .filter(|concept| concept.id != parent)
            .filter(|concept| match concept.parent_member().map(|(_, m)| &m.value) {
                Some(ValueKind::AnyConcept) => true,
                Some(ValueKind::Concept(declared)) => self.syntax.is_assignable(parent, *declared),
                _ => false,
            })
            .map(|concept| concept.id)
            .collect()
    }

    pub fn all_keywords(&self) -> Vec<SmolStr> {
        self.syntax.keywords()
    }

    /// Keywords valid inside a block of `parent`; every keyword at the root.
    ///
    /// Nested types without a keyword cannot be written, so they add nothing.
    pub fn keywords_for_parent(&self, parent: Option<ConceptTypeId>) -> Vec<SmolStr> {
        let Some(parent) = parent else {
            return self.all_keywords();
        };
        let mut keywords: Vec<SmolStr> = Vec::new();
        for id in self.valid_concepts_for_parent(parent) {
            let Some(keyword) = &self.syntax.concept_type(id).keyword else {
                continue;
            };
            if !keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
                keywords.push(keyword.clone());
            }
        }
        keywords.sort_by_key(|k| k.to_lowercase());
        keywords
    }

    /// Every signature of `keyword` with its documentation, for hover.
    pub fn full_description(&self, keyword: &str) -> Option<String> {
        let signatures = self.signatures_for(keyword)?;
        Some(
            signatures
                .iter()
                .map(|s| match &s.documentation {
                    Some(doc) if !doc.trim().is_empty() => format!("{}\n{}", s.label, doc.trim()),
                    _ => s.label.clone(),
                })
                .collect::<Vec<_>>()
                .join("\n\n"),
        )
    }
}
