//! Static syntax model: concept types and their members.
//!
//! Loaded once from the JSON artifact published by the project build. Every
//! concept type gets a stable [`ConceptTypeId`] at load time; all per-type
//! bookkeeping elsewhere in the crate is keyed by that id.

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use smol_str::SmolStr;

use super::error::SyntaxModelError;

/// Index of a concept type within its [`DslSyntax`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConceptTypeId(u32);

impl ConceptTypeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a member value is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Text, quoted string or external text
    String,
    /// Reference to a concept of this type or one of its subtypes
    Concept(ConceptTypeId),
    /// Open concept interface: accepts any concept, only from the nesting context
    AnyConcept,
    /// One of a fixed set of words, compared case-insensitively
    Enum(Vec<SmolStr>),
}

impl ValueKind {
    pub fn is_concept(&self) -> bool {
        matches!(self, Self::Concept(_) | Self::AnyConcept)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptMember {
    pub name: SmolStr,
    pub value: ValueKind,
    pub is_key: bool,
    pub is_parsable: bool,
    pub is_parent_nested: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptType {
    pub id: ConceptTypeId,
    pub type_name: SmolStr,
    pub keyword: Option<SmolStr>,
    /// Direct base types
    pub base_types: Vec<ConceptTypeId>,
    pub members: Vec<ConceptMember>,
    pub documentation: Option<String>,
}

impl ConceptType {
    pub fn parsable_members(&self) -> impl Iterator<Item = (usize, &ConceptMember)> {
        self.members.iter().enumerate().filter(|(_, m)| m.is_parsable)
    }

    pub fn key_members(&self) -> impl Iterator<Item = (usize, &ConceptMember)> {
        self.members.iter().enumerate().filter(|(_, m)| m.is_key)
    }

    /// The member that is filled from the enclosing concept when nested:
    /// the one marked as parent-nested, otherwise the first member when it
    /// is a key referencing another concept.
    pub fn parent_member(&self) -> Option<(usize, &ConceptMember)> {
        if let Some(found) = self.members.iter().enumerate().find(|(_, m)| m.is_parent_nested) {
            return Some(found);
        }
        self.members
            .first()
            .filter(|m| m.is_key && m.value.is_concept())
            .map(|m| (0, m))
    }

    pub fn has_keyword(&self, keyword: &str) -> bool {
        self.keyword.as_deref().is_some_and(|k| k.eq_ignore_ascii_case(keyword))
    }
}

/// The loaded syntax model.
#[derive(Debug, Clone)]
pub struct DslSyntax {
    version: SmolStr,
    concept_types: Vec<ConceptType>,
    by_name: FxHashMap<SmolStr, ConceptTypeId>,
    /// Lowercased keyword -> concept types, in model order
    by_keyword: FxHashMap<SmolStr, Vec<ConceptTypeId>>,
    /// Transitive base types, excluding the type itself
    ancestors: Vec<FxHashSet<ConceptTypeId>>,
}

impl DslSyntax {
    /// Load the syntax model from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SyntaxModelError> {
        let json = std::fs::read_to_string(path)?;
        let syntax = Self::from_json(&json)?;
        tracing::debug!(
            "Loaded {} concept types from {}",
            syntax.concept_types.len(),
            path.display()
        );
        Ok(syntax)
    }

    /// Parse and resolve the syntax model from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SyntaxModelError> {
        let raw: RawSyntax = serde_json::from_str(json)?;
        Self::resolve(raw)
    }

    fn resolve(raw: RawSyntax) -> Result<Self, SyntaxModelError> {
        let mut by_name = FxHashMap::default();
        for (i, concept) in raw.concept_types.iter().enumerate() {
            let name = SmolStr::new(&concept.type_name);
            if by_name.insert(name, ConceptTypeId::new(i as u32)).is_some() {
                return Err(SyntaxModelError::DuplicateType(concept.type_name.clone()));
            }
        }

        let lookup = |name: &str, referenced_by: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| SyntaxModelError::unknown_type(name, referenced_by))
        };

        let mut concept_types = Vec::with_capacity(raw.concept_types.len());
        for (i, concept) in raw.concept_types.into_iter().enumerate() {
            let base_types = concept
                .base_types
                .iter()
                .map(|base| lookup(base.as_str(), concept.type_name.as_str()))
                .collect::<Result<Vec<_>, _>>()?;

            let mut members = Vec::with_capacity(concept.members.len());
            let mut keys_ended = false;
            for member in concept.members {
                let referenced_by = format!("{}.{}", concept.type_name, member.name);
                let value = match member.value {
                    RawValue::String => ValueKind::String,
                    RawValue::AnyConcept => ValueKind::AnyConcept,
                    RawValue::Concept { concept_type } => {
                        ValueKind::Concept(lookup(concept_type.as_str(), referenced_by.as_str())?)
                    }
                    RawValue::Enum { values } => {
                        if values.is_empty() {
                            return Err(SyntaxModelError::invalid(
                                &concept.type_name,
                                format!("enum member '{}' has no values", member.name),
                            ));
                        }
                        ValueKind::Enum(values.into_iter().map(SmolStr::from).collect())
                    }
                };
                if member.is_key && keys_ended {
                    return Err(SyntaxModelError::invalid(
                        &concept.type_name,
                        format!("key member '{}' follows a non-key member", member.name),
                    ));
                }
                keys_ended |= !member.is_key;
                members.push(ConceptMember {
                    name: member.name.into(),
                    value,
                    is_key: member.is_key,
                    is_parsable: member.is_parsable,
                    is_parent_nested: member.is_parent_nested,
                });
            }

            concept_types.push(ConceptType {
                id: ConceptTypeId::new(i as u32),
                type_name: concept.type_name.into(),
                keyword: concept.keyword.filter(|k| !k.is_empty()).map(SmolStr::from),
                base_types,
                members,
                documentation: concept.documentation,
            });
        }

        if let Some(cyclic) = find_key_reference_cycle(&concept_types) {
            return Err(SyntaxModelError::invalid(
                &*concept_types[cyclic.index()].type_name,
                "key members reference the concept type itself, directly or through other key members",
            ));
        }

        let mut by_keyword: FxHashMap<SmolStr, Vec<ConceptTypeId>> = FxHashMap::default();
        for concept in &concept_types {
            if let Some(keyword) = &concept.keyword {
                by_keyword
                    .entry(SmolStr::new(keyword.to_lowercase()))
                    .or_default()
                    .push(concept.id);
            }
        }

        let ancestors = concept_types
            .iter()
            .map(|concept| collect_ancestors(&concept_types, concept.id))
            .collect();

        Ok(Self {
            version: raw.version.into(),
            concept_types,
            by_name,
            by_keyword,
            ancestors,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn concept_types(&self) -> &[ConceptType] {
        &self.concept_types
    }

    pub fn concept_type(&self, id: ConceptTypeId) -> &ConceptType {
        &self.concept_types[id.index()]
    }

    pub fn by_type_name(&self, type_name: &str) -> Option<&ConceptType> {
        self.by_name.get(type_name).map(|id| self.concept_type(*id))
    }

    /// Concept types registered under a keyword (case-insensitive).
    pub fn by_keyword(&self, keyword: &str) -> &[ConceptTypeId] {
        self.by_keyword
            .get(keyword.to_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        !self.by_keyword(word).is_empty()
    }

    /// All keywords as declared, distinct, sorted case-insensitively.
    pub fn keywords(&self) -> Vec<SmolStr> {
        let mut seen = FxHashSet::default();
        let mut keywords: Vec<SmolStr> = self
            .concept_types
            .iter()
            .filter_map(|c| c.keyword.clone())
            .filter(|k| seen.insert(k.to_lowercase()))
            .collect();
        keywords.sort_by_key(|k| k.to_lowercase());
        keywords
    }

    /// Whether a value of type `actual` can be used where `declared` is expected.
    pub fn is_assignable(&self, actual: ConceptTypeId, declared: ConceptTypeId) -> bool {
        actual == declared || self.ancestors[actual.index()].contains(&declared)
    }
}

fn collect_ancestors(concept_types: &[ConceptType], id: ConceptTypeId) -> FxHashSet<ConceptTypeId> {
    let mut result = FxHashSet::default();
    let mut stack: Vec<ConceptTypeId> = concept_types[id.index()].base_types.clone();
    while let Some(next) = stack.pop() {
        if next != id && result.insert(next) {
            stack.extend(concept_types[next.index()].base_types.iter().copied());
        }
    }
    result
}

/// A concept type whose key references lead back to itself.
///
/// Such a type can never be referenced by key: reading the reference would
/// need the reference first.
fn find_key_reference_cycle(concept_types: &[ConceptType]) -> Option<ConceptTypeId> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        New,
        Open,
        Done,
    }

    let key_references = |id: ConceptTypeId| {
        concept_types[id.index()]
            .key_members()
            .filter_map(|(_, member)| match member.value {
                ValueKind::Concept(target) => Some(target),
                _ => None,
            })
            .collect::<Vec<_>>()
    };

    let mut marks = vec![Mark::New; concept_types.len()];
    for root in concept_types.iter().map(|c| c.id) {
        if marks[root.index()] != Mark::New {
            continue;
        }
        marks[root.index()] = Mark::Open;
        let mut stack = vec![(root, key_references(root), 0usize)];
        while let Some((id, targets, next)) = stack.last_mut() {
            let Some(&target) = targets.get(*next) else {
                marks[id.index()] = Mark::Done;
                stack.pop();
                continue;
            };
            *next += 1;
            match marks[target.index()] {
                Mark::Open => return Some(target),
                Mark::Done => {}
                Mark::New => {
                    marks[target.index()] = Mark::Open;
                    stack.push((target, key_references(target), 0));
                }
            }
        }
    }
    None
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawSyntax {
    #[serde(default)]
    version: String,
    concept_types: Vec<RawConceptType>,
}

#[derive(Debug, Deserialize)]
struct RawConceptType {
    type_name: String,
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    base_types: Vec<String>,
    #[serde(default)]
    documentation: Option<String>,
    #[serde(default)]
    members: Vec<RawMember>,
}

#[derive(Debug, Deserialize)]
struct RawMember {
    name: String,
    value: RawValue,
    #[serde(default)]
    is_key: bool,
    #[serde(default = "default_true")]
    is_parsable: bool,
    #[serde(default)]
    is_parent_nested: bool,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawValue {
    String,
    Concept { concept_type: String },
    AnyConcept,
    Enum { values: Vec<String> },
}

fn default_true() -> bool {
    true
}
