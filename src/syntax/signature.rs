//! Human-readable signatures derived from concept types.
//!
//! A signature lists the parsable members of a concept type in the order they
//! are written: key members joined by `.`, other members by spaces, each as
//! `<Name: Type>`. Example: `Reference <DataStructure: DataStructureInfo>.<Name: String> <Referenced: DataStructureInfo>`.

use super::model::{ConceptMember, ConceptType, DslSyntax, ValueKind};

/// Display name used for members accepting any concept.
pub const ANY_CONCEPT_TYPE_NAME: &str = "IConceptInfo";

/// The keyword of a concept type, or its type name when it has none.
pub fn keyword_or_type_name(concept: &ConceptType) -> &str {
    concept.keyword.as_deref().unwrap_or(&concept.type_name)
}

/// Type shown for a member in signatures.
pub fn member_type_display(syntax: &DslSyntax, member: &ConceptMember) -> String {
    match &member.value {
        ValueKind::String => "String".to_string(),
        ValueKind::Concept(id) => syntax.concept_type(*id).type_name.to_string(),
        ValueKind::AnyConcept => ANY_CONCEPT_TYPE_NAME.to_string(),
        ValueKind::Enum(values) => values.iter().map(|v| v.as_str()).collect::<Vec<_>>().join("|"),
    }
}

/// `<Name: Type>`
pub fn parameter_label(syntax: &DslSyntax, member: &ConceptMember) -> String {
    format!("<{}: {}>", member.name, member_type_display(syntax, member))
}

/// Labels of all parsable members, in parse order.
pub fn parameters(syntax: &DslSyntax, concept: &ConceptType) -> Vec<String> {
    concept
        .parsable_members()
        .map(|(_, member)| parameter_label(syntax, member))
        .collect()
}

/// One-line signature: `Keyword <key1>.<key2> <param1> <param2>`.
pub fn signature(syntax: &DslSyntax, concept: &ConceptType) -> String {
    let (keys, others): (Vec<_>, Vec<_>) = concept.parsable_members().map(|(_, m)| m).partition(|m| m.is_key);

    let mut result = keyword_or_type_name(concept).to_string();
    if !keys.is_empty() {
        result.push(' ');
        result.push_str(
            &keys
                .iter()
                .map(|m| parameter_label(syntax, m))
                .collect::<Vec<_>>()
                .join("."),
        );
    }
    for member in others {
        result.push(' ');
        result.push_str(&parameter_label(syntax, member));
    }
    result
}

/// Ordinal of a member among the parsable members of its concept type.
pub fn parsable_member_index(concept: &ConceptType, member_index: usize) -> Option<usize> {
    concept.parsable_members().position(|(i, _)| i == member_index)
}
