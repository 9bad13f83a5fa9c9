//! Member-by-member parsing of one concept type.

use std::sync::Arc;

use smol_str::SmolStr;

use super::dsl_parser::ParseObserver;
use super::node::{ConceptNode, MemberValue};
use super::token_reader::TokenReader;
use crate::syntax::signature::keyword_or_type_name;
use crate::syntax::{ConceptMember, ConceptType, ConceptTypeId, DslSyntax, ValueKind};

/// Why one interpretation of a statement failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub message: String,
    /// Index of the token at which reading stopped
    pub position: usize,
}

impl ParseFailure {
    fn at(reader: &TokenReader<'_>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: reader.position(),
        }
    }
}

/// Parses statements of one concept type: the keyword, then every parsable
/// member in declaration order.
pub struct ConceptParser<'s> {
    syntax: &'s DslSyntax,
    concept: &'s ConceptType,
}

impl<'s> ConceptParser<'s> {
    pub fn new(syntax: &'s DslSyntax, concept: ConceptTypeId) -> Self {
        Self {
            syntax,
            concept: syntax.concept_type(concept),
        }
    }

    pub fn parse(
        &self,
        reader: &mut TokenReader<'_>,
        context: &[Arc<ConceptNode>],
        observer: &mut dyn ParseObserver,
    ) -> Result<ConceptNode, ParseFailure> {
        let keyword = keyword_or_type_name(self.concept);
        if !reader.try_read_keyword(keyword) {
            return Err(ParseFailure::at(reader, format!("Expected keyword \"{}\".", keyword)));
        }

        let parent_index = self.concept.parent_member().map(|(i, _)| i);
        let parent = context.last();
        let mut node = ConceptNode::new(self.concept.id, self.concept.members.len());
        let mut after_inline_key_reference = false;

        for (index, member) in self.concept.parsable_members() {
            let nested_parent = parent.filter(|_| parent_index == Some(index));
            let value = self.read_member(reader, member, nested_parent, &mut after_inline_key_reference);
            observer.on_member_read(
                reader,
                self.concept.id,
                index,
                value.as_ref().map_err(|failure| failure.message.as_str()),
            );
            node.members[index] = Some(value?);
        }

        Ok(node)
    }

    fn read_member(
        &self,
        reader: &mut TokenReader<'_>,
        member: &ConceptMember,
        nested_parent: Option<&Arc<ConceptNode>>,
        after_inline_key_reference: &mut bool,
    ) -> Result<MemberValue, ParseFailure> {
        if *after_inline_key_reference && member.is_key && !member.value.is_concept() && !reader.try_read(".") {
            return Err(ParseFailure::at(
                reader,
                format!(
                    "Expected \".\" between the referenced parent and the key member {} of {}.",
                    member.name, self.concept.type_name
                ),
            ));
        }
        *after_inline_key_reference = false;

        match &member.value {
            ValueKind::String => read_text(reader).map(MemberValue::Text),
            ValueKind::Enum(values) => {
                let text = read_text(reader)?;
                values
                    .iter()
                    .find(|v| v.eq_ignore_ascii_case(&text))
                    .map(|v| MemberValue::Text(v.clone()))
                    .ok_or_else(|| {
                        let allowed = values.iter().map(|v| v.as_str()).collect::<Vec<_>>().join(", ");
                        ParseFailure::at(
                            reader,
                            format!(
                                "Invalid value \"{}\" for {}. Allowed values: {}.",
                                text, member.name, allowed
                            ),
                        )
                    })
            }
            ValueKind::AnyConcept => nested_parent.map(|p| MemberValue::Concept(p.clone())).ok_or_else(|| {
                ParseFailure::at(
                    reader,
                    format!(
                        "{} must be nested within the concept it applies to: member {} accepts any concept.",
                        keyword_or_type_name(self.concept),
                        member.name
                    ),
                )
            }),
            ValueKind::Concept(declared) => {
                if let Some(parent) = nested_parent.filter(|p| self.syntax.is_assignable(p.concept_type, *declared)) {
                    return Ok(MemberValue::Concept(parent.clone()));
                }
                let reference = self.read_reference(reader, *declared)?;
                *after_inline_key_reference = member.is_key;
                Ok(MemberValue::Concept(Arc::new(reference)))
            }
        }
    }

    /// Read a reference to another concept by its key members, separated by `.`.
    fn read_reference(&self, reader: &mut TokenReader<'_>, declared: ConceptTypeId) -> Result<ConceptNode, ParseFailure> {
        let referenced = self.syntax.concept_type(declared);
        let mut node = ConceptNode::new(declared, referenced.members.len());

        for (ordinal, (index, member)) in referenced.key_members().enumerate() {
            if ordinal > 0 && !reader.try_read(".") {
                return Err(ParseFailure::at(
                    reader,
                    format!(
                        "Expected \".\" between key members of the referenced {}.",
                        referenced.type_name
                    ),
                ));
            }
            let value = match &member.value {
                ValueKind::String | ValueKind::Enum(_) => MemberValue::Text(read_text(reader)?),
                ValueKind::Concept(inner) => MemberValue::Concept(Arc::new(self.read_reference(reader, *inner)?)),
                ValueKind::AnyConcept => {
                    return Err(ParseFailure::at(
                        reader,
                        format!(
                            "{} cannot be referenced by key: member {} accepts any concept.",
                            referenced.type_name, member.name
                        ),
                    ));
                }
            };
            node.members[index] = Some(value);
        }

        Ok(node)
    }
}

fn read_text(reader: &mut TokenReader<'_>) -> Result<SmolStr, ParseFailure> {
    let at = *reader;
    reader
        .read_text()
        .map(|token| token.value.clone())
        .map_err(|message| ParseFailure::at(&at, message))
}
