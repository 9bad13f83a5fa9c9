//! Syntax model: the static description of the DSL's concept types.
//!
//! - [`DslSyntax`] - concept types, members and keyword lookup, loaded once
//!   from the project's published JSON model
//! - [`signature`] - pure functions deriving signatures and parameter lists

mod error;
mod model;
pub mod signature;

pub use error::SyntaxModelError;
pub use model::{ConceptMember, ConceptType, ConceptTypeId, DslSyntax, ValueKind};
