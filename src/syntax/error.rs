//! Error types for syntax model loading.

use thiserror::Error;

/// Errors that can occur while loading the published syntax model.
#[derive(Debug, Error)]
pub enum SyntaxModelError {
    /// IO error while reading the model file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two concept types share a type name.
    #[error("Duplicate concept type: {0}")]
    DuplicateType(String),

    /// A member or base type references a type that is not in the model.
    #[error("Unresolved concept type '{name}' referenced by {referenced_by}")]
    UnknownType { name: String, referenced_by: String },

    /// Structurally invalid concept type.
    #[error("Invalid concept type {concept_type}: {message}")]
    Invalid { concept_type: String, message: String },
}

impl SyntaxModelError {
    /// Create an invalid concept type error.
    pub fn invalid(concept_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            concept_type: concept_type.into(),
            message: message.into(),
        }
    }

    /// Create an unresolved type error.
    pub fn unknown_type(name: impl Into<String>, referenced_by: impl Into<String>) -> Self {
        Self::UnknownType {
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}
