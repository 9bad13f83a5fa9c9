//! # dsl-analysis
//!
//! Position-aware analysis for concept-keyword DSL scripts: keyword
//! completion, hover, signature help and diagnostics for partially typed
//! documents such as `Module Common { Entity Principal { ShortString Name; } }`.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → AnalysisRun, Document cache, Workspace, IDE requests, background tasks
//!   ↓
//! project   → ServerConfig, root path directive, ProjectContext
//!   ↓
//! parser    → Logos lexer, tokenizer, concept parser with ParseObserver
//!   ↓
//! syntax    → Syntax model (concept types and members), signatures
//!   ↓
//! base      → LineChr/Span, DocumentText
//! ```

// ============================================================================
// MODULES (dependency order: base → syntax → parser → project → ide)
// ============================================================================

/// Foundation types: LineChr, Span, DocumentText
pub mod base;

/// Syntax model: concept types, members, signature formatting
pub mod syntax;

/// Parser: Logos lexer, tokenizer, model-driven concept parser
pub mod parser;

/// Project setup: configuration, root path directive, project context
pub mod project;

/// IDE features: analysis runs, documents, completion, hover, signature help
pub mod ide;

// Re-export foundation types
pub use base::{DocumentText, LineChr, Span, TextRange, TextSize};
