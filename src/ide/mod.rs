//! IDE features: analysis at a cursor position and the requests built on it.
//!
//! [`Document`] owns the text and caches one [`AnalysisResult`] per cursor
//! offset. Requests combine a result with the syntax model:
//!
//! ```ignore
//! use dsl_analysis::ide::Workspace;
//!
//! let workspace = Workspace::new(provider);
//! let document = workspace.open("file:///app/Demo.rhe", "Module Demo { Entity ");
//! let keywords = document.completion_keywords(LineChr::new(0, 14));
//! let help = document.signature_help(LineChr::new(0, 21));
//! ```
//!
//! ## Design Principles
//!
//! 1. **Malformed input never fails a request**: errors are data in the result
//! 2. **No LSP types**: uses our own types, converted at the protocol boundary
//! 3. **Immutable results**: shared as `Arc<AnalysisResult>` across requests

mod analysis_result;
mod analysis_run;
mod background;
mod completion;
mod concept_queries;
mod diagnostics;
mod document;
mod hover;
mod signature_help;
mod workspace;

pub use analysis_result::{AnalysisError, AnalysisResult};
pub use analysis_run::AnalysisRun;
pub use background::{DiagnosticsPublisher, PeriodicTask, spawn_diagnostics_publisher, spawn_root_path_check};
pub use completion::{CompletionItem, CompletionKind, completion_keywords, completions};
pub use concept_queries::{ConceptQueries, SignatureInfo};
pub use diagnostics::{Diagnostic, diagnostics};
pub use document::Document;
pub use hover::{HoverResult, hover};
pub use signature_help::{SignatureHelp, signature_help};
pub use workspace::Workspace;
