//! An open document: current text plus a cache of analysis results.
//!
//! Every text update drops the whole cache. Results are keyed by the
//! absolute offset of the requested position, or by a whole-document key for
//! diagnostics. All state changes and analysis runs for one document happen
//! under its mutex.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use text_size::TextSize;

use super::analysis_result::AnalysisResult;
use super::analysis_run::AnalysisRun;
use super::completion::{CompletionItem, completion_keywords, completions};
use super::diagnostics::{Diagnostic, diagnostics};
use super::hover::{HoverResult, hover};
use super::signature_help::{SignatureHelp, signature_help};
use crate::base::{DocumentText, LineChr};
use crate::parser::Severity;
use crate::project::{ProjectContext, ProjectContextProvider, extract_root_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum CacheKey {
    Position(TextSize),
    WholeDocument,
}

struct DocumentState {
    text: DocumentText,
    /// Root path named by the document's directive
    root_path: Option<PathBuf>,
    /// Generation of the project context the cache was built with
    context_generation: Option<u64>,
    cache: FxHashMap<CacheKey, Arc<AnalysisResult>>,
    last_changed: Instant,
}

pub struct Document {
    uri: SmolStr,
    provider: Arc<ProjectContextProvider>,
    state: Mutex<DocumentState>,
}

impl Document {
    pub fn new(uri: impl Into<SmolStr>, text: impl Into<DocumentText>, provider: Arc<ProjectContextProvider>) -> Self {
        let text = text.into();
        Self {
            uri: uri.into(),
            provider,
            state: Mutex::new(DocumentState {
                root_path: extract_root_path(text.as_str()),
                text,
                context_generation: None,
                cache: FxHashMap::default(),
                last_changed: Instant::now(),
            }),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn text(&self) -> DocumentText {
        self.state.lock().text.clone()
    }

    pub fn last_changed(&self) -> Instant {
        self.state.lock().last_changed
    }

    /// Project root for this document: its directive, else the configured default.
    pub fn root_path(&self) -> Option<PathBuf> {
        let directive = self.state.lock().root_path.clone();
        directive.or_else(|| self.provider.config().root_path.clone())
    }

    /// Replace the text, dropping every cached result.
    pub fn update_text(&self, text: impl Into<DocumentText>) {
        let text = text.into();
        let mut state = self.state.lock();
        state.root_path = extract_root_path(text.as_str());
        state.text = text;
        state.cache.clear();
        state.last_changed = Instant::now();
    }

    /// Analysis at `position`, or of the whole document for `None`.
    ///
    /// Repeated requests for the same position return the same cached
    /// result until the text or the project context changes.
    pub fn get_analysis(&self, position: Option<LineChr>) -> Arc<AnalysisResult> {
        self.analysis_with_context(position).0
    }

    pub fn completion_keywords(&self, position: LineChr) -> Vec<SmolStr> {
        match self.analysis_with_context(Some(position)) {
            (result, Some(context)) => completion_keywords(&result, context.syntax()),
            (_, None) => Vec::new(),
        }
    }

    pub fn completions(&self, position: LineChr) -> Vec<CompletionItem> {
        match self.analysis_with_context(Some(position)) {
            (result, Some(context)) => completions(&result, context.syntax()),
            (_, None) => Vec::new(),
        }
    }

    pub fn hover(&self, position: LineChr) -> Option<HoverResult> {
        let (result, context) = self.analysis_with_context(Some(position));
        hover(&result, context?.syntax())
    }

    pub fn signature_help(&self, position: LineChr) -> Option<SignatureHelp> {
        let (result, context) = self.analysis_with_context(Some(position));
        signature_help(&result, context?.syntax())
    }

    /// Diagnostics of the whole document; blocked states show up as warnings.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        diagnostics(&self.get_analysis(None))
    }

    fn analysis_with_context(&self, position: Option<LineChr>) -> (Arc<AnalysisResult>, Option<Arc<ProjectContext>>) {
        let mut state = self.state.lock();
        let context = match self.usable_context(&state) {
            Ok(context) => context,
            Err(blocked) => return (Arc::new(blocked), None),
        };

        if state.context_generation != Some(context.generation()) {
            state.cache.clear();
            state.context_generation = Some(context.generation());
        }

        let key = match position {
            Some(position) => CacheKey::Position(state.text.offset_of(position)),
            None => CacheKey::WholeDocument,
        };
        if let Some(cached) = state.cache.get(&key) {
            return (cached.clone(), Some(context));
        }

        let mut run = AnalysisRun::new(state.text.clone(), position, &context);
        if let Some(path) = self.uri.strip_prefix("file://") {
            run = run.with_script_path(path);
        }
        let result = Arc::new(run.run());
        state.cache.insert(key, result.clone());
        (result, Some(context))
    }

    fn usable_context(&self, state: &DocumentState) -> Result<Arc<ProjectContext>, AnalysisResult> {
        let Some(root_path) = state
            .root_path
            .clone()
            .or_else(|| self.provider.config().root_path.clone())
        else {
            return Err(AnalysisResult::blocked(
                Severity::Warning,
                "No project root path is known for this document. \
                 Add a '// <rhetosProjectRootPath=\"...\" />' line to the script.",
            ));
        };
        let Some(context) = self.provider.current() else {
            return Err(AnalysisResult::blocked(
                Severity::Warning,
                format!("Project at '{}' is not initialized yet.", root_path.display()),
            ));
        };
        if context.root_path() != root_path {
            return Err(AnalysisResult::blocked(
                Severity::Warning,
                format!(
                    "Document root path '{}' differs from the initialized project root path '{}'.",
                    root_path.display(),
                    context.root_path().display()
                ),
            ));
        }
        Ok(context)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document").field("uri", &self.uri).finish_non_exhaustive()
    }
}
