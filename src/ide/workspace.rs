//! Registry of open documents sharing one project context provider.

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use parking_lot::RwLock;
use rayon::prelude::*;
use smol_str::SmolStr;

use super::diagnostics::Diagnostic;
use super::document::Document;
use crate::base::DocumentText;
use crate::project::{ProjectContextProvider, ProjectError};

pub struct Workspace {
    provider: Arc<ProjectContextProvider>,
    documents: RwLock<IndexMap<SmolStr, Arc<Document>>>,
}

impl Workspace {
    pub fn new(provider: Arc<ProjectContextProvider>) -> Self {
        Self {
            provider,
            documents: RwLock::new(IndexMap::new()),
        }
    }

    pub fn provider(&self) -> &Arc<ProjectContextProvider> {
        &self.provider
    }

    /// Open a document, replacing any document with the same URI.
    pub fn open(&self, uri: &str, text: impl Into<DocumentText>) -> Arc<Document> {
        let document = Arc::new(Document::new(uri, text, self.provider.clone()));
        self.documents.write().insert(SmolStr::new(uri), document.clone());
        tracing::debug!("Opened {}", uri);
        document
    }

    /// Update the text of an open document; opens it if it is unknown.
    pub fn update(&self, uri: &str, text: impl Into<DocumentText>) -> Arc<Document> {
        let existing = self.get(uri);
        match existing {
            Some(document) => {
                document.update_text(text);
                document
            }
            None => self.open(uri, text),
        }
    }

    pub fn close(&self, uri: &str) -> Option<Arc<Document>> {
        let removed = self.documents.write().shift_remove(uri);
        if removed.is_some() {
            tracing::debug!("Closed {}", uri);
        }
        removed
    }

    pub fn get(&self, uri: &str) -> Option<Arc<Document>> {
        self.documents.read().get(uri).cloned()
    }

    /// URIs in the order the documents were opened.
    pub fn uris(&self) -> Vec<SmolStr> {
        self.documents.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }

    /// Documents whose text changed after `since`.
    pub fn changed_since(&self, since: Instant) -> Vec<Arc<Document>> {
        self.documents
            .read()
            .values()
            .filter(|d| d.last_changed() > since)
            .cloned()
            .collect()
    }

    /// Diagnostics of every document changed after `since` (all documents
    /// for `None`), computed in parallel.
    pub fn collect_diagnostics(&self, since: Option<Instant>) -> Vec<(SmolStr, Vec<Diagnostic>)> {
        let documents: Vec<Arc<Document>> = match since {
            Some(since) => self.changed_since(since),
            None => self.documents.read().values().cloned().collect(),
        };
        documents
            .par_iter()
            .map(|document| (SmolStr::new(document.uri()), document.diagnostics()))
            .collect()
    }

    /// Initialize the project context from the first document that names a
    /// root path, or refresh it when already initialized. Returns whether a
    /// new context was installed.
    pub fn ensure_project_context(&self) -> Result<bool, ProjectError> {
        if self.provider.is_initialized() {
            return self.provider.refresh();
        }
        let root_path = self.documents.read().values().find_map(|d| d.root_path());
        match root_path {
            Some(root_path) => {
                self.provider.initialize(&root_path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
