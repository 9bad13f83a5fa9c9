//! Immutable project context and the provider that swaps it on reload.
//!
//! Analysis runs receive an `Arc<ProjectContext>` and never see it change.
//! Reloading the syntax model builds a new context with a higher
//! generation; documents compare generations to drop stale caches.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;

use super::config::{ProjectError, ServerConfig};
use crate::parser::{ExternalTextReader, FileSystemReader};
use crate::syntax::DslSyntax;

/// Everything an analysis run needs from the project.
pub struct ProjectContext {
    root_path: PathBuf,
    syntax: Arc<DslSyntax>,
    external_text_reader: Arc<dyn ExternalTextReader>,
    generation: u64,
}

impl ProjectContext {
    pub fn new(
        root_path: impl Into<PathBuf>,
        syntax: Arc<DslSyntax>,
        external_text_reader: Arc<dyn ExternalTextReader>,
        generation: u64,
    ) -> Self {
        Self {
            root_path: root_path.into(),
            syntax,
            external_text_reader,
            generation,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn syntax(&self) -> &DslSyntax {
        &self.syntax
    }

    pub fn external_text_reader(&self) -> &dyn ExternalTextReader {
        self.external_text_reader.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Debug for ProjectContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectContext")
            .field("root_path", &self.root_path)
            .field("concept_types", &self.syntax.concept_types().len())
            .field("generation", &self.generation)
            .finish()
    }
}

#[derive(Default)]
struct ProviderState {
    context: Option<Arc<ProjectContext>>,
    /// Modification time of the model file the current context was loaded from
    model_modified: Option<SystemTime>,
    generation: u64,
}

/// Holds the current project context and reloads it when the syntax model changes.
pub struct ProjectContextProvider {
    config: ServerConfig,
    external_text_reader: Arc<dyn ExternalTextReader>,
    state: RwLock<ProviderState>,
}

impl ProjectContextProvider {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            external_text_reader: Arc::new(FileSystemReader),
            state: RwLock::new(ProviderState::default()),
        }
    }

    /// A provider that is already initialized with an in-memory model.
    pub fn from_syntax(root_path: impl Into<PathBuf>, syntax: DslSyntax) -> Self {
        let root_path = root_path.into();
        let config = ServerConfig {
            root_path: Some(root_path.clone()),
            ..ServerConfig::default()
        };
        let provider = Self::new(config);
        {
            let mut state = provider.state.write();
            state.generation = 1;
            state.context = Some(Arc::new(ProjectContext::new(
                root_path,
                Arc::new(syntax),
                provider.external_text_reader.clone(),
                1,
            )));
        }
        provider
    }

    /// Read `<file>` references through `reader`, in the current context as
    /// well as in every context loaded later.
    pub fn with_external_text_reader(mut self, reader: Arc<dyn ExternalTextReader>) -> Self {
        let state = self.state.get_mut();
        if let Some(context) = state.context.take() {
            state.context = Some(Arc::new(ProjectContext::new(
                context.root_path.clone(),
                context.syntax.clone(),
                reader.clone(),
                context.generation,
            )));
        }
        self.external_text_reader = reader;
        self
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The current context, or `None` before initialization.
    pub fn current(&self) -> Option<Arc<ProjectContext>> {
        self.state.read().context.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.read().context.is_some()
    }

    /// Load the syntax model of the project at `root_path` and make it current.
    pub fn initialize(&self, root_path: &Path) -> Result<Arc<ProjectContext>, ProjectError> {
        let model_file = self.config.syntax_model_file(root_path);
        let (syntax, modified) = load_model(&model_file)?;

        let mut state = self.state.write();
        state.generation += 1;
        let context = Arc::new(ProjectContext::new(
            root_path,
            Arc::new(syntax),
            self.external_text_reader.clone(),
            state.generation,
        ));
        state.context = Some(context.clone());
        state.model_modified = modified;
        tracing::info!(
            "Initialized project context for {} (generation {})",
            root_path.display(),
            state.generation
        );
        Ok(context)
    }

    /// Reload the model if its file changed since the current context was
    /// built. Returns whether a new context was installed.
    pub fn refresh(&self) -> Result<bool, ProjectError> {
        let (root_path, loaded) = {
            let state = self.state.read();
            match &state.context {
                Some(context) => (context.root_path().to_path_buf(), state.model_modified),
                None => return Ok(false),
            }
        };

        let model_file = self.config.syntax_model_file(&root_path);
        let modified = std::fs::metadata(&model_file).and_then(|m| m.modified()).ok();
        if modified.is_none() || modified == loaded {
            return Ok(false);
        }

        tracing::debug!("Syntax model {} changed, reloading", model_file.display());
        self.initialize(&root_path)?;
        Ok(true)
    }
}

fn load_model(path: &Path) -> Result<(DslSyntax, Option<SystemTime>), ProjectError> {
    if !path.is_file() {
        return Err(ProjectError::MissingSyntaxModel(path.to_path_buf()));
    }
    let modified = std::fs::metadata(path)?.modified().ok();
    let syntax = DslSyntax::load(path).map_err(|source| ProjectError::SyntaxModel {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((syntax, modified))
}
