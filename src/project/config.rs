//! Server configuration and project errors.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::syntax::SyntaxModelError;

/// Errors raised while setting up a project context.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// IO error while reading configuration or probing the model file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration file.
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// The syntax model file does not exist.
    #[error("Syntax model not found at {}. Build the project to generate it.", .0.display())]
    MissingSyntaxModel(PathBuf),

    /// The syntax model file exists but could not be loaded.
    #[error("Failed to load syntax model {}: {source}", path.display())]
    SyntaxModel {
        path: PathBuf,
        #[source]
        source: SyntaxModelError,
    },
}

/// Analysis server settings, loaded from JSON.
///
/// Every field has a default so an empty object `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// Project root used when a document carries no root path directive.
    pub root_path: Option<PathBuf>,
    /// Syntax model location, relative to the project root.
    pub syntax_model_path: PathBuf,
    pub publish_diagnostics_interval_ms: u64,
    pub root_path_check_interval_ms: u64,
    pub shutdown_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            syntax_model_path: PathBuf::from("obj/Rhetos/DslSyntax.json"),
            publish_diagnostics_interval_ms: 500,
            root_path_check_interval_ms: 2000,
            shutdown_timeout_ms: 2000,
        }
    }
}

impl ServerConfig {
    pub fn from_json(json: &str) -> Result<Self, ProjectError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        tracing::debug!("Loaded server configuration from {}", path.display());
        Ok(config)
    }

    /// Absolute location of the syntax model for a project root.
    pub fn syntax_model_file(&self, root_path: &Path) -> PathBuf {
        root_path.join(&self.syntax_model_path)
    }

    pub fn publish_diagnostics_interval(&self) -> Duration {
        Duration::from_millis(self.publish_diagnostics_interval_ms)
    }

    pub fn root_path_check_interval(&self) -> Duration {
        Duration::from_millis(self.root_path_check_interval_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.shutdown_timeout_ms)
    }
}
