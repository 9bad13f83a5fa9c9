//! Project setup: configuration, the root path directive and the project
//! context shared by all analysis runs.

mod config;
mod context;
mod root_path;

pub use config::{ProjectError, ServerConfig};
pub use context::{ProjectContext, ProjectContextProvider};
pub use root_path::extract_root_path;
