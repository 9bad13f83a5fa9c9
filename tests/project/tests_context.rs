//! Server configuration files and the project context lifecycle.

use std::time::Duration;

use dsl_analysis::project::{ProjectContextProvider, ProjectError, ServerConfig, extract_root_path};

use crate::helpers::model_fixtures::{MODEL, write_model};

#[test]
fn test_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dsl-analysis.json");
    std::fs::write(
        &path,
        r#"{ "rootPath": "/work/app", "syntaxModelPath": "model/syntax.json", "publishDiagnosticsIntervalMs": 250 }"#,
    )
    .unwrap();

    let config = ServerConfig::load(&path).unwrap();
    assert_eq!(config.root_path.as_deref(), Some(std::path::Path::new("/work/app")));
    assert_eq!(config.publish_diagnostics_interval(), Duration::from_millis(250));
    assert_eq!(config.root_path_check_interval(), Duration::from_millis(2000));
    assert_eq!(
        config.syntax_model_file(std::path::Path::new("/work/app")),
        std::path::Path::new("/work/app/model/syntax.json")
    );
}

#[test]
fn test_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        ServerConfig::load(&dir.path().join("missing.json")),
        Err(ProjectError::Io(_))
    ));

    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ \"rootPath\": 3 }").unwrap();
    assert!(matches!(ServerConfig::load(&path), Err(ProjectError::Config(_))));
}

#[test]
fn test_initialize_from_document_directive() {
    let dir = tempfile::tempdir().unwrap();
    write_model(dir.path());
    let text = format!("// <rhetosProjectRootPath=\"{}\" />\nModule Demo;", dir.path().display());

    let root = extract_root_path(&text).unwrap();
    let provider = ProjectContextProvider::new(ServerConfig::default());
    let context = provider.initialize(&root).unwrap();
    assert_eq!(context.root_path(), dir.path());
    assert_eq!(context.syntax().version(), "5.4.0");
    assert_eq!(context.syntax().by_keyword("Reference").len(), 2);
}

#[test]
fn test_refresh_reloads_changed_model() {
    let dir = tempfile::tempdir().unwrap();
    write_model(dir.path());
    let provider = ProjectContextProvider::new(ServerConfig::default());
    provider.initialize(dir.path()).unwrap();
    assert!(!provider.refresh().unwrap());

    let model_file = provider.config().syntax_model_file(dir.path());
    let reduced = MODEL.replace(r#""keyword": "Browse""#, r#""keyword": "BrowseView""#);
    std::fs::write(&model_file, reduced).unwrap();
    let later = std::time::SystemTime::now() + Duration::from_secs(5);
    std::fs::File::options()
        .write(true)
        .open(&model_file)
        .unwrap()
        .set_modified(later)
        .unwrap();

    assert!(provider.refresh().unwrap());
    let context = provider.current().unwrap();
    assert_eq!(context.generation(), 2);
    assert!(context.syntax().is_keyword("BrowseView"));
    assert!(!context.syntax().is_keyword("Browse"));
}

#[test]
fn test_refresh_before_initialize_does_nothing() {
    let provider = ProjectContextProvider::new(ServerConfig::default());
    assert!(!provider.refresh().unwrap());
    assert!(provider.current().is_none());
}
