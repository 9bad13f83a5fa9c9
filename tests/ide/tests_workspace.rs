//! Open document registry and project context discovery.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dsl_analysis::ide::Workspace;
use dsl_analysis::project::{ProjectContextProvider, ServerConfig};

use crate::helpers::model_fixtures::{provider, write_model};

fn directive(root: &std::path::Path) -> String {
    format!("// <rhetosProjectRootPath=\"{}\" />\n", root.display())
}

#[test]
fn test_open_update_close() {
    let workspace = Workspace::new(provider());
    assert!(workspace.is_empty());

    workspace.open("file:///work/app/B.rhe", "Module B;");
    workspace.open("file:///work/app/A.rhe", "Module A;");
    assert_eq!(workspace.uris(), vec!["file:///work/app/B.rhe", "file:///work/app/A.rhe"]);

    let updated = workspace.update("file:///work/app/B.rhe", "Module B2;");
    assert!(Arc::ptr_eq(&updated, &workspace.get("file:///work/app/B.rhe").unwrap()));
    assert_eq!(updated.text().as_str(), "Module B2;");

    workspace.update("file:///work/app/C.rhe", "Module C;");
    assert_eq!(workspace.len(), 3);

    assert!(workspace.close("file:///work/app/B.rhe").is_some());
    assert!(workspace.close("file:///work/app/B.rhe").is_none());
    assert_eq!(workspace.uris(), vec!["file:///work/app/A.rhe", "file:///work/app/C.rhe"]);
}

#[test]
fn test_changed_since() {
    let workspace = Workspace::new(provider());
    workspace.open("a.rhe", "Module A;");
    workspace.open("b.rhe", "Module B;");
    std::thread::sleep(Duration::from_millis(5));
    let mark = Instant::now();
    std::thread::sleep(Duration::from_millis(5));

    workspace.update("b.rhe", "Module B { Entity Item; }");
    let changed: Vec<_> = workspace.changed_since(mark).iter().map(|d| d.uri().to_string()).collect();
    assert_eq!(changed, vec!["b.rhe"]);
}

#[test]
fn test_collect_diagnostics() {
    let workspace = Workspace::new(provider());
    workspace.open("good.rhe", "Module Good { Entity Item; }");
    workspace.open("bad.rhe", "Module Bad { Entity Item }");

    let all = workspace.collect_diagnostics(None);
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].0, "good.rhe");
    assert!(all[0].1.is_empty());
    assert_eq!(all[1].0, "bad.rhe");
    assert_eq!(all[1].1[0].code.as_deref(), Some("E0201"));

    let later = Instant::now() + Duration::from_secs(60);
    assert!(workspace.collect_diagnostics(Some(later)).is_empty());
}

#[test]
fn test_project_context_from_document_directive() {
    let dir = tempfile::tempdir().unwrap();
    write_model(dir.path());
    let provider = Arc::new(ProjectContextProvider::new(ServerConfig::default()));
    let workspace = Workspace::new(provider.clone());

    workspace.open("untitled:1", "Module Demo;");
    assert!(!workspace.ensure_project_context().unwrap());
    assert!(!provider.is_initialized());

    let document = workspace.open("untitled:2", format!("{}Module Demo {{ Entity Item; }}", directive(dir.path())));
    assert!(document.diagnostics()[0].message.contains("not initialized"));

    assert!(workspace.ensure_project_context().unwrap());
    assert_eq!(provider.current().unwrap().root_path(), dir.path());
    assert!(document.diagnostics().is_empty());

    // Already initialized and the model file is unchanged.
    assert!(!workspace.ensure_project_context().unwrap());
    assert_eq!(provider.current().unwrap().generation(), 1);
}

#[test]
fn test_missing_model_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let workspace = Workspace::new(Arc::new(ProjectContextProvider::new(ServerConfig::default())));
    workspace.open("untitled:1", directive(dir.path()));
    assert!(workspace.ensure_project_context().is_err());
    assert!(!workspace.provider().is_initialized());
}
