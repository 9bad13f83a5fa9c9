//! Document caching and blocked project states.

use std::sync::Arc;

use dsl_analysis::LineChr;
use dsl_analysis::ide::Document;
use dsl_analysis::parser::Severity;
use dsl_analysis::project::{ProjectContextProvider, ServerConfig};

use crate::helpers::model_fixtures::{provider, write_model};

const TEXT: &str = "Module Demo\n{\n    Entity Principal;\n}";

#[test]
fn test_same_position_returns_cached_result() {
    let document = Document::new("file:///work/app/Demo.rhe", TEXT, provider());
    let first = document.get_analysis(Some(LineChr::new(2, 6)));
    let second = document.get_analysis(Some(LineChr::new(2, 6)));
    assert!(Arc::ptr_eq(&first, &second));

    // Positions past the end of a line resolve to the same offset.
    let clamped = document.get_analysis(Some(LineChr::new(0, 40)));
    let end = document.get_analysis(Some(LineChr::new(0, 11)));
    assert!(Arc::ptr_eq(&clamped, &end));

    let whole = document.get_analysis(None);
    assert!(!Arc::ptr_eq(&whole, &first));
    assert!(Arc::ptr_eq(&whole, &document.get_analysis(None)));
}

#[test]
fn test_update_invalidates_cache() {
    let document = Document::new("file:///work/app/Demo.rhe", TEXT, provider());
    let before = document.get_analysis(Some(LineChr::new(2, 6)));
    let changed = document.last_changed();

    document.update_text("Module Demo\n{\n    Browse Principal;\n}");
    let after = document.get_analysis(Some(LineChr::new(2, 6)));
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(after.keyword_token.as_ref().map(|t| t.value.as_str()), Some("Browse"));
    assert!(document.last_changed() >= changed);
}

#[test]
fn test_requests_go_through_the_cache() {
    let document = Document::new("file:///work/app/Demo.rhe", TEXT, provider());
    assert_eq!(document.hover(LineChr::new(2, 6)).map(|h| h.keyword.to_string()), Some("Entity".to_string()));
    assert!(document.signature_help(LineChr::new(2, 11)).is_some());
    assert_eq!(document.completion_keywords(LineChr::new(1, 1)).len(), 4);
    assert_eq!(document.completions(LineChr::new(1, 1)).len(), 4);
    assert!(document.diagnostics().is_empty());
}

#[test]
fn test_no_root_path_is_a_warning() {
    let provider = Arc::new(ProjectContextProvider::new(ServerConfig::default()));
    let document = Document::new("untitled:1", TEXT, provider);
    let result = document.get_analysis(None);
    assert!(result.is_blocked());

    let diagnostics = document.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("rhetosProjectRootPath"));
    assert!(document.completion_keywords(LineChr::new(1, 1)).is_empty());
    assert!(document.hover(LineChr::new(2, 6)).is_none());
}

#[test]
fn test_uninitialized_project_is_a_warning() {
    let config = ServerConfig {
        root_path: Some("/work/app".into()),
        ..ServerConfig::default()
    };
    let document = Document::new("untitled:1", TEXT, Arc::new(ProjectContextProvider::new(config)));
    let result = document.get_analysis(None);
    assert!(result.is_blocked());
    assert!(result.errors[0].message.contains("not initialized"));
    assert_eq!(document.root_path().as_deref(), Some(std::path::Path::new("/work/app")));
}

#[test]
fn test_directive_for_other_project_is_a_warning() {
    let text = format!("// <rhetosProjectRootPath=\"/work/other\" />\n{}", TEXT);
    let document = Document::new("untitled:1", text, provider());
    let diagnostics = document.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert!(diagnostics[0].message.contains("differs"));

    // Blocked results are not cached: fixing the directive takes effect.
    document.update_text(format!("// <rhetosProjectRootPath=\"/work/app\" />\n{}", TEXT));
    assert!(document.diagnostics().is_empty());
}

#[test]
fn test_new_project_generation_drops_cache() {
    let dir = tempfile::tempdir().unwrap();
    write_model(dir.path());
    let config = ServerConfig {
        root_path: Some(dir.path().to_path_buf()),
        ..ServerConfig::default()
    };
    let provider = Arc::new(ProjectContextProvider::new(config));
    provider.initialize(dir.path()).unwrap();

    let document = Document::new("untitled:1", TEXT, provider.clone());
    let first = document.get_analysis(None);
    assert!(!first.is_blocked());
    assert!(Arc::ptr_eq(&first, &document.get_analysis(None)));

    provider.initialize(dir.path()).unwrap();
    let second = document.get_analysis(None);
    assert!(!Arc::ptr_eq(&first, &second));
}
