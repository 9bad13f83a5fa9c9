//! Completion, hover, signature help and diagnostics on top of an analysis.

use dsl_analysis::LineChr;
use dsl_analysis::ide::{CompletionKind, completion_keywords, completions, diagnostics, hover, signature_help};
use dsl_analysis::parser::Severity;
use rstest::rstest;

use crate::helpers::analysis_helpers::{analyze, analyze_marked};
use crate::helpers::model_fixtures::{id, syntax};

fn keywords_at(marked: &str) -> Vec<String> {
    completion_keywords(&analyze_marked(marked), syntax())
        .into_iter()
        .map(|k| k.to_string())
        .collect()
}

// =============================================================================
// COMPLETION
// =============================================================================

#[rstest]
#[case("Module Demo { Entity Principal { | } }", &["Integer", "ItemFilter", "OrderBy", "Reference", "ShortString", "Tag"])]
#[case("Module Demo { | }", &["Browse", "DataStructure", "Entity", "Tag"])]
#[case("Module Demo { Ent| }", &["Browse", "DataStructure", "Entity", "Tag"])]
#[case("Module Demo { Entity Principal { Reference | } }", &["Demo", "Principal"])]
#[case("Module Demo { // |\n}", &[])]
fn test_completion_keywords(#[case] marked: &str, #[case] expected: &[&str]) {
    assert_eq!(keywords_at(marked), expected);
}

#[test]
fn test_completion_at_root_lists_all_keywords() {
    let keywords = keywords_at("|");
    assert_eq!(keywords.len(), 12);
    assert!(keywords.contains(&"Module".to_string()));
}

#[test]
fn test_completion_items_carry_signatures() {
    let items = completions(&analyze_marked("Module Demo { Entity Principal { | } }"), syntax());
    let reference = items.iter().find(|i| &*i.label == "Reference").unwrap();
    assert_eq!(reference.kind, CompletionKind::Keyword);
    assert_eq!(reference.detail.as_deref().map(|d| d.lines().count()), Some(2));
    assert_eq!(
        reference.documentation.as_deref(),
        Some("A property referencing another data structure.")
    );

    let words = completions(&analyze_marked("Module Demo { Entity Principal { Reference | } }"), syntax());
    assert!(words.iter().all(|i| i.kind == CompletionKind::Word));
    assert_eq!(CompletionKind::Word.to_lsp(), 1);
}

// =============================================================================
// HOVER
// =============================================================================

#[test]
fn test_hover_on_keyword() {
    let result = hover(&analyze_marked("Module Demo { Entity| Principal; }"), syntax()).unwrap();
    assert_eq!(result.keyword, "Entity");
    assert_eq!(result.start, LineChr::new(0, 14));
    assert_eq!(result.end, LineChr::new(0, 20));
    assert_eq!(
        result.contents,
        "Entity <Module: ModuleInfo>.<Name: String>\nA data structure stored in a database table."
    );
}

#[rstest]
#[case("Module De|mo { Entity Principal; }")]
#[case("Module Demo { Entity Principal; | }")]
#[case("Module Demo { // Ent|ity\n}")]
#[case("Module Demo { Entiti| Principal; }")]
fn test_no_hover(#[case] marked: &str) {
    assert!(hover(&analyze_marked(marked), syntax()).is_none());
}

// =============================================================================
// SIGNATURE HELP
// =============================================================================

#[test]
fn test_signature_help_selects_first_matching_overload() {
    let help = signature_help(
        &analyze_marked("Module Demo { Entity Principal { Reference Owner | } }"),
        syntax(),
    )
    .unwrap();
    assert_eq!(help.signatures.len(), 2);
    assert_eq!(help.active_signature, Some(0));
    assert_eq!(help.active_parameter, Some(2));
}

#[test]
fn test_signature_help_after_keyword() {
    let help = signature_help(&analyze_marked("Module Demo { Entity | }"), syntax()).unwrap();
    assert_eq!(help.signatures.len(), 1);
    assert_eq!(help.signatures[0].concept_type, id("EntityInfo"));
    assert_eq!(help.active_signature, Some(0));
    assert_eq!(help.active_parameter, Some(1));
}

#[test]
fn test_signature_help_past_statement_has_no_active_entry() {
    let help = signature_help(&analyze_marked("Module Demo { Entity Principal; |"), syntax()).unwrap();
    assert_eq!(help.signatures[0].concept_type, id("EntityInfo"));
    assert_eq!(help.active_signature, None);
    assert_eq!(help.active_parameter, None);

    let help = signature_help(&analyze_marked("Module Demo; |"), syntax()).unwrap();
    assert_eq!(help.active_signature, None);
}

#[test]
fn test_no_signature_help_without_keyword() {
    assert!(signature_help(&analyze_marked("Module Demo { | }"), syntax()).is_none());
}

// =============================================================================
// DIAGNOSTICS
// =============================================================================

#[test]
fn test_diagnostics_carry_codes() {
    let result = analyze("Module Demo {\n  Entity Principal\n}", None);
    let diagnostics = diagnostics(&result);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code.as_deref(), Some("E0201"));
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].span.start, LineChr::new(2, 0));
}

#[test]
fn test_valid_document_has_no_diagnostics() {
    let result = analyze("Module Demo { Entity Principal { ShortString Name; } }", None);
    assert!(diagnostics(&result).is_empty());
}
