//! Primary token stream and the comment re-scan.

use std::sync::Arc;

use dsl_analysis::TextSize;
use dsl_analysis::parser::{DslScript, ErrorCode, FileSystemReader, TokenKind, Tokenizer};

fn tokenizer_for(text: &str) -> Tokenizer<'static> {
    Tokenizer::new(Arc::new(DslScript::new("test.rhe", text)), &FileSystemReader)
}

#[test]
fn test_comments_only_in_rescan() {
    let text = "Module Demo // first\n{\n  // second\n  Entity Item; // third\n}";
    let tokenizer = tokenizer_for(text);

    let output = tokenizer.tokenize();
    assert!(output.error.is_none());
    assert!(output.tokens.iter().all(|t| t.kind != TokenKind::Comment));

    let comments = tokenizer.comments();
    let values: Vec<_> = comments.iter().map(|c| c.value.as_str()).collect();
    assert_eq!(values, vec!["// first", "// second", "// third"]);
    assert!(comments.iter().all(|c| c.kind == TokenKind::Comment));
    assert_eq!(comments[0].start, TextSize::new(12));
}

#[test]
fn test_comment_marker_inside_string_is_text() {
    let output = tokenizer_for("ItemFilter X 'a // b';").tokenize();
    assert_eq!(output.tokens[2].kind, TokenKind::SingleQuotedString);
    assert_eq!(output.tokens[2].value, "a // b");
    assert!(tokenizer_for("ItemFilter X 'a // b';").comments().is_empty());
}

#[test]
fn test_unterminated_external_text() {
    let output = tokenizer_for("SqlView V <view.sql").tokenize();
    assert_eq!(output.error.map(|e| e.code), Some(ErrorCode::E0102));
    assert_eq!(output.tokens.len(), 3);
    assert_eq!(output.tokens[2].kind, TokenKind::EndOfFile);
}

#[test]
fn test_external_text_from_script_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("view.sql"), "SELECT * FROM Demo.Item").unwrap();
    let script = DslScript::new("Demo.rhe", "SqlView V <view.sql>;").with_path(dir.path().join("Demo.rhe"));

    let output = Tokenizer::new(Arc::new(script), &FileSystemReader).tokenize();
    assert!(output.error.is_none());
    assert_eq!(output.tokens[2].kind, TokenKind::ExternalText);
    assert_eq!(output.tokens[2].value, "SELECT * FROM Demo.Item");
}
