//! Project root path directive embedded in DSL documents.
//!
//! A document may name the project it belongs to with a comment line:
//!
//! ```text
//! // <rhetosProjectRootPath="C:\My\Project" />
//! ```

use std::path::PathBuf;

const DIRECTIVE: &str = "<rhetosProjectRootPath=\"";

/// Root path named by the first directive in the document, if any.
pub fn extract_root_path(text: &str) -> Option<PathBuf> {
    text.lines().find_map(parse_directive_line)
}

fn parse_directive_line(line: &str) -> Option<PathBuf> {
    let comment = line.trim_start().strip_prefix("//")?.trim_start();
    let rest = comment.strip_prefix(DIRECTIVE)?;
    let (value, tail) = rest.split_once('"')?;
    if !tail.trim_start().starts_with("/>") || value.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(value.trim()))
}
