//! Vault scanning - find unresolved markers across all Markdown documents
//!
//! Uses the ignore crate for traversal, so .gitignore/.ignore rules and hidden
//! directories (.obsidian, .ai-glossary) are skipped.

use anyhow::Result;
use ignore::WalkBuilder;
use std::fs;
use std::path::Path;

use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::make_relative;
use crate::glossary::marker::find_markers;

/// Whether a file is a Markdown document
fn is_document(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"))
        .unwrap_or(false)
}

/// List every unresolved marker under `root` (or `scope`)
pub fn scan_markers(root: &Path, scope: Option<&Path>) -> Result<ResultSet> {
    let scan_path = match scope {
        Some(scope) => root.join(scope),
        None => root.to_path_buf(),
    };

    let mut builder = WalkBuilder::new(&scan_path);
    builder.hidden(true).git_ignore(true).git_exclude(true);

    let mut result_set = ResultSet::new();

    for entry in builder.build() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_document(path) {
            continue;
        }

        let relative = match make_relative(path, root) {
            Some(r) => r,
            None => continue,
        };

        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %relative, error = %e, "failed to read document");
                continue;
            }
        };

        for marker in find_markers(&content) {
            result_set.push(ResultItem::marker(relative.clone(), marker.line, marker.term));
        }
    }

    result_set.sort();
    Ok(result_set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_empty_vault() {
        let temp = tempdir().unwrap();
        let result = scan_markers(temp.path(), None).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_finds_markers_in_order() {
        let temp = tempdir().unwrap();
        write(temp.path(), "b.md", "[[¤Beta]]");
        write(temp.path(), "a.md", "intro\n[[¤Alpha]] and [[Done]]\n\n[[¤Gamma]]");

        let result = scan_markers(temp.path(), None).unwrap();

        let found: Vec<_> = result
            .items
            .iter()
            .map(|i| {
                (
                    i.path.clone().unwrap(),
                    i.line.unwrap(),
                    i.term.clone().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            found,
            vec![
                ("a.md".to_string(), 2, "Alpha".to_string()),
                ("a.md".to_string(), 4, "Gamma".to_string()),
                ("b.md".to_string(), 1, "Beta".to_string()),
            ]
        );
    }

    #[test]
    fn test_scan_skips_non_markdown_and_hidden() {
        let temp = tempdir().unwrap();
        write(temp.path(), "notes.txt", "[[¤Text]]");
        write(temp.path(), ".obsidian/workspace.md", "[[¤Hidden]]");
        write(temp.path(), "sub/deep.MD", "[[¤Deep]]");

        let result = scan_markers(temp.path(), None).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].path.as_deref(), Some("sub/deep.MD"));
    }

    #[test]
    fn test_scan_scope() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.md", "[[¤A]]");
        write(temp.path(), "course/b.md", "[[¤B]]");

        let result = scan_markers(temp.path(), Some(Path::new("course"))).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].path.as_deref(), Some("course/b.md"));
    }
}
