//! Glossary marker parsing
//!
//! Marks a term for glossary processing:
//! [[¤term]]
//! After processing it becomes a plain wiki link:
//! [[term]]

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Static regex for glossary markers. The term is any run of text without ']'.
pub static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[¤([^\]]+)\]\]").expect("Invalid MARKER_RE regex"));

/// One marker occurrence in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// The full matched text, e.g. `[[¤ Rust ]]`
    pub raw: String,

    /// Whitespace-trimmed term
    pub term: String,

    /// Byte span of `raw` in the document
    pub span: Range<usize>,

    /// 1-indexed line of the marker start
    pub line: u32,
}

/// Find every marker in `content`, in document order
pub fn find_markers(content: &str) -> Vec<Marker> {
    MARKER_RE
        .captures_iter(content)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let term = caps.get(1)?.as_str().trim().to_string();
            Some(Marker {
                raw: whole.as_str().to_string(),
                term,
                span: whole.range(),
                line: line_at(content, whole.start()),
            })
        })
        .collect()
}

/// The link a processed marker is rewritten to
pub fn clean_link(term: &str) -> String {
    format!("[[{}]]", term)
}

/// Replace the given spans of `content`.
///
/// Spans must be non-overlapping and sorted by start, as produced by [`find_markers`].
pub fn apply_replacements(content: &str, replacements: &[(Range<usize>, String)]) -> String {
    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;

    for (span, replacement) in replacements {
        output.push_str(&content[cursor..span.start]);
        output.push_str(replacement);
        cursor = span.end;
    }
    output.push_str(&content[cursor..]);

    output
}

fn line_at(content: &str, offset: usize) -> u32 {
    content[..offset].matches('\n').count() as u32 + 1
}
