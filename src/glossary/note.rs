//! Glossary note content

/// Compose a glossary note: front matter with tags, a heading, then the definition
pub fn compose_note(term: &str, definition: &str, tags: &[String]) -> String {
    format!(
        "---\ntags: [{}]\n---\n\n# {}\n\n{}\n",
        tags.join(", "),
        term,
        definition
    )
}
