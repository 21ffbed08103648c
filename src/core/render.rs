//! Renderer module
//!
//! Renders ResultSet to different output formats: jsonl, json, md

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.render_jsonl(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Markdown => self.render_markdown(result_set),
        }
    }

    /// Render and print to stdout; empty output prints nothing
    pub fn print(&self, result_set: &ResultSet) {
        let output = self.render(result_set);
        if !output.is_empty() {
            println!("{}", output);
        }
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| {
                if self.config.pretty {
                    serde_json::to_string_pretty(item).ok()
                } else {
                    serde_json::to_string(item).ok()
                }
            })
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Render as Markdown, one section per kind
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        const SECTIONS: [(Kind, &str); 7] = [
            (Kind::Error, "Errors"),
            (Kind::Document, "Documents"),
            (Kind::Note, "Notes"),
            (Kind::Marker, "Markers"),
            (Kind::Cache, "Cached Definitions"),
            (Kind::Setting, "Settings"),
            (Kind::Check, "Checks"),
        ];

        let mut output = String::new();

        for (kind, title) in SECTIONS {
            let items: Vec<&ResultItem> =
                result_set.items.iter().filter(|i| i.kind == kind).collect();
            if items.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", title));
            for item in items {
                self.render_item_md(&mut output, item);
            }
            output.push('\n');
        }

        output
    }

    fn render_item_md(&self, output: &mut String, item: &ResultItem) {
        output.push('-');
        let start = output.len();

        if let Some(term) = &item.term {
            output.push_str(&format!(" **{}**", term));
        }
        if let Some(path) = &item.path {
            output.push_str(&format!(" `{}`", path));
            if let Some(line) = item.line {
                output.push_str(&format!(":{}", line));
            }
        }
        if let Some(status) = item.status {
            // serde gives the lowercase name
            let status = serde_json::to_value(status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            output.push_str(&format!(" ({})", status));
        }
        if let Some(excerpt) = &item.excerpt {
            let sep = if output.len() == start { " " } else { ": " };
            output.push_str(&format!("{}{}", sep, excerpt));
        }
        if let Some(data) = &item.data {
            output.push_str(&format!(" = `{}`", data));
        }
        output.push('\n');

        for error in &item.errors {
            output.push_str(&format!("  - **{}**: {}\n", error.code, error.message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ItemError, ResultItem, Status};

    fn renderer(format: OutputFormat) -> Renderer {
        Renderer::with_config(RenderConfig::with_pretty(format, false))
    }

    #[test]
    fn test_render_jsonl() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::note("Glossary/A.md", "A", Status::Created));
        result_set.push(ResultItem::note("Glossary/B.md", "B", Status::Existing));

        let output = renderer(OutputFormat::Jsonl).render(&result_set);

        assert!(output.contains("Glossary/A.md"));
        assert!(output.contains("Glossary/B.md"));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_render_json() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::cache_entry("A", "def"));

        let output = renderer(OutputFormat::Json).render(&result_set);

        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }

    #[test]
    fn test_render_markdown_sections() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::marker("notes/day.md", 3, "Rust"));
        result_set.push(ResultItem::error(ItemError::new(
            "GENERATION_FAILED",
            "server down",
        )));

        let output = renderer(OutputFormat::Markdown).render(&result_set);

        assert!(output.contains("## Errors"));
        assert!(output.contains("**GENERATION_FAILED**: server down"));
        assert!(output.contains("## Markers"));
        assert!(output.contains("**Rust** `notes/day.md`:3"));
        // errors come first
        assert!(output.find("## Errors").unwrap() < output.find("## Markers").unwrap());
    }

    #[test]
    fn test_render_markdown_status() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::note("Glossary/A.md", "A", Status::Created));

        let output = renderer(OutputFormat::Markdown).render(&result_set);
        assert!(output.contains("(created)"));
    }

    #[test]
    fn test_render_empty_jsonl() {
        let output = renderer(OutputFormat::Jsonl).render(&ResultSet::new());
        assert!(output.is_empty());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!(
            "MARKDOWN".parse::<OutputFormat>().unwrap(),
            OutputFormat::Markdown
        );
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "raw".parse::<OutputFormat>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Jsonl);
        assert!(!config.pretty);
    }

    #[test]
    fn test_render_pretty_jsonl_separates_items() {
        let mut result_set = ResultSet::new();
        result_set.push(ResultItem::cache_entry("A", "1"));
        result_set.push(ResultItem::cache_entry("B", "2"));

        let output = Renderer::with_config(RenderConfig::with_pretty(OutputFormat::Jsonl, true))
            .render(&result_set);
        assert!(output.contains("\n\n"));
    }
}
