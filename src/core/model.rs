//! Unified Result Model
//!
//! Every command maps what it did to this result model before rendering output.

use serde::{Deserialize, Serialize};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// A glossary note (created or already present)
    Note,
    /// An unresolved marker found by a scan
    Marker,
    /// The source document of a processing run
    Document,
    /// A cached definition
    Cache,
    /// A settings value
    Setting,
    /// A health check
    Check,
    Error,
}

/// What happened to a single term during processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Created,
    Existing,
    Rewritten,
    Unchanged,
    Failed,
    Ok,
}

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    pub kind: Kind,

    /// Vault-relative path, using '/' as separator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Glossary term this item is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,

    /// 1-indexed line (markers only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,

    /// Free text payload (definition, setting value, check message)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn bare(kind: Kind) -> Self {
        Self {
            kind,
            path: None,
            term: None,
            line: None,
            status: None,
            excerpt: None,
            data: None,
            errors: Vec::new(),
        }
    }

    /// A glossary note for `term` at `path`
    pub fn note(path: impl Into<String>, term: impl Into<String>, status: Status) -> Self {
        Self {
            path: Some(path.into()),
            term: Some(term.into()),
            status: Some(status),
            ..Self::bare(Kind::Note)
        }
    }

    /// An unresolved marker in a document
    pub fn marker(path: impl Into<String>, line: u32, term: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            line: Some(line),
            term: Some(term.into()),
            ..Self::bare(Kind::Marker)
        }
    }

    /// The source document of a processing run
    pub fn document(path: impl Into<String>, status: Status) -> Self {
        Self {
            path: Some(path.into()),
            status: Some(status),
            ..Self::bare(Kind::Document)
        }
    }

    /// A cached definition
    pub fn cache_entry(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            excerpt: Some(definition.into()),
            ..Self::bare(Kind::Cache)
        }
    }

    pub fn setting(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            excerpt: Some(key.into()),
            data: Some(value),
            ..Self::bare(Kind::Setting)
        }
    }

    /// A health check result
    pub fn check(name: impl Into<String>, ok: bool, message: impl Into<String>) -> Self {
        Self {
            term: Some(name.into()),
            status: Some(if ok { Status::Ok } else { Status::Failed }),
            excerpt: Some(message.into()),
            ..Self::bare(Kind::Check)
        }
    }

    /// Create a new error result
    pub fn error(error: ItemError) -> Self {
        Self {
            errors: vec![error],
            ..Self::bare(Kind::Error)
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Set structured data payload
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_error(mut self, error: ItemError) -> Self {
        self.errors.push(error);
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Sort items by path, then line, for stable output
    pub fn sort(&mut self) {
        self.items.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.term.cmp(&b.term))
        });
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
