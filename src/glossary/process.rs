//! Glossary processing - turn markers in one document into glossary notes
//!
//! For each `[[¤term]]` in the active document, in document order:
//! - an existing note means the term is done and only the marker is rewritten
//! - otherwise the definition comes from the cache or the provider, a note is
//!   created and the marker is rewritten
//! - any failure is reported and the marker stays for a later run
//!
//! The document is written back once, at the end, and only if at least one term
//! succeeded.

use std::ops::Range;
use thiserror::Error;

use crate::cache::DefinitionCache;
use crate::core::model::{ItemError, ResultItem, ResultSet, Status};
use crate::core::notice::Notifier;
use crate::core::paths::{is_valid_note_name, note_path};
use crate::glossary::marker::{apply_replacements, clean_link, find_markers, Marker};
use crate::glossary::note::compose_note;
use crate::provider::{DefinitionProvider, ProviderError};
use crate::settings::Settings;
use crate::vault::{Vault, VaultError};

/// Everything a processing run works with
pub struct GlossaryContext<'a> {
    pub settings: &'a Settings,
    pub vault: &'a dyn Vault,
    pub provider: &'a dyn DefinitionProvider,
    pub notifier: &'a dyn Notifier,
    pub cache: &'a mut DefinitionCache,
}

/// Where a new note's definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionSource {
    Cache,
    Generated,
}

/// Why a single term was skipped
#[derive(Debug, Error)]
pub enum TermError {
    #[error("\"{0}\" cannot be used as a note name")]
    InvalidTerm(String),

    #[error(transparent)]
    Generation(#[from] ProviderError),

    #[error("Failed to generate definition for: {0}")]
    EmptyDefinition(String),

    #[error(transparent)]
    Storage(#[from] VaultError),
}

impl TermError {
    /// Stable error code for result output
    pub fn code(&self) -> &'static str {
        match self {
            TermError::InvalidTerm(_) => "INVALID_TERM",
            TermError::Generation(_) => "GENERATION_FAILED",
            TermError::EmptyDefinition(_) => "EMPTY_DEFINITION",
            TermError::Storage(_) => "NOTE_WRITE_FAILED",
        }
    }
}

/// Result of one marker occurrence
#[derive(Debug)]
pub enum TermOutcome {
    Created(DefinitionSource),
    Existing,
    Failed(TermError),
}

impl TermOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, TermOutcome::Failed(_))
    }
}

#[derive(Debug)]
pub struct TermReport {
    pub term: String,
    pub line: u32,
    pub note_path: String,
    pub outcome: TermOutcome,
}

/// Summary of a run over a document with at least one marker
#[derive(Debug)]
pub struct ProcessReport {
    pub document: String,
    pub terms: Vec<TermReport>,
    /// Whether the document was written back
    pub rewritten: bool,
}

impl ProcessReport {
    pub fn processed(&self) -> usize {
        self.terms.iter().filter(|t| t.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.terms.len() - self.processed()
    }
}

#[derive(Debug)]
pub enum ProcessOutcome {
    NoActiveDocument,
    NoMarkers { document: String },
    Processed(ProcessReport),
}

impl ProcessOutcome {
    /// Map the outcome onto result items for rendering
    pub fn to_result_set(&self) -> ResultSet {
        let mut result_set = ResultSet::new();

        match self {
            ProcessOutcome::NoActiveDocument => {
                result_set.push(ResultItem::error(ItemError::new(
                    "NO_ACTIVE_DOCUMENT",
                    "No active file",
                )));
            }
            ProcessOutcome::NoMarkers { document } => {
                result_set.push(ResultItem::document(document.clone(), Status::Unchanged));
            }
            ProcessOutcome::Processed(report) => {
                for term in &report.terms {
                    result_set.push(term.to_result_item(&report.document));
                }
                let status = if report.rewritten {
                    Status::Rewritten
                } else {
                    Status::Unchanged
                };
                result_set.push(ResultItem::document(report.document.clone(), status).with_data(
                    serde_json::json!({
                        "matched": report.terms.len(),
                        "processed": report.processed(),
                        "failed": report.failed(),
                    }),
                ));
            }
        }

        result_set
    }
}

impl TermReport {
    fn to_result_item(&self, document: &str) -> ResultItem {
        match &self.outcome {
            TermOutcome::Created(source) => {
                let source = match source {
                    DefinitionSource::Cache => "cache",
                    DefinitionSource::Generated => "generated",
                };
                ResultItem::note(self.note_path.clone(), self.term.clone(), Status::Created)
                    .with_data(serde_json::json!({ "source": source, "line": self.line }))
            }
            TermOutcome::Existing => {
                ResultItem::note(self.note_path.clone(), self.term.clone(), Status::Existing)
                    .with_data(serde_json::json!({ "line": self.line }))
            }
            TermOutcome::Failed(error) => {
                let mut item = ResultItem::error(ItemError::new(error.code(), error.to_string()))
                    .with_path(document)
                    .with_term(self.term.clone())
                    .with_status(Status::Failed);
                item.line = Some(self.line);
                item
            }
        }
    }
}

/// Process every marker in `document`.
///
/// Only document-level problems (unreadable document, failed write-back) are
/// returned as errors; per-term problems end up in the report.
pub async fn process_document(
    ctx: &mut GlossaryContext<'_>,
    document: Option<&str>,
) -> Result<ProcessOutcome, VaultError> {
    let document = match document {
        Some(path) => path,
        None => {
            ctx.notifier.notify("No active file");
            return Ok(ProcessOutcome::NoActiveDocument);
        }
    };
    if !ctx.vault.exists(document).await {
        ctx.notifier.notify("No active file");
        return Ok(ProcessOutcome::NoActiveDocument);
    }

    let content = ctx.vault.read(document).await?;
    let markers = find_markers(&content);
    tracing::debug!(document, matches = markers.len(), "scanned document");

    if markers.is_empty() {
        ctx.notifier
            .notify("No glossary terms found (use [[¤term]] format)");
        return Ok(ProcessOutcome::NoMarkers {
            document: document.to_string(),
        });
    }

    ctx.notifier
        .notify(&format!("Processing {} glossary term(s)...", markers.len()));

    let mut replacements: Vec<(Range<usize>, String)> = Vec::new();
    let mut terms = Vec::with_capacity(markers.len());

    for marker in &markers {
        let path = note_path(&ctx.settings.glossary_folder, &marker.term);
        let outcome = match process_term(ctx, marker, &path).await {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::warn!(marker = %marker.raw, line = marker.line, error = %error, "term skipped");
                match &error {
                    TermError::EmptyDefinition(_) => ctx.notifier.notify(&error.to_string()),
                    _ => ctx
                        .notifier
                        .notify(&format!("Error processing \"{}\": {}", marker.term, error)),
                }
                TermOutcome::Failed(error)
            }
        };

        if outcome.is_success() {
            replacements.push((marker.span.clone(), clean_link(&marker.term)));
        }

        terms.push(TermReport {
            term: marker.term.clone(),
            line: marker.line,
            note_path: path,
            outcome,
        });
    }

    let rewritten = !replacements.is_empty();
    if rewritten {
        let updated = apply_replacements(&content, &replacements);
        ctx.vault.write(document, &updated).await?;
        ctx.notifier.notify(&format!(
            "Successfully processed {} glossary term(s)",
            replacements.len()
        ));
    } else {
        tracing::info!(document, "no terms were processed");
    }

    Ok(ProcessOutcome::Processed(ProcessReport {
        document: document.to_string(),
        terms,
        rewritten,
    }))
}

/// Resolve one marker: reuse an existing note or create a new one
async fn process_term(
    ctx: &mut GlossaryContext<'_>,
    marker: &Marker,
    path: &str,
) -> Result<TermOutcome, TermError> {
    let term = marker.term.as_str();
    if !is_valid_note_name(term) {
        return Err(TermError::InvalidTerm(term.to_string()));
    }

    let folder = ctx.settings.glossary_folder.trim_matches('/');
    if !folder.is_empty() && !ctx.vault.exists(folder).await {
        tracing::debug!(folder, "creating glossary folder");
        ctx.vault.create_folder(folder).await?;
    }

    if ctx.vault.exists(path).await {
        tracing::debug!(term, path, "note already exists");
        return Ok(TermOutcome::Existing);
    }

    let cached = if ctx.settings.enable_cache {
        ctx.cache
            .get(term)
            .filter(|d| !d.trim().is_empty())
            .map(str::to_string)
    } else {
        None
    };

    let (definition, source) = match cached {
        Some(definition) => {
            tracing::debug!(term, "using cached definition");
            (definition, DefinitionSource::Cache)
        }
        None => {
            ctx.notifier
                .notify(&format!("Generating definition for: {}", term));
            let definition = ctx.provider.define(term, &ctx.settings.model).await?;
            let definition = definition.trim().to_string();
            if definition.is_empty() {
                return Err(TermError::EmptyDefinition(term.to_string()));
            }

            if ctx.settings.enable_cache {
                ctx.cache.set(term, definition.clone());
                ctx.cache.save(ctx.vault).await;
            }
            (definition, DefinitionSource::Generated)
        }
    };

    let content = compose_note(term, &definition, &ctx.settings.default_tags);
    ctx.vault.create(path, &content).await?;
    ctx.notifier.notify(&format!("Created note: {}", term));

    Ok(TermOutcome::Created(source))
}
