//! Glossary API - process and scan commands

use anyhow::{bail, Result};
use std::path::Path;

use crate::cache::DefinitionCache;
use crate::core::model::ResultSet;
use crate::core::notice::Notifier;
use crate::core::paths::{make_relative, normalize_path};
use crate::core::render::{RenderConfig, Renderer};
use crate::glossary::process::{process_document, GlossaryContext};
use crate::glossary::scan::scan_markers;
use crate::provider::OllamaProvider;
use crate::settings::Settings;
use crate::vault::FsVault;

/// Turn a command-line document path into a vault-relative one.
///
/// Relative paths are taken as relative to the vault root.
pub fn resolve_document(root: &Path, document: &Path) -> Result<String> {
    if document.is_relative() {
        return Ok(normalize_path(document));
    }

    let absolute = document
        .canonicalize()
        .unwrap_or_else(|_| document.to_path_buf());
    match make_relative(&absolute, root) {
        Some(relative) if !relative.is_empty() => Ok(relative),
        _ => bail!("Document is outside the vault: {}", document.display()),
    }
}

/// Process glossary links in one document and render what happened
pub async fn process_to_result_set(
    root: &Path,
    document: Option<&Path>,
    settings: &Settings,
    notifier: &dyn Notifier,
) -> Result<ResultSet> {
    let document = document
        .map(|d| resolve_document(root, d))
        .transpose()?;

    let vault = FsVault::new(root);
    let provider = OllamaProvider::new(&settings.ollama_url);
    let mut cache = DefinitionCache::new();
    cache.load(&vault).await;

    let mut ctx = GlossaryContext {
        settings,
        vault: &vault,
        provider: &provider,
        notifier,
        cache: &mut cache,
    };

    let outcome = process_document(&mut ctx, document.as_deref()).await?;
    Ok(outcome.to_result_set())
}

/// Run the process command
pub async fn run_process(
    root: &Path,
    document: Option<&Path>,
    settings: &Settings,
    notifier: &dyn Notifier,
    config: RenderConfig,
) -> Result<()> {
    let result_set = process_to_result_set(root, document, settings, notifier).await?;

    let renderer = Renderer::with_config(config);
    renderer.print(&result_set);

    Ok(())
}

/// Run the scan command
pub fn run_scan(root: &Path, scope: Option<&Path>, config: RenderConfig) -> Result<()> {
    let result_set = scan_markers(root, scope)?;

    let renderer = Renderer::with_config(config);
    renderer.print(&result_set);

    Ok(())
}
