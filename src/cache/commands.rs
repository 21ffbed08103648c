//! Cache commands - list, get, clear

use anyhow::Result;
use std::path::Path;

use crate::cache::DefinitionCache;
use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::notice::Notifier;
use crate::core::render::{RenderConfig, Renderer};
use crate::vault::FsVault;

async fn load_cache(vault: &FsVault) -> DefinitionCache {
    let mut cache = DefinitionCache::new();
    cache.load(vault).await;
    cache
}

/// Every cached definition, in term order
pub async fn list_entries(root: &Path) -> ResultSet {
    let vault = FsVault::new(root);
    let cache = load_cache(&vault).await;

    cache
        .iter()
        .map(|(term, definition)| ResultItem::cache_entry(term, definition))
        .collect()
}

/// One cached definition, or an error item when the term is not cached
pub async fn get_entry(root: &Path, term: &str) -> ResultSet {
    let vault = FsVault::new(root);
    let cache = load_cache(&vault).await;
    let term = term.trim();

    let item = match cache.get(term) {
        Some(definition) => ResultItem::cache_entry(term, definition),
        None => ResultItem::error(ItemError::new(
            "NOT_CACHED",
            format!("No cached definition for: {}", term),
        ))
        .with_term(term),
    };

    let mut result_set = ResultSet::new();
    result_set.push(item);
    result_set
}

/// Run the cache list command
pub async fn run_list(root: &Path, config: RenderConfig) -> Result<()> {
    Renderer::with_config(config).print(&list_entries(root).await);
    Ok(())
}

/// Run the cache get command
pub async fn run_get(root: &Path, term: &str, config: RenderConfig) -> Result<()> {
    Renderer::with_config(config).print(&get_entry(root, term).await);
    Ok(())
}

/// Run the cache clear command
pub async fn run_clear(root: &Path, notifier: &dyn Notifier, config: RenderConfig) -> Result<()> {
    let vault = FsVault::new(root);
    let mut cache = load_cache(&vault).await;
    let removed = cache.len();

    cache.clear(&vault).await;
    notifier.notify("Glossary cache cleared");

    let mut result_set = ResultSet::new();
    result_set.push(
        ResultItem::cache_entry("*", format!("removed {} definition(s)", removed))
            .with_path(cache.path()),
    );
    Renderer::with_config(config).print(&result_set);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::Kind;
    use crate::core::paths::CACHE_FILE;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_list_entries_sorted() {
        let temp = tempdir().unwrap();
        std::fs::write(
            temp.path().join(CACHE_FILE),
            r#"{"Zebra": "An animal.", "Array": "A list."}"#,
        )
        .unwrap();

        let set = list_entries(temp.path()).await;

        let terms: Vec<_> = set.items.iter().map(|i| i.term.clone().unwrap()).collect();
        assert_eq!(terms, vec!["Array", "Zebra"]);
    }

    #[tokio::test]
    async fn test_get_entry_missing() {
        let temp = tempdir().unwrap();
        let set = get_entry(temp.path(), "Nope").await;

        assert_eq!(set.items[0].kind, Kind::Error);
        assert_eq!(set.items[0].errors[0].code, "NOT_CACHED");
    }

    #[tokio::test]
    async fn test_get_entry_trims_term() {
        let temp = tempdir().unwrap();
        std::fs::write(temp.path().join(CACHE_FILE), r#"{"Rust": "A language."}"#).unwrap();

        let set = get_entry(temp.path(), "  Rust ").await;
        assert_eq!(set.items[0].excerpt.as_deref(), Some("A language."));
    }
}
