//! Cache store - The term → definition map persisted as `ai-glossary-cache.json`
//!
//! `set` only touches memory. Disk catches up when `save` (or `clear`) runs.
//! Neither `load` nor `save` ever fails the caller: problems are logged and the
//! cache carries on with whatever it has in memory.

use std::collections::BTreeMap;

use crate::core::paths::CACHE_FILE;
use crate::vault::{Vault, VaultError};

/// Cached definitions keyed by exact (already trimmed) term
#[derive(Debug, Clone, Default)]
pub struct DefinitionCache {
    entries: BTreeMap<String, String>,
    path: String,
}

impl DefinitionCache {
    /// An empty cache backed by the default cache file
    pub fn new() -> Self {
        Self::with_path(CACHE_FILE)
    }

    /// An empty cache backed by a custom vault path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            entries: BTreeMap::new(),
            path: path.into(),
        }
    }

    /// Vault-relative path of the backing file
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the in-memory map with the persisted one.
    ///
    /// A missing file leaves the map empty; unreadable or malformed content
    /// resets it to empty.
    pub async fn load(&mut self, vault: &dyn Vault) {
        let content = match vault.read(&self.path).await {
            Ok(content) => content,
            Err(VaultError::NotFound(_)) => {
                tracing::debug!(path = %self.path, "no definition cache yet");
                return;
            }
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "failed to read definition cache");
                self.entries.clear();
                return;
            }
        };

        match serde_json::from_str::<BTreeMap<String, String>>(&content) {
            Ok(entries) => {
                tracing::debug!(path = %self.path, entries = entries.len(), "definition cache loaded");
                self.entries = entries;
            }
            Err(e) => {
                tracing::warn!(path = %self.path, error = %e, "malformed definition cache, starting empty");
                self.entries.clear();
            }
        }
    }

    /// Write the whole map to the backing file, pretty-printed.
    pub async fn save(&self, vault: &dyn Vault) {
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize definition cache");
                return;
            }
        };

        if let Err(e) = vault.write(&self.path, &json).await {
            tracing::warn!(path = %self.path, error = %e, "failed to save definition cache");
        }
    }

    pub fn get(&self, term: &str) -> Option<&str> {
        self.entries.get(term).map(String::as_str)
    }

    /// Insert or replace a definition in memory
    pub fn set(&mut self, term: impl Into<String>, definition: impl Into<String>) {
        self.entries.insert(term.into(), definition.into());
    }

    /// Empty the cache and persist the empty map immediately
    pub async fn clear(&mut self, vault: &dyn Vault) {
        self.entries.clear();
        self.save(vault).await;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in term order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
