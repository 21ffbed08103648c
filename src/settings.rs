//! Persisted settings
//!
//! Stored as `.ai-glossary/settings.json` in the vault. Missing fields fall back
//! to their defaults, so older or hand-written files keep working.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::core::model::{ResultItem, ResultSet};
use crate::core::paths::{is_safe_relative, settings_path, SETTINGS_DIR};
use crate::core::render::{RenderConfig, Renderer};
use crate::provider::DEFAULT_OLLAMA_URL;
use crate::vault::{FsVault, Vault, VaultError};

pub const DEFAULT_FOLDER: &str = "Glossary";
pub const DEFAULT_MODEL: &str = "gemma2:9b";
pub const DEFAULT_TAG: &str = "glossary";

/// User settings for glossary processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Folder (vault-relative) where glossary notes are created
    pub glossary_folder: String,

    /// Reuse and store definitions in the definition cache
    pub enable_cache: bool,

    /// Ollama model used for generation
    pub model: String,

    /// Tags written into every new note's front matter
    pub default_tags: Vec<String>,

    /// Base URL of the Ollama server
    pub ollama_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            glossary_folder: DEFAULT_FOLDER.to_string(),
            enable_cache: true,
            model: DEFAULT_MODEL.to_string(),
            default_tags: vec![DEFAULT_TAG.to_string()],
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
        }
    }
}

/// A settings key addressable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    GlossaryFolder,
    EnableCache,
    Model,
    DefaultTags,
    OllamaUrl,
}

impl SettingKey {
    pub const ALL: [SettingKey; 5] = [
        SettingKey::GlossaryFolder,
        SettingKey::EnableCache,
        SettingKey::Model,
        SettingKey::DefaultTags,
        SettingKey::OllamaUrl,
    ];

    /// Name as typed on the command line
    pub fn name(self) -> &'static str {
        match self {
            SettingKey::GlossaryFolder => "glossary-folder",
            SettingKey::EnableCache => "enable-cache",
            SettingKey::Model => "model",
            SettingKey::DefaultTags => "default-tags",
            SettingKey::OllamaUrl => "ollama-url",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// OLLAMA_HOST is commonly set as `host:port`
fn with_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.trim_end_matches('/').to_string()
    } else {
        format!("http://{}", url.trim_end_matches('/'))
    }
}

impl Settings {
    /// Load settings from the vault, falling back to defaults when absent
    pub async fn load(vault: &dyn Vault) -> Result<Self> {
        let path = settings_path();
        match vault.read(&path).await {
            Ok(content) => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse settings file: {}", path)),
            Err(VaultError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e).with_context(|| format!("Failed to read settings file: {}", path)),
        }
    }

    /// Persist settings to the vault
    pub async fn save(&self, vault: &dyn Vault) -> Result<()> {
        if !vault.exists(SETTINGS_DIR).await {
            vault
                .create_folder(SETTINGS_DIR)
                .await
                .context("Failed to create settings directory")?;
        }
        let json = serde_json::to_string_pretty(self)?;
        vault
            .write(&settings_path(), &json)
            .await
            .context("Failed to write settings file")?;
        Ok(())
    }

    /// Apply per-invocation overrides from flags or environment.
    ///
    /// Overrides go through the same validation as `set`.
    pub fn with_overrides(
        mut self,
        model: Option<String>,
        ollama_url: Option<String>,
    ) -> Result<Self, SettingsError> {
        if let Some(model) = model {
            self.set(SettingKey::Model, &model)?;
        }
        if let Some(url) = ollama_url {
            let url = url.trim();
            if url.is_empty() {
                return Err(SettingsError::InvalidValue {
                    key: SettingKey::OllamaUrl.name(),
                    reason: "must not be empty".to_string(),
                });
            }
            self.set(SettingKey::OllamaUrl, &with_scheme(url))?;
        }
        Ok(self)
    }

    /// Update one setting from its textual form
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        let invalid = |reason: &str| SettingsError::InvalidValue {
            key: key.name(),
            reason: reason.to_string(),
        };

        match key {
            SettingKey::GlossaryFolder => {
                let folder = value.trim().trim_matches('/');
                if !is_safe_relative(folder) {
                    return Err(invalid("must be a relative folder inside the vault"));
                }
                self.glossary_folder = folder.to_string();
            }
            SettingKey::EnableCache => {
                self.enable_cache = parse_bool(value).ok_or_else(|| invalid("expected true or false"))?;
            }
            SettingKey::Model => {
                let model = value.trim();
                if model.is_empty() {
                    return Err(invalid("must not be empty"));
                }
                self.model = model.to_string();
            }
            SettingKey::DefaultTags => {
                self.default_tags = value
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            SettingKey::OllamaUrl => {
                let url = value.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(invalid("must start with http:// or https://"));
                }
                self.ollama_url = url.trim_end_matches('/').to_string();
            }
        }
        Ok(())
    }

    /// Current value of one setting as JSON
    pub fn value_of(&self, key: SettingKey) -> serde_json::Value {
        match key {
            SettingKey::GlossaryFolder => self.glossary_folder.clone().into(),
            SettingKey::EnableCache => self.enable_cache.into(),
            SettingKey::Model => self.model.clone().into(),
            SettingKey::DefaultTags => self.default_tags.clone().into(),
            SettingKey::OllamaUrl => self.ollama_url.clone().into(),
        }
    }
}

/// One result item per setting
pub fn to_result_set(settings: &Settings) -> ResultSet {
    SettingKey::ALL
        .iter()
        .map(|key| ResultItem::setting(key.name(), settings.value_of(*key)))
        .collect()
}

/// Run the settings show command (effective values, overrides included)
pub fn run_show(settings: &Settings, config: RenderConfig) -> Result<()> {
    Renderer::with_config(config).print(&to_result_set(settings));
    Ok(())
}

/// Run the settings set command
pub async fn run_set(root: &Path, key: SettingKey, value: &str, config: RenderConfig) -> Result<()> {
    let vault = FsVault::new(root);
    let mut settings = Settings::load(&vault).await?;
    settings.set(key, value)?;
    settings.save(&vault).await?;

    let mut result_set = ResultSet::new();
    result_set.push(ResultItem::setting(key.name(), settings.value_of(key)));
    Renderer::with_config(config).print(&result_set);

    Ok(())
}

/// Run the settings reset command
pub async fn run_reset(root: &Path, config: RenderConfig) -> Result<()> {
    let vault = FsVault::new(root);
    let settings = Settings::default();
    settings.save(&vault).await?;

    Renderer::with_config(config).print(&to_result_set(&settings));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::memory::MemoryVault;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.glossary_folder, "Glossary");
        assert!(settings.enable_cache);
        assert_eq!(settings.model, "gemma2:9b");
        assert_eq!(settings.default_tags, vec!["glossary"]);
        assert_eq!(settings.ollama_url, "http://localhost:11434");
    }

    #[test]
    fn test_partial_json_merges_with_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"glossaryFolder": "Terms", "enableCache": false}"#).unwrap();
        assert_eq!(settings.glossary_folder, "Terms");
        assert!(!settings.enable_cache);
        assert_eq!(settings.model, DEFAULT_MODEL);
        assert_eq!(settings.default_tags, vec![DEFAULT_TAG]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"glossaryFolder\""));
        assert!(json.contains("\"enableCache\""));
        assert!(json.contains("\"defaultTags\""));
    }

    #[tokio::test]
    async fn test_load_missing_gives_defaults() {
        let vault = MemoryVault::new();
        let settings = Settings::load(&vault).await.unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[tokio::test]
    async fn test_load_malformed_is_error() {
        let vault = MemoryVault::new().with_file(&settings_path(), "nope");
        let err = Settings::load(&vault).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let vault = MemoryVault::new();
        let mut settings = Settings::default();
        settings.model = "llama3".to_string();
        settings.save(&vault).await.unwrap();

        assert!(vault.has_folder(SETTINGS_DIR));
        let loaded = Settings::load(&vault).await.unwrap();
        assert_eq!(loaded.model, "llama3");
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::default()
            .with_overrides(Some(" mistral ".to_string()), None)
            .unwrap();
        assert_eq!(settings.model, "mistral");
        assert_eq!(settings.ollama_url, DEFAULT_OLLAMA_URL);
    }

    #[test]
    fn test_blank_overrides_are_rejected() {
        let err = Settings::default()
            .with_overrides(Some("  ".to_string()), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value for model: must not be empty"
        );

        assert!(Settings::default()
            .with_overrides(Some(String::new()), None)
            .is_err());
        assert!(Settings::default()
            .with_overrides(None, Some(" ".to_string()))
            .is_err());
    }

    #[test]
    fn test_url_override_without_scheme() {
        let settings =
            Settings::default()
                .with_overrides(None, Some("127.0.0.1:11434/".to_string()))
                .unwrap();
        assert_eq!(settings.ollama_url, "http://127.0.0.1:11434");
    }

    #[test]
    fn test_set_values() {
        let mut settings = Settings::default();
        settings.set(SettingKey::GlossaryFolder, "Study/Terms/").unwrap();
        settings.set(SettingKey::EnableCache, "off").unwrap();
        settings.set(SettingKey::DefaultTags, "glossary, cs101, ,").unwrap();
        settings.set(SettingKey::OllamaUrl, "http://10.0.0.2:11434/").unwrap();

        assert_eq!(settings.glossary_folder, "Study/Terms");
        assert!(!settings.enable_cache);
        assert_eq!(settings.default_tags, vec!["glossary", "cs101"]);
        assert_eq!(settings.ollama_url, "http://10.0.0.2:11434");
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.set(SettingKey::GlossaryFolder, "../up").is_err());
        assert!(settings.set(SettingKey::EnableCache, "maybe").is_err());
        assert!(settings.set(SettingKey::Model, "  ").is_err());
        assert!(settings.set(SettingKey::OllamaUrl, "localhost:11434").is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_value_of() {
        let settings = Settings::default();
        assert_eq!(
            settings.value_of(SettingKey::DefaultTags),
            serde_json::json!(["glossary"])
        );
        assert_eq!(settings.value_of(SettingKey::EnableCache), serde_json::json!(true));
    }

    #[test]
    fn test_to_result_set_lists_every_key() {
        let set = to_result_set(&Settings::default());
        let keys: Vec<_> = set
            .items
            .iter()
            .map(|i| i.excerpt.clone().unwrap())
            .collect();
        assert_eq!(
            keys,
            vec!["glossary-folder", "enable-cache", "model", "default-tags", "ollama-url"]
        );
    }
}
