//! Doctor - Check the vault setup and the local Ollama server

use anyhow::Result;
use std::path::Path;

use crate::core::model::{ItemError, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};
use crate::provider::ollama::has_model;
use crate::provider::OllamaProvider;
use crate::settings::Settings;

/// Status of one check
#[derive(Debug, Clone)]
pub struct CheckStatus {
    pub name: String,
    pub ok: bool,
    pub required: bool,
    pub message: String,
    pub notes: Option<String>,
}

impl CheckStatus {
    pub fn to_result_item(&self) -> ResultItem {
        let status = if self.ok { "✓" } else { "✗" };
        let required = if self.required { "required" } else { "optional" };

        let mut message = format!("{} {} ({}) - {}", status, self.name, required, self.message);
        if let Some(notes) = &self.notes {
            message.push_str(&format!("\n  Note: {}", notes));
        }

        let mut item = ResultItem::check(self.name.clone(), self.ok, message);
        if !self.ok && self.required {
            item = item.with_error(ItemError::new(
                "CHECK_FAILED",
                format!("{} check failed: {}", self.name, self.message),
            ));
        }
        item
    }
}

/// Run every check against `root` using the effective settings
pub async fn check_setup(root: &Path, settings: &Settings) -> Vec<CheckStatus> {
    let mut checks = Vec::new();

    let folder = root.join(&settings.glossary_folder);
    checks.push(CheckStatus {
        name: "glossary-folder".to_string(),
        ok: folder.is_dir(),
        required: false,
        message: if folder.is_dir() {
            format!("found: {}", settings.glossary_folder)
        } else {
            format!("{} does not exist yet", settings.glossary_folder)
        },
        notes: Some("Created automatically on the first processed term".to_string()),
    });

    let provider = OllamaProvider::new(&settings.ollama_url);
    match provider.list_models().await {
        Ok(models) => {
            checks.push(CheckStatus {
                name: "ollama".to_string(),
                ok: true,
                required: true,
                message: format!("reachable at {}", provider.base_url()),
                notes: None,
            });

            let installed = has_model(&models, &settings.model);
            checks.push(CheckStatus {
                name: "model".to_string(),
                ok: installed,
                required: true,
                message: if installed {
                    format!("{} is installed", settings.model)
                } else {
                    format!("{} is not installed", settings.model)
                },
                notes: (!installed).then(|| format!("Install: ollama pull {}", settings.model)),
            });
        }
        Err(e) => {
            checks.push(CheckStatus {
                name: "ollama".to_string(),
                ok: false,
                required: true,
                message: e.to_string(),
                notes: Some("Start the server: ollama serve".to_string()),
            });
        }
    }

    checks
}

/// Run the doctor command
pub async fn run_doctor(root: &Path, settings: &Settings, config: RenderConfig) -> Result<()> {
    let checks = check_setup(root, settings).await;

    let result_set: ResultSet = checks.iter().map(CheckStatus::to_result_item).collect();
    Renderer::with_config(config).print(&result_set);

    if checks.iter().any(|c| c.required && !c.ok) {
        eprintln!("\n⚠️  Ollama is not ready for glossary generation!");
    }

    Ok(())
}
