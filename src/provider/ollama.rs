//! Ollama provider
//!
//! Sends one streaming `/api/generate` request per term and reads the whole
//! stream before assembling the definition. There is no timeout and no retry:
//! a stalled server stalls the caller.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::stream::StreamBuffer;
use super::{DefinitionProvider, ProviderError};

/// Instruction placed before the term in every prompt
pub const PROMPT_PREFIX: &str = "Define this term clearly and briefly for a student:\n\n";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagsModel>,
}

#[derive(Debug, Deserialize)]
struct TagsModel {
    name: String,
}

/// Build the generation prompt for a term
pub fn build_prompt(term: &str) -> String {
    format!("{}{}", PROMPT_PREFIX, term)
}

/// Client for a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaProvider {
    base_url: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    /// Map connection failures to the actionable "server not running" error
    fn transport_error(&self, e: reqwest::Error) -> ProviderError {
        if e.is_connect() {
            ProviderError::Unreachable {
                url: self.base_url.clone(),
            }
        } else {
            ProviderError::Transport(e)
        }
    }

    /// Names of the models installed on the server
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let response = self
            .client
            .get(self.tags_url())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::TagsStatus {
                status: status.as_u16(),
            });
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

/// Whether `model` is among `installed`; a bare name matches its `:latest` tag
pub fn has_model(installed: &[String], model: &str) -> bool {
    installed
        .iter()
        .any(|name| name == model || *name == format!("{}:latest", model))
}

#[async_trait]
impl DefinitionProvider for OllamaProvider {
    async fn define(&self, term: &str, model: &str) -> Result<String, ProviderError> {
        let request = GenerateRequest {
            model,
            prompt: build_prompt(term),
            stream: true,
        };

        tracing::debug!(term, model, url = %self.generate_url(), "requesting definition");

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Ollama API error");
            return Err(ProviderError::Status {
                status: status.as_u16(),
                model: model.to_string(),
            });
        }

        let mut buffer = StreamBuffer::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            buffer.push(&chunk.map_err(|e| self.transport_error(e))?);
        }

        let definition = buffer.finish().trim().to_string();
        if definition.is_empty() {
            return Err(ProviderError::EmptyResponse);
        }

        tracing::debug!(term, chars = definition.len(), "definition received");
        Ok(definition)
    }
}
