//! Provider module - Definitions generated by a local language model
//!
//! The glossary workflow only sees [`DefinitionProvider`]; [`OllamaProvider`]
//! is the implementation that talks to a local Ollama server.

pub mod ollama;
pub mod stream;

use async_trait::async_trait;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Default address of the local Ollama server
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Errors raised while generating a definition
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The server refused the connection or could not be reached
    #[error("Cannot connect to Ollama at {url}. Please ensure Ollama is running.")]
    Unreachable { url: String },

    #[error("Ollama API returned {status}. Is Ollama running? Is the model \"{model}\" installed?")]
    Status { status: u16, model: String },

    /// The model listing endpoint answered with a non-success status
    #[error("Ollama API returned {status} when listing models. Is Ollama running?")]
    TagsStatus { status: u16 },

    #[error("Empty response from Ollama")]
    EmptyResponse,

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// Something that can produce a definition for a term
#[async_trait]
pub trait DefinitionProvider: Send + Sync {
    /// Generate a trimmed, non-empty definition of `term` using `model`
    async fn define(&self, term: &str, model: &str) -> Result<String, ProviderError>;
}
