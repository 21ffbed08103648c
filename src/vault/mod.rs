//! Vault module - Storage capability for documents, notes, cache and settings
//!
//! All paths handed to a [`Vault`] are vault-relative and use '/' as separator.

pub mod fs;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FsVault;

/// Errors raised by vault storage
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("path escapes the vault: {0}")]
    InvalidPath(String),

    #[error("file already exists: {0}")]
    AlreadyExists(String),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl VaultError {
    pub(crate) fn io(path: &str, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => VaultError::NotFound(path.to_string()),
            std::io::ErrorKind::AlreadyExists => VaultError::AlreadyExists(path.to_string()),
            _ => VaultError::Io {
                path: path.to_string(),
                source,
            },
        }
    }
}

/// Storage operations the glossary workflow depends on
#[async_trait]
pub trait Vault: Send + Sync {
    /// Read a whole text file
    async fn read(&self, path: &str) -> Result<String, VaultError>;

    /// Overwrite (or create) a text file
    async fn write(&self, path: &str, content: &str) -> Result<(), VaultError>;

    /// Create a new text file; fails with [`VaultError::AlreadyExists`] instead of overwriting
    async fn create(&self, path: &str, content: &str) -> Result<(), VaultError>;

    /// Whether a file or folder exists at `path`
    async fn exists(&self, path: &str) -> bool;

    /// Create a folder (and any missing parents)
    async fn create_folder(&self, path: &str) -> Result<(), VaultError>;
}
