//! Filesystem-backed vault rooted at a directory

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{Vault, VaultError};
use crate::core::paths::{is_safe_relative, join_normalized};

/// A vault stored as plain files under `root`
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Write `content` into a file `create` just made; on failure the file is removed
    /// so a half-written note never counts as existing.
    async fn fill_new_file<W>(full: &Path, mut file: W, content: &str) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let written = async {
            file.write_all(content.as_bytes()).await?;
            file.flush().await
        }
        .await;

        if let Err(e) = written {
            drop(file);
            if let Err(remove) = tokio::fs::remove_file(full).await {
                tracing::warn!(path = %full.display(), error = %remove, "failed to remove partial file");
            }
            return Err(e);
        }
        Ok(())
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, VaultError> {
        if !is_safe_relative(path) {
            return Err(VaultError::InvalidPath(path.to_string()));
        }
        Ok(join_normalized(&self.root, path))
    }
}

#[async_trait]
impl Vault for FsVault {
    async fn read(&self, path: &str) -> Result<String, VaultError> {
        let full = self.resolve(path)?;
        tokio::fs::read_to_string(&full)
            .await
            .map_err(|e| VaultError::io(path, e))
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.resolve(path)?;
        tokio::fs::write(&full, content)
            .await
            .map_err(|e| VaultError::io(path, e))
    }

    async fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let full = self.resolve(path)?;
        let file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full)
            .await
            .map_err(|e| VaultError::io(path, e))?;
        Self::fill_new_file(&full, file, content)
            .await
            .map_err(|e| VaultError::io(path, e))
    }

    async fn exists(&self, path: &str) -> bool {
        match self.resolve(path) {
            Ok(full) => tokio::fs::try_exists(&full).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn create_folder(&self, path: &str) -> Result<(), VaultError> {
        let full = self.resolve(path)?;
        tokio::fs::create_dir_all(&full)
            .await
            .map_err(|e| VaultError::io(path, e))
    }
}
