//! In-memory vault for tests

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use super::{Vault, VaultError};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<String, String>,
    folders: BTreeSet<String>,
    /// Paths whose writes fail with an I/O error
    read_only: BTreeSet<String>,
    writes: usize,
}

/// A vault whose files live in a map
#[derive(Debug, Default)]
pub struct MemoryVault {
    state: Mutex<State>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.put(path, content);
        self
    }

    pub fn put(&self, path: &str, content: &str) {
        let mut state = self.state.lock().unwrap();
        state.files.insert(path.to_string(), content.to_string());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.state.lock().unwrap().files.get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        self.state.lock().unwrap().files.keys().cloned().collect()
    }

    pub fn has_folder(&self, path: &str) -> bool {
        self.state.lock().unwrap().folders.contains(path)
    }

    /// Make every write or create to `path` fail
    pub fn fail_writes_to(&self, path: &str) {
        self.state.lock().unwrap().read_only.insert(path.to_string());
    }

    /// Number of successful write/create calls
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    fn check_writable(state: &State, path: &str) -> Result<(), VaultError> {
        if state.read_only.contains(path) {
            return Err(VaultError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Vault for MemoryVault {
    async fn read(&self, path: &str) -> Result<String, VaultError> {
        self.get(path)
            .ok_or_else(|| VaultError::NotFound(path.to_string()))
    }

    async fn write(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state, path)?;
        state.files.insert(path.to_string(), content.to_string());
        state.writes += 1;
        Ok(())
    }

    async fn create(&self, path: &str, content: &str) -> Result<(), VaultError> {
        let mut state = self.state.lock().unwrap();
        Self::check_writable(&state, path)?;
        if state.files.contains_key(path) {
            return Err(VaultError::AlreadyExists(path.to_string()));
        }
        state.files.insert(path.to_string(), content.to_string());
        state.writes += 1;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.folders.contains(path)
    }

    async fn create_folder(&self, path: &str) -> Result<(), VaultError> {
        self.state.lock().unwrap().folders.insert(path.to_string());
        Ok(())
    }
}
