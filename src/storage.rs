//! Artifact storage.
//!
//! A finished artifact (the DOCX bytes, usually) is handed to an
//! [`ArtifactStore`], which keeps it and returns a locator the caller can
//! pass on. Stores are injected into [`crate::convert::ConversionService`];
//! nothing in the crate reaches for a global store.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Destination for finished artifacts.
pub trait ArtifactStore: Send + Sync {
    /// Store `bytes` under `name`, replacing any artifact of the same name,
    /// and return a locator for it.
    fn put(&self, name: &str, bytes: &[u8]) -> Result<String>;

    /// Store name, for logs.
    fn name(&self) -> &str;
}

/// Reject names that could escape the store's namespace.
fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::Storage(format!("invalid artifact name: {:?}", name)));
    }
    if name.contains(['/', '\\']) {
        return Err(Error::Storage(format!(
            "artifact name must not contain path separators: {:?}",
            name
        )));
    }
    Ok(())
}

/// Stores artifacts as files in a local directory.
#[derive(Debug, Clone)]
pub struct LocalDirStore {
    root: PathBuf,
}

impl LocalDirStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path an artifact with `name` is written to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ArtifactStore for LocalDirStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<String> {
        validate_name(name)?;
        std::fs::create_dir_all(&self.root)?;

        let path = self.path_for(name);
        std::fs::write(&path, bytes)?;

        let absolute = std::fs::canonicalize(&path)?;
        let locator = format!("file://{}", absolute.display());
        log::info!("stored {} ({} bytes) at {}", name, bytes.len(), locator);
        Ok(locator)
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Keeps artifacts in memory. Mostly useful in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    artifacts: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a copy of a stored artifact.
    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.artifacts.lock().ok()?.get(name).cloned()
    }

    /// Number of stored artifacts.
    pub fn len(&self) -> usize {
        self.artifacts.lock().map(|map| map.len()).unwrap_or(0)
    }

    /// Check if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ArtifactStore for MemoryStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<String> {
        validate_name(name)?;
        let mut artifacts = self
            .artifacts
            .lock()
            .map_err(|_| Error::Storage("memory store lock poisoned".to_string()))?;
        artifacts.insert(name.to_string(), bytes.to_vec());
        Ok(format!("memory://{}", name))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
