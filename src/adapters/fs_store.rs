//! File-based payload store.
//!
//! The payload of an artifact at `uri` lives in `<uri>/value`. Relative uris
//! are resolved under the store root.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::{PayloadStore, VALUE_FILE_NAME};

/// Payload store backed by the local filesystem
#[derive(Debug, Clone)]
pub struct FsPayloadStore {
    /// Directory relative uris are resolved against
    root: PathBuf,
}

impl FsPayloadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Open the store at the configured root
    pub fn from_config() -> Result<Self> {
        Ok(Self::new(crate::config::store_dir()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the payload file for `uri`
    pub fn value_path(&self, uri: &str) -> Result<PathBuf> {
        let uri_path = Path::new(uri);
        if uri.is_empty() {
            anyhow::bail!("Empty artifact uri");
        }
        if uri_path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            anyhow::bail!("Artifact uri must not contain '..': {}", uri);
        }

        let dir = if uri_path.is_absolute() {
            uri_path.to_path_buf()
        } else {
            self.root.join(uri_path)
        };
        Ok(dir.join(VALUE_FILE_NAME))
    }
}

#[async_trait]
impl PayloadStore for FsPayloadStore {
    fn name(&self) -> &str {
        "fs"
    }

    async fn read(&self, uri: &str) -> Result<Option<Vec<u8>>> {
        let path = self.value_path(uri)?;

        if !path.exists() {
            return Ok(None);
        }

        let payload = fs::read(&path)
            .await
            .with_context(|| format!("Failed to read payload: {}", path.display()))?;

        Ok(Some(payload))
    }

    async fn write(&self, uri: &str, payload: &[u8]) -> Result<()> {
        let path = self.value_path(uri)?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("Failed to create artifact directory: {}", dir.display()))?;
        }

        fs::write(&path, payload)
            .await
            .with_context(|| format!("Failed to write payload: {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_value_path_resolution() {
        let store = FsPayloadStore::new("/data/store");

        assert_eq!(
            store.value_path("Integer/1").unwrap(),
            PathBuf::from("/data/store/Integer/1/value")
        );
        assert_eq!(
            store.value_path("/abs/artifact").unwrap(),
            PathBuf::from("/abs/artifact/value")
        );
        assert!(store.value_path("../escape").is_err());
        assert!(store.value_path("").is_err());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let store = FsPayloadStore::new(temp.path());

        assert_eq!(store.read("String/3").await.unwrap(), None);

        store.write("String/3", b"hello world").await.unwrap();
        assert_eq!(
            store.read("String/3").await.unwrap(),
            Some(b"hello world".to_vec())
        );
        assert!(temp.path().join("String/3/value").exists());
    }
}
