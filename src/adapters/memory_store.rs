//! In-memory payload store.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::PayloadStore;

/// Payload store holding payloads in a map keyed by uri
#[derive(Debug, Default)]
pub struct MemoryPayloadStore {
    payloads: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryPayloadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored payloads
    pub async fn len(&self) -> usize {
        self.payloads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payloads.read().await.is_empty()
    }
}

#[async_trait]
impl PayloadStore for MemoryPayloadStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn read(&self, uri: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.payloads.read().await.get(uri).cloned())
    }

    async fn write(&self, uri: &str, payload: &[u8]) -> Result<()> {
        self.payloads
            .write()
            .await
            .insert(uri.to_string(), payload.to_vec());
        Ok(())
    }
}
