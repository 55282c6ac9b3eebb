//! Storage interfaces for artifact payloads.
//!
//! A payload store moves the opaque payload bytes of a value artifact to and
//! from the location named by the artifact's uri. The artifact model never
//! initiates I/O itself; callers pass a store to `load` and `commit`.

pub mod fs_store;
pub mod memory_store;

use anyhow::Result;
use async_trait::async_trait;

pub use fs_store::FsPayloadStore;
pub use memory_store::MemoryPayloadStore;

/// File name holding a value artifact's payload under its uri
pub const VALUE_FILE_NAME: &str = "value";

/// Trait for payload storage backends
#[async_trait]
pub trait PayloadStore: Send + Sync {
    /// Human-readable store name
    fn name(&self) -> &str;

    /// Read the payload stored for `uri`, if any
    async fn read(&self, uri: &str) -> Result<Option<Vec<u8>>>;

    /// Store `payload` for `uri`, replacing any previous payload
    async fn write(&self, uri: &str, payload: &[u8]) -> Result<()>;
}
