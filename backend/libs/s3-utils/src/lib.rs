/// Object storage boundary for the portfolio backend
///
/// Services depend only on the `ObjectStore` trait. Two backends ship here:
/// - `S3ObjectStore`: AWS S3 or any S3-compatible endpoint
/// - `InMemoryObjectStore`: process-local map for development and tests
use async_trait::async_trait;
use bytes::Bytes;

pub mod config;
pub mod memory;
pub mod operations;

pub use config::S3Config;
pub use memory::InMemoryObjectStore;
pub use operations::S3ObjectStore;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("object not found: {0}")]
    NotFound(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Capability set the media services rely on
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `key`, returning the public location of the object
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String>;

    /// Fetch the bytes stored under `key`
    async fn get(&self, key: &str) -> Result<Bytes>;

    /// Remove `key`; deleting a missing key succeeds, as S3 does
    async fn delete(&self, key: &str) -> Result<()>;

    /// List keys starting with `prefix`
    async fn list(&self, prefix: &str) -> Result<Vec<String>>;
}
