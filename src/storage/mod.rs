//! Object storage abstraction
//!
//! The object store is an explicit capability handed to the HTTP layer as
//! `Arc<dyn ObjectStore>`. Handlers never touch a concrete client, which
//! keeps the S3 wiring in one place and lets tests run against the
//! in-memory implementation.

pub mod memory;
pub mod resolve;
pub mod s3;

pub use memory::MemoryObjectStore;
pub use resolve::{resolve_available_name, ResolveError};
pub use s3::S3ObjectStore;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

/// Errors that can occur against the object store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No object under this key
    #[error("object not found: {0}")]
    NotFound(String),

    /// The key is not acceptable to the store
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// The store could not be reached or answered with a non-key failure.
    /// Distinct from "name taken" so callers can tell a degraded store
    /// from a collision.
    #[error("object store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// An object fetched from the store
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Raw object bytes
    pub data: Bytes,
    /// Content type recorded at upload time, if any
    pub content_type: Option<String>,
}

/// Core trait for object store backends
///
/// Object-safe so the service can hold `Arc<dyn ObjectStore>` and swap
/// backends per configuration.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Does an object with this exact key currently exist?
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Write an object under the given key, replacing any existing one
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()>;

    /// Fetch an object's bytes and content type
    async fn get(&self, key: &str) -> StorageResult<StoredObject>;

    /// Remove an object; removing an absent key is not an error
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Produce a signed read URL valid for `ttl`
    async fn signed_get_url(&self, key: &str, ttl: Duration) -> StorageResult<String>;

    /// Produce a signed write URL valid for `ttl`
    async fn signed_put_url(&self, key: &str, ttl: Duration) -> StorageResult<String>;

    /// Backend name (e.g. "s3", "memory")
    fn name(&self) -> &str;
}
