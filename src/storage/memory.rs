//! In-memory object store
//!
//! Backs tests and `serve --memory` so the service can run without
//! bucket credentials. Signed URLs are synthetic `memory://` URIs; they
//! carry the expiry but are not fetchable.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;

use super::{ObjectStore, StorageError, StorageResult, StoredObject};

#[derive(Debug, Clone)]
struct MemoryObject {
    data: Bytes,
    content_type: String,
}

/// Map-backed object store
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: RwLock<HashMap<String, MemoryObject>>,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        Ok(self.objects.read().await.contains_key(key))
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        self.objects.write().await.insert(
            key.to_string(),
            MemoryObject {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|obj| StoredObject {
                data: obj.data.clone(),
                content_type: Some(obj.content_type.clone()),
            })
            .ok_or_else(|| StorageError::NotFound(key.to_string()))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }

    async fn signed_get_url(&self, key: &str, ttl: Duration) -> StorageResult<String> {
        if !self.exists(key).await? {
            return Err(StorageError::NotFound(key.to_string()));
        }
        Ok(format!("memory://get/{}?expires={}", key, ttl.as_secs()))
    }

    async fn signed_put_url(&self, key: &str, ttl: Duration) -> StorageResult<String> {
        Ok(format!("memory://put/{}?expires={}", key, ttl.as_secs()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = MemoryObjectStore::new();
        store
            .put("clip.mp4", Bytes::from_static(b"frames"), "video/mp4")
            .await
            .unwrap();

        assert!(store.exists("clip.mp4").await.unwrap());
        let obj = store.get("clip.mp4").await.unwrap();
        assert_eq!(&obj.data[..], b"frames");
        assert_eq!(obj.content_type.as_deref(), Some("video/mp4"));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemoryObjectStore::new();
        let err = store.get("absent.mp4").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryObjectStore::new();
        store
            .put("clip.mp4", Bytes::from_static(b"x"), "video/mp4")
            .await
            .unwrap();
        store.delete("clip.mp4").await.unwrap();
        store.delete("clip.mp4").await.unwrap();
        assert!(!store.exists("clip.mp4").await.unwrap());
    }

    #[tokio::test]
    async fn empty_key_is_rejected() {
        let store = MemoryObjectStore::new();
        let err = store
            .put("", Bytes::from_static(b"x"), "video/mp4")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn signed_get_url_requires_existing_object() {
        let store = MemoryObjectStore::new();
        let err = store
            .signed_get_url("absent.mp4", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));

        store
            .put("clip.mp4", Bytes::from_static(b"x"), "video/mp4")
            .await
            .unwrap();
        let url = store
            .signed_get_url("clip.mp4", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(url.contains("clip.mp4"));
        assert!(url.contains("expires=60"));
    }
}
