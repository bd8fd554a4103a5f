//! S3-backed object store
//!
//! Works against AWS proper or any S3-compatible endpoint (MinIO, GCS
//! interop) via the `endpoint` + `force_path_style` settings. Credentials
//! come from the ambient environment the way the SDK resolves them.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::debug;

use crate::config::StorageConfig;

use super::{ObjectStore, StorageError, StorageResult, StoredObject};

/// Object store backed by an S3-compatible bucket
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Build a client from the ambient AWS environment plus config overrides
    pub async fn connect(config: &StorageConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = config.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let shared = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }
        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        if config.bucket.is_empty() {
            anyhow::bail!("storage bucket is not configured");
        }

        let client = aws_sdk_s3::Client::from_conf(builder.build());

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
        })
    }

    fn presigning_config(ttl: Duration) -> StorageResult<PresigningConfig> {
        PresigningConfig::expires_in(ttl)
            .map_err(|e| StorageError::Unavailable(format!("invalid presign expiry: {}", e)))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_not_found() => Ok(false),
            Err(other) => Err(StorageError::Unavailable(other.to_string())),
        }
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> StorageResult<()> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        debug!(bucket = %self.bucket, key = %key, size = data.len(), "s3: put_object");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> StorageResult<StoredObject> {
        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_no_such_key() => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(other) => return Err(StorageError::Unavailable(other.to_string())),
        };

        let content_type = resp.content_type().map(str::to_string);
        let data = resp
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?
            .into_bytes();

        Ok(StoredObject { data, content_type })
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn signed_get_url(&self, key: &str, ttl: Duration) -> StorageResult<String> {
        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning_config(ttl)?)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(presigned.uri().to_string())
    }

    async fn signed_put_url(&self, key: &str, ttl: Duration) -> StorageResult<String> {
        let presigned = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(Self::presigning_config(ttl)?)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(presigned.uri().to_string())
    }

    fn name(&self) -> &str {
        "s3"
    }
}
