//! Object storage configuration

use serde::{Deserialize, Serialize};

/// Which object store implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// S3-compatible remote object store
    S3,
    /// In-process store, for tests and credential-free local development
    Memory,
}

/// Object storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Store implementation
    #[serde(default = "default_backend")]
    pub backend: StorageBackendKind,
    /// Bucket holding uploaded videos
    pub bucket: String,
    /// AWS region override (falls back to the ambient environment)
    #[serde(default)]
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible stores (MinIO, GCS interop, ...)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Use path-style addressing (required by most custom endpoints)
    #[serde(default)]
    pub force_path_style: bool,
    /// Signed URL lifetime in seconds
    #[serde(default = "default_signed_url_ttl_secs")]
    pub signed_url_ttl_secs: u64,
    /// Upper bound on existence probes during filename collision resolution
    #[serde(default = "default_max_probe_attempts")]
    pub max_probe_attempts: usize,
}

fn default_backend() -> StorageBackendKind {
    StorageBackendKind::S3
}

fn default_signed_url_ttl_secs() -> u64 {
    // 15 minutes, the dashboard's playback window
    900
}

fn default_max_probe_attempts() -> usize {
    10_000
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendKind::S3,
            bucket: "ad-classify-media".to_string(),
            region: None,
            endpoint: None,
            force_path_style: false,
            signed_url_ttl_secs: default_signed_url_ttl_secs(),
            max_probe_attempts: default_max_probe_attempts(),
        }
    }
}
