//! HTTP API Request/Response Types
//!
//! JSON-serializable types for the dashboard API.

use serde::{Deserialize, Serialize};

use crate::types::AnalysisRecord;

/// Record listing response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordListResponse {
    /// All analysis records, newest first
    pub records: Vec<AnalysisRecord>,
    /// Total record count
    pub total: usize,
}

/// Record ingest request, as posted by the classification pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// Object key of the analyzed video
    pub object_name: String,
    /// Classification label
    pub label: String,
    /// Classifier confidence in [0.0, 1.0]
    pub confidence: f32,
    /// Advertiser name, if identified
    #[serde(default)]
    pub advertiser: Option<String>,
    /// Category tags
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Response after a record is deleted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRecordResponse {
    pub deleted: bool,
}

/// Response after a direct upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    /// The collision-resolved object key the file was stored under
    pub object_name: String,
    /// Uploaded size in bytes
    pub size_bytes: usize,
    /// Signed read URL for immediate playback
    pub signed_url: String,
}

/// Request for a client-side signed upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUploadRequest {
    /// Desired filename; the response may carry a suffixed variant
    pub filename: String,
}

/// Response granting a client-side signed upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUploadResponse {
    /// The collision-resolved object key to upload under
    pub object_name: String,
    /// Presigned PUT URL
    pub upload_url: String,
    /// URL lifetime in seconds
    pub expires_in_secs: u64,
}

/// Signed read URL response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUrlResponse {
    /// Object key the URL reads
    pub object_name: String,
    /// Presigned GET URL
    pub signed_url: String,
    /// URL lifetime in seconds
    pub expires_in_secs: u64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Whether the service is healthy
    pub healthy: bool,
    /// Service version
    pub version: String,
}

/// Service statistics response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    /// Total number of analysis records
    pub total_records: usize,
    /// Which object store backend is active
    pub storage_backend: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new("STORAGE_UNAVAILABLE", message)
    }

    pub fn name_resolution_exhausted(message: impl Into<String>) -> Self {
        Self::new("NAME_RESOLUTION_EXHAUSTED", message)
    }

    pub fn unauthorized() -> Self {
        Self::new("UNAUTHORIZED", "Invalid or missing API key")
    }
}
