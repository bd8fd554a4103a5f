//! HTTP API Request Handlers

mod media;
mod records;
mod system;

use std::sync::Arc;
use std::time::Duration;

use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};

use crate::records::RecordStore;
use crate::storage::{ObjectStore, ResolveError, StorageError};

use super::types::ErrorResponse;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Object store capability
    pub store: Arc<dyn ObjectStore>,
    /// Analysis record store
    pub records: Arc<RecordStore>,
    /// Signed URL lifetime
    pub signed_url_ttl: Duration,
    /// Probe budget for filename collision resolution
    pub max_probe_attempts: usize,
}

/// Translate a storage failure into an API response
pub(crate) fn storage_error_response(err: StorageError) -> Response {
    match err {
        StorageError::NotFound(key) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("no object named '{}'", key))),
        )
            .into_response(),
        StorageError::InvalidKey(key) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!("invalid object key '{}'", key))),
        )
            .into_response(),
        StorageError::Unavailable(message) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::storage_unavailable(message)),
        )
            .into_response(),
    }
}

/// Translate a name-resolution failure into an API response
pub(crate) fn resolve_error_response(err: ResolveError) -> Response {
    match err {
        ResolveError::InvalidName => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("filename must not be empty")),
        )
            .into_response(),
        ResolveError::Exhausted { attempts } => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::name_resolution_exhausted(format!(
                "no available name after {} probes",
                attempts
            ))),
        )
            .into_response(),
        ResolveError::Oracle(storage_err) => storage_error_response(storage_err),
    }
}

// Re-export all handlers
pub use media::{download, signed_upload, signed_url, upload};
pub use records::{create_record, delete_record, export_records, get_record, list_records};
pub use system::{health, stats};
