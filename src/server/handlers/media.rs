//! Media handlers: upload, signed URLs, download proxy

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{debug, error, info};

use super::{resolve_error_response, storage_error_response, AppState};
use crate::server::types::*;
use crate::storage::resolve_available_name;

/// Multipart field carrying the video payload
const UPLOAD_FIELD: &str = "video";

/// Fallback name for uploads whose part has no filename
const DEFAULT_UPLOAD_NAME: &str = "upload.bin";

/// Direct multipart upload
///
/// The client filename is kept as the object key, run through collision
/// resolution first. The resolved name is only probed, not reserved, so
/// a concurrent upload of the same name can still race us to the write;
/// the store takes the last writer.
pub async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut file: Option<(String, String, Bytes)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some(UPLOAD_FIELD) {
                    continue;
                }
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| DEFAULT_UPLOAD_NAME.to_string());
                let content_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                match field.bytes().await {
                    Ok(data) => {
                        file = Some((file_name, content_type, data));
                        break;
                    }
                    Err(e) => {
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse::bad_request(format!(
                                "failed to read upload body: {}",
                                e
                            ))),
                        )
                            .into_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::bad_request(format!("invalid multipart body: {}", e))),
                )
                    .into_response();
            }
        }
    }

    let Some((file_name, content_type, data)) = file else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("No file uploaded")),
        )
            .into_response();
    };

    let object_name = {
        let store = Arc::clone(&state.store);
        match resolve_available_name(&file_name, state.max_probe_attempts, move |candidate| {
            let store = Arc::clone(&store);
            async move { store.exists(&candidate).await }
        })
        .await
        {
            Ok(name) => name,
            Err(e) => return resolve_error_response(e),
        }
    };

    debug!("Upload '{}' resolved to object '{}'", file_name, object_name);

    let size_bytes = data.len();
    if let Err(e) = state.store.put(&object_name, data, &content_type).await {
        error!("Upload write failed for '{}': {}", object_name, e);
        return storage_error_response(e);
    }

    let signed_url = match state
        .store
        .signed_get_url(&object_name, state.signed_url_ttl)
        .await
    {
        Ok(url) => url,
        Err(e) => return storage_error_response(e),
    };

    info!("Uploaded '{}' ({} bytes)", object_name, size_bytes);

    (
        StatusCode::OK,
        Json(UploadResponse {
            object_name,
            size_bytes,
            signed_url,
        }),
    )
        .into_response()
}

/// Client-side upload variant: resolve the name, hand back a signed PUT URL
///
/// Same race window as the direct upload: the name is available at probe
/// time, and the client is expected to PUT promptly.
pub async fn signed_upload(
    State(state): State<AppState>,
    Json(request): Json<SignedUploadRequest>,
) -> Response {
    let object_name = {
        let store = Arc::clone(&state.store);
        match resolve_available_name(
            &request.filename,
            state.max_probe_attempts,
            move |candidate| {
                let store = Arc::clone(&store);
                async move { store.exists(&candidate).await }
            },
        )
        .await
        {
            Ok(name) => name,
            Err(e) => return resolve_error_response(e),
        }
    };

    let upload_url = match state
        .store
        .signed_put_url(&object_name, state.signed_url_ttl)
        .await
    {
        Ok(url) => url,
        Err(e) => return storage_error_response(e),
    };

    debug!(
        "Signed upload for '{}' resolved to '{}'",
        request.filename, object_name
    );

    (
        StatusCode::OK,
        Json(SignedUploadResponse {
            object_name,
            upload_url,
            expires_in_secs: state.signed_url_ttl.as_secs(),
        }),
    )
        .into_response()
}

/// Signed read URL for an existing object
pub async fn signed_url(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.store.exists(&name).await {
        Ok(true) => {}
        Ok(false) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found(format!("no object named '{}'", name))),
            )
                .into_response();
        }
        Err(e) => return storage_error_response(e),
    }

    match state.store.signed_get_url(&name, state.signed_url_ttl).await {
        Ok(url) => (
            StatusCode::OK,
            Json(SignedUrlResponse {
                object_name: name,
                signed_url: url,
                expires_in_secs: state.signed_url_ttl.as_secs(),
            }),
        )
            .into_response(),
        Err(e) => storage_error_response(e),
    }
}

/// Download proxy: stream object bytes through the server
pub async fn download(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    match state.store.get(&name).await {
        Ok(object) => {
            let content_type = object
                .content_type
                .unwrap_or_else(|| "application/octet-stream".to_string());
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                object.data,
            )
                .into_response()
        }
        Err(e) => storage_error_response(e),
    }
}
