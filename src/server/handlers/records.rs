//! Record handlers: listing, ingest, export

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{debug, error};

use super::AppState;
use crate::records::export::to_csv;
use crate::server::types::*;
use crate::types::AnalysisRecord;

/// List all analysis records, newest first
pub async fn list_records(State(state): State<AppState>) -> impl IntoResponse {
    match state.records.list() {
        Ok(records) => {
            let total = records.len();
            (StatusCode::OK, Json(RecordListResponse { records, total })).into_response()
        }
        Err(e) => {
            error!("Failed to list records: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Ingest a record from the classification pipeline
pub async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<CreateRecordRequest>,
) -> impl IntoResponse {
    if request.object_name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("object_name must not be empty")),
        )
            .into_response();
    }
    if request.label.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("label must not be empty")),
        )
            .into_response();
    }
    if !(0.0..=1.0).contains(&request.confidence) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                "confidence must be between 0.0 and 1.0",
            )),
        )
            .into_response();
    }

    let mut record = AnalysisRecord::new(request.object_name, request.label, request.confidence)
        .with_tags(request.tags);
    if let Some(advertiser) = request.advertiser {
        record = record.with_advertiser(advertiser);
    }

    debug!("Ingesting record {} for {}", record.id, record.object_name);

    match state.records.insert(&record) {
        Ok(()) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => {
            error!("Failed to store record: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Fetch one record by id
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.records.get(&id) {
        Ok(Some(record)) => (StatusCode::OK, Json(record)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("no record with id '{}'", id))),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to read record {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Remove a record
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.records.delete(&id) {
        Ok(true) => (StatusCode::OK, Json(DeleteRecordResponse { deleted: true })).into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(format!("no record with id '{}'", id))),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to delete record {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}

/// Export all records as a CSV attachment
pub async fn export_records(State(state): State<AppState>) -> impl IntoResponse {
    let records = match state.records.list() {
        Ok(records) => records,
        Err(e) => {
            error!("Failed to list records for export: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response();
        }
    };

    match to_csv(&records) {
        Ok(data) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"analysis_records.csv\"",
                ),
            ],
            data,
        )
            .into_response(),
        Err(e) => {
            error!("CSV export failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal_error(e.to_string())),
            )
                .into_response()
        }
    }
}
