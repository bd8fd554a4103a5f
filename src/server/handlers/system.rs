//! System handlers: health, stats

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::AppState;
use crate::server::types::*;

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Stats endpoint
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(StatsResponse {
            total_records: state.records.len(),
            storage_backend: state.store.name().to_string(),
        }),
    )
}
