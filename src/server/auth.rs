//! HTTP API Authentication Middleware
//!
//! API key authentication for the dashboard API. An empty key list means
//! the deployment runs open (the common case behind a private network).

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::types::ErrorResponse;

/// Shared state for authentication
#[derive(Clone)]
pub struct AuthState {
    /// Valid API keys (empty means no auth required)
    pub api_keys: Arc<Vec<String>>,
}

impl AuthState {
    pub fn new(api_keys: Vec<String>) -> Self {
        Self {
            api_keys: Arc::new(api_keys),
        }
    }

    /// Check if authentication is required
    pub fn auth_required(&self) -> bool {
        !self.api_keys.is_empty()
    }

    /// Validate an API key
    pub fn validate_key(&self, key: &str) -> bool {
        if self.api_keys.is_empty() {
            return true;
        }
        self.api_keys.iter().any(|k| k == key)
    }
}

/// Authentication middleware
///
/// Accepts the key as "Bearer <key>" or bare in the Authorization header.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !auth.auth_required() {
        return next.run(request).await;
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let api_key = auth_header.map(|h| {
        if let Some(key) = h.strip_prefix("Bearer ") {
            key.trim()
        } else {
            h.trim()
        }
    });

    match api_key {
        Some(key) if auth.validate_key(key) => next.run(request).await,
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized()),
        )
            .into_response(),
    }
}
