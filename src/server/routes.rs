//! HTTP API Route Definitions

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::auth::{auth_middleware, AuthState};
use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState, auth_state: AuthState) -> Router {
    // Health check stays outside the auth layer so load balancers can
    // probe without a key
    let public = Router::new()
        .route("/health", get(handlers::health))
        .with_state(app_state.clone());

    let protected = Router::new()
        // Record routes
        .route(
            "/records",
            get(handlers::list_records).post(handlers::create_record),
        )
        .route("/records/export", get(handlers::export_records))
        .route(
            "/records/:id",
            get(handlers::get_record).delete(handlers::delete_record),
        )
        // Media routes
        .route("/media", post(handlers::upload))
        .route("/media/signed-upload", post(handlers::signed_upload))
        .route("/media/:name", get(handlers::download))
        .route("/media/:name/signed-url", get(handlers::signed_url))
        // System routes
        .route("/stats", get(handlers::stats))
        .layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(app_state);

    // Mount under /api/v1
    Router::new().nest("/api/v1", public.merge(protected))
}
