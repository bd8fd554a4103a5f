//! HTTP API Server Module
//!
//! Exposes the REST API the dashboard frontend talks to: record listing
//! and export, video upload, and signed URL issuance.

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod types;

mod http;

pub use http::HttpServer;
