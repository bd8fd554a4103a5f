//! Adboard: backend for the ad-classification dashboard
//!
//! A small REST service that fronts an object store and an embedded
//! record database, featuring:
//! - Analysis record listing, ingest, and CSV export
//! - Direct and signed-URL video upload with filename collision resolution
//! - Signed download URLs and a streaming download proxy

pub mod config;
pub mod records;
pub mod server;
pub mod storage;
pub mod types;

pub use config::Config;
pub use types::*;
