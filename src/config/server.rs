//! HTTP server configuration

use serde::{Deserialize, Serialize};

/// Default upload cap: 100 MiB
const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// HTTP API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the HTTP server (e.g. "0.0.0.0:5000")
    pub listen_addr: String,
    /// API keys for authentication (empty = no auth required)
    #[serde(default)]
    pub api_keys: Vec<String>,
    /// Enable CORS (the dashboard frontend is served from another origin)
    pub cors_enabled: bool,
    /// Maximum accepted upload body size in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:5000".to_string(),
            api_keys: Vec::new(),
            cors_enabled: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}
