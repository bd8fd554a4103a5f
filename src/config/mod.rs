//! Configuration for adboard

mod logging;
mod records;
mod server;
mod storage;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use records::RecordsConfig;
pub use server::ServerConfig;
pub use storage::{StorageBackendKind, StorageConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for the adboard service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Record store configuration
    #[serde(default)]
    pub records: RecordsConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration fields.
    ///
    /// Collects all validation errors and reports them together so the user
    /// can fix everything in one pass rather than playing whack-a-mole.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        // Server validation
        if self.server.listen_addr.is_empty() {
            errors.push("server listen_addr must not be empty".to_string());
        } else if let Some(port_str) = self.server.listen_addr.rsplit(':').next() {
            if let Ok(port) = port_str.parse::<u32>() {
                if port == 0 || port > 65535 {
                    errors.push(format!(
                        "server listen port must be between 1 and 65535, got {}",
                        port
                    ));
                }
            }
        }
        if self.server.max_upload_bytes == 0 {
            errors.push("max_upload_bytes must be positive".to_string());
        }

        // Storage validation
        if self.storage.backend == StorageBackendKind::S3 && self.storage.bucket.is_empty() {
            errors.push("storage bucket must not be empty for the s3 backend".to_string());
        }
        if self.storage.signed_url_ttl_secs == 0 {
            errors.push("signed_url_ttl_secs must be positive".to_string());
        }
        if self.storage.max_probe_attempts == 0 {
            errors.push("max_probe_attempts must be positive".to_string());
        }
        if self.storage.force_path_style && self.storage.endpoint.is_none() {
            errors.push("force_path_style requires a custom endpoint".to_string());
        }

        // Records validation
        if self.records.data_dir.as_os_str().is_empty() {
            errors.push("data_dir must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn valid_config() -> Config {
        Config::default()
    }

    #[test]
    fn default_config_passes_validation() {
        let cfg = valid_config();
        assert!(cfg.validate().is_ok(), "default config should be valid");
    }

    #[test]
    fn validate_rejects_empty_listen_addr() {
        let mut cfg = valid_config();
        cfg.server.listen_addr = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("listen_addr must not be empty"));
    }

    #[test]
    fn validate_rejects_listen_port_zero() {
        let mut cfg = valid_config();
        cfg.server.listen_addr = "0.0.0.0:0".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("listen port must be between 1 and 65535"));
    }

    #[test]
    fn validate_rejects_listen_port_too_large() {
        let mut cfg = valid_config();
        cfg.server.listen_addr = "0.0.0.0:70000".to_string();
        let err = cfg.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("listen port must be between 1 and 65535"));
    }

    #[test]
    fn validate_rejects_zero_upload_cap() {
        let mut cfg = valid_config();
        cfg.server.max_upload_bytes = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_upload_bytes must be positive"));
    }

    #[test]
    fn validate_rejects_empty_bucket_for_s3() {
        let mut cfg = valid_config();
        cfg.storage.bucket = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("bucket must not be empty"));
    }

    #[test]
    fn validate_accepts_empty_bucket_for_memory_backend() {
        let mut cfg = valid_config();
        cfg.storage.backend = StorageBackendKind::Memory;
        cfg.storage.bucket = String::new();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_signed_url_ttl() {
        let mut cfg = valid_config();
        cfg.storage.signed_url_ttl_secs = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("signed_url_ttl_secs must be positive"));
    }

    #[test]
    fn validate_rejects_zero_probe_attempts() {
        let mut cfg = valid_config();
        cfg.storage.max_probe_attempts = 0;
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("max_probe_attempts must be positive"));
    }

    #[test]
    fn validate_rejects_path_style_without_endpoint() {
        let mut cfg = valid_config();
        cfg.storage.force_path_style = true;
        cfg.storage.endpoint = None;
        let err = cfg.validate().unwrap_err();
        assert!(err
            .to_string()
            .contains("force_path_style requires a custom endpoint"));
    }

    #[test]
    fn validate_accepts_path_style_with_endpoint() {
        let mut cfg = valid_config();
        cfg.storage.force_path_style = true;
        cfg.storage.endpoint = Some("http://localhost:9000".to_string());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_data_dir() {
        let mut cfg = valid_config();
        cfg.records.data_dir = PathBuf::from("");
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("data_dir must not be empty"));
    }

    #[test]
    fn validate_collects_multiple_errors() {
        let mut cfg = valid_config();
        cfg.server.max_upload_bytes = 0;
        cfg.storage.signed_url_ttl_secs = 0;
        cfg.storage.max_probe_attempts = 0;
        let err = cfg.validate().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("max_upload_bytes must be positive"));
        assert!(msg.contains("signed_url_ttl_secs must be positive"));
        assert!(msg.contains("max_probe_attempts must be positive"));
    }

    #[test]
    fn default_server_config_values() {
        let srv = ServerConfig::default();
        assert_eq!(srv.listen_addr, "127.0.0.1:5000");
        assert!(srv.api_keys.is_empty());
        assert!(srv.cors_enabled);
        assert_eq!(srv.max_upload_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn default_storage_config_values() {
        let st = StorageConfig::default();
        assert_eq!(st.backend, StorageBackendKind::S3);
        assert_eq!(st.bucket, "ad-classify-media");
        assert!(st.region.is_none());
        assert!(st.endpoint.is_none());
        assert!(!st.force_path_style);
        assert_eq!(st.signed_url_ttl_secs, 900);
        assert_eq!(st.max_probe_attempts, 10_000);
    }

    #[test]
    fn config_parses_minimal_toml() {
        let cfg: Config = toml::from_str(
            r#"
            [storage]
            bucket = "videos"
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.storage.bucket, "videos");
        assert_eq!(cfg.storage.backend, StorageBackendKind::Memory);
        // Untouched sections fall back to defaults
        assert_eq!(cfg.server.listen_addr, "127.0.0.1:5000");
        assert_eq!(cfg.logging.level, LogLevel::Info);
    }
}
