//! Record store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Embedded record database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Directory holding the record database
    pub data_dir: PathBuf,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".adboard"),
        }
    }
}
