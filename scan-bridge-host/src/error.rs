use std::path::PathBuf;

use thiserror::Error;

use scan_bridge_core::ScanError;

/// Errors raised by the host glue.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Scan(#[from] ScanError),
}
