use std::path::PathBuf;

use thiserror::Error;

/// Resolved application configuration shared by the client crates.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the storefront REST API, including the path prefix.
    pub base_url: String,
    /// Directory where the cart and API key are persisted between sessions.
    pub state_dir: PathBuf,
    pub request_timeout_secs: u64,
    /// Catalog page size used by the paginator.
    pub page_size: u32,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
