//! Configuration for the booking client.
//!
//! Loaded from environment variables with defaults suitable for a local
//! reservations API.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reservations API configuration.
    pub api: ApiConfig,
    /// Log filter, `tracing_subscriber::EnvFilter` syntax.
    pub log_filter: String,
}

/// Reservations API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, including any path prefix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `STAYFLOW_API_URL` | `http://localhost:8080/api` |
    /// | `STAYFLOW_API_TIMEOUT_SECS` | `30` |
    /// | `STAYFLOW_LOG` | `stayflow=info` |
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig {
                base_url: env::var("STAYFLOW_API_URL")
                    .unwrap_or_else(|_| "http://localhost:8080/api".to_string()),
                timeout_secs: env::var("STAYFLOW_API_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            },
            log_filter: env::var("STAYFLOW_LOG").unwrap_or_else(|_| "stayflow=info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
