//! Backend endpoint configuration

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use rqc_core::{Error, Result};

/// Base address used when no environment override is present
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Configuration for the RAG backend client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `RQC_BACKEND_URL` (or `BACKEND_URL`), falling back to localhost,
    /// and an optional `RQC_TIMEOUT_SECS` override.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let base_url = env::var("RQC_BACKEND_URL")
            .or_else(|_| env::var("BACKEND_URL"))
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(&base_url)?;

        if let Ok(secs) = env::var("RQC_TIMEOUT_SECS") {
            config.timeout_secs = secs.parse().map_err(|_| {
                Error::Configuration(format!("RQC_TIMEOUT_SECS must be a number, got {}", secs))
            })?;
        }

        Ok(config)
    }

    /// Create configuration with an explicit base address
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            Error::Configuration(format!("invalid backend URL {}: {}", base_url, e))
        })?;

        Ok(Self {
            base_url,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Request timeout for the HTTP client
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
