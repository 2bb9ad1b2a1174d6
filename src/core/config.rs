//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Default API base URL
pub const DEFAULT_API_ENDPOINT: &str = "https://api.lingo24.com/docs/v1";

/// Default page size for paginated collections
pub const DEFAULT_PER_PAGE: u32 = 25;

const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Configuration for the API client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_key: String,
    pub api_endpoint: String,
    pub per_page: u32,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("LINGO24_API_KEY").unwrap_or_default(),
            api_endpoint: std::env::var("LINGO24_API_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string()),
            per_page: DEFAULT_PER_PAGE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ClientConfig {
    /// Create a configuration for the given key and endpoint
    pub fn new(api_key: impl Into<String>, api_endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_endpoint: api_endpoint.into(),
            per_page: DEFAULT_PER_PAGE,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("LINGO24_API_KEY")
            .map_err(|_| anyhow::anyhow!("LINGO24_API_KEY environment variable is required"))?;

        let api_endpoint = std::env::var("LINGO24_API_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_API_ENDPOINT.to_string());

        let per_page = std::env::var("LINGO24_PER_PAGE")
            .unwrap_or_else(|_| DEFAULT_PER_PAGE.to_string())
            .parse::<u32>()?;

        let timeout_ms = std::env::var("LINGO24_TIMEOUT_MS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_MS.to_string())
            .parse::<u64>()?;

        Ok(Self {
            api_key,
            api_endpoint,
            per_page,
            timeout_ms,
        })
    }

    /// Load from a JSON or YAML file, chosen by extension
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            return Err(anyhow::anyhow!("API key is required"));
        }

        if self.api_endpoint.is_empty() {
            return Err(anyhow::anyhow!("API endpoint is required"));
        }

        if self.per_page == 0 {
            return Err(anyhow::anyhow!("per_page must be greater than 0"));
        }

        if self.timeout_ms == 0 {
            return Err(anyhow::anyhow!("timeout_ms must be greater than 0"));
        }

        Ok(())
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_endpoint(mut self, api_endpoint: impl Into<String>) -> Self {
        self.api_endpoint = api_endpoint.into();
        self
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
