//! HTTP client for the Business Documents API

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, Response};
use tracing::{debug, warn};

use crate::business::collections::{LocaleCollection, ServiceCollection};
use crate::business::files::FileCollection;
use crate::business::jobs::JobCollection;
use crate::core::config::ClientConfig;
use crate::core::errors::{Lingo24Error, Result, TransportError};

/// Result of a single transport call
pub type TransportResult<T> = std::result::Result<T, TransportError>;

/// API client shared by every collection and entity
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl PartialEq for Client {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl Client {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| Lingo24Error::ConfigError {
                message: e.to_string(),
            })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()
            .map_err(TransportError::from)?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().map_err(|e| Lingo24Error::ConfigError {
            message: e.to_string(),
        })?;
        Self::new(config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Default page size for collections created from this client
    pub fn per_page(&self) -> u32 {
        self.config.per_page
    }

    pub fn services(&self) -> ServiceCollection {
        ServiceCollection::new(self.clone())
    }

    pub fn locales(&self) -> LocaleCollection {
        LocaleCollection::new(self.clone())
    }

    pub fn files(&self) -> FileCollection {
        FileCollection::new(self.clone())
    }

    /// Jobs belonging to one project
    pub fn jobs(&self, project_id: u64) -> JobCollection {
        JobCollection::new(self.clone(), project_id)
    }

    /// GET a path and decode the body as JSON
    pub async fn api_get_json(&self, path: &str) -> TransportResult<serde_json::Value> {
        self.api_get_json_with_query(path, &[]).await
    }

    /// GET a path with query parameters and decode the body as JSON
    pub async fn api_get_json_with_query(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> TransportResult<serde_json::Value> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = self.send(request).await?;
        let url = response.url().to_string();
        response.json().await.map_err(|e| TransportError::Body {
            url,
            message: e.to_string(),
        })
    }

    /// DELETE a path, ignoring any response body
    pub async fn api_delete(&self, path: &str) -> TransportResult<()> {
        let request = self.request(Method::DELETE, path);
        self.send(request).await?;
        Ok(())
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.api_endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);

        self.http
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> TransportResult<Response> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let status_code = status.as_u16();
        let url = response.url().to_string();
        let message = response.text().await.unwrap_or_default();

        if status_code == 404 {
            debug!("Not found: {}", url);
        } else {
            warn!("Request to {} failed with status {}", url, status_code);
        }

        Err(TransportError::Status {
            status: status_code,
            url,
            message,
        })
    }
}
