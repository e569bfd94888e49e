//! Client builder implementation
//!
//! Provides a builder for the HTTP client used by the recommendation client.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client as ReqwestClient;

use crate::config::DEFAULT_TIMEOUT;
use crate::error::{Result, ServiceError};
use crate::services::UserAgent;

/// Builder for the underlying HTTP client
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    /// Custom headers to include with all requests
    custom_headers: HashMap<String, String>,

    /// Request timeout
    timeout: Option<Duration>,

    /// User agent
    user_agent: Option<UserAgent>,

    /// Enable response decompression
    compression: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            custom_headers: HashMap::new(),
            timeout: Some(DEFAULT_TIMEOUT),
            user_agent: Some(UserAgent::default()),
            compression: true,
        }
    }
}

impl ClientBuilder {
    /// Create a new client builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a custom header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.insert(key.into(), value.into());
        self
    }

    /// Set request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: UserAgent) -> Self {
        self.user_agent = Some(user_agent);
        self
    }

    /// Enable or disable compression
    pub fn compression(mut self, enabled: bool) -> Self {
        self.compression = enabled;
        self
    }

    /// Build an HTTP client with the configured settings
    pub fn build_http_client(&self) -> Result<ReqwestClient> {
        let mut builder = ReqwestClient::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(ref user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent.to_string());
        }

        builder = builder.gzip(self.compression);

        let mut headers = HeaderMap::new();
        for (key, value) in &self.custom_headers {
            let header_name = HeaderName::from_str(key)
                .map_err(|e| ServiceError::configuration(format!("Invalid header name: {}", e)))?;

            let header_value = HeaderValue::from_str(value)
                .map_err(|e| ServiceError::configuration(format!("Invalid header value: {}", e)))?;

            headers.insert(header_name, header_value);
        }

        builder = builder.default_headers(headers);

        builder.build()
            .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_with_defaults() {
        assert!(ClientBuilder::new().build_http_client().is_ok());
    }

    #[test]
    fn test_rejects_invalid_header() {
        let result = ClientBuilder::new()
            .header("bad header", "value")
            .build_http_client();

        assert!(matches!(result, Err(ServiceError::Configuration(_))));
    }
}
