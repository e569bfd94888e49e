//! Recommendation service client
//!
//! This module provides a typed client for the model recommendation service:
//! one `POST` carrying the prompt, one JSON answer carrying the ranked models.

mod models;
pub use models::*;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::config::{RecommenderConfig, ServiceConfig, DEFAULT_PROVIDER};
use crate::core::{ClientBuilder, RecommendationSource, ServiceClient};
use crate::error::{ErrorContext, Result, ServiceError};
use crate::services::common::{create_error_context, parse_error_response, ClientMetrics};
use crate::services::UserAgent;
use crate::util::{generate_request_id, measure_time_async, sanitize_for_logging, truncate_string};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

const SERVICE_NAME: &str = "recommender";

/// Longest body excerpt attached to a decode failure
const BODY_EXCERPT_LEN: usize = 100;

/// Client for the recommendation service
pub struct RecommenderClient {
    /// HTTP client
    http_client: Client,

    /// Configuration
    config: RecommenderConfig,

    /// Client metrics
    metrics: ClientMetrics,
}

impl std::fmt::Debug for RecommenderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommenderClient")
            .field("config", &self.config)
            .finish()
    }
}

impl RecommenderClient {
    /// Create a client from environment configuration (`ECO_RECOMMENDER_*`)
    pub fn from_env() -> Result<Self> {
        let config = RecommenderConfig::from_provider(&**DEFAULT_PROVIDER)?;
        Self::new_with_config(config)
    }

    /// Create a client with explicit configuration
    pub fn new_with_config(config: RecommenderConfig) -> Result<Self> {
        config.validate()?;

        let http_client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(UserAgent::default())
            .build_http_client()?;

        Ok(Self {
            http_client,
            config,
            metrics: ClientMetrics::default(),
        })
    }

    /// Create a new builder for the client
    pub fn builder() -> RecommenderClientBuilder {
        RecommenderClientBuilder::default()
    }

    /// Current configuration
    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Send one prompt to the service and decode the answer
    pub async fn fetch_recommendations(&self, prompt: &str) -> Result<RecommendResponse> {
        let request_id = generate_request_id();
        let url = self.config.endpoint_url()?;
        let endpoint = self.config.endpoint.clone();

        debug!("Sending request {} to recommender: POST {}", request_id, url);

        let (result, elapsed) = {
            let (url, endpoint, request_id) = (&url, endpoint.as_str(), request_id.as_str());
            measure_time_async(move || self.send_request(url, endpoint, request_id, prompt)).await
        };

        self.metrics.record(result.is_ok(), elapsed);

        match &result {
            Ok(response) => debug!(
                "Request {} returned {} recommendations in {:?}",
                request_id,
                response.recommendations.len(),
                elapsed
            ),
            Err(e) => warn!(
                "Request {} failed after {:?} ({}): {}",
                request_id,
                elapsed,
                e.failure_class(),
                e
            ),
        }

        result
    }
}

// Private helper methods for the recommendation client
impl RecommenderClient {
    async fn send_request(
        &self,
        url: &url::Url,
        endpoint: &str,
        request_id: &str,
        prompt: &str,
    ) -> Result<RecommendResponse> {
        let response = self.http_client
            .post(url.clone())
            .header(REQUEST_ID_HEADER, request_id)
            .json(&RecommendRequest::new(prompt))
            .send()
            .await
            .map_err(|e| {
                ServiceError::from(e)
                    .with_context(create_error_context(SERVICE_NAME, endpoint, request_id, None))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(parse_error_response(SERVICE_NAME, endpoint, request_id, response).await);
        }

        let body = response.text().await.map_err(|e| {
            ServiceError::from(e)
                .with_context(create_error_context(SERVICE_NAME, endpoint, request_id, Some(status)))
        })?;

        serde_json::from_str::<RecommendResponse>(&body).map_err(|e| {
            let excerpt = truncate_string(&sanitize_for_logging(body.trim()), BODY_EXCERPT_LEN);
            ServiceError::parsing(format!("Unexpected response shape: {}", e)).with_context(
                create_error_context(SERVICE_NAME, endpoint, request_id, Some(status))
                    .with("body_excerpt", excerpt),
            )
        })
    }
}

#[async_trait]
impl RecommendationSource for RecommenderClient {
    async fn recommend(&self, prompt: &str) -> Result<RecommendResponse> {
        self.fetch_recommendations(prompt).await
    }
}

#[async_trait]
impl ServiceClient for RecommenderClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn version(&self) -> &str {
        "v1"
    }

    async fn health_check(&self) -> Result<bool> {
        // Any HTTP answer from the base URL means the service is up
        match self.http_client.get(&self.config.base_url).send().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Recommender health check failed: {}", e);
                Ok(false)
            }
        }
    }

    fn metrics(&self) -> Option<HashMap<String, String>> {
        Some(self.metrics.as_map())
    }
}

/// Builder for the recommendation client
#[derive(Debug, Default)]
pub struct RecommenderClientBuilder {
    /// Base URL
    base_url: Option<String>,

    /// Endpoint path
    endpoint: Option<String>,

    /// Timeout
    timeout: Option<Duration>,
}

impl RecommenderClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the endpoint path
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the transport timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client, layering explicit values over environment configuration
    pub fn build(self) -> Result<RecommenderClient> {
        let mut config = RecommenderConfig::from_provider(&**DEFAULT_PROVIDER)
            .unwrap_or_else(|e| {
                warn!("Ignoring recommender environment configuration: {}", e);
                RecommenderConfig::default()
            });

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }

        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }

        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }

        RecommenderClient::new_with_config(config)
            .map_err(|e| e.with_context(ErrorContext::for_service(SERVICE_NAME)))
    }
}
