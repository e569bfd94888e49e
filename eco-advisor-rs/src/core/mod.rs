//! Core abstractions for the recommendation client
//!
//! This module provides the trait interfaces the rest of the crate is
//! written against:
//!
//! - `ServiceClient`: identity, health and metrics of a remote service client
//! - `RecommendationSource`: the one call the request controller depends on
//! - `ClientBuilder`: builder for the underlying HTTP client

pub mod builder;
pub use builder::ClientBuilder;

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::Result;
use crate::services::recommender::RecommendResponse;

/// Base trait for service clients
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// The client name/identifier
    fn name(&self) -> &str;

    /// The base URL for the service
    fn base_url(&self) -> &str;

    /// Service version
    fn version(&self) -> &str;

    /// Health check for the service
    async fn health_check(&self) -> Result<bool>;

    /// Returns the client's metrics if available
    fn metrics(&self) -> Option<HashMap<String, String>>;
}

/// Anything that can turn a prompt into a list of raw recommendations.
///
/// The HTTP client implements this; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Submit one prompt and wait for the service's answer
    async fn recommend(&self, prompt: &str) -> Result<RecommendResponse>;
}
