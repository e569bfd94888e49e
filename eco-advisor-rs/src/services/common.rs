//! Common utilities for service clients
//!
//! This module provides shared functionality for the HTTP clients.

use std::fmt;
use std::time::Duration;
use std::sync::atomic::{AtomicU64, Ordering};
use std::collections::HashMap;

use crate::error::{ErrorContext, ServiceError};
use crate::util::sanitize_for_logging;

/// UserAgent structure for identifying the client to upstream services
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "ECO-AI-Toolkit".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("eco-advisor".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Request counters for one client
#[derive(Debug, Default)]
pub(crate) struct ClientMetrics {
    /// Total requests made
    request_count: AtomicU64,

    /// Total successful responses
    success_count: AtomicU64,

    /// Total errors
    error_count: AtomicU64,

    /// Latency of the most recent exchange, in microseconds
    last_latency_us: AtomicU64,
}

impl ClientMetrics {
    /// Record the outcome of one exchange
    pub(crate) fn record(&self, is_success: bool, latency: Duration) {
        self.request_count.fetch_add(1, Ordering::Relaxed);

        if is_success {
            self.success_count.fetch_add(1, Ordering::Relaxed);
        } else {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }

        let micros = u64::try_from(latency.as_micros()).unwrap_or(u64::MAX);
        self.last_latency_us.store(micros, Ordering::Relaxed);
    }

    /// Get all metrics as a map
    pub(crate) fn as_map(&self) -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("request_count".to_string(), self.request_count.load(Ordering::Relaxed).to_string());
        map.insert("success_count".to_string(), self.success_count.load(Ordering::Relaxed).to_string());
        map.insert("error_count".to_string(), self.error_count.load(Ordering::Relaxed).to_string());

        let latency_ms = self.last_latency_us.load(Ordering::Relaxed) as f64 / 1000.0;
        map.insert("last_latency_ms".to_string(), format!("{:.2}", latency_ms));

        map
    }
}

/// Create error context for HTTP requests
pub fn create_error_context(
    service_name: &str,
    endpoint: &str,
    request_id: &str,
    status: Option<reqwest::StatusCode>,
) -> ErrorContext {
    let mut context = ErrorContext::for_service(service_name)
        .endpoint(endpoint)
        .request_id(request_id);

    if let Some(status_code) = status {
        context = context.status_code(status_code.as_u16());
    }

    context
}

/// Turn a non-success HTTP response into a ServiceError
pub async fn parse_error_response(
    service_name: &str,
    endpoint: &str,
    request_id: &str,
    response: reqwest::Response,
) -> ServiceError {
    let status = response.status();
    let mut context = create_error_context(service_name, endpoint, request_id, Some(status));

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("Failed to read error response: {}", e),
    };

    log::debug!(
        "{} returned {} for request {}: {}",
        service_name,
        status,
        request_id,
        sanitize_for_logging(&body)
    );

    crate::error::mapping::map_http_error(status, &body, &mut context)
        .with_context(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        let ua = UserAgent {
            app_name: "ECO".to_string(),
            version: "1.2.3".to_string(),
            extra: None,
        };
        assert_eq!(ua.to_string(), "ECO/1.2.3");
        assert!(UserAgent::default().to_string().contains("(eco-advisor)"));
    }

    #[test]
    fn test_client_metrics() {
        let metrics = ClientMetrics::default();
        metrics.record(true, Duration::from_millis(12));
        metrics.record(false, Duration::from_millis(3));

        let map = metrics.as_map();
        assert_eq!(map["request_count"], "2");
        assert_eq!(map["success_count"], "1");
        assert_eq!(map["error_count"], "1");
        assert_eq!(map["last_latency_ms"], "3.00");
    }
}
