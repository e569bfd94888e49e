//! Error mapping for recommendation service responses
//!
//! Converts non-success HTTP responses into the normalized `ServiceError`
//! and attaches diagnostic details to the error context.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};
use crate::util::truncate_string;

/// Longest body excerpt kept in an error message
const MAX_BODY_EXCERPT: usize = 100;

/// Map a non-success HTTP response to a ServiceError
pub fn map_http_error(
    status: StatusCode,
    body: &str,
    context: &mut ErrorContext,
) -> ServiceError {
    context.add("category", classify_http_error(status));

    // Try to pull a message out of a JSON error body first
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(message) = json_error_message(&json) {
            return ServiceError::protocol(status.as_u16(), message);
        }
    }

    // Fallback to status-based message
    let message = if body.trim().is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, truncate_string(body.trim(), MAX_BODY_EXCERPT))
    };

    ServiceError::protocol(status.as_u16(), message)
}

/// Extract an error message from common JSON error shapes
fn json_error_message(json: &Value) -> Option<String> {
    let candidate = json
        .get("message")
        .or_else(|| json.get("error"))
        .or_else(|| json.get("detail"))?;

    match candidate {
        Value::String(message) => Some(message.clone()),
        Value::Object(inner) => inner
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        _ => None,
    }
}

/// Helper function to classify HTTP errors by category
pub fn classify_http_error(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "validation",
        401 => "authentication",
        403 => "authorization",
        404 => "not_found",
        408 => "timeout",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "unknown",
    }
}
