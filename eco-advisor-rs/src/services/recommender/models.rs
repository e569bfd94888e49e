//! Recommendation service data models
//!
//! Request and response types exchanged with the recommendation service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a recommendation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    /// The user's prompt, sent verbatim
    pub text: String,
}

impl RecommendRequest {
    /// Create a request for a prompt
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Successful response body.
///
/// The top level must be an object with a `recommendations` array; anything
/// else fails to decode and is reported as a protocol failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    /// Recommendations in the order the service ranked them
    pub recommendations: Vec<RawRecommendation>,
}

/// One recommendation exactly as received.
///
/// Every field is kept as untyped JSON so a single malformed field can never
/// reject the whole payload. Typing happens in the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct RawRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arena_score: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<Value>,

    /// CO₂-equivalent mass in grams
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbon_footprint: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_score: Option<Value>,
}

impl From<Value> for RawRecommendation {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(mut fields) => Self {
                model: take_field(&mut fields, "model"),
                organization: take_field(&mut fields, "organization"),
                arena_score: take_field(&mut fields, "arena_score"),
                cost_usd: take_field(&mut fields, "cost_usd"),
                carbon_footprint: take_field(&mut fields, "carbon_footprint"),
                input_tokens: take_field(&mut fields, "input_tokens"),
                output_tokens: take_field(&mut fields, "output_tokens"),
                performance_score: take_field(&mut fields, "performance_score"),
            },
            // Not an object: nothing usable, every field takes its default later
            _ => Self::default(),
        }
    }
}

/// Remove a field, treating JSON `null` as absent
fn take_field(fields: &mut Map<String, Value>, key: &str) -> Option<Value> {
    fields.remove(key).filter(|v| !v.is_null())
}
