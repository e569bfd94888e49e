//! Record normalization
//!
//! Turns one loosely-shaped `RawRecommendation` into a fully typed
//! `NormalizedRecommendation`. This step never fails: every missing or
//! non-numeric field takes a documented default.

use serde::Serialize;
use serde_json::Value;

use crate::services::recommender::RawRecommendation;

/// Name shown when a record carries no usable model name
pub const UNKNOWN_MODEL: &str = "Unknown model";

/// Organization shown when a record carries none
pub const UNKNOWN_ORGANIZATION: &str = "Unknown";

/// Display text for a cost that was not supplied at all
pub const MISSING_COST_TEXT: &str = "N/A";

/// Bubble size used when sizing by performance and the record has no score
pub const DEFAULT_PERFORMANCE_SCORE: f64 = 10.0;

/// Estimated cost of running the prompt on a model
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cost {
    /// A usable amount in US dollars
    Numeric(f64),
    /// No amount; the text is shown to the user verbatim
    Unavailable(String),
}

impl Cost {
    /// The amount, if there is one
    pub fn amount(&self) -> Option<f64> {
        match self {
            Cost::Numeric(amount) => Some(*amount),
            Cost::Unavailable(_) => None,
        }
    }

    /// Value used on the chart's x axis
    pub fn plot_value(&self) -> f64 {
        self.amount().unwrap_or(0.0)
    }

    /// Text shown for an unavailable cost
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Cost::Numeric(_) => None,
            Cost::Unavailable(text) => Some(text),
        }
    }
}

/// A recommendation with every field typed and defaulted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecommendation {
    pub model: String,
    pub organization: String,
    /// Quality score, nominally in [0, 1]
    pub arena_score: f64,
    pub cost: Cost,
    /// CO₂-equivalent mass in grams
    pub carbon_footprint: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub performance_score: f64,
}

impl NormalizedRecommendation {
    /// Value used on the chart's x axis
    pub fn plot_cost(&self) -> f64 {
        self.cost.plot_value()
    }
}

/// Normalize one raw record
pub fn normalize(raw: &RawRecommendation) -> NormalizedRecommendation {
    NormalizedRecommendation {
        model: text_or(raw.model.as_ref(), UNKNOWN_MODEL),
        organization: text_or(raw.organization.as_ref(), UNKNOWN_ORGANIZATION),
        arena_score: number_or(raw.arena_score.as_ref(), 0.0),
        cost: cost_of(raw.cost_usd.as_ref()),
        carbon_footprint: number_or(raw.carbon_footprint.as_ref(), 0.0),
        input_tokens: count_or_zero(raw.input_tokens.as_ref()),
        output_tokens: count_or_zero(raw.output_tokens.as_ref()),
        performance_score: number_or(raw.performance_score.as_ref(), DEFAULT_PERFORMANCE_SCORE),
    }
}

/// Normalize a whole response, preserving order
pub fn normalize_all(raws: &[RawRecommendation]) -> Vec<NormalizedRecommendation> {
    raws.iter().map(normalize).collect()
}

fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => text.clone(),
        _ => default.to_string(),
    }
}

/// Only a JSON number counts; strings holding digits do not
fn number_or(value: Option<&Value>, default: f64) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|n| n.is_finite())
        .unwrap_or(default)
}

fn count_or_zero(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0 && *f <= u64::MAX as f64)
                .map(|f| f as u64)
        }),
        _ => None,
    }
    .unwrap_or(0)
}

fn cost_of(value: Option<&Value>) -> Cost {
    match value {
        Some(Value::Number(n)) => match n.as_f64().filter(|f| f.is_finite()) {
            Some(amount) => Cost::Numeric(amount),
            None => Cost::Unavailable(n.to_string()),
        },
        Some(Value::String(text)) => Cost::Unavailable(text.clone()),
        Some(other) => Cost::Unavailable(other.to_string()),
        None => Cost::Unavailable(MISSING_COST_TEXT.to_string()),
    }
}

impl From<&NormalizedRecommendation> for RawRecommendation {
    fn from(record: &NormalizedRecommendation) -> Self {
        let cost = match &record.cost {
            Cost::Numeric(amount) => Value::from(*amount),
            Cost::Unavailable(text) => Value::String(text.clone()),
        };

        RawRecommendation {
            model: Some(Value::String(record.model.clone())),
            organization: Some(Value::String(record.organization.clone())),
            arena_score: Some(Value::from(record.arena_score)),
            cost_usd: Some(cost),
            carbon_footprint: Some(Value::from(record.carbon_footprint)),
            input_tokens: Some(Value::from(record.input_tokens)),
            output_tokens: Some(Value::from(record.output_tokens)),
            performance_score: Some(Value::from(record.performance_score)),
        }
    }
}
