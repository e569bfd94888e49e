//! Tooltip and result card text

use serde::Serialize;

use super::dataset::PointMetadata;
use super::normalizer::{Cost, NormalizedRecommendation};
use super::policy::{ChartPolicy, SizeBasis};

/// Cost as shown to the user: `$0.000200`, or the placeholder verbatim
pub fn format_cost(cost: &Cost) -> String {
    match cost {
        Cost::Numeric(amount) => format!("${:.6}", amount),
        Cost::Unavailable(text) => text.clone(),
    }
}

/// Ordered tooltip lines for one point
pub fn tooltip_lines(meta: &PointMetadata, policy: &ChartPolicy) -> Vec<String> {
    let unit = policy.carbon_unit;
    let carbon = unit.from_grams(meta.carbon_grams);

    let mut lines = vec![
        format!("Model: {}", meta.name),
        format!("Organization: {}", meta.organization),
        format!("Cost: {}", format_cost(&meta.cost)),
        format!("CO₂: {:.*} {}", unit.decimals(), carbon, unit.symbol()),
        format!("Arena Score: {:.2}", meta.arena_score),
    ];

    if policy.size_basis == SizeBasis::PerformanceScore {
        lines.push(format!("Performance: {:.2}", meta.performance_score));
    }

    lines.push(format!("Tokens: {} in / {} out", meta.input_tokens, meta.output_tokens));
    lines
}

/// One entry of the results list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    pub title: String,
    pub organization: String,
    pub arena_score: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub estimated_cost: String,
}

impl ResultCard {
    /// Card body, one labelled field per line
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Organization: {}", self.organization),
            format!("Arena Score: {}", self.arena_score),
            format!("Input Tokens: {}", self.input_tokens),
            format!("Output Tokens: {}", self.output_tokens),
            format!("Estimated Cost: {}", self.estimated_cost),
        ]
    }
}

impl From<&NormalizedRecommendation> for ResultCard {
    fn from(record: &NormalizedRecommendation) -> Self {
        Self {
            title: record.model.clone(),
            organization: record.organization.clone(),
            arena_score: format!("{:.2}", record.arena_score),
            input_tokens: record.input_tokens,
            output_tokens: record.output_tokens,
            estimated_cost: format_cost(&record.cost),
        }
    }
}
