//! Adaptive scale computation
//!
//! Maxima are taken over one response only; nothing carries over between
//! responses.

use serde::Serialize;

use super::normalizer::NormalizedRecommendation;

/// Maxima of the current result set
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Scale {
    /// Best arena score, or 0 for an empty / all-zero set
    pub max_arena: f64,
    /// Largest plotted cost
    pub max_cost: f64,
    /// Largest carbon footprint, in grams
    pub max_carbon: f64,
}

impl Scale {
    /// Compute the scale of one result set
    pub fn compute(records: &[NormalizedRecommendation]) -> Self {
        records.iter().fold(Scale::default(), |scale, record| Scale {
            max_arena: scale.max_arena.max(record.arena_score),
            max_cost: scale.max_cost.max(record.plot_cost()),
            max_carbon: scale.max_carbon.max(record.carbon_footprint),
        })
    }

    /// Arena score relative to the best in the set, in [0, 1].
    ///
    /// Returns 0 when the set has no positive score.
    pub fn normalized_score(&self, arena_score: f64) -> f64 {
        if self.max_arena <= 0.0 {
            return 0.0;
        }
        (arena_score / self.max_arena).clamp(0.0, 1.0)
    }
}
