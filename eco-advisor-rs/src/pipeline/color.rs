//! Quality score to color bucket mapping
//!
//! Three discrete buckets rather than a gradient, so the legend can show
//! exactly three swatches.

use serde::Serialize;

use super::policy::{ColorScheme, Rgb};

/// Highest normalized score that still maps to the low tier
pub const LOW_TIER_MAX: f64 = 0.33;

/// Highest normalized score that still maps to the mid tier
pub const MID_TIER_MAX: f64 = 0.66;

/// Slack applied at bucket edges so a score computed as `(m * 0.33) / m`
/// stays in the bucket its exact value belongs to
const EDGE_TOLERANCE: f64 = 1e-9;

/// Quality bucket of a plotted recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTier {
    Low,
    Mid,
    High,
}

impl ColorTier {
    pub const ALL: [ColorTier; 3] = [ColorTier::Low, ColorTier::Mid, ColorTier::High];

    /// Position of the tier in the palette (0 = low)
    pub fn index(&self) -> usize {
        match self {
            ColorTier::Low => 0,
            ColorTier::Mid => 1,
            ColorTier::High => 2,
        }
    }

    /// Legend label
    pub fn label(&self) -> &'static str {
        match self {
            ColorTier::Low => "low",
            ColorTier::Mid => "medium",
            ColorTier::High => "high",
        }
    }

    /// Color of this tier under a scheme
    pub fn color(&self, scheme: ColorScheme) -> Rgb {
        scheme.palette()[self.index()]
    }
}

/// Bucket for a normalized score. Scores outside [0, 1] (and NaN) are clamped.
pub fn tier_for(score: f64) -> ColorTier {
    let s = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };

    if s <= LOW_TIER_MAX + EDGE_TOLERANCE {
        ColorTier::Low
    } else if s <= MID_TIER_MAX + EDGE_TOLERANCE {
        ColorTier::Mid
    } else {
        ColorTier::High
    }
}

/// Color for a normalized score under a scheme
pub fn color_for(score: f64, scheme: ColorScheme) -> Rgb {
    tier_for(score).color(scheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_edges() {
        assert_eq!(tier_for(0.0), ColorTier::Low);
        assert_eq!(tier_for(0.33), ColorTier::Low);
        assert_eq!(tier_for(0.3301), ColorTier::Mid);
        assert_eq!(tier_for(0.66), ColorTier::Mid);
        assert_eq!(tier_for(0.6601), ColorTier::High);
        assert_eq!(tier_for(1.0), ColorTier::High);
    }

    #[test]
    fn test_computed_edge_stays_low() {
        let max = 0.8;
        assert_eq!(tier_for((max * 0.33) / max), ColorTier::Low);
    }

    #[test]
    fn test_out_of_range_scores_are_clamped() {
        assert_eq!(tier_for(-3.0), ColorTier::Low);
        assert_eq!(tier_for(f64::NAN), ColorTier::Low);
        assert_eq!(tier_for(7.5), ColorTier::High);
    }

    #[test]
    fn test_tier_index_is_monotonic() {
        let mut previous = 0;
        for step in 0..=1000 {
            let index = tier_for(step as f64 / 1000.0).index();
            assert!(index >= previous);
            previous = index;
        }
    }

    #[test]
    fn test_colors_follow_scheme() {
        assert_eq!(color_for(1.0, ColorScheme::TrafficLight), Rgb::new(0, 255, 0));
        assert_eq!(color_for(0.1, ColorScheme::TrafficLight), Rgb::new(255, 0, 0));
        assert_eq!(color_for(0.5, ColorScheme::Eco), Rgb::new(102, 187, 106));
    }
}
