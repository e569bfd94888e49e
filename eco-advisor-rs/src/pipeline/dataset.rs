//! Plot dataset construction
//!
//! Combines normalized records, their scale and the presentation policy into
//! the structure handed to a renderer.

use serde::Serialize;

use super::color::{tier_for, ColorTier};
use super::normalizer::{Cost, NormalizedRecommendation};
use super::policy::{AxisMode, ChartPolicy, Rgb, SizeBasis};
use super::scale::Scale;
use super::tooltip::tooltip_lines;

/// Radius of the weakest bubble
pub const BASE_RADIUS: f64 = 6.0;

/// Extra radius of the strongest bubble over `BASE_RADIUS`
pub const RADIUS_SPREAD: f64 = 18.0;

/// Largest radius any bubble is drawn with
pub const MAX_RADIUS: f64 = BASE_RADIUS + RADIUS_SPREAD;

/// Fixed x-axis upper bound, US dollars
pub const FIXED_COST_MAX: f64 = 0.0005;

/// Fixed y-axis upper bound, grams CO₂e
pub const FIXED_CARBON_MAX_GRAMS: f64 = 2.0;

/// Headroom added above the largest value in adaptive mode
const ADAPTIVE_HEADROOM: f64 = 1.1;

/// Title of the single dataset
pub const DATASET_LABEL: &str = "Recommended LLMs";

/// Title shown above the legend swatches
pub const LEGEND_TITLE: &str = "Arena Score Legend:";

/// Tooltip payload carried through unchanged from the record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PointMetadata {
    pub name: String,
    pub organization: String,
    /// The cost as supplied, numeric or placeholder
    pub cost: Cost,
    pub carbon_grams: f64,
    pub arena_score: f64,
    pub performance_score: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl From<&NormalizedRecommendation> for PointMetadata {
    fn from(record: &NormalizedRecommendation) -> Self {
        Self {
            name: record.model.clone(),
            organization: record.organization.clone(),
            cost: record.cost.clone(),
            carbon_grams: record.carbon_footprint,
            arena_score: record.arena_score,
            performance_score: record.performance_score,
            input_tokens: record.input_tokens,
            output_tokens: record.output_tokens,
        }
    }
}

/// One bubble
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotPoint {
    /// Cost, US dollars
    pub x: f64,
    /// Carbon footprint in the policy's display unit
    pub y: f64,
    /// Radius in pixels
    pub r: f64,
    /// Arena score relative to the best in the set
    pub score: f64,
    pub tier: ColorTier,
    pub color: Rgb,
    pub meta: PointMetadata,
}

/// Bounds and title of one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    pub title: String,
    pub min: f64,
    pub max: f64,
}

/// One legend swatch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub tier: ColorTier,
    pub label: String,
    pub color: Rgb,
}

/// Legend listing the three quality tiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    fn for_policy(policy: &ChartPolicy) -> Self {
        Self {
            title: LEGEND_TITLE.to_string(),
            entries: ColorTier::ALL
                .iter()
                .map(|tier| LegendEntry {
                    tier: *tier,
                    label: tier.label().to_string(),
                    color: tier.color(policy.color_scheme),
                })
                .collect(),
        }
    }
}

/// Everything a renderer needs for one successful cycle. Read-only for renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub label: String,
    pub points: Vec<PlotPoint>,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    pub legend: Legend,
    pub scale: Scale,
    pub policy: ChartPolicy,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tooltip lines for one point
    pub fn tooltip(&self, point: &PlotPoint) -> Vec<String> {
        tooltip_lines(&point.meta, &self.policy)
    }
}

/// Radius for a normalized score
pub fn radius_for(score: f64) -> f64 {
    BASE_RADIUS + score.clamp(0.0, 1.0) * RADIUS_SPREAD
}

/// Builds plot points and the chart view under one policy
#[derive(Debug, Clone, Copy, Default)]
pub struct DatasetBuilder {
    policy: ChartPolicy,
}

impl DatasetBuilder {
    pub fn new(policy: ChartPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ChartPolicy {
        &self.policy
    }

    /// One point per record, in input order
    pub fn build_points(&self, records: &[NormalizedRecommendation], scale: &Scale) -> Vec<PlotPoint> {
        records.iter().map(|record| self.point(record, scale)).collect()
    }

    /// Points plus axes and legend
    pub fn build_view(&self, records: &[NormalizedRecommendation], scale: &Scale) -> ChartView {
        ChartView {
            label: DATASET_LABEL.to_string(),
            points: self.build_points(records, scale),
            x_axis: self.x_axis(scale),
            y_axis: self.y_axis(scale),
            legend: Legend::for_policy(&self.policy),
            scale: *scale,
            policy: self.policy,
        }
    }

    fn point(&self, record: &NormalizedRecommendation, scale: &Scale) -> PlotPoint {
        let score = scale.normalized_score(record.arena_score);
        let tier = tier_for(score);

        let r = match self.policy.size_basis {
            SizeBasis::ArenaScore => radius_for(score),
            SizeBasis::PerformanceScore => record.performance_score.clamp(0.0, MAX_RADIUS),
        };

        PlotPoint {
            x: record.plot_cost(),
            y: self.policy.carbon_unit.from_grams(record.carbon_footprint),
            r,
            score,
            tier,
            color: tier.color(self.policy.color_scheme),
            meta: PointMetadata::from(record),
        }
    }

    fn x_axis(&self, scale: &Scale) -> AxisConfig {
        AxisConfig {
            title: "Cost ($)".to_string(),
            min: 0.0,
            max: self.upper_bound(scale.max_cost, FIXED_COST_MAX),
        }
    }

    fn y_axis(&self, scale: &Scale) -> AxisConfig {
        let unit = self.policy.carbon_unit;
        AxisConfig {
            title: format!("Carbon footprint ({} CO₂e)", unit.symbol()),
            min: 0.0,
            max: self.upper_bound(unit.from_grams(scale.max_carbon), unit.from_grams(FIXED_CARBON_MAX_GRAMS)),
        }
    }

    fn upper_bound(&self, observed_max: f64, fixed_max: f64) -> f64 {
        match self.policy.axis_mode {
            AxisMode::Fixed => fixed_max,
            AxisMode::Adaptive if observed_max > 0.0 => observed_max * ADAPTIVE_HEADROOM,
            AxisMode::Adaptive => fixed_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalizer::normalize;
    use crate::pipeline::policy::CarbonUnit;
    use crate::services::recommender::RawRecommendation;
    use serde_json::json;

    fn record(value: serde_json::Value) -> NormalizedRecommendation {
        normalize(&RawRecommendation::from(value))
    }

    #[test]
    fn test_radius_bounds() {
        assert_eq!(radius_for(0.0), BASE_RADIUS);
        assert_eq!(radius_for(1.0), BASE_RADIUS + RADIUS_SPREAD);
        assert_eq!(radius_for(4.0), BASE_RADIUS + RADIUS_SPREAD);
    }

    #[test]
    fn test_zero_scale_collapses_radius() {
        let records = vec![record(json!({"model": "a"})), record(json!({"model": "b", "arena_score": 0}))];
        let scale = Scale::compute(&records);
        let points = DatasetBuilder::default().build_points(&records, &scale);

        for point in &points {
            assert_eq!(point.r, BASE_RADIUS);
            assert_eq!(point.tier, ColorTier::Low);
            assert!(point.r.is_finite());
        }
    }

    #[test]
    fn test_order_and_metadata_pass_through() {
        let records = vec![
            record(json!({"model": "first", "arena_score": 0.1, "cost_usd": "Ask us"})),
            record(json!({"model": "second", "arena_score": 0.9, "input_tokens": 7})),
            record(json!({"model": "third", "arena_score": 0.5})),
        ];
        let scale = Scale::compute(&records);
        let points = DatasetBuilder::default().build_points(&records, &scale);

        assert_eq!(points.len(), records.len());
        for (point, record) in points.iter().zip(&records) {
            assert_eq!(point.meta.name, record.model);
        }
        assert_eq!(points[0].meta.cost, Cost::Unavailable("Ask us".to_string()));
        assert_eq!(points[0].x, 0.0);
        assert_eq!(points[1].meta.input_tokens, 7);
    }

    #[test]
    fn test_performance_sizing() {
        let records = vec![
            record(json!({"arena_score": 0.9, "performance_score": 22.0})),
            record(json!({"arena_score": 0.3})),
        ];
        let scale = Scale::compute(&records);
        let builder = DatasetBuilder::new(ChartPolicy::default().with_size_basis(SizeBasis::PerformanceScore));
        let points = builder.build_points(&records, &scale);

        assert_eq!(points[0].r, 22.0);
        assert_eq!(points[1].r, crate::pipeline::normalizer::DEFAULT_PERFORMANCE_SCORE);
    }

    #[test]
    fn test_performance_radius_is_bounded() {
        let records = vec![
            record(json!({"arena_score": 0.9, "performance_score": 5000.0})),
            record(json!({"arena_score": 0.3, "performance_score": -4.0})),
        ];
        let scale = Scale::compute(&records);
        let builder = DatasetBuilder::new(ChartPolicy::default().with_size_basis(SizeBasis::PerformanceScore));
        let points = builder.build_points(&records, &scale);

        assert_eq!(points[0].r, MAX_RADIUS);
        assert_eq!(points[1].r, 0.0);
    }

    #[test]
    fn test_fixed_axes() {
        let records = vec![record(json!({"cost_usd": 0.01, "carbon_footprint": 50.0}))];
        let scale = Scale::compute(&records);
        let view = DatasetBuilder::new(ChartPolicy::default().with_axis_mode(AxisMode::Fixed))
            .build_view(&records, &scale);

        assert_eq!(view.x_axis.max, FIXED_COST_MAX);
        assert_eq!(view.y_axis.max, FIXED_CARBON_MAX_GRAMS);
        assert_eq!(view.y_axis.title, "Carbon footprint (g CO₂e)");
    }

    #[test]
    fn test_adaptive_axes() {
        let records = vec![record(json!({"cost_usd": 0.001, "carbon_footprint": 3000.0}))];
        let scale = Scale::compute(&records);
        let view = DatasetBuilder::new(ChartPolicy::default().with_carbon_unit(CarbonUnit::Kilograms))
            .build_view(&records, &scale);

        assert!((view.x_axis.max - 0.0011).abs() < 1e-12);
        assert!((view.y_axis.max - 3.3).abs() < 1e-9);
        assert_eq!(view.points[0].y, 3.0);
        assert_eq!(view.y_axis.title, "Carbon footprint (kg CO₂e)");
    }

    #[test]
    fn test_adaptive_axes_fall_back_when_empty() {
        let view = DatasetBuilder::default().build_view(&[], &Scale::default());

        assert!(view.is_empty());
        assert_eq!(view.x_axis.max, FIXED_COST_MAX);
        assert_eq!(view.y_axis.max, FIXED_CARBON_MAX_GRAMS);
        assert_eq!(view.legend.entries.len(), 3);
    }
}
