//! Recommendation visualization pipeline
//!
//! Raw records flow through four pure stages:
//!
//! - `normalizer`: raw record → typed record with safe defaults
//! - `scale`: maxima over the whole response
//! - `color`: normalized score → one of three buckets
//! - `dataset`: ordered plot points, axes and legend
//!
//! `tooltip` formats the per-point and per-card text. No stage keeps state
//! between calls.

pub mod color;
pub mod dataset;
pub mod normalizer;
pub mod policy;
pub mod scale;
pub mod tooltip;

pub use color::{color_for, tier_for, ColorTier};
pub use dataset::{
    radius_for, AxisConfig, ChartView, DatasetBuilder, Legend, LegendEntry, PlotPoint,
    PointMetadata, BASE_RADIUS, MAX_RADIUS, RADIUS_SPREAD,
};
pub use normalizer::{normalize, normalize_all, Cost, NormalizedRecommendation};
pub use policy::{AxisMode, CarbonUnit, ChartPolicy, ColorScheme, Rgb, SizeBasis};
pub use scale::Scale;
pub use tooltip::{format_cost, tooltip_lines, ResultCard};

use crate::services::recommender::RawRecommendation;

/// Output of one full pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub records: Vec<NormalizedRecommendation>,
    pub view: ChartView,
}

impl PipelineOutput {
    /// Results list entries, in the same order as the points
    pub fn cards(&self) -> Vec<ResultCard> {
        self.records.iter().map(ResultCard::from).collect()
    }
}

/// Run every stage over one response
pub fn run(raws: &[RawRecommendation], policy: &ChartPolicy) -> PipelineOutput {
    let records = normalize_all(raws);
    let scale = Scale::compute(&records);
    let view = DatasetBuilder::new(*policy).build_view(&records, &scale);

    log::debug!(
        "Built {} plot points (max arena score {:.3})",
        view.points.len(),
        scale.max_arena
    );

    PipelineOutput { records, view }
}
