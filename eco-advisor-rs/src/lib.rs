//! # ECO Advisor
//!
//! Client and visualization pipeline for the ECO AI Toolkit model recommender.
//!
//! A user prompt is sent to the recommendation service, which answers with a
//! list of candidate language models. Each candidate is normalized, scored
//! against the rest of the set and laid out as one bubble on a cost versus
//! carbon-footprint chart.
//!
//! ## Architecture
//!
//! - `RecommendationSource`: the seam between the controller and the network
//! - `RecommenderClient`: HTTP implementation of `RecommendationSource`
//! - `RequestController`: owns the prompt and the request lifecycle
//! - `pipeline`: pure stages from raw records to a `ChartView`
//! - `render`: presentation of a `ViewModel`
//! - `ServiceError`: error type shared by every layer

pub mod core;
pub use core::{ClientBuilder, RecommendationSource, ServiceClient};

pub mod services;
pub use services::recommender::{
    RawRecommendation, RecommendRequest, RecommendResponse, RecommenderClient,
};

pub mod error;
pub use error::{ErrorContext, FailureClass, Result, ServiceError};

pub mod config;
pub use config::{ConfigProvider, RecommenderConfig, ServiceConfig};

pub mod pipeline;
pub use pipeline::{ChartPolicy, ChartView, NormalizedRecommendation, PlotPoint};

pub mod controller;
pub use controller::{Phase, RequestController, RequestState, ViewModel};

pub mod render;

pub mod util;

#[cfg(test)]
mod tests;

/// Create a recommendation client from environment configuration
pub fn recommender_client() -> Result<RecommenderClient> {
    RecommenderClient::from_env()
}
