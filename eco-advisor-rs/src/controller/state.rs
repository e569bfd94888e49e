//! Request lifecycle state and the view derived from it

use serde::Serialize;

use crate::pipeline::{ChartView, PipelineOutput, PlotPoint, ResultCard};

/// Message shown in the chart area whenever there is nothing to plot
pub const EMPTY_CHART_MESSAGE: &str = "Analyze a prompt to see recommendations on the chart";

/// Lifecycle phase of the analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Success => write!(f, "Success"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// The single request state instance, owned by the controller
#[derive(Debug, Clone, Default)]
pub struct RequestState {
    pub(super) prompt_text: String,
    pub(super) phase: Phase,
    pub(super) last_error: Option<String>,
    pub(super) validation_message: Option<String>,
    pub(super) result: Option<PipelineOutput>,
    pub(super) in_flight: Option<String>,
}

impl RequestState {
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Failure message; present only in `Error`
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Pre-flight guard message; never a request failure
    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    /// Plot points; non-empty only in `Success`
    pub fn current_dataset(&self) -> &[PlotPoint] {
        self.result
            .as_ref()
            .map(|output| output.view.points.as_slice())
            .unwrap_or(&[])
    }

    /// Full chart of the last successful response
    pub fn chart(&self) -> Option<&ChartView> {
        self.result.as_ref().map(|output| &output.view)
    }

    /// Pipeline output of the last successful response
    pub fn result(&self) -> Option<&PipelineOutput> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub(super) fn clear_results(&mut self) {
        self.last_error = None;
        self.result = None;
    }
}

/// What the chart area shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartArea {
    Empty { message: String },
    Plot { chart: ChartView },
}

/// Everything the user-facing surface needs, derived from `RequestState`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub prompt_text: String,
    pub prompt_editable: bool,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub loading: bool,
    pub validation_message: Option<String>,
    pub error: Option<String>,
    /// `None` until a response succeeds; `Some(vec![])` for zero recommendations
    pub results: Option<Vec<ResultCard>>,
    pub chart: ChartArea,
}

impl From<&RequestState> for ViewModel {
    fn from(state: &RequestState) -> Self {
        let loading = state.is_loading();

        let results = match (state.phase, &state.result) {
            (Phase::Success, Some(output)) => Some(output.cards()),
            _ => None,
        };

        let chart = match (state.phase, state.chart()) {
            (Phase::Success, Some(view)) if !view.is_empty() => ChartArea::Plot { chart: view.clone() },
            _ => ChartArea::Empty {
                message: EMPTY_CHART_MESSAGE.to_string(),
            },
        };

        Self {
            prompt_text: state.prompt_text.clone(),
            prompt_editable: !loading,
            submit_enabled: !loading,
            submit_label: if loading { "Analyzing..." } else { "Analyze" }.to_string(),
            loading,
            validation_message: state.validation_message.clone(),
            error: match state.phase {
                Phase::Error => state.last_error.clone(),
                _ => None,
            },
            results,
            chart,
        }
    }
}
