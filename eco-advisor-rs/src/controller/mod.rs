//! Request controller
//!
//! Owns the prompt, the lifecycle phase and the one analysis request that may
//! be outstanding at a time:
//!
//! ```text
//! Idle ──submit──▶ Loading ──ok──▶ Success ──submit──▶ Loading …
//!                     └──fail──▶ Error ──submit──▶ Loading …
//! ```
//!
//! A blank prompt never leaves the current phase. Entering `Loading` clears
//! the previous error and dataset.

mod state;

pub use state::{ChartArea, Phase, RequestState, ViewModel, EMPTY_CHART_MESSAGE};

use log::{info, warn};

use crate::core::RecommendationSource;
use crate::error::{Result, ServiceError};
use crate::pipeline::{self, ChartPolicy};
use crate::services::recommender::RecommendResponse;
use crate::util::{generate_request_id, truncate_string};

/// Shown when the prompt is empty or whitespace
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt first!";

/// Returned when a submit is attempted while a request is outstanding
pub const IN_FLIGHT_MESSAGE: &str = "An analysis is already in progress";

/// Handle for the request started by `begin_submit`
#[derive(Debug)]
pub struct PendingRequest {
    id: String,
    prompt: String,
}

impl PendingRequest {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Prompt exactly as it will be sent
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Drives one `RequestState` against a recommendation source
pub struct RequestController<S: RecommendationSource> {
    source: S,
    policy: ChartPolicy,
    state: RequestState,
}

impl<S: RecommendationSource> RequestController<S> {
    pub fn new(source: S, policy: ChartPolicy) -> Self {
        Self {
            source,
            policy,
            state: RequestState::default(),
        }
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn policy(&self) -> &ChartPolicy {
        &self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Surface for the presentation layer
    pub fn view(&self) -> ViewModel {
        ViewModel::from(&self.state)
    }

    /// Replace the prompt text. Ignored while loading; returns whether it was applied.
    pub fn set_prompt(&mut self, text: impl Into<String>) -> bool {
        if self.state.is_loading() {
            return false;
        }
        self.state.prompt_text = text.into();
        true
    }

    /// Validate the prompt and enter `Loading`.
    ///
    /// Fails with a validation error, leaving the phase untouched, for a blank
    /// prompt or while another request is outstanding.
    pub fn begin_submit(&mut self) -> Result<PendingRequest> {
        if self.state.is_loading() {
            return Err(ServiceError::validation(IN_FLIGHT_MESSAGE));
        }

        if self.state.prompt_text.trim().is_empty() {
            self.state.validation_message = Some(EMPTY_PROMPT_MESSAGE.to_string());
            return Err(ServiceError::validation(EMPTY_PROMPT_MESSAGE));
        }

        let pending = PendingRequest {
            id: generate_request_id(),
            prompt: self.state.prompt_text.clone(),
        };

        self.state.clear_results();
        self.state.validation_message = None;
        self.state.in_flight = Some(pending.id.clone());
        self.transition(Phase::Loading);

        Ok(pending)
    }

    /// Apply the outcome of the request started by `begin_submit`
    pub fn complete(&mut self, pending: PendingRequest, outcome: Result<RecommendResponse>) -> Phase {
        if self.state.in_flight.as_deref() != Some(pending.id()) {
            warn!("Ignoring outcome of unknown request {}", pending.id());
            return self.state.phase;
        }
        self.state.in_flight = None;

        match outcome {
            Ok(response) => {
                let output = pipeline::run(&response.recommendations, &self.policy);
                info!("Analysis returned {} recommendations", output.records.len());
                self.state.result = Some(output);
                self.state.last_error = None;
                self.transition(Phase::Success)
            }
            Err(err) => {
                warn!(
                    "Analysis failed ({}, status {:?}): {}",
                    err.failure_class(),
                    err.status_code(),
                    truncate_string(&err.to_string(), 200)
                );
                self.state.result = None;
                self.state.last_error = Some(err.user_message());
                self.transition(Phase::Error)
            }
        }
    }

    /// Run one full submit cycle.
    ///
    /// Request failures end in `Phase::Error` and are not returned as `Err`;
    /// only a rejected submit is.
    #[tracing::instrument(name = "analyze_prompt", skip(self))]
    pub async fn submit(&mut self) -> Result<Phase> {
        let pending = self.begin_submit()?;
        let outcome = self.source.recommend(pending.prompt()).await;
        Ok(self.complete(pending, outcome))
    }

    fn transition(&mut self, next: Phase) -> Phase {
        if self.state.phase != next {
            info!("Request phase {} -> {}", self.state.phase, next);
        }
        self.state.phase = next;
        next
    }
}
