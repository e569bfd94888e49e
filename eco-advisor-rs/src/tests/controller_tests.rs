//! Tests for the request controller
//!
//! The recommendation source is mocked with mockall so every lifecycle path
//! can be driven without a network.

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::controller::{ChartArea, Phase, RequestController, EMPTY_CHART_MESSAGE, EMPTY_PROMPT_MESSAGE};
    use crate::core::{MockRecommendationSource, RecommendationSource};
    use crate::error::ServiceError;
    use crate::pipeline::{ChartPolicy, ColorTier};
    use crate::services::recommender::RecommendResponse;

    fn response(value: serde_json::Value) -> RecommendResponse {
        serde_json::from_value(value).expect("valid response fixture")
    }

    fn two_models() -> RecommendResponse {
        response(json!({
            "recommendations": [
                {"model": "A", "organization": "Lab A", "arena_score": 0.4, "cost_usd": 0.0001},
                {"model": "B", "organization": "Lab B", "arena_score": 0.8, "cost_usd": "Contact sales"}
            ]
        }))
    }

    #[tokio::test]
    async fn test_submit_success() {
        let mut source = MockRecommendationSource::new();
        source
            .expect_recommend()
            .withf(|prompt: &str| prompt == "Write a haiku")
            .times(1)
            .returning(|_| Ok(two_models()));

        let mut controller = RequestController::new(source, ChartPolicy::default());
        controller.set_prompt("Write a haiku");

        let phase = controller.submit().await.unwrap();
        assert_eq!(phase, Phase::Success);

        let dataset = controller.state().current_dataset();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].meta.name, "A");
        assert_eq!(dataset[1].tier, ColorTier::High);

        let view = controller.view();
        assert!(view.prompt_editable);
        assert_eq!(view.error, None);
        let cards = view.results.expect("results after success");
        assert_eq!(cards[1].estimated_cost, "Contact sales");
        assert!(matches!(view.chart, ChartArea::Plot { .. }));
    }

    #[tokio::test]
    async fn test_blank_prompt_never_calls_service() {
        let mut source = MockRecommendationSource::new();
        source.expect_recommend().times(0);

        let mut controller = RequestController::new(source, ChartPolicy::default());

        for prompt in ["", "   ", "\n\t "] {
            controller.set_prompt(prompt);
            let result = controller.submit().await;

            assert!(matches!(result, Err(ServiceError::Validation(_))));
            assert_eq!(controller.phase(), Phase::Idle);
            assert_eq!(controller.view().validation_message.as_deref(), Some(EMPTY_PROMPT_MESSAGE));
        }
    }

    #[tokio::test]
    async fn test_blank_prompt_keeps_previous_results() {
        let mut source = MockRecommendationSource::new();
        source.expect_recommend().times(1).returning(|_| Ok(two_models()));

        let mut controller = RequestController::new(source, ChartPolicy::default());
        controller.set_prompt("compare models");
        controller.submit().await.unwrap();

        controller.set_prompt("  ");
        assert!(controller.submit().await.is_err());

        assert_eq!(controller.phase(), Phase::Success);
        assert_eq!(controller.state().current_dataset().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_failure() {
        let mut source = MockRecommendationSource::new();
        source
            .expect_recommend()
            .times(1)
            .returning(|_| Err(ServiceError::network("connection refused")));

        let mut controller = RequestController::new(source, ChartPolicy::default());
        controller.set_prompt("anything");

        let phase = controller.submit().await.unwrap();
        assert_eq!(phase, Phase::Error);

        let state = controller.state();
        assert!(state.last_error().is_some_and(|e| !e.is_empty()));
        assert!(state.current_dataset().is_empty());

        let view = controller.view();
        assert!(view.prompt_editable);
        assert!(view.submit_enabled);
        assert!(!view.loading);
        assert_eq!(view.results, None);
        assert_eq!(
            view.chart,
            ChartArea::Empty {
                message: EMPTY_CHART_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_error_then_success_clears_error() {
        let mut source = MockRecommendationSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_recommend()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ServiceError::protocol(500, "Internal Server Error")));
        source
            .expect_recommend()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(two_models()));

        let mut controller = RequestController::new(source, ChartPolicy::default());
        controller.set_prompt("retry me");

        assert_eq!(controller.submit().await.unwrap(), Phase::Error);
        assert_eq!(controller.view().error.as_deref(), Some("Error: Network response was not ok"));

        assert_eq!(controller.submit().await.unwrap(), Phase::Success);
        assert_eq!(controller.state().last_error(), None);
        assert_eq!(controller.view().error, None);
    }

    #[tokio::test]
    async fn test_new_submit_replaces_dataset() {
        let mut source = MockRecommendationSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_recommend()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(two_models()));
        source
            .expect_recommend()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(response(json!({"recommendations": [{"model": "C", "arena_score": 0.5}]}))));

        let mut controller = RequestController::new(source, ChartPolicy::default());
        controller.set_prompt("first");
        controller.submit().await.unwrap();

        controller.set_prompt("second");
        let pending = controller.begin_submit().unwrap();
        assert!(controller.state().current_dataset().is_empty());
        assert!(matches!(controller.view().chart, ChartArea::Empty { .. }));

        let outcome = controller.source().recommend(pending.prompt()).await;
        controller.complete(pending, outcome);

        let dataset = controller.state().current_dataset();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].meta.name, "C");
    }

    #[tokio::test]
    async fn test_zero_recommendations() {
        let mut source = MockRecommendationSource::new();
        source
            .expect_recommend()
            .returning(|_| Ok(response(json!({"recommendations": []}))));

        let mut controller = RequestController::new(source, ChartPolicy::default());
        controller.set_prompt("nothing matches");

        assert_eq!(controller.submit().await.unwrap(), Phase::Success);

        let view = controller.view();
        assert_eq!(view.results, Some(vec![]));
        assert!(matches!(view.chart, ChartArea::Empty { .. }));
    }

    #[tokio::test]
    async fn test_submit_rejected_while_loading() {
        let mut source = MockRecommendationSource::new();
        source.expect_recommend().times(0);

        let mut controller = RequestController::new(source, ChartPolicy::default());
        controller.set_prompt("slow prompt");

        let pending = controller.begin_submit().unwrap();
        let second = controller.submit().await;

        assert!(matches!(second, Err(ServiceError::Validation(_))));
        assert_eq!(controller.phase(), Phase::Loading);

        controller.complete(pending, Err(ServiceError::timeout("30s elapsed")));
        assert_eq!(controller.phase(), Phase::Error);
        assert_eq!(
            controller.state().last_error(),
            Some("Error: Could not reach the recommendation service")
        );
    }
}
