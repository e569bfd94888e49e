//! Tests for configuration loading
//!
//! These tests verify provider layering and the typed configs built on top.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use crate::config::{
        CompositeConfigProvider, ConfigProvider, ConfigProviderExt, EnvConfigProvider,
        GenericConfigProvider, MemoryConfigProvider, RecommenderConfig, ServiceConfig,
        DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT,
    };
    use crate::error::ServiceError;
    use crate::pipeline::{AxisMode, CarbonUnit, ChartPolicy, ColorScheme, SizeBasis};

    fn memory(pairs: &[(&str, &str)]) -> MemoryConfigProvider {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MemoryConfigProvider::with_values(values)
    }

    #[test]
    fn test_recommender_defaults() {
        let config = RecommenderConfig::from_provider(&MemoryConfigProvider::new()).unwrap();

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.endpoint_url().unwrap().as_str(), "http://localhost:5000/recommend");
    }

    #[test]
    fn test_recommender_overrides() {
        let provider = memory(&[
            ("recommender_base_url", "https://eco.example.com/api"),
            ("recommender_endpoint", "/v2/recommend"),
            ("recommender_timeout", "1500ms"),
        ]);
        let config = RecommenderConfig::from_provider(&provider).unwrap();

        assert_eq!(config.timeout, Duration::from_millis(1500));
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "https://eco.example.com/api/v2/recommend"
        );
        assert_eq!(config.service_name(), "recommender");
    }

    #[test]
    fn test_recommender_rejects_bad_values() {
        let bad_scheme = memory(&[("recommender_base_url", "ftp://eco.example.com")]);
        assert!(matches!(
            RecommenderConfig::from_provider(&bad_scheme),
            Err(ServiceError::Configuration(_))
        ));

        let bad_timeout = memory(&[("recommender_timeout", "soon")]);
        assert!(RecommenderConfig::from_provider(&bad_timeout).is_err());

        let zero_timeout = memory(&[("recommender_timeout", "0s")]);
        assert!(RecommenderConfig::from_provider(&zero_timeout).is_err());
    }

    #[test]
    fn test_composite_provider_order() {
        let composite = CompositeConfigProvider::new()
            .with_provider(memory(&[("chart_axis_mode", "fixed")]))
            .with_provider(memory(&[("chart_axis_mode", "adaptive"), ("chart_carbon_unit", "kg")]));

        assert_eq!(composite.get_string("chart_axis_mode").unwrap(), "fixed");
        assert_eq!(composite.get_string("chart_carbon_unit").unwrap(), "kg");
        assert!(composite.get_string("missing").is_err());
    }

    #[test]
    fn test_typed_lookups() {
        let provider = memory(&[("retries", "3"), ("verbose", "yes"), ("ratio", "0.5")]);

        assert_eq!(provider.get_int("retries").unwrap(), 3);
        assert!(provider.get_bool("verbose").unwrap());
        assert_eq!(provider.get::<f64>("ratio").unwrap(), 0.5);
        assert_eq!(provider.get_opt::<f64>("absent").unwrap(), None);
        assert!(provider.get_opt::<f64>("verbose").is_err());
        assert_eq!(provider.get_int_or("absent", 7), 7);
    }

    #[test]
    fn test_env_key_format() {
        let provider = EnvConfigProvider::new().with_prefix("ECO").with_namespace("TEST");
        assert_eq!(provider.format_key("recommender_timeout"), "ECO_TEST_RECOMMENDER_TIMEOUT");
    }

    #[test]
    fn test_chart_policy_from_provider() {
        let provider = memory(&[
            ("chart_color_scheme", "eco"),
            ("chart_carbon_unit", "kg"),
            ("chart_size_basis", "performance"),
            ("chart_axis_mode", "fixed"),
        ]);
        let policy = ChartPolicy::from_provider(&provider).unwrap();

        assert_eq!(policy.color_scheme, ColorScheme::Eco);
        assert_eq!(policy.carbon_unit, CarbonUnit::Kilograms);
        assert_eq!(policy.size_basis, SizeBasis::PerformanceScore);
        assert_eq!(policy.axis_mode, AxisMode::Fixed);

        let invalid = memory(&[("chart_color_scheme", "plaid")]);
        assert!(ChartPolicy::from_provider(&invalid).is_err());
    }
}
