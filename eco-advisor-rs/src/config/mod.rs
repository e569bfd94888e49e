//! Configuration management for the recommendation client
//!
//! This module provides utilities for loading and validating configuration,
//! with support for environment variables and in-memory overrides.

use std::env;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use crate::error::{Result, ServiceError};
use crate::util::parse_duration;
use once_cell::sync::Lazy;

/// Default address of the recommendation service
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Default path of the recommendation endpoint
pub const DEFAULT_ENDPOINT: &str = "recommend";

/// Default transport timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get an integer configuration value
    fn get_int(&self, key: &str) -> Result<i64> {
        let value = self.get_string(key)?;
        value.trim().parse::<i64>()
            .map_err(|e| ServiceError::configuration(format!("Invalid integer for key {}: {}", key, e)))
    }

    /// Get a boolean configuration value
    fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.get_string(key)?;
        match value.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(ServiceError::configuration(format!("Invalid boolean value for key {}: {}", key, value))),
        }
    }

    /// Get a duration configuration value ("30", "30s", "500ms", "1m")
    fn get_duration(&self, key: &str) -> Result<Duration> {
        let value = self.get_string(key)?;
        parse_duration(&value)
            .ok_or_else(|| ServiceError::configuration(format!("Invalid duration for key {}: {}", key, value)))
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get an integer configuration value with a default
    fn get_int_or(&self, key: &str, default: i64) -> i64 {
        self.get_int(key).unwrap_or(default)
    }

    /// Get a boolean configuration value with a default
    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Typed lookups for any value implementing `FromStr`
pub trait GenericConfigProvider: ConfigProvider {
    /// Get a typed configuration value by parsing from string
    fn get<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        <T as FromStr>::Err: std::fmt::Display,
    {
        let value = self.get_string(key)?;
        value.trim().parse::<T>()
            .map_err(|e| ServiceError::configuration(format!("Invalid value for key {}: {}", key, e)))
    }

    /// Get a typed value, falling back to `default` only when the key is absent.
    ///
    /// A present but unparsable value is an error rather than a silent default.
    fn get_opt<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        <T as FromStr>::Err: std::fmt::Display,
    {
        match self.get_string(key) {
            Ok(_) => self.get::<T>(key).map(Some),
            Err(_) => Ok(None),
        }
    }
}

impl<T: ConfigProvider + ?Sized> GenericConfigProvider for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,

    /// Optional namespace for variables (e.g., "RECOMMENDER", "CHART")
    namespace: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Set a namespace for environment variables
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Format a configuration key as an environment variable
    pub(crate) fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        if let Some(ref namespace) = self.namespace {
            env_key.push_str(namespace);
            env_key.push('_');
        }

        env_key.push_str(&key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_"));

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key)
            .map_err(|e| {
                match e {
                    env::VarError::NotPresent => {
                        ServiceError::configuration(format!("Environment variable not set: {}", env_key))
                    }
                    env::VarError::NotUnicode(_) => {
                        ServiceError::configuration(format!("Environment variable is not valid unicode: {}", env_key))
                    }
                }
            })
    }
}

/// In-memory config provider for testing or command-line overrides
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    /// Configuration values
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory config provider with initial values
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// A composite config provider that tries multiple providers in order
#[derive(Default)]
pub struct CompositeConfigProvider {
    /// Ordered list of config providers to try
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    /// Create a new composite config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain
    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Add a provider and return self (builder pattern)
    pub fn with_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.add_provider(provider);
        self
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        for provider in &self.providers {
            if let Ok(value) = provider.get_string(key) {
                return Ok(value);
            }
        }

        Err(ServiceError::configuration(format!("Configuration key not found in any provider: {}", key)))
    }
}

/// Global default configuration provider
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> = Lazy::new(|| {
    Arc::new(EnvConfigProvider::new().with_prefix("ECO"))
});

/// Trait for service-specific configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;

    /// Service name
    fn service_name(&self) -> &str;
}

/// Configuration for the recommendation service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// Service base URL
    pub base_url: String,

    /// Path of the recommendation endpoint, relative to `base_url`
    pub endpoint: String,

    /// Transport timeout
    pub timeout: Duration,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RecommenderConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        let base_url = provider.get_string_or("recommender_base_url", DEFAULT_BASE_URL);
        let endpoint = provider.get_string_or("recommender_endpoint", DEFAULT_ENDPOINT);
        let timeout = match provider.get_string("recommender_timeout") {
            Ok(_) => provider.get_duration("recommender_timeout")?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        let config = Self {
            base_url,
            endpoint,
            timeout,
        };

        config.validate()?;
        Ok(config)
    }

    /// Full URL of the recommendation endpoint
    pub fn endpoint_url(&self) -> Result<url::Url> {
        let mut base = url::Url::parse(&self.base_url)
            .map_err(|e| ServiceError::configuration(format!("Invalid base URL {}: {}", self.base_url, e)))?;

        // Url::join replaces the last segment unless the base ends with '/'
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join(self.endpoint.trim_start_matches('/'))
            .map_err(|e| ServiceError::configuration(format!("Invalid endpoint {}: {}", self.endpoint, e)))
    }
}

impl ServiceConfig for RecommenderConfig {
    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ServiceError::configuration("Recommender base URL is required"));
        }

        let parsed = url::Url::parse(&self.base_url)
            .map_err(|e| ServiceError::configuration(format!("Invalid base URL {}: {}", self.base_url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ServiceError::configuration(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        if self.endpoint.trim().is_empty() {
            return Err(ServiceError::configuration("Recommender endpoint is required"));
        }

        if self.timeout.is_zero() {
            return Err(ServiceError::configuration("Recommender timeout must be positive"));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "recommender"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_config_provider() {
        let mut provider = MemoryConfigProvider::new();
        provider.set("key1", "value1");
        provider.set("key2", "123");

        assert_eq!(provider.get_string("key1").unwrap(), "value1");
        assert_eq!(provider.get_int("key2").unwrap(), 123);
        assert!(provider.get_string("key3").is_err());
    }

    #[test]
    fn test_env_key_format() {
        let provider = EnvConfigProvider::new()
            .with_prefix("TEST")
            .with_namespace("CONFIG");

        assert_eq!(provider.format_key("base_url"), "TEST_CONFIG_BASE_URL");
        assert_eq!(provider.format_key("base-url"), "TEST_CONFIG_BASE_URL");
    }

    #[test]
    fn test_recommender_config_defaults() {
        let provider = MemoryConfigProvider::new();
        let config = RecommenderConfig::from_provider(&provider).unwrap();

        assert_eq!(config, RecommenderConfig::default());
        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://localhost:5000/recommend"
        );
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let config = RecommenderConfig {
            base_url: "http://10.0.0.5:8080/api/v2".to_string(),
            endpoint: "/recommend".to_string(),
            ..RecommenderConfig::default()
        };

        assert_eq!(
            config.endpoint_url().unwrap().as_str(),
            "http://10.0.0.5:8080/api/v2/recommend"
        );
    }

    #[test]
    fn test_recommender_config_validation() {
        let config = RecommenderConfig {
            base_url: "ftp://example.com".to_string(),
            ..RecommenderConfig::default()
        };
        assert!(config.validate().is_err());

        let config = RecommenderConfig {
            timeout: Duration::ZERO,
            ..RecommenderConfig::default()
        };
        assert!(config.validate().is_err());

        let mut provider = MemoryConfigProvider::new();
        provider.set("recommender_timeout", "eventually");
        assert!(RecommenderConfig::from_provider(&provider).is_err());
    }
}
