//! Error handling for the Eco Advisor client
//!
//! This module provides the error system used across the crate:
//! - Categorizes request failures as transport or protocol problems
//! - Adds rich context to errors for diagnostics
//! - Maps HTTP error responses to normalized errors
//! - Produces the single human-readable message shown to the user

use std::fmt;
use std::collections::HashMap;
use thiserror::Error;

pub mod mapping;

/// Result type for Eco Advisor operations
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Main error type for the Eco Advisor client
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Local input validation errors (never reach the network)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or connection errors
    #[error("Network error: {0}")]
    Network(String),

    /// Transport-level timeout
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Response received with a non-success status
    #[error("Protocol error ({status}): {message}")]
    Protocol { status: u16, message: String },

    /// Response body could not be decoded
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unexpected or internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    /// Errors with additional context
    #[error("{inner}")]
    WithContext {
        inner: Box<ServiceError>,
        context: ErrorContext,
    },
}

/// Coarse failure class of a request error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Input rejected before any request was made
    Validation,
    /// The exchange could not complete
    Transport,
    /// A response arrived but was unusable
    Protocol,
    /// Local setup problem
    Setup,
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Transport => write!(f, "transport"),
            Self::Protocol => write!(f, "protocol"),
            Self::Setup => write!(f, "setup"),
        }
    }
}

impl ServiceError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        ServiceError::Network(message.into())
    }

    /// Create a timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        ServiceError::Timeout(message.into())
    }

    /// Create a protocol error for a non-success status
    pub fn protocol(status: u16, message: impl Into<String>) -> Self {
        ServiceError::Protocol {
            status,
            message: message.into(),
        }
    }

    /// Create a parsing error
    pub fn parsing(message: impl Into<String>) -> Self {
        ServiceError::Parsing(message.into())
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        ServiceError::Configuration(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        ServiceError::Internal(message.into())
    }

    /// Add context to an existing error
    pub fn with_context(self, context: ErrorContext) -> Self {
        ServiceError::WithContext {
            inner: Box::new(self),
            context,
        }
    }

    /// Add a single context key/value to an existing error
    pub fn with_context_value(self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        let mut context = ErrorContext::new();
        context.add(key, value);
        self.with_context(context)
    }

    /// The error with all context layers removed
    pub fn root(&self) -> &ServiceError {
        match self {
            ServiceError::WithContext { inner, .. } => inner.root(),
            other => other,
        }
    }

    /// Get the service name if available
    pub fn service_name(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { context, .. } => Some(&context.service),
            _ => None,
        }
    }

    /// Outermost context attached to this error
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            ServiceError::WithContext { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ServiceError::Protocol { status, .. } => Some(*status),
            ServiceError::WithContext { inner, context } => {
                context.status_code.or_else(|| inner.status_code())
            }
            _ => None,
        }
    }

    /// Get the request ID if available
    pub fn request_id(&self) -> Option<&str> {
        match self {
            ServiceError::WithContext { inner, context } => {
                context.request_id.as_deref().or_else(|| inner.request_id())
            }
            _ => None,
        }
    }

    /// Classify the failure for diagnostics
    pub fn failure_class(&self) -> FailureClass {
        match self.root() {
            ServiceError::Validation(_) => FailureClass::Validation,
            ServiceError::Network(_) | ServiceError::Timeout(_) => FailureClass::Transport,
            ServiceError::Protocol { .. } | ServiceError::Parsing(_) => FailureClass::Protocol,
            _ => FailureClass::Setup,
        }
    }

    /// Check if this is a transport failure
    pub fn is_transport(&self) -> bool {
        self.failure_class() == FailureClass::Transport
    }

    /// Check if this is a protocol failure
    pub fn is_protocol(&self) -> bool {
        self.failure_class() == FailureClass::Protocol
    }

    /// The message shown to the user in the error indicator.
    ///
    /// Transport and protocol failures collapse to one generic message each;
    /// the full error stays available through `Display` for logs.
    pub fn user_message(&self) -> String {
        match self.root() {
            ServiceError::Validation(message) => message.clone(),
            ServiceError::Network(_) | ServiceError::Timeout(_) => {
                "Error: Could not reach the recommendation service".to_string()
            }
            ServiceError::Protocol { .. } | ServiceError::Parsing(_) => {
                "Error: Network response was not ok".to_string()
            }
            ServiceError::Configuration(message) => format!("Error: {}", message),
            _ => "Error: Unexpected failure while analyzing the prompt".to_string(),
        }
    }
}

/// Error context information
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Service that generated the error
    pub service: String,

    /// Request timestamp
    pub timestamp: Option<chrono::DateTime<chrono::Utc>>,

    /// HTTP status code if applicable
    pub status_code: Option<u16>,

    /// Request ID for tracing
    pub request_id: Option<String>,

    /// Endpoint that was called
    pub endpoint: Option<String>,

    /// Additional context data
    pub data: HashMap<String, String>,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            service: "unknown".to_string(),
            timestamp: Some(chrono::Utc::now()),
            status_code: None,
            request_id: None,
            endpoint: None,
            data: HashMap::new(),
        }
    }
}

impl ErrorContext {
    /// Create a new error context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new error context for a specific service
    pub fn for_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Self::default()
        }
    }

    /// Add an HTTP status code
    pub fn status_code(mut self, code: u16) -> Self {
        self.status_code = Some(code);
        self
    }

    /// Add a request ID
    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    /// Add an endpoint
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Add a context value
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.data.insert(key.into(), value.to_string());
    }

    /// Add a context value and return self (builder pattern)
    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: fmt::Display,
    {
        self.add(key, value);
        self
    }
}

/// Convert reqwest errors to ServiceError
impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        let context = ErrorContext::for_service("http_client");

        let service_error = if err.is_timeout() {
            ServiceError::timeout(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            ServiceError::network(format!("Connection error: {}", err))
        } else if err.is_redirect() {
            ServiceError::network(format!("Too many redirects: {}", err))
        } else if err.is_decode() {
            ServiceError::parsing(format!("Response decode error: {}", err))
        } else if let Some(status) = err.status() {
            ServiceError::protocol(status.as_u16(), err.to_string())
        } else {
            ServiceError::network(format!("HTTP client error: {}", err))
        };

        // Add status code if available
        if let Some(status) = err.status() {
            service_error.with_context(context.status_code(status.as_u16()))
        } else {
            service_error.with_context(context)
        }
    }
}

/// Convert serde_json errors to ServiceError
impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::parsing(format!("JSON error: {}", err))
            .with_context(ErrorContext::for_service("json"))
    }
}
