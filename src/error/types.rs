//! Error types for the SharedId provider
//!
//! The id operations themselves never surface these to their callers (every
//! failure degrades to a usable record), but the plumbing underneath them
//! does: HTTP calls, response parsing, the cookie store, configuration and
//! the submodule registry.

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },

    /// Network/connection errors
    #[error("Network error: {message}")]
    Network {
        /// Error message describing the network issue
        message: String,
    },

    /// The identity service answered, but not with something usable
    #[error("Identity service error ({status}): {message}")]
    Service {
        /// HTTP status returned by the service
        status: u16,
        /// What was wrong with the answer
        message: String,
    },

    /// Cookie store errors
    #[error("Storage error during {operation}: {details}")]
    Storage {
        /// The storage operation that failed
        operation: String,
        /// Detailed error description
        details: String,
    },

    /// Validation errors
    #[error("Validation failed for {field}: {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Error message describing the validation failure
        message: String,
        /// The invalid value that caused the validation to fail
        value: Option<String>,
    },

    /// Submodule registry errors
    #[error("Registry error for submodule '{name}': {message}")]
    Registry {
        /// Name of the submodule involved
        name: String,
        /// Error message
        message: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an identity service error
    pub fn service<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Service {
            status,
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(operation: S, details: S) -> Self {
        Self::Storage {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create a validation error
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            value: None,
        }
    }

    /// Create a validation error carrying the rejected value
    pub fn validation_with_value<S: Into<String>>(field: S, message: S, value: S) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
            value: Some(value.into()),
        }
    }

    /// Create a registry error
    pub fn registry<S: Into<String>>(name: S, message: S) -> Self {
        Self::Registry {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whether the failure happened on the wire rather than in our own data
    pub fn is_transport(&self) -> bool {
        match self {
            Error::Network { .. } => true,
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Json(..) => "json",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Io(..) => "io",
            Error::Config { .. } => "config",
            Error::Network { .. } => "network",
            Error::Service { .. } => "service",
            Error::Storage { .. } => "storage",
            Error::Validation { .. } => "validation",
            Error::Registry { .. } => "registry",
        }
    }
}
