use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures reported by a page renderer.
///
/// Every variant is recoverable from the poll loop's point of view: the
/// current strategy or cycle is abandoned and the next tick tries again.
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("timed out after {timeout_ms}ms: {operation}")]
    Timeout {
        operation: &'static str,
        timeout_ms: u64,
    },

    #[error("network error: {0}")]
    Network(String),

    #[error("no element matched selector '{selector}'")]
    NotFound { selector: String },

    #[error("renderer protocol error: {0}")]
    Protocol(String),
}

/// Why a cycle produced no price.
#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    #[error("page load failed: {0}")]
    PageLoad(#[source] RenderError),

    #[error("no plausible price found after {strategies} strategies")]
    NotFound { strategies: usize },

    #[error("extracted value rejected: {0}")]
    Rejected(#[from] DomainError),
}

/// Delivery failures from a publisher backend.
#[derive(Error, Debug, Clone)]
pub enum PublishError {
    #[error("invalid destination '{destination}': {reason}")]
    InvalidDestination { destination: String, reason: String },

    #[error("delivery failed: {0}")]
    Delivery(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Publish(#[from] PublishError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),
}

pub type Result<T> = std::result::Result<T, Error>;
