//! Core error types for tripflow-core.
//!
//! Every component catches its own failures and degrades gracefully; the
//! types here exist for the boundaries where an error is actually
//! reportable (configuration, the routing transport, an unrecoverable
//! planning run).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tripflow-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Routing transport errors
    #[error("Routing error: {0}")]
    Routing(#[from] RoutingError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Unrecoverable planning-run errors
    #[error("Planning error: {0}")]
    Planning(#[from] PlanningError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the routing provider transport.
///
/// These never cross the resolver boundary: any of them degrades the
/// affected segment to the heuristic estimate.
#[derive(Error, Debug)]
pub enum RoutingError {
    /// Network-level failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Routing provider returned status {status}")]
    Status { status: u16 },

    /// Provider answered but the payload was not usable
    #[error("Malformed routing response: {0}")]
    MalformedResponse(String),

    /// Provider base URL could not be parsed
    #[error("Invalid routing endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors for edits and model lookups.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Referenced day does not exist
    #[error("Unknown day: {0}")]
    UnknownDay(String),

    /// Referenced activity does not exist
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    /// A "HH:mm" time string could not be parsed
    #[error("Invalid time of day '{0}', expected HH:mm")]
    InvalidTimeOfDay(String),

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be greater than start ({start})")]
    InvalidTimeRange {
        start: chrono::DateTime<chrono::Utc>,
        end: chrono::DateTime<chrono::Utc>,
    },
}

/// Unrecoverable errors from a planning run.
#[derive(Error, Debug)]
pub enum PlanningError {
    /// A pipeline stage panicked or its task was lost
    #[error("Planning run failed internally: {0}")]
    Internal(String),

    /// The model could not be planned at all
    #[error("Itinerary cannot be planned: {0}")]
    InvalidModel(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
