//! Error taxonomy for the benchmark client.
//!
//! Two kinds of failure are modelled as Rust errors:
//!
//! - [`ConfigurationError`]: a scenario or benchmark setting is inconsistent
//!   (for example an override sequence whose length is not `num_locations - 1`).
//! - [`ClientError`]: the HTTP exchange itself failed (connection refused,
//!   timeout exceeded) or produced a body that is not JSON.
//!
//! A service-level failure (a JSON body carrying `"error"` instead of
//! `"response"`) is deliberately *not* an error: the client returns it as data
//! and the runner classifies the iteration as failed.

use thiserror::Error;

/// Inconsistent scenario or benchmark configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("scenario name must not be empty")]
    EmptyName,

    #[error("scenario '{scenario}': {field} must be positive")]
    NotPositive {
        scenario: String,
        field: &'static str,
    },

    #[error("scenario '{scenario}': num_locations must be at least 2 (depot plus one task), got {num_locations}")]
    TooFewLocations {
        scenario: String,
        num_locations: usize,
    },

    #[error("scenario '{scenario}': {field} has {actual} entries, expected {expected} (num_locations - 1)")]
    LengthMismatch {
        scenario: String,
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("scenario '{scenario}': time window {index} has start {start} after end {end}")]
    InvertedTimeWindow {
        scenario: String,
        index: usize,
        start: u32,
        end: u32,
    },

    #[error("duplicate scenario name '{0}'")]
    DuplicateScenario(String),

    #[error("{0} must be at least 1")]
    ZeroSetting(&'static str),

    #[error("{setting} {value} is too large (maximum {max})")]
    TooLarge {
        setting: &'static str,
        value: usize,
        max: usize,
    },
}

/// Failure of an HTTP exchange with the optimization service.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection failure, timeout, or client construction failure. Never retried.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered, but the body could not be decoded as JSON.
    #[error("service returned a non-JSON body (HTTP {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Whether the failure was the per-request timeout firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Network(e) if e.is_timeout())
    }
}
