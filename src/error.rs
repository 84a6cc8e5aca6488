//! Typed failures surfaced by the metric engine.
//!
//! The engine never logs or retries; every condition below reaches the caller,
//! which decides whether to skip one author or abort the batch.

use thiserror::Error;

/// Result type alias using [`MetricsError`].
pub type Result<T> = std::result::Result<T, MetricsError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricsError {
    /// Input record could not be decoded (negative or non-numeric citations, bad shape).
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Author position outside `1..=n`, or an empty author list.
    #[error("invalid author position {position} for {n} author(s)")]
    InvalidPosition { position: usize, n: usize },

    /// hp-index family needs the citing-paper list of every publication.
    #[error("publication #{index} has no cited_by list")]
    MissingCitedBy { index: usize },

    /// Curve parameters that cannot produce a weighting curve.
    #[error("invalid curve parameters: {0}")]
    InvalidCurve(String),
}

impl From<serde_json::Error> for MetricsError {
    fn from(e: serde_json::Error) -> Self {
        MetricsError::InvalidRecord(e.to_string())
    }
}
