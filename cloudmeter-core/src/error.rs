//! Error types for the collection core.
//!
//! Every error here is fatal to the run: the orchestrator does not retry and
//! never returns a partial result map. The core itself never terminates the
//! process; errors propagate to the host, which decides what to do.

use thiserror::Error;

use crate::metric::MetricType;

#[derive(Debug, Error)]
pub enum CollectError {
    /// The external tool exited non-zero.
    #[error("`{command}` failed: {stderr}")]
    ExternalInvocation { command: String, stderr: String },

    /// The external tool could not be launched at all.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// No native metric name is configured for this resource type.
    #[error("metric `{metric}` is not supported for resource type `{resource_type}`")]
    UnsupportedMetric {
        resource_type: String,
        metric: MetricType,
    },

    /// The tool exited zero but its output did not have the expected shape.
    #[error("unexpected payload from `{command}`: {reason}")]
    MalformedResponse { command: String, reason: String },

    #[error("invalid time window: {0}")]
    InvalidWindow(String),

    #[error("invalid name filter: {0}")]
    InvalidFilter(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, CollectError>;
