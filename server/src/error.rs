//! Error types for startup and the upstream pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while resolving process configuration. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read credentials file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credentials file {path} is not valid JSON: {source}")]
    Credentials {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid port {value:?}")]
    InvalidPort { value: String },

    #[error("invalid upstream timeout {value:?} (expected milliseconds)")]
    InvalidTimeout { value: String },

    #[error("invalid upstream base url {value:?}: {source}")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("upstream base url {value:?} has no host")]
    MissingHost { value: String },
}

/// Failure building the shared upstream HTTP client.
#[derive(Debug, Error)]
#[error("failed to build upstream client: {0}")]
pub struct ClientError(#[from] pub reqwest::Error);

/// Failure kinds absorbed by the classifier. These are logged, never returned
/// to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("transport failure")]
    TransportFailure,
    #[error("transport timeout")]
    TransportTimeout,
    #[error("upstream auth failure")]
    UpstreamAuthFailure,
    #[error("upstream no match")]
    UpstreamNoMatch,
    #[error("upstream malformed payload")]
    UpstreamMalformedPayload,
    #[error("upstream unexpected status")]
    UpstreamUnexpectedStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kind_display() {
        assert_eq!(FailureKind::TransportTimeout.to_string(), "transport timeout");
        assert_eq!(
            FailureKind::UpstreamMalformedPayload.to_string(),
            "upstream malformed payload"
        );
    }
}
