//! Error taxonomy: fatal startup/configuration errors vs per-request computation errors.
//! Feature extraction has no error type; it cannot fail.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal at startup. The service must not accept traffic with any of these.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact {path}: {reason}")]
    Artifact { path: PathBuf, reason: String },

    #[error("{component} expects {actual} features, extractor produces {expected}")]
    DimensionMismatch {
        component: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{component} was trained on feature order {actual:?}, extractor produces {expected:?}")]
    FeatureOrder {
        component: &'static str,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("startup self-check failed: {0}")]
    SelfCheck(#[source] PipelineError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Failure while scaling or classifying a single vector. Surfaced as an internal
/// error, never replaced by a default label.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{stage} expects {expected} values, got {actual}")]
    Dimension {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("classifier returned unknown class {0}")]
    UnknownClass(i64),

    #[error("classifier backend error: {0}")]
    Backend(String),
}

/// HTTP listener failures.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}
