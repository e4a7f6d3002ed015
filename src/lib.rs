//! Phishscan — URL phishing classifier behind a small HTTP API.
//!
//! Modular structure:
//! - [`features`] — Lexical URL feature extraction (fixed 10-feature order)
//! - [`model`] — Pre-fitted scaler and pre-trained classifier artifacts
//! - [`inference`] — Extract → scale → classify over an immutable context
//! - [`api`] — Axum routes, request validation, CORS
//! - [`config`] — JSON service configuration
//! - [`logging`] — Structured JSON logging
//! - [`healthcheck`] — Container health probe

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod healthcheck;
pub mod inference;
pub mod logging;
pub mod model;

pub use config::ServiceConfig;
pub use error::{ConfigError, PipelineError};
pub use features::{extract, FeatureVector};
pub use inference::{InferenceContext, InferenceService, Label, PredictionResult};
pub use logging::StructuredLogger;
