//! Inference: extract → scale → classify over an immutable, startup-built context.

mod context;
mod service;

pub use context::InferenceContext;
pub use service::{InferenceService, Label, PredictionResult};
