use super::ApiError;
use crate::inference::{InferenceService, PredictionResult};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub url: String,
}

/// Handler for POST /api/predict
///
/// The only validation is the body shape: a missing or non-string `url` is a 422.
/// Any string is classified, including `{"url": ""}`, which returns 200 with a label.
pub async fn predict_handler(
    State(service): State<Arc<InferenceService>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictionResult>, ApiError> {
    let Json(request) = payload?;
    let result = service.predict(&request.url)?;
    debug!(
        url_len = request.url.len(),
        prediction = result.prediction.as_str(),
        "prediction served"
    );
    Ok(Json(result))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "healthy", "message": "Service is running" }))
}

/// Handler for GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "Phishing Detection API is running" }))
}
