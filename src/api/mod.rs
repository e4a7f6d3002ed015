//! HTTP surface around the inference service: routing, request validation, CORS.
//! Input-shape validation happens here; the core only ever sees a `&str`.

mod error;
mod handlers;
mod server;

pub use error::ApiError;
pub use handlers::{health_handler, predict_handler, root_handler, PredictRequest};
pub use server::serve;

use crate::config::ServerConfig;
use crate::inference::InferenceService;
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use regex::Regex;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the full router: `/`, `/health`, `/api/predict`.
pub fn router(service: Arc<InferenceService>, server: &ServerConfig) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/predict", post(predict_handler))
        .with_state(service)
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

/// Credentials are allowed, so origins are matched explicitly instead of `*`.
pub fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let exact: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();
    let local = server
        .allow_local_origins
        .then(|| Regex::new(r"^https?://(localhost|127\.0\.0\.1)(:[0-9]+)?$").ok())
        .flatten();

    let allow = AllowOrigin::predicate(move |origin: &HeaderValue, _parts: &Parts| {
        if exact.iter().any(|o| o == origin) {
            return true;
        }
        match (&local, origin.to_str()) {
            (Some(re), Ok(origin)) => re.is_match(origin),
            _ => false,
        }
    });

    CorsLayer::new()
        .allow_origin(allow)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}
