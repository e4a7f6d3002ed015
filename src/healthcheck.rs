//! Probe for container healthchecks (`phishscan healthcheck [port]`), for images without curl.

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HealthcheckError {
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("health endpoint returned status: {0}")]
    Status(reqwest::StatusCode),
}

/// GET http://127.0.0.1:{port}/health with a 2s timeout; any 2xx passes.
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .map_err(HealthcheckError::Client)?;

    let url = format!("http://127.0.0.1:{port}/health");
    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(HealthcheckError::Request)?;

    if resp.status().is_success() {
        Ok(())
    } else {
        Err(HealthcheckError::Status(resp.status()))
    }
}
