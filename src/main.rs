//! Phishscan entrypoint: load config, load and self-check artifacts, then serve.
//! Nothing is bound until the inference context is ready; a bad artifact exits non-zero.

use phishscan::{
    api,
    config::ServiceConfig,
    healthcheck::healthcheck_with_port,
    inference::{InferenceContext, InferenceService},
    logging::StructuredLogger,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut args = std::env::args().skip(1);
    let config = ServiceConfig::from_env()?;

    if args.next().as_deref() == Some("healthcheck") {
        let port = match args.next() {
            Some(p) => p.parse()?,
            None => config.server.port,
        };
        if let Err(e) = healthcheck_with_port(port).await {
            eprintln!("healthcheck failed: {e}");
            std::process::exit(1);
        }
        return Ok(());
    }

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(
        scaler = %config.model.scaler_path.display(),
        model = %config.model.model_path.display(),
        "phishscan starting"
    );

    let context = match InferenceContext::load(&config.model) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!(error = %e, "inference context failed to load; not serving");
            return Err(e.into());
        }
    };
    let service = Arc::new(InferenceService::new(context));

    let app = api::router(service, &config.server);
    api::serve(app, &config.server).await?;
    Ok(())
}
