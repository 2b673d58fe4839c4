//! Video generation worker binary.

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vgen_diffusion::DiffusionClient;
use vgen_worker::{QueueRuntime, RequestHandler, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("vgen=info".parse().unwrap())
        .add_directive("hyper=warn".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting vgen-worker");

    if let Err(e) = vgen_media::check_ffmpeg() {
        warn!("{e}; video export will fail until FFmpeg is installed");
    }

    // Load configuration
    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    // Initialize the generation capability once for the process lifetime
    let diffusion = match DiffusionClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to create diffusion client: {}", e);
            std::process::exit(1);
        }
    };

    match diffusion.health_check().await {
        Ok(true) => info!("Inference service is healthy"),
        Ok(false) => warn!("Inference service is not healthy yet; jobs may fail"),
        Err(e) => warn!("Inference service health probe failed: {}", e),
    }

    let handler = RequestHandler::new(diffusion);

    // Create runtime adapter
    let runtime = match QueueRuntime::new(config) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to create queue runtime adapter: {}", e);
            std::process::exit(1);
        }
    };

    // Serve jobs until shutdown
    if let Err(e) = runtime.serve(&handler).await {
        error!("Runtime error: {}", e);
        std::process::exit(1);
    }

    info!("Worker shutdown complete");
}
