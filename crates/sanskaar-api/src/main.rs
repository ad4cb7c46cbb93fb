//! Sanskaar API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p sanskaar-api
//! ```
//!
//! Configuration comes from the environment, with `.env` loaded if present.

use sanskaar_common::{init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Config first, so the log format can follow the environment
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_tracing(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Starting Sanskaar API Server"
    );

    if let Err(e) = sanskaar_api::run(config).await {
        error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}
