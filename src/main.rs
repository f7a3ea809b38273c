//! Service entry point.
//!
//! Startup order: config, logging, metrics exporter, listener, server.
//! Fail fast: any startup error is fatal.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use console_availability::config::{load_config, ServiceConfig};
use console_availability::http::HttpServer;
use console_availability::lifecycle::{trigger_on_ctrl_c, Shutdown};
use console_availability::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "console-availability")]
#[command(about = "Console availability service with correlated metrics and traces", long_about = None)]
struct Cli {
    /// Path to a TOML config file; built-in defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        app = %config.observability.app_name,
        instance = %config.observability.instance_id,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(
                addr,
                &config.observability.app_name,
                &config.observability.instance_id,
            ),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    trigger_on_ctrl_c(shutdown.clone());

    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
