//! Load driver entry point.
//!
//! Issues a sustained stream of availability queries across the console
//! set, substituting fallbacks on failure, until the schedules complete or
//! Ctrl+C arrives.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use console_availability::domain::Console;
use console_availability::driver::{DriverConfig, LoadDriver};
use console_availability::lifecycle::{trigger_on_ctrl_c, Shutdown};
use console_availability::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "load-driver")]
#[command(about = "Sustained availability query load against the console service", long_about = None)]
struct Cli {
    /// Base URL of the availability service
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Consoles to query, in schedule order
    #[arg(short, long, value_delimiter = ',', default_value = "ps5,xbox,switch,wii")]
    consoles: Vec<String>,

    /// Milliseconds between issues within one console's schedule
    #[arg(short, long, default_value_t = 500)]
    interval_ms: u64,

    /// Maximum outstanding requests per console
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// Requests to issue per console; omit to run until Ctrl+C
    #[arg(long)]
    count: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Expose driver metrics for Prometheus scrape on this address
    #[arg(long)]
    metrics_address: Option<SocketAddr>,

    /// Logical application name; must match the service's so both sides'
    /// telemetry groups together
    #[arg(long, default_value = "console-availability")]
    app_name: String,

    /// Per-process source identifier
    #[arg(long, default_value = "load-driver")]
    instance_id: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init("info");

    let consoles = cli
        .consoles
        .iter()
        .map(|raw| {
            Console::from_canonical(raw).ok_or_else(|| {
                format!(
                    "unknown console {:?} (known: {})",
                    raw,
                    Console::ALL.map(|c| c.as_str()).join(", ")
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(addr) = cli.metrics_address {
        metrics::init_metrics(addr, &cli.app_name, &cli.instance_id);
    }

    let driver = LoadDriver::new(DriverConfig {
        base_url: cli.url,
        consoles,
        interval: Duration::from_millis(cli.interval_ms),
        per_console_concurrency: cli.concurrency,
        iterations: cli.count,
        request_timeout: Duration::from_millis(cli.timeout_ms),
    })?;

    let shutdown = Arc::new(Shutdown::new());
    trigger_on_ctrl_c(shutdown.clone());

    let summary = driver.run(&shutdown).await;
    tracing::info!(
        total = summary.total,
        fallbacks = summary.fallbacks,
        "Load driver finished"
    );

    Ok(())
}
