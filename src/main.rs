//! api-probe service entry point.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                 API-PROBE                     │
//!                     │                                               │
//!   Probe Request     │  ┌─────────┐   ┌──────────┐   ┌───────────┐  │
//!   ──────────────────┼─▶│  http   │──▶│ security │──▶│   probe   │  │
//!                     │  │ server  │   │ssrf+rate │   │ executor  │──┼──▶ Target
//!                     │  └─────────┘   └──────────┘   └───────────┘  │    Endpoint
//!                     │                                               │
//!                     │  ┌─────────────────────────────────────────┐ │
//!                     │  │          Cross-Cutting Concerns          │ │
//!                     │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                     │  │  │ config │ │observability│ │lifecycle│ │ │
//!                     │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                     │  └─────────────────────────────────────────┘ │
//!                     └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use api_probe::config::{loader::load_config, ProbeConfig};
use api_probe::http::HttpServer;
use api_probe::lifecycle::Shutdown;
use api_probe::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "api-probe")]
#[command(about = "SSRF-hardened outbound API endpoint tester", long_about = None)]
struct Args {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProbeConfig::default(),
    };

    logging::init_logging(&config.observability.log_filter);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        probe_timeout_secs = config.probe.timeout_secs,
        max_response_bytes = config.probe.max_response_bytes,
        rate_limit_enabled = config.rate_limit.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
