//! Semantic router configurator service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌───────────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http (request id, trace, limits)            │
//!                           │        │                                      │
//!                           │        ▼                                      │
//!                           │   handlers ──▶ configurator                   │
//!                           │                 ├─ generator ─┐               │
//!                           │                 ├─ templates ─┤ self-check    │
//!                           │                 └─ validator ◀┘               │
//!                           │                      └─ plugin ─▶ registry    │
//!     Client Response       │        │                                      │
//!     ◀─────────────────────┼── YAML document / JSON result                 │
//!                           │                                               │
//!                           │   config · observability · lifecycle          │
//!                           └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use router_configurator::config::{load_config, ServiceConfig};
use router_configurator::lifecycle::{signals::shutdown_signal, Shutdown};
use router_configurator::observability::{logging, metrics};
use router_configurator::HttpServer;

#[derive(Parser)]
#[command(name = "router-configurator")]
#[command(about = "Generate and validate semantic router configurations", long_about = None)]
struct Args {
    /// Service settings file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);

    tracing::info!("router-configurator v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    shutdown_signal().await;
    shutdown.trigger();
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
