//! Testnet faucet (v1)
//!
//! Hands out a fixed amount of native test currency to chat users, at most
//! once per user and network per cooldown window.
//!
//! # Architecture Overview
//!
//! ```text
//!     Chat front-end
//!          │  POST /api/v1/claims
//!          ▼
//!     ┌─────────┐    ┌──────────────┐    ┌──────────────┐    ┌─────────────┐
//!     │  http   │───▶│   dispense   │───▶│   cooldown   │    │  blockchain │
//!     │ server  │    │ orchestrator │───▶│   tracker    │    │   issuer    │───▶ RPC
//!     └─────────┘    └──────┬───────┘    └──────────────┘    └─────────────┘
//!                           └──────────────────────────────────────▲
//!
//!     Cross-cutting: config, observability, lifecycle, admin
//! ```

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use faucet_dispenser::config::{load_config, Secrets};
use faucet_dispenser::cooldown::CooldownSweeper;
use faucet_dispenser::http::{AppState, HttpServer};
use faucet_dispenser::lifecycle::{build_dispenser, signals, Shutdown};
use faucet_dispenser::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "faucet-dispenser", version, about = "Testnet faucet service")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "FAUCET_CONFIG", default_value = "faucet.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "faucet-dispenser starting");

    tracing::info!(
        config = %args.config.display(),
        bind_address = %config.listener.bind_address,
        networks = config.networks.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let secrets = Secrets::from_env()?;

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let dispenser = build_dispenser(&config, &secrets).await?;

    let shutdown = Shutdown::new();
    let sweeper_rx = shutdown.subscribe();
    let server_rx = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown.clone());

    let sweeper = CooldownSweeper::new(
        dispenser.tracker().clone(),
        Duration::from_secs(config.dispense.prune_interval_secs),
    );
    let sweeper_handle = tokio::spawn(sweeper.run(sweeper_rx));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let state = AppState::new(dispenser, &config.dispense.amount, &secrets);
    let server = HttpServer::new(&config, state);
    let result = server.run(listener, server_rx).await;

    if !shutdown.is_triggered() {
        tracing::warn!("HTTP server exited without a shutdown request");
    }
    shutdown.trigger();
    let _ = sweeper_handle.await;

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}
