//! Metrics collection and exposition.
//!
//! # Metrics
//! - `faucet_dispense_total` (counter): outcomes by network, outcome
//! - `faucet_rpc_duration_seconds` (histogram): RPC latency by network, method
//! - `faucet_tracked_claims` (gauge): claim records held in memory
//! - `faucet_rpc_health` (gauge): 1=reachable, 0=unreachable

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::blockchain::types::NetworkId;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_dispense(network: NetworkId, outcome: &'static str) {
    ::metrics::counter!(
        "faucet_dispense_total",
        "network" => network.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_rpc_latency(network: NetworkId, method: &'static str, started: Instant) {
    ::metrics::histogram!(
        "faucet_rpc_duration_seconds",
        "network" => network.as_str(),
        "method" => method
    )
    .record(started.elapsed().as_secs_f64());
}

pub fn record_tracked_claims(count: usize) {
    ::metrics::gauge!("faucet_tracked_claims").set(count as f64);
}

pub fn record_rpc_health(network: NetworkId, healthy: bool) {
    ::metrics::gauge!("faucet_rpc_health", "network" => network.as_str())
        .set(if healthy { 1.0 } else { 0.0 });
}
