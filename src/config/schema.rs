//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the faucet.
//! All types derive Serde traits for deserialization from config files.
//! Secrets (custodial key, bot token, admin key) never appear here; they are
//! read from the environment at startup.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::NetworkId;

/// Root configuration for the faucet service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FaucetConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Custodial wallet settings.
    pub custody: CustodyConfig,

    /// Dispensation parameters (amount, gas, cooldown).
    pub dispense: DispenseConfig,

    /// Supported networks.
    pub networks: Vec<NetworkConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Custodial wallet configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct CustodyConfig {
    /// Address all dispensations are sent from. Must match the private key.
    pub address: String,
}

/// Dispensation parameters shared by every network.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DispenseConfig {
    /// Amount sent per claim, in native units (ether notation).
    pub amount: String,

    /// Gas limit for a plain value transfer.
    pub gas_limit: u64,

    /// Cooldown between successful claims per user and network, in seconds.
    pub cooldown_secs: u64,

    /// Interval for dropping expired claim records, in seconds.
    pub prune_interval_secs: u64,
}

impl Default for DispenseConfig {
    fn default() -> Self {
        Self {
            amount: "0.1".to_string(),
            gas_limit: 21_000,
            cooldown_secs: 24 * 60 * 60,
            prune_interval_secs: 600,
        }
    }
}

/// A single supported network.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Network identifier.
    pub id: NetworkId,

    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs.
    #[serde(default)]
    pub failover_urls: Vec<String>,

    /// Chain ID used for EIP-155 replay protection.
    pub chain_id: u64,

    /// Native token symbol shown to users.
    #[serde(default)]
    pub symbol: Option<String>,

    /// RPC request timeout in seconds.
    #[serde(default = "default_rpc_timeout")]
    pub rpc_timeout_secs: u64,
}

fn default_rpc_timeout() -> u64 {
    10
}

/// Timeout configuration for the inbound API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Admin endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin endpoints.
    pub enabled: bool,
}
