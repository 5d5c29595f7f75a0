//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics. Every problem is
//! collected so an operator sees the full list in one startup attempt.

use std::collections::HashSet;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::FaucetConfig;

/// Minimum gas for a plain value transfer.
pub const MIN_TRANSFER_GAS: u64 = 21_000;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no networks configured")]
    NoNetworks,

    #[error("network {0} is configured more than once")]
    DuplicateNetwork(String),

    #[error("network {0}: chain_id must be positive")]
    ZeroChainId(String),

    #[error("network {network}: invalid URL '{url}'")]
    InvalidUrl { network: String, url: String },

    #[error("network {0}: rpc_timeout_secs must be positive")]
    ZeroRpcTimeout(String),

    #[error("custody.address '{0}' is not a valid address")]
    InvalidCustodyAddress(String),

    #[error("dispense.amount '{0}' is not a positive ether amount")]
    InvalidAmount(String),

    #[error("dispense.gas_limit {0} is below the transfer minimum of {min}", min = MIN_TRANSFER_GAS)]
    GasLimitTooLow(u64),

    #[error("dispense.cooldown_secs must be positive")]
    ZeroCooldown,

    #[error("dispense.prune_interval_secs must be positive")]
    ZeroPruneInterval,

    #[error("timeouts.request_secs must be positive")]
    ZeroRequestTimeout,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &FaucetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.networks.is_empty() {
        errors.push(ValidationError::NoNetworks);
    }

    let mut seen = HashSet::new();
    for network in &config.networks {
        let name = network.id.to_string();
        if !seen.insert(network.id) {
            errors.push(ValidationError::DuplicateNetwork(name.clone()));
        }
        if network.chain_id == 0 {
            errors.push(ValidationError::ZeroChainId(name.clone()));
        }
        if network.rpc_timeout_secs == 0 {
            errors.push(ValidationError::ZeroRpcTimeout(name.clone()));
        }
        for url in std::iter::once(&network.rpc_url).chain(&network.failover_urls) {
            if url.parse::<url::Url>().is_err() {
                errors.push(ValidationError::InvalidUrl {
                    network: name.clone(),
                    url: url.clone(),
                });
            }
        }
    }

    if config.custody.address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidCustodyAddress(
            config.custody.address.clone(),
        ));
    }

    match parse_ether(&config.dispense.amount) {
        Ok(amount) if !amount.is_zero() => {}
        _ => errors.push(ValidationError::InvalidAmount(config.dispense.amount.clone())),
    }

    if config.dispense.gas_limit < MIN_TRANSFER_GAS {
        errors.push(ValidationError::GasLimitTooLow(config.dispense.gas_limit));
    }
    if config.dispense.cooldown_secs == 0 {
        errors.push(ValidationError::ZeroCooldown);
    }
    if config.dispense.prune_interval_secs == 0 {
        errors.push(ValidationError::ZeroPruneInterval);
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
