//! Startup orchestration.
//!
//! Builds the dispensation core from validated configuration and secrets.
//! Any error here is fatal: the process must not serve claims with a wrong
//! key or a half-built network set.

use std::sync::Arc;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::Address;
use thiserror::Error;

use crate::blockchain::{BlockchainClient, BlockchainError, NetworkRegistry, TransactionIssuer, Wallet};
use crate::config::{FaucetConfig, Secrets};
use crate::cooldown::CooldownTracker;
use crate::dispense::Dispenser;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid custody address '{0}'")]
    CustodyAddress(String),

    #[error("invalid dispense amount '{0}'")]
    Amount(String),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Assemble registry, wallet, issuer and tracker into a [`Dispenser`].
pub async fn build_dispenser(
    config: &FaucetConfig,
    secrets: &Secrets,
) -> Result<Dispenser, StartupError> {
    let custody: Address = config
        .custody
        .address
        .parse()
        .map_err(|_| StartupError::CustodyAddress(config.custody.address.clone()))?;
    let wallet = Wallet::from_private_key(&secrets.private_key)?;
    wallet.ensure_address(custody)?;

    let amount = parse_ether(&config.dispense.amount)
        .map_err(|_| StartupError::Amount(config.dispense.amount.clone()))?;

    let registry = Arc::new(NetworkRegistry::from_config(&config.networks));
    let mut issuer = TransactionIssuer::new(wallet, amount, config.dispense.gas_limit);

    for network in registry.networks() {
        let client = BlockchainClient::new(network.clone())?;

        // Unreachable or mismatched endpoints degrade to per-request failures.
        match client.verify_chain_id().await {
            Ok(()) => tracing::info!(
                network = %network.id,
                rpc_url = %network.rpc_url,
                chain_id = network.chain_id.0,
                "Network ready"
            ),
            Err(e) => tracing::warn!(
                network = %network.id,
                error = %e,
                "Network initialized but chain verification failed"
            ),
        }
        client.is_healthy().await;

        issuer = issuer.with_network(network.id, Arc::new(client));
    }

    let tracker = CooldownTracker::new(std::time::Duration::from_secs(config.dispense.cooldown_secs));

    tracing::info!(
        custody = %custody,
        amount = %config.dispense.amount,
        networks = registry.len(),
        cooldown_secs = config.dispense.cooldown_secs,
        "Dispensation core initialized"
    );

    Ok(Dispenser::new(registry, tracker, Arc::new(issuer)))
}
