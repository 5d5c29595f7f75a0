//! Transaction building, signing, and submission.
//!
//! # Responsibilities
//! - Validate the destination address
//! - Read the live nonce and gas price for the custodial address
//! - Sign a plain value transfer bound to the network's chain ID
//! - Submit it and report the hash (no confirmation polling)
//!
//! Sends on one network are serialized so two requests never read the same
//! nonce. The nonce is always the endpoint's live pending count; nothing is
//! remembered between sends, so a transaction dropped from the mempool
//! frees its nonce for the next send. Different networks proceed
//! independently.

use std::collections::HashMap;
use std::sync::Arc;

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::blockchain::address::parse_destination;
use crate::blockchain::client::ChainRpc;
use crate::blockchain::registry::Network;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId, NetworkId};
use crate::blockchain::wallet::Wallet;

/// A fully specified native transfer, before signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionIntent {
    pub from: Address,
    pub to: Address,
    pub value: U256,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub nonce: u64,
    pub chain_id: ChainId,
}

impl TransactionIntent {
    /// Legacy (gas price) transaction request for the signer.
    pub fn into_request(self) -> TransactionRequest {
        TransactionRequest::default()
            .with_from(self.from)
            .with_to(self.to)
            .with_value(self.value)
            .with_nonce(self.nonce)
            .with_gas_price(self.gas_price)
            .with_gas_limit(self.gas_limit)
            .with_chain_id(self.chain_id.0)
    }
}

/// Sends the fixed dispensation amount to a destination.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    async fn send(&self, network: &Network, destination: &str) -> BlockchainResult<TxHash>;
}

/// Per-network RPC handle plus the submission lock.
struct Lane {
    rpc: Arc<dyn ChainRpc>,
    /// Held from the nonce read until the submission returns.
    submit: Mutex<()>,
}

/// Issues transfers from the custodial wallet.
pub struct TransactionIssuer {
    wallet: Wallet,
    amount: U256,
    gas_limit: u64,
    lanes: HashMap<NetworkId, Lane>,
}

impl TransactionIssuer {
    /// Create an issuer with no networks attached.
    pub fn new(wallet: Wallet, amount: U256, gas_limit: u64) -> Self {
        Self {
            wallet,
            amount,
            gas_limit,
            lanes: HashMap::new(),
        }
    }

    /// Attach the RPC handle used for `network`.
    pub fn with_network(mut self, network: NetworkId, rpc: Arc<dyn ChainRpc>) -> Self {
        self.lanes.insert(
            network,
            Lane {
                rpc,
                submit: Mutex::new(()),
            },
        );
        self
    }

    /// Custodial address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Amount sent per claim, in wei.
    pub fn amount(&self) -> U256 {
        self.amount
    }
}

#[async_trait]
impl TransactionSender for TransactionIssuer {
    async fn send(&self, network: &Network, destination: &str) -> BlockchainResult<TxHash> {
        let to = parse_destination(destination)?;
        let lane = self
            .lanes
            .get(&network.id)
            .ok_or_else(|| BlockchainError::NotAvailable(network.id.to_string()))?;
        let from = self.wallet.address();

        let _submit = lane.submit.lock().await;

        let nonce = lane.rpc.transaction_count(from).await?;
        let gas_price = lane.rpc.gas_price().await?;

        let intent = TransactionIntent {
            from,
            to,
            value: self.amount,
            gas_limit: self.gas_limit,
            gas_price,
            nonce,
            chain_id: network.chain_id,
        };
        tracing::debug!(
            network = %network.id,
            to = %to,
            nonce,
            gas_price,
            chain_id = network.chain_id.0,
            "Built transfer"
        );

        let signed = self.wallet.sign_transaction(intent.into_request()).await?;

        let hash = lane.rpc.submit_raw(signed.raw).await?;
        if hash != signed.hash {
            tracing::warn!(network = %network.id, local = %signed.hash, remote = %hash, "Endpoint reported a different transaction hash");
        }
        tracing::info!(network = %network.id, tx_hash = %hash, to = %to, nonce, "Transaction sent");
        Ok(hash)
    }
}
