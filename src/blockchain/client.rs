//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to a network's JSON-RPC endpoint (primary + failovers)
//! - Read the custodial nonce and the current gas price
//! - Submit signed raw transactions
//! - Handle timeouts and network errors gracefully

use std::future::Future;
use std::time::{Duration, Instant};

use alloy::primitives::{keccak256, Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::transports::TransportResult;
use async_trait::async_trait;
use tokio::time::timeout;

use crate::blockchain::registry::Network;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainId};
use crate::observability::metrics;

/// The three RPC calls a dispensation needs.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Transaction count of `address`, including pending transactions.
    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64>;

    /// Current gas price in wei.
    async fn gas_price(&self) -> BlockchainResult<u128>;

    /// Submit an EIP-2718 encoded signed transaction.
    async fn submit_raw(&self, raw: Bytes) -> BlockchainResult<TxHash>;
}

/// Blockchain RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    /// Network this client talks to.
    network: Network,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a client for a registry entry.
    ///
    /// The endpoint is not contacted here; see [`BlockchainClient::verify_chain_id`].
    pub fn new(network: Network) -> BlockchainResult<Self> {
        let timeout_duration = Duration::from_secs(network.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = network.rpc_url.parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", network.rpc_url, e))
        })?;
        providers.push(ProviderBuilder::new().connect_http(primary_url).erased());

        for url_str in &network.failover_urls {
            match url_str.parse::<url::Url>() {
                Ok(url) => providers.push(ProviderBuilder::new().connect_http(url).erased()),
                Err(_) => {
                    tracing::warn!(network = %network.id, url = %url_str, "Ignoring invalid failover RPC URL")
                }
            }
        }

        Ok(Self {
            providers,
            network,
            timeout_duration,
        })
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        if chain_id != self.network.chain_id {
            return Err(BlockchainError::ChainMismatch {
                expected: self.network.chain_id.0,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.call("eth_chainId", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.call("eth_blockNumber", |p| async move { p.get_block_number().await })
            .await
    }

    /// Check if the endpoint is reachable.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.get_block_number().await.is_ok();
        metrics::record_rpc_health(self.network.id, healthy);
        healthy
    }

    /// Get the network this client serves.
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Run a read call against each provider in turn until one answers.
    async fn call<T, F, Fut>(&self, method: &'static str, f: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        let mut timed_out = false;
        for (i, provider) in self.providers.iter().enumerate() {
            let started = Instant::now();
            let result = timeout(self.timeout_duration, f(provider.clone())).await;
            metrics::record_rpc_latency(self.network.id, method, started);
            match result {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => {
                    tracing::warn!(network = %self.network.id, method, provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    timed_out = true;
                    tracing::warn!(network = %self.network.id, method, provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        if timed_out {
            Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
        } else {
            Err(BlockchainError::Rpc(format!("All RPC providers failed for {}", method)))
        }
    }
}

#[async_trait]
impl ChainRpc for BlockchainClient {
    async fn transaction_count(&self, address: Address) -> BlockchainResult<u64> {
        self.call("eth_getTransactionCount", move |p| async move {
            p.get_transaction_count(address).pending().await
        })
        .await
    }

    async fn gas_price(&self) -> BlockchainResult<u128> {
        self.call("eth_gasPrice", |p| async move { p.get_gas_price().await })
            .await
    }

    async fn submit_raw(&self, raw: Bytes) -> BlockchainResult<TxHash> {
        let local_hash = keccak256(&raw);
        // Set once an attempt may have reached a node without us seeing the answer.
        let mut maybe_delivered = false;

        for (i, provider) in self.providers.iter().enumerate() {
            let started = Instant::now();
            let result = timeout(self.timeout_duration, provider.send_raw_transaction(&raw)).await;
            metrics::record_rpc_latency(self.network.id, "eth_sendRawTransaction", started);
            match result {
                Ok(Ok(pending)) => return Ok(*pending.tx_hash()),
                Ok(Err(e)) if e.as_error_resp().is_some() => {
                    let reason = e
                        .as_error_resp()
                        .map(|payload| payload.message.to_string())
                        .unwrap_or_default();
                    // An earlier attempt got through; this node has seen it.
                    if maybe_delivered && is_duplicate_submission(&reason) {
                        tracing::warn!(
                            network = %self.network.id,
                            provider_idx = i,
                            tx_hash = %local_hash,
                            reason = %reason,
                            "Earlier submission landed, treating as accepted"
                        );
                        return Ok(local_hash);
                    }
                    // The node answered and said no; another node would say the same.
                    return Err(BlockchainError::Rejected(reason));
                }
                Ok(Err(e)) => {
                    maybe_delivered = true;
                    tracing::warn!(network = %self.network.id, provider_idx = i, error = %e, "Submission failed, trying next provider");
                }
                Err(_) => {
                    maybe_delivered = true;
                    tracing::warn!(network = %self.network.id, provider_idx = i, "Submission timeout, trying next provider");
                }
            }
        }
        // Outcome unknown; surfaced as unavailable so the claim is not recorded
        // and the next send re-reads the pending nonce.
        Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
    }
}

/// Node error texts meaning the exact transaction, or one with its nonce,
/// is already in the pool or on chain.
fn is_duplicate_submission(reason: &str) -> bool {
    let reason = reason.to_ascii_lowercase();
    ["already known", "known transaction", "already imported", "nonce too low"]
        .iter()
        .any(|needle| reason.contains(needle))
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("network", &self.network.id)
            .field("rpc_url", &self.network.rpc_url)
            .field("chain_id", &self.network.chain_id)
            .field("timeout_secs", &self.network.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::types::NetworkId;

    fn test_network() -> Network {
        Network {
            id: NetworkId::Sepolia,
            // Nothing listens on the discard port.
            rpc_url: "http://127.0.0.1:9".to_string(),
            failover_urls: Vec::new(),
            chain_id: ChainId(11155111),
            symbol: "ETH".to_string(),
            rpc_timeout_secs: 2,
        }
    }

    #[test]
    fn test_client_creation() {
        // Creation must not touch the network
        assert!(BlockchainClient::new(test_network()).is_ok());
    }

    #[test]
    fn test_invalid_primary_url() {
        let mut network = test_network();
        network.rpc_url = "not a url".to_string();
        let err = BlockchainClient::new(network).unwrap_err();
        assert!(err.to_string().contains("Invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_rpc_failover() {
        let mut network = test_network();
        network.failover_urls.push("http://127.0.0.1:7".to_string());
        network.failover_urls.push("::bad".to_string());

        let client = BlockchainClient::new(network).unwrap();
        assert_eq!(client.providers.len(), 2);

        // Both endpoints are unreachable
        let result = client.gas_price().await;
        assert!(matches!(
            result,
            Err(BlockchainError::Rpc(_)) | Err(BlockchainError::Timeout(_))
        ));
    }

    #[test]
    fn test_duplicate_submission_texts() {
        assert!(is_duplicate_submission("already known"));
        assert!(is_duplicate_submission("Known transaction: 0xabc"));
        assert!(is_duplicate_submission("nonce too low: next nonce 5, tx nonce 4"));
        assert!(!is_duplicate_submission("insufficient funds for gas * price + value"));
        assert!(!is_duplicate_submission("replacement transaction underpriced"));
    }

    #[tokio::test]
    async fn test_unreachable_submit_is_not_a_rejection() {
        let mut network = test_network();
        network.failover_urls.push("http://127.0.0.1:7".to_string());
        let client = BlockchainClient::new(network).unwrap();

        let err = client.submit_raw(Bytes::from_static(&[0x01])).await.unwrap_err();
        assert!(matches!(err, BlockchainError::Timeout(_)));
    }
}
