//! Custodial wallet and transaction signing.
//!
//! # Security
//! - The private key arrives from the environment via [`crate::config::Secrets`]
//! - Keys are never logged or serialized

use alloy::eips::eip2718::Encodable2718;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// A signed transaction ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    /// EIP-2718 encoded bytes.
    pub raw: Bytes,
    /// Hash the network will report for this transaction.
    pub hash: TxHash,
}

/// The single custodial key all dispensations are signed with.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
    inner: EthereumWallet,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex
            .trim()
            .strip_prefix("0x")
            .unwrap_or(private_key_hex.trim());

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Custodial wallet initialized");

        Ok(Self {
            inner: EthereumWallet::from(signer.clone()),
            signer,
        })
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Fail unless this key controls `expected`.
    pub fn ensure_address(&self, expected: Address) -> BlockchainResult<()> {
        if self.address() != expected {
            return Err(BlockchainError::Wallet(format!(
                "Private key controls {}, but custody address is {}",
                self.address(),
                expected
            )));
        }
        Ok(())
    }

    /// Sign a fully populated transaction request.
    ///
    /// Fails if the request is missing a field the signer needs.
    pub async fn sign_transaction(
        &self,
        request: TransactionRequest,
    ) -> BlockchainResult<SignedTransaction> {
        let envelope = request
            .build(&self.inner)
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Signing failed: {}", e)))?;

        Ok(SignedTransaction {
            hash: *envelope.tx_hash(),
            raw: Bytes::from(envelope.encoded_2718()),
        })
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address())
            .finish()
    }
}
