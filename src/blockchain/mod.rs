//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! faucet.toml networks
//!     → registry.rs (identifier → endpoint + chain ID)
//!     → client.rs (RPC connection with timeouts and failover)
//!
//! DispensationRequest
//!     → address.rs (destination validation)
//!     → transaction.rs (nonce + gas price, build, sign, submit)
//!     → wallet.rs (custodial key, EIP-155 signing)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts

pub mod address;
pub mod client;
pub mod registry;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{BlockchainClient, ChainRpc};
pub use registry::{Network, NetworkRegistry, RegistryError};
pub use transaction::{TransactionIntent, TransactionIssuer, TransactionSender};
pub use types::{BlockchainError, BlockchainResult, ChainId, NetworkId};
pub use wallet::Wallet;
