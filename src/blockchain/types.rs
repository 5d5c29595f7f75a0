//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkId {
    #[serde(alias = "BERA")]
    Bera,
    #[serde(alias = "SEPOLIA")]
    Sepolia,
    #[serde(alias = "HOLESKY")]
    Holesky,
}

impl NetworkId {
    pub const ALL: [NetworkId; 3] = [NetworkId::Bera, NetworkId::Sepolia, NetworkId::Holesky];

    /// Upper-case identifier used in logs and chat.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Bera => "BERA",
            NetworkId::Sepolia => "SEPOLIA",
            NetworkId::Holesky => "HOLESKY",
        }
    }

    /// Human-readable name, e.g. "Sepolia".
    pub fn display_name(&self) -> &'static str {
        match self {
            NetworkId::Bera => "BERA",
            NetworkId::Sepolia => "Sepolia",
            NetworkId::Holesky => "Holesky",
        }
    }

    /// Native token symbol when the config does not override it.
    pub fn default_symbol(&self) -> &'static str {
        match self {
            NetworkId::Bera => "BERA",
            NetworkId::Sepolia | NetworkId::Holesky => "ETH",
        }
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inbound text did not name a supported network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network '{0}'")]
pub struct UnknownNetworkId(pub String);

impl FromStr for NetworkId {
    type Err = UnknownNetworkId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        NetworkId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownNetworkId(trimmed.to_string()))
    }
}

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Clone, Error)]
pub enum BlockchainError {
    /// Destination is not a well-formed address.
    #[error("Invalid address '{0}'")]
    InvalidAddress(String),

    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// The endpoint refused a submitted transaction.
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// Invalid private key format or signing failure.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// No client configured for the requested network.
    #[error("Blockchain not available: {0}")]
    NotAvailable(String),
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_network_id_parsing() {
        assert_eq!("BERA".parse::<NetworkId>().unwrap(), NetworkId::Bera);
        assert_eq!(" sepolia ".parse::<NetworkId>().unwrap(), NetworkId::Sepolia);
        assert_eq!("Holesky".parse::<NetworkId>().unwrap(), NetworkId::Holesky);
        assert_eq!(
            "goerli".parse::<NetworkId>().unwrap_err(),
            UnknownNetworkId("goerli".to_string())
        );
    }

    #[test]
    fn test_network_id_serde() {
        let id: NetworkId = serde_json::from_str("\"SEPOLIA\"").unwrap();
        assert_eq!(id, NetworkId::Sepolia);
        assert_eq!(serde_json::to_string(&NetworkId::Bera).unwrap(), "\"bera\"");
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::ChainMismatch {
            expected: 1,
            actual: 5,
        };
        assert!(err.to_string().contains("expected 1"));
    }
}
