//! Inbound request bodies.
//!
//! The chat front-end posts one claim per user message. The network name is
//! kept as free text here so an unrecognized name becomes a normal
//! `unknown_network` outcome instead of a deserialization error.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::NetworkId;
use crate::dispense::types::DispensationRequest;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    /// Opaque chat-platform user identifier.
    pub user_id: String,
    pub network: String,
    /// Destination as typed by the user.
    pub address: String,
}

impl ClaimRequest {
    /// Resolve the network name; `None` if it names no known network.
    pub fn into_dispensation(self) -> Option<DispensationRequest> {
        let network = self.network.parse::<NetworkId>().ok()?;
        Some(DispensationRequest {
            user_id: self.user_id,
            network,
            destination: self.address,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_dispensation() {
        let request = ClaimRequest {
            user_id: "42".to_string(),
            network: "Sepolia".to_string(),
            address: "0xabc".to_string(),
        };
        let dispensation = request.into_dispensation().unwrap();
        assert_eq!(dispensation.network, NetworkId::Sepolia);
        assert_eq!(dispensation.destination, "0xabc");
    }

    #[test]
    fn test_unknown_network_name() {
        let request = ClaimRequest {
            user_id: "42".to_string(),
            network: "solana".to_string(),
            address: "0xabc".to_string(),
        };
        assert!(request.into_dispensation().is_none());
    }
}
