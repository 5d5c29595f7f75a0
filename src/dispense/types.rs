//! Request and outcome types for a single dispensation.

use std::time::Duration;

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::blockchain::registry::RegistryError;
use crate::blockchain::types::{BlockchainError, NetworkId};

/// One inbound claim, as delivered by the chat front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispensationRequest {
    pub user_id: String,
    pub network: NetworkId,
    /// Free text as typed by the user; validated before use.
    pub destination: String,
}

/// Why a dispensation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network not configured.
    UnknownNetwork,
    /// Destination is not a valid address.
    InvalidAddress,
    /// Endpoint unreachable, timed out or answered garbage.
    RpcUnavailable,
    /// The custodial key could not sign the transfer.
    SigningError,
    /// The endpoint refused the signed transfer.
    SubmissionRejected,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnknownNetwork => "unknown_network",
            FailureKind::InvalidAddress => "invalid_address",
            FailureKind::RpcUnavailable => "rpc_unavailable",
            FailureKind::SigningError => "signing_error",
            FailureKind::SubmissionRejected => "submission_rejected",
        }
    }

    /// Transient; the same request may succeed if repeated.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureKind::RpcUnavailable)
    }

    /// Points at an operator or configuration defect.
    pub fn needs_operator(&self) -> bool {
        matches!(self, FailureKind::SigningError)
    }
}

impl From<&BlockchainError> for FailureKind {
    fn from(err: &BlockchainError) -> Self {
        match err {
            BlockchainError::InvalidAddress(_) => FailureKind::InvalidAddress,
            BlockchainError::Rpc(_) | BlockchainError::Timeout(_) => FailureKind::RpcUnavailable,
            BlockchainError::Rejected(_) => FailureKind::SubmissionRejected,
            // Wrong key or wrong endpoint for the configured chain: both need an operator.
            BlockchainError::Wallet(_) | BlockchainError::ChainMismatch { .. } => {
                FailureKind::SigningError
            }
            BlockchainError::NotAvailable(_) => FailureKind::UnknownNetwork,
        }
    }
}

impl From<&RegistryError> for FailureKind {
    fn from(err: &RegistryError) -> Self {
        match err {
            RegistryError::UnknownNetwork(_) => FailureKind::UnknownNetwork,
        }
    }
}

/// What happened to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispensationOutcome {
    /// Endpoint accepted the transfer; not necessarily mined.
    Sent(TxHash),
    /// User must wait this long before claiming on this network again.
    CooldownActive(Duration),
    Failed(FailureKind),
}

impl DispensationOutcome {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            DispensationOutcome::Sent(_) => "sent",
            DispensationOutcome::CooldownActive(_) => "cooldown",
            DispensationOutcome::Failed(kind) => kind.as_str(),
        }
    }
}
