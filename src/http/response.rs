//! Outcome to HTTP response mapping.
//!
//! | Outcome                         | Status |
//! |---------------------------------|--------|
//! | Sent                            | 200    |
//! | CooldownActive                  | 429    |
//! | InvalidAddress, UnknownNetwork  | 400    |
//! | RpcUnavailable                  | 503    |
//! | SigningError, SubmissionRejected| 502    |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::blockchain::registry::Network;
use crate::blockchain::types::NetworkId;
use crate::dispense::messages;
use crate::dispense::types::{DispensationOutcome, FailureKind};

/// Body of a claim response. `message` is ready to show to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimResponse {
    Sent { tx_hash: String, message: String },
    Cooldown { remaining_secs: u64, message: String },
    Failed { error: FailureKind, message: String },
}

impl ClaimResponse {
    pub fn new(outcome: &DispensationOutcome, amount: &str, symbol: &str, destination: &str) -> Self {
        let message = messages::render_outcome(outcome, amount, symbol, destination);
        match outcome {
            DispensationOutcome::Sent(hash) => ClaimResponse::Sent {
                tx_hash: hash.to_string(),
                message,
            },
            DispensationOutcome::CooldownActive(remaining) => ClaimResponse::Cooldown {
                remaining_secs: remaining.as_secs(),
                message,
            },
            DispensationOutcome::Failed(kind) => ClaimResponse::Failed {
                error: *kind,
                message,
            },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ClaimResponse::Sent { .. } => StatusCode::OK,
            ClaimResponse::Cooldown { .. } => StatusCode::TOO_MANY_REQUESTS,
            ClaimResponse::Failed { error, .. } => failure_status(*error),
        }
    }
}

impl IntoResponse for ClaimResponse {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

pub fn failure_status(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidAddress | FailureKind::UnknownNetwork => StatusCode::BAD_REQUEST,
        FailureKind::RpcUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        FailureKind::SigningError | FailureKind::SubmissionRejected => StatusCode::BAD_GATEWAY,
    }
}

/// One entry of `GET /api/v1/networks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInfo {
    pub id: NetworkId,
    pub name: String,
    pub symbol: String,
    pub chain_id: u64,
    /// Text asking the user for an address on this network.
    pub prompt: String,
}

impl From<&Network> for NetworkInfo {
    fn from(network: &Network) -> Self {
        Self {
            id: network.id,
            name: network.id.display_name().to_string(),
            symbol: network.symbol.clone(),
            chain_id: network.chain_id.0,
            prompt: messages::address_prompt(network.id),
        }
    }
}
