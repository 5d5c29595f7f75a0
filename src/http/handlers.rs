//! Bot-facing API handlers.

use std::time::SystemTime;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::dispense::types::{DispensationOutcome, FailureKind};
use crate::http::request::ClaimRequest;
use crate::http::response::{ClaimResponse, NetworkInfo};
use crate::http::server::AppState;

/// `POST /api/v1/claims`
pub async fn create_claim(
    State(state): State<AppState>,
    Json(body): Json<ClaimRequest>,
) -> ClaimResponse {
    let destination = body.address.clone();
    let network_name = body.network.clone();

    let Some(request) = body.into_dispensation() else {
        tracing::warn!(network = %network_name, "Claim names an unknown network");
        let outcome = DispensationOutcome::Failed(FailureKind::UnknownNetwork);
        return ClaimResponse::new(&outcome, &state.amount, "", &destination);
    };

    // Run detached: a client timeout or disconnect must not cancel a claim
    // between submission and recording.
    let dispenser = state.dispenser.clone();
    let network = request.network;
    let task = tokio::spawn(async move { dispenser.dispense(&request, SystemTime::now()).await });
    let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(network = %network, error = %e, "Dispensation task failed");
            DispensationOutcome::Failed(FailureKind::SigningError)
        }
    };
    let symbol = state
        .dispenser
        .registry()
        .resolve(network)
        .map(|n| n.symbol.clone())
        .unwrap_or_default();

    ClaimResponse::new(&outcome, &state.amount, &symbol, &destination)
}

/// `GET /api/v1/networks`
pub async fn list_networks(State(state): State<AppState>) -> Json<Vec<NetworkInfo>> {
    Json(
        state
            .dispenser
            .registry()
            .networks()
            .map(NetworkInfo::from)
            .collect(),
    )
}

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
