//! Admin endpoint handlers: service status and per-user claim lookup.
//!
//! Read-only views over the dispenser's registry and cooldown tracker.

use std::time::UNIX_EPOCH;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::blockchain::types::NetworkId;
use crate::http::response::NetworkInfo;
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub uptime_secs: u64,
    pub tracked_claims: usize,
    pub cooldown_secs: u64,
    pub networks: Vec<NetworkInfo>,
}

#[derive(Serialize)]
pub struct UserClaim {
    pub network: NetworkId,
    pub destination: String,
    /// Unix seconds of the last successful claim.
    pub claimed_at: u64,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let tracker = state.dispenser.tracker();
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        uptime_secs: state.started_at.elapsed().as_secs(),
        tracked_claims: tracker.len(),
        cooldown_secs: tracker.window().as_secs(),
        networks: state
            .dispenser
            .registry()
            .networks()
            .map(NetworkInfo::from)
            .collect(),
    })
}

/// Last claim per network for one user.
pub async fn get_user_claims(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<UserClaim>> {
    let tracker = state.dispenser.tracker();
    let claims = NetworkId::ALL
        .iter()
        .filter_map(|network| tracker.get(&user_id, *network))
        .map(|record| UserClaim {
            network: record.network,
            destination: record.destination,
            claimed_at: record
                .claimed_at
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
        })
        .collect();
    Json(claims)
}
