//! Wires a claim through the cooldown tracker and the transaction issuer.

use std::sync::Arc;
use std::time::SystemTime;

use crate::blockchain::address::parse_destination;
use crate::blockchain::registry::NetworkRegistry;
use crate::blockchain::transaction::TransactionSender;
use crate::cooldown::{CooldownTracker, Eligibility};
use crate::dispense::types::{DispensationOutcome, DispensationRequest, FailureKind};
use crate::observability::metrics;

/// Dispensation entry point shared by all inbound requests.
#[derive(Clone)]
pub struct Dispenser {
    registry: Arc<NetworkRegistry>,
    tracker: CooldownTracker,
    sender: Arc<dyn TransactionSender>,
}

impl std::fmt::Debug for Dispenser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispenser").finish_non_exhaustive()
    }
}

impl Dispenser {
    pub fn new(
        registry: Arc<NetworkRegistry>,
        tracker: CooldownTracker,
        sender: Arc<dyn TransactionSender>,
    ) -> Self {
        Self {
            registry,
            tracker,
            sender,
        }
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    pub fn tracker(&self) -> &CooldownTracker {
        &self.tracker
    }

    /// Handle one claim.
    ///
    /// A claim is recorded only when the transfer was accepted. No step is
    /// retried here; a failed request leaves the user free to ask again.
    pub async fn dispense(&self, request: &DispensationRequest, now: SystemTime) -> DispensationOutcome {
        let outcome = self.run(request, now).await;
        metrics::record_dispense(request.network, outcome.label());
        outcome
    }

    async fn run(&self, request: &DispensationRequest, now: SystemTime) -> DispensationOutcome {
        let network = match self.registry.resolve(request.network) {
            Ok(network) => network,
            Err(e) => {
                tracing::warn!(user = %request.user_id, error = %e, "Claim for unconfigured network");
                return DispensationOutcome::Failed(FailureKind::from(&e));
            }
        };

        if let Err(e) = parse_destination(&request.destination) {
            tracing::info!(user = %request.user_id, network = %network.id, error = %e, "Rejected destination");
            return DispensationOutcome::Failed(FailureKind::InvalidAddress);
        }

        // Held across the send so a second request for this key waits and
        // then sees the new record.
        let slot = self.tracker.lock(&request.user_id, network.id).await;

        if let Eligibility::NotEligible(remaining) = slot.check_eligible(now) {
            tracing::info!(
                user = %request.user_id,
                network = %network.id,
                remaining_secs = remaining.as_secs(),
                "Claim refused, cooldown active"
            );
            return DispensationOutcome::CooldownActive(remaining);
        }

        match self.sender.send(network, &request.destination).await {
            Ok(hash) => {
                slot.record(&request.destination, now);
                tracing::info!(
                    user = %request.user_id,
                    network = %network.id,
                    destination = %request.destination,
                    tx_hash = %hash,
                    "Dispensed"
                );
                DispensationOutcome::Sent(hash)
            }
            Err(e) => {
                let kind = FailureKind::from(&e);
                if kind.needs_operator() {
                    tracing::error!(user = %request.user_id, network = %network.id, error = %e, kind = kind.as_str(), "Dispensation failed, operator attention needed");
                } else {
                    tracing::warn!(user = %request.user_id, network = %network.id, error = %e, kind = kind.as_str(), "Dispensation failed");
                }
                DispensationOutcome::Failed(kind)
            }
        }
    }
}
