//! Per-user, per-network claim records and the eligibility decision.

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use dashmap::DashMap;
use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::blockchain::types::NetworkId;
use crate::observability::metrics;

/// Default cooldown between successful claims.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(24 * 60 * 60);

/// Store key: one record per user and network.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClaimKey {
    pub user: String,
    pub network: NetworkId,
}

impl ClaimKey {
    pub fn new(user: impl Into<String>, network: NetworkId) -> Self {
        Self {
            user: user.into(),
            network,
        }
    }
}

/// The last successful dispensation for a key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimRecord {
    pub user: String,
    pub network: NetworkId,
    pub destination: String,
    pub claimed_at: SystemTime,
}

/// Result of an eligibility check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    /// Time left until the next claim is allowed.
    NotEligible(Duration),
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// In-memory cooldown store.
///
/// Records live in one map; a second map holds a per-key async lock that
/// callers take through [`CooldownTracker::lock`] to make check-then-record
/// atomic for that key without blocking other keys.
#[derive(Clone)]
pub struct CooldownTracker {
    records: Arc<DashMap<ClaimKey, ClaimRecord>>,
    locks: Arc<DashMap<ClaimKey, Arc<Mutex<()>>>>,
    window: Duration,
}

impl CooldownTracker {
    pub fn new(window: Duration) -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            locks: Arc::new(DashMap::new()),
            window,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Take exclusive access to one (user, network) key.
    ///
    /// Waits while another flow for the same key holds it.
    pub async fn lock(&self, user: &str, network: NetworkId) -> ClaimSlot {
        let key = ClaimKey::new(user, network);
        // Clone out so the shard lock is released before awaiting.
        let lock = self.locks.entry(key.clone()).or_default().clone();
        let guard = lock.lock_owned().await;
        ClaimSlot {
            tracker: self.clone(),
            key,
            _guard: guard,
        }
    }

    /// Decide whether `user` may claim on `network` at `now`.
    pub fn check_eligible(&self, user: &str, network: NetworkId, now: SystemTime) -> Eligibility {
        let key = ClaimKey::new(user, network);
        eligibility(self.records.get(&key).as_deref(), self.window, now)
    }

    /// Insert or overwrite the record for (user, network).
    pub fn record_claim(&self, user: &str, network: NetworkId, destination: &str, now: SystemTime) {
        let record = ClaimRecord {
            user: user.to_string(),
            network,
            destination: destination.to_string(),
            claimed_at: now,
        };
        self.records.insert(ClaimKey::new(user, network), record);
        metrics::record_tracked_claims(self.records.len());
    }

    /// Current record for a key, if any.
    pub fn get(&self, user: &str, network: NetworkId) -> Option<ClaimRecord> {
        self.records
            .get(&ClaimKey::new(user, network))
            .map(|r| r.value().clone())
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop records whose cooldown has fully elapsed, and idle key locks.
    ///
    /// An expired record and a missing record are both eligible, so this
    /// never changes a decision. Returns the number of records removed.
    pub fn prune_expired(&self, now: SystemTime) -> usize {
        let before = self.records.len();
        self.records
            .retain(|_, record| !eligibility(Some(record), self.window, now).is_eligible());
        // Only the map holds an idle lock; anything else means a flow is using it.
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);

        let removed = before.saturating_sub(self.records.len());
        metrics::record_tracked_claims(self.records.len());
        removed
    }
}

impl Default for CooldownTracker {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

/// Exclusive handle on one key, released on drop.
pub struct ClaimSlot {
    tracker: CooldownTracker,
    key: ClaimKey,
    _guard: OwnedMutexGuard<()>,
}

impl ClaimSlot {
    pub fn key(&self) -> &ClaimKey {
        &self.key
    }

    pub fn check_eligible(&self, now: SystemTime) -> Eligibility {
        self.tracker
            .check_eligible(&self.key.user, self.key.network, now)
    }

    pub fn record(&self, destination: &str, now: SystemTime) {
        self.tracker
            .record_claim(&self.key.user, self.key.network, destination, now)
    }
}

fn eligibility(record: Option<&ClaimRecord>, window: Duration, now: SystemTime) -> Eligibility {
    let Some(record) = record else {
        return Eligibility::Eligible;
    };
    // A clock that stepped backwards counts as no time elapsed.
    let elapsed = now
        .duration_since(record.claimed_at)
        .unwrap_or(Duration::ZERO);
    if elapsed >= window {
        Eligibility::Eligible
    } else {
        Eligibility::NotEligible(window - elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);
    const DEST: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    fn t0() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    #[test]
    fn test_absent_record_is_eligible() {
        let tracker = CooldownTracker::default();
        assert_eq!(tracker.check_eligible("42", NetworkId::Bera, t0()), Eligibility::Eligible);
    }

    #[test]
    fn test_within_window_reports_remaining() {
        let tracker = CooldownTracker::default();
        tracker.record_claim("42", NetworkId::Bera, DEST, t0());

        assert_eq!(
            tracker.check_eligible("42", NetworkId::Bera, t0() + HOUR),
            Eligibility::NotEligible(23 * HOUR)
        );
        assert_eq!(
            tracker.check_eligible("42", NetworkId::Bera, t0()),
            Eligibility::NotEligible(24 * HOUR)
        );
    }

    #[test]
    fn test_window_boundary_is_eligible() {
        let tracker = CooldownTracker::default();
        tracker.record_claim("42", NetworkId::Bera, DEST, t0());

        let just_before = t0() + 24 * HOUR - Duration::from_secs(1);
        assert_eq!(
            tracker.check_eligible("42", NetworkId::Bera, just_before),
            Eligibility::NotEligible(Duration::from_secs(1))
        );
        assert!(tracker.check_eligible("42", NetworkId::Bera, t0() + 24 * HOUR).is_eligible());
        assert!(tracker.check_eligible("42", NetworkId::Bera, t0() + 48 * HOUR).is_eligible());
    }

    #[test]
    fn test_keys_are_independent() {
        let tracker = CooldownTracker::default();
        tracker.record_claim("42", NetworkId::Bera, DEST, t0());

        assert!(tracker.check_eligible("42", NetworkId::Sepolia, t0()).is_eligible());
        assert!(tracker.check_eligible("43", NetworkId::Bera, t0()).is_eligible());
    }

    #[test]
    fn test_record_overwrites() {
        let tracker = CooldownTracker::default();
        tracker.record_claim("42", NetworkId::Bera, DEST, t0());
        tracker.record_claim("42", NetworkId::Bera, "0xabc", t0() + 25 * HOUR);

        let record = tracker.get("42", NetworkId::Bera).unwrap();
        assert_eq!(record.destination, "0xabc");
        assert_eq!(record.claimed_at, t0() + 25 * HOUR);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_clock_moving_backwards() {
        let tracker = CooldownTracker::default();
        tracker.record_claim("42", NetworkId::Bera, DEST, t0());
        assert_eq!(
            tracker.check_eligible("42", NetworkId::Bera, t0() - HOUR),
            Eligibility::NotEligible(24 * HOUR)
        );
    }

    #[test]
    fn test_prune_expired() {
        let tracker = CooldownTracker::default();
        tracker.record_claim("1", NetworkId::Bera, DEST, t0());
        tracker.record_claim("2", NetworkId::Bera, DEST, t0() + 12 * HOUR);

        let removed = tracker.prune_expired(t0() + 30 * HOUR);
        assert_eq!(removed, 1);
        assert!(tracker.get("1", NetworkId::Bera).is_none());
        assert!(tracker.get("2", NetworkId::Bera).is_some());
    }

    #[tokio::test]
    async fn test_prune_keeps_held_locks() {
        let tracker = CooldownTracker::default();
        let slot = tracker.lock("42", NetworkId::Bera).await;
        let _idle = tracker.lock("43", NetworkId::Bera).await;
        drop(_idle);

        tracker.prune_expired(t0());
        assert_eq!(tracker.locks.len(), 1);
        assert!(tracker.locks.contains_key(slot.key()));
    }

    #[tokio::test]
    async fn test_slot_serializes_same_key() {
        let tracker = CooldownTracker::default();
        let slot = tracker.lock("42", NetworkId::Bera).await;

        // Same key waits
        let waiting = tokio::time::timeout(
            Duration::from_millis(50),
            tracker.lock("42", NetworkId::Bera),
        )
        .await;
        assert!(waiting.is_err());

        // Other keys do not
        let other = tokio::time::timeout(
            Duration::from_millis(50),
            tracker.lock("42", NetworkId::Sepolia),
        )
        .await;
        assert!(other.is_ok());

        slot.record(DEST, t0());
        drop(slot);

        let again = tracker.lock("42", NetworkId::Bera).await;
        assert!(!again.check_eligible(t0() + HOUR).is_eligible());
    }
}
