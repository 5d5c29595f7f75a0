//! Background pruning of expired claim records.

use std::time::{Duration, SystemTime};

use tokio::sync::broadcast;
use tokio::time;

use crate::cooldown::tracker::CooldownTracker;

/// Periodically drops records whose cooldown has elapsed.
pub struct CooldownSweeper {
    tracker: CooldownTracker,
    interval: Duration,
}

impl CooldownSweeper {
    pub fn new(tracker: CooldownTracker, interval: Duration) -> Self {
        Self { tracker, interval }
    }

    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Cooldown sweeper starting");

        let mut ticker = time::interval(self.interval);
        // The first tick fires immediately and there is nothing to prune yet.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.tracker.prune_expired(SystemTime::now());
                    if removed > 0 {
                        tracing::debug!(removed, remaining = self.tracker.len(), "Pruned expired claims");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Cooldown sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
