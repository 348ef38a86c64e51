use std::time::Duration;

use tokio::time::interval;

use crate::features::sessions::store::SessionStore;

/// Background worker that discards idle sessions.
///
/// Browser sessions have no explicit logout; a session "ends" by going
/// idle past the store's TTL, and this sweeper reclaims the memory.
pub struct SessionSweeper {
    store: SessionStore,
    sweep_interval: Duration,
}

impl SessionSweeper {
    pub fn new(store: SessionStore, sweep_interval: Duration) -> Self {
        Self {
            store,
            sweep_interval,
        }
    }

    /// Run the sweeper in a background loop.
    pub async fn run(&self) {
        tracing::info!(
            "Starting session sweeper (interval: {:?})",
            self.sweep_interval
        );

        let mut interval = interval(self.sweep_interval);

        loop {
            interval.tick().await;

            let removed = self.store.prune_idle().await;
            if removed > 0 {
                tracing::debug!(
                    "Pruned {} idle sessions, {} remaining",
                    removed,
                    self.store.len().await
                );
            }
        }
    }
}
