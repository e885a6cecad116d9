use crate::store::{StoreError, StoreHandle};
use std::time::Duration;

// Per-identity failed attempt counter, keyed failed:{identity}. The window
// TTL is set on the first increment only, so an identity's history clears
// after a stretch of inactivity. Successful logins never touch this.
#[derive(Clone)]
pub struct AttemptLedger {
    store: StoreHandle,
    window: Duration,
}

impl AttemptLedger {
    pub fn new(store: StoreHandle, window: Duration) -> Self {
        Self { store, window }
    }

    // Records one failure and returns the count so far in this window
    pub async fn record_failure(&self, identity: &str) -> Result<u64, StoreError> {
        let key = format!("failed:{}", identity);
        let attempts = self.store.incr(&key).await?;
        if attempts == 1 {
            self.store.expire(&key, self.window).await?;
        }
        Ok(attempts.max(0) as u64)
    }
}
