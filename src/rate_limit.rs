use crate::store::{StoreError, StoreHandle};
use chrono::Utc;
use std::time::Duration;

// Fixed-window request ceiling for the login route, counted per identity
// and independent of credential outcome. Windows are aligned to wall-clock
// boundaries: the counter key carries the window index, so the count resets
// when the next window starts and the old key just expires.
#[derive(Clone)]
pub struct LoginRateLimiter {
    store: StoreHandle,
    max_requests: u32,
    window: Duration,
}

impl LoginRateLimiter {
    pub fn new(store: StoreHandle, max_requests: u32, window: Duration) -> Self {
        Self {
            store,
            max_requests,
            window,
        }
    }

    // Counts this request; true while the identity is under the ceiling
    pub async fn check(&self, identity: &str) -> Result<bool, StoreError> {
        let window_secs = self.window.as_secs().max(1);
        let index = Utc::now().timestamp() as u64 / window_secs;
        let key = format!("rate:{}:{}", identity, index);

        let count = self.store.incr(&key).await?;
        if count == 1 {
            self.store.expire(&key, self.window).await?;
        }
        Ok(count <= self.max_requests as i64)
    }
}
