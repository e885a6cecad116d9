use crate::store::{StoreError, StoreHandle};
use std::time::Duration;

// Presence-only block markers, keyed blocked:{identity}. A marker expires on
// its own after block_time; there is no manual unblock. Re-blocking an
// already blocked identity refreshes the expiry, so continued attempts
// extend the block.
#[derive(Clone)]
pub struct BlockRegistry {
    store: StoreHandle,
    block_time: Duration,
}

impl BlockRegistry {
    pub fn new(store: StoreHandle, block_time: Duration) -> Self {
        Self { store, block_time }
    }

    pub async fn is_blocked(&self, identity: &str) -> Result<bool, StoreError> {
        self.store.exists(&format!("blocked:{}", identity)).await
    }

    pub async fn block(&self, identity: &str) -> Result<(), StoreError> {
        self.store
            .set_ex(&format!("blocked:{}", identity), 1, self.block_time)
            .await
    }
}
