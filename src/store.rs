use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::time::timeout;

// Store failures - callers decide whether to fail open or closed
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store operation timed out")]
    Timeout,
}

// Key-value contract shared by the ledger, block registry and rate limiter.
// incr must be atomic per key: two concurrent callers always observe
// distinct, consecutive counts.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    // Fetch-and-add starting from 0, returns the new count
    async fn incr(&self, key: &str) -> Result<i64, StoreError>;

    // Set or refresh a TTL; no-op if the key does not exist
    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    // Create-or-overwrite with an expiry
    async fn set_ex(&self, key: &str, value: i64, ttl: Duration) -> Result<(), StoreError>;

    async fn exists(&self, key: &str) -> Result<bool, StoreError>;
}

// Stored value with optional expiry
struct Entry {
    value: i64,
    expires_at: Option<Instant>,
}

impl Entry {
    fn expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

// In-memory store backed by DashMap. Expiry is lazy: an expired entry reads
// as absent and incr restarts it from zero. sweep() drops dead entries so
// the map does not grow without bound.
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn sweep(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| !entry.expired(now));
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        let now = Instant::now();
        // entry() holds the shard lock, so the read-modify-write is atomic
        let mut entry = self.entries.entry(key.to_string()).or_insert(Entry {
            value: 0,
            expires_at: None,
        });
        if entry.expired(now) {
            entry.value = 0;
            entry.expires_at = None;
        }
        entry.value += 1;
        Ok(entry.value)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let now = Instant::now();
        if let Some(mut entry) = self.entries.get_mut(key) {
            if !entry.expired(now) {
                entry.expires_at = Some(now + ttl);
            }
        }
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: i64, ttl: Duration) -> Result<(), StoreError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Some(Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        let now = Instant::now();
        let live = match self.entries.get(key) {
            Some(entry) => !entry.expired(now),
            None => return Ok(false),
        };
        if !live {
            self.entries.remove_if(key, |_, entry| entry.expired(now));
        }
        Ok(live)
    }
}

// Shared handle with a bounded per-operation timeout, so an unresponsive
// store slows one request instead of stalling the whole service.
#[derive(Clone)]
pub struct StoreHandle {
    inner: Arc<dyn KeyValueStore>,
    op_timeout: Duration,
}

impl StoreHandle {
    pub fn new(inner: Arc<dyn KeyValueStore>, op_timeout: Duration) -> Self {
        Self { inner, op_timeout }
    }

    pub async fn incr(&self, key: &str) -> Result<i64, StoreError> {
        timeout(self.op_timeout, self.inner.incr(key))
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    pub async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        timeout(self.op_timeout, self.inner.expire(key, ttl))
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    pub async fn set_ex(&self, key: &str, value: i64, ttl: Duration) -> Result<(), StoreError> {
        timeout(self.op_timeout, self.inner.set_ex(key, value, ttl))
            .await
            .map_err(|_| StoreError::Timeout)?
    }

    pub async fn exists(&self, key: &str) -> Result<bool, StoreError> {
        timeout(self.op_timeout, self.inner.exists(key))
            .await
            .map_err(|_| StoreError::Timeout)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn incr_counts_from_one() {
        let store = MemoryStore::new();
        assert_eq!(store.incr("failed:10.0.0.1").await.unwrap(), 1);
        assert_eq!(store.incr("failed:10.0.0.1").await.unwrap(), 2);
        assert_eq!(store.incr("failed:10.0.0.1").await.unwrap(), 3);
        // other keys are independent
        assert_eq!(store.incr("failed:10.0.0.2").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn incr_is_atomic_under_contention() {
        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for _ in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(
                async move { store.incr("failed:contended").await },
            ));
        }
        let mut counts = Vec::new();
        for handle in handles {
            counts.push(handle.await.unwrap().unwrap());
        }
        counts.sort_unstable();
        // every count 1..=32 exactly once - no lost updates, no gaps
        assert_eq!(counts, (1..=32).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn expired_key_reads_as_absent() {
        let store = MemoryStore::new();
        store
            .set_ex("blocked:10.0.0.1", 1, Duration::from_millis(20))
            .await
            .unwrap();
        assert!(store.exists("blocked:10.0.0.1").await.unwrap());

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!store.exists("blocked:10.0.0.1").await.unwrap());
    }

    #[tokio::test]
    async fn incr_restarts_after_expiry() {
        let store = MemoryStore::new();
        assert_eq!(store.incr("failed:10.0.0.1").await.unwrap(), 1);
        store
            .expire("failed:10.0.0.1", Duration::from_millis(20))
            .await
            .unwrap();
        assert_eq!(store.incr("failed:10.0.0.1").await.unwrap(), 2);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(store.incr("failed:10.0.0.1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn expire_on_missing_key_is_noop() {
        let store = MemoryStore::new();
        store
            .expire("failed:nobody", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!store.exists("failed:nobody").await.unwrap());
    }

    #[tokio::test]
    async fn set_ex_overwrites_and_refreshes() {
        let store = MemoryStore::new();
        store
            .set_ex("blocked:10.0.0.1", 1, Duration::from_millis(30))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        // refresh before the first expiry lands
        store
            .set_ex("blocked:10.0.0.1", 1, Duration::from_millis(60))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(store.exists("blocked:10.0.0.1").await.unwrap());
    }

    #[tokio::test]
    async fn sweep_drops_expired_entries() {
        let store = MemoryStore::new();
        store
            .set_ex("blocked:10.0.0.1", 1, Duration::from_millis(10))
            .await
            .unwrap();
        store.incr("failed:10.0.0.2").await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;

        store.sweep();
        assert_eq!(store.entries.len(), 1);
        assert!(store.entries.contains_key("failed:10.0.0.2"));
    }

    struct StalledStore;

    #[async_trait]
    impl KeyValueStore for StalledStore {
        async fn incr(&self, _key: &str) -> Result<i64, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(0)
        }
        async fn expire(&self, _key: &str, _ttl: Duration) -> Result<(), StoreError> {
            Ok(())
        }
        async fn set_ex(&self, _key: &str, _value: i64, _ttl: Duration) -> Result<(), StoreError> {
            Ok(())
        }
        async fn exists(&self, _key: &str) -> Result<bool, StoreError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(false)
        }
    }

    #[tokio::test]
    async fn handle_times_out_on_stalled_store() {
        let handle = StoreHandle::new(Arc::new(StalledStore), Duration::from_millis(20));
        assert!(matches!(
            handle.incr("failed:10.0.0.1").await,
            Err(StoreError::Timeout)
        ));
        assert!(matches!(
            handle.exists("blocked:10.0.0.1").await,
            Err(StoreError::Timeout)
        ));
    }
}
