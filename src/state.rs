use std::sync::Arc;
use std::time::Duration;

use crate::auth::Authenticator;
use crate::blocklist::BlockRegistry;
use crate::config::Args;
use crate::ledger::AttemptLedger;
use crate::policy::EscalationPolicy;
use crate::rate_limit::LoginRateLimiter;
use crate::store::{KeyValueStore, StoreHandle};

// App's shared state. Every component talks to the same store through its
// own handle; nothing here caches store contents across requests.
pub struct AppState {
    pub ledger: AttemptLedger,
    pub blocklist: BlockRegistry,
    pub rate_limiter: LoginRateLimiter,
    pub policy: EscalationPolicy,
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(
        args: &Args,
        store: Arc<dyn KeyValueStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let handle = StoreHandle::new(store, Duration::from_secs(args.store_timeout));
        Self {
            ledger: AttemptLedger::new(handle.clone(), Duration::from_secs(args.block_time)),
            blocklist: BlockRegistry::new(handle.clone(), Duration::from_secs(args.block_time)),
            rate_limiter: LoginRateLimiter::new(
                handle,
                args.rate_limit,
                Duration::from_secs(args.rate_window),
            ),
            policy: EscalationPolicy {
                soft_limit: args.soft_limit,
                hard_limit: args.failed_attempts_limit,
            },
            authenticator,
        }
    }
}
