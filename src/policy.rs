// Maps an identity's accumulated failure count to a response tier.
// Under the soft limit a failure gets the normal error page; from the soft
// limit up it gets 429s; at the hard limit the identity is blocked outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Clean,
    RateLimited,
    Blocked,
}

#[derive(Debug, Clone, Copy)]
pub struct EscalationPolicy {
    pub soft_limit: u64,
    pub hard_limit: u64,
}

impl EscalationPolicy {
    pub fn classify(&self, attempts: u64) -> Severity {
        if attempts >= self.hard_limit {
            Severity::Blocked
        } else if attempts >= self.soft_limit {
            Severity::RateLimited
        } else {
            Severity::Clean
        }
    }
}
