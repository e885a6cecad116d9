use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref LOGIN_ATTEMPTS_TOTAL: Counter = register_counter!(
        "login_gateway_attempts_total",
        "Total login attempts received"
    )
    .unwrap();
    pub static ref LOGIN_FAILURES_TOTAL: Counter = register_counter!(
        "login_gateway_failed_attempts_total",
        "Total failed login attempts"
    )
    .unwrap();
    pub static ref RATE_LIMITED_TOTAL: Counter = register_counter!(
        "login_gateway_rate_limited_total",
        "Login requests rejected by the rate ceiling"
    )
    .unwrap();
    pub static ref BLOCKS_TRIGGERED_TOTAL: Counter = register_counter!(
        "login_gateway_blocks_total",
        "Identities blocked for exceeding the failure limit"
    )
    .unwrap();
    pub static ref GATE_REJECTIONS_TOTAL: Counter = register_counter!(
        "login_gateway_gate_rejections_total",
        "Requests turned away at the gate from blocked identities"
    )
    .unwrap();
    pub static ref LOGIN_LATENCY: Histogram = register_histogram!(
        "login_gateway_login_latency_seconds",
        "Login handling latency in seconds"
    )
    .unwrap();
}
