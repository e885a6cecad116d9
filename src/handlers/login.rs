use axum::Form;
use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

use crate::gate::ClientId;
use crate::metrics::{
    BLOCKS_TRIGGERED_TOTAL, LOGIN_ATTEMPTS_TOTAL, LOGIN_FAILURES_TOTAL, LOGIN_LATENCY,
    RATE_LIMITED_TOTAL,
};
use crate::pages;
use crate::policy::Severity;
use crate::state::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

// Missing form fields read as empty strings, same as an empty submission
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    ClientId(identity): ClientId,
    Form(form): Form<LoginForm>,
) -> Response {
    LOGIN_ATTEMPTS_TOTAL.inc();
    let start_time = Instant::now();

    let response = handle_login(&state, identity.as_deref(), &form).await;

    LOGIN_LATENCY.observe(start_time.elapsed().as_secs_f64());
    response
}

async fn handle_login(state: &AppState, identity: Option<&str>, form: &LoginForm) -> Response {
    info!(
        identity = identity.unwrap_or("unknown"),
        username = %form.username,
        "login attempt"
    );

    // Request-volume ceiling comes first, before credentials are looked at.
    // A ceiling rejection is not a credential failure and must not show up
    // in the attempt ledger.
    if let Some(identity) = identity {
        match state.rate_limiter.check(identity).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(identity, "login rate ceiling exceeded");
                RATE_LIMITED_TOTAL.inc();
                return pages::rate_limited();
            }
            Err(err) => {
                error!(identity, %err, "rate limit check failed, letting request through");
            }
        }
    } else {
        warn!(username = %form.username, "login without a resolvable client address, limits skipped");
    }

    if state.authenticator.verify(&form.username, &form.password) {
        info!(
            identity = identity.unwrap_or("unknown"),
            username = %form.username,
            "successful login"
        );
        // success leaves the ledger alone - earlier failures keep counting
        return pages::success(&form.username);
    }

    warn!(
        identity = identity.unwrap_or("unknown"),
        username = %form.username,
        "failed login attempt"
    );
    LOGIN_FAILURES_TOTAL.inc();

    let Some(identity) = identity else {
        return pages::index(Some(INVALID_CREDENTIALS));
    };

    let attempts = match state.ledger.record_failure(identity).await {
        Ok(attempts) => attempts,
        Err(err) => {
            // the attempt goes unpenalized rather than failing the request
            error!(identity, %err, "could not record failed attempt");
            return pages::index(Some(INVALID_CREDENTIALS));
        }
    };

    match state.policy.classify(attempts) {
        Severity::Blocked => {
            error!(identity, attempts, "failed attempt limit exceeded, blocking");
            BLOCKS_TRIGGERED_TOTAL.inc();
            if let Err(err) = state.blocklist.block(identity).await {
                error!(identity, %err, "could not set block marker");
            }
            pages::not_found()
        }
        Severity::RateLimited => {
            warn!(identity, attempts, "failed attempt threshold reached, throttling");
            pages::rate_limited()
        }
        Severity::Clean => pages::index(Some(INVALID_CREDENTIALS)),
    }
}
