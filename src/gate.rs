use axum::extract::{ConnectInfo, FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, warn};

use crate::metrics::GATE_REJECTIONS_TOTAL;
use crate::pages;
use crate::state::AppState;

// Paths that stay reachable for blocked clients, so the pages still render
pub const GATE_EXEMPT_PREFIXES: &[&str] = &["/static/"];

// Opaque client key derived from the peer address. None when the request
// carries no resolvable address - there is nothing to key the counters on,
// so such requests are treated as clean and logged.
pub struct ClientId(pub Option<String>);

pub fn client_identity(addr: Option<SocketAddr>) -> Option<String> {
    addr.map(|a| a.ip().to_string()).filter(|ip| !ip.is_empty())
}

impl<S> FromRequestParts<S> for ClientId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let addr = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ci| ci.0);
        Ok(ClientId(client_identity(addr)))
    }
}

// Runs before every route: blocked identities get the opaque 404 for any
// path, before any handler logic. Evaluated against the store on each
// request - no decision is cached across requests.
pub async fn block_gate(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    if GATE_EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return next.run(request).await;
    }

    let addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let Some(identity) = client_identity(addr) else {
        warn!(%path, "request without a resolvable client address, gate skipped");
        return next.run(request).await;
    };

    match state.blocklist.is_blocked(&identity).await {
        Ok(true) => {
            warn!(%identity, %path, "blocked client attempted access");
            GATE_REJECTIONS_TOTAL.inc();
            pages::not_found()
        }
        Ok(false) => next.run(request).await,
        Err(err) => {
            // store down: treat as not blocked rather than turning away all traffic
            error!(%identity, %err, "block check failed, letting request through");
            next.run(request).await
        }
    }
}
