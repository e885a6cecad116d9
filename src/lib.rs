pub mod auth;
pub mod blocklist;
pub mod config;
pub mod gate;
pub mod handlers;
pub mod ledger;
pub mod metrics;
pub mod pages;
pub mod policy;
pub mod rate_limit;
pub mod state;
pub mod store;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use state::AppState;

// Router with the block gate wrapped around every route, fallback included
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::index_handler))
        .route("/login", post(handlers::login_handler))
        .route("/static/style.css", get(handlers::stylesheet_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .fallback(handlers::not_found_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::block_gate,
        ))
        .with_state(state)
}
