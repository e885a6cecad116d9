#![allow(dead_code)]

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use login_gateway::auth::StaticAuthenticator;
use login_gateway::config::Args;
use login_gateway::router;
use login_gateway::state::AppState;
use login_gateway::store::MemoryStore;

pub fn default_args() -> Args {
    Args::parse_from(["login-gateway"])
}

// Boots a gateway on an ephemeral port and returns its base url
pub async fn spawn_gateway(args: Args) -> String {
    let store = Arc::new(MemoryStore::new());
    let authenticator = Arc::new(StaticAuthenticator::new(
        args.admin_user.clone(),
        args.admin_password.clone(),
    ));
    let state = Arc::new(AppState::new(&args, store, authenticator));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });
    format!("http://{}", addr)
}

pub async fn login(
    client: &reqwest::Client,
    base: &str,
    username: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/login", base))
        .form(&[("username", username), ("password", password)])
        .send()
        .await
        .unwrap()
}

// Sleep past the next wall-clock second so a burst of requests never
// straddles a rate window boundary
pub async fn align_to_second() {
    let into = chrono::Utc::now().timestamp_millis() % 1000;
    tokio::time::sleep(Duration::from_millis((1000 - into + 20) as u64)).await;
}
