use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use login_gateway::auth::StaticAuthenticator;
use login_gateway::config::Args;
use login_gateway::router;
use login_gateway::state::AppState;
use login_gateway::store::MemoryStore;

// this is main async function with tokio
#[tokio::main]
async fn main() {
    // parse cli arguments
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let store = Arc::new(MemoryStore::new());

    // periodic sweep so expired counters do not pile up in memory
    let sweep_store = store.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            sweep_store.sweep();
        }
    });

    let authenticator = Arc::new(StaticAuthenticator::new(
        args.admin_user.clone(),
        args.admin_password.clone(),
    ));

    // creating shared state
    let state = Arc::new(AppState::new(&args, store, authenticator));

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Gateway running on http://localhost:{}", args.port);
    info!(
        "Failure limits: soft {} / hard {} within a {}s window",
        args.soft_limit, args.failed_attempts_limit, args.block_time
    );
    info!(
        "Login rate ceiling: {} requests per {} seconds",
        args.rate_limit, args.rate_window
    );
    info!("Block time: {} seconds", args.block_time);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
