use sea_orm::Database;
use tracing::info;

use emporium_core::config::Config as _;
use emporium_core::tracing::init_tracing;
use emporium_store::config::StoreConfig;
use emporium_store::router::build_router;
use emporium_store::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = StoreConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        http: reqwest::Client::new(),
        jwt_secret: config.jwt_secret,
        payment_session_url: config.payment_session_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.store_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("store service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
