use std::net::SocketAddr;

use sea_orm::Database;
use tracing::info;

use palisade_api::config::ApiConfig;
use palisade_api::router::build_router;
use palisade_api::state::AppState;
use palisade_auth::token::TokenKeys;

#[tokio::main]
async fn main() {
    palisade_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        tokens: TokenKeys {
            secret: config.jwt_secret,
            expire_hours: config.token_expire_hours,
        },
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    // connect_info feeds the client IP recorded on login events
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .expect("server error");
}
