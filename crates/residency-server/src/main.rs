mod config;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use residency_api::auth::{AppState, AppStateInner};
use residency_api::routes::build_router;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "residency_server=debug,residency_api=debug,residency_db=info,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Init database
    let db = Arc::new(residency_db::Database::open(&config.db_path)?);

    let state: AppState = Arc::new(AppStateInner::from_database(db, config.session_secret.clone()));

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr = config.addr()?;
    info!("Residency console listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
