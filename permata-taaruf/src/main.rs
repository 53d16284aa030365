use std::sync::Arc;

use permata_taaruf::config::AppConfig;
use permata_taaruf::{router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    permata_shared::middleware::init_tracing("permata-taaruf");

    let config = AppConfig::load()?;
    let port = config.port;
    tracing::info!(status_policy = ?config.status_policy, "configuration loaded");

    let db = permata_shared::clients::db::create_pool(&config.database_url, config.db_pool_size)?;
    let metrics_handle = permata_shared::middleware::init_metrics()?;

    let state = Arc::new(AppState { db, config, metrics_handle });
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "permata-taaruf starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
