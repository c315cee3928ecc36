use anyhow::{Context, Result};
use clap::Parser;
use roi_server::{AppState, ServerConfig, build_router, logging};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::parse();
    logging::init_logging(config.log_file.as_deref())?;

    let state = AppState::from_config(&config).await?;
    let app = build_router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    info!(%addr, backend = ?config.db_backend, database = %config.database, "roi-server listening");
    info!("Endpoints: /health, /simulate, /scenarios, /scenarios/:id, /report/generate");

    axum::serve(listener, app).await?;
    Ok(())
}
