//! mcdm-engine server binary.

use mcdm_engine::adapters::build_router;
use mcdm_engine::config::AppConfig;
use mcdm_engine::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;
    logging::init(&config.server)?;

    let addr = config.server.socket_addr()?;
    let app = build_router(&config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "MCDM engine listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
