use std::net::SocketAddr;
use tracing::info;

use ideaflow_api::DbState;

pub mod api;
pub mod config;
pub mod inspect;
pub mod logging;

#[cfg(test)]
mod tests;

use config::Config;

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    info!("Using database {}", config.database_path.display());

    let db = DbState::init_with_path(config.database_path.clone()).await?;
    let app = api::create_router(db, &config)?;

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
