use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use agentic_blogger::{config::Config, create_router, utils::init_logger, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (LOG_DIR decides where logs go)
    let config = Config::from_env()?;

    let _log_guard = init_logger(config.server.log_dir.as_deref());
    info!("Configuration loaded: {:?}", config.server);

    let state = AppState::from_config(config.clone())?;
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
