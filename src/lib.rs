pub mod api;
pub mod catalog;
pub mod chat;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod engine;
pub mod guidance;
pub mod history;
pub mod inference;
pub mod models;
pub mod selection;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{ChatConfig, ServerConfig};
use crate::engine::{CareEngine, EngineError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Server(#[from] api::ServerError),
    #[error("Failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

/// Start the service and block until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let chat_config = ChatConfig::from_env();
    tracing::info!(model = %chat_config.model, "Chat assistant configured");
    let engine = Arc::new(CareEngine::from_config(chat_config)?);

    let server_config = ServerConfig::from_env();
    let mut server = api::start_api_server(engine, server_config.bind_addr).await?;
    tracing::info!(addr = %server.session.server_addr, "Listening");

    tokio::signal::ctrl_c().await.map_err(StartupError::Signal)?;
    server.shutdown();
    Ok(())
}
