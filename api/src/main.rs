use anyhow::Context;
use api::{build_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;

    if config.api_keys.is_empty() {
        log::warn!("API_KEY is empty; every citation request will be rejected");
    }
    if config.openai_api_key.is_none() {
        log::warn!("OPENAI_API_KEY is not set; citation requests will fail until it is configured");
    }

    let bind_address = config.bind_address;
    log::info!(
        "Starting citation service (model {}, {} accepted key(s))",
        config.openai_model,
        config.api_keys.len()
    );

    let app = build_router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}
