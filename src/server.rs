use std::sync::Arc;

use anyhow::Context;

use crate::auth::TokenService;
use crate::config::AppConfig;
use crate::database::{DocumentStore, MongoStore};
use crate::routes;
use crate::state::AppState;

/// Connect the store, check it once, and serve until Ctrl-C.
///
/// A failed startup ping is logged and serving continues; requests then
/// report the outage individually.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Shoppin API in {:?} mode", config.environment);

    let tokens = TokenService::new(&config.security.token_secret, config.security.token_expiry_hours)
        .context("ACCESS_TOKEN_SECRET must be set to a non-empty value")?;

    let store = MongoStore::connect(&config.database.uri, &config.database.name)
        .await
        .context("failed to configure MongoDB client")?;

    match store.ping().await {
        Ok(()) => tracing::info!("Successfully connected to MongoDB!"),
        Err(e) => tracing::error!("Did not connect to MongoDB! {}", e),
    }

    let state = AppState::new(Arc::new(store), Arc::new(tokens));
    let app = routes::router(state, routes::cors_layer(&config.security.cors_origins));

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Shoppin API is running on port: {}", config.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shoppin API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
