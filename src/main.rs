//! Server: reads settings from env, loads the resource file, mounts common and resource routes.

use chinook_api::{app, load_from_path, resolve, AppState, Settings, SqliteExecutor};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("chinook_api=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let executor = SqliteExecutor::connect(&settings.database_url, settings.max_connections).await?;

    let config = load_from_path(&settings.resources_path).await?;
    let registry = resolve(&config)?;
    tracing::info!(resources = registry.resources.len(), "loaded {}", settings.resources_path.display());

    let state = AppState::new(Arc::new(executor), registry);
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
