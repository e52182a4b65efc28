use anyhow::Context;
use tracing_subscriber::EnvFilter;

use vibestream_api::api::{create_router, AppState};
use vibestream_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibestream_api=debug,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    // Initialize application state (provider handles are built once and
    // shared across all requests)
    let state = AppState::new(&config);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;

    Ok(())
}
