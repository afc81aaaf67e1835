use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tasktally::config::LedgerConfig;
use tasktally::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = LedgerConfig::load().context("loading configuration")?;
    info!("💰 Currency: {} ({})", config.currency_name, config.currency_symbol);

    let app_state = initialize_backend(&config)?;
    let app = create_router(app_state);

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("binding {}", config.bind_address))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
