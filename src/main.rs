use skinsmart_api::api::{create_router, AppState};
use skinsmart_api::config::Config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    // Catalog problems surface here, once, before the server accepts requests
    let state = AppState::from_config(&config)?;
    tracing::info!(
        products = state.catalog.len(),
        capture_source = state.capture.name(),
        "Catalog loaded"
    );

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
