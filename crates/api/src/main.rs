use anyhow::{Context, Result};
use smartroute_api::build_app;
use smartroute_core::AppConfig;
use smartroute_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("smartroute_api");

    let config = AppConfig::from_env().context("invalid SMARTROUTE_* configuration")?;
    let bind = config.bind.clone();
    let routing_configured = config.routing.api_key.is_some();
    let weather_configured = config.weather.api_key.is_some();

    let app = build_app(config).await?;

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(
        bind = %bind,
        routing_configured,
        weather_configured,
        "smartroute api started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
