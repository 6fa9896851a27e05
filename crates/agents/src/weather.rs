use std::sync::Arc;

use reqwest::Client;
use serde_json::Value;
use smartroute_core::config::WeatherConfig;
use smartroute_core::location::DEFAULT_COORDINATE;
use smartroute_core::weather::{
    describe_conditions, WEATHER_APOLOGY, WEATHER_NOT_CONFIGURED,
};
use smartroute_core::{CommandContext, Coordinate, ProviderError};
use smartroute_observability::{AppMetrics, Provider};
use tracing::{instrument, warn};

use crate::http::fetch_json;

const PROVIDER: &str = "OpenWeatherMap";

#[derive(Clone)]
pub struct WeatherService {
    client: Client,
    config: WeatherConfig,
    metrics: Arc<AppMetrics>,
}

impl WeatherService {
    pub fn new(client: Client, config: WeatherConfig, metrics: Arc<AppMetrics>) -> Self {
        Self {
            client,
            config,
            metrics,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Speaks the current conditions at the caller's location. Never fails: every
    /// problem turns into one of the fixed fallback lines.
    #[instrument(skip(self, context))]
    pub async fn respond(&self, command: &str, context: &CommandContext) -> String {
        let coordinate = context.location().unwrap_or(DEFAULT_COORDINATE);

        let Some(api_key) = self.config.api_key.as_deref() else {
            return WEATHER_NOT_CONFIGURED.to_string();
        };

        match self.current_conditions(coordinate, api_key).await {
            Ok(payload) => describe_conditions(&payload),
            Err(error) => {
                self.metrics.inc_provider_failure(Provider::Weather);
                warn!(error = %error, lat = coordinate.lat, lng = coordinate.lng, "weather lookup failed");
                WEATHER_APOLOGY.to_string()
            }
        }
    }

    async fn current_conditions(
        &self,
        coordinate: Coordinate,
        api_key: &str,
    ) -> Result<Value, ProviderError> {
        let request = self.client.get(&self.config.url).query(&[
            ("lat", format!("{:.6}", coordinate.lat)),
            ("lon", format!("{:.6}", coordinate.lng)),
            ("appid", api_key.to_string()),
            ("units", "metric".to_string()),
        ]);
        fetch_json(PROVIDER, request).await
    }
}
