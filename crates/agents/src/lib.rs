mod assistant;
mod http;
mod llm;
mod navigation;
mod weather;

use std::sync::Arc;

use anyhow::Result;
use smartroute_core::AppConfig;
use smartroute_observability::AppMetrics;

pub use assistant::AssistantAgent;
pub use http::build_http_client;
pub use llm::OllamaClient;
pub use navigation::NavigationAgent;
pub use weather::WeatherService;

/// Both agents wired from one config and one shared HTTP client.
#[derive(Clone)]
pub struct Agents {
    pub assistant: Arc<AssistantAgent>,
    pub navigation: Arc<NavigationAgent>,
}

impl Agents {
    pub fn from_config(config: &AppConfig, metrics: Arc<AppMetrics>) -> Result<Self> {
        let client = build_http_client(config.http_timeout)?;

        let weather = WeatherService::new(client.clone(), config.weather.clone(), metrics.clone());
        let generator = OllamaClient::new(client.clone(), config.text_generation.clone());
        let assistant = AssistantAgent::new(weather, generator, metrics.clone());
        let navigation = NavigationAgent::new(client, config.routing.clone(), metrics);

        Ok(Self {
            assistant: Arc::new(assistant),
            navigation: Arc::new(navigation),
        })
    }
}
