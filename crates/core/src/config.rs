use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_OPENROUTE_BASE_URL: &str = "https://api.openrouteservice.org/v2";
pub const DEFAULT_GEOCODING_URL: &str = "https://api.openrouteservice.org/geocode/search";
pub const DEFAULT_OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.2";

#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub geocoding_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextGenerationConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Process-wide settings, read once at startup and shared read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind: String,
    pub routing: RoutingConfig,
    pub weather: WeatherConfig,
    pub text_generation: TextGenerationConfig,
    pub http_timeout: Duration,
    pub body_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            routing: RoutingConfig {
                api_key: None,
                base_url: DEFAULT_OPENROUTE_BASE_URL.to_string(),
                geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            },
            weather: WeatherConfig {
                api_key: None,
                url: DEFAULT_OPENWEATHER_URL.to_string(),
            },
            text_generation: TextGenerationConfig {
                base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
                model: DEFAULT_OLLAMA_MODEL.to_string(),
                temperature: 0.7,
                max_tokens: 150,
            },
            http_timeout: Duration::from_secs(30),
            body_limit_bytes: 64 * 1024,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Ok(Self {
            bind: read("SMARTROUTE_BIND").unwrap_or(defaults.bind),
            routing: RoutingConfig {
                api_key: read("SMARTROUTE_OPENROUTE_API_KEY"),
                base_url: read("SMARTROUTE_OPENROUTE_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.routing.base_url),
                geocoding_url: read("SMARTROUTE_GEOCODING_URL")
                    .unwrap_or(defaults.routing.geocoding_url),
            },
            weather: WeatherConfig {
                api_key: read("SMARTROUTE_OPENWEATHER_API_KEY"),
                url: read("SMARTROUTE_OPENWEATHER_URL").unwrap_or(defaults.weather.url),
            },
            text_generation: TextGenerationConfig {
                base_url: read("SMARTROUTE_OLLAMA_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.text_generation.base_url),
                model: read("SMARTROUTE_OLLAMA_MODEL").unwrap_or(defaults.text_generation.model),
                temperature: parse_or(
                    "SMARTROUTE_OLLAMA_TEMPERATURE",
                    read("SMARTROUTE_OLLAMA_TEMPERATURE"),
                    defaults.text_generation.temperature,
                )?,
                max_tokens: parse_or(
                    "SMARTROUTE_OLLAMA_MAX_TOKENS",
                    read("SMARTROUTE_OLLAMA_MAX_TOKENS"),
                    defaults.text_generation.max_tokens,
                )?,
            },
            http_timeout: Duration::from_secs(parse_or(
                "SMARTROUTE_HTTP_TIMEOUT_SECONDS",
                read("SMARTROUTE_HTTP_TIMEOUT_SECONDS"),
                defaults.http_timeout.as_secs(),
            )?),
            body_limit_bytes: parse_or(
                "SMARTROUTE_BODY_LIMIT_BYTES",
                read("SMARTROUTE_BODY_LIMIT_BYTES"),
                defaults.body_limit_bytes,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        Some(value) => value
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
        None => Ok(default),
    }
}
