use serde_json::Value;

use crate::format::round_half_up;

pub const WEATHER_NOT_CONFIGURED: &str =
    "Weather service is not configured. Please set up OpenWeatherMap API key.";
pub const WEATHER_UNAVAILABLE: &str = "Weather information is currently unavailable.";
pub const WEATHER_APOLOGY: &str = "I'm sorry, I couldn't get the weather information right now. You can check your local weather app for current conditions.";

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub description: String,
    pub temperature_c: f64,
    pub humidity_percent: i64,
}

impl CurrentConditions {
    /// Requires both `main` and the first `weather` entry; anything less is `None`.
    pub fn from_payload(payload: &Value) -> Option<Self> {
        let main = payload.get("main")?;
        let weather = payload.get("weather")?.get(0)?;

        Some(Self {
            city: payload
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            description: weather.get("description")?.as_str()?.to_string(),
            temperature_c: main.get("temp")?.as_f64()?,
            humidity_percent: main
                .get("humidity")?
                .as_f64()
                .map(|value| value.trunc() as i64)?,
        })
    }

    pub fn to_speech(&self) -> String {
        format!(
            "Current weather in {}: {}, {:.1}°C, {}% humidity",
            self.city,
            self.description,
            round_half_up(self.temperature_c, 1),
            self.humidity_percent
        )
    }
}

/// Formats a provider response, falling back to the "unavailable" line.
pub fn describe_conditions(payload: &Value) -> String {
    CurrentConditions::from_payload(payload)
        .map(|conditions| conditions.to_speech())
        .unwrap_or_else(|| WEATHER_UNAVAILABLE.to_string())
}
