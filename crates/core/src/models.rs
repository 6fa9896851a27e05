use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::CommandContext;
use crate::geocode::Place;
use crate::location::{Coordinate, Location};
use crate::phrases::Language;
use crate::route::{RouteStep, RouteSummary, ROUTE_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Navigation,
    Stop,
    Time,
    Weather,
    Bilingual,
    General,
}

impl Intent {
    pub fn as_code(self) -> &'static str {
        match self {
            Self::Navigation => "navigation",
            Self::Stop => "stop",
            Self::Time => "time",
            Self::Weather => "weather",
            Self::Bilingual => "bilingual",
            Self::General => "general",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: String,
    #[serde(default)]
    pub context: Option<CommandContext>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandResponse {
    pub response: String,
    pub status: ReplyStatus,
}

impl CommandResponse {
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: ReplyStatus::Success,
        }
    }

    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            response: format!("Sorry, I encountered an error: {message}"),
            status: ReplyStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationRequest {
    #[serde(default)]
    pub origin: Location,
    #[serde(default)]
    pub destination: Location,
    #[serde(default)]
    pub travel_mode: Option<String>,
}

/// Wire shape shared by the route and reroute endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteResponse {
    pub route: Option<Value>,
    pub steps: Option<Vec<RouteStep>>,
    pub polyline: Option<Vec<Coordinate>>,
    pub duration: Option<String>,
    pub distance: Option<String>,
    pub error: Option<String>,
}

impl RouteResponse {
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

impl From<RouteSummary> for RouteResponse {
    fn from(summary: RouteSummary) -> Self {
        Self {
            route: Some(serde_json::json!({ "summary": ROUTE_LABEL })),
            steps: Some(summary.steps),
            polyline: Some(summary.polyline),
            duration: Some(summary.duration_text),
            distance: Some(summary.distance_text),
            error: summary.note,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesResponse {
    pub places: Vec<Place>,
    pub status: String,
}

impl PlacesResponse {
    pub fn ok(places: Vec<Place>) -> Self {
        Self {
            places,
            status: "OK".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeQuery {
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub radius: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target: Language,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
    pub target: Language,
}
