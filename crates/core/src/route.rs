use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Lookup;
use crate::format::{format_distance, format_duration};
use crate::location::Coordinate;

pub const NO_ROUTE_FOUND: &str = "No route found";
pub const REROUTE_NOTE: &str = "Route recalculated due to traffic or road conditions.";
pub const ROUTE_LABEL: &str = "Route via OpenRouteService";
pub const ROUTING_PROFILE: &str = "driving-car";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub instruction: String,
    #[serde(rename = "distance")]
    pub distance_text: String,
    #[serde(rename = "duration")]
    pub duration_text: String,
}

/// An entry of the route's `steps` list. Holds geometry points only when the
/// provider sent no turn-by-turn steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteStep {
    Instruction(Step),
    Point(Coordinate),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub duration_text: String,
    pub distance_text: String,
    pub polyline: Vec<Coordinate>,
    pub steps: Vec<RouteStep>,
    pub note: Option<String>,
}

impl RouteSummary {
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter_map(|step| match step {
            RouteStep::Instruction(step) => Some(step),
            RouteStep::Point(_) => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoutePreference {
    #[default]
    Recommended,
    Fastest,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequest {
    pub coordinates: [[f64; 2]; 2],
    pub profile: &'static str,
    pub format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preference: Option<&'static str>,
}

impl DirectionsRequest {
    pub fn new(origin: Coordinate, destination: Coordinate, preference: RoutePreference) -> Self {
        Self {
            coordinates: [origin.to_lon_lat(), destination.to_lon_lat()],
            profile: ROUTING_PROFILE,
            format: "geojson",
            preference: match preference {
                RoutePreference::Recommended => None,
                RoutePreference::Fastest => Some("fastest"),
            },
        }
    }
}

/// Converts a GeoJSON directions payload into a [`RouteSummary`], using the first
/// feature only.
pub fn normalize(payload: &Value) -> Lookup<RouteSummary> {
    let Some(feature) = payload
        .get("features")
        .and_then(Value::as_array)
        .and_then(|features| features.first())
    else {
        return Lookup::NotFound;
    };

    let properties = feature.get("properties");
    let mut route = RouteSummary::default();

    if let Some(summary) = properties.and_then(|props| props.get("summary")) {
        route.duration_text = format_duration(number(summary, "duration"));
        route.distance_text = format_distance(number(summary, "distance"));
    }

    route.polyline = feature
        .pointer("/geometry/coordinates")
        .and_then(Value::as_array)
        .map(|coords| coords.iter().filter_map(Coordinate::from_lon_lat).collect())
        .unwrap_or_default();
    route.steps = route.polyline.iter().copied().map(RouteStep::Point).collect();

    let instructions = properties
        .and_then(|props| props.get("segments"))
        .and_then(Value::as_array)
        .map(|segments| {
            segments
                .iter()
                .filter_map(|segment| segment.get("steps").and_then(Value::as_array))
                .flatten()
                .map(|step| {
                    RouteStep::Instruction(Step {
                        instruction: step
                            .get("instruction")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                        distance_text: format_distance(number(step, "distance")),
                        duration_text: format_duration(number(step, "duration")),
                    })
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    // Turn-by-turn steps replace the geometry points in `steps` whenever there are any.
    if !instructions.is_empty() {
        route.steps = instructions;
    }

    Lookup::Found(route)
}

fn number(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or_default()
}
