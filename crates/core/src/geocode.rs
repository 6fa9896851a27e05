use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::location::Coordinate;

pub const GEOCODE_RESULT_LIMIT: usize = 5;
pub const DEFAULT_NEARBY_KIND: &str = "restaurant";
pub const DEFAULT_NEARBY_RADIUS_METERS: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// Reads the places out of a geocoding feature collection. Features without a
/// coordinate pair are dropped; missing labels become empty strings.
pub fn parse_places(payload: &Value) -> Vec<Place> {
    let Some(features) = payload.get("features").and_then(Value::as_array) else {
        return Vec::new();
    };

    features
        .iter()
        .filter_map(|feature| {
            let coordinate = feature
                .pointer("/geometry/coordinates")
                .and_then(Coordinate::from_lon_lat)?;
            Some(Place {
                name: text(feature, "/properties/name"),
                address: text(feature, "/properties/formatted"),
                lat: coordinate.lat,
                lng: coordinate.lng,
            })
        })
        .collect()
}

/// Free-text query standing in for a proximity search.
pub fn nearby_query(kind: &str, center: Coordinate) -> String {
    format!("{} near {:.6},{:.6}", kind, center.lat, center.lng)
}

fn text(feature: &Value, pointer: &str) -> String {
    feature
        .pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
