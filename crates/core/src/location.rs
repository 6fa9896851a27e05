use serde::{Deserialize, Serialize};

/// Default position used when a request carries no usable coordinates (Hyderabad).
pub const DEFAULT_COORDINATE: Coordinate = Coordinate {
    lat: 17.3850,
    lng: 78.4867,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Providers speak GeoJSON order.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    pub fn from_lon_lat(pair: &serde_json::Value) -> Option<Self> {
        let pair = pair.as_array()?;
        let lng = pair.first()?.as_f64()?;
        let lat = pair.get(1)?.as_f64()?;
        Some(Self { lat, lng })
    }

    /// Parses `"lat,lng"`.
    pub fn parse(text: &str) -> Option<Self> {
        let (lat, lng) = text.split_once(',')?;
        let lat = lat.trim().parse::<f64>().ok()?;
        let lng = lng.trim().parse::<f64>().ok()?;
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }
}

/// A caller-supplied point: either a coordinate pair or a free-text address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Location {
    Coordinates {
        #[serde(alias = "latitude")]
        lat: f64,
        #[serde(alias = "longitude")]
        lng: f64,
    },
    Address {
        address: String,
    },
    Unspecified {},
}

impl Default for Location {
    fn default() -> Self {
        Self::Unspecified {}
    }
}

impl Location {
    pub fn coordinates(lat: f64, lng: f64) -> Self {
        Self::Coordinates { lat, lng }
    }

    pub fn address(address: impl Into<String>) -> Self {
        Self::Address {
            address: address.into(),
        }
    }

    pub fn format(&self) -> String {
        match self {
            Self::Coordinates { lat, lng } => format!("{lat},{lng}"),
            Self::Address { address } => address.clone(),
            Self::Unspecified {} => String::new(),
        }
    }

    /// The coordinate pair a routing request can be built from, read back out of the
    /// formatted text so an address written as `"lat,lng"` is accepted too.
    pub fn routable_coordinate(&self) -> Option<Coordinate> {
        Coordinate::parse(&self.format())
    }
}
