pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod geocode;
pub mod intent;
pub mod location;
pub mod models;
pub mod phrases;
pub mod route;
pub mod weather;

pub use config::AppConfig;
pub use context::CommandContext;
pub use error::{ConfigError, Lookup, NavigationError, ProviderError};
pub use format::{format_distance, format_duration};
pub use geocode::{nearby_query, parse_places, Place};
pub use intent::{build_prompt, classify_intent};
pub use location::{Coordinate, Location};
pub use models::*;
pub use phrases::{translate, Language};
pub use route::{normalize, RoutePreference, RouteStep, RouteSummary, Step};
