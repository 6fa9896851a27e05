use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use smartroute_core::config::RoutingConfig;
use smartroute_core::geocode::GEOCODE_RESULT_LIMIT;
use smartroute_core::route::{DirectionsRequest, REROUTE_NOTE, ROUTING_PROFILE};
use smartroute_core::{
    nearby_query, normalize, parse_places, Coordinate, Location, Lookup, NavigationError, Place,
    ProviderError, RoutePreference, RouteSummary,
};
use smartroute_observability::{AppMetrics, Provider};
use tracing::{info, instrument, warn};

use crate::http::fetch_json;

const PROVIDER: &str = "OpenRouteService";
const GEOCODING_PROVIDER: &str = "Geocoding API";

/// Directions and place search against OpenRouteService.
#[derive(Clone)]
pub struct NavigationAgent {
    client: Client,
    config: RoutingConfig,
    metrics: Arc<AppMetrics>,
}

impl NavigationAgent {
    pub fn new(client: Client, config: RoutingConfig, metrics: Arc<AppMetrics>) -> Self {
        Self {
            client,
            config,
            metrics,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn route(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<Lookup<RouteSummary>, NavigationError> {
        self.directions(origin, destination, RoutePreference::Recommended)
            .await
    }

    /// Same lookup as [`Self::route`] with the provider's fastest preference and a
    /// note explaining the recalculation.
    pub async fn reroute(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<Lookup<RouteSummary>, NavigationError> {
        let route = self
            .directions(origin, destination, RoutePreference::Fastest)
            .await?;
        Ok(route.map(|summary| summary.with_note(REROUTE_NOTE)))
    }

    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Vec<Place>, ProviderError> {
        self.metrics.inc_navigation();
        let api_key = self.api_key(GEOCODING_PROVIDER)?;

        let request = self.client.get(&self.config.geocoding_url).query(&[
            ("api_key", api_key.to_string()),
            ("text", query.to_string()),
            ("size", GEOCODE_RESULT_LIMIT.to_string()),
        ]);
        let payload = self.tracked(
            Provider::Geocoding,
            fetch_json(GEOCODING_PROVIDER, request).await,
        )?;

        let places = parse_places(&payload);
        info!(places = places.len(), "geocode resolved");
        Ok(places)
    }

    /// Proximity search expressed as a text query; `radius_meters` is not sent.
    pub async fn nearby(
        &self,
        center: Coordinate,
        kind: &str,
        radius_meters: u32,
    ) -> Result<Vec<Place>, ProviderError> {
        info!(kind, radius_meters, "nearby search");
        self.geocode(&nearby_query(kind, center)).await
    }

    #[instrument(skip(self, origin, destination))]
    async fn directions(
        &self,
        origin: &Location,
        destination: &Location,
        preference: RoutePreference,
    ) -> Result<Lookup<RouteSummary>, NavigationError> {
        self.metrics.inc_navigation();
        let from = routable("origin", origin)?;
        let to = routable("destination", destination)?;
        let api_key = self.api_key(PROVIDER)?;

        let request = self
            .client
            .post(format!(
                "{}/directions/{}/geojson",
                self.config.base_url, ROUTING_PROFILE
            ))
            .header(AUTHORIZATION, api_key)
            .json(&DirectionsRequest::new(from, to, preference));
        let payload = self.tracked(Provider::Routing, fetch_json(PROVIDER, request).await)?;

        let route = normalize(&payload);
        match &route {
            Lookup::Found(summary) => info!(
                duration = %summary.duration_text,
                distance = %summary.distance_text,
                steps = summary.steps.len(),
                "route resolved"
            ),
            Lookup::NotFound => warn!("provider returned no route"),
        }
        Ok(route)
    }

    fn api_key(&self, provider: &'static str) -> Result<&str, ProviderError> {
        self.config
            .api_key
            .as_deref()
            .ok_or(ProviderError::NotConfigured { provider })
    }

    fn tracked<T>(
        &self,
        provider: Provider,
        result: Result<T, ProviderError>,
    ) -> Result<T, ProviderError> {
        if let Err(error) = &result {
            self.metrics.inc_provider_failure(provider);
            warn!(error = %error, "navigation provider call failed");
        }
        result
    }
}

fn routable(field: &'static str, location: &Location) -> Result<Coordinate, NavigationError> {
    location
        .routable_coordinate()
        .ok_or_else(|| NavigationError::InvalidLocation {
            field,
            value: location.format(),
        })
}
