use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{body::Body, Router};
use serde::Serialize;
use smartroute_agents::{Agents, AssistantAgent, NavigationAgent};
use smartroute_core::geocode::{DEFAULT_NEARBY_KIND, DEFAULT_NEARBY_RADIUS_METERS};
use smartroute_core::location::DEFAULT_COORDINATE;
use smartroute_core::route::NO_ROUTE_FOUND;
use smartroute_core::{
    AppConfig, CommandRequest, CommandResponse, Coordinate, GeocodeQuery, Lookup,
    NavigationError, NavigationRequest, NearbyQuery, PlacesResponse, RouteResponse, RouteSummary,
    TranslateRequest, TranslateResponse,
};
use smartroute_observability::{AppMetrics, MetricsSnapshot};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct ApiState {
    pub assistant: Arc<AssistantAgent>,
    pub navigation: Arc<NavigationAgent>,
    pub metrics: Arc<AppMetrics>,
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: MetricsSnapshot,
    capabilities: HealthCapabilities,
}

#[derive(Debug, Serialize)]
struct HealthCapabilities {
    routing: bool,
    weather: bool,
    text_generation_model: String,
}

pub async fn build_app(config: AppConfig) -> Result<Router> {
    let metrics = AppMetrics::shared();
    let agents = Agents::from_config(&config, metrics.clone())
        .context("failed to initialize provider clients")?;

    let state = ApiState {
        assistant: agents.assistant,
        navigation: agents.navigation,
        metrics,
        config: Arc::new(config),
    };

    Ok(build_router(state))
}

pub fn build_router(state: ApiState) -> Router {
    let body_limit = state.config.body_limit_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/api/assistant/process", post(assistant_process))
        .route("/api/assistant/translate", post(assistant_translate))
        .route(
            "/api/assistant/health",
            get(assistant_health).post(assistant_health),
        )
        .route("/api/assistant/status", get(assistant_status))
        .route("/api/navigation/route", post(navigation_route))
        .route("/api/navigation/reroute", post(navigation_reroute))
        .route("/api/navigation/geocode", get(navigation_geocode))
        .route("/api/navigation/nearby", get(navigation_nearby))
        .route(
            "/api/navigation/current-location",
            get(navigation_current_location),
        )
        .route("/api/navigation/health", get(navigation_health))
        .route("/api/test/ping", get(test_ping))
        .route("/api/test/echo", post(test_echo))
        .layer(build_cors_layer())
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
        capabilities: HealthCapabilities {
            routing: state.navigation.is_configured(),
            weather: state.assistant.weather().is_configured(),
            text_generation_model: state.assistant.generator().model().to_string(),
        },
    };
    (StatusCode::OK, Json(payload))
}

async fn assistant_process(
    State(state): State<ApiState>,
    Json(request): Json<CommandRequest>,
) -> Response {
    let context = request.context.unwrap_or_default();

    match state.assistant.process(&request.command, &context).await {
        Ok(reply) => (StatusCode::OK, Json(CommandResponse::success(reply))).into_response(),
        Err(error) => (
            StatusCode::BAD_REQUEST,
            Json(CommandResponse::failure(error)),
        )
            .into_response(),
    }
}

async fn assistant_translate(
    State(state): State<ApiState>,
    Json(request): Json<TranslateRequest>,
) -> impl IntoResponse {
    let translation = state.assistant.translate(&request.text, request.target);
    (
        StatusCode::OK,
        Json(TranslateResponse {
            translation,
            target: request.target,
        }),
    )
}

async fn assistant_health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "SmartRoute Buddy Assistant"
        })),
    )
}

async fn assistant_status(State(state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "active",
            "version": SERVICE_VERSION,
            "features": {
                "navigation": state.navigation.is_configured(),
                "ai_integration": true,
                "weather_integration": state.assistant.weather().is_configured(),
                "telugu_support": true
            }
        })),
    )
}

async fn navigation_route(
    State(state): State<ApiState>,
    Json(request): Json<NavigationRequest>,
) -> Response {
    let outcome = state
        .navigation
        .route(&request.origin, &request.destination)
        .await;
    route_reply(outcome, "Failed to get route")
}

async fn navigation_reroute(
    State(state): State<ApiState>,
    Json(request): Json<NavigationRequest>,
) -> Response {
    let outcome = state
        .navigation
        .reroute(&request.origin, &request.destination)
        .await;
    route_reply(outcome, "Failed to reroute")
}

fn route_reply(
    outcome: Result<Lookup<RouteSummary>, NavigationError>,
    failure_prefix: &str,
) -> Response {
    match outcome {
        Ok(Lookup::Found(summary)) => {
            (StatusCode::OK, Json(RouteResponse::from(summary))).into_response()
        }
        Ok(Lookup::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(RouteResponse::failed(format!(
                "{failure_prefix}: {NO_ROUTE_FOUND}"
            ))),
        )
            .into_response(),
        Err(error) => (
            StatusCode::BAD_REQUEST,
            Json(RouteResponse::failed(format!("{failure_prefix}: {error}"))),
        )
            .into_response(),
    }
}

async fn navigation_geocode(
    State(state): State<ApiState>,
    Query(query): Query<GeocodeQuery>,
) -> Response {
    match state.navigation.geocode(&query.query).await {
        Ok(places) => (StatusCode::OK, Json(PlacesResponse::ok(places))).into_response(),
        Err(error) => failure_json(format!("Failed to geocode: {error}")),
    }
}

async fn navigation_nearby(
    State(state): State<ApiState>,
    Query(query): Query<NearbyQuery>,
) -> Response {
    let kind = query
        .kind
        .as_deref()
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .unwrap_or(DEFAULT_NEARBY_KIND);
    let radius = query.radius.unwrap_or(DEFAULT_NEARBY_RADIUS_METERS);

    match state
        .navigation
        .nearby(Coordinate::new(query.lat, query.lng), kind, radius)
        .await
    {
        Ok(places) => (StatusCode::OK, Json(PlacesResponse::ok(places))).into_response(),
        Err(error) => failure_json(format!("Failed to get nearby places: {error}")),
    }
}

async fn navigation_current_location() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "lat": DEFAULT_COORDINATE.lat,
            "lng": DEFAULT_COORDINATE.lng,
            "accuracy": 10.0,
            "timestamp": chrono::Utc::now().timestamp_millis()
        })),
    )
}

async fn navigation_health(State(state): State<ApiState>) -> impl IntoResponse {
    let routing = if state.navigation.is_configured() {
        "available"
    } else {
        "not_configured"
    };
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "Navigation Service",
            "apis": {
                "openroute": routing,
                "geocoding": routing,
                "routing": routing
            }
        })),
    )
}

async fn test_ping() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "pong",
            "timestamp": chrono::Utc::now().timestamp_millis(),
            "status": "success"
        })),
    )
}

async fn test_echo(Json(data): Json<serde_json::Value>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "echo",
            "data": data,
            "timestamp": chrono::Utc::now().timestamp_millis(),
            "status": "success"
        })),
    )
}

fn failure_json(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn security_headers_middleware(request: axum::http::Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;

    response.headers_mut().insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response.headers_mut().insert(
        header::HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}
