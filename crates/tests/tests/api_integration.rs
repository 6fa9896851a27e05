use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::extract::{Json, Query};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use smartroute_api::build_app;
use smartroute_core::weather::WEATHER_NOT_CONFIGURED;
use smartroute_core::AppConfig;
use tower::ServiceExt;

const ROUTING_KEY: &str = "ors-test-key";

/// Stands in for OpenRouteService, OpenWeatherMap and Ollama on a random local port.
async fn spawn_provider_stub() -> String {
    let app = Router::new()
        .route("/v2/directions/driving-car/geojson", post(stub_directions))
        .route("/geocode/search", get(stub_geocode))
        .route("/weather", get(stub_weather))
        .route("/api/generate", post(stub_generate));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });
    format!("http://{addr}")
}

async fn stub_directions(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(ROUTING_KEY) {
        return (StatusCode::FORBIDDEN, Json(json!({ "error": "bad key" })));
    }
    // A destination longitude of 0 means "unreachable".
    if body["coordinates"][1][0].as_f64() == Some(0.0) {
        return (StatusCode::OK, Json(json!({ "type": "FeatureCollection", "features": [] })));
    }

    let fastest = body["preference"] == "fastest";
    let duration = if fastest { 1500.0 } else { 3661.0 };
    (
        StatusCode::OK,
        Json(json!({
            "type": "FeatureCollection",
            "features": [{
                "properties": {
                    "summary": { "duration": duration, "distance": 12500.0 },
                    "segments": [{
                        "steps": [
                            { "instruction": "Head east on Tank Bund Road", "distance": 950.0, "duration": 59.0 },
                            { "instruction": "Arrive at Charminar", "distance": 0.0, "duration": 0.0 }
                        ]
                    }]
                },
                "geometry": { "coordinates": [[78.47, 17.41], [78.4747, 17.3616]] }
            }]
        })),
    )
}

async fn stub_geocode(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("size").map(String::as_str), Some("5"));
    assert_eq!(params.get("api_key").map(String::as_str), Some(ROUTING_KEY));
    let text = params.get("text").cloned().unwrap_or_default();
    Json(json!({
        "features": [
            {
                "properties": { "name": text, "formatted": "Hyderabad, Telangana, India" },
                "geometry": { "coordinates": [78.4747, 17.3616] }
            },
            {
                "properties": { "name": "Secondary", "formatted": "Secunderabad, India" },
                "geometry": { "coordinates": [78.5, 17.44] }
            }
        ]
    }))
}

async fn stub_weather(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    assert_eq!(params.get("units").map(String::as_str), Some("metric"));
    let city = match params.get("lat").map(String::as_str) {
        Some("17.385000") => "Hyderabad",
        _ => "Bengaluru",
    };
    Json(json!({
        "main": { "temp": 28.04, "humidity": 61 },
        "weather": [{ "description": "light rain" }],
        "name": city
    }))
}

async fn stub_generate(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    assert_eq!(body["stream"], false);
    assert!(body["options"]["num_predict"].is_u64());
    let prompt = body["prompt"].as_str().unwrap_or_default();
    if prompt.contains("explode") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" })));
    }
    let has_context = prompt.contains("Context: ");
    (
        StatusCode::OK,
        Json(json!({ "response": format!("Namaste! context={has_context}") })),
    )
}

fn config_for(stub: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.routing.api_key = Some(ROUTING_KEY.to_string());
    config.routing.base_url = format!("{stub}/v2");
    config.routing.geocoding_url = format!("{stub}/geocode/search");
    config.weather.api_key = Some("owm-test-key".to_string());
    config.weather.url = format!("{stub}/weather");
    config.text_generation.base_url = stub.to_string();
    config
}

async fn app() -> Router {
    let stub = spawn_provider_stub().await;
    build_app(config_for(&stub)).await.expect("app should build")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_uri(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn ask(app: Router, command: &str, context: Value) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/api/assistant/process",
            json!({ "command": command, "context": context }),
        ),
    )
    .await
}

#[tokio::test]
async fn health_reports_capabilities() {
    let (status, body) = send(app().await, get_uri("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["capabilities"]["routing"], true);
    assert_eq!(body["capabilities"]["weather"], true);
    assert_eq!(body["capabilities"]["text_generation_model"], "llama3.2");
}

#[tokio::test]
async fn non_object_context_still_gets_a_reply() {
    let (status, body) = ask(app().await, "stop", json!("x")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn navigation_command_names_the_destination() {
    let (status, body) = ask(app().await, "Take Me To  Charminar ", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["response"],
        "I'll help you navigate to Charminar. Let me get the route for you."
    );
}

#[tokio::test]
async fn stop_wins_over_weather() {
    let (_, body) = ask(app().await, "stop the weather update", json!(null)).await;
    assert_eq!(body["response"], "Stopped. How else can I help you?");
}

#[tokio::test]
async fn time_command_reports_clock() {
    let (_, body) = ask(app().await, "what time is it", json!({})).await;
    let text = body["response"].as_str().unwrap();
    assert!(text.starts_with("The current time is "));
    assert_eq!(text.len(), "The current time is HH:MM".len());
}

#[tokio::test]
async fn weather_uses_context_location_or_default() {
    let app = app().await;

    let (_, body) = ask(
        app.clone(),
        "How is the weather?",
        json!({ "location": { "lat": 12.97, "lng": 77.59 } }),
    )
    .await;
    assert_eq!(
        body["response"],
        "Current weather in Bengaluru: light rain, 28.0°C, 61% humidity"
    );

    let (_, body) = ask(app, "weather please", json!({})).await;
    assert_eq!(
        body["response"],
        "Current weather in Hyderabad: light rain, 28.0°C, 61% humidity"
    );
}

#[tokio::test]
async fn weather_without_key_is_not_configured() {
    let stub = spawn_provider_stub().await;
    let mut config = config_for(&stub);
    config.weather.api_key = None;
    let app = build_app(config).await.unwrap();

    let (status, body) = ask(
        app,
        "weather",
        json!({ "location": { "lat": 12.97, "lng": 77.59 } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], WEATHER_NOT_CONFIGURED);
}

#[tokio::test]
async fn telugu_markers_get_bilingual_replies() {
    let (_, body) = ask(app().await, "మీకు మార్గం తెలుసా", json!({})).await;
    assert_eq!(body["response"], "మీకు మార్గం చూపిస్తాను. (I'll show you the route.)");
}

#[tokio::test]
async fn general_questions_go_to_text_generation() {
    let app = app().await;

    let (status, body) = ask(app.clone(), "Tell me about Golconda", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Namaste! context=false");

    let (_, body) = ask(app, "Tell me about Golconda", json!({ "trip": "weekend" })).await;
    assert_eq!(body["response"], "Namaste! context=true");
}

#[tokio::test]
async fn text_generation_failure_is_an_error_reply() {
    let (status, body) = ask(app().await, "please explode", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["response"],
        "Sorry, I encountered an error: Ollama API request failed: 500"
    );
}

#[tokio::test]
async fn health_breaks_down_failures_by_provider() {
    let app = app().await;
    ask(app.clone(), "please explode", json!({})).await;

    let (_, body) = send(app, get_uri("/health")).await;
    let failures = &body["metrics"]["provider_failures"];
    assert_eq!(failures["text_generation"], 1);
    assert_eq!(failures["routing"], 0);
    assert_eq!(body["metrics"]["provider_failures_total"], 1);
}

#[tokio::test]
async fn route_exposes_turn_by_turn_steps() {
    let (status, body) = send(
        app().await,
        post_json(
            "/api/navigation/route",
            json!({
                "origin": { "lat": 17.41, "lng": 78.47 },
                "destination": { "lat": 17.3616, "lng": 78.4747 }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], "1 hr 1 min");
    assert_eq!(body["distance"], "12.5 km");
    assert!(body["error"].is_null());
    assert_eq!(
        body["steps"],
        json!([
            { "instruction": "Head east on Tank Bund Road", "distance": "950 m", "duration": "0 min" },
            { "instruction": "Arrive at Charminar", "distance": "0 m", "duration": "0 min" }
        ])
    );
    assert_eq!(body["polyline"][1], json!({ "lat": 17.3616, "lng": 78.4747 }));
    assert_eq!(body["route"]["summary"], "Route via OpenRouteService");
}

#[tokio::test]
async fn reroute_asks_for_fastest_and_carries_note() {
    let (status, body) = send(
        app().await,
        post_json(
            "/api/navigation/reroute",
            json!({
                "origin": { "lat": 17.41, "lng": 78.47 },
                "destination": { "address": "17.3616,78.4747" }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["duration"], "25 min");
    assert_eq!(
        body["error"],
        "Route recalculated due to traffic or road conditions."
    );
}

#[tokio::test]
async fn empty_feature_list_is_no_route_found() {
    let (status, body) = send(
        app().await,
        post_json(
            "/api/navigation/route",
            json!({
                "origin": { "lat": 17.41, "lng": 78.47 },
                "destination": { "lat": 0.0, "lng": 0.0 }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("No route found"));
}

#[tokio::test]
async fn address_only_location_is_rejected() {
    let (status, body) = send(
        app().await,
        post_json(
            "/api/navigation/route",
            json!({
                "origin": { "address": "Hitech City" },
                "destination": { "lat": 17.3616, "lng": 78.4747 }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to get route: origin has no usable coordinates"));
}

#[tokio::test]
async fn wrong_routing_key_surfaces_provider_status() {
    let stub = spawn_provider_stub().await;
    let mut config = config_for(&stub);
    config.routing.api_key = Some("stale".to_string());
    let app = build_app(config).await.unwrap();

    let (status, body) = send(
        app,
        post_json(
            "/api/navigation/route",
            json!({
                "origin": { "lat": 17.41, "lng": 78.47 },
                "destination": { "lat": 17.3616, "lng": 78.4747 }
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Failed to get route: OpenRouteService API request failed: 403"
    );
}

#[tokio::test]
async fn geocode_returns_places_in_lat_lng_order() {
    let (status, body) = send(
        app().await,
        get_uri("/api/navigation/geocode?query=Charminar"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert_eq!(body["places"].as_array().unwrap().len(), 2);
    assert_eq!(
        body["places"][0],
        json!({
            "name": "Charminar",
            "address": "Hyderabad, Telangana, India",
            "lat": 17.3616,
            "lng": 78.4747
        })
    );
}

#[tokio::test]
async fn nearby_is_a_synthesized_geocode_query() {
    let (status, body) = send(
        app().await,
        get_uri("/api/navigation/nearby?lat=17.385&lng=78.4867&type=cafe"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["places"][0]["name"], "cafe near 17.385000,78.486700");

    let (_, body) = send(
        app().await,
        get_uri("/api/navigation/nearby?lat=17.385&lng=78.4867"),
    )
    .await;
    assert_eq!(body["places"][0]["name"], "restaurant near 17.385000,78.486700");
}

#[tokio::test]
async fn translate_endpoint_uses_phrase_table() {
    let (status, body) = send(
        app().await,
        post_json(
            "/api/assistant/translate",
            json!({ "text": "Destination reached!", "target": "telugu" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translation"], "గమ్యం చేరుకున్నారు");
}

#[tokio::test]
async fn translate_endpoint_accepts_language_codes() {
    let (status, body) = send(
        app().await,
        post_json(
            "/api/assistant/translate",
            json!({ "text": "ఎడమవైపు తీసుకో", "target": "en" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translation"], "take left");
    assert_eq!(body["target"], "english");
}
