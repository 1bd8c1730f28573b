use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{api, config::Config, state::AppState};

/// The ranker points at a discard port: every ranking attempt fails fast,
/// which is exactly what the degradation tests need.
fn setup_app() -> axum::Router {
    let config = Config {
        server_port: 0,
        ranker_url: "http://127.0.0.1:9/v1/compare".to_string(),
        ranker_timeout_secs: 1,
    };
    let state = Arc::new(AppState::new(config));
    api::routes().with_state(state)
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

fn engagement_body() -> Value {
    json!({
        "threat": {
            "threat_class": "Shahed-136",
            "count": 5,
            "range_km": 25.0,
            "bearing_deg": 45,
            "altitude_m": 1200,
            "speed_kmh": 185.0,
            "target_description": "Port and power station",
            "target_priority": "Critical"
        },
        "assets": [
            {
                "class": "IRIS-T",
                "platforms": 2,
                "rounds_available": 6,
                "cost_per_shot": 500000,
                "effective_range_km": 40.0,
                "intrinsic_success_rate": 0.93,
                "reload_time_min": 720
            },
            {
                "class": "Interceptor Drone",
                "platforms": 4,
                "rounds_available": 4,
                "cost_per_shot": 5000,
                "effective_range_km": 20.0,
                "intrinsic_success_rate": 0.60,
                "reload_time_min": 30
            }
        ],
        "constraints": {
            "limited_ammunition": true,
            "weather": "Marginal",
            "expected_follow_on_waves": 0
        }
    })
}

async fn post_json(app: axum::Router, uri: &str, body: Value) -> axum::response::Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

#[tokio::test]
async fn health_reports_catalog_and_spec_table_sizes() {
    let app = setup_app();
    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["patterns"], 6);
    assert_eq!(body["asset_classes"], 8);
}

#[tokio::test]
async fn patterns_endpoint_lists_the_catalog() {
    let app = setup_app();
    let response = get(app, "/v1/patterns").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["count"], 6);
    let ids: Vec<&str> = body["patterns"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"immediate_premium"));
    assert!(ids.contains(&"ew_kinetic"));
}

#[tokio::test]
async fn asset_specs_endpoint_serves_the_reference_table() {
    let app = setup_app();
    let response = get(app, "/v1/asset-specs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["IRIS-T"]["unit_cost"], 500_000);
    assert_eq!(body["IRIS-T"]["optimal_range_km"], 25.0);
    assert_eq!(body["Helicopter"]["weather_sensitive"], true);
    // Untabulated classes are absent by design.
    assert!(body.get("Towed AA Gun").is_none());
}

#[tokio::test]
async fn invalid_kinematics_are_rejected_with_422() {
    let app = setup_app();
    let mut body = engagement_body();
    body["threat"]["speed_kmh"] = json!(0.0);

    let response = post_json(app, "/v1/engagements", body).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("invalid threat kinematics"));
}

#[tokio::test]
async fn ranker_outage_returns_the_generated_options() {
    let app = setup_app();
    let response = post_json(app, "/v1/engagements", engagement_body()).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert!(!body["error"].as_str().unwrap().is_empty());

    let options = body["generated_options"].as_array().unwrap();
    assert!(!options.is_empty());
    assert!(options
        .iter()
        .any(|option| option["pattern_id"] == "immediate_premium"));
    assert_eq!(body["options_generated"], options.len());
}

#[tokio::test]
async fn reference_scenario_replays_without_a_ranker() {
    let app = setup_app();
    let response = post_json(app, "/v1/scenarios/reference", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = read_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["options_generated"], 2);

    let ids: Vec<&str> = body["generated_options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|option| option["pattern_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["immediate_premium", "coordination_request"]);
}
