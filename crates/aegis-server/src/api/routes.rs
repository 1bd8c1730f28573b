//! REST API routes.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::scenario;
use crate::state::AppState;
use aegis_core::{
    AssetAvailability, Constraints, EngagementReport, RankingOutcome, Threat, ThreatReport,
};

/// Create the API router.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/v1/engagements", post(process_engagement))
        .route("/v1/patterns", get(list_patterns))
        .route("/v1/asset-specs", get(asset_specs))
        .route("/v1/scenarios/reference", post(scenario::replay_reference))
}

// === Request types ===

#[derive(Debug, Deserialize)]
pub struct EngagementRequest {
    pub threat: ThreatReport,
    pub assets: Vec<AssetAvailability>,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub commander_context: String,
}

// === Handlers ===

async fn root() -> Json<Value> {
    Json(json!({
        "service": "aegis",
        "status": "operational",
        "endpoints": [
            "POST /v1/engagements - process a tactical scenario",
            "GET /v1/patterns - list response patterns",
            "GET /v1/asset-specs - asset specification table",
            "POST /v1/scenarios/reference - replay the reference scenario",
            "GET /health - service health check",
        ],
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "patterns": state.engine.catalog().len(),
        "asset_classes": state.engine.specs().len(),
        "ranker_url": state.config.ranker_url,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Process a battery-level tactical scenario and return ranked
/// recommendations, or the unranked options when the ranker is down.
async fn process_engagement(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<EngagementRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let threat = Threat::try_from(payload.threat).map_err(|err| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": err.to_string() })),
        )
    })?;

    let report = state
        .engine
        .process(
            &state.ranker,
            &threat,
            &payload.assets,
            &payload.constraints,
            &payload.commander_context,
        )
        .await;

    Ok(engagement_response(report))
}

/// Render an engagement report as an HTTP response. Ranker failure maps to
/// 502 and still carries every generated option.
pub(crate) fn engagement_response(report: EngagementReport) -> (StatusCode, Json<Value>) {
    let EngagementReport {
        generation_time_ms,
        ranker_latency_ms,
        total_time_ms,
        options_generated,
        query,
        threat_summary,
        outcome,
    } = report;

    match outcome {
        RankingOutcome::Ranked {
            recommendations,
            unmatched_results,
        } => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "generation_time_ms": generation_time_ms,
                "ranker_latency_ms": ranker_latency_ms,
                "total_time_ms": total_time_ms,
                "options_generated": options_generated,
                "ranked_recommendations": recommendations,
                "unmatched_results": unmatched_results,
                "threat_summary": threat_summary,
                "query": query,
            })),
        ),
        RankingOutcome::RankerUnavailable { reason, options } => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "success": false,
                "error": reason,
                "generation_time_ms": generation_time_ms,
                "ranker_latency_ms": ranker_latency_ms,
                "total_time_ms": total_time_ms,
                "options_generated": options_generated,
                "generated_options": options,
                "threat_summary": threat_summary,
            })),
        ),
    }
}

async fn list_patterns(State(state): State<Arc<AppState>>) -> Json<Value> {
    let patterns: Vec<Value> = state
        .engine
        .catalog()
        .iter()
        .map(|pattern| json!({ "id": pattern.id(), "title": pattern.title() }))
        .collect();

    Json(json!({
        "count": patterns.len(),
        "patterns": patterns,
    }))
}

async fn asset_specs(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, Value>> {
    let specs = state
        .engine
        .specs()
        .iter()
        .map(|(class, spec)| {
            (
                class.label().to_string(),
                serde_json::to_value(spec).unwrap_or(Value::Null),
            )
        })
        .collect();

    Json(specs)
}
