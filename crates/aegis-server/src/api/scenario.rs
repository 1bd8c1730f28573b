//! Replay of the fixed historical reference scenario.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::api::routes::engagement_response;
use crate::state::AppState;
use aegis_core::scenario::{recorded_outcome, reference_scenario};
use aegis_core::{RankingOutcome, Threat};

/// Run the recorded October 19 2024 raid through the current engine and
/// compare the top recommendation against what was actually done.
pub async fn replay_reference(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let scenario = reference_scenario();
    let threat = Threat::try_from(scenario.threat).map_err(|err| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
    })?;

    let report = state
        .engine
        .process(
            &state.ranker,
            &threat,
            &scenario.roster,
            &scenario.constraints,
            &scenario.commander_context,
        )
        .await;

    let validation = validation_block(&report.outcome);
    let (status, Json(mut body)) = engagement_response(report);
    if let Some(validation) = validation {
        body["validation"] = validation;
    }

    Ok((status, Json(body)))
}

/// Compare the top ranked recommendation with the recorded execution.
fn validation_block(outcome: &RankingOutcome) -> Option<Value> {
    let RankingOutcome::Ranked { recommendations, .. } = outcome else {
        return None;
    };
    let top = recommendations.first()?;
    let actual = recorded_outcome();

    let savings = actual.cost_usd as i64 - top.estimated_cost as i64;
    let savings_pct = if savings > 0 {
        (savings as f64 / actual.cost_usd as f64 * 1000.0).round() / 10.0
    } else {
        0.0
    };

    Some(json!({
        "recommended": {
            "cost": top.estimated_cost,
            "predicted_success_pct": top.estimated_success_pct,
            "systems": top.assets_used,
        },
        "actual_execution": actual,
        "analysis": {
            "cost_difference_usd": savings,
            "cost_savings_pct": savings_pct,
            "success_rate_comparison": format!(
                "Predicted: {}% vs actual: {}%",
                top.estimated_success_pct, actual.success_pct
            ),
        },
    }))
}
