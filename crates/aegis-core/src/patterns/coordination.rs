//! Higher-echelon coordination request, driven by resource insufficiency
//! or sustainment risk rather than threat priority.

use super::{PatternContext, PatternParams, ResponsePattern};
use serde::Serialize;

/// Nominal success figure for a coordinated engagement; the real outcome
/// depends on what the brigade can commit.
const COORDINATED_SUCCESS_PCT: u8 = 70;

pub struct CoordinationRequest;

#[derive(Debug, Clone, Serialize)]
pub struct CoordinationParams {
    pub local_allocation: String,
    pub reserve_pct: u8,
    pub support_sources: String,
    pub response_time_min: u32,
    pub expected_support: String,
    pub follow_on_waves: u32,
    pub total_rounds: u32,
    pub threat_range_km: f64,
    pub cost: u64,
    pub success_pct: u8,
    pub assets: Vec<String>,
}

impl ResponsePattern for CoordinationRequest {
    fn id(&self) -> &'static str {
        "coordination_request"
    }

    fn title(&self) -> &'static str {
        "Request brigade-level coordination"
    }

    fn applies(&self, ctx: &PatternContext<'_>) -> bool {
        // Strictly fewer rounds than two per threat, or a sustained raid.
        ctx.summary.total_rounds < ctx.threat.count * 2
            || ctx.constraints.expected_follow_on_waves > 1
    }

    fn compute(&self, ctx: &PatternContext<'_>) -> Option<PatternParams> {
        let minimal = ctx.tiers.cheapest_available()?;

        Some(PatternParams::Coordination(CoordinationParams {
            local_allocation: format!("1x {}", minimal.class.label()),
            reserve_pct: 90,
            support_sources: "Adjacent batteries, brigade reserve, EW support".to_string(),
            response_time_min: 3,
            expected_support: "Coordinated allocation of interceptors across the sector"
                .to_string(),
            follow_on_waves: ctx.constraints.expected_follow_on_waves,
            total_rounds: ctx.summary.total_rounds,
            threat_range_km: ctx.threat.range_km,
            cost: minimal.cost_per_shot,
            success_pct: COORDINATED_SUCCESS_PCT,
            assets: vec!["Coordination".to_string()],
        }))
    }
}
