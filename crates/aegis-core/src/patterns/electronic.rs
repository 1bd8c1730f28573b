//! Electronic-warfare suppression with a kinetic backup, for threats that
//! depend on satellite navigation or an RF control link.

use super::{cumulative_success, pct, PatternContext, PatternParams, ResponsePattern};
use crate::models::AssetClass;
use serde::Serialize;

/// Fixed success estimate for the jamming layer: a reusable capability
/// with zero marginal cost per engagement.
pub const EW_SUCCESS_PROBABILITY: f64 = 0.75;

/// Fraction of the current range at which the kinetic backup engages.
const KINETIC_RANGE_FACTOR: f64 = 0.5;

pub struct EwPlusKinetic;

#[derive(Debug, Clone, Serialize)]
pub struct EwKineticParams {
    pub threat_label: String,
    pub ew_success_pct: u8,
    pub kinetic_system: String,
    pub kinetic_count: u32,
    pub kinetic_cost: u64,
    pub kinetic_success_pct: u8,
    pub backup_system: String,
    pub combined_success_pct: u8,
    /// The jamming layer is free; only the kinetic layer is billed.
    pub cost: u64,
    pub success_pct: u8,
    pub assets: Vec<String>,
}

impl ResponsePattern for EwPlusKinetic {
    fn id(&self) -> &'static str {
        "ew_kinetic"
    }

    fn title(&self) -> &'static str {
        "EW suppression plus kinetic backup"
    }

    fn applies(&self, ctx: &PatternContext<'_>) -> bool {
        ctx.threat.class.ew_vulnerable()
            && ctx
                .summary
                .classes_present
                .contains(&AssetClass::EwSuppressor)
    }

    fn compute(&self, ctx: &PatternContext<'_>) -> Option<PatternParams> {
        let threat = ctx.threat;
        // The suppressor is never its own kinetic backup.
        let cheapest_kinetic = ctx
            .tiers
            .economical
            .iter()
            .find(|asset| asset.class != AssetClass::EwSuppressor);
        let kinetic = ctx.tiers.moderate.first().or(cheapest_kinetic)?;

        let kinetic_count = (threat.count / 2).max(2).min(kinetic.rounds_available);
        let p_kinetic = ctx.specs.kill_probability(
            kinetic.class,
            threat.range_km * KINETIC_RANGE_FACTOR,
            threat.class,
            ctx.constraints.weather,
        );
        let combined = cumulative_success(&[EW_SUCCESS_PROBABILITY, p_kinetic]);

        let backup = cheapest_kinetic.unwrap_or(kinetic);
        let kinetic_cost = kinetic.cost_per_shot * u64::from(kinetic_count);

        Some(PatternParams::EwKinetic(EwKineticParams {
            threat_label: threat.class.label().to_string(),
            ew_success_pct: pct(EW_SUCCESS_PROBABILITY),
            kinetic_system: kinetic.class.label().to_string(),
            kinetic_count,
            kinetic_cost,
            kinetic_success_pct: pct(p_kinetic),
            backup_system: backup.class.label().to_string(),
            combined_success_pct: pct(combined),
            cost: kinetic_cost,
            success_pct: pct(combined),
            assets: vec![
                AssetClass::EwSuppressor.label().to_string(),
                kinetic.class.label().to_string(),
            ],
        }))
    }
}
