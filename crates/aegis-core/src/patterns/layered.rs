//! Three-tier layered defense: cheapest assets engage first at long range,
//! progressively more capable layers catch the leakers.

use super::{cumulative_success, pct, PatternContext, PatternParams, ResponsePattern};
use crate::models::{AssetAvailability, TargetPriority};
use crate::summary::LAYERING_COST_CEILING;
use serde::Serialize;

/// Simulated intercept geometry: fractions of the current range at which
/// each successive layer engages.
const LAYER_RANGE_FACTORS: [f64; 3] = [0.5, 0.35, 0.2];

/// Priority 3 doctrine: medium-value target, spend cheap systems in depth
/// and keep missiles for future waves.
pub struct LayeredDefense;

#[derive(Debug, Clone, Serialize)]
pub struct LayerPlan {
    pub system: String,
    pub range_km: f64,
    pub rounds: u32,
    pub cost: u64,
    pub success_pct: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayeredDefenseParams {
    /// Exactly three layers after padding.
    pub layers: Vec<LayerPlan>,
    /// Layer 1 alone.
    pub min_cost: u64,
    /// All three layers fire.
    pub max_cost: u64,
    pub cumulative_success_pct: u8,
    /// Typical case: the first two layers fire.
    pub cost: u64,
    pub success_pct: u8,
    pub assets: Vec<String>,
}

impl ResponsePattern for LayeredDefense {
    fn id(&self) -> &'static str {
        "layered_defense"
    }

    fn title(&self) -> &'static str {
        "Priority 3: Layered economical defense"
    }

    fn applies(&self, ctx: &PatternContext<'_>) -> bool {
        matches!(
            ctx.threat.priority,
            TargetPriority::Medium | TargetPriority::High
        ) && ctx
            .roster
            .iter()
            .filter(|asset| asset.cost_per_shot < LAYERING_COST_CEILING)
            .count()
            >= 2
    }

    fn compute(&self, ctx: &PatternContext<'_>) -> Option<PatternParams> {
        let threat = ctx.threat;

        // Cheapest-to-dearest ladder from whatever tiers are populated.
        let mut picks: Vec<&AssetAvailability> = Vec::with_capacity(3);
        if let Some(asset) = ctx.tiers.economical.first() {
            picks.push(asset);
        }
        if let Some(asset) = ctx.tiers.moderate.first() {
            picks.push(asset);
        }
        if let Some(asset) = ctx.tiers.premium.first() {
            picks.push(asset);
        }
        if picks.len() < 2 {
            return None;
        }
        // Pad by repeating the last available layer.
        while picks.len() < 3 {
            let last = *picks.last().expect("at least two layers");
            picks.push(last);
        }

        let count_floors = [threat.count.max(2), (threat.count / 2).max(1), (threat.count / 3).max(1)];

        let mut layers = Vec::with_capacity(3);
        let mut probabilities = [0.0f64; 3];
        for (i, asset) in picks.iter().enumerate() {
            let range_km = threat.range_km * LAYER_RANGE_FACTORS[i];
            let rounds = count_floors[i].min(asset.rounds_available);
            let p = ctx.specs.kill_probability(
                asset.class,
                range_km,
                threat.class,
                ctx.constraints.weather,
            );
            probabilities[i] = p;
            layers.push(LayerPlan {
                system: asset.class.label().to_string(),
                range_km,
                rounds,
                cost: asset.cost_per_shot * u64::from(rounds),
                success_pct: pct(p),
            });
        }

        let cumulative = cumulative_success(&probabilities);
        let min_cost = layers[0].cost;
        let typical_cost = layers[0].cost + layers[1].cost;
        let max_cost = typical_cost + layers[2].cost;
        let assets = layers.iter().map(|layer| layer.system.clone()).collect();

        Some(PatternParams::LayeredDefense(LayeredDefenseParams {
            layers,
            min_cost,
            max_cost,
            cumulative_success_pct: pct(cumulative),
            cost: typical_cost,
            success_pct: pct(cumulative),
            assets,
        }))
    }
}
