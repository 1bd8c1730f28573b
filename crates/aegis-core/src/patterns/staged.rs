//! Staged economical-then-premium engagement: try interceptor drones at
//! standoff range, hold a moderate missile layer in reserve.

use super::{layered_or, pct, PatternContext, PatternParams, ResponsePattern};
use crate::models::{AssetClass, TargetPriority};
use serde::Serialize;

/// Range beyond which there is enough geometry to stage a drone layer
/// before committing missiles.
pub const STANDOFF_RANGE_KM: f64 = 15.0;

/// Fraction of the current range at which the drone layer intercepts.
const DRONE_RANGE_FACTOR: f64 = 0.7;
/// Fraction of the current range at which the missile backup engages.
const BACKUP_RANGE_FACTOR: f64 = 0.4;

/// Priority 2 doctrine: high-value target far enough out to spend cheap
/// interceptors first and save missiles for leakers.
pub struct StagedIntercept;

#[derive(Debug, Clone, Serialize)]
pub struct StagedInterceptParams {
    pub drone_system: String,
    pub drone_count: u32,
    pub drone_launch_min: u32,
    pub drone_cost: u64,
    pub drone_success_pct: u8,
    pub backup_system: String,
    pub backup_count: u32,
    pub backup_range_km: f64,
    pub backup_cost: u64,
    pub threat_count: u32,
    pub threat_label: String,
    /// Worst-case total: both layers fire.
    pub cost: u64,
    pub success_pct: u8,
    pub assets: Vec<String>,
}

impl ResponsePattern for StagedIntercept {
    fn id(&self) -> &'static str {
        "staged_intercept"
    }

    fn title(&self) -> &'static str {
        "Priority 2: Interceptor drones first, missiles in reserve"
    }

    fn applies(&self, ctx: &PatternContext<'_>) -> bool {
        ctx.threat.priority == TargetPriority::High
            && ctx.threat.range_km > STANDOFF_RANGE_KM
            && ctx
                .summary
                .classes_present
                .contains(&AssetClass::InterceptorDrone)
    }

    fn compute(&self, ctx: &PatternContext<'_>) -> Option<PatternParams> {
        let drone = ctx.tiers.interceptor_drones().next()?;
        let backup = ctx.tiers.moderate.first()?;
        let threat = ctx.threat;

        let drone_count = threat.count.max(2).min(drone.rounds_available);
        let backup_count = (threat.count / 2).max(2).min(backup.rounds_available);

        let p_drone = ctx.specs.kill_probability(
            drone.class,
            threat.range_km * DRONE_RANGE_FACTOR,
            threat.class,
            ctx.constraints.weather,
        );
        let p_backup = ctx.specs.kill_probability(
            backup.class,
            threat.range_km * BACKUP_RANGE_FACTOR,
            threat.class,
            ctx.constraints.weather,
        );
        // Drones succeed, or drones fail and the missiles succeed.
        let combined = layered_or(p_drone, p_backup);

        let drone_cost = drone.cost_per_shot * u64::from(drone_count);
        let backup_cost = backup.cost_per_shot * u64::from(backup_count);

        Some(PatternParams::StagedIntercept(StagedInterceptParams {
            drone_system: drone.class.label().to_string(),
            drone_count,
            drone_launch_min: 3,
            drone_cost,
            drone_success_pct: pct(p_drone),
            backup_system: backup.class.label().to_string(),
            backup_count,
            backup_range_km: threat.range_km * BACKUP_RANGE_FACTOR,
            backup_cost,
            threat_count: threat.count,
            threat_label: threat.class.label().to_string(),
            cost: drone_cost + backup_cost,
            success_pct: pct(combined),
            assets: vec![
                drone.class.label().to_string(),
                backup.class.label().to_string(),
            ],
        }))
    }
}
