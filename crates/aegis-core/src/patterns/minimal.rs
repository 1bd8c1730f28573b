//! Minimal economical defense for low-priority targets: accept calculated
//! risk, spend no missiles.

use super::{layered_or, pct, PatternContext, PatternParams, ResponsePattern};
use crate::models::{TargetPriority, Weather};
use serde::Serialize;

/// Mobile fire groups engage at point-defense distance regardless of the
/// threat's current range.
const POINT_DEFENSE_RANGE_KM: f64 = 2.0;
/// Fraction of the current range at which interceptor drones engage.
const DRONE_RANGE_FACTOR: f64 = 0.6;

/// Priority 4 doctrine: low-value target, economical systems only, every
/// missile stays in reserve for critical threats.
pub struct MinimalDefense;

#[derive(Debug, Clone, Serialize)]
pub struct MinimalDefenseParams {
    /// Roster entries of each economical class, not rounds.
    pub mobile_units: u32,
    pub drone_units: u32,
    /// Zero when the weather grounds them.
    pub helicopter_units: u32,
    pub target_description: String,
    pub follow_on_waves: u32,
    pub threat_count: u32,
    /// Threats expected to leak through, at least one.
    pub acceptable_losses: u32,
    pub cost: u64,
    pub success_pct: u8,
    pub assets: Vec<String>,
}

impl ResponsePattern for MinimalDefense {
    fn id(&self) -> &'static str {
        "minimal_defense"
    }

    fn title(&self) -> &'static str {
        "Priority 4: Minimal defense, accepted risk"
    }

    fn applies(&self, ctx: &PatternContext<'_>) -> bool {
        ctx.threat.priority == TargetPriority::Low
    }

    fn compute(&self, ctx: &PatternContext<'_>) -> Option<PatternParams> {
        let threat = ctx.threat;
        let mobile: Vec<_> = ctx.tiers.mobile_groups().collect();
        let drones: Vec<_> = ctx.tiers.interceptor_drones().collect();
        let helicopters = if ctx.constraints.weather == Weather::Nominal {
            ctx.tiers.helicopters().count() as u32
        } else {
            0
        };

        if mobile.is_empty() && drones.is_empty() {
            return None;
        }

        let mut cost = 0u64;
        let mut combined = 0.0f64;
        if let Some(group) = mobile.first() {
            let rounds = threat.count.min(group.rounds_available);
            cost += group.cost_per_shot * u64::from(rounds);
            combined = ctx.specs.kill_probability(
                group.class,
                POINT_DEFENSE_RANGE_KM,
                threat.class,
                ctx.constraints.weather,
            );
        }
        if let Some(drone) = drones.first() {
            let rounds = threat.count.min(drone.rounds_available);
            cost += drone.cost_per_shot * u64::from(rounds);
            let p_drone = ctx.specs.kill_probability(
                drone.class,
                threat.range_km * DRONE_RANGE_FACTOR,
                threat.class,
                ctx.constraints.weather,
            );
            combined = layered_or(combined, p_drone);
        }

        let acceptable_losses =
            ((f64::from(threat.count) * (1.0 - combined)).round() as u32).max(1);

        let helicopter_list: Vec<_> = ctx.tiers.helicopters().collect();
        let assets = mobile
            .iter()
            .chain(drones.iter())
            .chain(helicopter_list.iter())
            .take(3)
            .map(|asset| asset.class.label().to_string())
            .collect();

        Some(PatternParams::MinimalDefense(MinimalDefenseParams {
            mobile_units: mobile.len() as u32,
            drone_units: drones.len() as u32,
            helicopter_units: helicopters,
            target_description: threat.target_description.clone(),
            follow_on_waves: ctx.constraints.expected_follow_on_waves,
            threat_count: threat.count,
            acceptable_losses,
            cost,
            success_pct: pct(combined),
            assets,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testkit::{asset, threat, Fixture};
    use super::*;
    use crate::models::{AssetClass, Constraints, ThreatClass};

    #[test]
    fn refuses_missiles_even_when_available() {
        let fixture = Fixture::new(
            threat(TargetPriority::Low, ThreatClass::Orlan10, 3, 18.0),
            vec![
                asset(AssetClass::IrisT, 6, 500_000, 40.0),
                asset(AssetClass::BukM1, 3, 100_000, 35.0),
                asset(AssetClass::MobileGroup, 2, 500, 2.5),
                asset(AssetClass::InterceptorDrone, 4, 5_000, 20.0),
            ],
        );
        let Some(PatternParams::MinimalDefense(params)) = MinimalDefense.compute(&fixture.ctx())
        else {
            panic!("expected minimal defense params");
        };

        assert!(!params.assets.iter().any(|label| label == "IRIS-T"));
        assert!(!params.assets.iter().any(|label| label == "Buk-M1"));
        // 2 mobile rounds at $500 plus 3 drone rounds at $5,000.
        assert_eq!(params.cost, 2 * 500 + 3 * 5_000);
    }

    #[test]
    fn acceptable_losses_never_reports_zero() {
        let fixture = Fixture::new(
            threat(TargetPriority::Low, ThreatClass::Orlan10, 1, 10.0),
            vec![asset(AssetClass::InterceptorDrone, 4, 5_000, 20.0)],
        );
        let Some(PatternParams::MinimalDefense(params)) = MinimalDefense.compute(&fixture.ctx())
        else {
            panic!("expected minimal defense params");
        };
        assert!(params.acceptable_losses >= 1);
    }

    #[test]
    fn helicopters_are_grounded_outside_nominal_weather() {
        let roster = vec![
            asset(AssetClass::MobileGroup, 2, 500, 2.5),
            asset(AssetClass::Helicopter, 1, 2_000, 10.0),
        ];
        let clear = Fixture::new(
            threat(TargetPriority::Low, ThreatClass::Orlan10, 2, 8.0),
            roster.clone(),
        );
        let Some(PatternParams::MinimalDefense(params)) = MinimalDefense.compute(&clear.ctx())
        else {
            panic!("expected minimal defense params");
        };
        assert_eq!(params.helicopter_units, 1);

        let fogged = Fixture::new(
            threat(TargetPriority::Low, ThreatClass::Orlan10, 2, 8.0),
            roster,
        )
        .with_constraints(Constraints {
            weather: Weather::Fog,
            ..Constraints::default()
        });
        let Some(PatternParams::MinimalDefense(params)) = MinimalDefense.compute(&fogged.ctx())
        else {
            panic!("expected minimal defense params");
        };
        assert_eq!(params.helicopter_units, 0);
    }

    #[test]
    fn declines_without_mobile_groups_or_drones() {
        let fixture = Fixture::new(
            threat(TargetPriority::Low, ThreatClass::Orlan10, 2, 8.0),
            vec![asset(AssetClass::IrisT, 6, 500_000, 40.0)],
        );
        let ctx = fixture.ctx();
        assert!(MinimalDefense.applies(&ctx));
        assert!(MinimalDefense.compute(&ctx).is_none());
    }
}
