//! Immediate premium engagement for critical-priority targets.

use super::{pct, PatternContext, PatternParams, ResponsePattern};
use crate::models::TargetPriority;
use serde::Serialize;

/// Priority 1 doctrine: a critical target gets the best interceptor now,
/// leakage risk is unacceptable.
pub struct ImmediatePremium;

#[derive(Debug, Clone, Serialize)]
pub struct ImmediatePremiumParams {
    pub system: String,
    pub rounds_allocated: u32,
    pub rounds_reserved: u32,
    pub threat_count: u32,
    pub threat_label: String,
    pub range_km: f64,
    pub time_to_launch_min: u32,
    pub target_description: String,
    pub cost: u64,
    pub success_pct: u8,
    pub assets: Vec<String>,
}

impl ResponsePattern for ImmediatePremium {
    fn id(&self) -> &'static str {
        "immediate_premium"
    }

    fn title(&self) -> &'static str {
        "Priority 1: Immediate defense of critical infrastructure"
    }

    fn applies(&self, ctx: &PatternContext<'_>) -> bool {
        ctx.threat.priority == TargetPriority::Critical
    }

    fn compute(&self, ctx: &PatternContext<'_>) -> Option<PatternParams> {
        let primary = ctx.tiers.premium.first()?;
        let threat = ctx.threat;

        let allocated = threat.count.min(primary.rounds_available);
        let p = ctx.specs.kill_probability(
            primary.class,
            threat.range_km,
            threat.class,
            ctx.constraints.weather,
        );

        Some(PatternParams::ImmediatePremium(ImmediatePremiumParams {
            system: primary.class.label().to_string(),
            rounds_allocated: allocated,
            rounds_reserved: primary.rounds_available - allocated,
            threat_count: threat.count,
            threat_label: threat.class.label().to_string(),
            range_km: threat.range_km,
            time_to_launch_min: 2,
            target_description: threat.target_description.clone(),
            cost: primary.cost_per_shot * u64::from(allocated),
            success_pct: pct(p),
            assets: vec![primary.class.label().to_string()],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::super::testkit::{asset, threat, Fixture};
    use super::*;
    use crate::models::{AssetClass, ThreatClass};

    #[test]
    fn allocates_up_to_available_premium_rounds() {
        let fixture = Fixture::new(
            threat(TargetPriority::Critical, ThreatClass::Shahed136, 5, 25.0),
            vec![
                asset(AssetClass::IrisT, 6, 500_000, 40.0),
                asset(AssetClass::InterceptorDrone, 4, 5_000, 20.0),
            ],
        );
        let ctx = fixture.ctx();

        assert!(ImmediatePremium.applies(&ctx));
        let Some(PatternParams::ImmediatePremium(params)) = ImmediatePremium.compute(&ctx) else {
            panic!("expected immediate premium params");
        };

        assert_eq!(params.rounds_allocated, 5);
        assert_eq!(params.rounds_reserved, 1);
        assert_eq!(params.cost, 2_500_000);
        // IRIS-T at its 25 km optimal range: 0.93 * 0.85 = 0.79.
        assert_eq!(params.success_pct, 79);
        assert_eq!(params.assets, vec!["IRIS-T".to_string()]);
    }

    #[test]
    fn threat_count_equal_to_rounds_takes_everything_without_over_allocating() {
        let fixture = Fixture::new(
            threat(TargetPriority::Critical, ThreatClass::Shahed136, 6, 25.0),
            vec![asset(AssetClass::IrisT, 6, 500_000, 40.0)],
        );

        let Some(PatternParams::ImmediatePremium(params)) = ImmediatePremium.compute(&fixture.ctx())
        else {
            panic!("expected immediate premium params");
        };
        assert_eq!(params.rounds_allocated, 6);
        assert_eq!(params.rounds_reserved, 0);
    }

    #[test]
    fn declines_without_a_premium_asset() {
        let fixture = Fixture::new(
            threat(TargetPriority::Critical, ThreatClass::Shahed136, 5, 25.0),
            vec![asset(AssetClass::InterceptorDrone, 4, 5_000, 20.0)],
        );
        let ctx = fixture.ctx();

        assert!(ImmediatePremium.applies(&ctx));
        assert!(ImmediatePremium.compute(&ctx).is_none());
    }

    #[test]
    fn does_not_trigger_below_critical_priority() {
        let fixture = Fixture::new(
            threat(TargetPriority::High, ThreatClass::Shahed136, 5, 25.0),
            vec![asset(AssetClass::IrisT, 6, 500_000, 40.0)],
        );
        assert!(!ImmediatePremium.applies(&fixture.ctx()));
    }
}
