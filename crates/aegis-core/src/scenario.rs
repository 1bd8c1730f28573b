//! Fixed historical reference scenario, replayable for validation and demos.
//!
//! Odesa, October 19 2024: a Shahed-136 raid against port and power
//! infrastructure, with the battery's recorded roster and the recorded
//! engagement outcome for comparison.

use crate::models::{
    AssetAvailability, AssetClass, Constraints, ReadinessStatus, TargetPriority, ThreatClass,
    ThreatReport, Weather,
};
use serde::Serialize;

/// Inputs of the reference scenario, ready to feed to the engine.
#[derive(Debug, Clone)]
pub struct ReferenceScenario {
    pub threat: ThreatReport,
    pub roster: Vec<AssetAvailability>,
    pub constraints: Constraints,
    pub commander_context: String,
}

/// What was actually spent and achieved in the recorded engagement.
#[derive(Debug, Clone, Serialize)]
pub struct RecordedOutcome {
    pub cost_usd: u64,
    pub kills: u32,
    pub raid_size: u32,
    pub success_pct: u8,
    pub systems_used: Vec<&'static str>,
}

pub fn reference_scenario() -> ReferenceScenario {
    let asset = |class: AssetClass,
                 platforms: u32,
                 rounds: u32,
                 cost: u64,
                 range_km: f64,
                 success: f64,
                 reload_min: u32| AssetAvailability {
        class,
        platforms,
        rounds_available: rounds,
        cost_per_shot: cost,
        effective_range_km: range_km,
        intrinsic_success_rate: success,
        reload_time_min: reload_min,
        status: ReadinessStatus::Ready,
        setup_time_min: 0,
        weather_dependent: false,
        requires_visual: false,
    };

    let mut mobile = asset(AssetClass::MobileGroup, 2, 2, 500, 2.5, 0.35, 15);
    mobile.setup_time_min = 15;
    let mut helicopter = asset(AssetClass::Helicopter, 1, 1, 2_000, 10.0, 0.50, 90);
    helicopter.weather_dependent = true;

    ReferenceScenario {
        threat: ThreatReport {
            threat_class: ThreatClass::Shahed136,
            count: 5,
            range_km: 25.0,
            bearing_deg: 45,
            altitude_m: 1200,
            speed_kmh: 185.0,
            target_description: "Port and power station (CRITICAL)".to_string(),
            target_priority: TargetPriority::Critical,
            time_to_impact_min: None,
        },
        roster: vec![
            asset(AssetClass::IrisT, 2, 6, 500_000, 40.0, 0.93, 720),
            asset(AssetClass::BukM1, 1, 3, 100_000, 35.0, 0.85, 480),
            asset(AssetClass::Stinger, 4, 8, 40_000, 5.0, 0.70, 120),
            asset(AssetClass::InterceptorDrone, 4, 4, 5_000, 20.0, 0.60, 30),
            mobile,
            helicopter,
        ],
        constraints: Constraints {
            limited_ammunition: true,
            friendly_forces_nearby: false,
            civilian_areas_nearby: false,
            weather: Weather::Marginal,
            expected_follow_on_waves: 2,
            resupply_time_hours: 24,
        },
        commander_context: "Odesa sector, October 19 2024 validation".to_string(),
    }
}

pub fn recorded_outcome() -> RecordedOutcome {
    RecordedOutcome {
        cost_usd: 2_730_000,
        kills: 9,
        raid_size: 12,
        success_pct: 75,
        systems_used: vec!["4x IRIS-T", "2x Buk-M1", "1x Helicopter", "Mobile fire groups"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DecisionEngine;
    use crate::models::Threat;

    #[test]
    fn reference_scenario_reproduces_the_expected_catalog_slice() {
        let scenario = reference_scenario();
        let threat = Threat::try_from(scenario.threat).unwrap();
        let engine = DecisionEngine::default();
        let options = engine.generate_options(&threat, &scenario.roster, &scenario.constraints);

        let ids: Vec<&str> = options
            .iter()
            .map(|option| option.pattern_id.as_str())
            .collect();

        // Critical priority fires the premium pattern; the two expected
        // follow-on waves fire the coordination request; nothing else
        // qualifies for a critical-priority Shahed raid.
        assert_eq!(ids, vec!["immediate_premium", "coordination_request"]);

        let immediate = &options[0];
        assert_eq!(immediate.estimated_cost, 2_500_000);
        assert_eq!(immediate.estimated_success_pct, 79);
        assert_eq!(immediate.assets_used, vec!["IRIS-T".to_string()]);
    }

    #[test]
    fn derived_time_to_impact_matches_the_raid_kinematics() {
        let scenario = reference_scenario();
        let threat = Threat::try_from(scenario.threat).unwrap();
        assert!((threat.time_to_impact_min - 8.108).abs() < 0.01);
    }
}
