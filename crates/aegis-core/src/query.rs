//! Natural-language situation query for the external ranker.

use crate::models::{AssetAvailability, Constraints, Threat};
use std::fmt::Write as _;

const DEFAULT_CONTEXT: &str = "two years of battery command in the current campaign";

/// Render the full situation as free text: threat picture, roster,
/// constraints, and the commander's own context.
pub fn build_situation_query(
    threat: &Threat,
    roster: &[AssetAvailability],
    constraints: &Constraints,
    commander_context: &str,
) -> String {
    let context = if commander_context.trim().is_empty() {
        DEFAULT_CONTEXT
    } else {
        commander_context
    };

    let mut query = format!(
        "I command an air defense battery protecting {target}.\n\
         Operator background: {context}\n\
         \n\
         CURRENT THREAT:\n\
         - Type: {count}x {class}\n\
         - Range: {range} km and closing\n\
         - Speed: {speed} km/h\n\
         - Altitude: {altitude} m\n\
         - Bearing: {bearing} degrees toward {target}\n\
         - Time to impact: {tti:.1} minutes\n\
         - TARGET PRIORITY: {priority}\n\
         \n\
         AVAILABLE SYSTEMS:\n",
        target = threat.target_description,
        context = context,
        count = threat.count,
        class = threat.class,
        range = threat.range_km,
        speed = threat.speed_kmh,
        altitude = threat.altitude_m,
        bearing = threat.bearing_deg,
        tti = threat.time_to_impact_min,
        priority = threat.priority,
    );

    for asset in roster {
        let _ = write!(
            query,
            "- {class}: {rounds} rounds available\n  - Cost per engagement: ${cost}\n  - Range: {range} km\n  - Effectiveness: {effectiveness}%\n  - Status: {status}\n",
            class = asset.class,
            rounds = asset.rounds_available,
            cost = asset.cost_per_shot,
            range = asset.effective_range_km,
            effectiveness = (asset.intrinsic_success_rate * 100.0) as u8,
            status = asset.status,
        );
    }

    query.push_str("\nCONSTRAINTS:\n");
    if constraints.limited_ammunition {
        let _ = write!(
            query,
            "- LIMITED AMMUNITION - resupply in {} hours\n",
            constraints.resupply_time_hours
        );
    }
    if constraints.expected_follow_on_waves > 0 {
        let _ = write!(
            query,
            "- {} additional attack waves expected tonight\n",
            constraints.expected_follow_on_waves
        );
    }
    if constraints.civilian_areas_nearby {
        query.push_str("- Civilian areas nearby\n");
    }
    if constraints.friendly_forces_nearby {
        query.push_str("- Friendly forces operating nearby\n");
    }

    let _ = write!(query, "\nWeather: {}\n", constraints.weather);
    query.push_str("\nProvide a TACTICAL RECOMMENDATION consistent with layered defense doctrine.");

    query
}
