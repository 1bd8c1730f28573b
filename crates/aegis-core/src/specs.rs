//! Static asset specification table and the kill-probability estimator.

use crate::models::{AssetClass, ThreatClass, Weather};
use serde::Serialize;
use std::collections::HashMap;

/// Estimate returned for any class with no tabulated specification.
pub const DEFAULT_KILL_PROBABILITY: f64 = 0.75;

/// Per-class static performance constants, from combat reference data.
#[derive(Debug, Clone, Serialize)]
pub struct AssetSpec {
    /// Whole US dollars per round or sortie.
    pub unit_cost: u64,
    pub range_km: f64,
    /// Base single-shot kill probability at optimal geometry.
    pub base_kill_probability: f64,
    pub optimal_range_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_time_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_time_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loiter_time_min: Option<u32>,
    pub weather_sensitive: bool,
    pub requires_visual: bool,
    pub requires_acoustic_cue: bool,
}

fn spec(unit_cost: u64, range_km: f64, base_kill_probability: f64, optimal_range_km: f64) -> AssetSpec {
    AssetSpec {
        unit_cost,
        range_km,
        base_kill_probability,
        optimal_range_km,
        launch_time_min: None,
        setup_time_min: None,
        loiter_time_min: None,
        weather_sensitive: false,
        requires_visual: false,
        requires_acoustic_cue: false,
    }
}

/// Immutable specification table, one entry per tabulated asset class.
///
/// Initialized once at process start and injected into the engine; classes
/// absent from the table (towed guns, EW suppressors, anything unknown)
/// estimate at [`DEFAULT_KILL_PROBABILITY`].
#[derive(Debug, Clone)]
pub struct SpecTable {
    entries: HashMap<AssetClass, AssetSpec>,
}

impl Default for SpecTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SpecTable {
    /// The built-in table of combat reference data.
    pub fn builtin() -> Self {
        let entries = HashMap::from([
            (AssetClass::Patriot, spec(3_000_000, 160.0, 0.95, 80.0)),
            (AssetClass::IrisT, spec(500_000, 40.0, 0.93, 25.0)),
            (AssetClass::BukM1, spec(100_000, 35.0, 0.85, 20.0)),
            (AssetClass::Stinger, spec(38_000, 4.8, 0.70, 3.0)),
            (AssetClass::Igla, spec(25_000, 5.0, 0.65, 3.5)),
            (
                AssetClass::InterceptorDrone,
                AssetSpec {
                    launch_time_min: Some(3),
                    ..spec(5_000, 20.0, 0.60, 15.0)
                },
            ),
            (
                AssetClass::MobileGroup,
                AssetSpec {
                    setup_time_min: Some(15),
                    requires_acoustic_cue: true,
                    ..spec(500, 2.5, 0.35, 2.0)
                },
            ),
            (
                AssetClass::Helicopter,
                AssetSpec {
                    loiter_time_min: Some(90),
                    weather_sensitive: true,
                    requires_visual: true,
                    ..spec(2_000, 10.0, 0.50, 8.0)
                },
            ),
        ]);
        Self { entries }
    }

    /// Build a table from explicit entries (substitute specs in tests).
    pub fn from_entries(entries: impl IntoIterator<Item = (AssetClass, AssetSpec)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, class: AssetClass) -> Option<&AssetSpec> {
        self.entries.get(&class)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, &AssetSpec)> {
        self.entries.iter().map(|(class, spec)| (*class, spec))
    }

    /// Estimate the single-shot kill probability for `class` engaging at
    /// `range_km` under the given weather. Deterministic, side-effect free.
    ///
    /// The threat class is part of the contract but the current model does
    /// not differentiate by it.
    pub fn kill_probability(
        &self,
        class: AssetClass,
        range_km: f64,
        _threat: ThreatClass,
        weather: Weather,
    ) -> f64 {
        let Some(spec) = self.entries.get(&class) else {
            return DEFAULT_KILL_PROBABILITY;
        };

        let optimal = spec.optimal_range_km;
        let range_factor = if range_km > optimal {
            // Linear degradation with overshoot, floored at 60% of the
            // intrinsic capability.
            (1.0 - (range_km - optimal) / (optimal * 2.0)).max(0.6)
        } else {
            // Modest bonus inside the optimal envelope, capped at 1.0.
            (0.85 + (optimal - range_km) / optimal * 0.15).min(1.0)
        };

        let weather_factor = if spec.weather_sensitive && weather.is_adverse() {
            0.3
        } else {
            1.0
        };

        spec.base_kill_probability * range_factor * weather_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TABULATED: [AssetClass; 8] = [
        AssetClass::Patriot,
        AssetClass::IrisT,
        AssetClass::BukM1,
        AssetClass::Stinger,
        AssetClass::Igla,
        AssetClass::InterceptorDrone,
        AssetClass::MobileGroup,
        AssetClass::Helicopter,
    ];

    #[test]
    fn estimates_stay_in_unit_interval_for_all_classes_and_ranges() {
        let table = SpecTable::builtin();
        for class in ALL_TABULATED {
            for range_km in [0.0, 0.5, 2.0, 10.0, 25.0, 80.0, 200.0, 500.0] {
                let p = table.kill_probability(class, range_km, ThreatClass::Shahed136, Weather::Nominal);
                assert!((0.0..=1.0).contains(&p), "{class} at {range_km} km gave {p}");
            }
        }
    }

    #[test]
    fn untabulated_classes_use_the_documented_default() {
        let table = SpecTable::builtin();
        for range_km in [0.0, 5.0, 100.0] {
            let p = table.kill_probability(
                AssetClass::TowedGun,
                range_km,
                ThreatClass::Fpv,
                Weather::Rain,
            );
            assert_eq!(p, DEFAULT_KILL_PROBABILITY);
            let p = table.kill_probability(
                AssetClass::EwSuppressor,
                range_km,
                ThreatClass::Lancet,
                Weather::Nominal,
            );
            assert_eq!(p, DEFAULT_KILL_PROBABILITY);
        }
    }

    #[test]
    fn at_optimal_range_the_within_branch_applies() {
        let table = SpecTable::builtin();
        // IRIS-T: base 0.93, optimal 25 km. At exactly the optimal range the
        // within-envelope branch yields factor 0.85.
        let p = table.kill_probability(AssetClass::IrisT, 25.0, ThreatClass::Shahed136, Weather::Nominal);
        assert!((p - 0.93 * 0.85).abs() < 1e-9);
    }

    #[test]
    fn overshoot_degrades_to_the_floor() {
        let table = SpecTable::builtin();
        let at_optimal =
            table.kill_probability(AssetClass::BukM1, 20.0, ThreatClass::Geran2, Weather::Nominal);
        // Three times the optimal range bottoms out at the 0.6 floor.
        let far = table.kill_probability(AssetClass::BukM1, 60.0, ThreatClass::Geran2, Weather::Nominal);
        assert!((far - 0.85 * 0.6).abs() < 1e-9);
        assert!(at_optimal >= far);
    }

    #[test]
    fn closing_inside_optimal_range_grants_a_capped_bonus() {
        let table = SpecTable::builtin();
        let point_blank =
            table.kill_probability(AssetClass::Stinger, 0.0, ThreatClass::Fpv, Weather::Nominal);
        // Factor reaches exactly 1.0 at zero range.
        assert!((point_blank - 0.70).abs() < 1e-9);
        let mid = table.kill_probability(AssetClass::Stinger, 1.5, ThreatClass::Fpv, Weather::Nominal);
        assert!(mid < point_blank && mid >= 0.70 * 0.85);
    }

    #[test]
    fn weather_multiplier_hits_only_sensitive_classes_under_adverse_labels() {
        let table = SpecTable::builtin();
        let clear =
            table.kill_probability(AssetClass::Helicopter, 8.0, ThreatClass::Shahed136, Weather::Nominal);
        let fog = table.kill_probability(AssetClass::Helicopter, 8.0, ThreatClass::Shahed136, Weather::Fog);
        assert!((fog - clear * 0.3).abs() < 1e-9);

        // Marginal weather is not adverse.
        let marginal =
            table.kill_probability(AssetClass::Helicopter, 8.0, ThreatClass::Shahed136, Weather::Marginal);
        assert_eq!(marginal, clear);

        // Missiles fly in any weather.
        let missile_clear =
            table.kill_probability(AssetClass::IrisT, 20.0, ThreatClass::Shahed136, Weather::Nominal);
        let missile_rain =
            table.kill_probability(AssetClass::IrisT, 20.0, ThreatClass::Shahed136, Weather::Rain);
        assert_eq!(missile_clear, missile_rain);
    }

    #[test]
    fn substitute_tables_are_honored() {
        let table = SpecTable::from_entries([(AssetClass::Patriot, spec(1, 10.0, 0.5, 5.0))]);
        let p = table.kill_probability(AssetClass::Patriot, 5.0, ThreatClass::Unknown, Weather::Nominal);
        assert!((p - 0.5 * 0.85).abs() < 1e-9);
        assert_eq!(
            table.kill_probability(AssetClass::IrisT, 5.0, ThreatClass::Unknown, Weather::Nominal),
            DEFAULT_KILL_PROBABILITY
        );
    }
}
