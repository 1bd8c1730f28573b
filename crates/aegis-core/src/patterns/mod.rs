//! Doctrinal response patterns: applicability triggers and parameter
//! calculators.
//!
//! Each pattern pairs a pure boolean trigger with a calculator that either
//! declines (no eligible asset) or produces a structured parameter set.
//! Patterns are evaluated independently; there is no first-match-wins
//! semantics, and a situation may qualify for anywhere from zero options to
//! the full catalog.

pub mod coordination;
pub mod electronic;
pub mod immediate;
pub mod layered;
pub mod minimal;
pub mod staged;

use crate::models::{AssetAvailability, Constraints, Threat};
use crate::specs::SpecTable;
use crate::summary::{SituationSummary, TieredRoster};
use serde::Serialize;

pub use coordination::{CoordinationParams, CoordinationRequest};
pub use electronic::{EwKineticParams, EwPlusKinetic};
pub use immediate::{ImmediatePremium, ImmediatePremiumParams};
pub use layered::{LayerPlan, LayeredDefense, LayeredDefenseParams};
pub use minimal::{MinimalDefense, MinimalDefenseParams};
pub use staged::{StagedIntercept, StagedInterceptParams};

/// Everything a pattern may consult when triggering or computing.
pub struct PatternContext<'a> {
    pub threat: &'a Threat,
    pub roster: &'a [AssetAvailability],
    pub summary: &'a SituationSummary,
    pub tiers: &'a TieredRoster,
    pub constraints: &'a Constraints,
    pub specs: &'a SpecTable,
}

/// A named doctrinal response template.
pub trait ResponsePattern: Send + Sync {
    fn id(&self) -> &'static str;
    fn title(&self) -> &'static str;
    /// Pure applicability predicate.
    fn applies(&self, ctx: &PatternContext<'_>) -> bool;
    /// Parameter calculator. `None` means the pattern declines (no eligible
    /// asset), a normal outcome rather than an error.
    fn compute(&self, ctx: &PatternContext<'_>) -> Option<PatternParams>;
}

/// Structured calculator output, one variant per pattern.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternParams {
    ImmediatePremium(ImmediatePremiumParams),
    StagedIntercept(StagedInterceptParams),
    LayeredDefense(LayeredDefenseParams),
    MinimalDefense(MinimalDefenseParams),
    EwKinetic(EwKineticParams),
    Coordination(CoordinationParams),
}

impl PatternParams {
    /// Aggregate cost displayed for the option (USD).
    pub fn cost(&self) -> u64 {
        match self {
            Self::ImmediatePremium(p) => p.cost,
            Self::StagedIntercept(p) => p.cost,
            Self::LayeredDefense(p) => p.cost,
            Self::MinimalDefense(p) => p.cost,
            Self::EwKinetic(p) => p.cost,
            Self::Coordination(p) => p.cost,
        }
    }

    /// Aggregate success probability as an integer percentage.
    pub fn success_pct(&self) -> u8 {
        match self {
            Self::ImmediatePremium(p) => p.success_pct,
            Self::StagedIntercept(p) => p.success_pct,
            Self::LayeredDefense(p) => p.success_pct,
            Self::MinimalDefense(p) => p.success_pct,
            Self::EwKinetic(p) => p.success_pct,
            Self::Coordination(p) => p.success_pct,
        }
    }

    /// Display labels of the asset classes the option would employ.
    pub fn assets_used(&self) -> &[String] {
        match self {
            Self::ImmediatePremium(p) => &p.assets,
            Self::StagedIntercept(p) => &p.assets,
            Self::LayeredDefense(p) => &p.assets,
            Self::MinimalDefense(p) => &p.assets,
            Self::EwKinetic(p) => &p.assets,
            Self::Coordination(p) => &p.assets,
        }
    }
}

/// Two-layer independent-event OR: the first layer succeeds, or it fails
/// and the second succeeds.
pub fn layered_or(p_first: f64, p_second: f64) -> f64 {
    p_first + (1.0 - p_first) * p_second
}

/// N-layer union via product of complements.
pub fn cumulative_success(probabilities: &[f64]) -> f64 {
    1.0 - probabilities.iter().fold(1.0, |acc, p| acc * (1.0 - p))
}

/// Integer display percentage, truncating, clamped to 0..=100.
pub(crate) fn pct(probability: f64) -> u8 {
    (probability.clamp(0.0, 1.0) * 100.0) as u8
}

/// Ordered registry of response patterns.
pub struct PatternCatalog {
    patterns: Vec<Box<dyn ResponsePattern>>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self {
            patterns: vec![
                Box::new(ImmediatePremium),
                Box::new(StagedIntercept),
                Box::new(LayeredDefense),
                Box::new(MinimalDefense),
                Box::new(EwPlusKinetic),
                Box::new(CoordinationRequest),
            ],
        }
    }
}

impl PatternCatalog {
    pub fn empty() -> Self {
        Self { patterns: Vec::new() }
    }

    pub fn register(&mut self, pattern: Box<dyn ResponsePattern>) {
        self.patterns.push(pattern);
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ResponsePattern> {
        self.patterns.iter().map(|pattern| pattern.as_ref())
    }

    /// Evaluate every pattern against the situation. Returns one entry per
    /// pattern that both triggers and computes a parameter set.
    pub fn evaluate<'a>(
        &'a self,
        ctx: &PatternContext<'_>,
    ) -> Vec<(&'a dyn ResponsePattern, PatternParams)> {
        self.patterns
            .iter()
            .filter(|pattern| pattern.applies(ctx))
            .filter_map(|pattern| pattern.compute(ctx).map(|params| (pattern.as_ref(), params)))
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod testkit {
    //! Shared fixtures for pattern tests.

    use super::PatternContext;
    use crate::models::{
        AssetAvailability, AssetClass, Constraints, ReadinessStatus, TargetPriority, Threat,
        ThreatClass,
    };
    use crate::specs::SpecTable;
    use crate::summary::{SituationSummary, TieredRoster};

    pub fn threat(priority: TargetPriority, class: ThreatClass, count: u32, range_km: f64) -> Threat {
        Threat {
            class,
            count,
            range_km,
            bearing_deg: 45,
            altitude_m: 1200,
            speed_kmh: 185.0,
            target_description: "Port and power station".to_string(),
            priority,
            time_to_impact_min: range_km / 185.0 * 60.0,
        }
    }

    pub fn asset(class: AssetClass, rounds: u32, cost: u64, range_km: f64) -> AssetAvailability {
        AssetAvailability {
            class,
            platforms: 1,
            rounds_available: rounds,
            cost_per_shot: cost,
            effective_range_km: range_km,
            intrinsic_success_rate: 0.6,
            reload_time_min: 30,
            status: ReadinessStatus::Ready,
            setup_time_min: 0,
            weather_dependent: false,
            requires_visual: false,
        }
    }

    pub fn constraints() -> Constraints {
        Constraints::default()
    }

    /// Owns everything a [`PatternContext`] borrows.
    pub struct Fixture {
        pub threat: Threat,
        pub roster: Vec<AssetAvailability>,
        pub summary: SituationSummary,
        pub tiers: TieredRoster,
        pub constraints: Constraints,
        pub specs: SpecTable,
    }

    impl Fixture {
        pub fn new(threat: Threat, roster: Vec<AssetAvailability>) -> Self {
            let summary = SituationSummary::from_roster(&roster);
            let tiers = TieredRoster::from_roster(&roster);
            Self {
                threat,
                roster,
                summary,
                tiers,
                constraints: constraints(),
                specs: SpecTable::builtin(),
            }
        }

        pub fn with_constraints(mut self, constraints: Constraints) -> Self {
            self.constraints = constraints;
            self
        }

        pub fn ctx(&self) -> PatternContext<'_> {
            PatternContext {
                threat: &self.threat,
                roster: &self.roster,
                summary: &self.summary,
                tiers: &self.tiers,
                constraints: &self.constraints,
                specs: &self.specs,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn independent_or_formulations_agree() {
        for (p1, p2) in [(0.6, 0.5), (0.0, 0.9), (0.93, 0.35), (1.0, 0.2)] {
            let two_layer = layered_or(p1, p2);
            let complement = cumulative_success(&[p1, p2]);
            assert!((two_layer - complement).abs() < 1e-12);
        }
    }

    #[test]
    fn cumulative_success_over_three_layers() {
        let p = cumulative_success(&[0.5, 0.5, 0.5]);
        assert!((p - 0.875).abs() < 1e-12);
    }

    #[test]
    fn pct_truncates_and_clamps() {
        assert_eq!(pct(0.7905), 79);
        assert_eq!(pct(0.999), 99);
        assert_eq!(pct(1.0), 100);
        assert_eq!(pct(-0.5), 0);
        assert_eq!(pct(1.5), 100);
    }

    #[test]
    fn default_catalog_carries_six_patterns() {
        let catalog = PatternCatalog::default();
        assert_eq!(catalog.len(), 6);
        let ids: Vec<&str> = catalog.iter().map(|p| p.id()).collect();
        assert!(ids.contains(&"immediate_premium"));
        assert!(ids.contains(&"coordination_request"));
    }
}
