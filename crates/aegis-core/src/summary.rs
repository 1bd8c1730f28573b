//! Situation summarization: cost tiers and per-tier aggregates.

use crate::models::{AssetAvailability, AssetClass};
use std::collections::HashSet;

/// Cost-per-shot floor for the premium tier (USD).
pub const PREMIUM_COST_FLOOR: u64 = 400_000;
/// Cost-per-shot floor for the moderate tier (USD).
pub const MODERATE_COST_FLOOR: u64 = 30_000;
/// Historical "cheap enough to layer" ceiling used by the layered-defense
/// trigger; deliberately not aligned with the tier thresholds.
pub const LAYERING_COST_CEILING: u64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostTier {
    Premium,
    Moderate,
    Economical,
}

impl CostTier {
    pub fn of(cost_per_shot: u64) -> Self {
        if cost_per_shot >= PREMIUM_COST_FLOOR {
            Self::Premium
        } else if cost_per_shot >= MODERATE_COST_FLOOR {
            Self::Moderate
        } else {
            Self::Economical
        }
    }
}

/// Aggregate view of the roster, computed once per invocation and shared by
/// every pattern's trigger and calculator.
#[derive(Debug, Clone)]
pub struct SituationSummary {
    pub premium_rounds: u32,
    pub moderate_rounds: u32,
    pub economical_rounds: u32,
    pub total_rounds: u32,
    pub classes_present: HashSet<AssetClass>,
}

impl SituationSummary {
    pub fn from_roster(roster: &[AssetAvailability]) -> Self {
        let mut summary = Self {
            premium_rounds: 0,
            moderate_rounds: 0,
            economical_rounds: 0,
            total_rounds: 0,
            classes_present: HashSet::new(),
        };

        for asset in roster {
            match CostTier::of(asset.cost_per_shot) {
                CostTier::Premium => summary.premium_rounds += asset.rounds_available,
                CostTier::Moderate => summary.moderate_rounds += asset.rounds_available,
                CostTier::Economical => summary.economical_rounds += asset.rounds_available,
            }
            summary.total_rounds += asset.rounds_available;
            summary.classes_present.insert(asset.class);
        }

        summary
    }
}

/// Roster partitioned by cost tier, ordered for calculator selection:
/// premium and moderate descending by cost, economical ascending.
#[derive(Debug, Clone)]
pub struct TieredRoster {
    pub premium: Vec<AssetAvailability>,
    pub moderate: Vec<AssetAvailability>,
    pub economical: Vec<AssetAvailability>,
}

impl TieredRoster {
    pub fn from_roster(roster: &[AssetAvailability]) -> Self {
        let mut tiers = Self {
            premium: Vec::new(),
            moderate: Vec::new(),
            economical: Vec::new(),
        };

        for asset in roster {
            match CostTier::of(asset.cost_per_shot) {
                CostTier::Premium => tiers.premium.push(asset.clone()),
                CostTier::Moderate => tiers.moderate.push(asset.clone()),
                CostTier::Economical => tiers.economical.push(asset.clone()),
            }
        }

        tiers.premium.sort_by(|a, b| b.cost_per_shot.cmp(&a.cost_per_shot));
        tiers.moderate.sort_by(|a, b| b.cost_per_shot.cmp(&a.cost_per_shot));
        tiers.economical.sort_by(|a, b| a.cost_per_shot.cmp(&b.cost_per_shot));
        tiers
    }

    pub fn interceptor_drones(&self) -> impl Iterator<Item = &AssetAvailability> {
        self.economical
            .iter()
            .filter(|asset| asset.class == AssetClass::InterceptorDrone)
    }

    pub fn mobile_groups(&self) -> impl Iterator<Item = &AssetAvailability> {
        self.economical
            .iter()
            .filter(|asset| asset.class == AssetClass::MobileGroup)
    }

    pub fn helicopters(&self) -> impl Iterator<Item = &AssetAvailability> {
        self.economical
            .iter()
            .filter(|asset| asset.class == AssetClass::Helicopter)
    }

    /// Cheapest system across all tiers, economical first.
    pub fn cheapest_available(&self) -> Option<&AssetAvailability> {
        self.economical
            .first()
            .or_else(|| self.moderate.first())
            .or_else(|| self.premium.first())
    }
}
