//! Core data models for the engagement decision engine.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use crate::patterns::PatternParams;

/// Incoming threat classes the engine knows how to reason about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThreatClass {
    Shahed136,
    Shahed131,
    Geran2,
    Lancet,
    Fpv,
    Orlan10,
    Unknown,
}

impl ThreatClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Shahed136 => "Shahed-136",
            Self::Shahed131 => "Shahed-131",
            Self::Geran2 => "Geran-2",
            Self::Lancet => "Lancet",
            Self::Fpv => "FPV",
            Self::Orlan10 => "Orlan-10",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a wire label. Unrecognized labels degrade to `Unknown`.
    pub fn parse_label(label: &str) -> Self {
        match label {
            "Shahed-136" => Self::Shahed136,
            "Shahed-131" => Self::Shahed131,
            "Geran-2" => Self::Geran2,
            "Lancet" => Self::Lancet,
            "FPV" => Self::Fpv,
            "Orlan-10" => Self::Orlan10,
            _ => Self::Unknown,
        }
    }

    /// Threat classes that can be defeated by navigation jamming.
    pub fn ew_vulnerable(self) -> bool {
        matches!(self, Self::Fpv | Self::Lancet)
    }
}

impl fmt::Display for ThreatClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ThreatClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for ThreatClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse_label(&label))
    }
}

/// Defensive asset classes with tabulated or fallback performance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    Patriot,
    IrisT,
    BukM1,
    Stinger,
    Igla,
    InterceptorDrone,
    MobileGroup,
    Helicopter,
    TowedGun,
    EwSuppressor,
}

impl AssetClass {
    pub fn label(self) -> &'static str {
        match self {
            Self::Patriot => "Patriot",
            Self::IrisT => "IRIS-T",
            Self::BukM1 => "Buk-M1",
            Self::Stinger => "Stinger",
            Self::Igla => "Igla",
            Self::InterceptorDrone => "Interceptor Drone",
            Self::MobileGroup => "Mobile Fire Group",
            Self::Helicopter => "Helicopter",
            Self::TowedGun => "Towed AA Gun",
            Self::EwSuppressor => "EW Suppressor",
        }
    }

    /// Parse a wire label. Unrecognized labels degrade to the towed gun,
    /// the cheapest class the engine can always field.
    pub fn parse_label(label: &str) -> Self {
        match label {
            "Patriot" => Self::Patriot,
            "IRIS-T" => Self::IrisT,
            "Buk-M1" => Self::BukM1,
            "Stinger" => Self::Stinger,
            "Igla" => Self::Igla,
            "Interceptor Drone" => Self::InterceptorDrone,
            "Mobile Fire Group" => Self::MobileGroup,
            "Helicopter" => Self::Helicopter,
            "EW Suppressor" => Self::EwSuppressor,
            _ => Self::TowedGun,
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AssetClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for AssetClass {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse_label(&label))
    }
}

/// Priority tier of the threatened target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPriority {
    /// Ammunition, power, command
    Critical,
    /// Industrial, transport
    High,
    /// Residential, non-critical
    Medium,
    /// Psychological, rural
    Low,
}

impl TargetPriority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse a wire label. Unrecognized labels degrade to `Medium`.
    pub fn parse_label(label: &str) -> Self {
        match label {
            "Critical" => Self::Critical,
            "High" => Self::High,
            "Low" => Self::Low,
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for TargetPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TargetPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for TargetPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse_label(&label))
    }
}

/// Weather condition label carried by the constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Weather {
    #[default]
    Nominal,
    Marginal,
    HeavyClouds,
    Rain,
    Fog,
}

impl Weather {
    pub fn label(self) -> &'static str {
        match self {
            Self::Nominal => "Nominal",
            Self::Marginal => "Marginal",
            Self::HeavyClouds => "Heavy clouds",
            Self::Rain => "Rain",
            Self::Fog => "Fog",
        }
    }

    /// Parse a wire label. Unrecognized labels degrade to `Nominal`.
    pub fn parse_label(label: &str) -> Self {
        match label {
            "Marginal" => Self::Marginal,
            "Heavy clouds" => Self::HeavyClouds,
            "Rain" => Self::Rain,
            "Fog" => Self::Fog,
            _ => Self::Nominal,
        }
    }

    /// Conditions that ground weather-sensitive platforms.
    pub fn is_adverse(self) -> bool {
        matches!(self, Self::HeavyClouds | Self::Rain | Self::Fog)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Weather {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Weather {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Self::parse_label(&label))
    }
}

/// Raw threat description as submitted by the operator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreatReport {
    pub threat_class: ThreatClass,
    pub count: u32,
    pub range_km: f64,
    pub bearing_deg: u16,
    pub altitude_m: u32,
    pub speed_kmh: f64,
    pub target_description: String,
    pub target_priority: TargetPriority,
    #[serde(default)]
    pub time_to_impact_min: Option<f64>,
}

#[derive(Debug, Error)]
pub enum ThreatError {
    #[error("invalid threat kinematics: closing speed must be positive to derive time to impact")]
    InvalidKinematics,
}

/// Validated, immutable threat picture.
///
/// Time-to-impact is derived exactly once at construction when the report
/// does not carry it; a report with non-positive speed and no explicit
/// time-to-impact is rejected.
#[derive(Debug, Clone, Serialize)]
pub struct Threat {
    pub class: ThreatClass,
    pub count: u32,
    pub range_km: f64,
    pub bearing_deg: u16,
    pub altitude_m: u32,
    pub speed_kmh: f64,
    pub target_description: String,
    pub priority: TargetPriority,
    pub time_to_impact_min: f64,
}

impl TryFrom<ThreatReport> for Threat {
    type Error = ThreatError;

    fn try_from(report: ThreatReport) -> Result<Self, Self::Error> {
        let time_to_impact_min = match report.time_to_impact_min {
            Some(minutes) => minutes,
            None if report.speed_kmh > 0.0 => report.range_km / report.speed_kmh * 60.0,
            None => return Err(ThreatError::InvalidKinematics),
        };

        Ok(Self {
            class: report.threat_class,
            count: report.count,
            range_km: report.range_km,
            bearing_deg: report.bearing_deg,
            altitude_m: report.altitude_m,
            speed_kmh: report.speed_kmh,
            target_description: report.target_description,
            priority: report.target_priority,
            time_to_impact_min,
        })
    }
}

/// Readiness state of an asset record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReadinessStatus {
    #[default]
    Ready,
    Rearming,
    Offline,
}

impl ReadinessStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::Rearming => "REARMING",
            Self::Offline => "OFFLINE",
        }
    }
}

impl fmt::Display for ReadinessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One asset class currently on hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetAvailability {
    pub class: AssetClass,
    pub platforms: u32,
    /// Rounds or sorties that can actually be expended.
    pub rounds_available: u32,
    /// Whole US dollars per engagement.
    pub cost_per_shot: u64,
    pub effective_range_km: f64,
    /// Intrinsic single-shot success rate reported by the crew, in [0, 1].
    pub intrinsic_success_rate: f64,
    pub reload_time_min: u32,
    #[serde(default)]
    pub status: ReadinessStatus,
    #[serde(default)]
    pub setup_time_min: u32,
    #[serde(default)]
    pub weather_dependent: bool,
    #[serde(default)]
    pub requires_visual: bool,
}

fn default_true() -> bool {
    true
}

fn default_resupply_hours() -> u32 {
    24
}

/// Operational constraints and considerations. Independent situational
/// knobs; no invariants link them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default = "default_true")]
    pub limited_ammunition: bool,
    #[serde(default)]
    pub friendly_forces_nearby: bool,
    #[serde(default)]
    pub civilian_areas_nearby: bool,
    #[serde(default)]
    pub weather: Weather,
    #[serde(default)]
    pub expected_follow_on_waves: u32,
    #[serde(default = "default_resupply_hours")]
    pub resupply_time_hours: u32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            limited_ammunition: true,
            friendly_forces_nearby: false,
            civilian_areas_nearby: false,
            weather: Weather::Nominal,
            expected_follow_on_waves: 0,
            resupply_time_hours: 24,
        }
    }
}

/// One fully computed, renderable candidate response plan.
///
/// Created once per qualifying pattern per invocation, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedOption {
    pub option_id: String,
    pub title: String,
    pub description: String,
    pub pattern_id: String,
    pub parameters: PatternParams,
    pub estimated_cost: u64,
    /// Integer percentage in 0..=100.
    pub estimated_success_pct: u8,
    pub assets_used: Vec<String>,
}

/// Coherence-score band for a ranked recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecommendationTier {
    High,
    Medium,
    Low,
}

impl RecommendationTier {
    pub fn from_score(score: f64) -> Self {
        if score > 0.80 {
            Self::High
        } else if score > 0.70 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A generated option merged with its externally supplied coherence score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRecommendation {
    pub rank: usize,
    pub coherence: f64,
    pub title: String,
    pub description: String,
    pub pattern_id: String,
    pub estimated_cost: u64,
    pub estimated_success_pct: u8,
    pub assets_used: Vec<String>,
    pub tier: RecommendationTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(speed_kmh: f64, time_to_impact_min: Option<f64>) -> ThreatReport {
        ThreatReport {
            threat_class: ThreatClass::Shahed136,
            count: 5,
            range_km: 25.0,
            bearing_deg: 45,
            altitude_m: 1200,
            speed_kmh,
            target_description: "Port and power station".to_string(),
            target_priority: TargetPriority::Critical,
            time_to_impact_min,
        }
    }

    #[test]
    fn time_to_impact_derived_from_kinematics() {
        let threat = Threat::try_from(report(185.0, None)).unwrap();
        assert!((threat.time_to_impact_min - 25.0 / 185.0 * 60.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_time_to_impact_is_preserved() {
        let threat = Threat::try_from(report(0.0, Some(6.5))).unwrap();
        assert_eq!(threat.time_to_impact_min, 6.5);
    }

    #[test]
    fn zero_speed_without_time_to_impact_is_rejected() {
        assert!(matches!(
            Threat::try_from(report(0.0, None)),
            Err(ThreatError::InvalidKinematics)
        ));
    }

    #[test]
    fn unknown_labels_degrade_to_documented_fallbacks() {
        assert_eq!(ThreatClass::parse_label("Mystery"), ThreatClass::Unknown);
        assert_eq!(AssetClass::parse_label("Mystery"), AssetClass::TowedGun);
        assert_eq!(Weather::parse_label("Mystery"), Weather::Nominal);
        assert_eq!(TargetPriority::parse_label("Mystery"), TargetPriority::Medium);
    }

    #[test]
    fn recommendation_tier_bands() {
        assert_eq!(RecommendationTier::from_score(0.91), RecommendationTier::High);
        assert_eq!(RecommendationTier::from_score(0.80), RecommendationTier::Medium);
        assert_eq!(RecommendationTier::from_score(0.75), RecommendationTier::Medium);
        assert_eq!(RecommendationTier::from_score(0.70), RecommendationTier::Low);
    }

    #[test]
    fn threat_class_round_trips_through_serde() {
        let class: ThreatClass = serde_json::from_str("\"Shahed-136\"").unwrap();
        assert_eq!(class, ThreatClass::Shahed136);
        assert_eq!(serde_json::to_string(&class).unwrap(), "\"Shahed-136\"");
    }
}
