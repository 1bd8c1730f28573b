//! Decision-support engine for multi-tier air defense engagements.
//!
//! Turns a threat description, an asset roster, and operational constraints
//! into a set of doctrinally motivated response options with estimated
//! costs and success probabilities, then merges in coherence scores from an
//! external ranker.

pub mod assemble;
pub mod engine;
pub mod models;
pub mod patterns;
pub mod query;
pub mod rank;
pub mod scenario;
pub mod specs;
pub mod summary;

pub use assemble::{assemble_option, AssembleError};
pub use engine::{DecisionEngine, EngagementReport, RankingOutcome, ThreatSummary};
pub use models::{
    AssetAvailability, AssetClass, Constraints, GeneratedOption, RankedRecommendation,
    ReadinessStatus, RecommendationTier, TargetPriority, Threat, ThreatClass, ThreatError,
    ThreatReport, Weather,
};
pub use patterns::{PatternCatalog, PatternContext, PatternParams, ResponsePattern};
pub use query::build_situation_query;
pub use rank::{RankedText, Ranker, RankerError};
pub use specs::{AssetSpec, SpecTable, DEFAULT_KILL_PROBABILITY};
pub use summary::{CostTier, SituationSummary, TieredRoster};
