//! Engagement orchestration: generate options, rank them externally, merge
//! the scores back, and report with timing telemetry.

use crate::assemble::assemble_option;
use crate::models::{
    AssetAvailability, Constraints, GeneratedOption, RankedRecommendation, RecommendationTier,
    Threat,
};
use crate::patterns::{PatternCatalog, PatternContext};
use crate::query::build_situation_query;
use crate::rank::{RankedText, Ranker};
use crate::specs::SpecTable;
use crate::summary::{SituationSummary, TieredRoster};
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;

/// Compact threat echo attached to every report.
#[derive(Debug, Clone, Serialize)]
pub struct ThreatSummary {
    pub class: String,
    pub count: u32,
    pub range_km: f64,
    pub priority: String,
    pub time_to_impact_min: f64,
}

impl ThreatSummary {
    fn of(threat: &Threat) -> Self {
        Self {
            class: threat.class.label().to_string(),
            count: threat.count,
            range_km: threat.range_km,
            priority: threat.priority.label().to_string(),
            time_to_impact_min: threat.time_to_impact_min,
        }
    }
}

/// Outcome of one full invocation. Ranker failure still carries the
/// generated options, so the caller never receives an empty silent success.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RankingOutcome {
    Ranked {
        recommendations: Vec<RankedRecommendation>,
        /// Ranker texts that matched no generated narrative and were kept
        /// with placeholder metadata.
        unmatched_results: usize,
    },
    RankerUnavailable {
        reason: String,
        options: Vec<GeneratedOption>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct EngagementReport {
    pub generation_time_ms: f64,
    pub ranker_latency_ms: f64,
    pub total_time_ms: f64,
    pub options_generated: usize,
    pub query: String,
    pub threat_summary: ThreatSummary,
    pub outcome: RankingOutcome,
}

/// The decision-support engine: a specification table plus a pattern
/// catalog. Stateless across invocations; safe to share behind an `Arc`.
pub struct DecisionEngine {
    specs: SpecTable,
    catalog: PatternCatalog,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(SpecTable::builtin())
    }
}

impl DecisionEngine {
    pub fn new(specs: SpecTable) -> Self {
        Self {
            specs,
            catalog: PatternCatalog::default(),
        }
    }

    pub fn with_catalog(specs: SpecTable, catalog: PatternCatalog) -> Self {
        Self { specs, catalog }
    }

    pub fn specs(&self) -> &SpecTable {
        &self.specs
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Evaluate the full catalog for one situation. Declined patterns are
    /// skipped silently; assembly failures drop that option with a warning.
    pub fn generate_options(
        &self,
        threat: &Threat,
        roster: &[AssetAvailability],
        constraints: &Constraints,
    ) -> Vec<GeneratedOption> {
        let summary = SituationSummary::from_roster(roster);
        let tiers = TieredRoster::from_roster(roster);
        let ctx = PatternContext {
            threat,
            roster,
            summary: &summary,
            tiers: &tiers,
            constraints,
            specs: &self.specs,
        };
        let generated_at = Utc::now();

        self.catalog
            .evaluate(&ctx)
            .into_iter()
            .filter_map(|(pattern, params)| {
                match assemble_option(pattern, params, generated_at) {
                    Ok(option) => Some(option),
                    Err(err) => {
                        tracing::warn!(
                            pattern = pattern.id(),
                            error = %err,
                            "dropping option that failed assembly"
                        );
                        None
                    }
                }
            })
            .collect()
    }

    /// Full pipeline: generate, query the ranker, merge, report.
    pub async fn process<R: Ranker>(
        &self,
        ranker: &R,
        threat: &Threat,
        roster: &[AssetAvailability],
        constraints: &Constraints,
        commander_context: &str,
    ) -> EngagementReport {
        let started = Instant::now();

        let options = self.generate_options(threat, roster, constraints);
        let generation_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(options = options.len(), "generated tactical options");

        let query = build_situation_query(threat, roster, constraints, commander_context);
        let candidates: Vec<String> = options
            .iter()
            .map(|option| option.description.clone())
            .collect();

        let ranker_started = Instant::now();
        let ranked = ranker.rank(&query, &candidates).await;
        let ranker_latency_ms = ranker_started.elapsed().as_secs_f64() * 1000.0;

        let options_generated = options.len();
        let outcome = match ranked {
            Ok(results) => {
                let (recommendations, unmatched_results) = merge_rankings(options, results);
                RankingOutcome::Ranked {
                    recommendations,
                    unmatched_results,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "ranker unavailable, returning unranked options");
                RankingOutcome::RankerUnavailable {
                    reason: err.to_string(),
                    options,
                }
            }
        };

        EngagementReport {
            generation_time_ms,
            ranker_latency_ms,
            total_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            options_generated,
            query,
            threat_summary: ThreatSummary::of(threat),
            outcome,
        }
    }
}

/// Merge ranker scores back onto option records by exact narrative match.
/// A result with no matching narrative is kept with placeholder metadata
/// rather than dropped, and counted so the caller can see it happened.
fn merge_rankings(
    options: Vec<GeneratedOption>,
    results: Vec<RankedText>,
) -> (Vec<RankedRecommendation>, usize) {
    let mut unmatched = 0usize;

    let recommendations = results
        .into_iter()
        .enumerate()
        .map(|(index, result)| {
            let rank = index + 1;
            let tier = RecommendationTier::from_score(result.score);
            match options
                .iter()
                .find(|option| option.description == result.text)
            {
                Some(option) => RankedRecommendation {
                    rank,
                    coherence: result.score,
                    title: option.title.clone(),
                    description: result.text,
                    pattern_id: option.pattern_id.clone(),
                    estimated_cost: option.estimated_cost,
                    estimated_success_pct: option.estimated_success_pct,
                    assets_used: option.assets_used.clone(),
                    tier,
                },
                None => {
                    unmatched += 1;
                    tracing::warn!(rank, "ranker text matches no generated narrative");
                    RankedRecommendation {
                        rank,
                        coherence: result.score,
                        title: format!("Option {rank}"),
                        description: result.text,
                        pattern_id: "unknown".to_string(),
                        estimated_cost: 0,
                        estimated_success_pct: 0,
                        assets_used: Vec::new(),
                        tier,
                    }
                }
            }
        })
        .collect();

    (recommendations, unmatched)
}
