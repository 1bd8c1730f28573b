//! Option assembly: narrative rendering over computed parameter sets.
//!
//! Numeric computation happens in the pattern calculators; this module is a
//! pure formatting step over the resulting parameter sets. A malformed set
//! fails assembly for that one option only.

use crate::models::GeneratedOption;
use crate::patterns::{
    CoordinationParams, EwKineticParams, ImmediatePremiumParams, LayeredDefenseParams,
    MinimalDefenseParams, PatternParams, ResponsePattern, StagedInterceptParams,
};
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("pattern '{pattern}' produced {layers} layers, expected 3")]
    MalformedLayers { pattern: String, layers: usize },
}

/// Build one renderable option from a qualifying pattern's parameters.
pub fn assemble_option(
    pattern: &dyn ResponsePattern,
    params: PatternParams,
    generated_at: DateTime<Utc>,
) -> Result<GeneratedOption, AssembleError> {
    let description = render(pattern, &params)?;

    Ok(GeneratedOption {
        option_id: option_id(pattern.id(), generated_at),
        title: pattern.title().to_string(),
        description,
        pattern_id: pattern.id().to_string(),
        estimated_cost: params.cost(),
        estimated_success_pct: params.success_pct(),
        assets_used: params.assets_used().to_vec(),
        parameters: params,
    })
}

fn option_id(pattern_id: &str, generated_at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", pattern_id, generated_at.timestamp(), &suffix[..8])
}

fn render(pattern: &dyn ResponsePattern, params: &PatternParams) -> Result<String, AssembleError> {
    let text = match params {
        PatternParams::ImmediatePremium(p) => render_immediate(p),
        PatternParams::StagedIntercept(p) => render_staged(p),
        PatternParams::LayeredDefense(p) => render_layered(pattern, p)?,
        PatternParams::MinimalDefense(p) => render_minimal(p),
        PatternParams::EwKinetic(p) => render_ew_kinetic(p),
        PatternParams::Coordination(p) => render_coordination(p),
    };
    Ok(text.trim().to_string())
}

/// Whole-dollar amount with thousands separators.
fn usd(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${out}")
}

fn render_immediate(p: &ImmediatePremiumParams) -> String {
    format!(
        "OPTION: Immediate defense of critical infrastructure (PRIORITY 1)\n\
         \n\
         DOCTRINE: critical target. Commit premium interceptors now.\n\
         \n\
         Engage with {system} immediately:\n\
         - {allocated}x {system} against {count}x {threat}\n\
         - Range: {range} km\n\
         - Time to launch: {launch} minutes\n\
         - Reserve: {reserved}x {system} plus all remaining systems\n\
         \n\
         RATIONALE:\n\
         - Target \"{target}\" is CRITICAL (ammunition, power, command)\n\
         - Doctrine mandates immediate use of premium systems\n\
         - Leakage risk is unacceptable\n\
         \n\
         ADVANTAGES:\n\
         - {success}% kill probability\n\
         - Maximum confidence in the defense\n\
         \n\
         COST: {cost}\n\
         SUCCESS PROBABILITY: {success}%\n\
         PRIORITY LEVEL: CRITICAL",
        system = p.system,
        allocated = p.rounds_allocated,
        count = p.threat_count,
        threat = p.threat_label,
        range = p.range_km,
        launch = p.time_to_launch_min,
        reserved = p.rounds_reserved,
        target = p.target_description,
        cost = usd(p.cost),
        success = p.success_pct,
    )
}

fn render_staged(p: &StagedInterceptParams) -> String {
    format!(
        "OPTION: Interceptor drones with a missile reserve (PRIORITY 2)\n\
         \n\
         DOCTRINE: high priority beyond standoff range. Try drones first.\n\
         \n\
         STAGE 1 (interceptor drones):\n\
         - {drones}x {drone_system} against {count}x {threat}\n\
         - Launch: {launch} minutes\n\
         - Cost: {drone_cost}\n\
         - Probability: {drone_success}%\n\
         \n\
         STAGE 2 (if leakers get through):\n\
         - {backups}x {backup_system} held ready\n\
         - Engagement range: {backup_range} km\n\
         - Additional cost: {backup_cost}\n\
         \n\
         OUTCOMES:\n\
         - Drones succeed: only {drone_cost} spent, missiles preserved\n\
         - Drones miss: {backup_system} engages, {total_cost} total\n\
         \n\
         ADVANTAGES:\n\
         - Expensive missiles spent only on leakers\n\
         - Two layers of defense\n\
         \n\
         COST: {total_cost}\n\
         SUCCESS PROBABILITY: {success}% (cumulative)",
        drones = p.drone_count,
        drone_system = p.drone_system,
        count = p.threat_count,
        threat = p.threat_label,
        launch = p.drone_launch_min,
        drone_cost = usd(p.drone_cost),
        drone_success = p.drone_success_pct,
        backups = p.backup_count,
        backup_system = p.backup_system,
        backup_range = p.backup_range_km.round(),
        backup_cost = usd(p.backup_cost),
        total_cost = usd(p.cost),
        success = p.success_pct,
    )
}

fn render_layered(
    pattern: &dyn ResponsePattern,
    p: &LayeredDefenseParams,
) -> Result<String, AssembleError> {
    let [first, second, third] = p.layers.as_slice() else {
        return Err(AssembleError::MalformedLayers {
            pattern: pattern.id().to_string(),
            layers: p.layers.len(),
        });
    };

    let layer = |index: usize, plan: &crate::patterns::LayerPlan, note: &str| {
        format!(
            "LAYER {index} ({range} km): {system}\n\
             - {rounds}x {system}{note}\n\
             - Cost: {cost}\n\
             - Probability: {success}%\n",
            index = index,
            range = plan.range_km.round(),
            system = plan.system,
            rounds = plan.rounds,
            note = note,
            cost = usd(plan.cost),
            success = plan.success_pct,
        )
    };

    Ok(format!(
        "OPTION: Layered defense with economical systems (PRIORITY 3)\n\
         \n\
         DOCTRINE: medium priority. Spend cheap systems, keep the missiles.\n\
         \n\
         {layer1}\n\
         {layer2}\n\
         {layer3}\n\
         ECONOMICS:\n\
         - Minimum cost: {min_cost} (layer 1 only)\n\
         - Typical cost: {typical_cost} (layers 1-2)\n\
         - Maximum cost: {max_cost} (all layers)\n\
         - Missiles preserved for follow-on waves\n\
         \n\
         ADVANTAGES:\n\
         - Multiple intercept opportunities\n\
         - Minimal spend when the first layer connects\n\
         \n\
         COST: {typical_cost}\n\
         SUCCESS PROBABILITY: {cumulative}%",
        layer1 = layer(1, first, ""),
        layer2 = layer(2, second, " (if leakers)"),
        layer3 = layer(3, third, " (last reserve)"),
        min_cost = usd(p.min_cost),
        typical_cost = usd(p.cost),
        max_cost = usd(p.max_cost),
        cumulative = p.cumulative_success_pct,
    ))
}

fn render_minimal(p: &MinimalDefenseParams) -> String {
    format!(
        "OPTION: Minimal defense, accept calculated risk (PRIORITY 4)\n\
         \n\
         DOCTRINE: low priority. Mobile groups only, spend no missiles.\n\
         \n\
         Employ economical systems exclusively:\n\
         - {mobile}x mobile fire groups\n\
         - {drones}x interceptor drones (as available)\n\
         - {helicopters}x helicopters (weather permitting)\n\
         \n\
         HOLD ALL MISSILES for higher-value targets.\n\
         \n\
         RATIONALE:\n\
         - Target \"{target}\" is low priority\n\
         - Doctrine tolerates some leakage on low-priority targets\n\
         - {waves} further waves expected, preserve capability\n\
         \n\
         ACCEPTED RISK:\n\
         - {losses} of {count} threats may get through\n\
         - 100% of missiles preserved for critical threats\n\
         \n\
         COST: {cost} (MINIMAL)\n\
         SUCCESS PROBABILITY: {success}%\n\
         MISSILES PRESERVED: 100%",
        mobile = p.mobile_units,
        drones = p.drone_units,
        helicopters = p.helicopter_units,
        target = p.target_description,
        waves = p.follow_on_waves,
        losses = p.acceptable_losses,
        count = p.threat_count,
        cost = usd(p.cost),
        success = p.success_pct,
    )
}

fn render_ew_kinetic(p: &EwKineticParams) -> String {
    format!(
        "OPTION: Electronic suppression plus kinetic engagement\n\
         \n\
         Combined approach for {threat}:\n\
         \n\
         STAGE 1: EW suppression\n\
         - Jam the navigation and control link\n\
         - ZERO marginal cost (reusable capability)\n\
         - {ew_success}% probability\n\
         \n\
         STAGE 2: Kinetic systems (if jamming fails)\n\
         - {kinetic_count}x {kinetic_system}\n\
         - Cost: {kinetic_cost}\n\
         - {kinetic_success}% probability\n\
         \n\
         STAGE 3: Reserve\n\
         - {backup_system} standing by\n\
         \n\
         WHY {threat}:\n\
         - Highly vulnerable to navigation jamming\n\
         - Missiles preserved whenever jamming connects\n\
         \n\
         COST: {cost}\n\
         SUCCESS PROBABILITY: {combined}%",
        threat = p.threat_label,
        ew_success = p.ew_success_pct,
        kinetic_count = p.kinetic_count,
        kinetic_system = p.kinetic_system,
        kinetic_cost = usd(p.kinetic_cost),
        kinetic_success = p.kinetic_success_pct,
        backup_system = p.backup_system,
        cost = usd(p.cost),
        combined = p.combined_success_pct,
    )
}

fn render_coordination(p: &CoordinationParams) -> String {
    format!(
        "OPTION: Request brigade coordination\n\
         \n\
         Coordinate allocation across the sector for the whole night:\n\
         \n\
         LOCAL CONTRIBUTION:\n\
         - Minimal expenditure: {allocation}\n\
         - Holding {reserve}% in reserve\n\
         \n\
         SUPPORT REQUEST:\n\
         - Sources: {sources}\n\
         - Response time: {response} minutes\n\
         - Expected: {expected}\n\
         \n\
         RATIONALE:\n\
         - {waves} further attack waves expected\n\
         - Local stocks are limited ({rounds} rounds)\n\
         - Brigade-level allocation is more efficient\n\
         \n\
         RISKS:\n\
         - Coordination takes {response} minutes\n\
         - Threat currently at {range} km\n\
         - Support may arrive late\n\
         \n\
         COST: {cost} (minimal)\n\
         SUCCESS PROBABILITY: {success}% (depends on coordination)",
        allocation = p.local_allocation,
        reserve = p.reserve_pct,
        sources = p.support_sources,
        response = p.response_time_min,
        expected = p.expected_support,
        waves = p.follow_on_waves,
        rounds = p.total_rounds,
        range = p.threat_range_km,
        cost = usd(p.cost),
        success = p.success_pct,
    )
}
