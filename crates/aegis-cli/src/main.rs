//! Aegis CLI - run an engagement scenario through the engine from the
//! command line, against a live ranker or offline.

use aegis_core::scenario::reference_scenario;
use aegis_core::{
    AssetAvailability, Constraints, DecisionEngine, RankingOutcome, Threat, ThreatReport,
};
use aegis_ranker::RankerClient;
use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "aegis-cli",
    about = "Run an engagement scenario through the decision engine"
)]
struct Cli {
    /// Scenario JSON file; the built-in reference scenario when omitted.
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Compare endpoint of the external ranker.
    #[arg(long, default_value = "http://localhost:8000/v1/compare")]
    ranker_url: String,
    /// Skip ranking and print the generated options only.
    #[arg(long)]
    offline: bool,
}

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    threat: ThreatReport,
    assets: Vec<AssetAvailability>,
    #[serde(default)]
    constraints: Constraints,
    #[serde(default)]
    commander_context: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (threat_report, roster, constraints, context) = match &cli.scenario {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let file: ScenarioFile =
                serde_json::from_str(&raw).context("parsing scenario file")?;
            (file.threat, file.assets, file.constraints, file.commander_context)
        }
        None => {
            let scenario = reference_scenario();
            (
                scenario.threat,
                scenario.roster,
                scenario.constraints,
                scenario.commander_context,
            )
        }
    };

    let threat = Threat::try_from(threat_report).context("invalid threat")?;
    let engine = DecisionEngine::default();

    if cli.offline {
        let options = engine.generate_options(&threat, &roster, &constraints);
        println!("Generated {} option(s):\n", options.len());
        for (i, option) in options.iter().enumerate() {
            println!("{}. {} [{}]", i + 1, option.title, option.pattern_id);
            println!(
                "   Cost: ${}, success: {}%",
                option.estimated_cost, option.estimated_success_pct
            );
            println!("   Systems: {}\n", option.assets_used.join(", "));
        }
        return Ok(());
    }

    let ranker = RankerClient::new(cli.ranker_url.clone());
    let report = engine
        .process(&ranker, &threat, &roster, &constraints, &context)
        .await;

    println!(
        "Generated {} option(s) in {:.0} ms",
        report.options_generated, report.generation_time_ms
    );

    match report.outcome {
        RankingOutcome::Ranked {
            recommendations,
            unmatched_results,
        } => {
            println!("Ranker answered in {:.0} ms\n", report.ranker_latency_ms);
            for rec in &recommendations {
                println!(
                    "#{} [{:?}] coherence {:.4} - {}",
                    rec.rank, rec.tier, rec.coherence, rec.title
                );
                println!(
                    "   Cost: ${}, success: {}%",
                    rec.estimated_cost, rec.estimated_success_pct
                );
                println!("   Systems: {}\n", rec.assets_used.join(", "));
            }
            if unmatched_results > 0 {
                eprintln!(
                    "warning: {unmatched_results} ranked text(s) matched no generated narrative"
                );
            }
        }
        RankingOutcome::RankerUnavailable { reason, options } => {
            eprintln!("Ranker unavailable ({reason}); showing unranked options\n");
            for (i, option) in options.iter().enumerate() {
                println!(
                    "{}. {} [{}] - ${}, {}%",
                    i + 1,
                    option.title,
                    option.pattern_id,
                    option.estimated_cost,
                    option.estimated_success_pct
                );
            }
        }
    }

    Ok(())
}
