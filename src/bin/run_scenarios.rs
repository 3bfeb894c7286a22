//! Run every policy scenario over a survey extract
//!
//! Writes per-record reimbursements for all scenarios to one CSV and prints
//! weighted summaries plus the income bracket comparison.

use anyhow::{Context, Result};
use clap::Parser;
use leave_microsim::policy::{load_policies, PolicyParams};
use leave_microsim::simulation::{compare, run_scenario, ComparisonReport, ScenarioOutcome};
use leave_microsim::survey::{load_records, Codebook, InvalidRecordPolicy};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Parser)]
#[command(name = "run_scenarios", about = "Paid-leave reimbursement microsimulation")]
struct Args {
    /// Cleaned survey extract (CSV with WLDAYR, PERWEIGHT, INCFAM07ON, POVERTY)
    #[arg(long)]
    input: PathBuf,

    /// JSON array of policy specs (defaults to counterfactual + adjusted)
    #[arg(long)]
    policies: Option<PathBuf>,

    /// JSON income codebook (defaults to the INCFAM07ON table)
    #[arg(long)]
    codebook: Option<PathBuf>,

    /// Per-record output table
    #[arg(long, default_value = "scenario_results.csv")]
    results: PathBuf,

    /// Write the comparison report as JSON
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Drop rows with missing fields instead of failing the run
    #[arg(long)]
    skip_invalid: bool,

    /// Disable the rayon record map
    #[arg(long)]
    sequential: bool,
}

#[derive(Serialize)]
struct ResultRow<'a> {
    scenario: &'a str,
    id: usize,
    eligible: bool,
    reimbursement: f64,
    survey_weight: f64,
    income_category: u16,
}

fn write_results(path: &Path, outcomes: &[ScenarioOutcome]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for outcome in outcomes {
        for r in &outcome.results {
            writer.serialize(ResultRow {
                scenario: outcome.name(),
                id: r.id,
                eligible: r.eligible,
                reimbursement: r.reimbursement,
                survey_weight: r.survey_weight,
                income_category: r.income_category,
            })?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn print_report(report: &ComparisonReport) {
    println!("\nScenario Summary (survey-weighted):");
    println!("{:<16} {:>10} {:>16} {:>16} {:>14} {:>18}",
             "Scenario", "Records", "Population", "Eligible", "Mean $", "Total cost $");
    for s in &report.scenarios {
        let sum = &s.summary;
        println!("{:<16} {:>10} {:>16.0} {:>16.0} {:>14.2} {:>18.0}",
                 s.scenario, sum.records, sum.population, sum.total_eligible,
                 sum.mean_reimbursement, sum.total_cost);
    }

    println!("\nReimbursement Distribution (unweighted):");
    println!("{:<16} {:>12} {:>12} {:>12} {:>12}", "Scenario", "Mean", "SD", "Min", "Max");
    for s in &report.scenarios {
        match s.stats {
            Some(st) => println!("{:<16} {:>12.2} {:>12.2} {:>12.2} {:>12.2}",
                                 s.scenario, st.mean, st.sd, st.min, st.max),
            None => println!("{:<16} (no records)", s.scenario),
        }
    }

    println!("\nMean Reimbursement by Family Income (unweighted):");
    let header: Vec<String> = report.scenarios.iter()
        .map(|s| format!("{:>14}", s.scenario))
        .collect();
    println!("{:<36}{} {:>12}", "Bracket", header.join(""), "Diff");
    for b in &report.brackets {
        let cells: Vec<String> = b.means.iter()
            .map(|m| match m {
                Some(v) => format!("{:>14.2}", v),
                None => format!("{:>14}", "-"),
            })
            .collect();
        let diff = b.difference.map(|d| format!("{:.2}", d)).unwrap_or_else(|| "-".to_string());
        println!("{:<36}{} {:>12}", b.label, cells.join(""), diff);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let invalid_policy = if args.skip_invalid {
        InvalidRecordPolicy::Skip
    } else {
        InvalidRecordPolicy::Reject
    };

    println!("Loading records from {}...", args.input.display());
    let records = load_records(&args.input, invalid_policy)
        .with_context(|| format!("loading {}", args.input.display()))?;
    println!("Loaded {} records in {:?}", records.len(), start.elapsed());

    let policies = match &args.policies {
        Some(path) => load_policies(path)
            .with_context(|| format!("loading policies from {}", path.display()))?,
        None => vec![PolicyParams::counterfactual(), PolicyParams::adjusted()],
    };
    let codebook = match &args.codebook {
        Some(path) => Codebook::load(path)
            .with_context(|| format!("loading codebook from {}", path.display()))?,
        None => Codebook::default(),
    };

    println!("Running {} scenarios...", policies.len());
    let outcomes: Vec<ScenarioOutcome> = policies
        .iter()
        .map(|params| run_scenario(&records, params, !args.sequential))
        .collect();

    write_results(&args.results, &outcomes)?;
    println!("Per-record results written to {}", args.results.display());

    let report = compare(&outcomes, &codebook)?;
    print_report(&report);

    if let Some(path) = &args.summary {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(file, &report)?;
        println!("\nComparison report written to {}", path.display());
    }

    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
