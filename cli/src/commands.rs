//! CLI command implementations.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use cohort_ladder_core::export::{global_outcome_rows, history_rows};
use cohort_ladder_core::{
    default_scenarios, run_scenarios, OrchestratorConfig, Scenario, ScenarioOutcome,
    SimulationError, GLOBAL_OUTCOME_COLUMNS, HISTORY_COLUMNS,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::csv::write_table;
use crate::{Format, RunArgs};

const HISTORIES_STEM: &str = "per_agent_histories";
const OUTCOMES_STEM: &str = "global_outcomes";

/// Exit code for a run where at least one scenario hit the turn ceiling
const EXIT_NON_CONVERGENCE: u8 = 2;

/// Print the default configuration, usable as a `--config` template.
pub fn print_default_config() -> Result<()> {
    let json = serde_json::to_string_pretty(&OrchestratorConfig::default())
        .context("serialize default config")?;
    println!("{}", json);
    Ok(())
}

/// Run the scenarios and write both tables.
pub fn run(args: &RunArgs) -> Result<ExitCode> {
    let base = load_config(args)?;
    let scenarios = if args.luck.is_empty() {
        default_scenarios()
    } else {
        args.luck.iter().map(|&l| Scenario::from_luck(l)).collect()
    };

    info!(
        scenarios = scenarios.len(),
        target = base.target_samples,
        seed = base.rng_seed,
        "starting scenarios"
    );
    let outcomes = run_scenarios(&base, &scenarios);

    let mut histories = Vec::new();
    let mut global_outcomes = Vec::new();
    let mut non_converged = 0;

    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => {
                debug!(scenario = %outcome.scenario.name, turns = report.turns, "converged");
            }
            Err(SimulationError::NonConvergence { turns, report }) => {
                non_converged += 1;
                for shortfall in report.shortfalls() {
                    warn!(
                        scenario = %outcome.scenario.name,
                        turns,
                        profile = %shortfall.profile,
                        collected = shortfall.collected,
                        target = shortfall.target,
                        "scenario did not converge"
                    );
                }
            }
            Err(e) => {
                return Err(e.clone())
                    .with_context(|| format!("scenario {}", outcome.scenario.name));
            }
        }
        collect_rows(outcome, &mut histories, &mut global_outcomes);
    }

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create {}", args.out_dir.display()))?;

    let histories_path = output_path(&args.out_dir, HISTORIES_STEM, args.format);
    let outcomes_path = output_path(&args.out_dir, OUTCOMES_STEM, args.format);

    let history_count = match args.format {
        Format::Csv => write_csv(
            &histories_path,
            &HISTORY_COLUMNS,
            histories.iter().map(|r| r.csv_fields()),
        )?,
        Format::Json => write_json(&histories_path, &histories)?,
    };
    let outcome_count = match args.format {
        Format::Csv => write_csv(
            &outcomes_path,
            &GLOBAL_OUTCOME_COLUMNS,
            global_outcomes.iter().map(|r| r.csv_fields()),
        )?,
        Format::Json => write_json(&outcomes_path, &global_outcomes)?,
    };

    println!(
        "run: histories={} rows={}",
        histories_path.display(),
        history_count
    );
    println!(
        "run: outcomes={} rows={}",
        outcomes_path.display(),
        outcome_count
    );

    if non_converged > 0 {
        eprintln!(
            "warning: {} of {} scenario(s) reached the turn ceiling; partial data exported",
            non_converged,
            outcomes.len()
        );
        return Ok(ExitCode::from(EXIT_NON_CONVERGENCE));
    }
    Ok(ExitCode::SUCCESS)
}

fn load_config(args: &RunArgs) -> Result<OrchestratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("read {}", path.display()))?;
            serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))?
        }
        None => OrchestratorConfig::default(),
    };
    if let Some(target) = args.target {
        config.target_samples = target;
    }
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }
    Ok(config)
}

fn collect_rows(
    outcome: &ScenarioOutcome,
    histories: &mut Vec<cohort_ladder_core::HistoryRow>,
    global_outcomes: &mut Vec<cohort_ladder_core::GlobalOutcomeRow>,
) {
    if let Some(report) = outcome.report() {
        histories.extend(history_rows(&outcome.scenario, report));
        global_outcomes.extend(global_outcome_rows(&outcome.scenario, report));
    }
}

fn output_path(dir: &Path, stem: &str, format: Format) -> PathBuf {
    dir.join(format!("{}.{}", stem, format.extension()))
}

fn write_csv<I>(path: &Path, header: &[&str], rows: I) -> Result<usize>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let count =
        write_table(&mut out, header, rows).with_context(|| format!("write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(count)
}

fn write_json<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, rows)
        .with_context(|| format!("write {}", path.display()))?;
    out.flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(rows.len())
}
