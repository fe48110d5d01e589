//! ForestVote CLI
//!
//! Play the random forest majority-vote quiz in the terminal, or run the
//! deterministic checks across many seeds.

use anyhow::{Context, Result};
use clap::Parser;
use forestvote_core::{Class, QuizConfig, QuizController};
use forestvote_env::{EntropySource, OsEntropy};
use forestvote_sim::scenarios::ScenarioId;
use forestvote_sim::{Console, RoundExport, ScenarioResult, ScenarioRunner, SimEntropy};
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Random Forest Intuition Quiz
#[derive(Parser, Debug)]
#[command(name = "forestvote")]
#[command(about = "Predict a random forest's majority vote, then see every tree's vote", long_about = None)]
struct Args {
    /// Seed for reproducible rounds (0 = OS entropy)
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Requested number of trees (clamped to 3-15 and forced odd; defaults to the config's count)
    #[arg(short, long)]
    trees: Option<String>,

    /// JSON quiz configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the check scenarios over this many consecutive seeds
    #[arg(long)]
    check: Option<usize>,

    /// Scenario for --check (odd_count, boundary_left, majority_rule, replay, reveal_alignment, guess_before_round, all)
    #[arg(short = 'S', long, default_value = "all")]
    scenario: String,

    /// Rounds generated per scenario
    #[arg(long, default_value = "25")]
    rounds: u64,

    /// Play one round with --guess and export it to this JSON file
    #[arg(long)]
    export: Option<String>,

    /// Guess used by --export (red/blue/0/1)
    #[arg(long, default_value = "red")]
    guess: String,

    /// JSON output for --check
    #[arg(long)]
    json: bool,

    /// Launch the terminal dashboard (requires the `dashboard` feature)
    #[arg(long)]
    tui: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(args: &Args) {
    // Interactive modes share the terminal, so they stay quiet by default
    let interactive = args.check.is_none() && args.export.is_none();
    let level = match (args.verbose, interactive) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = match &args.config {
        Some(path) => QuizConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => QuizConfig::default(),
    };
    let requested = config.first_round_count(args.trees.as_deref()) as i64;

    if let Some(seeds) = args.check {
        return run_checks(&args, seeds, config);
    }

    if args.seed == 0 {
        play(&args, QuizController::new(OsEntropy::new(), config), requested)
    } else {
        play(&args, QuizController::new(SimEntropy::new(args.seed), config), requested)
    }
}

fn play<E: EntropySource>(args: &Args, controller: QuizController<E>, requested: i64) -> Result<()> {
    if let Some(path) = &args.export {
        let guess: Class = args
            .guess
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("parsing --guess")?;
        return export_round(controller, requested, guess, path);
    }

    if args.tui {
        return run_tui(controller, requested);
    }

    let stdin = io::stdin();
    let mut console = Console::new(controller, stdin.lock(), io::stdout()).with_requested(requested);
    let summary = console.run()?;
    info!(
        "Session over: {} rounds, {}/{} correct",
        summary.rounds, summary.correct, summary.guesses
    );
    Ok(())
}

fn export_round<E: EntropySource>(
    mut controller: QuizController<E>,
    requested: i64,
    guess: Class,
    path: &str,
) -> Result<()> {
    controller.start_new_round(requested)?;
    let outcome = controller.submit_guess(guess)?;
    let session = controller.session().context("no session after starting a round")?;

    let export = RoundExport::new(controller.seed(), session, &outcome);
    export
        .write_to_file(path)
        .with_context(|| format!("writing export {}", path))?;

    info!(
        "Exported round {} ({} trees, majority {}) to {}",
        session.round_id,
        session.tree_count(),
        outcome.majority,
        path
    );
    Ok(())
}

#[cfg(feature = "dashboard")]
fn run_tui<E: EntropySource>(controller: QuizController<E>, requested: i64) -> Result<()> {
    let mut dashboard = forestvote_core::dashboard::QuizDashboard::new(controller).with_requested(requested);
    dashboard.run()?;
    Ok(())
}

#[cfg(not(feature = "dashboard"))]
fn run_tui<E: EntropySource>(_controller: QuizController<E>, _requested: i64) -> Result<()> {
    anyhow::bail!("--tui requires the 'dashboard' feature (cargo build --features dashboard)")
}

fn run_checks(args: &Args, seeds: usize, config: QuizConfig) -> Result<()> {
    config.validate()?;

    let scenarios: Vec<ScenarioId> = if args.scenario == "all" {
        ScenarioId::all()
    } else {
        vec![args
            .scenario
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))
            .context("Available scenarios: odd_count, boundary_left, majority_rule, replay, reveal_alignment, guess_before_round, all")?]
    };

    // Determine base seed
    let base_seed = if args.seed == 0 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .context("system clock before UNIX epoch")?
            .as_nanos() as u64
    } else {
        args.seed
    };

    if !args.json {
        info!("ForestVote checks v{}", env!("CARGO_PKG_VERSION"));
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    }

    let mut all_results: Vec<ScenarioResult> = Vec::new();
    for seed_offset in 0..seeds {
        let seed = base_seed.wrapping_add(seed_offset as u64);
        let runner = ScenarioRunner::new(seed)
            .with_rounds(args.rounds)
            .with_config(config.clone());

        for scenario in &scenarios {
            let result = runner.run(*scenario);
            if !args.json {
                if result.passed {
                    info!("✓ {} (seed={}) PASSED", scenario.name(), seed);
                } else {
                    error!(
                        "✗ {} (seed={}) FAILED: {}",
                        scenario.name(),
                        seed,
                        result.failure_reason.as_deref().unwrap_or("unknown")
                    );
                }
            }
            all_results.push(result);
        }
    }

    let total = all_results.len();
    let failed_count = all_results.iter().filter(|r| !r.passed).count();

    if args.json {
        let summary = serde_json::json!({
            "total": total,
            "passed": total - failed_count,
            "failed": failed_count,
            "results": all_results.iter().map(|r| {
                serde_json::json!({
                    "scenario": r.scenario.name(),
                    "seed": r.seed,
                    "passed": r.passed,
                    "rounds": r.rounds,
                    "failure_reason": r.failure_reason,
                })
            }).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if failed_count == 0 {
        info!("✅ All {} scenario runs passed!", total);
    } else {
        error!("❌ {}/{} scenario runs failed!", failed_count, total);
    }

    // Exit with proper code for CI
    if failed_count > 0 {
        std::process::exit(1);
    }
    Ok(())
}
