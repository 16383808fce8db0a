use std::path::PathBuf;

use clap::Parser;

use jass_bench::config::{BenchConfig, ResolvedOutputs};
use jass_bench::logging::init_logging;
use jass_bench::runner::BenchRunner;
use jass_core::model::round::PlayCheck;

/// Seeded self-play harness for the Jass round engine.
#[derive(Debug, Parser)]
#[command(
    name = "jass-bench",
    author,
    version,
    about = "Deterministic Jass self-play harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the variant (SCHIEBER_1000, SCHIEBER_2500 or HEARTS).
    #[arg(long, value_name = "NAME")]
    variant: Option<String>,

    /// Override the number of rounds to play.
    #[arg(long, value_name = "ROUNDS")]
    rounds: Option<usize>,

    /// Override the RNG seed for deals and play.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Apply cards with or without rule checks.
    #[arg(long, value_name = "MODE")]
    play_check: Option<PlayCheck>,

    /// Exit after validating the configuration (no rounds are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(variant) = cli.variant {
        config.rounds.variant = variant;
    }

    if let Some(rounds) = cli.rounds {
        config.rounds.count = rounds;
    }

    if let Some(seed) = cli.seed {
        config.rounds.seed = Some(seed);
    }

    if let Some(play_check) = cli.play_check {
        config.rounds.play_check = play_check;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let rounds = config.rounds.count;

    println!(
        "Loaded configuration '{run_id}': {} for {rounds} round{}",
        config.rounds.variant,
        if rounds == 1 { "" } else { "s" }
    );

    let logging_guard = init_logging(&config, &outputs)?;
    let runner = BenchRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: self-play skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} rounds, {} games decided -> {} rows at {}",
        summary.rounds_played,
        summary.games_decided,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!(
        "Points: NS {} / EW {}",
        summary.team_points[0], summary.team_points[1]
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
