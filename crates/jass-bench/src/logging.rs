use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing::span::EnteredSpan;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, format::FmtSpan};

use crate::config::{BenchConfig, ResolvedOutputs};

const TELEMETRY_FILE: &str = "telemetry.jsonl";
const ENGINE_TARGETS: [&str; 2] = ["jass_core", "jass_bench"];

/// Holds the telemetry writer and the run span open until dropped.
pub struct LoggingGuard {
    // Dropped before the writer so the span close is flushed.
    _run_span: EnteredSpan,
    _writer: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Directives limiting output to the engine and harness crates at `level`.
/// `RUST_LOG` takes precedence when set.
pub fn engine_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = ENGINE_TARGETS
            .iter()
            .map(|target| format!("{target}={}", level.as_str().to_ascii_lowercase()))
            .collect::<Vec<_>>()
            .join(",");
        EnvFilter::new(format!("warn,{directives}"))
    })
}

/// Writes JSON telemetry next to the summary. Every event carries the run id,
/// variant and seed through the enclosing run span.
pub fn init_logging(config: &BenchConfig, outputs: &ResolvedOutputs) -> Result<Option<LoggingGuard>> {
    let logging = &config.logging;
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_dir = outputs.report_dir();
    fs::create_dir_all(&telemetry_dir)
        .with_context(|| format!("creating telemetry directory at {}", telemetry_dir.display()))?;
    let telemetry_path = telemetry_dir.join(TELEMETRY_FILE);
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file at {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(engine_filter(logging.level().unwrap_or(Level::INFO)))
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing::subscriber::set_global_default(subscriber);

    let run_span = tracing::info_span!(
        "run",
        run_id = %config.run_id,
        variant = %config.rounds.variant,
        seed = config.rounds.seed.unwrap_or(0),
        play_check = %config.rounds.play_check,
    )
    .entered();
    tracing::info!(rounds = config.rounds.count, "telemetry enabled");

    Ok(Some(LoggingGuard {
        _run_span: run_span,
        _writer: guard,
        telemetry_path,
    }))
}
