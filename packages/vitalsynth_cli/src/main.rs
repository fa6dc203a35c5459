//! vitalsynth: generate a synthetic health-metrics dataset as JSON.
//!
//! ```text
//! vitalsynth 2025-03-01 2025-03-15 > health_data.json
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::oneshot;

use vitalsynth::{
    analyze_cancellable, CannedAnalyzer, GenerateError, GeneratorConfig, HealthDataset,
    Synthesizer,
};

#[derive(Parser, Debug)]
#[command(name = "vitalsynth", version, about = "Generate synthetic health-metrics records")]
struct Cli {
    /// First day to generate (YYYY-MM-DD)
    from_date: String,

    /// Last day to generate, inclusive (YYYY-MM-DD)
    to_date: String,

    /// Seed for reproducible output; defaults to OS entropy
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file overriding generator constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write JSON here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit per-day aggregates instead of raw records
    #[arg(long, conflicts_with = "analyze")]
    summary: bool,

    /// Run the simulated analysis on the last generated day
    #[arg(long)]
    analyze: bool,

    /// Delay before the simulated analysis returns
    #[arg(long, default_value_t = 2000)]
    analysis_delay_ms: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(GenerateError::InvalidDate { .. }) = e.downcast_ref::<GenerateError>() {
                eprintln!("Error: {}", e);
                eprintln!("Usage: vitalsynth <fromDate> <toDate>");
                eprintln!("Example: vitalsynth 2025-03-01 2025-03-15");
            } else {
                eprintln!("Error: {:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_path(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GeneratorConfig::default(),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let dataset = Synthesizer::new(&config).generate_str(&cli.from_date, &cli.to_date, &mut rng)?;
    if dataset.is_empty() {
        log::warn!("{} is after {}, no records generated", cli.from_date, cli.to_date);
    }

    let json = if cli.summary {
        serde_json::to_string_pretty(&dataset.daily_summaries())?
    } else if cli.analyze {
        match analyze_last_day(&dataset, Duration::from_millis(cli.analysis_delay_ms)).await? {
            Some(json) => json,
            None => {
                log::warn!("No generated days to analyze");
                dataset.to_json_pretty()?
            }
        }
    } else {
        dataset.to_json_pretty()?
    };

    emit(&json, cli.output.as_deref())
}

fn emit(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, format!("{}\n", json))
            .with_context(|| format!("writing {}", path.display())),
        None => write_ignoring_closed_pipe(&mut io::stdout().lock(), json)
            .context("writing to stdout"),
    }
}

/// A reader that hangs up early (`| head`) is not an error.
fn write_ignoring_closed_pipe(out: &mut impl Write, json: &str) -> io::Result<()> {
    match writeln!(out, "{}", json).and_then(|()| out.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("stdout closed before output finished");
            Ok(())
        }
        result => result,
    }
}

async fn analyze_last_day(dataset: &HealthDataset, delay: Duration) -> Result<Option<String>> {
    let Some(day) = dataset.daily_summaries().pop() else {
        return Ok(None);
    };

    let (cancel_tx, cancel_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = cancel_tx.send(());
        }
    });

    let analyzer = CannedAnalyzer::new(delay);
    eprintln!("Analyzing {}...", day.date);
    let summary = analyze_cancellable(&analyzer, &day, cancel_rx).await?;
    Ok(Some(serde_json::to_string_pretty(&summary)?))
}
