use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;
use pitch_core::{ActionRequest, BehaviourSettings, WorldSnapshot};
use pitch_executor::Ticker;

#[derive(Debug, Parser)]
#[command(name = "pitch-cli")]
pub(crate) struct Args {
    /// JSON array of world snapshots, ticked in order
    #[clap(long)]
    snapshots: PathBuf,

    /// Behaviour settings file, created with defaults if missing
    #[clap(long)]
    settings: Option<PathBuf>,

    /// Body skill, overrides the settings
    #[clap(long)]
    skill: Option<String>,

    /// Head skill, overrides the settings
    #[clap(long)]
    head_skill: Option<String>,

    #[clap(long, default_value = "info")]
    log_level: String,

    /// Where to write the action requests, one JSON object per line. Defaults to stdout.
    #[clap(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = tracing::Level::from_str(&args.log_level)
        .map_err(|_| anyhow::anyhow!("Invalid log level: {}", args.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .without_time()
        .with_writer(io::stderr)
        .init();

    let mut settings = match &args.settings {
        Some(path) => BehaviourSettings::load_or_insert(path)?,
        None => BehaviourSettings::default(),
    };
    if let Some(skill) = args.skill {
        settings.body_skill = skill;
    }
    if let Some(head_skill) = args.head_skill {
        settings.head_skill = head_skill;
    }

    let contents = std::fs::read_to_string(&args.snapshots)
        .with_context(|| format!("Failed to read snapshots from {}", args.snapshots.display()))?;
    let snapshots: Vec<WorldSnapshot> =
        serde_json::from_str(&contents).context("Failed to parse snapshots")?;
    tracing::info!(
        "Replaying {} snapshots with {} / {}",
        snapshots.len(),
        settings.body_skill,
        settings.head_skill
    );

    let mut ticker = Ticker::new(settings);
    let failures = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            replay(&mut ticker, snapshots, BufWriter::new(file))?
        }
        None => replay(&mut ticker, snapshots, io::stdout().lock())?,
    };

    if failures > 0 {
        tracing::warn!("{} ticks failed and fell back to the default request", failures);
    }
    Ok(())
}

/// Tick once per snapshot and write each request as a JSON line. Returns the
/// number of failed ticks.
fn replay(
    ticker: &mut Ticker,
    snapshots: Vec<WorldSnapshot>,
    mut out: impl Write,
) -> Result<usize> {
    let mut failures = 0;
    for snapshot in snapshots {
        let timestamp = snapshot.timestamp;
        let request = match ticker.tick(snapshot) {
            Ok(request) => request,
            Err(err) => {
                tracing::error!("Tick at {:.3}s failed: {}", timestamp, err);
                failures += 1;
                ActionRequest::default()
            }
        };
        serde_json::to_writer(&mut out, &request)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(failures)
}
