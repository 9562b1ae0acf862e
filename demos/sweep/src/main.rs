//! sweep — run the preset scenario catalogue.
//!
//! Without `--out`, every selected preset runs on Rayon's pool and only the
//! statistics are logged.  With `--out`, runs go one at a time and each
//! writes `experiment_<n>_rep_<r>.csv` into the directory.
//!
//! ```text
//! cargo run --release -p sweep -- --list
//! cargo run --release -p sweep -- --preset Baseline --preset "Low Legitimacy" --repetitions 5
//! cargo run --release -p sweep -- --out output/sweep
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use rb_output::{CountsObserver, CsvWriter};
use rb_sweep::{ParameterSet, RunStats, SweepConfig, run_seed, run_single, run_sweep};

/// Parameter sweep over the preset catalogue.
#[derive(Parser, Debug)]
#[command(name = "sweep")]
#[command(about = "Run preset parameter sets and log run statistics")]
struct Args {
    /// Preset name to run (repeatable); all presets when omitted
    #[arg(long = "preset")]
    presets: Vec<String>,

    /// List preset names and exit
    #[arg(long)]
    list: bool,

    /// Grid width in cells
    #[arg(long, default_value_t = 40)]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = 40)]
    height: u32,

    /// Ticks per run
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Runs per preset
    #[arg(long, default_value_t = 1)]
    repetitions: u32,

    /// Root seed; run seeds are derived from it
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write per-run counts CSVs into this directory
    #[arg(long)]
    out: Option<PathBuf>,
}

fn select(names: &[String]) -> Result<Vec<ParameterSet>> {
    if names.is_empty() {
        return Ok(ParameterSet::presets().to_vec());
    }
    names
        .iter()
        .map(|n| match ParameterSet::find(n) {
            Some(p) => Ok(*p),
            None => bail!("unknown preset {n:?} (see --list)"),
        })
        .collect()
}

fn log_stats(index: usize, preset: &ParameterSet, rep: u32, s: &RunStats) {
    info!(
        experiment = index + 1,
        preset = preset.name,
        rep,
        avg_active = s.active.mean,
        avg_jailed = s.jailed.mean,
        avg_quiet = s.quiet.mean,
        outbreaks = s.outbreak_count,
        frequency = s.rebellion_frequency,
        max_active = s.max_rebellion_size,
        rebellion_steps = s.total_rebellion_steps,
        stability = s.stability_index,
        recovery = s.recovery_time,
        "summary"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if args.list {
        for p in ParameterSet::presets() {
            println!("{}", p.name);
        }
        return Ok(());
    }

    let presets = select(&args.presets)?;
    let config = SweepConfig {
        width:       args.width,
        height:      args.height,
        steps:       args.steps,
        repetitions: args.repetitions,
        seed:        args.seed,
    };
    config.validate()?;
    let t0 = Instant::now();

    match &args.out {
        None => {
            for result in run_sweep(&presets, &config)? {
                for (rep, stats) in result.runs.iter().enumerate() {
                    log_stats(result.index, &result.preset, rep as u32, stats);
                }
            }
        }
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
            for (index, preset) in presets.iter().enumerate() {
                for rep in 0..config.repetitions {
                    let path = dir.join(format!("experiment_{}_rep_{rep}.csv", index + 1));
                    let mut obs = CountsObserver::new(CsvWriter::new(&path)?);
                    let seed = run_seed(&config, index, rep);
                    let (_, stats) = run_single(preset, &config, seed, &mut obs)?;
                    if let Some(e) = obs.take_error() {
                        return Err(e).with_context(|| format!("writing {}", path.display()));
                    }
                    log_stats(index, preset, rep, &stats);
                }
            }
        }
    }

    info!(
        experiments = presets.len(),
        repetitions = config.repetitions,
        elapsed_s = t0.elapsed().as_secs_f64(),
        "sweep complete"
    );
    Ok(())
}
