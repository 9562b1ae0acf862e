//! rebellion — a single run of the civil-unrest model.
//!
//! Runs the baseline scenario (or parameters loaded from a JSON file) on a
//! toroidal grid, writes one counts row per tick to CSV, and logs the run
//! statistics when done.
//!
//! ```text
//! cargo run --release -p rebellion -- --steps 200 --seed 7 --out output/rebellion
//! RUST_LOG=rb_sim=trace cargo run -p rebellion
//! ```

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rb_core::{ModelParams, Tick};
use rb_output::{CountsObserver, CsvWriter, OutputWriter};
use rb_sim::{Census, SimObserver, WorldBuilder};
use rb_sweep::StatsCollector;

/// Single rebellion-model run with per-tick CSV output.
#[derive(Parser, Debug)]
#[command(name = "rebellion")]
#[command(about = "Run the rebellion model once and write per-tick counts")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 40)]
    width: u32,

    /// Grid height in cells
    #[arg(long, default_value_t = 40)]
    height: u32,

    /// Ticks to run
    #[arg(long, default_value_t = 100)]
    steps: u64,

    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// JSON file with model parameters; omitted fields take baseline values
    #[arg(long)]
    params: Option<PathBuf>,

    /// Output directory for counts.csv
    #[arg(long, default_value = "output/rebellion")]
    out: PathBuf,
}

// ── Observer wrapper ─────────────────────────────────────────────────────────

/// Forwards every hook to the CSV observer and the statistics collector.
struct RunObserver<W: OutputWriter> {
    counts: CountsObserver<W>,
    stats:  StatsCollector,
}

impl<W: OutputWriter> SimObserver for RunObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        self.counts.on_tick_end(tick, census);
        self.stats.on_tick_end(tick, census);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.counts.on_sim_end(final_tick);
    }
}

fn load_params(path: Option<&PathBuf>) -> Result<ModelParams> {
    let Some(path) = path else {
        return Ok(ModelParams::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let params: ModelParams = serde_json::from_str(&text)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(params)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let params = load_params(args.params.as_ref())?;

    let (mut world, placement) = WorldBuilder::new(args.width, args.height)
        .seed(args.seed)
        .params(params)
        .build()?;
    info!(
        grid = %world.dims(),
        agents = placement.agents_placed,
        cops = placement.cops_placed,
        seed = args.seed,
        "world ready"
    );

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    let csv_path = args.out.join("counts.csv");
    let mut obs = RunObserver {
        counts: CountsObserver::new(CsvWriter::new(&csv_path)?),
        stats:  StatsCollector::with_capacity(args.steps as usize),
    };

    let t0 = Instant::now();
    world.run(args.steps, &mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.counts.take_error() {
        return Err(e).context("writing counts");
    }

    let census = world.census();
    let stats = obs.stats.stats();
    info!(
        elapsed_s = elapsed.as_secs_f64(),
        rows = obs.counts.rows_written(),
        path = %csv_path.display(),
        "run complete"
    );
    info!(
        active = census.active,
        jailed = census.jailed,
        quiet = census.quiet,
        cops = census.cops,
        "final census"
    );
    info!(
        outbreaks = stats.outbreak_count,
        frequency = stats.rebellion_frequency,
        avg_active = stats.avg_rebellion_size,
        max_active = stats.max_rebellion_size,
        rebellion_steps = stats.total_rebellion_steps,
        stability = stats.stability_index,
        recovery = stats.recovery_time,
        "run statistics"
    );
    info!(
        active = ?(stats.active.mean, stats.active.min, stats.active.max),
        jailed = ?(stats.jailed.mean, stats.jailed.min, stats.jailed.max),
        quiet = ?(stats.quiet.mean, stats.quiet.min, stats.quiet.max),
        "series mean/min/max"
    );

    Ok(())
}
