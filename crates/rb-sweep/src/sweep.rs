//! Experiment and sweep runners.

use tracing::{debug, info};

use rb_core::{stream_seed, Tick};
use rb_sim::{Census, NoopObserver, Placement, SimObserver, WorldBuilder};

use crate::{ParameterSet, RunStats, StatsCollector, SweepError, SweepResult};

/// Grid, run length and seeding shared by every experiment of a sweep.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SweepConfig {
    pub width:       u32,
    pub height:      u32,
    /// Ticks per run.
    pub steps:       u64,
    /// Independent runs per parameter set.
    pub repetitions: u32,
    /// Root seed; every run seed is derived from it.
    pub seed:        u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self { width: 40, height: 40, steps: 100, repetitions: 1, seed: 42 }
    }
}

impl SweepConfig {
    /// Reject configurations that would silently run nothing.  Grid extents
    /// are checked by the engine itself.
    pub fn validate(&self) -> SweepResult<()> {
        if self.repetitions == 0 {
            return Err(SweepError::Config("repetitions must be at least 1"));
        }
        Ok(())
    }
}

/// Results of every repetition of one parameter set.
#[derive(Clone, Debug, PartialEq)]
pub struct ExperimentResult {
    /// Position of the parameter set in the sweep, from 0.
    pub index:     usize,
    pub preset:    ParameterSet,
    /// Placement of the first repetition.
    pub placement: Placement,
    /// One entry per repetition, in repetition order.
    pub runs:      Vec<RunStats>,
}

/// Seed of repetition `rep` of experiment `index`.
///
/// Depends only on the sweep's root seed and the run's position, never on
/// execution order.
pub fn run_seed(config: &SweepConfig, index: usize, rep: u32) -> u64 {
    let stream = index as u64 * u64::from(config.repetitions) + u64::from(rep);
    stream_seed(config.seed, stream)
}

/// Feeds the stats collector and a caller-supplied observer from one run.
struct Tee<'a, O> {
    stats: &'a mut StatsCollector,
    inner: &'a mut O,
}

impl<O: SimObserver> SimObserver for Tee<'_, O> {
    fn on_tick_start(&mut self, tick: Tick) {
        self.inner.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        self.stats.on_tick_end(tick, census);
        self.inner.on_tick_end(tick, census);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

/// Build one world for `preset`, run it for `config.steps` ticks, and
/// return its placement and statistics.
///
/// `observer` sees the same hooks as the statistics collector, which lets
/// callers write per-tick output alongside.
pub fn run_single<O: SimObserver>(
    preset:   &ParameterSet,
    config:   &SweepConfig,
    seed:     u64,
    observer: &mut O,
) -> SweepResult<(Placement, RunStats)> {
    let (mut world, placement) = WorldBuilder::new(config.width, config.height)
        .seed(seed)
        .params(preset.to_params())
        .build()?;

    let mut stats = StatsCollector::with_capacity(config.steps as usize);
    world.run(config.steps, &mut Tee { stats: &mut stats, inner: observer })?;

    let run = stats.stats();
    debug!(
        preset = preset.name,
        seed,
        outbreaks = run.outbreak_count,
        "run complete"
    );
    Ok((placement, run))
}

/// Run every repetition of `preset` as experiment number `index`.
pub fn run_experiment(
    index:  usize,
    preset: &ParameterSet,
    config: &SweepConfig,
) -> SweepResult<ExperimentResult> {
    config.validate()?;
    info!(
        experiment = index + 1,
        preset = preset.name,
        cop_density = preset.cop_density,
        agent_density = preset.agent_density,
        legitimacy = preset.legitimacy,
        max_jail_term = preset.max_jail_term,
        vision = preset.vision,
        "running experiment"
    );

    let mut placement = Placement::default();
    let mut runs = Vec::with_capacity(config.repetitions as usize);
    for rep in 0..config.repetitions {
        let seed = run_seed(config, index, rep);
        let (placed, stats) = run_single(preset, config, seed, &mut NoopObserver)?;
        if rep == 0 {
            placement = placed;
        }
        runs.push(stats);
    }

    if let Some(first) = runs.first() {
        info!(
            experiment = index + 1,
            outbreaks = first.outbreak_count,
            max_active = first.max_rebellion_size,
            avg_active = first.avg_rebellion_size,
            stability = first.stability_index,
            recovery = first.recovery_time,
            "experiment complete"
        );
    }
    Ok(ExperimentResult { index, preset: *preset, placement, runs })
}

/// Run one experiment per parameter set; results come back in input order.
pub fn run_sweep(
    presets: &[ParameterSet],
    config:  &SweepConfig,
) -> SweepResult<Vec<ExperimentResult>> {
    #[cfg(not(feature = "parallel"))]
    {
        presets
            .iter()
            .enumerate()
            .map(|(i, p)| run_experiment(i, p, config))
            .collect()
    }

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        presets
            .par_iter()
            .enumerate()
            .map(|(i, p)| run_experiment(i, p, config))
            .collect()
    }
}
