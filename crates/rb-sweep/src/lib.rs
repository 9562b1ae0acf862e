//! `rb-sweep` — parameter sweeps over the rebellion model.
//!
//! - [`ParameterSet`]: the named scenario catalogue ([`ParameterSet::presets`]).
//! - [`StatsCollector`]: a `SimObserver` that turns a run's per-tick census
//!   into [`RunStats`] (series summaries, outbreaks, stability, recovery).
//! - [`run_experiment`] / [`run_sweep`]: one fresh `World` per run, each with
//!   its own seed derived from [`SweepConfig::seed`].
//!
//! With the `parallel` feature, `run_sweep` spreads experiments across
//! Rayon's pool; output order and values do not change.

pub mod error;
pub mod preset;
pub mod stats;
pub mod sweep;


pub use error::{SweepError, SweepResult};
pub use preset::ParameterSet;
pub use stats::{RunStats, SeriesSummary, StatsCollector};
pub use sweep::{ExperimentResult, SweepConfig, run_experiment, run_single, run_sweep, run_seed};
