//! Run statistics.
//!
//! An *outbreak* starts at the first tick with at least one active agent
//! after a tick with none (or at the start of the run) and lasts until the
//! next tick with none.  Its duration is the number of ticks between those
//! two points.  An outbreak still going when the run ends is closed at the
//! run length, so every outbreak counts toward both the total rebellion
//! steps and the recovery time.

use rb_core::Tick;
use rb_sim::{Census, SimObserver};

/// Mean, minimum and maximum of one count series.
///
/// All three are zero for an empty series.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeriesSummary {
    pub mean: f64,
    pub min:  usize,
    pub max:  usize,
}

impl SeriesSummary {
    pub fn of(series: &[usize]) -> Self {
        if series.is_empty() {
            return Self::default();
        }
        let mut min = usize::MAX;
        let mut max = 0;
        let mut sum = 0u64;
        for &v in series {
            min = min.min(v);
            max = max.max(v);
            sum += v as u64;
        }
        Self { mean: sum as f64 / series.len() as f64, min, max }
    }
}

/// Summary of one run.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunStats {
    /// Number of ticks observed.
    pub steps:  u64,
    pub active: SeriesSummary,
    pub jailed: SeriesSummary,
    pub quiet:  SeriesSummary,
    pub outbreak_count: u32,
    /// Outbreaks per tick.
    pub rebellion_frequency: f64,
    /// Mean active count over every tick, quiet ones included.
    pub avg_rebellion_size: f64,
    pub max_rebellion_size: usize,
    /// Sum of all outbreak durations.
    pub total_rebellion_steps: u64,
    /// Population standard deviation of the active series; lower is calmer.
    pub stability_index: f64,
    /// Mean outbreak duration; 0 without outbreaks.
    pub recovery_time: f64,
}

impl RunStats {
    /// Compute every statistic from per-tick series of equal length.
    pub fn from_series(active: &[usize], jailed: &[usize], quiet: &[usize]) -> Self {
        let steps = active.len() as u64;
        let active_summary = SeriesSummary::of(active);

        let mut outbreak_count = 0u32;
        let mut total_rebellion_steps = 0u64;
        let mut started: Option<u64> = None;
        for (step, &n) in active.iter().enumerate() {
            let step = step as u64;
            match (n > 0, started) {
                (true, None) => {
                    started = Some(step);
                    outbreak_count += 1;
                }
                (false, Some(start)) => {
                    total_rebellion_steps += step - start;
                    started = None;
                }
                _ => {}
            }
        }
        if let Some(start) = started {
            total_rebellion_steps += steps - start;
        }

        let mean = active_summary.mean;
        let stability_index = if active.is_empty() {
            0.0
        } else {
            let var = active.iter().map(|&n| (n as f64 - mean).powi(2)).sum::<f64>()
                / active.len() as f64;
            var.sqrt()
        };

        Self {
            steps,
            active: active_summary,
            jailed: SeriesSummary::of(jailed),
            quiet: SeriesSummary::of(quiet),
            outbreak_count,
            rebellion_frequency: if steps == 0 { 0.0 } else { outbreak_count as f64 / steps as f64 },
            avg_rebellion_size: mean,
            max_rebellion_size: active_summary.max,
            total_rebellion_steps,
            stability_index,
            recovery_time: if outbreak_count == 0 {
                0.0
            } else {
                total_rebellion_steps as f64 / outbreak_count as f64
            },
        }
    }
}

/// Records the census series of one run.
#[derive(Debug, Default)]
pub struct StatsCollector {
    active: Vec<usize>,
    jailed: Vec<usize>,
    quiet:  Vec<usize>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(steps: usize) -> Self {
        Self {
            active: Vec::with_capacity(steps),
            jailed: Vec::with_capacity(steps),
            quiet:  Vec::with_capacity(steps),
        }
    }

    /// Active count per observed tick.
    pub fn active_series(&self) -> &[usize] {
        &self.active
    }

    pub fn jailed_series(&self) -> &[usize] {
        &self.jailed
    }

    pub fn quiet_series(&self) -> &[usize] {
        &self.quiet
    }

    pub fn stats(&self) -> RunStats {
        RunStats::from_series(&self.active, &self.jailed, &self.quiet)
    }
}

impl SimObserver for StatsCollector {
    fn on_tick_end(&mut self, _tick: Tick, census: &Census) {
        self.active.push(census.active);
        self.jailed.push(census.jailed);
        self.quiet.push(census.quiet);
    }
}
