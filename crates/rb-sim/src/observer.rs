//! Simulation observer trait for progress reporting and data collection.

use rb_core::Tick;

use crate::Census;

/// Callbacks invoked by [`World::run`][crate::World::run] and
/// [`World::run_ticks`][crate::World::run_ticks].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: outbreak printer
///
/// ```rust,ignore
/// struct OutbreakPrinter;
///
/// impl SimObserver for OutbreakPrinter {
///     fn on_tick_end(&mut self, tick: Tick, census: &Census) {
///         if census.active > 0 {
///             println!("{tick}: {} active", census.active);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any phase runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick has fully resolved, with the resulting census.
    fn on_tick_end(&mut self, _tick: Tick, _census: &Census) {}

    /// Called once by [`World::run`][crate::World::run] after its final tick.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
