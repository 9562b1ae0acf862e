//! Plain data row types written by output backends.

use rb_core::Tick;
use rb_sim::Census;

/// Population counts after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCountsRow {
    pub tick:   u64,
    pub active: u64,
    pub jailed: u64,
    pub quiet:  u64,
    pub cops:   u64,
}

impl TickCountsRow {
    pub fn from_census(tick: Tick, census: &Census) -> Self {
        Self {
            tick:   tick.0,
            active: census.active as u64,
            jailed: census.jailed as u64,
            quiet:  census.quiet as u64,
            cops:   census.cops as u64,
        }
    }
}
