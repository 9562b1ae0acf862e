//! The four tick phases.
//!
//! Each phase is a free function over explicitly borrowed engine fields so
//! the borrow checker sees disjoint access (the params and kernel are read
//! while the grid, populations and RNG are written).

use rb_agent::{Actor, Agent, Cop};
use rb_core::{AgentId, Coord, CopId, ModelParams, SimRng};
use rb_spatial::{Grid, Occupant, SpatialResult, VisionKernel};

use crate::{SimError, SimResult};

/// `1 − exp(−k · floor(cops / (active + 1)))`.
///
/// Non-decreasing in `cops`, non-increasing in `active`.
#[inline]
pub fn arrest_probability_from_counts(cops: u32, active: u32, k: f64) -> f64 {
    let ratio = cops / (active + 1);
    1.0 - (-k * f64::from(ratio)).exp()
}

/// Estimated arrest probability at `at`: cops within vision, over active
/// agents within vision other than whoever stands on `at`.
pub(crate) fn arrest_probability(
    grid:   &Grid,
    kernel: &VisionKernel,
    agents: &[Agent],
    at:     Coord,
    k:      f64,
) -> f64 {
    let mut cops = 0u32;
    let mut active = 0u32;
    for (cell, occupant) in grid.occupants_in_vision(kernel, at) {
        match occupant {
            Occupant::Cop(_) => cops += 1,
            Occupant::Agent(id) => {
                if cell != at && agents[id.index()].is_active() {
                    active += 1;
                }
            }
        }
    }
    arrest_probability_from_counts(cops, active, k)
}

// ── ① Movement ────────────────────────────────────────────────────────────────

pub(crate) fn movement(
    grid:           &mut Grid,
    kernel:         &VisionKernel,
    agents:         &mut [Agent],
    cops:           &mut [Cop],
    rng:            &mut SimRng,
    scratch:        &mut Vec<Coord>,
    agent_movement: bool,
) -> SpatialResult<()> {
    if agent_movement {
        for (i, agent) in agents.iter_mut().enumerate() {
            if agent.is_jailed() {
                continue;
            }
            step(grid, kernel, rng, scratch, agent, Occupant::Agent(AgentId(i as u32)))?;
        }
    }
    for (i, cop) in cops.iter_mut().enumerate() {
        step(grid, kernel, rng, scratch, cop, Occupant::Cop(CopId(i as u32)))?;
    }
    Ok(())
}

/// Move `actor` to a uniformly random free cell within vision, or leave it
/// where it is if there is none.
fn step<A: Actor>(
    grid:    &mut Grid,
    kernel:  &VisionKernel,
    rng:     &mut SimRng,
    scratch: &mut Vec<Coord>,
    actor:   &mut A,
    who:     Occupant,
) -> SpatialResult<()> {
    let from = actor.location();
    grid.free_cells_in_vision(kernel, from, scratch);
    if let Some(&to) = rng.choose(scratch) {
        grid.relocate(from, to, who)?;
        actor.move_to(to);
    }
    Ok(())
}

// ── ② Evaluation ──────────────────────────────────────────────────────────────

/// Sequential in agent order: an agent sees the states already decided
/// earlier in this phase.
pub(crate) fn evaluation(
    grid:   &Grid,
    kernel: &VisionKernel,
    agents: &mut [Agent],
    params: &ModelParams,
) {
    for i in 0..agents.len() {
        if agents[i].is_jailed() {
            continue;
        }
        let at = agents[i].location();
        let p = arrest_probability(grid, kernel, agents, at, params.k);
        let legitimacy = params.perceived_legitimacy(grid.arrests_at(at));
        agents[i].evaluate(p, params.threshold, legitimacy);
    }
}

// ── ③ Enforcement ─────────────────────────────────────────────────────────────

/// Returns the number of arrests made.
pub(crate) fn enforcement(
    grid:          &mut Grid,
    kernel:        &VisionKernel,
    agents:        &mut [Agent],
    cops:          &mut [Cop],
    rng:           &mut SimRng,
    suspects:      &mut Vec<AgentId>,
    max_jail_term: u32,
) -> SpatialResult<usize> {
    let mut arrests = 0;
    for (i, cop) in cops.iter_mut().enumerate() {
        let at = cop.location();

        suspects.clear();
        suspects.extend(grid.occupants_in_vision(kernel, at).filter_map(|(_, occupant)| {
            match occupant {
                Occupant::Agent(id) if agents[id.index()].is_active() => Some(id),
                _ => None,
            }
        }));
        let Some(&target) = rng.choose(suspects) else {
            continue;
        };

        let term = rng.gen_range(1..=max_jail_term);
        let suspect = &mut agents[target.index()];
        let cell = suspect.location();

        grid.vacate(cell, Occupant::Agent(target))?;
        grid.relocate(at, cell, Occupant::Cop(CopId(i as u32)))?;
        grid.record_arrest(cell)?;
        cop.arrest(suspect, term);
        arrests += 1;
    }
    Ok(arrests)
}

// ── ④ Decay ───────────────────────────────────────────────────────────────────

/// Serve one tick for every jailed agent.  A released agent re-occupies its
/// recorded cell if it is free, otherwise a random free cell within vision,
/// otherwise a random free cell anywhere.  Returns the number released.
pub(crate) fn decay(
    grid:    &mut Grid,
    kernel:  &VisionKernel,
    agents:  &mut [Agent],
    rng:     &mut SimRng,
    scratch: &mut Vec<Coord>,
) -> SimResult<usize> {
    let mut released = 0;
    for (i, agent) in agents.iter_mut().enumerate() {
        if !agent.serve_tick() {
            continue;
        }
        let who = Occupant::Agent(AgentId(i as u32));
        let home = agent.location();
        let spot = if grid.is_free(home) {
            home
        } else {
            grid.free_cells_in_vision(kernel, home, scratch);
            if scratch.is_empty() {
                *scratch = grid.free_cells();
            }
            *rng.choose(scratch).ok_or_else(|| {
                SimError::Invariant(format!("no free cell to release {who:?} into"))
            })?
        };
        grid.place(spot, who)?;
        agent.move_to(spot);
        released += 1;
    }
    Ok(released)
}
