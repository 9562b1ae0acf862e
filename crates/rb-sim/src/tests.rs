//! Integration tests for rb-sim.

use rb_core::{Coord, LegitimacyMode, ModelParams, Tick};

use crate::{Census, NoopObserver, SimError, SimObserver, World, WorldBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn baseline(seed: u64) -> World {
    WorldBuilder::new(40, 40)
        .seed(seed)
        .params(ModelParams::default())
        .build()
        .unwrap()
        .0
}

/// Params for hand-built scenarios: empty at setup, everything in vision on
/// a 5×5 grid, agents with R = 0 and H = 1 always rebel.
fn scenario_params(max_jail_term: u32) -> ModelParams {
    ModelParams {
        agent_density:         0.0,
        cop_density:           0.0,
        threshold:             0.0,
        government_legitimacy: 0.0,
        vision:                7,
        max_jail_term,
        agent_movement:        false,
        ..ModelParams::default()
    }
}

fn empty_world(max_jail_term: u32) -> World {
    let mut world = World::new(5, 5, 11).unwrap();
    world.setup(scenario_params(max_jail_term)).unwrap();
    world
}

/// Records every census it sees.
#[derive(Default)]
struct Recorder {
    starts:   Vec<Tick>,
    censuses: Vec<Census>,
    ended:    Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.starts.push(tick);
    }
    fn on_tick_end(&mut self, _tick: Tick, census: &Census) {
        self.censuses.push(*census);
    }
    fn on_sim_end(&mut self, final_tick: Tick) {
        self.ended = Some(final_tick);
    }
}

// ── Construction and setup ────────────────────────────────────────────────────

#[cfg(test)]
mod setup_tests {
    use super::*;

    #[test]
    fn zero_extent_rejected() {
        assert!(matches!(World::new(0, 40, 1), Err(SimError::Config(_))));
        assert!(matches!(World::new(40, 0, 1), Err(SimError::Config(_))));
    }

    #[test]
    fn invalid_params_rejected_before_placement() {
        let mut world = World::new(10, 10, 1).unwrap();
        let bad = ModelParams { government_legitimacy: 1.5, ..ModelParams::default() };
        assert!(matches!(world.setup(bad), Err(SimError::Config(_))));
        assert!(!world.is_set_up());
        assert_eq!(world.agent_count(), 0);
        // A failed setup leaves the world usable.
        world.setup(ModelParams::default()).unwrap();
    }

    #[test]
    fn second_setup_rejected() {
        let mut world = World::new(10, 10, 1).unwrap();
        world.setup(ModelParams::default()).unwrap();
        assert!(matches!(world.setup(ModelParams::default()), Err(SimError::AlreadySetUp)));
    }

    #[test]
    fn tick_before_setup_rejected() {
        let mut world = World::new(10, 10, 1).unwrap();
        assert!(matches!(world.tick(), Err(SimError::NotSetUp)));
        assert!(matches!(
            world.arrest_probability_at(Coord::new(0, 0)),
            Err(SimError::NotSetUp)
        ));
    }

    #[test]
    fn baseline_placement_counts() {
        let (world, placement) = WorldBuilder::new(40, 40).seed(3).build().unwrap();
        assert_eq!(placement.agents_requested, 1120);
        assert_eq!(placement.agents_placed, 1120);
        assert_eq!(placement.cops_requested, 64);
        assert_eq!(placement.cops_placed, 64);
        assert!(!placement.is_capped());
        assert_eq!(world.census(), Census { active: 0, jailed: 0, quiet: 1120, cops: 64 });
        world.verify().unwrap();
    }

    #[test]
    fn oversubscribed_densities_are_capped() {
        let params = ModelParams { agent_density: 0.8, cop_density: 0.5, ..ModelParams::default() };
        let (world, placement) = WorldBuilder::new(10, 10).seed(5).params(params).build().unwrap();
        assert!(placement.is_capped());
        assert_eq!(placement.cops_placed, 50, "cops are placed first");
        assert_eq!(placement.agents_requested, 80);
        assert_eq!(placement.agents_placed, 50);
        assert_eq!(world.agent_count(), 50);
        assert_eq!(world.grid().free_count(), 0);
        world.verify().unwrap();
    }

    #[test]
    fn traits_in_unit_range_and_cells_distinct() {
        let world = baseline(9);
        let mut seen = std::collections::HashSet::new();
        for a in world.agents() {
            assert!((0.0..1.0).contains(&a.risk_aversion()));
            assert!((0.0..1.0).contains(&a.perceived_hardship()));
            assert!(seen.insert(rb_agent::Actor::location(a)));
        }
        for c in world.cops() {
            assert!(seen.insert(rb_agent::Actor::location(c)));
        }
    }

    #[test]
    fn vision_wider_than_grid_sets_up() {
        let params = ModelParams { vision: u32::MAX, ..ModelParams::default() };
        let (mut world, placement) = WorldBuilder::new(10, 10).seed(2).params(params).build().unwrap();
        assert_eq!(placement.agents_placed, 70);
        world.run_ticks(5, &mut NoopObserver).unwrap();
        world.verify().unwrap();
    }

    #[test]
    fn manual_placement_rejects_occupied_cell() {
        let mut world = empty_world(5);
        world.place_cop(Coord::new(1, 1)).unwrap();
        assert!(matches!(world.place_agent(Coord::new(1, 1), 0.0, 1.0), Err(SimError::Spatial(_))));
        assert!(matches!(world.place_cop(Coord::new(9, 9)), Err(SimError::Spatial(_))));
    }
}

// ── Tick properties ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use rb_agent::Actor;

    use super::*;

    #[test]
    fn conservation_and_jail_invariants_hold_every_tick() {
        let mut world = baseline(42);
        let total = world.agent_count();
        let max = world.params().unwrap().max_jail_term;
        for _ in 0..100 {
            world.tick().unwrap();
            let c = world.census();
            assert_eq!(c.active + c.jailed + c.quiet, total);
            assert_eq!(c.active, world.active_count());
            assert_eq!(c.jailed, world.jailed_count());
            assert_eq!(c.quiet, world.quiet_count());
            assert_eq!(c.cops, 64);
            for a in world.agents() {
                if a.is_jailed() {
                    assert!(!a.is_active());
                    // Decay has already run once since the arrest.
                    assert!((1..max).contains(&a.jail_term()), "term {}", a.jail_term());
                } else {
                    assert_eq!(a.jail_term(), 0);
                }
            }
            world.verify().unwrap();
        }
        assert_eq!(world.current_tick(), Tick(100));
    }

    #[test]
    fn baseline_scenario_has_an_outbreak() {
        let mut world = baseline(2024);
        let mut rec = Recorder::default();
        world.run(100, &mut rec).unwrap();

        assert_eq!(rec.censuses.len(), 100);
        assert!(rec.censuses.iter().any(|c| c.active > 0), "no outbreak in 100 ticks");
        assert!(rec.censuses.iter().all(|c| c.total_agents() == 1120));
        assert!(rec.censuses.iter().any(|c| c.jailed > 0), "cops never arrested anyone");
    }

    #[test]
    fn same_seed_same_run() {
        let mut a = baseline(77);
        let mut b = baseline(77);
        let mut ra = Recorder::default();
        let mut rb = Recorder::default();
        a.run_ticks(60, &mut ra).unwrap();
        b.run_ticks(60, &mut rb).unwrap();
        assert_eq!(ra.censuses, rb.censuses);
        let la: Vec<Coord> = a.agents().iter().map(|x| x.location()).collect();
        let lb: Vec<Coord> = b.agents().iter().map(|x| x.location()).collect();
        assert_eq!(la, lb);
    }

    #[test]
    fn different_seeds_diverge() {
        let la: Vec<Coord> = baseline(1).agents().iter().map(|x| x.location()).collect();
        let lb: Vec<Coord> = baseline(2).agents().iter().map(|x| x.location()).collect();
        assert_ne!(la, lb);
    }

    #[test]
    fn full_legitimacy_never_activates() {
        let params = ModelParams { government_legitimacy: 1.0, threshold: 0.0, ..ModelParams::default() };
        let (mut world, _) = WorldBuilder::new(40, 40).seed(8).params(params).build().unwrap();
        for _ in 0..50 {
            world.tick().unwrap();
            assert_eq!(world.active_count(), 0);
            assert_eq!(world.jailed_count(), 0);
        }
    }

    #[test]
    fn no_cops_no_jail() {
        let params = ModelParams { cop_density: 0.0, government_legitimacy: 0.2, ..ModelParams::default() };
        let (mut world, _) = WorldBuilder::new(40, 40).seed(8).params(params).build().unwrap();
        let mut rec = Recorder::default();
        world.run(50, &mut rec).unwrap();
        assert!(rec.censuses.iter().all(|c| c.jailed == 0 && c.cops == 0));
        assert!(rec.censuses.iter().any(|c| c.active > 0));
    }

    #[test]
    fn frozen_agents_without_cops_never_move() {
        let params = ModelParams {
            cop_density: 0.0,
            agent_movement: false,
            ..ModelParams::default()
        };
        let (mut world, _) = WorldBuilder::new(20, 20).seed(4).params(params).build().unwrap();
        let before: Vec<Coord> = world.agents().iter().map(|a| a.location()).collect();
        world.run_ticks(10, &mut NoopObserver).unwrap();
        let after: Vec<Coord> = world.agents().iter().map(|a| a.location()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn moving_agents_do_move() {
        let (mut world, _) = WorldBuilder::new(20, 20).seed(4).build().unwrap();
        let before: Vec<Coord> = world.agents().iter().map(|a| a.location()).collect();
        world.tick().unwrap();
        let after: Vec<Coord> = world.agents().iter().map(|a| a.location()).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn local_legitimacy_runs_and_conserves() {
        let params = ModelParams {
            legitimacy_mode: LegitimacyMode::Local { max_local_related: 5.0 },
            ..ModelParams::default()
        };
        let (mut world, _) = WorldBuilder::new(40, 40).seed(13).params(params).build().unwrap();
        let mut rec = Recorder::default();
        world.run(60, &mut rec).unwrap();
        assert!(rec.censuses.iter().all(|c| c.total_agents() == 1120));
        let arrests: u32 = world
            .dims()
            .coords()
            .map(|c| world.grid().arrests_at(c))
            .sum();
        // Single-tick terms release before the census, so arrests can exceed
        // what the jailed counts ever show, never the other way round.
        if rec.censuses.iter().any(|c| c.jailed > 0) {
            assert!(arrests > 0);
        }
    }

    #[test]
    fn observer_sees_every_tick() {
        let mut world = baseline(5);
        let mut rec = Recorder::default();
        world.run(7, &mut rec).unwrap();
        assert_eq!(rec.starts, (0..7).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.censuses.len(), 7);
        assert_eq!(rec.ended, Some(Tick(7)));

        // run_ticks does not signal the end of the run.
        let mut rec2 = Recorder::default();
        world.run_ticks(3, &mut rec2).unwrap();
        assert_eq!(rec2.starts, vec![Tick(7), Tick(8), Tick(9)]);
        assert_eq!(rec2.ended, None);
    }
}

// ── Arrest mechanics ──────────────────────────────────────────────────────────

#[cfg(test)]
mod arrest_tests {
    use rb_agent::Actor;

    use super::*;
    use crate::arrest_probability_from_counts;

    #[test]
    fn formula_matches_closed_form() {
        assert_eq!(arrest_probability_from_counts(0, 0, 2.3), 0.0);
        assert!((arrest_probability_from_counts(1, 0, 2.3) - (1.0 - (-2.3f64).exp())).abs() < 1e-12);
        // floor(3 / 2) = 1
        assert!((arrest_probability_from_counts(3, 1, 2.3) - (1.0 - (-2.3f64).exp())).abs() < 1e-12);
        // floor(1 / 2) = 0
        assert_eq!(arrest_probability_from_counts(1, 1, 2.3), 0.0);
    }

    #[test]
    fn monotone_in_cops_and_active() {
        for active in 0..10 {
            for cops in 0..20 {
                let p = arrest_probability_from_counts(cops, active, 2.3);
                assert!((0.0..1.0).contains(&p));
                assert!(arrest_probability_from_counts(cops + 1, active, 2.3) >= p);
                assert!(arrest_probability_from_counts(cops, active + 1, 2.3) <= p);
            }
        }
    }

    #[test]
    fn probe_counts_neighbourhood() {
        let mut world = empty_world(30);
        let rebel = world.place_agent(Coord::new(2, 2), 0.0, 1.0).unwrap();
        world.tick().unwrap();
        assert!(world.agents()[rebel.index()].is_active());
        assert_eq!(world.arrest_probability_at(Coord::new(0, 0)).unwrap(), 0.0);

        world.place_cop(Coord::new(0, 0)).unwrap();
        world.place_cop(Coord::new(4, 4)).unwrap();

        // Two cops, one active agent elsewhere: floor(2 / 2) = 1.
        let p_elsewhere = world.arrest_probability_at(Coord::new(1, 3)).unwrap();
        assert!((p_elsewhere - (1.0 - (-2.3f64).exp())).abs() < 1e-12);

        // Probing the rebel's own cell excludes it: floor(2 / 1) = 2.
        let p_self = world.arrest_probability_at(Coord::new(2, 2)).unwrap();
        assert!((p_self - (1.0 - (-4.6f64).exp())).abs() < 1e-12);

        assert!(matches!(
            world.arrest_probability_at(Coord::new(5, 0)),
            Err(SimError::Spatial(_))
        ));
    }

    #[test]
    fn cop_arrests_visible_rebel() {
        let mut world = empty_world(10);
        let rebel = world.place_agent(Coord::new(1, 1), 0.0, 1.0).unwrap();
        world.place_cop(Coord::new(3, 3)).unwrap();

        world.tick().unwrap();

        let agent = &world.agents()[rebel.index()];
        let cop = &world.cops()[0];
        assert_eq!(world.grid().arrests_at(Coord::new(1, 1)), 1);
        if agent.is_jailed() {
            assert_eq!(cop.location(), agent.location(), "cop stands on the arrest cell");
            assert!((1..10).contains(&agent.jail_term()));
        } else {
            // Term 1: released in the same tick, displaced by the cop.
            assert!(agent.is_quiet());
            assert_eq!(cop.location(), Coord::new(1, 1));
            assert_ne!(agent.location(), Coord::new(1, 1));
        }
        world.verify().unwrap();
    }

    #[test]
    fn unit_jail_term_releases_same_tick() {
        let mut world = empty_world(1);
        let rebel = world.place_agent(Coord::new(2, 2), 0.0, 1.0).unwrap();
        world.place_cop(Coord::new(0, 0)).unwrap();

        world.tick().unwrap();

        let agent = &world.agents()[rebel.index()];
        assert!(agent.is_quiet(), "released without re-evaluation");
        assert_eq!(world.cops()[0].location(), Coord::new(2, 2));
        assert_ne!(agent.location(), Coord::new(2, 2));
        assert_eq!(world.census(), Census { active: 0, jailed: 0, quiet: 1, cops: 1 });
        world.verify().unwrap();
    }

    #[test]
    fn released_agent_returns_home_when_free() {
        let mut world = empty_world(3);
        let rebel = world.place_agent(Coord::new(2, 2), 0.0, 1.0).unwrap();
        world.place_cop(Coord::new(0, 0)).unwrap();

        // Run until the agent is jailed for the first time.
        let mut arrested_at = None;
        for _ in 0..5 {
            world.tick().unwrap();
            let agent = &world.agents()[rebel.index()];
            if agent.is_jailed() {
                arrested_at = Some(agent.location());
                break;
            }
        }
        let Some(cell) = arrested_at else {
            // Arrest with term 1 released immediately; covered elsewhere.
            return;
        };
        // Ticking moves the cop off the cell (all other cells are free).
        while world.agents()[rebel.index()].is_jailed() {
            world.tick().unwrap();
        }
        let agent = &world.agents()[rebel.index()];
        if world.cops()[0].location() != cell {
            assert_eq!(agent.location(), cell);
        }
        world.verify().unwrap();
    }

    /// Arrest a rebel on (2, 2), let the cop walk off, then stand a milder
    /// agent on the same cell and evaluate it.  Returns `None` if the rebel's
    /// term is too short to stay jailed for the whole scenario.
    fn agent_on_arrest_cell(mode: LegitimacyMode, seed: u64) -> Option<(World, rb_core::AgentId)> {
        let cell = Coord::new(2, 2);
        let params = ModelParams {
            government_legitimacy: 0.5,
            threshold: 0.3,
            legitimacy_mode: mode,
            ..scenario_params(30)
        };
        let mut world = World::new(5, 5, seed).unwrap();
        world.setup(params).unwrap();
        // G = 1 · (1 − 0.5) = 0.5 > 0.3: rebels from the first tick.
        let rebel = world.place_agent(cell, 0.0, 1.0).unwrap();
        world.place_cop(Coord::new(0, 0)).unwrap();

        world.tick().unwrap();
        if world.agents()[rebel.index()].jail_term() < 2 {
            return None;
        }
        assert_eq!(world.cops()[0].location(), cell);
        assert_eq!(world.grid().arrests_at(cell), 1);

        // Nobody is free, so this tick only moves the cop off the cell.
        world.tick().unwrap();
        assert_ne!(world.cops()[0].location(), cell);

        // Global: G = 0.5 · 0.5 = 0.25, below threshold.
        // Local with saturation 1: one arrest zeroes legitimacy, G = 0.5.
        let mild = world.place_agent(cell, 0.0, 0.5).unwrap();
        world.tick().unwrap();
        Some((world, mild))
    }

    #[test]
    fn arrest_history_lowers_local_legitimacy() {
        let cell = Coord::new(2, 2);
        let local = LegitimacyMode::Local { max_local_related: 1.0 };
        let seed = (0..200)
            .find(|&s| agent_on_arrest_cell(LegitimacyMode::Global, s).is_some())
            .expect("some seed hands out a term of at least 3");

        let (global_world, mild) = agent_on_arrest_cell(LegitimacyMode::Global, seed).unwrap();
        assert!(global_world.agents()[mild.index()].is_quiet());
        assert_eq!(global_world.grid().arrests_at(cell), 1);

        // Same seed, same draws up to the divergent evaluation.  The agent
        // turns active and the only cop, seeing the whole grid, arrests it.
        let (local_world, mild) = agent_on_arrest_cell(local, seed).unwrap();
        assert_eq!(local_world.grid().arrests_at(cell), 2);
        assert!(!local_world.agents()[mild.index()].is_active());
        assert_eq!(local_world.cops()[0].location(), cell);
    }

    #[test]
    fn one_cop_arrests_at_most_one_per_tick() {
        let mut world = empty_world(30);
        for x in 0..4 {
            world.place_agent(Coord::new(x, 0), 0.0, 1.0).unwrap();
        }
        world.place_cop(Coord::new(2, 3)).unwrap();
        world.tick().unwrap();
        // The one arrestee is jailed, or quiet if its term was a single tick.
        assert_eq!(world.jailed_count() + world.quiet_count(), 1);
        assert_eq!(world.active_count(), 3);
        assert_eq!(world.grid().dims().coords().map(|c| world.grid().arrests_at(c)).sum::<u32>(), 1);
    }
}
