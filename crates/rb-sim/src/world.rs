//! The `World` engine.

use tracing::{debug, trace, warn};

use rb_agent::{Actor, Agent, Cop};
use rb_core::{AgentId, Coord, CopId, GridDims, ModelParams, SimRng, Tick};
use rb_spatial::{Grid, Occupant, VisionKernel};

use crate::{phases, Census, Placement, SimError, SimObserver, SimResult};

/// Parameters plus the vision kernel derived from them; present once the
/// world is set up.
struct Model {
    params: ModelParams,
    kernel: VisionKernel,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// One independent run of the rebellion model.
///
/// Lifecycle: [`new`](Self::new) allocates an empty grid,
/// [`setup`](Self::setup) populates it once, then [`tick`](Self::tick)
/// advances it one step at a time.  `tick` takes `&mut self`, so a world
/// can never be stepped concurrently with itself or read mid-step.
///
/// The world owns its RNG.  Two worlds built with the same extents, seed and
/// parameters produce identical runs.  Worlds share nothing, so separate
/// worlds may run on separate threads.
pub struct World {
    dims:   GridDims,
    seed:   u64,
    rng:    SimRng,
    grid:   Grid,
    agents: Vec<Agent>,
    cops:   Vec<Cop>,
    model:  Option<Model>,
    /// The tick the next call to `tick` will execute.
    clock:  Tick,

    // Reused per-tick buffers.
    cell_buf:    Vec<Coord>,
    suspect_buf: Vec<AgentId>,
}

impl World {
    // ── Construction ──────────────────────────────────────────────────────

    /// Allocate an empty `width × height` toroidal grid.  Fails if either
    /// extent is zero.
    pub fn new(width: u32, height: u32, seed: u64) -> SimResult<Self> {
        let dims = GridDims::new(width, height)?;
        Ok(Self {
            dims,
            seed,
            rng: SimRng::new(seed),
            grid: Grid::new(dims),
            agents: Vec::new(),
            cops: Vec::new(),
            model: None,
            clock: Tick::ZERO,
            cell_buf: Vec::new(),
            suspect_buf: Vec::new(),
        })
    }

    /// Validate `params` and populate the grid.
    ///
    /// Places `round(cop_density · cells)` cops, then
    /// `round(agent_density · cells)` agents, each on a uniformly sampled
    /// free cell.  Agent traits are drawn uniformly after the agent's cell.
    /// If the grid runs out of free cells placement stops there; the
    /// shortfall is logged and reported in the returned [`Placement`].
    ///
    /// A world can be set up only once.
    pub fn setup(&mut self, params: ModelParams) -> SimResult<Placement> {
        if self.model.is_some() {
            return Err(SimError::AlreadySetUp);
        }
        params.validate()?;

        let cells = self.dims.cell_count();
        let mut placement = Placement {
            agents_requested: ModelParams::requested(params.agent_density, cells),
            cops_requested:   ModelParams::requested(params.cop_density, cells),
            ..Placement::default()
        };

        let mut free = self.grid.free_cells();

        for _ in 0..placement.cops_requested {
            let Some(at) = take_random(&mut free, &mut self.rng) else { break };
            self.place_cop(at)?;
        }
        placement.cops_placed = self.cops.len();

        for _ in 0..placement.agents_requested {
            let Some(at) = take_random(&mut free, &mut self.rng) else { break };
            let risk_aversion: f64 = self.rng.random();
            let perceived_hardship: f64 = self.rng.random();
            self.place_agent(at, risk_aversion, perceived_hardship)?;
        }
        placement.agents_placed = self.agents.len();

        if placement.is_capped() {
            warn!(
                grid = %self.dims,
                agents_requested = placement.agents_requested,
                agents_placed = placement.agents_placed,
                cops_requested = placement.cops_requested,
                cops_placed = placement.cops_placed,
                "densities exceed grid capacity; placement capped"
            );
        }
        debug!(
            grid = %self.dims,
            seed = self.seed,
            agents = placement.agents_placed,
            cops = placement.cops_placed,
            "world set up"
        );

        self.model = Some(Model {
            kernel: VisionKernel::new(params.vision, self.dims),
            params,
        });
        Ok(placement)
    }

    /// Put one extra quiet agent on the free cell `at`.
    ///
    /// Used by setup; also lets tests and scenario scripts build exact
    /// configurations on top of a sparsely populated world.
    pub fn place_agent(
        &mut self,
        at: Coord,
        risk_aversion: f64,
        perceived_hardship: f64,
    ) -> SimResult<AgentId> {
        let id = AgentId::try_from(self.agents.len())
            .map_err(|_| SimError::Invariant("agent population exceeds id range".into()))?;
        self.grid.place(at, Occupant::Agent(id))?;
        self.agents.push(Agent::new(at, risk_aversion, perceived_hardship));
        Ok(id)
    }

    /// Put one extra cop on the free cell `at`.
    pub fn place_cop(&mut self, at: Coord) -> SimResult<CopId> {
        let id = CopId::try_from(self.cops.len())
            .map_err(|_| SimError::Invariant("cop population exceeds id range".into()))?;
        self.grid.place(at, Occupant::Cop(id))?;
        self.cops.push(Cop::new(at));
        Ok(id)
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Advance the whole population by one step.
    ///
    /// Movement → evaluation → enforcement → decay, each over the entire
    /// population before the next.  An error leaves the world in an
    /// undefined state and ends the run.
    pub fn tick(&mut self) -> SimResult<()> {
        let model = self.model.as_ref().ok_or(SimError::NotSetUp)?;

        // Explicit field borrows so the borrow checker sees disjoint access.
        let params = &model.params;
        let kernel = &model.kernel;
        let grid = &mut self.grid;
        let agents = self.agents.as_mut_slice();
        let cops = self.cops.as_mut_slice();
        let rng = &mut self.rng;

        phases::movement(grid, kernel, agents, cops, rng, &mut self.cell_buf, params.agent_movement)?;
        phases::evaluation(grid, kernel, agents, params);
        let arrests = phases::enforcement(
            grid,
            kernel,
            agents,
            cops,
            rng,
            &mut self.suspect_buf,
            params.max_jail_term,
        )?;
        let released = phases::decay(grid, kernel, agents, rng, &mut self.cell_buf)?;

        trace!(tick = %self.clock, arrests, released, "tick resolved");
        debug_assert!(
            self.verify().is_ok(),
            "invariant broken after {}: {:?}",
            self.clock,
            self.verify(),
        );

        self.clock = self.clock + 1;
        Ok(())
    }

    /// Run `n` ticks, reporting each to `observer`.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock;
            observer.on_tick_start(now);
            self.tick()?;
            let census = self.census();
            trace!(
                tick = %now,
                active = census.active,
                jailed = census.jailed,
                quiet = census.quiet,
                "census"
            );
            observer.on_tick_end(now, &census);
        }
        Ok(())
    }

    /// Run `n` ticks, then signal the end of the run to `observer`.
    pub fn run<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        self.run_ticks(n, observer)?;
        observer.on_sim_end(self.clock);
        Ok(())
    }

    // ── Statistics ────────────────────────────────────────────────────────

    /// Free agents currently rebelling.
    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_active()).count()
    }

    pub fn jailed_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_jailed()).count()
    }

    pub fn quiet_count(&self) -> usize {
        self.agents.iter().filter(|a| a.is_quiet()).count()
    }

    /// Constant after setup.
    pub fn cop_count(&self) -> usize {
        self.cops.len()
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// All four counts in one pass.
    pub fn census(&self) -> Census {
        let mut census = Census { cops: self.cops.len(), ..Census::default() };
        for agent in &self.agents {
            if agent.is_active() {
                census.active += 1;
            } else if agent.is_jailed() {
                census.jailed += 1;
            } else {
                census.quiet += 1;
            }
        }
        census
    }

    /// Arrest probability an agent standing on `at` would estimate right
    /// now.  Diagnostic hook; any active agent on `at` itself is excluded
    /// from the count.
    pub fn arrest_probability_at(&self, at: Coord) -> SimResult<f64> {
        let model = self.model.as_ref().ok_or(SimError::NotSetUp)?;
        if !self.dims.contains(at) {
            return Err(rb_spatial::SpatialError::OutOfBounds(at).into());
        }
        Ok(phases::arrest_probability(&self.grid, &model.kernel, &self.agents, at, model.params.k))
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The tick the next call to [`tick`](Self::tick) will execute; equals
    /// the number of completed ticks.
    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock
    }

    #[inline]
    pub fn is_set_up(&self) -> bool {
        self.model.is_some()
    }

    pub fn params(&self) -> Option<&ModelParams> {
        self.model.as_ref().map(|m| &m.params)
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn cops(&self) -> &[Cop] {
        &self.cops
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Cross-check the occupancy index against actor positions.
    ///
    /// Every free agent and every cop must own the cell it records, no
    /// jailed agent may be indexed, and nothing else may be on the grid.
    pub fn verify(&self) -> SimResult<()> {
        let mut indexed = 0;
        for (i, agent) in self.agents.iter().enumerate() {
            let here = self.grid.occupant(agent.location());
            let me = Some(Occupant::Agent(AgentId(i as u32)));
            if agent.is_jailed() {
                if here == me {
                    return Err(SimError::Invariant(format!(
                        "jailed agent {i} still indexed at {}",
                        agent.location()
                    )));
                }
            } else {
                if here != me {
                    return Err(SimError::Invariant(format!(
                        "agent {i} at {} but cell holds {here:?}",
                        agent.location()
                    )));
                }
                indexed += 1;
            }
        }
        for (i, cop) in self.cops.iter().enumerate() {
            let here = self.grid.occupant(cop.location());
            if here != Some(Occupant::Cop(CopId(i as u32))) {
                return Err(SimError::Invariant(format!(
                    "cop {i} at {} but cell holds {here:?}",
                    cop.location()
                )));
            }
            indexed += 1;
        }
        if indexed != self.grid.occupied_count() {
            return Err(SimError::Invariant(format!(
                "{indexed} actors on the grid but {} cells occupied",
                self.grid.occupied_count()
            )));
        }
        Ok(())
    }
}

/// Remove and return a uniformly chosen element of `free`.
fn take_random(free: &mut Vec<Coord>, rng: &mut SimRng) -> Option<Coord> {
    if free.is_empty() {
        return None;
    }
    let i = rng.gen_range(0..free.len());
    Some(free.swap_remove(i))
}
