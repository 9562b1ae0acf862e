//! Fluent builder for a ready-to-run [`World`].

use rb_core::ModelParams;

use crate::{Placement, SimResult, World};

/// Fluent builder combining [`World::new`] and [`World::setup`].
///
/// # Optional inputs (have defaults)
///
/// | Method        | Default                   |
/// |---------------|---------------------------|
/// | `.seed(s)`    | `0`                       |
/// | `.params(p)`  | `ModelParams::default()`  |
///
/// # Example
///
/// ```rust
/// use rb_core::ModelParams;
/// use rb_sim::WorldBuilder;
///
/// let (world, placement) = WorldBuilder::new(20, 20)
///     .seed(7)
///     .params(ModelParams { cop_density: 0.0, ..ModelParams::default() })
///     .build()
///     .unwrap();
/// assert_eq!(placement.agents_placed, 280);
/// assert_eq!(world.cop_count(), 0);
/// ```
pub struct WorldBuilder {
    width:  u32,
    height: u32,
    seed:   u64,
    params: ModelParams,
}

impl WorldBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            seed:   0,
            params: ModelParams::default(),
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn params(mut self, params: ModelParams) -> Self {
        self.params = params;
        self
    }

    /// Validate inputs, allocate and populate the world.
    pub fn build(self) -> SimResult<(World, Placement)> {
        let mut world = World::new(self.width, self.height, self.seed)?;
        let placement = world.setup(self.params)?;
        Ok((world, placement))
    }
}
