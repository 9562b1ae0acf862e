//! `rb-sim` — the rebellion engine.
//!
//! # Four-phase tick
//!
//! ```text
//! per tick:
//!   ① Movement     — every free agent (if agent movement is on), then every
//!                    cop, steps to a random free cell within vision.
//!   ② Evaluation   — every free agent re-decides Active / Quiet from its
//!                    post-move neighbourhood.
//!   ③ Enforcement  — every cop arrests one random active agent in vision.
//!   ④ Decay        — every jailed agent serves one tick; released agents
//!                    re-enter the grid.
//! ```
//!
//! Each phase runs over the whole population before the next begins.  The
//! ordering is part of the model: reordering changes outbreak dynamics.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rb_core::ModelParams;
//! use rb_sim::{NoopObserver, WorldBuilder};
//!
//! let (mut world, placement) = WorldBuilder::new(40, 40)
//!     .seed(42)
//!     .params(ModelParams::default())
//!     .build()?;
//! world.run(100, &mut NoopObserver)?;
//! println!("{:?}", world.census());
//! ```

pub mod builder;
pub mod census;
pub mod error;
pub mod observer;
pub mod world;

mod phases;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use census::{Census, Placement};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use phases::arrest_probability_from_counts;
pub use world::World;
