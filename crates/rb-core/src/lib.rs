//! `rb-core` — foundational types for the rebellion model workspace.
//!
//! This crate is a dependency of every other `rb-*` crate.  It intentionally
//! has no `rb-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `CopId`                                    |
//! | [`geo`]         | `Coord`, `GridDims`, toroidal delta, vision predicate |
//! | [`params`]      | `ModelParams`, `LegitimacyMode`                       |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `SimRng` (per-engine, seedable)                       |
//! | [`error`]       | `RbError`, `RbResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod params;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{RbError, RbResult};
pub use geo::{Coord, GridDims, toroidal_delta};
pub use ids::{AgentId, CopId};
pub use params::{LegitimacyMode, ModelParams};
pub use rng::{SimRng, stream_seed};
pub use time::Tick;
