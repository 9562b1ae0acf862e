//! `rb-spatial` — cell occupancy and vision neighbourhoods.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`grid`]   | `Grid` (row-major cells), `Cell`, `Occupant`                 |
//! | [`vision`] | `VisionKernel` — wrapped, de-duplicated disk offsets         |
//! | [`error`]  | `SpatialError`, `SpatialResult<T>`                           |
//!
//! The grid is a per-cell index over actor positions.  It answers "who is
//! here" in O(1) and "who is within vision" in O(kernel size), replacing
//! linear scans over the populations without changing any result.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod vision;


pub use error::{SpatialError, SpatialResult};
pub use grid::{Cell, Grid, Occupant};
pub use vision::VisionKernel;
