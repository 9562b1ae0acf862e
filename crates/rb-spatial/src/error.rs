//! Spatial-subsystem error type.

use thiserror::Error;

use rb_core::Coord;

use crate::Occupant;

/// Occupancy invariant breaches.  These indicate a logic bug in the caller;
/// the grid refuses the write rather than overwrite or drop an occupant.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("cell {at} is already occupied by {by:?}")]
    Occupied { at: Coord, by: Occupant },

    #[error("cell {0} holds no occupant")]
    Vacant(Coord),

    #[error("cell {at} holds {found:?}, expected {expected:?}")]
    WrongOccupant { at: Coord, expected: Occupant, found: Occupant },

    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
