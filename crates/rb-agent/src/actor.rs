//! The capability shared by agents and cops.

use rb_core::Coord;

/// Something that stands on the grid and can move.
///
/// Implementors only record the new coordinate; keeping the occupancy index
/// in step is the engine's job.
pub trait Actor {
    fn location(&self) -> Coord;

    /// Replace the actor's coordinate.
    fn move_to(&mut self, to: Coord);
}
