//! Enforcement actor.

use rb_core::Coord;

use crate::{Actor, Agent};

/// A cop carries nothing but its position.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cop {
    location: Coord,
}

impl Cop {
    pub fn new(location: Coord) -> Self {
        Self { location }
    }

    /// Jail `suspect` for `term` ticks and step onto its cell.
    ///
    /// `suspect` must be active; `term` must be at least 1.
    pub fn arrest(&mut self, suspect: &mut Agent, term: u32) {
        debug_assert!(suspect.is_active(), "arrested a non-active agent");
        self.location = suspect.location();
        suspect.jail(term);
    }
}

impl Actor for Cop {
    #[inline]
    fn location(&self) -> Coord {
        self.location
    }

    #[inline]
    fn move_to(&mut self, to: Coord) {
        self.location = to;
    }
}
