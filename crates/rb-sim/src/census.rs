//! Read-only population summaries.

/// Population counts at one instant.
///
/// `active + jailed + quiet` always equals the number of agents placed at
/// setup.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Census {
    pub active: usize,
    pub jailed: usize,
    pub quiet:  usize,
    pub cops:   usize,
}

impl Census {
    #[inline]
    pub fn total_agents(&self) -> usize {
        self.active + self.jailed + self.quiet
    }
}

/// Requested versus actually placed actors, as reported by setup.
///
/// When the densities ask for more actors than the grid has cells,
/// placement stops at the first actor that finds no free cell; cops are
/// placed first, so agents are the ones cut short.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub agents_requested: usize,
    pub agents_placed:    usize,
    pub cops_requested:   usize,
    pub cops_placed:      usize,
}

impl Placement {
    /// `true` if either population came out smaller than requested.
    #[inline]
    pub fn is_capped(&self) -> bool {
        self.agents_placed < self.agents_requested || self.cops_placed < self.cops_requested
    }
}
