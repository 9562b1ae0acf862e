//! Row-major occupancy grid.

use rb_core::{AgentId, Coord, CopId, GridDims};

use crate::{SpatialError, SpatialResult, VisionKernel};

/// What stands on a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    Agent(AgentId),
    Cop(CopId),
}

/// One grid cell.
///
/// Holds at most one occupant.  Jailed agents are not occupants: they keep
/// their recorded coordinate but are invisible to movement and enforcement
/// until released.
#[derive(Clone, Debug, Default)]
pub struct Cell {
    occupant: Option<Occupant>,
    /// Arrests made on this cell since setup.
    arrests:  u32,
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    #[inline]
    pub fn occupant(&self) -> Option<Occupant> {
        self.occupant
    }

    #[inline]
    pub fn arrests(&self) -> u32 {
        self.arrests
    }
}

/// Toroidal grid of [`Cell`]s, indexed row-major by [`GridDims::index`].
#[derive(Clone, Debug)]
pub struct Grid {
    dims:     GridDims,
    cells:    Vec<Cell>,
    occupied: usize,
}

impl Grid {
    /// An empty grid.
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![Cell::default(); dims.cell_count()],
            occupied: 0,
        }
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of cells currently holding an occupant.
    #[inline]
    pub fn occupied_count(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn free_count(&self) -> usize {
        self.cells.len() - self.occupied
    }

    pub fn cell(&self, at: Coord) -> SpatialResult<&Cell> {
        let i = self.slot(at)?;
        Ok(&self.cells[i])
    }

    /// Occupant of `at`, or `None` if the cell is free or out of bounds.
    #[inline]
    pub fn occupant(&self, at: Coord) -> Option<Occupant> {
        self.slot(at).ok().and_then(|i| self.cells[i].occupant)
    }

    /// `true` if `at` is on the grid and holds no occupant.
    #[inline]
    pub fn is_free(&self, at: Coord) -> bool {
        self.slot(at).is_ok_and(|i| self.cells[i].is_empty())
    }

    /// Every free cell in row-major order.
    pub fn free_cells(&self) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(i, _)| self.dims.coord_at(i))
            .collect()
    }

    /// Put `who` on the free cell `at`.
    pub fn place(&mut self, at: Coord, who: Occupant) -> SpatialResult<()> {
        let i = self.slot(at)?;
        if let Some(by) = self.cells[i].occupant {
            return Err(SpatialError::Occupied { at, by });
        }
        self.cells[i].occupant = Some(who);
        self.occupied += 1;
        Ok(())
    }

    /// Remove `who` from `at`.  Fails if `at` holds anyone else.
    pub fn vacate(&mut self, at: Coord, who: Occupant) -> SpatialResult<()> {
        let i = self.slot(at)?;
        match self.cells[i].occupant {
            None => Err(SpatialError::Vacant(at)),
            Some(found) if found != who => Err(SpatialError::WrongOccupant {
                at,
                expected: who,
                found,
            }),
            Some(_) => {
                self.cells[i].occupant = None;
                self.occupied -= 1;
                Ok(())
            }
        }
    }

    /// Move `who` from `from` to the free cell `to`.  A no-op when
    /// `from == to`.
    pub fn relocate(&mut self, from: Coord, to: Coord, who: Occupant) -> SpatialResult<()> {
        if from == to {
            return match self.occupant(from) {
                Some(found) if found == who => Ok(()),
                Some(found) => Err(SpatialError::WrongOccupant { at: from, expected: who, found }),
                None => Err(SpatialError::Vacant(from)),
            };
        }
        let j = self.slot(to)?;
        if let Some(by) = self.cells[j].occupant {
            return Err(SpatialError::Occupied { at: to, by });
        }
        self.vacate(from, who)?;
        self.cells[j].occupant = Some(who);
        self.occupied += 1;
        Ok(())
    }

    /// Bump the arrest counter of `at`.
    pub fn record_arrest(&mut self, at: Coord) -> SpatialResult<()> {
        let i = self.slot(at)?;
        self.cells[i].arrests += 1;
        Ok(())
    }

    /// Arrests recorded on `at`; 0 for out-of-bounds coordinates.
    #[inline]
    pub fn arrests_at(&self, at: Coord) -> u32 {
        self.slot(at).map_or(0, |i| self.cells[i].arrests)
    }

    /// Clear `out` and fill it with every free cell within vision of
    /// `center`, in kernel order.
    pub fn free_cells_in_vision(&self, kernel: &VisionKernel, center: Coord, out: &mut Vec<Coord>) {
        debug_assert_eq!(kernel.dims(), self.dims);
        out.clear();
        out.extend(kernel.around(center).filter(|&c| self.cells[self.dims.index(c)].is_empty()));
    }

    /// Every occupant within vision of `center` (centre cell included), in
    /// kernel order.
    pub fn occupants_in_vision<'a>(
        &'a self,
        kernel: &'a VisionKernel,
        center: Coord,
    ) -> impl Iterator<Item = (Coord, Occupant)> + 'a {
        debug_assert_eq!(kernel.dims(), self.dims);
        kernel
            .around(center)
            .filter_map(move |c| self.cells[self.dims.index(c)].occupant.map(|o| (c, o)))
    }

    fn slot(&self, at: Coord) -> SpatialResult<usize> {
        if self.dims.contains(at) {
            Ok(self.dims.index(at))
        } else {
            Err(SpatialError::OutOfBounds(at))
        }
    }
}
