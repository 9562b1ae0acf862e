//! Precomputed vision neighbourhoods.
//!
//! A `VisionKernel` lists the offsets of every cell within `radius` of the
//! origin once, at setup.  Offsets are wrapped onto the grid and
//! de-duplicated, so on grids narrower than the vision diameter a cell
//! reachable "both ways round" still appears only once.
//!
//! Each axis only walks offsets up to `min(radius, extent / 2)`: every cell
//! of the ring is reached by some offset in that span, and for those offsets
//! the toroidal delta is `|offset|` itself.  The wrapped disk is therefore
//! exactly `{ q : dims.in_vision(p, q, radius) }` for every centre `p`, and
//! building it costs at most one visit per grid cell however large the
//! radius.

use rb_core::{Coord, GridDims};

/// Wrapped offsets of the radius-`radius` Euclidean disk, including the
/// centre itself.
#[derive(Clone, Debug)]
pub struct VisionKernel {
    dims:    GridDims,
    /// Non-negative offsets already reduced modulo the grid extents.
    offsets: Vec<(u32, u32)>,
}

impl VisionKernel {
    pub fn new(radius: u32, dims: GridDims) -> Self {
        let r2 = u64::from(radius) * u64::from(radius);
        let reach_x = i64::from(radius.min(dims.width() / 2));
        let reach_y = i64::from(radius.min(dims.height() / 2));
        let origin = Coord::new(0, 0);

        let mut seen = vec![false; dims.cell_count()];
        let mut offsets = Vec::new();
        for dy in -reach_y..=reach_y {
            for dx in -reach_x..=reach_x {
                let (ax, ay) = (dx.unsigned_abs(), dy.unsigned_abs());
                if ax * ax + ay * ay > r2 {
                    continue;
                }
                let c = dims.wrap_offset(origin, dx, dy);
                let i = dims.index(c);
                if !seen[i] {
                    seen[i] = true;
                    offsets.push((c.x, c.y));
                }
            }
        }

        Self { dims, offsets }
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of cells in every neighbourhood (centre included).
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Every cell within vision of `center`, in a fixed order.
    pub fn around(&self, center: Coord) -> impl Iterator<Item = Coord> + '_ {
        let w = self.dims.width();
        let h = self.dims.height();
        self.offsets
            .iter()
            .map(move |&(ox, oy)| Coord::new((center.x + ox) % w, (center.y + oy) % h))
    }
}
