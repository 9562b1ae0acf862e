//! Toroidal grid geometry.
//!
//! The world wraps on both axes: leaving the right edge re-enters on the
//! left, leaving the top re-enters at the bottom.  All distances are taken
//! over the shorter way round.
//!
//! Vision is Euclidean.  Because deltas are integers the comparison
//! `sqrt(dx² + dy²) <= V` is evaluated exactly as `dx² + dy² <= V²`.

use std::fmt;

use crate::{RbError, RbResult};

/// A cell coordinate, `0 <= x < width`, `0 <= y < height`.
///
/// `Coord` is a plain value: an actor's position is replaced wholesale on
/// move, never patched in place.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
}

impl Coord {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Per-axis distance on a ring of `extent` cells:
/// `min(|a - b|, extent - |a - b|)`.
#[inline]
pub fn toroidal_delta(a: u32, b: u32, extent: u32) -> u32 {
    let d = a.abs_diff(b);
    d.min(extent - d)
}

/// Extents of a toroidal grid.  Both are guaranteed non-zero, and every
/// cell index fits in a `u32`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDims {
    width:  u32,
    height: u32,
}

impl GridDims {
    /// Validate and build grid extents.
    pub fn new(width: u32, height: u32) -> RbResult<Self> {
        if width == 0 || height == 0 {
            return Err(RbError::InvalidDims { width, height });
        }
        if u64::from(width) * u64::from(height) > u64::from(u32::MAX) {
            return Err(RbError::TooLarge { width, height });
        }
        Ok(Self { width, height })
    }

    #[inline]
    pub fn width(self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.x < self.width && c.y < self.height
    }

    /// Row-major index of `c`.  `c` must be in bounds.
    #[inline]
    pub fn index(self, c: Coord) -> usize {
        debug_assert!(self.contains(c), "{c} outside {}x{}", self.width, self.height);
        c.y as usize * self.width as usize + c.x as usize
    }

    /// Inverse of [`index`](Self::index).
    #[inline]
    pub fn coord_at(self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as u32, (index / w) as u32)
    }

    /// Iterator over every coordinate in row-major order.
    pub fn coords(self) -> impl Iterator<Item = Coord> {
        (0..self.cell_count()).map(move |i| self.coord_at(i))
    }

    /// `c` shifted by `(dx, dy)` with wrap-around on both axes.
    #[inline]
    pub fn wrap_offset(self, c: Coord, dx: i64, dy: i64) -> Coord {
        let w = i64::from(self.width);
        let h = i64::from(self.height);
        Coord::new(
            (i64::from(c.x) + dx).rem_euclid(w) as u32,
            (i64::from(c.y) + dy).rem_euclid(h) as u32,
        )
    }

    /// Per-axis toroidal deltas between `p` and `q`.
    #[inline]
    pub fn delta(self, p: Coord, q: Coord) -> (u32, u32) {
        (
            toroidal_delta(p.x, q.x, self.width),
            toroidal_delta(p.y, q.y, self.height),
        )
    }

    /// Squared Euclidean toroidal distance.
    #[inline]
    pub fn distance_sq(self, p: Coord, q: Coord) -> u64 {
        let (dx, dy) = self.delta(p, q);
        u64::from(dx) * u64::from(dx) + u64::from(dy) * u64::from(dy)
    }

    /// `true` if `q` lies within `radius` of `p`, accounting for wrap-around.
    /// Symmetric in `p` and `q`.
    #[inline]
    pub fn in_vision(self, p: Coord, q: Coord, radius: u32) -> bool {
        self.distance_sq(p, q) <= u64::from(radius) * u64::from(radius)
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
