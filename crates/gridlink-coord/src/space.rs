//! Conversion between grid cells and world space.

use core::fmt;

use libm::{rint, round};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::point_types::{GridPoint, WorldPoint, WorldPosition};

/// Tie-breaking rule used when a world value lies exactly half-way
/// between two cells.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// `2.5 -> 3`, `-2.5 -> -3`.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: `2.5 -> 2`, `3.5 -> 4`, `-2.5 -> -2`.
    HalfToEven,
}

impl Rounding {
    /// Rounds `value` to the nearest whole number using this rule.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::HalfAwayFromZero => round(value),
            Rounding::HalfToEven => rint(value),
        }
    }
}

/// The scale of a grid: how many world units one cell spans, and how
/// world values are snapped onto cells.
///
/// Every [`GridCoordinate`](crate::GridCoordinate) carries the space it was
/// built in, so grids with different scales can live side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpace {
    /// World units per grid cell, always positive and finite.
    cell_size: f64,
    rounding: Rounding,
}

impl GridSpace {
    /// One world unit per cell, rounding half away from zero.
    pub const UNIT: GridSpace = GridSpace {
        cell_size: 1.0,
        rounding: Rounding::HalfAwayFromZero,
    };

    /// Construct a grid space with the given cell size.
    ///
    /// # Errors
    ///
    /// Returns `Err(GridError::InvalidCellSize)` if `cell_size` is not positive
    /// or not finite.
    pub fn new(cell_size: f64) -> Result<Self, GridError> {
        if !cell_size.is_finite() {
            return Err(GridError::InvalidCellSize("must be finite"));
        }
        if cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize("must be positive"));
        }
        Ok(GridSpace {
            cell_size,
            rounding: Rounding::default(),
        })
    }

    /// Returns this space with a different tie-breaking rule.
    #[must_use]
    pub const fn with_rounding(self, rounding: Rounding) -> Self {
        GridSpace { rounding, ..self }
    }

    /// Returns the cell size in world units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Returns the tie-breaking rule.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Converts a grid cell to its in-plane world position.
    pub fn to_world_2d(&self, cell: GridPoint) -> WorldPoint {
        WorldPoint::new(
            cell.x as f64 * self.cell_size,
            cell.y as f64 * self.cell_size,
        )
    }

    /// Converts a grid cell to a full world position at the given depth.
    ///
    /// `depth` is passed through untouched; it is never derived from the cell.
    pub fn to_world_3d(&self, cell: GridPoint, depth: f64) -> WorldPosition {
        let planar = self.to_world_2d(cell);
        WorldPosition::new(planar.x, planar.y, depth)
    }

    /// Snaps a world position to the nearest grid cell.
    ///
    /// Accepts both [`WorldPoint`] and [`WorldPosition`]; the depth of the
    /// latter is discarded. Out-of-range results saturate at the `i32`
    /// bounds and NaN maps to `0`.
    pub fn from_world(&self, position: impl Into<WorldPoint>) -> GridPoint {
        let p = position.into();
        GridPoint::new(self.snap_axis(p.x), self.snap_axis(p.y))
    }

    fn snap_axis(&self, value: f64) -> i32 {
        self.rounding.apply(value / self.cell_size) as i32
    }
}

impl Default for GridSpace {
    fn default() -> Self {
        GridSpace::UNIT
    }
}

impl fmt::Display for GridSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GridSpace (cell: {} units, {:?})", self.cell_size, self.rounding)
    }
}
