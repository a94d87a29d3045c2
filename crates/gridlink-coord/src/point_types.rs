use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents a point in grid coordinates (cell indices).
///
/// Both axes are signed and unbounded within `i32`; negative cells are valid.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GridPoint {
    /// The x-coordinate (column) in the grid.
    pub x: i32,
    /// The y-coordinate (row) in the grid.
    pub y: i32,
}

impl GridPoint {
    /// The origin cell `(0, 0)`.
    pub const ORIGIN: GridPoint = GridPoint::new(0, 0);

    /// Creates a new `GridPoint`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPoint {
    fn from((x, y): (i32, i32)) -> Self {
        GridPoint::new(x, y)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

/// Represents an in-plane point in world coordinates.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct WorldPoint {
    /// The x-coordinate in world units.
    pub x: f64,
    /// The y-coordinate in world units.
    pub y: f64,
}

impl WorldPoint {
    /// Creates a new `WorldPoint`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for WorldPoint {
    fn from((x, y): (f64, f64)) -> Self {
        WorldPoint::new(x, y)
    }
}

/// Drops the out-of-plane component.
impl From<WorldPosition> for WorldPoint {
    fn from(p: WorldPosition) -> Self {
        WorldPoint::new(p.x, p.y)
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// A full world position: two in-plane axes plus the out-of-plane depth `z`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct WorldPosition {
    /// In-plane x (world units).
    pub x: f64,
    /// In-plane y (world units).
    pub y: f64,
    /// Out-of-plane depth (world units).
    pub z: f64,
}

impl WorldPosition {
    /// Creates a new `WorldPosition`.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the in-plane part of this position.
    #[must_use]
    pub const fn planar(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

impl From<(f64, f64, f64)> for WorldPosition {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        WorldPosition::new(x, y, z)
    }
}

impl From<[f64; 3]> for WorldPosition {
    fn from([x, y, z]: [f64; 3]) -> Self {
        WorldPosition::new(x, y, z)
    }
}

impl fmt::Display for WorldPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}
