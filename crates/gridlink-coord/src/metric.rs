//! Distance and direction between grid cells.

use libm::{fabs, round, sqrt};

use crate::point_types::GridPoint;

/// Anything that names a single grid cell.
pub trait AsGridPoint {
    /// Returns the cell.
    fn grid_point(&self) -> GridPoint;
}

impl AsGridPoint for GridPoint {
    fn grid_point(&self) -> GridPoint {
        *self
    }
}

impl<T: AsGridPoint + ?Sized> AsGridPoint for &T {
    fn grid_point(&self) -> GridPoint {
        (**self).grid_point()
    }
}

/// Euclidean distance between two cells, in cells.
///
/// Each squared axis difference is rounded before the sum is taken:
/// `|sqrt(round(dx²) + round(dy²))|`. Downstream numeric comparisons depend
/// on this exact sequence.
///
/// # Examples
///
/// ```
/// use gridlink_coord::{GridPoint, metric::distance};
///
/// assert_eq!(distance(GridPoint::new(3, 4), GridPoint::new(0, 0)), 5.0);
/// ```
pub fn distance(a: impl AsGridPoint, b: impl AsGridPoint) -> f64 {
    let (a, b) = (a.grid_point(), b.grid_point());
    quantized_length(
        i64::from(b.x) - i64::from(a.x),
        i64::from(b.y) - i64::from(a.y),
    )
}

/// Distance as computed by the legacy free-function contract, where the
/// y difference is always zero and only the x axis contributes.
///
/// Kept for callers that need identical numbers; prefer [`distance`].
pub fn distance_compat(a: impl AsGridPoint, b: impl AsGridPoint) -> f64 {
    let (a, b) = (a.grid_point(), b.grid_point());
    quantized_length(i64::from(a.x) - i64::from(b.x), 0)
}

/// Per-axis sign of `source - target`.
///
/// Each component is `-1`, `0` or `1`. The vector points from `target` back
/// toward `source`.
pub fn direction(source: impl AsGridPoint, target: impl AsGridPoint) -> GridPoint {
    let (source, target) = (source.grid_point(), target.grid_point());
    GridPoint::new(
        source.x.cmp(&target.x) as i32,
        source.y.cmp(&target.y) as i32,
    )
}

fn quantized_length(dx: i64, dy: i64) -> f64 {
    let (dx, dy) = (dx as f64, dy as f64);
    fabs(sqrt(round(dx * dx) + round(dy * dy)))
}
