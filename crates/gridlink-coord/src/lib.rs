#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for 2D integer grid coordinates."]
#![doc = ""]
#![doc = "This crate converts between discrete grid cells and continuous world positions,"]
#![doc = "and keeps at most one attached positionable entity snapped to a coordinate's cell."]
#![doc = ""]
#![doc = "```"]
#![doc = "use gridlink_coord::{GridCoordinate, GridPoint, GridSpace, WorldPosition};"]
#![doc = ""]
#![doc = "let mut entity = WorldPosition::new(2.6, -1.4, 7.0);"]
#![doc = "let mut coord = GridCoordinate::from_entity(GridSpace::UNIT, &mut entity);"]
#![doc = "assert_eq!(coord.point(), GridPoint::new(3, -1));"]
#![doc = ""]
#![doc = "coord.move_by(2, -3);"]
#![doc = "drop(coord);"]
#![doc = "assert_eq!(entity, WorldPosition::new(5.0, -4.0, 7.0));"]
#![doc = "```"]

pub mod coordinate;
pub mod error;
pub mod metric;
pub mod point_types;
pub mod positionable;
pub mod space;

pub use coordinate::{Attachment, GridCoordinate, SnapMode};
pub use error::GridError;
pub use metric::{AsGridPoint, direction, distance, distance_compat};
pub use point_types::{GridPoint, WorldPoint, WorldPosition};
pub use positionable::Positionable;
pub use space::{GridSpace, Rounding};
