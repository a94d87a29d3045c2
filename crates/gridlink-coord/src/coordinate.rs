//! A grid cell that can drive one attached entity.

use core::fmt;
use core::mem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::GridError;
use crate::metric::{self, AsGridPoint};
use crate::point_types::{GridPoint, WorldPoint, WorldPosition};
use crate::positionable::Positionable;
use crate::space::GridSpace;

/// How the coordinate and the entity are reconciled when they are attached.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapMode {
    /// The entity jumps to the coordinate's current cell.
    MoveEntity,
    /// The coordinate adopts the cell nearest to the entity, and the entity
    /// is snapped onto that cell.
    #[default]
    MoveCoordinate,
}

/// Whether a coordinate currently drives an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment<E> {
    /// No entity is bound.
    Unattached,
    /// The coordinate mirrors its cell onto this entity.
    Attached(E),
}

impl<E> Default for Attachment<E> {
    fn default() -> Self {
        Attachment::Unattached
    }
}

/// A 2-D integer grid coordinate bound to at most one positionable entity.
///
/// While an entity is attached, every change to the cell is written through
/// to the entity's in-plane position. The entity's depth is read back at the
/// moment of each write and preserved.
///
/// `E` is the handle used to reach the entity: a `&mut T`, an
/// `Rc<RefCell<T>>`, or any host handle implementing [`Positionable`].
#[derive(Debug, Clone)]
pub struct GridCoordinate<E = WorldPosition> {
    x: i32,
    y: i32,
    space: GridSpace,
    attachment: Attachment<E>,
}

impl<E> GridCoordinate<E> {
    /// A coordinate at the origin cell `(0, 0)`.
    pub fn origin(space: GridSpace) -> Self {
        Self::new(space, 0, 0)
    }

    /// A coordinate at the given cell.
    pub fn new(space: GridSpace, x: i32, y: i32) -> Self {
        GridCoordinate {
            x,
            y,
            space,
            attachment: Attachment::Unattached,
        }
    }

    /// A coordinate at the cell nearest to a world position.
    ///
    /// Takes either a [`WorldPoint`] or a [`WorldPosition`]; depth is ignored.
    pub fn from_world(space: GridSpace, position: impl Into<WorldPoint>) -> Self {
        let cell = space.from_world(position);
        Self::new(space, cell.x, cell.y)
    }

    /// Returns the x cell index.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Returns the y cell index.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Returns the current cell.
    pub fn point(&self) -> GridPoint {
        GridPoint::new(self.x, self.y)
    }

    /// Returns the grid space this coordinate converts with.
    pub fn space(&self) -> &GridSpace {
        &self.space
    }

    /// Returns the attachment state.
    pub fn attachment(&self) -> &Attachment<E> {
        &self.attachment
    }

    /// Returns `true` if an entity is attached.
    pub fn is_attached(&self) -> bool {
        matches!(self.attachment, Attachment::Attached(_))
    }

    /// Returns the attached entity, if any.
    pub fn entity(&self) -> Option<&E> {
        match &self.attachment {
            Attachment::Attached(entity) => Some(entity),
            Attachment::Unattached => None,
        }
    }

    /// The current cell in world space.
    pub fn to_world_2d(&self) -> WorldPoint {
        self.space.to_world_2d(self.point())
    }

    /// The current cell in world space, at the given depth.
    pub fn to_world_3d(&self, depth: f64) -> WorldPosition {
        self.space.to_world_3d(self.point(), depth)
    }

    /// Euclidean distance to another cell, see [`metric::distance`].
    pub fn distance_to(&self, other: impl AsGridPoint) -> f64 {
        metric::distance(self.point(), other)
    }

    /// Sign vector from `target` back toward this coordinate, see
    /// [`metric::direction`].
    pub fn direction_from(&self, target: impl AsGridPoint) -> GridPoint {
        metric::direction(self.point(), target)
    }
}

impl<E: Positionable> GridCoordinate<E> {
    /// Wraps an entity: the coordinate adopts the cell nearest to the entity
    /// and the entity is snapped onto it.
    pub fn from_entity(space: GridSpace, entity: E) -> Self {
        let mut coordinate = Self::origin(space);
        coordinate.bind(entity, SnapMode::MoveCoordinate);
        coordinate
    }

    /// Attaches an entity, reconciling positions according to `snap`.
    ///
    /// # Errors
    ///
    /// Returns `Err(GridError::AlreadyAttached)` if an entity is already
    /// attached. The existing attachment and the cell are left untouched and
    /// the rejected handle is dropped.
    pub fn attach(&mut self, entity: E, snap: SnapMode) -> Result<(), GridError> {
        if self.is_attached() {
            return Err(GridError::AlreadyAttached("detach the current entity first"));
        }
        self.bind(entity, snap);
        Ok(())
    }

    /// Releases the attached entity and hands its handle back.
    ///
    /// The cell is not changed and the entity is not moved.
    ///
    /// # Errors
    ///
    /// Returns `Err(GridError::NotAttached)` if no entity is attached.
    pub fn detach(&mut self) -> Result<E, GridError> {
        match mem::take(&mut self.attachment) {
            Attachment::Attached(entity) => {
                debug!(x = self.x, y = self.y, "Detached entity from grid coordinate");
                Ok(entity)
            }
            Attachment::Unattached => Err(GridError::NotAttached("nothing to detach")),
        }
    }

    /// Sets the x cell index.
    pub fn set_x(&mut self, x: i32) {
        self.x = x;
        self.sync_entity();
    }

    /// Sets the y cell index.
    pub fn set_y(&mut self, y: i32) {
        self.y = y;
        self.sync_entity();
    }

    /// Shifts the cell by whole cells. Overflow wraps.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x = self.x.wrapping_add(dx);
        self.y = self.y.wrapping_add(dy);
        self.sync_entity();
    }

    /// Shifts the cell by a world-space displacement.
    ///
    /// Each axis of the displacement is snapped to whole cells on its own
    /// before it is applied, so many small moves can add up differently from
    /// one large move. The result saturates at the `i32` bounds.
    pub fn move_by_world(&mut self, delta: impl Into<WorldPoint>) {
        let cells = self.space.from_world(delta);
        self.x = self.x.saturating_add(cells.x);
        self.y = self.y.saturating_add(cells.y);
        self.sync_entity();
    }

    /// Moves to the given cell.
    pub fn move_to(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
        self.sync_entity();
    }

    /// Moves to the given cell.
    pub fn move_to_point(&mut self, cell: GridPoint) {
        self.move_to(cell.x, cell.y);
    }

    /// Moves to the cell of another coordinate. Only the cell is copied.
    pub fn move_to_coordinate<F>(&mut self, other: &GridCoordinate<F>) {
        self.move_to(other.x, other.y);
    }

    fn bind(&mut self, entity: E, snap: SnapMode) {
        if snap == SnapMode::MoveCoordinate {
            let cell = self.space.from_world(entity.position());
            self.x = cell.x;
            self.y = cell.y;
        }
        self.attachment = Attachment::Attached(entity);
        self.sync_entity();
        debug!(?snap, x = self.x, y = self.y, "Attached entity to grid coordinate");
    }

    /// Writes the current cell onto the attached entity, keeping its depth.
    fn sync_entity(&mut self) {
        let cell = GridPoint::new(self.x, self.y);
        let space = self.space;
        if let Attachment::Attached(entity) = &mut self.attachment {
            let depth = entity.position().z;
            let target = space.to_world_3d(cell, depth);
            trace!(x = cell.x, y = cell.y, depth, "Synchronizing attached entity");
            entity.set_position(target);
        }
    }
}

impl<E> Default for GridCoordinate<E> {
    fn default() -> Self {
        Self::origin(GridSpace::UNIT)
    }
}

/// Coordinates are equal when they name the same cell.
impl<E, F> PartialEq<GridCoordinate<F>> for GridCoordinate<E> {
    fn eq(&self, other: &GridCoordinate<F>) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<E> AsGridPoint for GridCoordinate<E> {
    fn grid_point(&self) -> GridPoint {
        self.point()
    }
}

impl<E> fmt::Display for GridCoordinate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)?;
        if self.is_attached() {
            write!(f, " (attached)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::Rounding;
    const EPSILON: f64 = 1e-6;

    /// In-memory stand-in for a scene object.
    #[derive(Debug, Default)]
    struct FakeEntity {
        pos: WorldPosition,
        writes: usize,
    }

    impl FakeEntity {
        fn at(x: f64, y: f64, z: f64) -> Self {
            FakeEntity {
                pos: WorldPosition::new(x, y, z),
                writes: 0,
            }
        }
    }

    impl Positionable for FakeEntity {
        fn position(&self) -> WorldPosition {
            self.pos
        }

        fn set_position(&mut self, position: WorldPosition) {
            self.pos = position;
            self.writes += 1;
        }
    }

    fn assert_synced(coord: &GridCoordinate<&mut FakeEntity>, depth: f64) {
        let entity = coord.entity().unwrap();
        let expected = coord.to_world_2d();
        assert!((entity.pos.x - expected.x).abs() < EPSILON);
        assert!((entity.pos.y - expected.y).abs() < EPSILON);
        assert_eq!(entity.pos.z, depth);
    }

    #[test]
    fn test_constructors() {
        let origin: GridCoordinate = GridCoordinate::origin(GridSpace::UNIT);
        assert_eq!(origin.point(), GridPoint::ORIGIN);
        assert!(!origin.is_attached());

        let pair: GridCoordinate = GridCoordinate::new(GridSpace::UNIT, -3, 8);
        assert_eq!((pair.x(), pair.y()), (-3, 8));

        let half = GridSpace::new(0.5).unwrap();
        let from_2d: GridCoordinate = GridCoordinate::from_world(half, WorldPoint::new(1.1, -0.9));
        assert_eq!(from_2d.point(), GridPoint::new(2, -2));
        let from_3d: GridCoordinate =
            GridCoordinate::from_world(half, WorldPosition::new(1.1, -0.9, 40.0));
        assert_eq!(from_3d, from_2d);

        let default: GridCoordinate = GridCoordinate::default();
        assert_eq!(default.point(), GridPoint::ORIGIN);
        assert_eq!(*default.space(), GridSpace::UNIT);
    }

    #[test]
    fn test_from_entity_snaps_entity() {
        let mut entity = FakeEntity::at(2.6, -1.4, 7.0);
        let coord = GridCoordinate::from_entity(GridSpace::UNIT, &mut entity);
        assert_eq!(coord.point(), GridPoint::new(3, -1));
        assert!(coord.is_attached());
        drop(coord);
        assert_eq!(entity.pos, WorldPosition::new(3.0, -1.0, 7.0));
    }

    #[test]
    fn test_attach_move_coordinate() {
        let mut entity = FakeEntity::at(2.6, -1.4, 7.0);
        let mut coord = GridCoordinate::new(GridSpace::UNIT, 10, 10);
        coord.attach(&mut entity, SnapMode::MoveCoordinate).unwrap();
        assert_eq!(coord.point(), GridPoint::new(3, -1));
        assert_synced(&coord, 7.0);
    }

    #[test]
    fn test_attach_move_entity() {
        let mut entity = FakeEntity::at(2.6, -1.4, 7.0);
        let space = GridSpace::new(2.0).unwrap();
        let mut coord = GridCoordinate::new(space, 4, -5);
        coord.attach(&mut entity, SnapMode::MoveEntity).unwrap();
        assert_eq!(coord.point(), GridPoint::new(4, -5));
        drop(coord);
        assert_eq!(entity.pos, WorldPosition::new(8.0, -10.0, 7.0));
    }

    #[test]
    fn test_default_snap_mode_moves_coordinate() {
        assert_eq!(SnapMode::default(), SnapMode::MoveCoordinate);
    }

    #[test]
    fn test_attach_twice_fails_without_change() {
        let mut first = FakeEntity::at(1.0, 1.0, 0.0);
        let mut second = FakeEntity::at(-5.0, -5.0, 0.0);
        let mut coord = GridCoordinate::origin(GridSpace::UNIT);
        coord.attach(&mut first, SnapMode::MoveCoordinate).unwrap();

        let result = coord.attach(&mut second, SnapMode::MoveCoordinate);
        assert!(matches!(result, Err(GridError::AlreadyAttached(_))));
        assert_eq!(coord.point(), GridPoint::new(1, 1));

        coord.move_by(1, 0);
        drop(coord);
        assert_eq!(first.pos, WorldPosition::new(2.0, 1.0, 0.0));
        assert_eq!(second.pos, WorldPosition::new(-5.0, -5.0, 0.0));
        assert_eq!(second.writes, 0);
    }

    #[test]
    fn test_detach_twice_fails() {
        let mut entity = FakeEntity::at(0.0, 0.0, 0.0);
        let mut coord = GridCoordinate::from_entity(GridSpace::UNIT, &mut entity);
        assert!(coord.detach().is_ok());
        assert!(matches!(coord.detach(), Err(GridError::NotAttached(_))));
        assert!(!coord.is_attached());
    }

    #[test]
    fn test_detach_on_fresh_coordinate_fails() {
        let mut coord: GridCoordinate<FakeEntity> = GridCoordinate::new(GridSpace::UNIT, 2, 2);
        assert!(matches!(coord.detach(), Err(GridError::NotAttached("nothing to detach"))));
        assert_eq!(coord.point(), GridPoint::new(2, 2));
    }

    #[test]
    fn test_detach_keeps_cell_and_stops_sync() {
        let mut coord = GridCoordinate::new(GridSpace::UNIT, 0, 0);
        coord.attach(FakeEntity::at(4.2, 4.4, 1.0), SnapMode::MoveCoordinate).unwrap();
        let entity = coord.detach().unwrap();
        assert_eq!(coord.point(), GridPoint::new(4, 4));
        assert_eq!(entity.pos, WorldPosition::new(4.0, 4.0, 1.0));

        let writes = entity.writes;
        coord.move_by(3, 3);
        assert_eq!(entity.writes, writes);
        assert_eq!(entity.pos, WorldPosition::new(4.0, 4.0, 1.0));

        // The released entity can be attached again.
        coord.attach(entity, SnapMode::MoveEntity).unwrap();
        assert_eq!(coord.entity().unwrap().pos, WorldPosition::new(7.0, 7.0, 1.0));
    }

    #[test]
    fn test_move_by_syncs_entity() {
        let mut entity = FakeEntity::at(0.0, 0.0, 2.0);
        let mut coord = GridCoordinate::from_entity(GridSpace::UNIT, &mut entity);
        coord.move_by(2, -3);
        assert_eq!(coord.point(), GridPoint::new(2, -3));
        assert_synced(&coord, 2.0);
        drop(coord);
        assert_eq!(entity.pos, WorldPosition::new(2.0, -3.0, 2.0));
    }

    #[test]
    fn test_every_mutator_syncs_and_keeps_depth() {
        let space = GridSpace::new(0.25).unwrap();
        let mut entity = FakeEntity::at(0.0, 0.0, -3.5);
        let mut coord = GridCoordinate::from_entity(space, &mut entity);

        coord.set_x(7);
        assert_synced(&coord, -3.5);
        coord.set_y(-9);
        assert_synced(&coord, -3.5);
        coord.move_by(-1, 4);
        assert_synced(&coord, -3.5);
        coord.move_by_world(WorldPosition::new(1.0, -0.5, 100.0));
        assert_synced(&coord, -3.5);
        coord.move_to(11, 12);
        assert_synced(&coord, -3.5);
        coord.move_to_point(GridPoint::new(-1, -2));
        assert_synced(&coord, -3.5);

        let other: GridCoordinate = GridCoordinate::new(space, 5, 6);
        coord.move_to_coordinate(&other);
        assert_eq!(coord, other);
        assert_synced(&coord, -3.5);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_sync_reads_depth_at_write_time() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let entity = Rc::new(RefCell::new(FakeEntity::at(0.0, 0.0, 1.0)));
        let mut coord = GridCoordinate::from_entity(GridSpace::UNIT, Rc::clone(&entity));

        // Host moves the entity along z between grid edits.
        entity.borrow_mut().pos.z = 9.0;
        coord.move_by(1, 1);
        assert_eq!(entity.borrow().pos, WorldPosition::new(1.0, 1.0, 9.0));
    }

    #[test]
    fn test_move_by_world_rounds_per_axis() {
        let mut coord: GridCoordinate = GridCoordinate::origin(GridSpace::UNIT);
        coord.move_by_world(WorldPoint::new(1.6, -0.4));
        assert_eq!(coord.point(), GridPoint::new(2, 0));

        // Small steps round away to nothing, one large step does not.
        let mut stepped: GridCoordinate = GridCoordinate::origin(GridSpace::UNIT);
        for _ in 0..4 {
            stepped.move_by_world(WorldPoint::new(0.4, 0.4));
        }
        assert_eq!(stepped.point(), GridPoint::ORIGIN);
        let mut jumped: GridCoordinate = GridCoordinate::origin(GridSpace::UNIT);
        jumped.move_by_world(WorldPoint::new(1.6, 1.6));
        assert_eq!(jumped.point(), GridPoint::new(2, 2));
    }

    #[test]
    fn test_move_by_world_uses_space_rounding() {
        let space = GridSpace::UNIT.with_rounding(Rounding::HalfToEven);
        let mut coord: GridCoordinate = GridCoordinate::origin(space);
        coord.move_by_world(WorldPoint::new(2.5, 3.5));
        assert_eq!(coord.point(), GridPoint::new(2, 4));
    }

    #[test]
    fn test_move_by_world_saturates() {
        let mut coord: GridCoordinate = GridCoordinate::new(GridSpace::UNIT, 5, -5);
        coord.move_by_world(WorldPoint::new(1e20, -1e20));
        assert_eq!(coord.point(), GridPoint::new(i32::MAX, i32::MIN));

        coord.move_by_world(WorldPoint::new(-1e20, 1e20));
        assert_eq!(coord.point(), GridPoint::new(-1, -1));

        let mut entity = FakeEntity::at(0.0, 0.0, 4.0);
        let mut attached = GridCoordinate::from_entity(GridSpace::UNIT, &mut entity);
        attached.move_by_world(WorldPosition::new(3e15, 0.0, 0.0));
        assert_eq!(attached.x(), i32::MAX);
        assert_synced(&attached, 4.0);
    }

    #[test]
    fn test_move_by_wraps() {
        let mut coord: GridCoordinate = GridCoordinate::new(GridSpace::UNIT, i32::MAX, i32::MIN);
        coord.move_by(1, -1);
        assert_eq!(coord.point(), GridPoint::new(i32::MIN, i32::MAX));
    }

    #[test]
    fn test_unattached_mutators_only_touch_cell() {
        let mut coord: GridCoordinate<FakeEntity> = GridCoordinate::origin(GridSpace::UNIT);
        coord.set_x(3);
        coord.set_y(4);
        assert_eq!(coord.point(), GridPoint::new(3, 4));
        assert!(coord.entity().is_none());
    }

    #[test]
    fn test_distance_to() {
        let a: GridCoordinate = GridCoordinate::new(GridSpace::UNIT, 3, 4);
        let b: GridCoordinate = GridCoordinate::origin(GridSpace::UNIT);
        assert!((a.distance_to(&b) - 5.0).abs() < EPSILON);
        assert!((b.distance_to(&a) - 5.0).abs() < EPSILON);
        assert!((a.distance_to(GridPoint::new(3, 4))).abs() < EPSILON);
    }

    #[test]
    fn test_direction_from() {
        let a: GridCoordinate = GridCoordinate::new(GridSpace::UNIT, 5, -2);
        assert_eq!(a.direction_from(GridPoint::new(1, 1)), GridPoint::new(1, -1));
        assert_eq!(a.direction_from(&a), GridPoint::new(0, 0));
    }

    #[test]
    fn test_display() {
        let mut entity = FakeEntity::default();
        let mut coord = GridCoordinate::new(GridSpace::UNIT, -1, 2);
        assert_eq!(format!("{}", coord), "[-1, 2]");
        coord.attach(&mut entity, SnapMode::MoveEntity).unwrap();
        assert_eq!(format!("{}", coord), "[-1, 2] (attached)");
    }
}
