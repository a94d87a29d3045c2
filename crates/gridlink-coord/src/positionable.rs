//! The capability a host entity exposes so a coordinate can drive it.

use crate::point_types::WorldPosition;

/// An external entity with a mutable world position.
///
/// The coordinate only ever reads the current position and writes a new
/// one; it never owns or destroys the entity. Implement this for whatever
/// handle the host uses to reach its scene objects.
pub trait Positionable {
    /// Returns the entity's current world position.
    fn position(&self) -> WorldPosition;

    /// Overwrites the entity's world position.
    fn set_position(&mut self, position: WorldPosition);
}

impl<T: Positionable + ?Sized> Positionable for &mut T {
    fn position(&self) -> WorldPosition {
        (**self).position()
    }

    fn set_position(&mut self, position: WorldPosition) {
        (**self).set_position(position)
    }
}

#[cfg(feature = "std")]
impl<T: Positionable + ?Sized> Positionable for std::boxed::Box<T> {
    fn position(&self) -> WorldPosition {
        (**self).position()
    }

    fn set_position(&mut self, position: WorldPosition) {
        (**self).set_position(position)
    }
}

/// Shared single-threaded handle; the borrow is held only for the duration
/// of each read or write.
#[cfg(feature = "std")]
impl<T: Positionable + ?Sized> Positionable for std::rc::Rc<std::cell::RefCell<T>> {
    fn position(&self) -> WorldPosition {
        self.borrow().position()
    }

    fn set_position(&mut self, position: WorldPosition) {
        self.borrow_mut().set_position(position)
    }
}

/// A bare world position is its own entity. Handy for tests and for callers
/// that only want the synchronized position value.
impl Positionable for WorldPosition {
    fn position(&self) -> WorldPosition {
        *self
    }

    fn set_position(&mut self, position: WorldPosition) {
        *self = position;
    }
}
