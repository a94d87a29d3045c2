use parking_lot::RwLock;
use std::sync::Arc;

use gridlink_coord::{Positionable, WorldPosition};

/// A named object in the host scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub position: WorldPosition,
    /// Number of position writes the entity has received.
    pub writes: u32,
}

impl Entity {
    pub fn new(name: impl Into<String>, position: WorldPosition) -> Self {
        Entity {
            name: name.into(),
            position,
            writes: 0,
        }
    }
}

/// Shared handle to a scene entity. The scene keeps one clone, the grid
/// coordinate holds another while attached.
#[derive(Debug, Clone)]
pub struct EntityHandle(Arc<RwLock<Entity>>);

impl EntityHandle {
    pub fn new(entity: Entity) -> Self {
        EntityHandle(Arc::new(RwLock::new(entity)))
    }

    pub fn snapshot(&self) -> Entity {
        (*self.0.read()).clone()
    }
}

impl Positionable for EntityHandle {
    fn position(&self) -> WorldPosition {
        self.0.read().position
    }

    fn set_position(&mut self, position: WorldPosition) {
        let mut g = self.0.write();
        g.position = position;
        g.writes += 1;
    }
}

#[cfg(test)]
impl EntityHandle {
    /// Moves the entity directly, the way the host would outside the grid.
    pub(crate) fn place(&self, position: WorldPosition) {
        self.0.write().position = position;
    }
}
