use serde::Deserialize;
use tracing::{debug, info, warn};

use gridlink_coord::{GridCoordinate, GridError, GridPoint, GridSpace, SnapMode, WorldPosition};

use crate::scene::EntityHandle;

/// One scripted edit applied to the driven coordinate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    MoveBy { dx: i32, dy: i32 },
    MoveByWorld {
        dx: f64,
        dy: f64,
        #[serde(default)]
        dz: f64,
    },
    MoveTo { x: i32, y: i32 },
    SetX { value: i32 },
    SetY { value: i32 },
    Attach {
        #[serde(default)]
        snap: SnapMode,
    },
    Detach,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub applied: usize,
    pub rejected: usize,
}

/// Drives one grid coordinate through a script, tracking a scene entity.
pub struct ScriptRunner {
    coord: GridCoordinate<EntityHandle>,
    entity: EntityHandle,
    goal: GridPoint,
}

impl ScriptRunner {
    /// Attaches `entity` to a coordinate at the origin using `snap`.
    pub fn new(
        space: GridSpace,
        entity: EntityHandle,
        snap: SnapMode,
        goal: GridPoint,
    ) -> Result<Self, GridError> {
        let mut coord = GridCoordinate::origin(space);
        coord.attach(entity.clone(), snap)?;
        Ok(ScriptRunner { coord, entity, goal })
    }

    pub fn coordinate(&self) -> &GridCoordinate<EntityHandle> {
        &self.coord
    }

    pub fn entity(&self) -> &EntityHandle {
        &self.entity
    }

    /// Applies a single step.
    ///
    /// # Errors
    ///
    /// Attachment misuse is returned unchanged from the coordinate.
    pub fn apply(&mut self, step: &Step) -> Result<(), GridError> {
        match *step {
            Step::MoveBy { dx, dy } => self.coord.move_by(dx, dy),
            Step::MoveByWorld { dx, dy, dz } => {
                self.coord.move_by_world(WorldPosition::new(dx, dy, dz))
            }
            Step::MoveTo { x, y } => self.coord.move_to(x, y),
            Step::SetX { value } => self.coord.set_x(value),
            Step::SetY { value } => self.coord.set_y(value),
            Step::Attach { snap } => self.coord.attach(self.entity.clone(), snap)?,
            Step::Detach => {
                self.coord.detach()?;
            }
        }
        Ok(())
    }

    /// Runs every step, logging the state after each. Rejected steps are
    /// reported and skipped.
    pub fn run(&mut self, script: &[Step]) -> Report {
        let mut report = Report::default();
        info!(
            cell = %self.coord.point(),
            position = %self.entity.snapshot().position,
            "Script starting"
        );

        for (i, step) in script.iter().enumerate() {
            match self.apply(step) {
                Ok(()) => {
                    report.applied += 1;
                    self.log_state(i + 1, step);
                }
                Err(e) => {
                    report.rejected += 1;
                    warn!(step = i + 1, ?step, error = %e, "Step rejected");
                }
            }
        }
        report
    }

    fn log_state(&self, index: usize, step: &Step) {
        let entity = self.entity.snapshot();
        info!(
            step = index,
            cell = %self.coord.point(),
            attached = self.coord.is_attached(),
            position = %entity.position,
            distance = self.coord.distance_to(self.goal),
            direction = %self.coord.direction_from(self.goal),
            "Applied {:?}",
            step
        );
        debug!(writes = entity.writes, name = %entity.name, "Entity state");
    }
}
