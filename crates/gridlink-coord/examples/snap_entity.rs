use gridlink_coord::*;

/// A scene object with a position and a name, standing in for an engine entity.
#[derive(Debug)]
struct Token {
    name: &'static str,
    position: WorldPosition,
}

impl Positionable for Token {
    fn position(&self) -> WorldPosition {
        self.position
    }

    fn set_position(&mut self, position: WorldPosition) {
        self.position = position;
    }
}

fn main() {
    let cell_size = 1.0;
    let space_result = GridSpace::new(cell_size);

    match space_result {
        Ok(space) => {
            println!("Grid space: {}", space);

            let mut token = Token {
                name: "scout",
                position: WorldPosition::new(2.6, -1.4, 7.0),
            };
            println!("Before attach: {} at {}", token.name, token.position);

            let mut coord = GridCoordinate::from_entity(space, &mut token);
            println!("Attached, coordinate snapped to {}", coord);

            let steps = [(2, -3), (-1, 0), (0, 4)];
            for (i, (dx, dy)) in steps.iter().enumerate() {
                coord.move_by(*dx, *dy);
                if let Some(entity) = coord.entity() {
                    let cell = coord.point();
                    println!("Step {:>2}: cell {} -> world {}", i + 1, cell, entity.position);
                }
            }

            let home: GridCoordinate = GridCoordinate::origin(space);
            println!("Distance home:  {:.3}", coord.distance_to(&home));
            println!("Direction home: {}", coord.direction_from(&home));

            match coord.detach() {
                Ok(entity) => println!("Detached {} at {}", entity.name, entity.position),
                Err(e) => eprintln!("Detach failed: {}", e),
            }
            if let Err(e) = coord.detach() {
                println!("Second detach rejected: {}", e);
            }
        }
        Err(e) => {
            eprintln!("Failed to build grid space: {:?}", e);
            eprintln!("Please ensure cell_size ({}) is positive.", cell_size);
        }
    }
}
