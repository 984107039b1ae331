// src/generator/layout.rs
//! Perimeter and room walls.
//!
//! A room is two walls: wall 1 grows from a random point on one of the arena
//! boundaries straight into the arena, wall 2 runs perpendicular to it from
//! wall 1's far end to the opposite boundary, leaving a door-sized gap where
//! the two would have met. The other two sides of the room stay open.

use log::{debug, warn};
use rand::Rng;

use crate::error::Result;
use crate::generator::config::invalid;
use crate::map::Entity;
use crate::utils::{perimeter_segment, wall_size, Direction, Point2D, Side};

/// Smallest wall-1 length; the largest is `grid_limit / 2`.
pub const MIN_WALL_LENGTH: i32 = 3;

/// Geometry constants shared by every wall of a layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub grid_limit: i32,
    pub wall_thickness: f64,
    pub wall_height: f64,
    pub door_width: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            grid_limit: 10,
            wall_thickness: 0.2,
            wall_height: 1.0,
            door_width: 1.0,
        }
    }
}

impl LayoutParams {
    pub fn validate(&self) -> Result<()> {
        if self.grid_limit / 2 < MIN_WALL_LENGTH {
            return Err(invalid(format!(
                "grid_limit must be at least {} (got {})",
                MIN_WALL_LENGTH * 2,
                self.grid_limit
            )));
        }
        if !(self.wall_thickness > 0.0) || !(self.wall_height > 0.0) {
            return Err(invalid("wall thickness and height must be positive"));
        }
        if !(self.door_width >= 0.0) {
            return Err(invalid("door_width must not be negative"));
        }
        if self.door_width >= self.grid_limit as f64 {
            return Err(invalid(format!(
                "door_width {} leaves no room for a wall inside grid_limit {}",
                self.door_width, self.grid_limit
            )));
        }
        Ok(())
    }

    fn limit(&self) -> f64 {
        self.grid_limit as f64
    }
}

/// The two walls of one room and the points the door sits between.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub index: usize,
    pub side: Side,
    pub wall1: Entity,
    pub wall2: Entity,
    /// Far end of wall 1, where the door gap begins.
    pub end1: Point2D,
    /// Near end of wall 2, where the door gap ends.
    pub wall2_start: Point2D,
    pub door_direction: Direction,
}

impl Room {
    pub fn into_entities(self) -> [Entity; 2] {
        [self.wall1, self.wall2]
    }
}

/// The four walls enclosing the arena, in top, bottom, left, right order.
pub fn generate_perimeter(params: &LayoutParams) -> Vec<Entity> {
    Side::ALL
        .iter()
        .map(|&side| {
            let (size, center) = perimeter_segment(
                side,
                params.limit(),
                params.wall_thickness,
                params.wall_height,
            );
            Entity::wall(format!("outer_{}", side.name()), center, size)
        })
        .collect()
}

/// Builds room `index` (1-based, used only for naming).
pub fn generate_room<R: Rng>(index: usize, params: &LayoutParams, rng: &mut R) -> Room {
    let g = params.grid_limit;
    let side = Side::ALL[rng.random_range(0..Side::ALL.len())];
    let length1 = rng.random_range(MIN_WALL_LENGTH..=g / 2) as f64;
    let lane = rng.random_range(-g + 1..=g - 1) as f64;

    let limit = params.limit();
    let anchor = match side {
        Side::Top => Point2D::new(lane, limit),
        Side::Bottom => Point2D::new(lane, -limit),
        Side::Left => Point2D::new(-limit, lane),
        Side::Right => Point2D::new(limit, lane),
    };
    let inward = side.inward();
    let end1 = anchor.offset(inward, length1);
    let wall1 = Entity::wall(
        format!("room{}_wall1", index),
        anchor.offset(inward, length1 / 2.0),
        wall_size(side.run_axis(), length1, params.wall_thickness, params.wall_height),
    );
    debug!(
        "Room {} - wall 1: {} along {:?}, from ({}, {}) to ({}, {})",
        index,
        side.name(),
        side.run_axis(),
        anchor.x,
        anchor.y,
        end1.x,
        end1.y
    );

    let candidates = Direction::along(side.run_axis().perpendicular());
    let door_direction = candidates[rng.random_range(0..candidates.len())];
    let (wall2, wall2_start) = build_wall2(index, end1, door_direction, params);

    Room {
        index,
        side,
        wall1,
        wall2,
        end1,
        wall2_start,
        door_direction,
    }
}

/// Wall 2 of room `index`: starts `door_width` past `end1` in `direction` and
/// runs to the arena boundary that way. A wall with no span left is kept with
/// zero length.
pub fn build_wall2(
    index: usize,
    end1: Point2D,
    direction: Direction,
    params: &LayoutParams,
) -> (Entity, Point2D) {
    let start = end1.offset(direction, params.door_width);
    let mut length2 = span_to_boundary(start.along(direction.axis()), direction, params.limit());
    if length2 <= 0.0 {
        warn!(
            "Room {} - wall 2 heading {:?} from ({}, {}) has no span left; clamping to zero length",
            index, direction, start.x, start.y
        );
        length2 = 0.0;
    }
    let center = start.offset(direction, length2 / 2.0);
    debug!(
        "Room {} - wall 2: {:?}, center ({}, {}), length {}",
        index, direction, center.x, center.y, length2
    );
    let wall = Entity::wall(
        format!("room{}_wall2", index),
        center,
        wall_size(direction.axis(), length2, params.wall_thickness, params.wall_height),
    );
    (wall, start)
}

/// Distance from coordinate `start` to the arena boundary in `direction`.
/// Negative when `start` already lies past that boundary.
pub fn span_to_boundary(start: f64, direction: Direction, grid_limit: f64) -> f64 {
    if direction.sign() > 0.0 {
        grid_limit - start
    } else {
        start + grid_limit
    }
}

/// Rooms `1..=num_rooms`, drawn in order from `rng`.
pub fn generate_rooms<R: Rng>(num_rooms: usize, params: &LayoutParams, rng: &mut R) -> Result<Vec<Room>> {
    params.validate()?;
    Ok((1..=num_rooms)
        .map(|index| generate_room(index, params, rng))
        .collect())
}

/// Full wall layout: the four perimeter walls, then both walls of every room
/// in room order.
pub fn generate_layout<R: Rng>(num_rooms: usize, params: &LayoutParams, rng: &mut R) -> Result<Vec<Entity>> {
    let rooms = generate_rooms(num_rooms, params, rng)?;
    let mut entities = generate_perimeter(params);
    entities.reserve(rooms.len() * 2);
    for room in rooms {
        entities.extend(room.into_entities());
    }
    Ok(entities)
}
