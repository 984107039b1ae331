// src/map/entity.rs
use serde::{Deserialize, Serialize};

use crate::map::Archetype;
use crate::utils::util::fmt_num;
use crate::utils::{wall_bounds, BoundingBox, Point2D};

/// Position and orientation of an entity inside the arena. `z` is the ground
/// elevation for everything the generators place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl Pose {
    /// Ground-level pose with no rotation.
    pub fn at(x: f64, y: f64) -> Self {
        Pose {
            x,
            y,
            ..Default::default()
        }
    }

    pub fn with_yaw(mut self, yaw: f64) -> Self {
        self.yaw = yaw;
        self
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }

    /// Space-separated `x y z roll pitch yaw`, the form SDF `<pose>` expects.
    pub fn to_sdf(&self) -> String {
        [self.x, self.y, self.z, self.roll, self.pitch, self.yaw]
            .iter()
            .map(|v| fmt_num(*v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What an entity looks like: a plain box, or a scaled mesh archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Box { size: [f64; 3] },
    Mesh { archetype: Archetype, scale: [f64; 3] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Wall,
    Obstacle,
}

/// A named, posed object placed into the arena. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub kind: EntityKind,
    pub pose: Pose,
    pub shape: Shape,
    /// Only walls have a known footprint; an obstacle's depends on its mesh.
    pub bounds: Option<BoundingBox>,
}

impl Entity {
    pub fn wall(name: impl Into<String>, center: Point2D, size: [f64; 3]) -> Self {
        Entity {
            name: name.into(),
            kind: EntityKind::Wall,
            pose: Pose::at(center.x, center.y),
            shape: Shape::Box { size },
            bounds: Some(wall_bounds(&center, &size)),
        }
    }

    pub fn obstacle(name: impl Into<String>, pose: Pose, archetype: Archetype, scale: [f64; 3]) -> Self {
        Entity {
            name: name.into(),
            kind: EntityKind::Obstacle,
            pose,
            shape: Shape::Mesh { archetype, scale },
            bounds: None,
        }
    }

    /// Box extent, for walls.
    pub fn size(&self) -> Option<[f64; 3]> {
        match &self.shape {
            Shape::Box { size } => Some(*size),
            Shape::Mesh { .. } => None,
        }
    }

    /// Archetype and scale, for obstacles.
    pub fn mesh(&self) -> Option<(&Archetype, [f64; 3])> {
        match &self.shape {
            Shape::Mesh { archetype, scale } => Some((archetype, *scale)),
            Shape::Box { .. } => None,
        }
    }
}
