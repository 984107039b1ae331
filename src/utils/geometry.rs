// src/utils/geometry.rs
//! Axis-aligned geometry for the arena: points, boxes, sides and the two
//! primitives every wall is built from.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[cfg(test)]
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Coordinate along `axis`.
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Moves the point by `distance` in `direction`.
    pub fn offset(&self, direction: Direction, distance: f64) -> Point2D {
        let sign = direction.sign();
        match direction.axis() {
            Axis::X => Point2D::new(self.x + sign * distance, self.y),
            Axis::Y => Point2D::new(self.x, self.y + sign * distance),
        }
    }
}

/// Axis-aligned box in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox { min_x, min_y, max_x, max_y }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Area shared with `other`; zero when the boxes only touch.
    #[cfg(test)]
    pub fn overlap_area(&self, other: &BoundingBox) -> f64 {
        let w = self.max_x.min(other.max_x) - self.min_x.max(other.min_x);
        let h = self.max_y.min(other.max_y) - self.min_y.max(other.min_y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn perpendicular(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// A signed direction along one of the two arena axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
}

impl Direction {
    pub fn axis(self) -> Axis {
        match self {
            Direction::PosX | Direction::NegX => Axis::X,
            Direction::PosY | Direction::NegY => Axis::Y,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Direction::PosX | Direction::PosY => 1.0,
            Direction::NegX | Direction::NegY => -1.0,
        }
    }

    /// The two directions running along `axis`, positive first.
    pub fn along(axis: Axis) -> [Direction; 2] {
        match axis {
            Axis::X => [Direction::PosX, Direction::NegX],
            Axis::Y => [Direction::PosY, Direction::NegY],
        }
    }
}

/// One of the four arena boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

    pub fn name(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Axis a room wall anchored on this side runs along.
    pub fn run_axis(&self) -> Axis {
        match self {
            Side::Top | Side::Bottom => Axis::Y,
            Side::Left | Side::Right => Axis::X,
        }
    }

    /// Direction pointing from this boundary into the arena.
    pub fn inward(&self) -> Direction {
        match self {
            Side::Top => Direction::NegY,
            Side::Bottom => Direction::PosY,
            Side::Left => Direction::PosX,
            Side::Right => Direction::NegX,
        }
    }
}

/// Box extent `[x, y, z]` of a wall of `length` running along `axis`.
pub fn wall_size(axis: Axis, length: f64, thickness: f64, height: f64) -> [f64; 3] {
    match axis {
        Axis::X => [length, thickness, height],
        Axis::Y => [thickness, length, height],
    }
}

/// Size and center of the perimeter wall on `side` of the square arena
/// `[-grid_limit, grid_limit]²`.
///
/// The inner face sits exactly on the boundary, so the wall center is pushed
/// outward by half the thickness and the four walls leave the corners empty
/// instead of overlapping there.
pub fn perimeter_segment(
    side: Side,
    grid_limit: f64,
    thickness: f64,
    height: f64,
) -> ([f64; 3], Point2D) {
    let span = grid_limit * 2.0;
    let offset = grid_limit + thickness / 2.0;
    match side {
        Side::Top => ([span, thickness, height], Point2D::new(0.0, offset)),
        Side::Bottom => ([span, thickness, height], Point2D::new(0.0, -offset)),
        Side::Left => ([thickness, span, height], Point2D::new(-offset, 0.0)),
        Side::Right => ([thickness, span, height], Point2D::new(offset, 0.0)),
    }
}

/// XY footprint of a box of `size` centered on `center`. Walls never rotate.
pub fn wall_bounds(center: &Point2D, size: &[f64; 3]) -> BoundingBox {
    let half_x = size[0] / 2.0;
    let half_y = size[1] / 2.0;
    BoundingBox::new(
        center.x - half_x,
        center.y - half_y,
        center.x + half_x,
        center.y + half_y,
    )
}
