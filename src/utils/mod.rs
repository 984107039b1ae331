// src/utils/mod.rs
pub mod geometry;
pub mod util;

pub use geometry::{
    perimeter_segment, wall_bounds, wall_size, Axis, BoundingBox, Direction, Point2D, Side,
};
