// src/map/mod.rs
pub mod archetype;
pub mod entity;

pub use archetype::{Archetype, MeshFormat};
pub use entity::{Entity, EntityKind, Pose, Shape};
