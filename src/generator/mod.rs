// src/generator/mod.rs
pub mod config;
pub mod layout;
pub mod obstacles;
mod procedural;

pub use config::GeneratorConfig;
pub use layout::{generate_layout, generate_rooms, LayoutParams, Room};
pub use obstacles::{build_archetype_pool, scatter_obstacles, ObstacleParams};
pub use procedural::{
    emit_all, run, GenerationStats, ProceduralGenerator, RunMode, RunReport, OBSTACLE_WORLD,
    RANDOM_WORLD, ROOM_WORLD,
};
