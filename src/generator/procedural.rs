// src/generator/procedural.rs

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::document::{merge_scene_files, write_scene, EntityEmitter, LayoutManifest, Scene, SdfModelWriter};
use crate::error::{GenError, Result};
use crate::generator::config::GeneratorConfig;
use crate::generator::layout::generate_layout;
use crate::generator::obstacles::{build_archetype_pool, scatter_obstacles};
use crate::map::Entity;

pub const ROOM_WORLD: &str = "room_world.world";
pub const OBSTACLE_WORLD: &str = "obstacle_world.world";
pub const RANDOM_WORLD: &str = "random_world.world";

/// One-shot generator: owns the configuration and the single random source
/// of a run.
pub struct ProceduralGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    rng: R,
    seed: Option<u64>,
    stats: GenerationStats,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct GenerationStats {
    pub generation_time: f64,
    pub room_count: usize,
    pub wall_count: usize,
    pub obstacle_count: usize,
}

impl ProceduralGenerator<StdRng> {
    /// Seeds from `config.seed`, or from a fresh OS-drawn seed that is logged
    /// so the run can be replayed.
    pub fn new(config: GeneratorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        info!("Generating with seed {}", seed);
        let mut generator = Self::with_rng(config, StdRng::seed_from_u64(seed));
        generator.seed = Some(seed);
        generator
    }
}

impl<R: Rng> ProceduralGenerator<R> {
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        ProceduralGenerator {
            config,
            rng,
            seed: None,
            stats: GenerationStats::default(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }

    /// Perimeter plus room walls.
    pub fn generate_walls(&mut self) -> Result<Vec<Entity>> {
        self.config.validate_layout()?;
        let started = Instant::now();
        let walls = generate_layout(self.config.num_rooms, &self.config.layout_params(), &mut self.rng)?;
        self.stats.room_count += self.config.num_rooms;
        self.stats.wall_count += walls.len();
        self.stats.generation_time += started.elapsed().as_secs_f64();
        Ok(walls)
    }

    /// Archetype pool lookup and obstacle placement.
    pub fn generate_obstacles(&mut self) -> Result<Vec<Entity>> {
        self.config.validate_obstacles()?;
        let started = Instant::now();
        let pool = build_archetype_pool(&self.config.asset_root, &self.config.archetypes, &mut self.rng)?;
        let obstacles = scatter_obstacles(
            self.config.num_obstacles,
            &pool,
            &self.config.obstacle_params(),
            &mut self.rng,
        )?;
        self.stats.obstacle_count += obstacles.len();
        self.stats.generation_time += started.elapsed().as_secs_f64();
        Ok(obstacles)
    }

    /// Generates the walls, emits each one and composes the room scene.
    pub fn build_rooms<E: EntityEmitter>(&mut self, emitter: &mut E) -> Result<(Scene, Vec<Entity>)> {
        let walls = self.generate_walls()?;
        emit_all(emitter, &walls)?;
        info!("Generated {} rooms ({} walls)", self.config.num_rooms, walls.len());
        Ok((Scene::compose(&walls), walls))
    }

    /// Generates the obstacles, emits each one and composes the obstacle scene.
    pub fn build_obstacles<E: EntityEmitter>(&mut self, emitter: &mut E) -> Result<(Scene, Vec<Entity>)> {
        let obstacles = self.generate_obstacles()?;
        emit_all(emitter, &obstacles)?;
        info!("Generated {} obstacles", obstacles.len());
        Ok((Scene::compose(&obstacles), obstacles))
    }

    fn manifest(&self, entities: Vec<Entity>) -> LayoutManifest {
        LayoutManifest {
            seed: self.seed,
            grid_limit: self.config.grid_limit,
            entities,
        }
    }
}

/// Hands every entity to `emitter`, stopping at the first failure.
pub fn emit_all<E: EntityEmitter + ?Sized>(emitter: &mut E, entities: &[Entity]) -> Result<()> {
    for entity in entities {
        debug!("Emitting {}", entity.name);
        emitter.emit_entity(entity)?;
    }
    Ok(())
}

/// What a run of the binary produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Perimeter and rooms into `room_world.world`.
    Rooms,
    /// Scattered obstacles into `obstacle_world.world`.
    Obstacles,
    /// Room world plus obstacle world into `random_world.world`.
    Merge,
    /// Rooms, obstacles, then merge, from one random source.
    All,
}

impl FromStr for RunMode {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rooms" => Ok(RunMode::Rooms),
            "obstacles" => Ok(RunMode::Obstacles),
            "merge" => Ok(RunMode::Merge),
            "all" => Ok(RunMode::All),
            other => Err(GenError::InvalidConfiguration(format!(
                "unknown mode '{}' (expected rooms, obstacles, merge or all)",
                other
            ))),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunMode::Rooms => "rooms",
            RunMode::Obstacles => "obstacles",
            RunMode::Merge => "merge",
            RunMode::All => "all",
        };
        f.write_str(name)
    }
}

/// Result of [`run`]: statistics plus every world file written.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub stats: GenerationStats,
    pub seed: Option<u64>,
    pub worlds: Vec<PathBuf>,
}

/// Runs `mode` against `config`, writing models and worlds under
/// `config.output_root`. The configuration is validated before anything is
/// written.
pub fn run(mode: RunMode, config: &GeneratorConfig) -> Result<RunReport> {
    if matches!(mode, RunMode::Rooms | RunMode::All) {
        config.validate_layout()?;
    }
    if matches!(mode, RunMode::Obstacles | RunMode::All) {
        config.validate_obstacles()?;
    }

    let world_dir = config.world_dir();
    let room_world = world_dir.join(ROOM_WORLD);
    let obstacle_world = world_dir.join(OBSTACLE_WORLD);
    let random_world = world_dir.join(RANDOM_WORLD);

    let mut report = RunReport::default();
    if mode == RunMode::Merge {
        merge_scene_files(&room_world, &obstacle_world, &random_world)?;
        report.worlds.push(random_world);
        return Ok(report);
    }

    let mut generator = ProceduralGenerator::new(config.clone());
    let mut writer = SdfModelWriter::new(config.models_dir(), &config.asset_root);

    if matches!(mode, RunMode::Rooms | RunMode::All) {
        let (scene, walls) = generator.build_rooms(&mut writer)?;
        write_scene(&scene, &room_world)?;
        generator.manifest(walls).write(&room_world.with_extension("layout.json"))?;
        report.worlds.push(room_world.clone());
    }
    if matches!(mode, RunMode::Obstacles | RunMode::All) {
        let (scene, obstacles) = generator.build_obstacles(&mut writer)?;
        write_scene(&scene, &obstacle_world)?;
        generator.manifest(obstacles).write(&obstacle_world.with_extension("layout.json"))?;
        report.worlds.push(obstacle_world.clone());
    }
    if mode == RunMode::All {
        merge_scene_files(&room_world, &obstacle_world, &random_world)?;
        report.worlds.push(random_world);
    }

    report.stats = generator.stats().clone();
    report.seed = generator.seed();
    info!(
        "Finished {} run in {:.3}s: {} rooms, {} walls, {} obstacles",
        mode,
        report.stats.generation_time,
        report.stats.room_count,
        report.stats.wall_count,
        report.stats.obstacle_count
    );
    Ok(report)
}
