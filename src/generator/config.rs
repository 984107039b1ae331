// src/generator/config.rs

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_at, GenError, Result};
use crate::generator::layout::LayoutParams;
use crate::generator::obstacles::ObstacleParams;

/// Archetypes looked up in the asset library when none are configured.
pub const DEFAULT_ARCHETYPES: [&str; 3] = ["construction_cone", "cinder_block", "arm_part"];

/// Run-time constants for one generation run.
///
/// Every field has a default, so a JSON config file only needs the keys it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub num_rooms: usize,
    pub num_obstacles: usize,
    /// Half-extent of the square arena.
    pub grid_limit: i32,
    pub wall_height: f64,
    pub wall_thickness: f64,
    pub door_width: f64,
    /// Obstacles are placed with x and y in `[-obstacle_extent, obstacle_extent]`.
    pub obstacle_extent: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Candidate model directories under `asset_root`.
    pub archetypes: Vec<String>,
    pub asset_root: PathBuf,
    pub output_root: PathBuf,
    /// Fixed seed for reproducible output; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            num_rooms: 5,
            num_obstacles: 25,
            grid_limit: 10,
            wall_height: 1.0,
            wall_thickness: 0.2,
            door_width: 1.0,
            obstacle_extent: 8.0,
            min_scale: 0.5,
            max_scale: 1.5,
            archetypes: DEFAULT_ARCHETYPES.iter().map(|s| s.to_string()).collect(),
            asset_root: default_asset_root(),
            output_root: PathBuf::from("."),
            seed: None,
        }
    }
}

/// `~/.gazebo/models`, where Gazebo keeps its downloaded model library.
fn default_asset_root() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
    home.join(".gazebo").join("models")
}

impl GeneratorConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(io_at(path))?;
        Self::from_json_str(&text)
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            grid_limit: self.grid_limit,
            wall_thickness: self.wall_thickness,
            wall_height: self.wall_height,
            door_width: self.door_width,
        }
    }

    pub fn obstacle_params(&self) -> ObstacleParams {
        ObstacleParams {
            extent: self.obstacle_extent,
            min_scale: self.min_scale,
            max_scale: self.max_scale,
        }
    }

    pub fn models_dir(&self) -> PathBuf {
        self.output_root.join("models")
    }

    pub fn world_dir(&self) -> PathBuf {
        self.output_root.join("world")
    }

    /// Checks everything a rooms run depends on. Runs before any file I/O.
    pub fn validate_layout(&self) -> Result<()> {
        if self.num_rooms == 0 {
            return Err(invalid("num_rooms must be at least 1"));
        }
        self.layout_params().validate()
    }

    /// Checks everything an obstacles run depends on. Runs before any file I/O.
    pub fn validate_obstacles(&self) -> Result<()> {
        if self.num_obstacles == 0 {
            return Err(invalid("num_obstacles must be at least 1"));
        }
        if self.archetypes.is_empty() {
            return Err(invalid("at least one archetype candidate is required"));
        }
        self.obstacle_params().validate()
    }
}

pub(crate) fn invalid(msg: impl Into<String>) -> GenError {
    GenError::InvalidConfiguration(msg.into())
}
