// src/document/model_files.rs
//! Per-entity model directories: `model.sdf`, `model.config` and, for
//! obstacles, the mesh and material files copied from the asset library.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{io_at, Result};
use crate::map::{Archetype, Entity, Shape};
use crate::utils::util::fmt_num;

/// Receives every generated entity once its geometry is final and persists
/// whatever the simulator needs to load it.
pub trait EntityEmitter {
    fn emit_entity(&mut self, entity: &Entity) -> Result<()>;
}

/// Writes Gazebo model directories under `model_root/<entity name>/`.
#[derive(Debug, Clone)]
pub struct SdfModelWriter {
    model_root: PathBuf,
    asset_root: PathBuf,
}

impl SdfModelWriter {
    pub fn new(model_root: impl Into<PathBuf>, asset_root: impl Into<PathBuf>) -> Self {
        SdfModelWriter {
            model_root: model_root.into(),
            asset_root: asset_root.into(),
        }
    }

    pub fn model_dir(&self, name: &str) -> PathBuf {
        self.model_root.join(name)
    }

    fn copy_assets(&self, archetype: &Archetype, dir: &Path) -> Result<()> {
        let source = self.asset_root.join(&archetype.id);
        copy_dir(&source.join("meshes"), &dir.join("meshes"))?;
        let materials = source.join("materials");
        if materials.is_dir() {
            copy_dir(&materials, &dir.join("materials"))?;
        }
        Ok(())
    }
}

impl EntityEmitter for SdfModelWriter {
    fn emit_entity(&mut self, entity: &Entity) -> Result<()> {
        let dir = self.model_dir(&entity.name);
        let (sdf, description) = match &entity.shape {
            Shape::Box { size } => {
                let meshes = dir.join("meshes");
                fs::create_dir_all(&meshes).map_err(io_at(&meshes))?;
                (wall_model_sdf(&entity.name, size), "Auto-generated wall model")
            }
            Shape::Mesh { archetype, scale } => {
                fs::create_dir_all(&dir).map_err(io_at(&dir))?;
                self.copy_assets(archetype, &dir)?;
                (
                    obstacle_model_sdf(&entity.name, archetype, scale),
                    "Auto-generated model for obstacle",
                )
            }
        };

        let sdf_path = dir.join("model.sdf");
        fs::write(&sdf_path, sdf).map_err(io_at(&sdf_path))?;
        let config_path = dir.join("model.config");
        fs::write(&config_path, model_config(&entity.name, description)).map_err(io_at(&config_path))?;
        debug!("Wrote model {}", dir.display());
        Ok(())
    }
}

fn triple(v: &[f64; 3]) -> String {
    format!("{} {} {}", fmt_num(v[0]), fmt_num(v[1]), fmt_num(v[2]))
}

/// Static box model for a wall. The pose lives in the world file.
pub fn wall_model_sdf(name: &str, size: &[f64; 3]) -> String {
    let geometry = format!("<box>\n            <size>{}</size>\n          </box>", triple(size));
    static_model_sdf(name, &geometry)
}

/// Static mesh model for an obstacle, pointing at the mesh copied into its
/// own model directory.
pub fn obstacle_model_sdf(name: &str, archetype: &Archetype, scale: &[f64; 3]) -> String {
    let geometry = format!(
        "<mesh>\n            <scale>{}</scale>\n            <uri>model://{}/meshes/{}</uri>\n          </mesh>",
        triple(scale),
        name,
        archetype.mesh_file()
    );
    static_model_sdf(name, &geometry)
}

fn static_model_sdf(name: &str, geometry: &str) -> String {
    format!(
        r#"<?xml version="1.0" ?>
<sdf version="1.6">
  <model name="{name}">
    <static>true</static>
    <link name="link">
      <collision name="collision">
        <pose>0 0 0 0 0 0</pose>
        <geometry>
          {geometry}
        </geometry>
      </collision>
      <visual name="visual">
        <pose>0 0 0 0 0 0</pose>
        <geometry>
          {geometry}
        </geometry>
      </visual>
    </link>
  </model>
</sdf>
"#
    )
}

pub fn model_config(name: &str, description: &str) -> String {
    format!(
        r#"<?xml version="1.0" ?>
<model>
  <name>{name}</name>
  <version>1.0</version>
  <sdf version="1.6">model.sdf</sdf>
  <author></author>
  <description>{description}</description>
</model>
"#
    )
}

/// Recursively copies `src` into `dst`, overwriting files that exist.
fn copy_dir(src: &Path, dst: &Path) -> Result<()> {
    fs::create_dir_all(dst).map_err(io_at(dst))?;
    for entry in fs::read_dir(src).map_err(io_at(src))? {
        let entry = entry.map_err(io_at(src))?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if from.is_dir() {
            copy_dir(&from, &to)?;
        } else {
            fs::copy(&from, &to).map_err(io_at(&from))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;
    use crate::map::{MeshFormat, Pose};
    use crate::utils::testing::{scratch_dir, touch};
    use crate::utils::Point2D;

    #[test]
    fn test_wall_model_files() {
        let root = scratch_dir("wall_model");
        let mut writer = SdfModelWriter::new(root.join("models"), root.join("assets"));
        let wall = Entity::wall("room1_wall1", Point2D::new(3.0, 8.0), [0.2, 4.0, 1.0]);
        writer.emit_entity(&wall).unwrap();

        let dir = root.join("models/room1_wall1");
        assert!(dir.join("meshes").is_dir());
        let sdf = fs::read_to_string(dir.join("model.sdf")).unwrap();
        assert!(sdf.contains("<model name=\"room1_wall1\">"));
        assert_eq!(sdf.matches("<size>0.2 4 1</size>").count(), 2);
        let config = fs::read_to_string(dir.join("model.config")).unwrap();
        assert!(config.contains("<name>room1_wall1</name>"));
        assert!(config.contains("Auto-generated wall model"));
    }

    #[test]
    fn test_obstacle_model_copies_assets() {
        let root = scratch_dir("obstacle_model");
        let assets = root.join("assets");
        touch(&assets, "construction_cone/meshes/cone.dae", "<COLLADA/>");
        touch(&assets, "construction_cone/materials/textures/cone.png", "png");

        let mut writer = SdfModelWriter::new(root.join("models"), &assets);
        let archetype = Archetype::new("construction_cone", "cone", MeshFormat::Dae);
        let obstacle = Entity::obstacle("obstacle_4", Pose::at(1.0, 1.0), archetype, [0.5, 1.25, 1.5]);
        writer.emit_entity(&obstacle).unwrap();

        let dir = root.join("models/obstacle_4");
        assert_eq!(fs::read_to_string(dir.join("meshes/cone.dae")).unwrap(), "<COLLADA/>");
        assert!(dir.join("materials/textures/cone.png").is_file());
        let sdf = fs::read_to_string(dir.join("model.sdf")).unwrap();
        assert!(sdf.contains("<scale>0.5 1.25 1.5</scale>"));
        assert!(sdf.contains("<uri>model://obstacle_4/meshes/cone.dae</uri>"));
    }

    #[test]
    fn test_uppercase_mesh_extension_resolves() {
        use crate::generator::{build_archetype_pool, scatter_obstacles, ObstacleParams};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let root = scratch_dir("obstacle_upper_ext");
        let assets = root.join("assets");
        touch(&assets, "construction_cone/meshes/construction_cone.DAE", "<COLLADA/>");

        let mut rng = StdRng::seed_from_u64(3);
        let pool = build_archetype_pool(&assets, &["construction_cone".to_string()], &mut rng).unwrap();
        let obstacles = scatter_obstacles(1, &pool, &ObstacleParams::default(), &mut rng).unwrap();
        let mut writer = SdfModelWriter::new(root.join("models"), &assets);
        writer.emit_entity(&obstacles[0]).unwrap();

        let sdf = fs::read_to_string(root.join("models/obstacle_0/model.sdf")).unwrap();
        let doc = roxmltree::Document::parse(&sdf).unwrap();
        let uri = doc
            .descendants()
            .find(|n| n.has_tag_name("uri"))
            .and_then(|n| n.text())
            .unwrap();
        assert_eq!(uri, "model://obstacle_0/meshes/construction_cone.DAE");
        let target = root.join("models").join(uri.trim_start_matches("model://"));
        assert!(target.is_file());
    }

    #[test]
    fn test_missing_asset_meshes_fail_loudly() {
        let root = scratch_dir("obstacle_missing_assets");
        let mut writer = SdfModelWriter::new(root.join("models"), root.join("assets"));
        let archetype = Archetype::new("arm_part", "arm", MeshFormat::Obj);
        let obstacle = Entity::obstacle("obstacle_0", Pose::default(), archetype, [1.0; 3]);
        let err = writer.emit_entity(&obstacle).unwrap_err();
        assert!(matches!(err, GenError::Io { .. }));
        assert!(!root.join("models/obstacle_0/model.sdf").exists());
    }

    #[test]
    fn test_model_sdf_is_well_formed() {
        let archetype = Archetype::new("cinder_block", "block", MeshFormat::Obj);
        for sdf in [
            wall_model_sdf("outer_top", &[20.0, 0.2, 1.0]),
            obstacle_model_sdf("obstacle_1", &archetype, &[1.0, 1.0, 1.0]),
            model_config("outer_top", "Auto-generated wall model"),
        ] {
            assert!(roxmltree::Document::parse(&sdf).is_ok());
        }
    }
}
