// src/document/manifest.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{io_at, Result};
use crate::map::Entity;

/// JSON record of a generated layout, written next to its world file so the
/// wall bounds can be reasoned about without re-parsing SDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutManifest {
    pub seed: Option<u64>,
    pub grid_limit: i32,
    pub entities: Vec<Entity>,
}

impl LayoutManifest {
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_at(parent))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(io_at(path))
    }

    #[cfg(test)]
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(io_at(path))?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Archetype, MeshFormat, Pose};
    use crate::utils::testing::scratch_dir;
    use crate::utils::Point2D;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_manifest_on_disk() {
        let dir = scratch_dir("manifest");
        let path = dir.join("world/room_world.layout.json");
        let manifest = LayoutManifest {
            seed: Some(42),
            grid_limit: 10,
            entities: vec![
                Entity::wall("outer_left", Point2D::new(-10.1, 0.0), [0.2, 20.0, 1.0]),
                Entity::obstacle(
                    "obstacle_0",
                    Pose::at(1.0, 2.0).with_yaw(1.571),
                    Archetype::new("cinder_block", "block", MeshFormat::Obj),
                    [0.75, 1.0, 1.25],
                ),
            ],
        };
        manifest.write(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"kind\": \"wall\""));
        assert!(text.contains("\"type\": \"mesh\""));
        assert!(text.contains("\"min_x\""));
        let back = LayoutManifest::read(&path).unwrap();
        assert_eq!(back.seed, Some(42));
        assert_eq!(back.entities.len(), 2);
        assert_eq!(back.entities[0].name, "outer_left");
        assert_eq!(back.entities[1].kind, manifest.entities[1].kind);
        assert_approx_eq!(back.entities[0].bounds.unwrap().max_x, -10.0);
        assert!(back.entities[1].bounds.is_none());
    }
}
