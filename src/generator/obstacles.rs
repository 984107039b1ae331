// src/generator/obstacles.rs

use std::f64::consts::TAU;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::error::{io_at, GenError, Result};
use crate::generator::config::invalid;
use crate::map::{Archetype, Entity, Pose};
use crate::utils::util::round_to;

/// Sampling ranges for obstacle pose and scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleParams {
    /// x and y are drawn from `[-extent, extent]`.
    pub extent: f64,
    pub min_scale: f64,
    pub max_scale: f64,
}

impl Default for ObstacleParams {
    fn default() -> Self {
        ObstacleParams {
            extent: 8.0,
            min_scale: 0.5,
            max_scale: 1.5,
        }
    }
}

impl ObstacleParams {
    pub fn validate(&self) -> Result<()> {
        // The sampled range spans 2 * extent, which must stay finite.
        if !(self.extent > 0.0) || !(2.0 * self.extent).is_finite() {
            return Err(invalid("obstacle_extent must be a positive number"));
        }
        if !(self.min_scale > 0.0) || !(self.min_scale <= self.max_scale) || !self.max_scale.is_finite() {
            return Err(invalid(format!(
                "scale range [{}, {}] is empty or not positive",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}

/// Looks up every candidate under `asset_root` (in shuffled order) and keeps
/// those whose `meshes/` directory holds a `.dae` or `.obj` file. Only the
/// first mesh by file name is used per archetype.
pub fn build_archetype_pool<R: Rng>(
    asset_root: &Path,
    candidates: &[String],
    rng: &mut R,
) -> Result<Vec<Archetype>> {
    let mut order: Vec<&String> = candidates.iter().collect();
    order.shuffle(rng);

    let mut pool = Vec::new();
    for id in order {
        let meshes = asset_root.join(id).join("meshes");
        if !meshes.is_dir() {
            warn!("Skipping archetype '{}': no meshes directory at {}", id, meshes.display());
            continue;
        }
        match first_mesh(id, &meshes)? {
            Some(archetype) => pool.push(archetype),
            None => warn!("Skipping archetype '{}': no .dae or .obj file in {}", id, meshes.display()),
        }
    }

    if pool.is_empty() {
        return Err(GenError::NoValidArchetypes {
            asset_root: Some(asset_root.to_path_buf()),
        });
    }
    info!(
        "Archetype pool: {}",
        pool.iter().map(|a| a.id.as_str()).collect::<Vec<_>>().join(", ")
    );
    Ok(pool)
}

fn first_mesh(id: &str, dir: &Path) -> Result<Option<Archetype>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_at(dir))? {
        let path = entry.map_err(io_at(dir))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    Ok(files.iter().find_map(|path| Archetype::from_mesh_path(id, path)))
}

/// Places `count` obstacles named `obstacle_0..`, drawing archetypes from
/// `pool` with replacement. Nothing stops obstacles from overlapping each
/// other or the walls.
pub fn scatter_obstacles<R: Rng>(
    count: usize,
    pool: &[Archetype],
    params: &ObstacleParams,
    rng: &mut R,
) -> Result<Vec<Entity>> {
    params.validate()?;
    let picks = (0..count)
        .map(|_| pool.choose(rng))
        .collect::<Option<Vec<_>>>()
        .ok_or(GenError::NoValidArchetypes { asset_root: None })?;

    let obstacles = picks
        .into_iter()
        .enumerate()
        .map(|(i, archetype)| {
            let name = format!("obstacle_{}", i);
            let scale = sample_scale(params, rng);
            let pose = sample_pose(params, rng);
            debug!("Creating obstacle {} from model '{}'", name, archetype.id);
            Entity::obstacle(name, pose, archetype.clone(), scale)
        })
        .collect();
    Ok(obstacles)
}

fn sample_scale<R: Rng>(params: &ObstacleParams, rng: &mut R) -> [f64; 3] {
    let mut axis = || round_to(rng.random_range(params.min_scale..=params.max_scale), 2);
    [axis(), axis(), axis()]
}

fn sample_pose<R: Rng>(params: &ObstacleParams, rng: &mut R) -> Pose {
    let x = round_to(rng.random_range(-params.extent..=params.extent), 2);
    let y = round_to(rng.random_range(-params.extent..=params.extent), 2);
    let yaw = round_to(rng.random_range(0.0..TAU), 3);
    Pose::at(x, y).with_yaw(yaw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MeshFormat;
    use crate::utils::testing::{scratch_dir, touch};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn candidates() -> Vec<String> {
        ["construction_cone", "cinder_block", "arm_part", "empty_model"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn asset_library(tag: &str) -> std::path::PathBuf {
        let root = scratch_dir(tag);
        touch(&root, "construction_cone/meshes/construction_cone.DAE", "<COLLADA/>");
        touch(&root, "construction_cone/materials/textures/cone.png", "png");
        touch(&root, "cinder_block/meshes/readme.txt", "not a mesh");
        touch(&root, "cinder_block/meshes/z_block.obj", "o z");
        touch(&root, "cinder_block/meshes/block.obj", "o block");
        fs::create_dir_all(root.join("empty_model/meshes")).unwrap();
        root
    }

    fn cone() -> Archetype {
        Archetype::new("cone", "mesh_a", MeshFormat::Obj)
    }

    #[test]
    fn test_pool_keeps_only_models_with_meshes() {
        let root = asset_library("pool_filter");
        let mut rng = StdRng::seed_from_u64(1);
        let pool = build_archetype_pool(&root, &candidates(), &mut rng).unwrap();
        let found: HashSet<Archetype> = pool.into_iter().collect();
        let mut cone = Archetype::new("construction_cone", "construction_cone", MeshFormat::Dae);
        cone.extension = "DAE".to_string();
        let expected: HashSet<Archetype> = [
            cone,
            Archetype::new("cinder_block", "block", MeshFormat::Obj),
        ]
        .into_iter()
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_pool_is_idempotent() {
        let root = asset_library("pool_idempotent");
        let sets: Vec<HashSet<Archetype>> = (0..5)
            .map(|seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                build_archetype_pool(&root, &candidates(), &mut rng)
                    .unwrap()
                    .into_iter()
                    .collect()
            })
            .collect();
        assert!(sets.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_empty_library_is_fatal() {
        let root = scratch_dir("pool_empty");
        let mut rng = StdRng::seed_from_u64(1);
        let err = build_archetype_pool(&root, &candidates(), &mut rng).unwrap_err();
        assert!(matches!(err, GenError::NoValidArchetypes { asset_root: Some(_) }));
    }

    #[test]
    fn test_scatter_seed_7() {
        let mut rng = StdRng::seed_from_u64(7);
        let obstacles = scatter_obstacles(25, &[cone()], &ObstacleParams::default(), &mut rng).unwrap();
        assert_eq!(obstacles.len(), 25);
        for (i, obstacle) in obstacles.iter().enumerate() {
            assert_eq!(obstacle.name, format!("obstacle_{}", i));
            assert_eq!(obstacle.mesh().unwrap().0.id, "cone");
            assert!(obstacle.bounds.is_none());
        }
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let pool = [cone(), Archetype::new("block", "b", MeshFormat::Dae)];
        let obstacles = scatter_obstacles(500, &pool, &ObstacleParams::default(), &mut rng).unwrap();
        for obstacle in &obstacles {
            let (_, scale) = obstacle.mesh().unwrap();
            for s in scale {
                assert!((0.5..=1.5).contains(&s));
                assert!(((s * 100.0).round() - s * 100.0).abs() < 1e-6);
            }
            let pose = obstacle.pose;
            assert!((-8.0..=8.0).contains(&pose.x));
            assert!((-8.0..=8.0).contains(&pose.y));
            assert!(pose.yaw >= 0.0 && pose.yaw < TAU);
            assert_eq!((pose.z, pose.roll, pose.pitch), (0.0, 0.0, 0.0));
        }
        let kinds: HashSet<&str> = obstacles.iter().map(|o| o.mesh().unwrap().0.id.as_str()).collect();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_scatter_needs_a_pool() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = scatter_obstacles(3, &[], &ObstacleParams::default(), &mut rng).unwrap_err();
        assert!(matches!(err, GenError::NoValidArchetypes { asset_root: None }));
        assert!(scatter_obstacles(0, &[], &ObstacleParams::default(), &mut rng)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_extent_must_leave_a_finite_range() {
        let mut rng = StdRng::seed_from_u64(0);
        for extent in [1e308, f64::MAX, f64::INFINITY, 0.0, -1.0] {
            let params = ObstacleParams {
                extent,
                ..Default::default()
            };
            assert!(matches!(
                scatter_obstacles(1, &[cone()], &params, &mut rng),
                Err(GenError::InvalidConfiguration(_))
            ));
        }
        let wide = ObstacleParams {
            extent: 1e300,
            ..Default::default()
        };
        assert_eq!(scatter_obstacles(3, &[cone()], &wide, &mut rng).unwrap().len(), 3);
    }

    #[test]
    fn test_inverted_scale_range_rejected() {
        let params = ObstacleParams {
            min_scale: 2.0,
            max_scale: 1.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            scatter_obstacles(1, &[cone()], &params, &mut rng),
            Err(GenError::InvalidConfiguration(_))
        ));
    }
}
