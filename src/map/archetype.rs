// src/map/archetype.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Mesh file formats the simulator can load for an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MeshFormat {
    Dae,
    Obj,
}

impl MeshFormat {
    /// Recognizes a file extension, ignoring case.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "dae" => Some(MeshFormat::Dae),
            "obj" => Some(MeshFormat::Obj),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            MeshFormat::Dae => "dae",
            MeshFormat::Obj => "obj",
        }
    }
}

impl fmt::Display for MeshFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A reusable object found in the asset library: the model directory it
/// lives in and the one mesh we reference from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    pub mesh_name: String,
    pub format: MeshFormat,
    /// Extension as spelled on disk, which may differ in case from `format`.
    pub extension: String,
}

impl Archetype {
    pub fn new(id: impl Into<String>, mesh_name: impl Into<String>, format: MeshFormat) -> Self {
        Archetype {
            id: id.into(),
            mesh_name: mesh_name.into(),
            format,
            extension: format.extension().to_string(),
        }
    }

    /// Builds an archetype from a mesh file, keeping its name exactly as it
    /// is on disk. Returns `None` for files that are not `.dae` or `.obj`.
    pub fn from_mesh_path(id: impl Into<String>, path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;
        let format = MeshFormat::from_extension(extension)?;
        let stem = path.file_stem()?.to_str()?;
        Some(Archetype {
            id: id.into(),
            mesh_name: stem.to_string(),
            format,
            extension: extension.to_string(),
        })
    }

    /// File name of the mesh inside the model's `meshes/` directory.
    pub fn mesh_file(&self) -> String {
        format!("{}.{}", self.mesh_name, self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_case_insensitive() {
        assert_eq!(MeshFormat::from_extension("DAE"), Some(MeshFormat::Dae));
        assert_eq!(MeshFormat::from_extension("Obj"), Some(MeshFormat::Obj));
        assert_eq!(MeshFormat::from_extension("stl"), None);
    }

    #[test]
    fn test_mesh_file() {
        let cone = Archetype::new("construction_cone", "construction_cone", MeshFormat::Dae);
        assert_eq!(cone.mesh_file(), "construction_cone.dae");
    }

    #[test]
    fn test_mesh_file_keeps_disk_spelling() {
        let cone = Archetype::from_mesh_path("construction_cone", Path::new("meshes/Cone.DAE")).unwrap();
        assert_eq!(cone.format, MeshFormat::Dae);
        assert_eq!(cone.mesh_file(), "Cone.DAE");
        assert!(Archetype::from_mesh_path("cinder_block", Path::new("meshes/readme.txt")).is_none());
        assert!(Archetype::from_mesh_path("cinder_block", Path::new("meshes/noext")).is_none());
    }
}
