// src/document/mod.rs
pub mod manifest;
pub mod model_files;
pub mod scene;
pub mod world_file;

// Re-export what the generator and the binary need.
pub use self::manifest::LayoutManifest;
pub use self::model_files::{EntityEmitter, SdfModelWriter};
pub use self::scene::{Category, Scene, SceneReference};
pub use self::world_file::{merge_scene_files, read_scene, write_scene};
