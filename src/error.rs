// src/error.rs

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can abort a generation or merge run.
#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no valid archetypes with .dae or .obj meshes found{}", under(.asset_root))]
    NoValidArchetypes { asset_root: Option<PathBuf> },

    #[error("no <world> element found in {}", .path.display())]
    MissingWorldElement { path: PathBuf },

    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed scene {}: {source}", .path.display())]
    MalformedScene {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    #[error("failed to decode configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GenError>;

fn under(root: &Option<PathBuf>) -> String {
    match root {
        Some(root) => format!(" under {}", root.display()),
        None => String::new(),
    }
}

/// Wraps an `io::Error` with the path it happened on, for use with `map_err`.
pub(crate) fn io_at(path: &Path) -> impl FnOnce(io::Error) -> GenError + '_ {
    move |source| GenError::Io {
        path: path.to_path_buf(),
        source,
    }
}
