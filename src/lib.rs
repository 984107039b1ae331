// src/lib.rs

pub mod document;
pub mod error;
pub mod generator;
pub mod map;
pub mod utils;

pub use error::{GenError, Result};
