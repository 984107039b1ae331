#![warn(non_snake_case)]
//! # arena_forge Main Entry Point
//!
//! Generates Gazebo arenas: a walled square with door-gapped rooms, a set of
//! scattered obstacles, and the merge of the two into one world.
//!
//! Usage:
//!   arena_forge <rooms|obstacles|merge|all> [--config FILE] [--seed N]
//!               [--rooms N] [--obstacles N] [--out DIR] [--assets DIR]
//!
//! Logging goes through env_logger; set `RUST_LOG=debug` to see every wall
//! and obstacle as it is placed.
//!
//! ## License
//! Licensed under the MIT License.

use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};

use arena_forge::generator::{run, GeneratorConfig, RunMode};
use arena_forge::GenError;
use log::{error, info};

const USAGE: &str = "Usage: arena_forge <rooms|obstacles|merge|all> [--config FILE] [--seed N] \
                     [--rooms N] [--obstacles N] [--out DIR] [--assets DIR]";

fn parse_number<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, GenError> {
    value
        .and_then(|v| v.parse().ok())
        .ok_or_else(|| GenError::InvalidConfiguration(format!("{} expects a number", flag)))
}

fn parse_path(flag: &str, value: Option<&String>) -> Result<PathBuf, GenError> {
    value
        .map(PathBuf::from)
        .ok_or_else(|| GenError::InvalidConfiguration(format!("{} expects a path", flag)))
}

/// Mode first, then flags. `--config` is applied before the other flags so
/// they can override single values from the file.
fn parse_args(args: &[String]) -> Result<(RunMode, GeneratorConfig), GenError> {
    let mode: RunMode = args
        .get(1)
        .ok_or_else(|| GenError::InvalidConfiguration("missing run mode".into()))?
        .parse()?;

    let mut config = match args.iter().position(|a| a == "--config") {
        Some(i) => GeneratorConfig::from_json_file(Path::new(args.get(i + 1).map(String::as_str).unwrap_or("")))?,
        None => GeneratorConfig::default(),
    };

    let mut i = 2;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--config" => {}
            "--seed" => config.seed = Some(parse_number("--seed", value)?),
            "--rooms" => config.num_rooms = parse_number("--rooms", value)?,
            "--obstacles" => config.num_obstacles = parse_number("--obstacles", value)?,
            "--out" => config.output_root = parse_path("--out", value)?,
            "--assets" => config.asset_root = parse_path("--assets", value)?,
            other => {
                return Err(GenError::InvalidConfiguration(format!("unknown argument '{}'", other)));
            }
        }
        i += 2;
    }
    Ok((mode, config))
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let (mode, config) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", USAGE);
            return Err(e.into());
        }
    };

    info!("arena_forge {} run starting...", mode);
    match run(mode, &config) {
        Ok(report) => {
            for world in &report.worlds {
                info!("World written: {}", world.display());
            }
            if let Some(seed) = report.seed {
                info!("Replay with --seed {}", seed);
            }
            Ok(())
        }
        Err(e) => {
            error!("{} run failed: {}", mode, e);
            if !matches!(e, GenError::InvalidConfiguration(_)) {
                error!(
                    "Output under {} may be incomplete; it does not describe a usable world.",
                    config.output_root.display()
                );
            }
            Err(e.into())
        }
    }
}
