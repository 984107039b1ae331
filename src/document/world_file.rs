// src/document/world_file.rs
//! Reading and writing SDF world files.
//!
//! Written worlds tag every `<include>` with an `arena:category` attribute so
//! a later merge can tell obstacles from structure without looking at names.
//! Worlds from other tools lack the tag; their includes are classified by uri.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use log::info;

use crate::document::scene::{Category, Scene, SceneReference};
use crate::error::{io_at, GenError, Result};
use crate::map::Pose;

/// Namespace of the category attribute.
pub const ARENA_NS: &str = "https://github.com/ericsonwillians/arena_forge";
pub const ARENA_PREFIX: &str = "arena";

const SDF_VERSION: &str = "1.6";

/// Renders `scene` as a complete SDF world document.
pub fn render_world(scene: &Scene) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" ?>\n");
    out.push_str(&format!(
        "<sdf version=\"{}\" xmlns:{}=\"{}\">\n",
        SDF_VERSION, ARENA_PREFIX, ARENA_NS
    ));
    out.push_str("  <world name=\"default\">\n");
    for reference in scene.references() {
        match &reference.raw {
            Some(raw) => {
                out.push_str("    ");
                out.push_str(raw);
                out.push('\n');
            }
            None => render_include(&mut out, reference),
        }
    }
    out.push_str("  </world>\n</sdf>\n");
    out
}

fn render_include(out: &mut String, reference: &SceneReference) {
    out.push_str(&format!(
        "    <include {}:category=\"{}\">\n",
        ARENA_PREFIX,
        reference.category.as_str()
    ));
    out.push_str(&format!("      <uri>{}</uri>\n", escape_text(&reference.uri)));
    if let Some(pose) = &reference.pose {
        out.push_str(&format!("      <pose>{}</pose>\n", pose.to_sdf()));
    }
    out.push_str("    </include>\n");
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;")
}

/// Writes `scene` to `path`, creating parent directories as needed.
pub fn write_scene(scene: &Scene, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_at(parent))?;
    }
    fs::write(path, render_world(scene)).map_err(io_at(path))?;
    info!("Wrote {} references to {}", scene.len(), path.display());
    Ok(())
}

/// Reads the top-level includes of a world file.
pub fn read_scene(path: &Path) -> Result<Scene> {
    let text = fs::read_to_string(path).map_err(io_at(path))?;
    parse_scene(&text, path)
}

/// Parses world markup. `origin` is only used in error messages.
///
/// The `<world>` element is looked up directly under the document root, or
/// is the root itself. Includes without a `<uri>` are ignored.
pub fn parse_scene(text: &str, origin: &Path) -> Result<Scene> {
    let doc = roxmltree::Document::parse(text).map_err(|source| GenError::MalformedScene {
        path: origin.to_path_buf(),
        source,
    })?;

    let root = doc.root_element();
    let world = if root.has_tag_name("world") {
        Some(root)
    } else {
        root.children().find(|n| n.has_tag_name("world"))
    };
    let world = world.ok_or_else(|| GenError::MissingWorldElement {
        path: origin.to_path_buf(),
    })?;

    let mut scene = Scene::new();
    for include in world.children().filter(|n| n.has_tag_name("include")) {
        let uri = match child_text(include, "uri") {
            Some(uri) => uri,
            None => continue,
        };
        let category = include
            .attribute((ARENA_NS, "category"))
            .and_then(Category::parse)
            .unwrap_or_else(|| Category::from_uri(uri));
        scene.push(SceneReference {
            uri: uri.to_string(),
            category,
            pose: child_text(include, "pose").and_then(parse_pose),
            raw: Some(detached_markup(text, include)),
        });
    }
    Ok(scene)
}

/// Copies an include's markup, declaring on it every inherited namespace its
/// subtree refers to, so the copy stays well formed in any other document.
fn detached_markup(text: &str, include: roxmltree::Node) -> String {
    let raw = &text[include.range()];
    let head_len = include
        .first_child()
        .map_or(raw.len(), |child| child.range().start - include.range().start);
    let head = &raw[..head_len];

    let used: HashSet<&str> = include
        .descendants()
        .filter(|n| n.is_element())
        .flat_map(|n| {
            n.tag_name()
                .namespace()
                .into_iter()
                .chain(n.attributes().filter_map(|a| a.namespace()))
        })
        .collect();

    let mut declarations = String::new();
    if let Some(parent) = include.parent_element() {
        for ns in parent.namespaces() {
            if ns.name() == Some("xml") || !used.contains(ns.uri()) {
                continue;
            }
            // Declared on the root of every rendered world.
            if ns.name() == Some(ARENA_PREFIX) && ns.uri() == ARENA_NS {
                continue;
            }
            let attr = match ns.name() {
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            };
            if declares(head, &attr) {
                continue;
            }
            declarations.push_str(&format!(" {}=\"{}\"", attr, escape_attr(ns.uri())));
        }
    }
    if declarations.is_empty() {
        return raw.to_string();
    }

    let name_end = raw
        .char_indices()
        .skip(1)
        .find(|&(_, c)| c.is_whitespace() || c == '>' || c == '/')
        .map_or(raw.len(), |(i, _)| i);
    format!("{}{}{}", &raw[..name_end], declarations, &raw[name_end..])
}

/// Whether a start tag already carries the attribute `attr`.
fn declares(head: &str, attr: &str) -> bool {
    head.match_indices(attr).any(|(i, _)| {
        head[..i].ends_with(char::is_whitespace) && head[i + attr.len()..].trim_start().starts_with('=')
    })
}

fn child_text<'a>(node: roxmltree::Node<'a, '_>, tag: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(tag))
        .and_then(|n| n.text())
        .map(str::trim)
}

/// Accepts `x y z` or `x y z roll pitch yaw`.
fn parse_pose(text: &str) -> Option<Pose> {
    let values = text
        .split_whitespace()
        .map(|v| v.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    match values.as_slice() {
        [x, y, z] => Some(Pose {
            x: *x,
            y: *y,
            z: *z,
            ..Default::default()
        }),
        [x, y, z, roll, pitch, yaw] => Some(Pose {
            x: *x,
            y: *y,
            z: *z,
            roll: *roll,
            pitch: *pitch,
            yaw: *yaw,
        }),
        _ => None,
    }
}

/// Reads a base world and an obstacle world, merges them and writes the
/// result to `output`.
pub fn merge_scene_files(base: &Path, obstacles: &Path, output: &Path) -> Result<Scene> {
    let base_scene = read_scene(base)?;
    let obstacle_scene = read_scene(obstacles)?;
    let merged = Scene::merge(&base_scene, &obstacle_scene);
    info!(
        "Merging {} structure references from {} with {} obstacles from {}",
        merged.len() - merged.count(Category::Obstacle),
        base.display(),
        merged.count(Category::Obstacle),
        obstacles.display()
    );
    write_scene(&merged, output)?;
    Ok(merged)
}
