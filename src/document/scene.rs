// src/document/scene.rs

use crate::map::{Entity, EntityKind, Pose};

/// Models every world includes before any generated entity.
pub const AMBIENT_MODELS: [&str; 2] = ["ground_plane", "sun"];

/// What a scene reference stands for. Merging selects on this, not on names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ambient,
    Structure,
    Obstacle,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ambient => "ambient",
            Category::Structure => "structure",
            Category::Obstacle => "obstacle",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "ambient" => Some(Category::Ambient),
            "structure" => Some(Category::Structure),
            "obstacle" => Some(Category::Obstacle),
            _ => None,
        }
    }

    /// Classification for references written without a category tag:
    /// anything whose target mentions "obstacle" (any case) is an obstacle.
    pub fn from_uri(uri: &str) -> Self {
        if uri.to_lowercase().contains("obstacle") {
            Category::Obstacle
        } else {
            Category::Structure
        }
    }
}

impl From<EntityKind> for Category {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Wall => Category::Structure,
            EntityKind::Obstacle => Category::Obstacle,
        }
    }
}

/// One `<include>` of a world.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneReference {
    pub uri: String,
    pub category: Category,
    pub pose: Option<Pose>,
    /// Original markup of a reference read back from a world file. Written
    /// out unchanged when present.
    pub raw: Option<String>,
}

impl SceneReference {
    pub fn ambient(model: &str) -> Self {
        SceneReference {
            uri: model_uri(model),
            category: Category::Ambient,
            pose: None,
            raw: None,
        }
    }

    pub fn from_entity(entity: &Entity) -> Self {
        SceneReference {
            uri: model_uri(&entity.name),
            category: entity.kind.into(),
            pose: Some(entity.pose),
            raw: None,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        self.category == Category::Obstacle
    }

    /// The model name behind a `model://` uri.
    pub fn model_name(&self) -> &str {
        self.uri.strip_prefix("model://").unwrap_or(&self.uri)
    }
}

pub fn model_uri(name: &str) -> String {
    format!("model://{}", name)
}

/// Ordered list of references making up a world.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    references: Vec<SceneReference>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ambient includes followed by one reference per entity, in order.
    pub fn compose<'a, I>(entities: I) -> Self
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        let mut scene = Scene::new();
        for model in AMBIENT_MODELS {
            scene.push(SceneReference::ambient(model));
        }
        scene.extend_entities(entities);
        scene
    }

    pub fn push(&mut self, reference: SceneReference) {
        self.references.push(reference);
    }

    pub fn extend_entities<'a, I>(&mut self, entities: I)
    where
        I: IntoIterator<Item = &'a Entity>,
    {
        self.references
            .extend(entities.into_iter().map(SceneReference::from_entity));
    }

    /// Everything but the obstacles of `base`, then only the obstacles of
    /// `obstacles`. References are carried over as they are.
    pub fn merge(base: &Scene, obstacles: &Scene) -> Scene {
        let references = base
            .references
            .iter()
            .filter(|r| !r.is_obstacle())
            .chain(obstacles.references.iter().filter(|r| r.is_obstacle()))
            .cloned()
            .collect();
        Scene { references }
    }

    pub fn references(&self) -> &[SceneReference] {
        &self.references
    }

    pub fn len(&self) -> usize {
        self.references.len()
    }

    pub fn is_empty(&self) -> bool {
        self.references.is_empty()
    }

    pub fn count(&self, category: Category) -> usize {
        self.references.iter().filter(|r| r.category == category).count()
    }
}
