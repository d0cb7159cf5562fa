//! Stage content
//!
//! Typed, serde-deserializable scene descriptions and the code that turns
//! them into scene-tree nodes.
//!
//! ```json
//! {
//!   "name": "Main",
//!   "type": "Node2D",
//!   "components": [
//!     { "type": "Transform2D", "position": [32.0, 16.0] },
//!     { "type": "Script", "class_path": "src.main", "class_name": "Main" }
//!   ],
//!   "children": [
//!     { "name": "Player", "type": "Sprite",
//!       "components": [{ "type": "Sprite", "texture_path": "assets/player.png" }] }
//!   ]
//! }
//! ```

use glam::Vec2;
use kindle_core::component::{
    AnimatedSpriteComponent, Collider2DComponent, ColorSquareComponent, ScriptComponent,
    SpriteComponent, TextLabelComponent,
};
use kindle_core::{
    AssetCatalog, Component, ComponentKind, Entity, KindleError, NodeComponent, NodeType, Result,
    Transform2D, Transform2DComponent,
};
use serde::Deserialize;

use crate::manager::SceneManager;
use crate::node::NodeHandle;
use crate::services::Services;

/// Authoring parameters of a transform component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Transform2DDef {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f32,
    pub z_index: i32,
    pub z_index_relative_to_parent: bool,
    pub ignore_camera: bool,
}

impl Default for Transform2DDef {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            z_index: 0,
            z_index_relative_to_parent: true,
            ignore_camera: false,
        }
    }
}

impl From<Transform2DDef> for Transform2DComponent {
    fn from(def: Transform2DDef) -> Self {
        Self {
            z_index: def.z_index,
            z_index_relative_to_parent: def.z_index_relative_to_parent,
            ignore_camera: def.ignore_camera,
            ..Self::new(Transform2D {
                position: def.position,
                scale: def.scale,
                rotation: def.rotation,
            })
        }
    }
}

/// One component of a stage node, tagged by kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum ComponentDef {
    Transform2D(Transform2DDef),
    Sprite(SpriteComponent),
    AnimatedSprite(AnimatedSpriteComponent),
    TextLabel(TextLabelComponent),
    Collider2D(Collider2DComponent),
    ColorSquare(ColorSquareComponent),
    Script(ScriptComponent),
}

impl ComponentDef {
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Transform2D(_) => ComponentKind::Transform2D,
            Self::Sprite(_) => ComponentKind::Sprite,
            Self::AnimatedSprite(_) => ComponentKind::AnimatedSprite,
            Self::TextLabel(_) => ComponentKind::TextLabel,
            Self::Collider2D(_) => ComponentKind::Collider2D,
            Self::ColorSquare(_) => ComponentKind::ColorSquare,
            Self::Script(_) => ComponentKind::Script,
        }
    }

    /// Fails with [`KindleError::ContentNotFound`] if a referenced texture or
    /// font is not loaded. Empty references are allowed.
    pub fn check_content(&self, assets: &dyn AssetCatalog) -> Result<()> {
        let missing = |path: &str| KindleError::ContentNotFound {
            kind: self.kind(),
            path: path.to_string(),
        };
        match self {
            Self::Sprite(sprite) => {
                if !sprite.texture_path.is_empty() && !assets.has_texture(&sprite.texture_path) {
                    return Err(missing(&sprite.texture_path));
                }
            }
            Self::AnimatedSprite(animated) => {
                for frame in animated.animations.iter().flat_map(|a| &a.frames) {
                    if !assets.has_texture(&frame.texture_path) {
                        return Err(missing(&frame.texture_path));
                    }
                }
            }
            Self::TextLabel(label) => {
                if !label.font_uid.is_empty() && !assets.has_font(&label.font_uid) {
                    return Err(missing(&label.font_uid));
                }
            }
            Self::Transform2D(_) | Self::Collider2D(_) | Self::ColorSquare(_) | Self::Script(_) => {}
        }
        Ok(())
    }

    #[must_use]
    pub fn into_component(self) -> Component {
        match self {
            Self::Transform2D(def) => Transform2DComponent::from(def).into(),
            Self::Sprite(c) => c.into(),
            Self::AnimatedSprite(c) => c.into(),
            Self::TextLabel(c) => c.into(),
            Self::Collider2D(c) => c.into(),
            Self::ColorSquare(c) => c.into(),
            Self::Script(c) => c.into(),
        }
    }
}

/// A node in a stage description.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StageNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub tags: Vec<String>,
    pub external_node_source: Option<String>,
    pub components: Vec<ComponentDef>,
    pub children: Vec<StageNode>,
}

impl StageNode {
    #[must_use]
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_component(mut self, component: ComponentDef) -> Self {
        self.components.push(component);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: StageNode) -> Self {
        self.children.push(child);
        self
    }

    /// Checks the content references of this node and all descendants.
    pub fn check_content(&self, assets: &dyn AssetCatalog) -> Result<()> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            for component in &node.components {
                component.check_content(assets)?;
            }
            stack.extend(&node.children);
        }
        Ok(())
    }
}

/// Allocates an entity carrying a node component named `name` and the
/// default component of every capability `node_type` inherits.
///
/// The entity is not placed in the scene tree.
pub fn new_node(services: &mut Services<'_>, node_type: NodeType, name: &str) -> Entity {
    let entity = services.entities.allocate();
    services
        .components
        .set(entity, NodeComponent::new(name, node_type).into());
    for kind in node_type.default_components() {
        services.components.set(entity, Component::default_for(kind));
    }
    entity
}

/// Instantiates `nodes` and their descendants into the scene tree.
///
/// Authored components replace the defaults of the node type. With no
/// `parent` each node becomes the active scene root, so more than one
/// top-level node panics. Children are queued for creation before their
/// parents. Content references are all checked up front; on error nothing
/// is created.
pub fn instantiate_stage_nodes(
    scene: &mut SceneManager,
    services: &mut Services<'_>,
    parent: Option<NodeHandle>,
    nodes: &[StageNode],
) -> Result<Vec<Entity>> {
    for node in nodes {
        if let Err(err) = node.check_content(services.assets) {
            log::error!("Cannot instantiate stage node '{}': {err}", node.name);
            return Err(err);
        }
    }

    Ok(nodes
        .iter()
        .map(|node| instantiate_node(scene, services, parent, node))
        .collect())
}

fn instantiate_node(
    scene: &mut SceneManager,
    services: &mut Services<'_>,
    parent: Option<NodeHandle>,
    stage: &StageNode,
) -> Entity {
    let entity = services.entities.allocate();
    let handle = scene.create_node(entity, parent);
    match parent {
        Some(parent) => scene.attach(parent, handle),
        None => scene.set_active_scene_root(handle),
    }

    let mut node = NodeComponent::new(stage.name.as_str(), stage.node_type);
    node.tags.clone_from(&stage.tags);
    node.external_node_source.clone_from(&stage.external_node_source);
    services.components.set(entity, node.into());
    for kind in stage.node_type.default_components() {
        services.components.set(entity, Component::default_for(kind));
    }
    for def in &stage.components {
        services.components.set(entity, def.clone().into_component());
    }
    services.systems.update_entity_system_membership(entity);

    for child in &stage.children {
        instantiate_node(scene, services, Some(handle), child);
    }

    scene.queue_for_creation(handle);
    entity
}
