use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::ComponentKind;
use crate::errors::KindleError;

bitflags! {
    /// Capabilities a node type inherits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct NodeInheritance: u32 {
        const NODE            = 1 << 0;
        const NODE2D          = 1 << 1;
        const SPRITE          = 1 << 2;
        const ANIMATED_SPRITE = 1 << 3;
        const TEXT_LABEL      = 1 << 4;
        const COLLIDER2D      = 1 << 5;
        const COLOR_SQUARE    = 1 << 6;
    }
}

/// Base type of a scene node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NodeType {
    #[default]
    Node,
    Node2D,
    Sprite,
    AnimatedSprite,
    TextLabel,
    Collider2D,
    ColorSquare,
}

impl NodeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Node => "Node",
            Self::Node2D => "Node2D",
            Self::Sprite => "Sprite",
            Self::AnimatedSprite => "AnimatedSprite",
            Self::TextLabel => "TextLabel",
            Self::Collider2D => "Collider2D",
            Self::ColorSquare => "ColorSquare",
        }
    }

    /// Every capability this type carries, including those of its ancestors.
    #[must_use]
    pub const fn inheritance(self) -> NodeInheritance {
        let base = NodeInheritance::NODE;
        let node2d = base.union(NodeInheritance::NODE2D);
        match self {
            Self::Node => base,
            Self::Node2D => node2d,
            Self::Sprite => node2d.union(NodeInheritance::SPRITE),
            Self::AnimatedSprite => node2d.union(NodeInheritance::ANIMATED_SPRITE),
            Self::TextLabel => node2d.union(NodeInheritance::TEXT_LABEL),
            Self::Collider2D => node2d.union(NodeInheritance::COLLIDER2D),
            Self::ColorSquare => node2d.union(NodeInheritance::COLOR_SQUARE),
        }
    }

    /// Component kinds attached by default when a node of this type is created,
    /// besides the node component itself.
    pub fn default_components(self) -> impl Iterator<Item = ComponentKind> {
        const TABLE: [(NodeInheritance, ComponentKind); 6] = [
            (NodeInheritance::NODE2D, ComponentKind::Transform2D),
            (NodeInheritance::SPRITE, ComponentKind::Sprite),
            (NodeInheritance::ANIMATED_SPRITE, ComponentKind::AnimatedSprite),
            (NodeInheritance::TEXT_LABEL, ComponentKind::TextLabel),
            (NodeInheritance::COLLIDER2D, ComponentKind::Collider2D),
            (NodeInheritance::COLOR_SQUARE, ComponentKind::ColorSquare),
        ];
        let inheritance = self.inheritance();
        TABLE
            .into_iter()
            .filter(move |(flag, _)| inheritance.contains(*flag))
            .map(|(_, kind)| kind)
    }
}

impl FromStr for NodeType {
    type Err = KindleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Node" => Ok(Self::Node),
            "Node2D" => Ok(Self::Node2D),
            "Sprite" => Ok(Self::Sprite),
            "AnimatedSprite" => Ok(Self::AnimatedSprite),
            "TextLabel" => Ok(Self::TextLabel),
            "Collider2D" => Ok(Self::Collider2D),
            "ColorSquare" => Ok(Self::ColorSquare),
            other => Err(KindleError::UnknownNodeType(other.to_string())),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-bearing identity attached to every scene node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeComponent {
    pub name: String,
    pub node_type: NodeType,
    pub tags: Vec<String>,
    /// Scene file this node was authored to be loaded from; recorded, not loaded.
    pub external_node_source: Option<String>,
}

impl NodeComponent {
    #[must_use]
    pub fn new(name: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            name: name.into(),
            node_type,
            tags: Vec::new(),
            external_node_source: None,
        }
    }
}
