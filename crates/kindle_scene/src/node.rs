use kindle_core::Entity;
use slotmap::new_key_type;

new_key_type! {
    /// Generational handle to a [`SceneTreeNode`] in the node arena.
    pub struct NodeHandle;
}

/// A scene tree node.
///
/// Only hierarchy data lives here. Everything else about the entity is
/// reached through the component store.
///
/// # Hierarchy
///
/// - `parent`: handle to the parent node (`None` for the scene root, and for
///   nodes not yet linked)
/// - `children`: child handles in insertion order
#[derive(Debug, Clone)]
pub struct SceneTreeNode {
    pub(crate) entity: Entity,
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
}

impl SceneTreeNode {
    #[must_use]
    pub(crate) fn new(entity: Entity, parent: Option<NodeHandle>) -> Self {
        Self {
            entity,
            parent,
            children: Vec::new(),
        }
    }

    /// Entity this node represents.
    #[inline]
    #[must_use]
    pub fn entity(&self) -> Entity {
        self.entity
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}
