use kindle_core::Entity;
use rustc_hash::FxHashMap;

use crate::node::NodeHandle;

/// Entity → tree node lookup.
///
/// Only scene-tree-managed entities belong here. A lookup miss means a
/// caller routed a foreign entity through scene APIs, which is a bug.
#[derive(Debug, Default)]
pub struct EntityNodeIndex {
    map: FxHashMap<Entity, NodeHandle>,
}

impl EntityNodeIndex {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// # Panics
    ///
    /// If `entity` is already mapped to a node.
    pub fn insert(&mut self, entity: Entity, node: NodeHandle) {
        let previous = self.map.insert(entity, node);
        assert!(
            previous.is_none(),
            "Entity '{entity}' already in entity to tree node index!"
        );
    }

    /// # Panics
    ///
    /// If `entity` is not in the scene tree.
    #[must_use]
    pub fn lookup(&self, entity: Entity) -> NodeHandle {
        match self.map.get(&entity) {
            Some(&node) => node,
            None => panic!("Doesn't have entity '{entity}' in scene tree!"),
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<NodeHandle> {
        self.map.get(&entity).copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.map.contains_key(&entity)
    }

    /// Every indexed entity, in no particular order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.map.keys().copied()
    }

    /// Drops the mapping. Missing entries are not an error.
    pub fn remove(&mut self, entity: Entity) -> Option<NodeHandle> {
        self.map.remove(&entity)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
