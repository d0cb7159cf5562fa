//! Scene Manager
//!
//! Owns the node arena, the entity→node index, the creation and deletion
//! queues and the active/queued scene pair.
//!
//! # Frame protocol
//!
//! Creation and deletion requests may arrive at any point in a frame,
//! including from scene scripts that are themselves running inside a scene
//! change. Flushes and scene-change application only happen at the frame
//! boundary ([`SceneManager::process_frame_boundary`]) and never nest; the
//! [`FramePhase`] guard turns a nested call into a panic.

use kindle_core::{ComponentStore, Entity, Result, SystemHooks};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::index::EntityNodeIndex;
use crate::node::{NodeHandle, SceneTreeNode};
use crate::queue::{CreationQueue, DeletionQueue};
use crate::scene::Scene;
use crate::services::{SceneScriptRunner, Services};
use crate::settings::SceneSettings;
use crate::tree::NodeArena;

/// Entities of an ancestor walk, the starting entity first.
pub type AncestorChain = SmallVec<[Entity; 16]>;

/// Frame-boundary work currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    #[default]
    Idle,
    ApplyingSceneChange,
    FlushingDeletions,
    FlushingCreations,
}

#[derive(Debug)]
pub struct SceneManager {
    settings: SceneSettings,
    tree: NodeArena,
    index: EntityNodeIndex,
    creation_queue: CreationQueue,
    deletion_queue: DeletionQueue,
    active_scene: Option<Scene>,
    queued_scene: Option<Scene>,
    phase: FramePhase,
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneManager {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(SceneSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: SceneSettings) -> Self {
        Self {
            settings,
            tree: NodeArena::with_capacity(settings.index_capacity),
            index: EntityNodeIndex::with_capacity(settings.index_capacity),
            creation_queue: CreationQueue::new(settings.max_entities),
            deletion_queue: DeletionQueue::new(settings.max_entities),
            active_scene: None,
            queued_scene: None,
            phase: FramePhase::Idle,
        }
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &SceneSettings {
        &self.settings
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    fn begin_phase(&mut self, phase: FramePhase) {
        assert!(
            self.phase == FramePhase::Idle,
            "Cannot start {phase:?} while {:?} is in progress",
            self.phase
        );
        self.phase = phase;
    }

    // ========================================================================
    // Tree nodes
    // ========================================================================

    /// Allocates a tree node for `entity`. See [`NodeArena::create_node`].
    pub fn create_node(&mut self, entity: Entity, parent: Option<NodeHandle>) -> NodeHandle {
        self.tree.create_node(entity, parent)
    }

    /// Links `child` under `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, parent: NodeHandle, child: NodeHandle) {
        self.tree.attach(parent, child);
    }

    #[inline]
    #[must_use]
    pub fn node(&self, handle: NodeHandle) -> Option<&SceneTreeNode> {
        self.tree.get(handle)
    }

    #[inline]
    #[must_use]
    pub fn tree(&self) -> &NodeArena {
        &self.tree
    }

    /// Tree node of a scene-managed entity.
    ///
    /// # Panics
    ///
    /// If `entity` is not in the scene tree.
    #[must_use]
    pub fn tree_node(&self, entity: Entity) -> NodeHandle {
        self.index.lookup(entity)
    }

    #[inline]
    #[must_use]
    pub fn contains_entity(&self, entity: Entity) -> bool {
        self.index.contains(entity)
    }

    /// Number of indexed (scene-managed) entities.
    #[inline]
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.index.len()
    }

    #[inline]
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    fn entity_of(&self, handle: NodeHandle) -> Entity {
        match self.tree.get(handle) {
            Some(node) => node.entity,
            None => panic!("Scene tree node {handle:?} no longer exists"),
        }
    }

    // ========================================================================
    // Structural queries
    // ========================================================================

    /// Parent entity, or `None` for a root or unlinked node.
    #[must_use]
    pub fn parent_of(&self, entity: Entity) -> Option<Entity> {
        let node = self.tree.get(self.index.lookup(entity))?;
        node.parent
            .and_then(|p| self.tree.get(p))
            .map(SceneTreeNode::entity)
    }

    /// Child entities in insertion order.
    #[must_use]
    pub fn children_of(&self, entity: Entity) -> Vec<Entity> {
        self.tree
            .get(self.index.lookup(entity))
            .map(|node| {
                node.children
                    .iter()
                    .filter_map(|&c| self.tree.get(c))
                    .map(SceneTreeNode::entity)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First child of `parent` whose node component is named `name`.
    ///
    /// A miss is logged and returns `None`.
    #[must_use]
    pub fn get_entity_child_by_name(
        &self,
        parent: Entity,
        name: &str,
        components: &dyn ComponentStore,
    ) -> Option<Entity> {
        let found = self.children_of(parent).into_iter().find(|&child| {
            components
                .node(child)
                .is_some_and(|node| node.name == name)
        });
        if found.is_none() {
            log::warn!("No child named '{name}' under entity '{parent}'");
        }
        found
    }

    /// `entity` followed by each ancestor up to the root.
    #[must_use]
    pub fn ancestor_chain(&self, entity: Entity) -> AncestorChain {
        let mut chain = AncestorChain::new();
        chain.push(entity);

        let mut current = self.tree.get(self.index.lookup(entity)).and_then(|n| n.parent);
        while let Some(handle) = current {
            let Some(node) = self.tree.get(handle) else {
                break;
            };
            chain.push(node.entity);
            current = node.parent;
        }
        chain
    }

    /// Entities of the subtree rooted at `entity`, children before parents.
    #[must_use]
    pub fn subtree_entities(&self, entity: Entity) -> Vec<Entity> {
        self.tree
            .subtree_post_order(self.index.lookup(entity))
            .into_iter()
            .filter_map(|h| self.tree.get(h))
            .map(SceneTreeNode::entity)
            .collect()
    }

    /// Creates a node for `child` under `parent`'s node, refreshes its
    /// system membership and queues it for creation.
    pub fn add_child(
        &mut self,
        parent: Entity,
        child: Entity,
        systems: &mut dyn SystemHooks,
    ) -> NodeHandle {
        let parent_node = self.index.lookup(parent);
        let node = self.tree.create_node(child, Some(parent_node));
        self.tree.attach(parent_node, node);
        systems.update_entity_system_membership(child);
        self.queue_for_creation(node);
        node
    }

    /// Moves `entity` under `new_parent`, appended last. Every transform in
    /// the moved subtree is marked dirty.
    ///
    /// # Panics
    ///
    /// If `new_parent` is `entity` or one of its descendants, or `entity`
    /// is the active scene root.
    pub fn reparent(
        &mut self,
        entity: Entity,
        new_parent: Entity,
        components: &mut dyn ComponentStore,
    ) {
        let node = self.index.lookup(entity);
        let parent_node = self.index.lookup(new_parent);
        assert!(
            !self.tree.is_ancestor_or_self(node, parent_node),
            "Cannot reparent entity '{entity}' under itself or its descendant '{new_parent}'"
        );
        assert!(
            self.active_root() != Some(node),
            "Cannot reparent the active scene root '{entity}'"
        );

        self.tree.attach(parent_node, node);
        for moved in self.subtree_entities(entity) {
            if let Some(transform) = components.transform_2d_mut(moved) {
                transform.mark_dirty();
            }
        }
    }

    // ========================================================================
    // Creation / deletion queues
    // ========================================================================

    /// Queues the node's entity for creation and indexes it immediately.
    ///
    /// # Panics
    ///
    /// If the node is stale, or its entity is already indexed.
    pub fn queue_for_creation(&mut self, node: NodeHandle) {
        let entity = self.entity_of(node);
        self.index.insert(entity, node);
        self.creation_queue.push(entity);
    }

    /// Notifies systems that every queued entity is live, in FIFO order.
    pub fn flush_creations(&mut self, systems: &mut dyn SystemHooks) {
        self.begin_phase(FramePhase::FlushingCreations);
        let entities = self.creation_queue.take();
        if !entities.is_empty() {
            log::debug!("Flushing {} queued creations", entities.len());
        }
        for entity in entities {
            systems.entity_start(entity);
        }
        self.phase = FramePhase::Idle;
    }

    /// Queues `entity` for deletion and stops its per-frame scheduling.
    ///
    /// Returns `false` (and logs) if it was already queued.
    pub fn queue_for_deletion(&mut self, entity: Entity, systems: &mut dyn SystemHooks) -> bool {
        if !self.deletion_queue.push(entity) {
            log::warn!("Entity '{entity}' already queued for deletion!");
            return false;
        }
        systems.entity_end(entity);
        true
    }

    /// Queues `entity` and all of its descendants for deletion, children
    /// first. Returns how many entities were newly queued.
    pub fn queue_subtree_for_deletion(
        &mut self,
        entity: Entity,
        systems: &mut dyn SystemHooks,
    ) -> usize {
        let node = self.index.lookup(entity);
        self.queue_subtree_nodes(node, systems)
    }

    fn queue_subtree_nodes(&mut self, root: NodeHandle, systems: &mut dyn SystemHooks) -> usize {
        let mut queued = 0;
        for handle in self.tree.subtree_post_order(root) {
            let entity = self.entity_of(handle);
            if self.queue_for_deletion(entity, systems) {
                queued += 1;
            }
        }
        queued
    }

    /// Reclaims every queued entity, in FIFO order: drops its tree node and
    /// index entry, removes it from all systems, drops its components and
    /// returns the handle to the allocator.
    ///
    /// Live descendants of a queued entity are reclaimed with it, children
    /// first, so no node is left without its parent.
    pub fn flush_deletions(&mut self, services: &mut Services<'_>) {
        self.begin_phase(FramePhase::FlushingDeletions);
        let batch = self.deletion_queue.take();
        if !batch.is_empty() {
            log::debug!("Flushing {} queued deletions", batch.len());
        }

        let queued: FxHashSet<Entity> = batch.iter().copied().collect();
        let mut released = FxHashSet::default();
        for entity in batch {
            if released.contains(&entity) {
                continue;
            }
            match self.index.get(entity) {
                Some(node) => {
                    for descendant in self.live_descendants(node) {
                        if released.contains(&descendant) {
                            continue;
                        }
                        if !queued.contains(&descendant) {
                            log::debug!(
                                "Deleting entity '{descendant}' along with its ancestor '{entity}'"
                            );
                            services.systems.entity_end(descendant);
                        }
                        self.release(descendant, services);
                        released.insert(descendant);
                    }
                }
                None => log::debug!("Entity '{entity}' had no scene tree node at deletion"),
            }
            self.release(entity, services);
            released.insert(entity);
        }

        if !released.is_empty() && !self.creation_queue.is_empty() {
            self.creation_queue.retain(|e| !released.contains(e));
        }
        self.phase = FramePhase::Idle;
    }

    /// Entities of the subtree under `node`, children first, `node` excluded.
    fn live_descendants(&self, node: NodeHandle) -> Vec<Entity> {
        let mut order = self.tree.subtree_post_order(node);
        order.pop();
        order
            .into_iter()
            .filter_map(|h| self.tree.get(h))
            .map(SceneTreeNode::entity)
            .collect()
    }

    fn release(&mut self, entity: Entity, services: &mut Services<'_>) {
        if let Some(node) = self.index.remove(entity) {
            if self.active_root() == Some(node)
                && let Some(scene) = self.active_scene.as_mut()
            {
                scene.root = None;
            }
            self.tree.remove(node);
        }
        services.systems.remove_entity_from_all_systems(entity);
        services.components.remove_all(entity);
        services.entities.release(entity);
    }

    #[inline]
    #[must_use]
    pub fn pending_creations(&self) -> &[Entity] {
        self.creation_queue.as_slice()
    }

    #[inline]
    #[must_use]
    pub fn pending_deletions(&self) -> &[Entity] {
        self.deletion_queue.as_slice()
    }

    #[inline]
    #[must_use]
    pub fn is_queued_for_deletion(&self, entity: Entity) -> bool {
        self.deletion_queue.contains(entity)
    }

    // ========================================================================
    // Scenes
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn active_scene(&self) -> Option<&Scene> {
        self.active_scene.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn queued_scene(&self) -> Option<&Scene> {
        self.queued_scene.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn active_root(&self) -> Option<NodeHandle> {
        self.active_scene.as_ref().and_then(Scene::root)
    }

    /// Latches a change to the scene at `path`.
    ///
    /// Only one change may be pending; later requests are logged and
    /// dropped. Returns whether the request was accepted.
    pub fn queue_scene_change(&mut self, path: &str) -> bool {
        if let Some(queued) = &self.queued_scene {
            log::warn!(
                "Scene '{}' already queued, not loading '{path}'",
                queued.path
            );
            return false;
        }
        self.queued_scene = Some(Scene::new(path));
        true
    }

    /// Applies a pending scene change, if any.
    ///
    /// The old tree is queued for deletion (reclaimed at the next deletion
    /// flush), the camera is reset, the queued scene becomes active, and
    /// `runner` populates it.
    pub fn apply_queued_scene_change(
        &mut self,
        services: &mut Services<'_>,
        runner: &mut dyn SceneScriptRunner,
    ) -> Result<()> {
        let Some(next) = self.queued_scene.take() else {
            return Ok(());
        };
        self.begin_phase(FramePhase::ApplyingSceneChange);

        if let Some(old) = self.active_scene.take() {
            let mut queued = match old.root {
                Some(root) => self.queue_subtree_nodes(root, services.systems),
                None => 0,
            };
            // Nodes never linked under the root still belong to this scene.
            let mut stragglers: Vec<Entity> = self
                .index
                .entities()
                .filter(|&e| !self.is_queued_for_deletion(e))
                .collect();
            stragglers.sort_unstable();
            for entity in stragglers {
                if self.queue_for_deletion(entity, services.systems) {
                    queued += 1;
                }
            }
            log::debug!("Tearing down scene '{}' ({queued} entities)", old.path);
        }

        services.camera.reset_active_camera();

        let path = next.path.clone();
        self.active_scene = Some(next);
        let result = runner.run_scene_script(&path, self, services);
        if let Err(err) = &result {
            log::error!("Failed to populate scene '{path}': {err}");
        }

        self.phase = FramePhase::Idle;
        result
    }

    /// Binds `node` as the root of the active scene.
    ///
    /// # Panics
    ///
    /// If there is no active scene, or it already has a root.
    pub fn set_active_scene_root(&mut self, node: NodeHandle) {
        let Some(scene) = self.active_scene.as_mut() else {
            panic!("Cannot set a scene root without an active scene");
        };
        assert!(
            scene.root.is_none(),
            "Trying to overwrite an already existing scene root in '{}'!",
            scene.path
        );
        scene.root = Some(node);
    }

    /// Frame-boundary work, in order: pending scene change, deletion flush,
    /// creation flush.
    ///
    /// The flushes still run when the scene script fails, so the old
    /// scene's teardown is never left half done.
    pub fn process_frame_boundary(
        &mut self,
        services: &mut Services<'_>,
        runner: &mut dyn SceneScriptRunner,
    ) -> Result<()> {
        let applied = self.apply_queued_scene_change(services, runner);
        self.flush_deletions(services);
        self.flush_creations(services.systems);
        applied
    }
}
