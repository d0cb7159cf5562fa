//! Runtime
//!
//! [`Runtime`] is the composition root: it owns one reference
//! implementation of every collaborator the scene core calls out to, and
//! exposes the handful of operations a game loop or scripting bridge needs.
//!
//! # Lifecycle
//!
//! 1. Create with [`Runtime::new`] or [`Runtime::with_settings`]
//! 2. Register content on [`Runtime::runner`] and [`Runtime::assets`]
//! 3. Request a scene with [`Runtime::change_scene`]
//! 4. Call [`Runtime::end_frame`] once per frame

use glam::Vec2;
use kindle_core::{
    AssetRegistry, Camera2D, ComponentManager, Entity, EntityPool, NodeType, Result,
    SystemRegistry, TransformModel2D,
};
use kindle_scene::{SceneManager, SceneSettings, Services, StageSceneRunner, transform_system};

pub struct Runtime {
    pub scene: SceneManager,
    pub entities: EntityPool,
    pub components: ComponentManager,
    pub systems: SystemRegistry,
    pub camera: Camera2D,
    pub assets: AssetRegistry,
    pub runner: StageSceneRunner,

    frame_count: u64,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(SceneSettings::default())
    }

    #[must_use]
    pub fn with_settings(settings: SceneSettings) -> Self {
        Self {
            scene: SceneManager::with_settings(settings),
            entities: EntityPool::new(),
            components: ComponentManager::new(),
            systems: SystemRegistry::new(),
            camera: Camera2D::default(),
            assets: AssetRegistry::new(),
            runner: StageSceneRunner::new(),
            frame_count: 0,
        }
    }

    /// Frames completed through [`end_frame`](Self::end_frame).
    #[inline]
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Splits the runtime into the scene manager and the collaborators it
    /// calls out to.
    pub fn split(&mut self) -> (&mut SceneManager, Services<'_>) {
        let services = Services {
            entities: &mut self.entities,
            components: &mut self.components,
            systems: &mut self.systems,
            camera: &mut self.camera,
            assets: &self.assets,
        };
        (&mut self.scene, services)
    }

    /// Queues a change to the scene at `path`. See
    /// [`SceneManager::queue_scene_change`].
    pub fn change_scene(&mut self, path: &str) -> bool {
        self.scene.queue_scene_change(path)
    }

    /// Runs the frame boundary: pending scene change, then deletions, then
    /// creations.
    pub fn end_frame(&mut self) -> Result<()> {
        let Self {
            scene,
            entities,
            components,
            systems,
            camera,
            assets,
            runner,
            frame_count,
        } = self;
        let mut services = Services {
            entities,
            components,
            systems,
            camera,
            assets: &*assets,
        };
        let result = scene.process_frame_boundary(&mut services, runner);
        *frame_count += 1;
        log::trace!(
            "Frame {frame_count} complete: {} entities in scene",
            scene.entity_count()
        );
        result
    }

    /// Creates an entity of `node_type` outside the tree.
    pub fn new_node(&mut self, node_type: NodeType, name: &str) -> Entity {
        let (_, mut services) = self.split();
        kindle_scene::new_node(&mut services, node_type, name)
    }

    /// Creates a node under `parent` and queues it for creation.
    pub fn spawn_child(&mut self, parent: Entity, node_type: NodeType, name: &str) -> Entity {
        let child = self.new_node(node_type, name);
        self.scene.add_child(parent, child, &mut self.systems);
        child
    }

    /// Queues `entity` and its descendants for deletion.
    pub fn queue_deletion(&mut self, entity: Entity) -> usize {
        self.scene.queue_subtree_for_deletion(entity, &mut self.systems)
    }

    #[must_use]
    pub fn child_by_name(&self, parent: Entity, name: &str) -> Option<Entity> {
        self.scene
            .get_entity_child_by_name(parent, name, &self.components)
    }

    pub fn global_transform(&mut self, entity: Entity) -> TransformModel2D {
        transform_system::global_transform(&self.scene, &mut self.components, entity)
    }

    pub fn global_position(&mut self, entity: Entity) -> Vec2 {
        transform_system::global_position(&self.scene, &mut self.components, entity)
    }

    /// Root entity of the active scene, once populated.
    #[must_use]
    pub fn root_entity(&self) -> Option<Entity> {
        let root = self.scene.active_root()?;
        self.scene.node(root).map(kindle_scene::SceneTreeNode::entity)
    }
}
