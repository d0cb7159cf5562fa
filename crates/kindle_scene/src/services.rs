use kindle_core::{
    AssetCatalog, CameraControl, ComponentStore, EntityAllocator, Result, SystemHooks,
};

use crate::manager::SceneManager;

/// Borrowed collaborators the scene core calls out to at frame boundaries.
pub struct Services<'a> {
    pub entities: &'a mut dyn EntityAllocator,
    pub components: &'a mut dyn ComponentStore,
    pub systems: &'a mut dyn SystemHooks,
    pub camera: &'a mut dyn CameraControl,
    pub assets: &'a dyn AssetCatalog,
}

/// Populates a freshly activated scene.
///
/// Implementations create nodes and queue them for creation through
/// `scene`; they do not return a tree.
pub trait SceneScriptRunner {
    fn run_scene_script(
        &mut self,
        path: &str,
        scene: &mut SceneManager,
        services: &mut Services<'_>,
    ) -> Result<()>;
}
