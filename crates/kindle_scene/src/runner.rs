use std::path::{Path, PathBuf};

use kindle_core::{KindleError, Result};
use rustc_hash::FxHashMap;

use crate::manager::SceneManager;
use crate::services::{SceneScriptRunner, Services};
use crate::stage::{StageNode, instantiate_stage_nodes};

/// Parses a scene file holding either one root node or a list of
/// top-level nodes. The shape is picked from the first token so decoding
/// errors keep their position.
fn parse_stage_file(json: &str) -> Result<Vec<StageNode>> {
    if json.trim_start().starts_with('[') {
        Ok(serde_json::from_str(json)?)
    } else {
        let root: StageNode = serde_json::from_str(json)?;
        Ok(vec![root])
    }
}

/// [`SceneScriptRunner`] that populates scenes from stage descriptions.
///
/// Scenes are looked up by path among registered descriptions first, then
/// read as JSON files relative to the content root.
#[derive(Debug, Default)]
pub struct StageSceneRunner {
    scenes: FxHashMap<String, Vec<StageNode>>,
    content_root: Option<PathBuf>,
}

impl StageSceneRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves unregistered scene paths against `root`.
    #[must_use]
    pub fn with_content_root(root: impl Into<PathBuf>) -> Self {
        Self {
            content_root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn register(&mut self, path: impl Into<String>, nodes: Vec<StageNode>) {
        self.scenes.insert(path.into(), nodes);
    }

    pub fn register_json(&mut self, path: impl Into<String>, json: &str) -> Result<()> {
        let nodes = parse_stage_file(json)?;
        self.register(path, nodes);
        Ok(())
    }

    /// Reads and registers the scene file at `path`.
    pub fn load_file(&mut self, path: &str) -> Result<()> {
        let json = std::fs::read_to_string(self.resolve(path))?;
        self.register_json(path, &json)
    }

    #[must_use]
    pub fn is_registered(&self, path: &str) -> bool {
        self.scenes.contains_key(path)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        match &self.content_root {
            Some(root) => root.join(path),
            None => Path::new(path).to_path_buf(),
        }
    }
}

impl SceneScriptRunner for StageSceneRunner {
    fn run_scene_script(
        &mut self,
        path: &str,
        scene: &mut SceneManager,
        services: &mut Services<'_>,
    ) -> Result<()> {
        if !self.is_registered(path) {
            if !self.resolve(path).is_file() {
                return Err(KindleError::SceneNotFound(path.to_string()));
            }
            self.load_file(path)?;
        }

        let nodes = self
            .scenes
            .get(path)
            .ok_or_else(|| KindleError::SceneNotFound(path.to_string()))?;
        let created = instantiate_stage_nodes(scene, services, None, nodes)?;
        log::debug!("Populated scene '{path}' with {} top-level nodes", created.len());
        Ok(())
    }
}
