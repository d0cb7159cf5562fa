use serde::Deserialize;

/// Scene manager configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    /// Upper bound on entities pending in either queue.
    pub max_entities: usize,
    /// Initial capacity of the entity→node index and the node arena.
    pub index_capacity: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            max_entities: 200_000,
            index_capacity: 16,
        }
    }
}
