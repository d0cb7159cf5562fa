use serde::{Deserialize, Serialize};

/// Binds an entity to a script class in the embedded scripting layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptComponent {
    pub class_path: String,
    pub class_name: String,
}

impl ScriptComponent {
    #[must_use]
    pub fn new(class_path: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            class_path: class_path.into(),
            class_name: class_name.into(),
        }
    }
}
