//! Kindle
//!
//! Scene-graph and entity-lifecycle core of a 2D game runtime.
//!
//! The engine is split into two member crates, re-exported here:
//!
//! - [`kindle_core`]: entities, components, math and the collaborator seams
//! - [`kindle_scene`]: the scene tree, creation/deletion queues, scene swaps
//!   and transform resolution
//!
//! [`Runtime`] owns one instance of every collaborator and drives the frame
//! boundary.
//!
//! # Example
//!
//! ```rust,ignore
//! use kindle::prelude::*;
//!
//! let mut runtime = Runtime::new();
//! runtime.runner.register_json("main.json", r#"{ "name": "Main", "type": "Node2D" }"#)?;
//! runtime.change_scene("main.json");
//! runtime.end_frame()?;
//! ```

pub mod runtime;

pub use kindle_core;
pub use kindle_scene;

pub use kindle_core::{
    AssetCatalog, AssetRegistry, Camera2D, CameraControl, Component, ComponentKind,
    ComponentManager, ComponentStore, Entity, EntityAllocator, EntityPool, KindleError,
    NodeComponent, NodeType, Result, SystemHooks, SystemRegistry, Transform2D,
    Transform2DComponent, TransformModel2D,
};
pub use kindle_scene::{
    ComponentDef, NodeHandle, SceneManager, SceneScriptRunner, SceneSettings, Services,
    StageNode, StageSceneRunner, transform_system,
};
pub use runtime::Runtime;

pub use glam;

pub mod prelude {
    pub use crate::runtime::Runtime;
    pub use glam::Vec2;
    pub use kindle_core::{
        ComponentKind, ComponentStore, Entity, KindleError, NodeType, Result, Transform2D,
    };
    pub use kindle_scene::transform_system;
    pub use kindle_scene::{ComponentDef, SceneManager, SceneSettings, StageNode};
}
