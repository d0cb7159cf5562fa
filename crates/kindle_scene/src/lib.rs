//! Kindle Scene
//!
//! Scene graph and entity lifecycle:
//!
//! - [`NodeArena`] / [`SceneTreeNode`]: the parent/child hierarchy
//! - [`EntityNodeIndex`]: entity → tree node lookup
//! - [`CreationQueue`] / [`DeletionQueue`]: batches applied at frame boundaries
//! - [`SceneManager`]: owns the above plus the active and queued [`Scene`]
//! - [`transform_system`]: lazily resolved world transforms
//! - [`stage`] / [`StageSceneRunner`]: typed scene content and the runner
//!   that instantiates it

pub mod index;
pub mod manager;
pub mod node;
pub mod queue;
pub mod runner;
pub mod scene;
pub mod services;
pub mod settings;
pub mod stage;
pub mod transform_system;
pub mod tree;

pub use index::EntityNodeIndex;
pub use manager::{AncestorChain, FramePhase, SceneManager};
pub use node::{NodeHandle, SceneTreeNode};
pub use queue::{CreationQueue, DeletionQueue};
pub use runner::StageSceneRunner;
pub use scene::Scene;
pub use services::{SceneScriptRunner, Services};
pub use settings::SceneSettings;
pub use stage::{ComponentDef, StageNode, Transform2DDef, instantiate_stage_nodes, new_node};
pub use tree::NodeArena;
