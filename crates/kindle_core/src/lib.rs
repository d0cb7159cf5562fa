//! Kindle Core
//!
//! Foundational types shared by every Kindle crate:
//!
//! - [`Entity`]: opaque game-object handle, plus the [`EntityAllocator`] seam
//! - [`component`]: closed component-kind registry and the [`ComponentStore`] seam
//! - [`math`]: 2D local transforms and composed transform models
//! - [`SystemHooks`], [`CameraControl`], [`AssetCatalog`]: collaborator seams
//!   invoked by the scene core at frame boundaries
//! - [`KindleError`]: recoverable error type

pub mod assets;
pub mod camera;
pub mod component;
pub mod entity;
pub mod errors;
pub mod math;
pub mod systems;

pub use assets::{AssetCatalog, AssetRegistry};
pub use camera::{Camera2D, CameraControl};
pub use component::{
    Component, ComponentKind, ComponentManager, ComponentStore, NodeComponent, NodeInheritance,
    NodeType, Transform2DComponent,
};
pub use entity::{Entity, EntityAllocator, EntityPool};
pub use errors::{KindleError, Result};
pub use math::{Color, Rect2, Transform2D, TransformModel2D};
pub use systems::{SystemHooks, SystemRegistry};

pub use glam;
