//! Error Types
//!
//! This module defines the recoverable error type used throughout the engine.
//!
//! # Overview
//!
//! [`KindleError`] covers failures a malformed scene file or a bad script
//! call can cause at runtime:
//! - Unknown node type strings
//! - Content (textures, fonts) referenced by a scene but not loaded
//! - Scene paths with no registered or on-disk definition
//! - Scene file I/O and JSON decoding
//!
//! Contract violations inside the scene core (duplicate index entries, a
//! second scene root, nested flushes) are not represented here; they panic.
//!
//! # Usage
//!
//! ```rust,ignore
//! use kindle_core::errors::{KindleError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(KindleError::SceneNotFound("levels/missing.json".into()))
//! }
//! ```

use thiserror::Error;

use crate::component::ComponentKind;

/// The main recoverable error type for the Kindle engine.
#[derive(Error, Debug)]
pub enum KindleError {
    // ========================================================================
    // Content Errors
    // ========================================================================
    /// A node type string did not name any known [`NodeType`](crate::NodeType).
    #[error("Unknown node type '{0}'")]
    UnknownNodeType(String),

    /// Content referenced by a component is not available.
    #[error("{kind:?} content not found: '{path}'")]
    ContentNotFound {
        /// Component that referenced the content
        kind: ComponentKind,
        /// Path or uid of the missing content
        path: String,
    },

    // ========================================================================
    // Scene Loading Errors
    // ========================================================================
    /// No scene definition exists for the requested path.
    #[error("Scene not found: {0}")]
    SceneNotFound(String),

    /// Scene file I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Scene JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, KindleError>`.
pub type Result<T> = std::result::Result<T, KindleError>;
