//! Read-only view of loaded content, used to validate scene definitions.

use rustc_hash::FxHashSet;

/// Answers whether content referenced by a scene has been loaded.
pub trait AssetCatalog {
    fn has_texture(&self, path: &str) -> bool;

    fn has_font(&self, uid: &str) -> bool;
}

/// Set-backed [`AssetCatalog`].
#[derive(Debug, Default, Clone)]
pub struct AssetRegistry {
    textures: FxHashSet<String>,
    fonts: FxHashSet<String>,
}

impl AssetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_texture(&mut self, path: impl Into<String>) -> &mut Self {
        self.textures.insert(path.into());
        self
    }

    pub fn add_font(&mut self, uid: impl Into<String>) -> &mut Self {
        self.fonts.insert(uid.into());
        self
    }
}

impl AssetCatalog for AssetRegistry {
    fn has_texture(&self, path: &str) -> bool {
        self.textures.contains(path)
    }

    fn has_font(&self, uid: &str) -> bool {
        self.fonts.contains(uid)
    }
}
