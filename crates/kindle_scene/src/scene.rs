use crate::node::NodeHandle;

/// One loaded scene: the path it came from and the root of its tree.
///
/// The root stays `None` until the scene script binds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub(crate) path: String,
    pub(crate) root: Option<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            root: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> Option<NodeHandle> {
        self.root
    }
}
