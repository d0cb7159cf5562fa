use crate::math::{Transform2D, TransformModel2D};

/// Local transform authored by scripts plus the cached world transform.
///
/// `global` is only meaningful while `is_global_dirty` is `false`. Code
/// that writes `local` directly is responsible for raising the flag with
/// [`mark_dirty`](Self::mark_dirty); the `transform_system` setters do.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform2DComponent {
    pub local: Transform2D,
    pub global: TransformModel2D,
    pub is_global_dirty: bool,
    pub z_index: i32,
    pub z_index_relative_to_parent: bool,
    pub ignore_camera: bool,
}

impl Transform2DComponent {
    #[must_use]
    pub fn new(local: Transform2D) -> Self {
        Self {
            local,
            ..Self::default()
        }
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.is_global_dirty = true;
    }
}

impl Default for Transform2DComponent {
    fn default() -> Self {
        Self {
            local: Transform2D::IDENTITY,
            global: TransformModel2D::IDENTITY,
            is_global_dirty: true,
            z_index: 0,
            z_index_relative_to_parent: true,
            ignore_camera: false,
        }
    }
}
