use glam::Vec2;

/// Owner of the global camera state.
pub trait CameraControl {
    /// Restores the active camera to its default state.
    fn reset_active_camera(&mut self);
}

/// Minimal 2D camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
    pub offset: Vec2,
    pub zoom: Vec2,
}

impl Default for Camera2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            offset: Vec2::ZERO,
            zoom: Vec2::ONE,
        }
    }
}

impl CameraControl for Camera2D {
    fn reset_active_camera(&mut self) {
        *self = Self::default();
    }
}
