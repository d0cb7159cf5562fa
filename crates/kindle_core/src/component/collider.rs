use serde::{Deserialize, Serialize};

use crate::math::{Color, Rect2};

/// Axis-aligned collision shape in the owner's local space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collider2DComponent {
    pub rect: Rect2,
    pub color: Color,
}

impl Default for Collider2DComponent {
    fn default() -> Self {
        Self {
            rect: Rect2::new(0.0, 0.0, 32.0, 32.0),
            color: Color::from_rgba8(95, 205, 228, 191),
        }
    }
}
