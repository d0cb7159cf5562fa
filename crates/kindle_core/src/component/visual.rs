//! Drawable component records. Texture and font references are kept as
//! paths/uids; resolving them is the asset layer's job.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::{Color, Rect2};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteComponent {
    pub texture_path: String,
    pub draw_source: Rect2,
    pub origin: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
    pub modulate: Color,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationFrame {
    pub frame: u32,
    pub texture_path: String,
    pub draw_source: Rect2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Animation {
    pub name: String,
    pub speed: u32,
    pub loops: bool,
    pub frames: Vec<AnimationFrame>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimatedSpriteComponent {
    pub animations: Vec<Animation>,
    pub current_animation: Option<String>,
    pub is_playing: bool,
    pub origin: Vec2,
    pub flip_x: bool,
    pub flip_y: bool,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            name: String::new(),
            speed: 100,
            loops: true,
            frames: Vec::new(),
        }
    }
}

impl AnimatedSpriteComponent {
    #[must_use]
    pub fn animation(&self, name: &str) -> Option<&Animation> {
        self.animations.iter().find(|a| a.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLabelComponent {
    pub font_uid: String,
    pub text: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSquareComponent {
    pub size: Vec2,
    pub color: Color,
}

impl Default for ColorSquareComponent {
    fn default() -> Self {
        Self {
            size: Vec2::splat(32.0),
            color: Color::WHITE,
        }
    }
}
