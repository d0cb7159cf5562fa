//! 2D math primitives.
//!
//! Rotations are expressed in degrees at every API boundary; radians only
//! appear inside matrix construction and decomposition.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// Local position, scale and rotation (degrees) of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform2D {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f32,
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        scale: Vec2::ONE,
        rotation: 0.0,
    };

    /// Returns `T * R * S` for this transform.
    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> Affine2 {
        Affine2::from_scale_angle_translation(
            self.scale,
            self.rotation.to_radians(),
            self.position,
        )
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Cached world-space transform of an entity.
///
/// `model` is the composed matrix of the whole ancestor chain. `scale_sign`
/// holds the per-axis sign of the product of every local scale in that
/// chain, which matrix decomposition alone cannot recover.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformModel2D {
    pub position: Vec2,
    pub scale: Vec2,
    pub rotation: f32,
    pub model: Affine2,
    pub scale_sign: Vec2,
}

impl TransformModel2D {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        scale: Vec2::ONE,
        rotation: 0.0,
        model: Affine2::IDENTITY,
        scale_sign: Vec2::ONE,
    };

    /// Decomposes `model` into translation, rotation and scale, restoring the
    /// scale signs from `scale_sign`.
    #[must_use]
    pub fn from_model(model: Affine2, scale_sign: Vec2) -> Self {
        let x_axis = model.matrix2.x_axis;
        let y_axis = model.matrix2.y_axis;
        let scale = Vec2::new(
            x_axis.length() * scale_sign.x,
            y_axis.length() * scale_sign.y,
        );

        // A negative x scale flips the x axis; divide it back out before
        // reading the angle so a mirrored node keeps its authored rotation.
        let rotation = if scale.x == 0.0 {
            0.0
        } else {
            let unit = x_axis / scale.x;
            unit.y.atan2(unit.x).to_degrees()
        };

        Self {
            position: model.translation,
            scale,
            rotation,
            model,
            scale_sign,
        }
    }
}

impl Default for TransformModel2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Per-axis sign of `v`, treating zero as positive.
#[inline]
#[must_use]
pub fn sign_vec2(v: Vec2) -> Vec2 {
    Vec2::new(
        if v.x < 0.0 { -1.0 } else { 1.0 },
        if v.y < 0.0 { -1.0 } else { 1.0 },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Rect2 {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect2 {
    #[must_use]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Normalized RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Builds a color from 0-255 channel values.
    #[must_use]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
