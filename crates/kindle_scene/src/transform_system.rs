//! Transform System
//!
//! Lazily resolves world transforms from the scene tree and exposes the
//! local transform accessors used by scripts.
//!
//! # Dirty flags
//!
//! Writing any local field of an entity marks only that entity's cached
//! global transform dirty. Descendants are not touched: a child resolved
//! before its parent moved keeps returning the old value until it is
//! invalidated itself, for example through [`invalidate_subtree`].
//! Structural edits ([`SceneManager::reparent`]) do mark the moved subtree.

use glam::{Affine2, Vec2};
use kindle_core::math::sign_vec2;
use kindle_core::{ComponentStore, Entity, Transform2DComponent, TransformModel2D};

use crate::manager::SceneManager;

fn transform_of(components: &dyn ComponentStore, entity: Entity) -> &Transform2DComponent {
    match components.transform_2d(entity) {
        Some(transform) => transform,
        None => panic!("Transform2D component missing for entity '{entity}'"),
    }
}

fn transform_of_mut(
    components: &mut dyn ComponentStore,
    entity: Entity,
) -> &mut Transform2DComponent {
    match components.transform_2d_mut(entity) {
        Some(transform) => transform,
        None => panic!("Transform2D component missing for entity '{entity}'"),
    }
}

/// Returns the world transform of `entity`, recomputing it from the
/// ancestor chain if its cache is dirty.
///
/// Ancestors without a transform component are skipped.
///
/// # Panics
///
/// If `entity` has no transform component or is not in the scene tree.
pub fn global_transform(
    scene: &SceneManager,
    components: &mut dyn ComponentStore,
    entity: Entity,
) -> TransformModel2D {
    let cached = transform_of(components, entity);
    if !cached.is_global_dirty {
        return cached.global;
    }

    let chain = scene.ancestor_chain(entity);
    let mut model = Affine2::IDENTITY;
    let mut scale_total = Vec2::ONE;
    for &current in chain.iter().rev() {
        let Some(transform) = components.transform_2d(current) else {
            continue;
        };
        scale_total *= transform.local.scale;
        model = model * transform.local.local_matrix();
    }

    let global = TransformModel2D::from_model(model, sign_vec2(scale_total));
    log::trace!(
        "Resolved global transform of entity '{entity}' over {} nodes",
        chain.len()
    );

    let transform = transform_of_mut(components, entity);
    transform.global = global;
    transform.is_global_dirty = false;
    global
}

#[must_use]
pub fn global_position(
    scene: &SceneManager,
    components: &mut dyn ComponentStore,
    entity: Entity,
) -> Vec2 {
    global_transform(scene, components, entity).position
}

/// Marks every transform in the subtree rooted at `entity` dirty. Returns
/// how many were marked.
pub fn invalidate_subtree(
    scene: &SceneManager,
    components: &mut dyn ComponentStore,
    entity: Entity,
) -> usize {
    let mut marked = 0;
    for current in scene.subtree_entities(entity) {
        if let Some(transform) = components.transform_2d_mut(current) {
            transform.mark_dirty();
            marked += 1;
        }
    }
    marked
}

// ============================================================================
// Local accessors
// ============================================================================

#[must_use]
pub fn position(components: &dyn ComponentStore, entity: Entity) -> Vec2 {
    transform_of(components, entity).local.position
}

pub fn set_position(components: &mut dyn ComponentStore, entity: Entity, position: Vec2) {
    let transform = transform_of_mut(components, entity);
    transform.local.position = position;
    transform.mark_dirty();
}

pub fn add_to_position(components: &mut dyn ComponentStore, entity: Entity, delta: Vec2) {
    let transform = transform_of_mut(components, entity);
    transform.local.position += delta;
    transform.mark_dirty();
}

#[must_use]
pub fn scale(components: &dyn ComponentStore, entity: Entity) -> Vec2 {
    transform_of(components, entity).local.scale
}

pub fn set_scale(components: &mut dyn ComponentStore, entity: Entity, scale: Vec2) {
    let transform = transform_of_mut(components, entity);
    transform.local.scale = scale;
    transform.mark_dirty();
}

pub fn add_to_scale(components: &mut dyn ComponentStore, entity: Entity, delta: Vec2) {
    let transform = transform_of_mut(components, entity);
    transform.local.scale += delta;
    transform.mark_dirty();
}

/// Local rotation in degrees.
#[must_use]
pub fn rotation(components: &dyn ComponentStore, entity: Entity) -> f32 {
    transform_of(components, entity).local.rotation
}

pub fn set_rotation(components: &mut dyn ComponentStore, entity: Entity, degrees: f32) {
    let transform = transform_of_mut(components, entity);
    transform.local.rotation = degrees;
    transform.mark_dirty();
}

pub fn add_to_rotation(components: &mut dyn ComponentStore, entity: Entity, degrees: f32) {
    let transform = transform_of_mut(components, entity);
    transform.local.rotation += degrees;
    transform.mark_dirty();
}
