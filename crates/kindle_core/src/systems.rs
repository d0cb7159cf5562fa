//! System-registration hooks.
//!
//! The scene core notifies per-frame systems through [`SystemHooks`] only
//! while queuing or flushing; nothing else reaches into system entity sets.

use rustc_hash::FxHashSet;

use crate::entity::Entity;

/// Callbacks into the system layer, invoked during queue operations.
pub trait SystemHooks {
    /// The entity's creation was flushed; it is now live.
    fn entity_start(&mut self, entity: Entity);

    /// The entity was queued for deletion; stop scheduling it for updates.
    fn entity_end(&mut self, entity: Entity);

    /// The entity's deletion was flushed; drop it from every system.
    fn remove_entity_from_all_systems(&mut self, entity: Entity);

    /// The entity's component set changed; recompute which systems own it.
    fn update_entity_system_membership(&mut self, entity: Entity);
}

/// Reference system layer that tracks membership and scheduling.
#[derive(Debug, Default)]
pub struct SystemRegistry {
    members: FxHashSet<Entity>,
    scheduled: FxHashSet<Entity>,
}

impl SystemRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some system owns `entity`.
    #[inline]
    #[must_use]
    pub fn is_member(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    /// Whether `entity` receives per-frame updates.
    #[inline]
    #[must_use]
    pub fn is_scheduled(&self, entity: Entity) -> bool {
        self.scheduled.contains(&entity)
    }

    #[inline]
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    #[inline]
    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.scheduled.len()
    }
}

impl SystemHooks for SystemRegistry {
    fn entity_start(&mut self, entity: Entity) {
        if self.members.contains(&entity) {
            self.scheduled.insert(entity);
        } else {
            log::debug!("Entity '{entity}' started without system membership");
        }
    }

    fn entity_end(&mut self, entity: Entity) {
        self.scheduled.remove(&entity);
    }

    fn remove_entity_from_all_systems(&mut self, entity: Entity) {
        self.scheduled.remove(&entity);
        self.members.remove(&entity);
    }

    fn update_entity_system_membership(&mut self, entity: Entity) {
        self.members.insert(entity);
    }
}
