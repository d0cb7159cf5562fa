//! Entity handles and allocation.
//!
//! An [`Entity`] carries no data of its own. Handles are recycled once an
//! entity's storage is reclaimed, so callers must not hold on to a handle
//! across a deletion flush without revalidating it.

use std::fmt;

use rustc_hash::FxHashSet;

/// Opaque game-object handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Entity(u32);

impl Entity {
    /// Reserved sentinel meaning "no entity".
    pub const NULL: Self = Self(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == u32::MAX
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            f.write_str("null")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Source of fresh entity handles.
///
/// The scene core never allocates ids itself; it asks this collaborator.
pub trait EntityAllocator {
    /// Returns a handle that is not currently live.
    fn allocate(&mut self) -> Entity;

    /// Returns a handle to the pool once its storage has been reclaimed.
    fn release(&mut self, entity: Entity);
}

/// Simple allocator handing out sequential ids and reusing released ones.
#[derive(Debug, Default)]
pub struct EntityPool {
    next: u32,
    free: Vec<Entity>,
    live: FxHashSet<Entity>,
}

impl EntityPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handles currently handed out.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.live.contains(&entity)
    }
}

impl EntityAllocator for EntityPool {
    fn allocate(&mut self) -> Entity {
        let entity = self.free.pop().unwrap_or_else(|| {
            let entity = Entity(self.next);
            self.next += 1;
            assert!(!entity.is_null(), "entity id space exhausted");
            entity
        });
        self.live.insert(entity);
        entity
    }

    fn release(&mut self, entity: Entity) {
        if self.live.remove(&entity) {
            self.free.push(entity);
        } else {
            log::warn!("Entity '{entity}' released but was not allocated by this pool");
        }
    }
}
