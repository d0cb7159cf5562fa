//! Creation and deletion batches drained at frame boundaries.

use kindle_core::Entity;
use rustc_hash::FxHashSet;

/// FIFO of entities waiting to become live in the system layer.
#[derive(Debug)]
pub struct CreationQueue {
    entities: Vec<Entity>,
    capacity: usize,
}

impl CreationQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entities: Vec::new(),
            capacity,
        }
    }

    /// # Panics
    ///
    /// If the queue already holds `capacity` entities.
    pub fn push(&mut self, entity: Entity) {
        assert!(
            self.entities.len() < self.capacity,
            "Creation queue is full ({} entities), cannot queue entity '{entity}'",
            self.capacity
        );
        self.entities.push(entity);
    }

    /// Removes queued entities rejected by `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) {
        self.entities.retain(keep);
    }

    /// Takes the whole batch, leaving the queue empty.
    pub fn take(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.entities)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// FIFO of entities waiting for storage reclamation. Each entity appears
/// at most once per batch.
#[derive(Debug)]
pub struct DeletionQueue {
    entities: Vec<Entity>,
    queued: FxHashSet<Entity>,
    capacity: usize,
}

impl DeletionQueue {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entities: Vec::new(),
            queued: FxHashSet::default(),
            capacity,
        }
    }

    /// Returns `false` without queuing if `entity` is already pending.
    ///
    /// # Panics
    ///
    /// If the queue already holds `capacity` entities.
    pub fn push(&mut self, entity: Entity) -> bool {
        if self.queued.contains(&entity) {
            return false;
        }
        assert!(
            self.entities.len() < self.capacity,
            "Deletion queue is full ({} entities), cannot queue entity '{entity}'",
            self.capacity
        );
        self.queued.insert(entity);
        self.entities.push(entity);
        true
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.queued.contains(&entity)
    }

    /// Takes the whole batch, leaving the queue empty.
    pub fn take(&mut self) -> Vec<Entity> {
        self.queued.clear();
        std::mem::take(&mut self.entities)
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
