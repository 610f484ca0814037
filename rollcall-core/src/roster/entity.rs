//! Entity Store - Arena of Roster Entities
//!
//! TigerStyle: Explicit types, validated preconditions, stable handles.
//!
//! Entities live in a growable arena and are addressed by [`EntityHandle`],
//! a stable integer position. Pools hold handles, never clones, so the
//! store's internal layout can change without touching pool state. Entities
//! are never removed in this design; handles stay valid for the lifetime of
//! the store.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ROSTER_ENTITIES_COUNT_MAX, ROSTER_GROUP_BYTES_MAX, ROSTER_IDENTITY_BYTES_MAX,
};

/// A stable, lightweight reference to an entity's slot in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(usize);

impl EntityHandle {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One named entity on the roster.
///
/// `call_count` is mutated only by [`EntityStore::record_draw`]; the sum of
/// all counters equals the number of draws ever recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique identity key (e.g. a name)
    pub identity: String,
    /// Flat group key the entity belongs to
    pub group: String,
    /// Number of times this entity has been drawn
    pub call_count: u64,
}

/// Authoritative, append-only collection of entities.
///
/// TigerStyle:
/// - Identity keys are unique (O(1) duplicate detection)
/// - Handles index a growable arena and never dangle
/// - Counters move in one direction only
#[derive(Debug, Default)]
pub struct EntityStore {
    entities: Vec<Entity>,
    by_identity: HashMap<String, EntityHandle>,
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity with a zero counter.
    ///
    /// Returns false (and mutates nothing) if the identity already exists.
    ///
    /// # Panics
    /// Panics if identity or group exceed their byte limits, if either is
    /// empty, or if the store is full. Callers feeding untrusted input
    /// (the bulk loader) classify such lines as malformed before reaching
    /// this point.
    pub fn insert(&mut self, identity: impl Into<String>, group: impl Into<String>) -> bool {
        let identity = identity.into();
        let group = group.into();

        // Preconditions
        assert!(!identity.is_empty(), "identity must not be empty");
        assert!(!group.is_empty(), "group must not be empty");
        assert!(
            identity.len() <= ROSTER_IDENTITY_BYTES_MAX,
            "identity {} bytes exceeds max {}",
            identity.len(),
            ROSTER_IDENTITY_BYTES_MAX
        );
        assert!(
            group.len() <= ROSTER_GROUP_BYTES_MAX,
            "group {} bytes exceeds max {}",
            group.len(),
            ROSTER_GROUP_BYTES_MAX
        );
        assert!(
            self.entities.len() < ROSTER_ENTITIES_COUNT_MAX,
            "store full: {} entities",
            self.entities.len()
        );

        if self.by_identity.contains_key(&identity) {
            return false;
        }

        let handle = EntityHandle(self.entities.len());
        self.by_identity.insert(identity.clone(), handle);
        self.entities.push(Entity {
            identity,
            group,
            call_count: 0,
        });

        // Postcondition
        debug_assert_eq!(self.entities.len(), self.by_identity.len());

        true
    }

    /// Look at the entity behind a handle.
    ///
    /// Handles only ever come from this store, so an out-of-range handle is
    /// a logic error.
    ///
    /// # Panics
    /// Panics if the handle does not belong to this store.
    #[must_use]
    pub fn get(&self, handle: EntityHandle) -> &Entity {
        &self.entities[handle.index()]
    }

    /// Record one draw against the entity behind a handle.
    ///
    /// # Panics
    /// Panics if the handle does not belong to this store.
    pub fn record_draw(&mut self, handle: EntityHandle) {
        self.entities[handle.index()].call_count += 1;
    }

    /// Whether an identity is already present.
    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.by_identity.contains_key(identity)
    }

    /// Lazy, restartable enumeration of all entities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Enumerate handles in insertion order.
    pub fn handles(&self) -> impl Iterator<Item = EntityHandle> {
        (0..self.entities.len()).map(EntityHandle)
    }

    /// Number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Sum of all call counters.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.entities.iter().map(|e| e.call_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_new_entity() {
        let mut store = EntityStore::new();

        assert!(store.insert("Alice", "A1"));

        assert_eq!(store.len(), 1);
        assert!(store.contains("Alice"));
        let entity = store.iter().next().unwrap();
        assert_eq!(entity.identity, "Alice");
        assert_eq!(entity.group, "A1");
        assert_eq!(entity.call_count, 0);
    }

    #[test]
    fn test_insert_duplicate_fails_and_mutates_nothing() {
        let mut store = EntityStore::new();
        store.insert("Alice", "A1");
        store.record_draw(EntityHandle(0));

        // Same identity, different group: must not overwrite anything
        assert!(!store.insert("Alice", "A2"));

        assert_eq!(store.len(), 1);
        let entity = store.iter().next().unwrap();
        assert_eq!(entity.group, "A1");
        assert_eq!(entity.call_count, 1);
    }

    #[test]
    fn test_record_draw_increments() {
        let mut store = EntityStore::new();
        store.insert("Alice", "A1");
        store.insert("Bob", "A1");

        store.record_draw(EntityHandle(1));
        store.record_draw(EntityHandle(1));
        store.record_draw(EntityHandle(0));

        assert_eq!(store.get(EntityHandle(0)).call_count, 1);
        assert_eq!(store.get(EntityHandle(1)).call_count, 2);
        assert_eq!(store.total_calls(), 3);
    }

    #[test]
    fn test_handles_match_entities() {
        let mut store = EntityStore::new();
        store.insert("Alice", "A1");
        store.insert("Bob", "A2");
        store.insert("Carol", "A1");

        let handles: Vec<_> = store.handles().collect();
        assert_eq!(handles.len(), 3);
        assert_eq!(store.get(handles[0]).identity, "Alice");
        assert_eq!(store.get(handles[2]).identity, "Carol");
    }

    #[test]
    fn test_iter_is_restartable() {
        let mut store = EntityStore::new();
        store.insert("Alice", "A1");
        store.insert("Bob", "A1");

        assert_eq!(store.iter().count(), 2);
        assert_eq!(store.iter().count(), 2);
    }

    #[test]
    fn test_empty_store() {
        let store = EntityStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.total_calls(), 0);
        assert!(store.handles().next().is_none());
    }

    #[test]
    #[should_panic(expected = "identity must not be empty")]
    fn test_insert_empty_identity() {
        let mut store = EntityStore::new();
        store.insert("", "A1");
    }

    #[test]
    #[should_panic(expected = "identity")]
    fn test_insert_identity_too_long() {
        let mut store = EntityStore::new();
        let long = "x".repeat(ROSTER_IDENTITY_BYTES_MAX + 1);
        store.insert(long, "A1");
    }

    #[test]
    #[should_panic(expected = "group")]
    fn test_insert_group_too_long() {
        let mut store = EntityStore::new();
        let long = "x".repeat(ROSTER_GROUP_BYTES_MAX + 1);
        store.insert("Alice", long);
    }
}
