//! Pool Engine - Sampling Without Replacement Per Scope
//!
//! TigerStyle: Derived state, rebuilt wholesale, never patched.
//!
//! A pool is the "not yet drawn this cycle" queue for one scope: the whole
//! roster, or one group. Pools are derived entirely from current store
//! membership; when a scope's pool is absent or empty, the next draw
//! replenishes it with a uniformly random permutation of the scope's live
//! handles and then consumes it front to back. Consuming a pre-shuffled
//! queue FIFO is equivalent to drawing without replacement, which is what
//! guarantees no repeat before the scope exhausts.
//!
//! Pools are cleared, not patched, on every membership change. Membership
//! can move between draws (insert, import), and a full rebuild happens at
//! most once per scope per cycle, so recomputing is both simpler and cheap.

use std::collections::{HashMap, VecDeque};

use super::entity::{EntityHandle, EntityStore};
use crate::sim::DeterministicRng;

/// The population a draw samples from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Every entity in the store
    Global,
    /// Entities whose group equals the key
    Group(String),
}

impl Scope {
    /// Scope over a single group key.
    #[must_use]
    pub fn group(key: impl Into<String>) -> Self {
        Self::Group(key.into())
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Group(key) => write!(f, "group:{key}"),
        }
    }
}

/// Tracks one pool per scope and draws handles without replacement.
///
/// TigerStyle:
/// - One RNG, seeded once, shared by every replenish
/// - A pool never holds duplicates or dangling handles
/// - A non-empty pool only shrinks until it empties or is invalidated
#[derive(Debug)]
pub struct PoolEngine {
    global: VecDeque<EntityHandle>,
    groups: HashMap<String, VecDeque<EntityHandle>>,
    rng: DeterministicRng,
}

impl PoolEngine {
    /// Create an engine around an owned RNG.
    ///
    /// Production seeds from entropy; tests inject a fixed seed and assert
    /// on the resulting permutations.
    #[must_use]
    pub fn new(rng: DeterministicRng) -> Self {
        Self {
            global: VecDeque::new(),
            groups: HashMap::new(),
            rng,
        }
    }

    /// Seed the engine's RNG was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Draw the next handle for a scope.
    ///
    /// Replenishes the scope's pool from current store membership if it is
    /// absent or empty, then pops the front. Returns `None` when the scope
    /// has no members - a normal empty outcome, not an error.
    pub fn draw(&mut self, scope: &Scope, store: &EntityStore) -> Option<EntityHandle> {
        match scope {
            Scope::Global => {
                if self.global.is_empty() {
                    self.global = Self::replenish(store, None, &mut self.rng);
                }
                self.global.pop_front()
            }
            Scope::Group(key) => {
                let exhausted = self.groups.get(key).is_none_or(VecDeque::is_empty);
                if exhausted {
                    let pool = Self::replenish(store, Some(key), &mut self.rng);
                    if pool.is_empty() {
                        // No members with this group key; drop the entry
                        self.groups.remove(key);
                        return None;
                    }
                    self.groups.insert(key.clone(), pool);
                }
                self.groups
                    .get_mut(key)
                    .and_then(VecDeque::pop_front)
            }
        }
    }

    /// Clear the global pool and every group pool.
    ///
    /// Must run after any membership change so entities added mid-cycle are
    /// eligible on the very next draw. Invalidation is deliberately global:
    /// narrowing it to the affected group would change fairness guarantees
    /// across groups.
    pub fn invalidate_all(&mut self) {
        self.global.clear();
        self.groups.clear();
    }

    /// Handles still pending in a scope's current cycle.
    ///
    /// Diagnostic view for tests and invariant checks; zero for an absent
    /// pool.
    #[must_use]
    pub fn pending(&self, scope: &Scope) -> usize {
        match scope {
            Scope::Global => self.global.len(),
            Scope::Group(key) => self.groups.get(key).map_or(0, VecDeque::len),
        }
    }

    /// Snapshot of every live pool as (scope, pending handles).
    ///
    /// Diagnostic view; used by the property harness to check that pools
    /// stay duplicate-free subsets of live membership.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(Scope, Vec<EntityHandle>)> {
        let mut pools = vec![(Scope::Global, self.global.iter().copied().collect())];
        for (key, pool) in &self.groups {
            pools.push((Scope::group(key.clone()), pool.iter().copied().collect()));
        }
        pools
    }

    fn replenish(
        store: &EntityStore,
        group: Option<&str>,
        rng: &mut DeterministicRng,
    ) -> VecDeque<EntityHandle> {
        let mut handles: Vec<EntityHandle> = store
            .handles()
            .filter(|&h| group.is_none_or(|key| store.get(h).group == key))
            .collect();
        rng.shuffle(&mut handles);
        handles.into()
    }
}
