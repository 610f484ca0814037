//! Roster Manager - Command-Dispatch Facade
//!
//! TigerStyle: One entry point per operation, zero interactive I/O.
//!
//! The manager wires the three stateful parts together: a draw flows
//! pool engine -> entity store (counter increment) -> history log (append).
//! Any front end (menu, test harness, service) drives these entry points
//! and owns all formatting and prompting itself.
//!
//! # Example
//!
//! ```rust
//! use rollcall_core::roster::{RosterManager, Scope};
//!
//! let mut roster = RosterManager::with_seed(42);
//! roster.insert("Alice", "A1");
//! roster.insert("Bob", "A1");
//!
//! let first = roster.draw(&Scope::Global).unwrap();
//! let second = roster.draw(&Scope::Global).unwrap();
//! assert_ne!(first.identity, second.identity);
//! assert_eq!(roster.total_calls(), 2);
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;

use super::entity::{Entity, EntityStore};
use super::history::{CallRecord, HistoryLog};
use super::import::{self, ImportError, ImportStats};
use super::pool::{PoolEngine, Scope};
use crate::sim::DeterministicRng;

/// Owns the roster state and serializes every mutation through `&mut self`.
///
/// TigerStyle:
/// - Single RNG, seeded once, logged for reproducibility
/// - Pools invalidated on every membership change
/// - Counters and history always move together
#[derive(Debug)]
pub struct RosterManager {
    store: EntityStore,
    pools: PoolEngine,
    history: HistoryLog,
    /// Pinned simulated instant; wall clock when unset
    manual_clock_ms: Option<u64>,
}

impl RosterManager {
    /// Create a manager seeded from entropy.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a manager with a fixed seed.
    ///
    /// Tests use this to get reproducible draw orders; production callers
    /// can replay a logged seed to reproduce a sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        tracing::debug!(seed, "roster manager created");
        Self {
            store: EntityStore::new(),
            pools: PoolEngine::new(DeterministicRng::new(seed)),
            history: HistoryLog::new(),
            manual_clock_ms: None,
        }
    }

    /// Seed the draw RNG was built from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.pools.seed()
    }

    /// Pin the manager clock to a simulated instant (milliseconds since
    /// epoch). History records are stamped from this until the next call.
    pub fn set_clock_ms(&mut self, ms: u64) {
        self.manual_clock_ms = Some(ms);
    }

    fn now_ms(&self) -> u64 {
        self.manual_clock_ms
            .unwrap_or_else(|| u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0))
    }

    /// Add one entity. Returns false if the identity already exists.
    ///
    /// Fields are trimmed of surrounding whitespace. A successful insert
    /// clears every pool so the new entity is eligible for the current
    /// cycle's next draw.
    ///
    /// # Panics
    /// Panics if either trimmed field is empty or over its byte limit;
    /// front ends validate before dispatching (the bulk loader classifies
    /// such lines as malformed instead).
    pub fn insert(&mut self, identity: &str, group: &str) -> bool {
        let identity = identity.trim();
        let group = group.trim();

        let added = self.store.insert(identity, group);
        if added {
            self.pools.invalidate_all();
            tracing::debug!(identity, group, "entity added, pools invalidated");
        }
        added
    }

    /// Draw the next entity for a scope, without replacement.
    ///
    /// Returns a clone of the drawn entity with its counter already
    /// incremented, or `None` when the scope has no members.
    pub fn draw(&mut self, scope: &Scope) -> Option<Entity> {
        let handle = self.pools.draw(scope, &self.store)?;

        self.store.record_draw(handle);
        let entity = self.store.get(handle).clone();
        self.history.append(CallRecord::new(
            entity.identity.clone(),
            entity.group.clone(),
            self.now_ms(),
        ));

        tracing::debug!(%scope, identity = %entity.identity, "drew entity");
        Some(entity)
    }

    /// Bulk-load line-oriented records, then invalidate all pools once.
    pub fn import_lines<I, S>(&mut self, lines: I) -> ImportStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stats = import::import_lines(&mut self.store, lines);
        self.pools.invalidate_all();
        tracing::debug!(
            added = stats.added,
            duplicates = stats.duplicates,
            malformed = stats.malformed,
            "import complete, pools invalidated"
        );
        stats
    }

    /// Bulk-load records from a file, then invalidate all pools once.
    ///
    /// # Errors
    /// Returns [`ImportError`] when the source cannot be opened or read;
    /// pools are left untouched in that case.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<ImportStats, ImportError> {
        let stats = import::import_file(&mut self.store, path)?;
        self.pools.invalidate_all();
        tracing::debug!(
            added = stats.added,
            duplicates = stats.duplicates,
            malformed = stats.malformed,
            "file import complete, pools invalidated"
        );
        Ok(stats)
    }

    /// Start fresh cycles everywhere: clear the global pool and every
    /// group pool. Counters and history are untouched.
    pub fn reset_cycle(&mut self) {
        self.pools.invalidate_all();
        tracing::debug!("cycle reset");
    }

    /// Empty the history log. Counters and pools are untouched.
    pub fn clear_history(&mut self) {
        self.history.clear();
        tracing::debug!("history cleared");
    }

    /// The `limit` most recent draws, most-recent-first; zero means all.
    pub fn history(&self, limit: usize) -> impl Iterator<Item = &CallRecord> {
        self.history.recent(limit)
    }

    /// Number of records currently in the history log.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Lazy enumeration of all entities in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.store.iter()
    }

    /// All entities ordered for statistics display: call count descending,
    /// then identity ascending.
    #[must_use]
    pub fn statistics(&self) -> Vec<&Entity> {
        let mut ordered: Vec<&Entity> = self.store.iter().collect();
        ordered.sort_by(|a, b| {
            b.call_count
                .cmp(&a.call_count)
                .then_with(|| a.identity.cmp(&b.identity))
        });
        ordered
    }

    /// Distinct group keys with member counts, ordered by key.
    #[must_use]
    pub fn groups(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for entity in self.store.iter() {
            *counts.entry(entity.group.as_str()).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(key, count)| (key.to_string(), count))
            .collect()
    }

    /// Number of entities on the roster.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Whether the roster holds no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Sum of every entity's call counter.
    #[must_use]
    pub fn total_calls(&self) -> u64 {
        self.store.total_calls()
    }

    /// Handles still pending in a scope's current cycle (diagnostic).
    #[must_use]
    pub fn pending(&self, scope: &Scope) -> usize {
        self.pools.pending(scope)
    }
}

impl Default for RosterManager {
    fn default() -> Self {
        Self::new()
    }
}
