//! Roster - Entities, Pools, History, and the Manager Facade
//!
//! The roster is four cooperating parts:
//!
//! - [`EntityStore`]: authoritative arena of entities, unique by identity
//! - [`PoolEngine`]: per-scope sampling-without-replacement queues, derived
//!   from store membership and rebuilt wholesale
//! - [`HistoryLog`]: append-only record of every successful draw
//! - [`RosterManager`]: the single entry point that keeps counters, pools,
//!   and history moving together
//!
//! The bulk loader ([`import_lines`], [`import_file`]) feeds the store from
//! line-oriented text without ever aborting a batch.

pub mod entity;
pub mod history;
pub mod import;
pub mod manager;
pub mod pool;

pub use entity::{Entity, EntityHandle, EntityStore};
pub use history::{CallRecord, HistoryLog};
pub use import::{import_file, import_lines, ImportError, ImportStats};
pub use manager::RosterManager;
pub use pool::{PoolEngine, Scope};
