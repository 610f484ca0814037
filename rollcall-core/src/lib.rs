//! Rollcall Core - Fair Random Selection over a Roster
//!
//! TigerStyle simulation-first roster engine for no-repeat random calling.
//!
//! # Philosophy
//!
//! Rollcall is built simulation-first:
//! 1. Every draw goes through one injectable, seeded RNG
//! 2. Time is injectable, so history timestamps are testable
//! 3. Seeds are logged for reproducibility
//! 4. Invariants are checked by property tests over random operation
//!    sequences, not just example-based tests
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Roster Manager                 │
//! ├─────────────────────────────────────────────┤
//! │  Entity Store    │ Identities + counters    │
//! │  Pool Engine     │ No-repeat draw queues    │
//! │  History Log     │ Append-only draw record  │
//! ├─────────────────────────────────────────────┤
//! │  Sim Framework   │ Seeded RNG + sim clock   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rollcall_core::{RosterManager, Scope};
//!
//! let mut roster = RosterManager::with_seed(42);
//! roster.import_lines(["Alice,A1", "Bob,A1", "Carol,A2"]);
//!
//! // Within one cycle, no entity repeats before all are drawn.
//! let first = roster.draw(&Scope::Global).unwrap();
//! let second = roster.draw(&Scope::Global).unwrap();
//! assert_ne!(first.identity, second.identity);
//!
//! // Scoped draws only ever see the group's members.
//! let scoped = roster.draw(&Scope::group("A2")).unwrap();
//! assert_eq!(scoped.identity, "Carol");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod roster;
pub mod sim;

// Re-export common types
pub use constants::*;
pub use roster::{
    import_file, import_lines, CallRecord, Entity, EntityHandle, EntityStore, HistoryLog,
    ImportError, ImportStats, PoolEngine, RosterManager, Scope,
};
pub use sim::{
    run_property_tests, test_seeds, DeterministicRng, PropertyTest, PropertyTestFailure,
    PropertyTestResult, PropertyTestable, SimClock,
};
