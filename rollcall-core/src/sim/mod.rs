//! Sim - Deterministic Testing Support
//!
//! Seeded randomness, simulated time, and a property-test runner in the
//! TigerBeetle/FoundationDB style: every run is reproducible from one seed.
//!
//! The pool engine owns a [`DeterministicRng`] in production too - entropy
//! seeded at construction, never reseeded - so a failing sequence can be
//! replayed by constructing the manager with the logged seed
//! (`RosterManager::with_seed`).

mod clock;
mod property;
mod rng;

pub use clock::SimClock;
pub use property::{
    run_property_tests, test_seeds, PropertyTest, PropertyTestFailure, PropertyTestResult,
    PropertyTestable,
};
pub use rng::DeterministicRng;
