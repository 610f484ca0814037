//! Property-Based Testing
//!
//! TigerStyle: Random operation sequences with invariant checking.
//!
//! # Philosophy
//!
//! Property-based testing generates random operations and verifies that
//! invariants hold after each operation. Combined with the deterministic
//! RNG and simulated clock this gives:
//! - Deterministic reproduction via seed
//! - Time control via `SimClock`
//!
//! The roster invariants (unique identities, counter/history consistency,
//! no repeat before a scope exhausts) are checked this way in
//! `roster::manager`.
//!
//! # Example
//!
//! ```rust,ignore
//! use rollcall_core::sim::{DeterministicRng, PropertyTest, PropertyTestable, SimClock};
//!
//! struct Model { manager: RosterManager, expected_calls: u64 }
//!
//! #[derive(Debug, Clone)]
//! enum Op { Insert(String, String), DrawGlobal, ResetCycle }
//!
//! impl PropertyTestable for Model {
//!     type Operation = Op;
//!
//!     fn generate_operation(&self, rng: &mut DeterministicRng) -> Op {
//!         match rng.next_usize(0, 2) {
//!             0 => Op::Insert(format!("e{}", rng.next_usize(0, 9)), "g0".into()),
//!             1 => Op::DrawGlobal,
//!             _ => Op::ResetCycle,
//!         }
//!     }
//!
//!     fn apply_operation(&mut self, op: &Op, clock: &SimClock) { /* drive the manager */ }
//!
//!     fn check_invariants(&self) -> Result<(), String> {
//!         if self.manager.total_calls() != self.expected_calls {
//!             return Err("counter drift".into());
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[test]
//! fn roster_holds_invariants() {
//!     let result = PropertyTest::new(42).with_max_operations(1000).run(model);
//!     assert!(result.is_success());
//! }
//! ```

use std::fmt::Debug;

use super::clock::SimClock;
use super::rng::DeterministicRng;
use crate::constants::SIM_OPERATIONS_COUNT_MAX;

/// Milliseconds of simulated time that may pass between two operations.
const STEP_TIME_ADVANCE_MS_MAX: usize = 1000;

/// Trait for systems that can be property-tested.
///
/// TigerStyle: Explicit operation generation and invariant checking.
pub trait PropertyTestable {
    /// The type of operations that can be performed.
    type Operation: Debug + Clone;

    /// Generate a random operation based on current state.
    ///
    /// The operation should be valid for the current state.
    fn generate_operation(&self, rng: &mut DeterministicRng) -> Self::Operation;

    /// Apply an operation to the state.
    ///
    /// May use the clock for time-dependent operations.
    fn apply_operation(&mut self, op: &Self::Operation, clock: &SimClock);

    /// Check that all invariants hold.
    ///
    /// Returns Ok(()) if all invariants pass, Err(message) otherwise.
    fn check_invariants(&self) -> Result<(), String>;

    /// Optional: Describe the current state for debugging.
    fn describe_state(&self) -> String {
        String::from("(state description not implemented)")
    }
}

/// Result of a property test run.
#[derive(Debug)]
pub struct PropertyTestResult {
    /// Number of operations successfully executed
    pub operations_executed: u64,
    /// Seed used for reproduction
    pub seed: u64,
    /// Failure details, if any
    pub failure: Option<PropertyTestFailure>,
}

impl PropertyTestResult {
    /// Check if the test passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Check if the test failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }

    /// Unwrap the result, panicking with details if failed.
    ///
    /// # Panics
    /// Panics if the test failed, with reproduction info.
    pub fn unwrap(self) {
        if let Some(failure) = self.failure {
            panic!(
                "Property test failed!\n\
                 Seed: {} (use this to reproduce)\n\
                 Operation #{}: {:?}\n\
                 Invariant violation: {}\n\
                 State: {}",
                self.seed,
                failure.operation_index,
                failure.operation,
                failure.message,
                failure.state_description
            );
        }
    }
}

/// Details of a property test failure.
#[derive(Debug)]
pub struct PropertyTestFailure {
    /// Index of the failing operation (0-based)
    pub operation_index: u64,
    /// The operation that caused the failure
    pub operation: String,
    /// The invariant violation message
    pub message: String,
    /// Description of the state at failure
    pub state_description: String,
}

/// Property-based test runner.
///
/// TigerStyle:
/// - Deterministic via seed
/// - Explicit operation count limits
/// - Invariant checking after each operation
///
/// Simulated time advances by a random amount (up to one second) before
/// roughly half of the operations, so timestamp-dependent state is
/// exercised without a separate configuration surface.
#[derive(Debug)]
pub struct PropertyTest {
    seed: u64,
    max_operations: u64,
}

impl PropertyTest {
    /// Create a new property test with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            max_operations: 100, // Sensible default
        }
    }

    /// Set the maximum number of operations to run.
    ///
    /// # Panics
    /// Panics if max exceeds `SIM_OPERATIONS_COUNT_MAX`.
    #[must_use]
    pub fn with_max_operations(mut self, max: u64) -> Self {
        assert!(
            max <= SIM_OPERATIONS_COUNT_MAX,
            "max_operations {} exceeds SIM_OPERATIONS_COUNT_MAX {}",
            max,
            SIM_OPERATIONS_COUNT_MAX
        );
        self.max_operations = max;
        self
    }

    /// Run the property test.
    ///
    /// Generates random operations, applies them, and checks invariants
    /// after each operation. Returns detailed results.
    #[must_use]
    pub fn run<T: PropertyTestable>(self, mut state: T) -> PropertyTestResult {
        let mut rng = DeterministicRng::new(self.seed);
        let clock = SimClock::new();

        // Check initial invariants
        if let Err(msg) = state.check_invariants() {
            return PropertyTestResult {
                operations_executed: 0,
                seed: self.seed,
                failure: Some(PropertyTestFailure {
                    operation_index: 0,
                    operation: "(initial state)".to_string(),
                    message: format!("Initial state violates invariants: {}", msg),
                    state_description: state.describe_state(),
                }),
            };
        }

        for i in 0..self.max_operations {
            // Maybe advance time
            if rng.next_bool(0.5) {
                let advance = rng.next_usize(0, STEP_TIME_ADVANCE_MS_MAX) as u64;
                clock.advance_ms(advance);
            }

            // Generate and apply operation
            let op = state.generate_operation(&mut rng);
            let op_debug = format!("{:?}", op);
            state.apply_operation(&op, &clock);

            // Check invariants
            if let Err(msg) = state.check_invariants() {
                return PropertyTestResult {
                    operations_executed: i + 1,
                    seed: self.seed,
                    failure: Some(PropertyTestFailure {
                        operation_index: i,
                        operation: op_debug,
                        message: msg,
                        state_description: state.describe_state(),
                    }),
                };
            }
        }

        PropertyTestResult {
            operations_executed: self.max_operations,
            seed: self.seed,
            failure: None,
        }
    }

    /// Run the property test, panicking on failure.
    ///
    /// Convenience method for use in #[test] functions.
    ///
    /// # Panics
    /// Panics if any invariant is violated.
    pub fn run_and_assert<T: PropertyTestable>(self, state: T) {
        self.run(state).unwrap();
    }
}

/// Run multiple property tests with different seeds.
///
/// TigerStyle: Multi-seed testing for broader coverage.
///
/// # Panics
/// Panics if any test fails.
pub fn run_property_tests<T, F>(seeds: &[u64], max_operations: u64, state_factory: F)
where
    T: PropertyTestable,
    F: Fn() -> T,
{
    for &seed in seeds {
        let state = state_factory();
        PropertyTest::new(seed)
            .with_max_operations(max_operations)
            .run_and_assert(state);
    }
}

/// Generate a set of test seeds including edge cases.
///
/// Returns seeds: [0, 1, 42, random, random, ...]
#[must_use]
pub fn test_seeds(count: usize) -> Vec<u64> {
    assert!(count >= 3, "need at least 3 seeds for edge cases");

    let mut seeds = vec![0, 1, 42]; // Edge cases + common test seed

    let time_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(12345);
    let mut rng = DeterministicRng::new(time_seed);

    while seeds.len() < count {
        seeds.push(rng.next_u64());
    }

    seeds
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simple counter for testing the property test framework itself.
    struct BoundedCounter {
        value: i64,
        min: i64,
        max: i64,
    }

    #[derive(Debug, Clone)]
    enum CounterOp {
        Increment(i64),
        Decrement(i64),
        Reset,
    }

    impl PropertyTestable for BoundedCounter {
        type Operation = CounterOp;

        fn generate_operation(&self, rng: &mut DeterministicRng) -> Self::Operation {
            match rng.next_usize(0, 3) {
                0 => CounterOp::Increment(rng.next_usize(1, 20) as i64),
                1 => CounterOp::Decrement(rng.next_usize(1, 20) as i64),
                _ => CounterOp::Reset,
            }
        }

        fn apply_operation(&mut self, op: &Self::Operation, _clock: &SimClock) {
            match op {
                CounterOp::Increment(n) => {
                    self.value = (self.value + n).min(self.max);
                }
                CounterOp::Decrement(n) => {
                    self.value = (self.value - n).max(self.min);
                }
                CounterOp::Reset => {
                    self.value = 0;
                }
            }
        }

        fn check_invariants(&self) -> Result<(), String> {
            if self.value < self.min {
                return Err(format!("value {} below min {}", self.value, self.min));
            }
            if self.value > self.max {
                return Err(format!("value {} above max {}", self.value, self.max));
            }
            Ok(())
        }

        fn describe_state(&self) -> String {
            format!(
                "BoundedCounter {{ value: {}, min: {}, max: {} }}",
                self.value, self.min, self.max
            )
        }
    }

    #[test]
    fn test_property_test_success() {
        let counter = BoundedCounter {
            value: 0,
            min: -100,
            max: 100,
        };

        let result = PropertyTest::new(42).with_max_operations(1000).run(counter);

        assert!(result.is_success());
        assert_eq!(result.operations_executed, 1000);
        assert_eq!(result.seed, 42);
    }

    #[test]
    fn test_property_test_determinism() {
        // Same seed should produce same results
        let run1 = PropertyTest::new(12345)
            .with_max_operations(100)
            .run(BoundedCounter {
                value: 0,
                min: -50,
                max: 50,
            });

        let run2 = PropertyTest::new(12345)
            .with_max_operations(100)
            .run(BoundedCounter {
                value: 0,
                min: -50,
                max: 50,
            });

        assert_eq!(run1.operations_executed, run2.operations_executed);
        assert_eq!(run1.is_success(), run2.is_success());
    }

    /// Buggy counter that doesn't clamp properly - should fail.
    struct BuggyCounter {
        value: i64,
        max: i64,
    }

    #[derive(Debug, Clone)]
    enum BuggyOp {
        Add(i64),
    }

    impl PropertyTestable for BuggyCounter {
        type Operation = BuggyOp;

        fn generate_operation(&self, rng: &mut DeterministicRng) -> Self::Operation {
            BuggyOp::Add(rng.next_usize(1, 50) as i64)
        }

        fn apply_operation(&mut self, op: &Self::Operation, _clock: &SimClock) {
            match op {
                BuggyOp::Add(n) => {
                    // Bug: doesn't clamp to max!
                    self.value += n;
                }
            }
        }

        fn check_invariants(&self) -> Result<(), String> {
            if self.value > self.max {
                return Err(format!("value {} exceeds max {}", self.value, self.max));
            }
            Ok(())
        }

        fn describe_state(&self) -> String {
            format!(
                "BuggyCounter {{ value: {}, max: {} }}",
                self.value, self.max
            )
        }
    }

    #[test]
    fn test_property_test_catches_bug() {
        let counter = BuggyCounter { value: 0, max: 100 };

        let result = PropertyTest::new(42).with_max_operations(1000).run(counter);

        assert!(result.is_failure());
        let failure = result.failure.unwrap();
        assert!(failure.message.contains("exceeds max"));
    }

    #[test]
    fn test_initial_invariant_check() {
        // State that starts invalid
        let bad_counter = BoundedCounter {
            value: 200, // Exceeds max!
            min: -100,
            max: 100,
        };

        let result = PropertyTest::new(42).run(bad_counter);

        assert!(result.is_failure());
        assert!(result
            .failure
            .unwrap()
            .message
            .contains("Initial state violates"));
    }

    #[test]
    fn test_test_seeds() {
        let seeds = test_seeds(10);
        assert_eq!(seeds.len(), 10);
        assert_eq!(seeds[0], 0); // Edge case
        assert_eq!(seeds[1], 1); // Edge case
        assert_eq!(seeds[2], 42); // Common test seed
    }

    #[test]
    fn test_run_property_tests_helper() {
        run_property_tests(&[0, 1, 42], 100, || BoundedCounter {
            value: 0,
            min: -100,
            max: 100,
        });
    }
}
