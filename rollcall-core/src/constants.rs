//! TigerStyle Constants
//!
//! All limits use big-endian naming: CATEGORY_SPECIFICS_UNIT_LIMIT
//! Example: ROSTER_IDENTITY_BYTES_MAX (not MAX_IDENTITY_SIZE)
//!
//! Every constant includes units in the name:
//! - _BYTES_MAX for size limits
//! - _COUNT_MAX for quantity limits
//! - _MS for milliseconds

// =============================================================================
// Roster Limits
// =============================================================================

/// Maximum length of an entity identity key
pub const ROSTER_IDENTITY_BYTES_MAX: usize = 256;

/// Maximum length of a group key
pub const ROSTER_GROUP_BYTES_MAX: usize = 128;

/// Maximum number of entities in one store
pub const ROSTER_ENTITIES_COUNT_MAX: usize = 100_000;

// =============================================================================
// Import Limits
// =============================================================================

/// Maximum length of a single import line
pub const IMPORT_LINE_BYTES_MAX: usize = 4096;

/// First non-whitespace character marking a comment line
pub const IMPORT_COMMENT_MARKER: char = '#';

/// Field delimiter between identity and group
pub const IMPORT_FIELD_DELIMITER: char = ',';

// =============================================================================
// Simulation Limits
// =============================================================================

/// Maximum number of operations in one property test run
pub const SIM_OPERATIONS_COUNT_MAX: u64 = 1_000_000;

/// Maximum time advance per simulation step in milliseconds
pub const SIM_TIME_ADVANCE_MS_MAX: u64 = 86_400_000; // 24 hours

// =============================================================================
// Time Constants
// =============================================================================

/// Milliseconds per second
pub const TIME_MS_PER_SEC: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_limits_valid() {
        assert!(ROSTER_IDENTITY_BYTES_MAX > 0);
        assert!(ROSTER_GROUP_BYTES_MAX > 0);
        assert!(ROSTER_ENTITIES_COUNT_MAX > 0);
    }

    #[test]
    fn test_import_limits_valid() {
        // A maximal identity and group must fit on one line
        assert!(IMPORT_LINE_BYTES_MAX > ROSTER_IDENTITY_BYTES_MAX + ROSTER_GROUP_BYTES_MAX);
        assert_ne!(IMPORT_COMMENT_MARKER, IMPORT_FIELD_DELIMITER);
    }
}
