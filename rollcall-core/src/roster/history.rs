//! History Log - Append-Only Record of Draws
//!
//! TigerStyle: One-way log, independent lifecycle.
//!
//! Every successful draw appends one record. The log never references pool
//! state and pool state never references the log; clearing one leaves the
//! other untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One successful draw: who, which group, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Identity of the drawn entity
    pub identity: String,
    /// Group of the drawn entity at the time of the draw
    pub group: String,
    /// Instant of the draw, milliseconds since the Unix epoch
    pub called_at_ms: u64,
}

impl CallRecord {
    /// Create a record for one draw.
    #[must_use]
    pub fn new(identity: impl Into<String>, group: impl Into<String>, called_at_ms: u64) -> Self {
        Self {
            identity: identity.into(),
            group: group.into(),
            called_at_ms,
        }
    }

    /// Instant of the draw as a UTC timestamp.
    #[must_use]
    pub fn called_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.called_at_ms as i64)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }
}

/// Append-only, occurrence-ordered log of draws.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Vec<CallRecord>,
}

impl HistoryLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. O(1) amortized.
    pub fn append(&mut self, record: CallRecord) {
        self.records.push(record);
    }

    /// The `limit` most recent records, most-recent-first.
    ///
    /// A limit of zero returns all records. The iterator is lazy and
    /// restartable.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &CallRecord> {
        let take = if limit == 0 { self.records.len() } else { limit };
        self.records.iter().rev().take(take)
    }

    /// Empty the log. Counters and pools are unaffected.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log_with(names: &[&str]) -> HistoryLog {
        let mut log = HistoryLog::new();
        for (i, name) in names.iter().enumerate() {
            log.append(CallRecord::new(*name, "G", i as u64 * 1000));
        }
        log
    }

    #[test]
    fn test_recent_most_recent_first_with_limit() {
        let log = log_with(&["D1", "D2", "D3"]);

        let names: Vec<&str> = log.recent(2).map(|r| r.identity.as_str()).collect();

        assert_eq!(names, vec!["D3", "D2"]);
    }

    #[test]
    fn test_recent_zero_limit_returns_all() {
        let log = log_with(&["D1", "D2", "D3"]);

        let names: Vec<&str> = log.recent(0).map(|r| r.identity.as_str()).collect();

        assert_eq!(names, vec!["D3", "D2", "D1"]);
    }

    #[test]
    fn test_recent_limit_beyond_len() {
        let log = log_with(&["D1"]);
        assert_eq!(log.recent(10).count(), 1);
    }

    #[test]
    fn test_recent_is_restartable() {
        let log = log_with(&["D1", "D2"]);
        assert_eq!(log.recent(0).count(), 2);
        assert_eq!(log.recent(0).count(), 2);
    }

    #[test]
    fn test_clear_empties_log() {
        let mut log = log_with(&["D1", "D2"]);

        log.clear();

        assert!(log.is_empty());
        assert_eq!(log.recent(0).count(), 0);
    }

    #[test]
    fn test_called_at_conversion() {
        let record = CallRecord::new("Alice", "A1", 1_000);
        assert_eq!(record.called_at(), DateTime::from_timestamp(1, 0).unwrap());
    }
}
