//! Bulk Loader - Line-Oriented Roster Import
//!
//! TigerStyle: Classify every line, abort nothing.
//!
//! Each line is either skipped (blank, comment), malformed (no delimiter,
//! empty field, over-limit field), a duplicate, or an addition. Malformed
//! lines and duplicates are counted and never stop the remaining import.
//! Only an inaccessible source is an error, and it is reported distinctly
//! from a successful zero-line import.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::EntityStore;
use crate::constants::{
    IMPORT_COMMENT_MARKER, IMPORT_FIELD_DELIMITER, IMPORT_LINE_BYTES_MAX, ROSTER_GROUP_BYTES_MAX,
    ROSTER_IDENTITY_BYTES_MAX,
};

/// Errors from the bulk loader.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The line source could not be opened
    #[error("roster source not found: {path}")]
    SourceNotFound {
        /// Path that failed to open
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The line source failed mid-read
    #[error("roster source unreadable: {path}")]
    SourceRead {
        /// Path that failed during reading
        path: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}

/// Outcome counts for one bulk-load call. Transient, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    /// Lines that inserted a new entity
    pub added: usize,
    /// Lines whose identity was already present
    pub duplicates: usize,
    /// Lines missing the delimiter, with an empty field, or over limits
    pub malformed: usize,
}

/// How one input line was classified.
#[derive(Debug, PartialEq, Eq)]
enum LineClass<'a> {
    /// Blank or comment; not counted
    Skip,
    /// Unusable record; counted
    Malformed,
    /// Trimmed (identity, group) fields ready for insertion
    Record(&'a str, &'a str),
}

fn classify(line: &str) -> LineClass<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(IMPORT_COMMENT_MARKER) {
        return LineClass::Skip;
    }
    if trimmed.len() > IMPORT_LINE_BYTES_MAX {
        return LineClass::Malformed;
    }

    // Split once: group keys may not contain the delimiter, identities may
    // not either, so everything after the first delimiter is the group.
    let Some((identity, group)) = trimmed.split_once(IMPORT_FIELD_DELIMITER) else {
        return LineClass::Malformed;
    };

    let identity = identity.trim();
    let group = group.trim();
    if identity.is_empty() || group.is_empty() {
        return LineClass::Malformed;
    }
    // Over-limit fields would trip store preconditions; classify instead
    if identity.len() > ROSTER_IDENTITY_BYTES_MAX || group.len() > ROSTER_GROUP_BYTES_MAX {
        return LineClass::Malformed;
    }

    LineClass::Record(identity, group)
}

/// Load line-oriented records into the store.
///
/// Pool invalidation is suppressed per line; the caller performs one
/// batched invalidation after the import (see `RosterManager`).
pub fn import_lines<I, S>(store: &mut EntityStore, lines: I) -> ImportStats
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut stats = ImportStats::default();

    for line in lines {
        match classify(line.as_ref()) {
            LineClass::Skip => {}
            LineClass::Malformed => stats.malformed += 1,
            LineClass::Record(identity, group) => {
                if store.insert(identity, group) {
                    stats.added += 1;
                } else {
                    stats.duplicates += 1;
                }
            }
        }
    }

    stats
}

/// Load records from a file, one per line.
///
/// # Errors
/// Returns [`ImportError::SourceNotFound`] if the file cannot be opened and
/// [`ImportError::SourceRead`] if a line cannot be read. An empty file is a
/// success with all-zero stats.
pub fn import_file(store: &mut EntityStore, path: impl AsRef<Path>) -> Result<ImportStats, ImportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ImportError::SourceNotFound {
        path: path.display().to_string(),
        source,
    })?;

    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line.map_err(|source| ImportError::SourceRead {
            path: path.display().to_string(),
            source,
        })?;
        lines.push(line);
    }

    Ok(import_lines(store, lines))
}
