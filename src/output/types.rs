// src/output/types.rs
//! Type definitions for output operations.

use std::fmt;
use std::path::PathBuf;

/// What to do when the database already holds the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TablePolicy {
    /// The table must not exist yet.
    #[default]
    Fresh,
    /// Create the table if absent and insert into it.
    Append,
    /// Drop the table if present and create it again.
    Replace,
}

impl fmt::Display for TablePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fresh => write!(f, "fresh"),
            Self::Append => write!(f, "append"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// What a sink produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSummary {
    pub destination: PathBuf,
    pub records_written: usize,
}
