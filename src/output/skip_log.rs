// src/output/skip_log.rs
//! Append-only record of pages that could not be fetched.

use super::ensure_parent_dir;
use crate::error::AppError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Skipped page indices, one per line, for manual follow-up.
///
/// The file is opened for each entry so every skip is on disk before the
/// next request goes out. Earlier runs' entries are kept.
#[derive(Debug)]
pub struct SkipLog {
    path: PathBuf,
    skipped: Vec<u32>,
}

impl SkipLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            skipped: Vec::new(),
        }
    }

    /// Appends a page index to the file.
    pub fn record(&mut self, page: u32) -> Result<(), AppError> {
        ensure_parent_dir(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", page)?;
        self.skipped.push(page);
        Ok(())
    }

    /// Pages skipped during this run.
    pub fn skipped(&self) -> &[u32] {
        &self.skipped
    }
}
