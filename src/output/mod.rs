// src/output/mod.rs
//! Local persistence of harvested records.
//!
//! Sinks receive normalized records one page at a time. What they do with a
//! page differs: the CSV sink holds everything until `finish`, the SQLite
//! sink commits each page as it arrives.

mod csv_sink;
mod skip_log;
mod sqlite_sink;
mod types;

pub use csv_sink::{csv_header, render_cell, CsvSink};
pub use skip_log::SkipLog;
pub use sqlite_sink::{to_sql_value, SqliteSink};
pub use types::{SinkSummary, TablePolicy};

use crate::error::AppError;
use crate::model::FeedbackRecord;
use std::fs;
use std::path::Path;

/// A destination for normalized feedback records.
pub trait RecordSink {
    /// Prepares the destination before the first page.
    fn begin(&mut self) -> Result<(), AppError>;

    /// Accepts the normalized records of one page, in page order.
    fn write_page(&mut self, page: u32, records: Vec<FeedbackRecord>) -> Result<(), AppError>;

    /// Completes the destination after the last page.
    fn finish(&mut self) -> Result<SinkSummary, AppError>;
}

/// Creates the parent directory of `path` if needed.
fn ensure_parent_dir(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            log::debug!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
