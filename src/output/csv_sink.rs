// src/output/csv_sink.rs
//! CSV output. The whole dataset is written once, after the last page.

use super::{ensure_parent_dir, RecordSink, SinkSummary};
use crate::error::AppError;
use crate::model::{FeedbackRecord, ATTACHMENT_URL_FIELD, ERS_FILE_NAME_FIELD};
use indexmap::IndexSet;
use serde_json::Value;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Accumulates every page in memory and writes the CSV file in `finish`.
///
/// Nothing touches the filesystem until `finish`, so an interrupted run
/// leaves no partial file behind.
#[derive(Debug)]
pub struct CsvSink {
    path: PathBuf,
    records: Vec<FeedbackRecord>,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            records: Vec::new(),
        }
    }

    /// Records accumulated so far, in page order.
    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }
}

impl RecordSink for CsvSink {
    fn begin(&mut self) -> Result<(), AppError> {
        log::debug!("CSV output will be written to {}", self.path.display());
        Ok(())
    }

    fn write_page(&mut self, _page: u32, records: Vec<FeedbackRecord>) -> Result<(), AppError> {
        self.records.extend(records);
        Ok(())
    }

    fn finish(&mut self) -> Result<SinkSummary, AppError> {
        let written = write_csv(&self.records, &self.path)?;
        log::info!("Wrote {} records to {}", written, self.path.display());
        Ok(SinkSummary {
            destination: self.path.clone(),
            records_written: written,
        })
    }
}

/// Column header for a dataset.
///
/// Starts from the first record's keys, forces both attachment fields, then
/// adds keys that only later records carry, in order of first appearance.
/// Returns `None` for an empty dataset.
pub fn csv_header(records: &[FeedbackRecord]) -> Option<Vec<String>> {
    let first = records.first()?;

    let mut header: IndexSet<&str> = first.keys().collect();
    header.insert(ATTACHMENT_URL_FIELD);
    header.insert(ERS_FILE_NAME_FIELD);
    for record in &records[1..] {
        header.extend(record.keys());
    }

    Some(header.into_iter().map(str::to_string).collect())
}

/// Text of one CSV cell. Null and missing values are empty.
pub fn render_cell(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Writes header and rows; fails on an empty dataset without creating a file.
fn write_csv(records: &[FeedbackRecord], path: &Path) -> Result<usize, AppError> {
    let header = csv_header(records).ok_or(AppError::EmptyDataset)?;

    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(
            header
                .iter()
                .map(|column| render_cell(record.get(column)).into_owned()),
        )?;
    }
    writer.flush()?;

    Ok(records.len())
}
