// src/error.rs
//! Application error types with structured error handling.
//!
//! A skipped page is not an error: page-level HTTP failures are recorded in
//! the skip log and never reach this type. Everything here aborts the run.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Malformed response from {url}: {reason}\nBody: {preview}")]
    MalformedResponse {
        url: String,
        reason: String,
        preview: String,
    },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Page {page} has a record without an integer id; nothing from it was stored")]
    MissingKey { page: u32 },

    #[error("No feedback records were harvested; refusing to write an empty CSV file")]
    EmptyDataset,

    #[error("Table '{table}' already exists in {}; use --append or --replace", .path.display())]
    DestinationExists { table: String, path: PathBuf },

    #[error(transparent)]
    ValidationError(#[from] crate::types::ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ValidationError;

    #[test]
    fn test_destination_exists_message() {
        let err = AppError::DestinationExists {
            table: "feedback".to_string(),
            path: PathBuf::from("out/feedback.db"),
        };
        assert_eq!(
            err.to_string(),
            "Table 'feedback' already exists in out/feedback.db; use --append or --replace"
        );
    }

    #[test]
    fn test_validation_errors_are_transparent() {
        let err: AppError = ValidationError::EmptyField("publication_id").into();
        assert_eq!(err.to_string(), "Empty required field: publication_id");
    }
}
