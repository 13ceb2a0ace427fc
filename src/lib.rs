// src/lib.rs
//! brp-feedback library: harvests public feedback from the EC "Have your say"
//! portal into CSV or SQLite.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `HarvestConfig`
//! - **Domain model**: `RawFeedback`, `FeedbackRecord`, `normalize`
//! - **API client**: `FeedbackSource`, `FeedbackHttpClient`
//! - **Harvest loop**: `Harvester`, `HarvestPlan`, `HarvestReport`
//! - **Output**: `RecordSink`, `CsvSink`, `SqliteSink`, `SkipLog`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod harvest;
pub mod model;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::AppError;
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, HarvestConfig, OutputFormat};

// --- Domain Model ---
pub use crate::model::{normalize, FeedbackRecord, RawFeedback, FEEDBACK_COLUMNS};

// --- Domain Types ---
pub use crate::types::{PageSize, PublicationId, TableName, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    ClientSettings, FeedbackHttpClient, FeedbackSource, PageDiscovery, PageFetch,
};

// --- Harvest Loop ---
pub use crate::harvest::{HarvestPlan, HarvestReport, Harvester, PausePolicy};

// --- Output ---
pub use crate::output::{CsvSink, RecordSink, SinkSummary, SkipLog, SqliteSink, TablePolicy};
