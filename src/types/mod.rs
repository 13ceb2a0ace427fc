use thiserror::Error;

mod domain_types;
mod ids;

pub use domain_types::*;
pub use ids::*;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("Invalid publication ID: {0}")]
    InvalidPublicationId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Empty required field: {0}")]
    EmptyField(&'static str),

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },

    #[error("Invalid table name: {name} - {reason}")]
    InvalidTableName { name: String, reason: String },

    #[error("Invalid pause range: {min_ms}ms..={max_ms}ms")]
    InvalidPauseRange { min_ms: u64, max_ms: u64 },
}
