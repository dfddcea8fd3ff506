//! Error type for the I/O boundary (loading scenarios and configs)
//!
//! The calculation pipeline itself never fails; only reading and decoding
//! caller-supplied files can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },
}

pub type LeaseResult<T> = Result<T, LeaseError>;
