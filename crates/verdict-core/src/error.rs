//! Error types for the engine.

use chrono::NaiveDate;
use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum VerdictError {
    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Errors raised while constructing a price series.
///
/// These are caller contract violations: the engine never produces them
/// for short or noisy data, only for input it cannot order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Non-chronological input at index {index}: {current} does not follow {previous}")]
    NonChronological {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
}

/// Series source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Duplicate session date: {0}")]
    DuplicateDate(NaiveDate),

    #[error("Invalid series: {0}")]
    Series(#[from] SeriesError),
}

/// Engine configuration and evaluation errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for engine operations.
pub type VerdictResult<T> = Result<T, VerdictError>;
