//! Error types for the fts_forecast crate

use fts_math::MathError;
use thiserror::Error;

/// Custom error types for the fts_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// The series is empty, too short or holds non-finite values
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A value fell outside every fuzzy set. The interval set was built
    /// with too little padding; this is a construction defect.
    #[error("Value {value} at index {index} is not covered by any fuzzy set")]
    UnclassifiedValue { index: usize, value: f64 },

    /// Not enough defined predictions or observations to compute a result
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// A date or value in the input data could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV reading
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InvalidInput(msg) => ForecastError::InvalidInput(msg),
        }
    }
}

impl From<csv::Error> for ForecastError {
    fn from(err: csv::Error) -> Self {
        ForecastError::CsvError(err.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::SerializationError(err.to_string())
    }
}
