//! Centralized error handling for abl_stats
//!
//! Every fallible operation in the crate returns [`Result`], whose error side is
//! the single [`AblStatsError`] enum. Errors are fatal to the query that raised
//! them; nothing is retried and no partial result is returned.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for abl_stats operations
#[derive(Debug, Error)]
pub enum AblStatsError {
    /// The statistics file does not exist or could not be opened
    #[error("Cannot open statistics file '{}': {reason}", path.display())]
    NotFound { path: PathBuf, reason: String },

    /// Required fields or coordinates are missing or misshapen
    #[error("Schema error: {0}")]
    Schema(String),

    /// The time window selected no stored samples
    #[error("Time window [{start}, {end}] contains no samples")]
    EmptyWindow { start: f64, end: f64 },

    /// The time window spans zero elapsed time
    #[error("Time window [{start}, {end}] spans zero elapsed time")]
    DegenerateWindow { start: f64, end: f64 },

    /// Component index beyond the trailing dimension of a field
    #[error("Component {index} out of range for field '{field}' with {components} components")]
    ComponentOutOfRange {
        field: String,
        index: usize,
        components: usize,
    },

    /// Interpolation requested outside the stored height range
    #[error("Height {height} outside interpolation range [{min}, {max}]")]
    OutOfDomain { height: f64, min: f64, max: f64 },

    /// NetCDF library errors after the file was opened
    #[error("NetCDF error: {0}")]
    NetCDF(#[from] netcdf::Error),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Array shape or dimension error
    #[error("Array error: {0}")]
    Array(#[from] ndarray::ShapeError),

    /// Plot rendering errors
    #[error("Plot error: {0}")]
    Plot(String),
}

impl AblStatsError {
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }
}

/// Result type alias for abl_stats operations
pub type Result<T> = std::result::Result<T, AblStatsError>;
