//! Error types for grid loading and lookup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or querying a datum shift grid.
///
/// The loader aborts the whole grid load on the first structural error:
/// a partially populated grid silently returning NaN for legitimate
/// cells would be worse than an explicit failure.
#[derive(Debug, Error)]
pub enum GridError {
    /// End of stream reached before the header was complete.
    #[error("Unexpected end of file while reading the header of '{}'", path.display())]
    UnexpectedEof { path: PathBuf },

    /// The mandatory geometry header line is absent or unusable.
    #[error("Cannot parse '{}': missing or malformed GR3D1 geometry line", path.display())]
    MalformedHeader { path: PathBuf },

    /// A data line ended before all required values were read.
    #[error("Line {line} of '{}' does not contain enough values", path.display())]
    TruncatedLine { path: PathBuf, line: u64 },

    /// A token could not be parsed as a number.
    #[error("Line {line} of '{}': cannot parse '{token}' as a number", path.display())]
    InvalidNumber {
        path: PathBuf,
        line: u64,
        token: String,
    },

    /// A data line maps outside the declared grid extent.
    #[error("Value {value} for {axis} is out of range [{min}, {max}] in '{}'", path.display())]
    ValueOutOfRange {
        path: PathBuf,
        axis: char,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Two data lines target the same grid cell.
    #[error("Grid cell for ({x}, {y}) is defined more than once in '{}'", path.display())]
    DuplicateCell { path: PathBuf, x: f64, y: f64 },

    /// The declared extent and spacing yield no usable cell count.
    #[error(
        "Invalid grid geometry in '{}': extent [{min}, {max}] with spacing {step} on the {axis} axis",
        path.display()
    )]
    InvalidGeometry {
        path: PathBuf,
        axis: char,
        min: f64,
        max: f64,
        step: f64,
    },

    /// The cell count overflows addressable storage.
    #[error("Grid in '{}' is too large ({nx} x {ny} cells)", path.display())]
    GridTooLarge {
        path: PathBuf,
        nx: usize,
        ny: usize,
    },

    /// An I/O failure while reading the grid file.
    #[error("I/O error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be stored in the offset arrays.
    #[error(transparent)]
    Vector(#[from] numeric_vector::VectorError),

    /// A shared referencing type could not be built.
    #[error(transparent)]
    Referencing(#[from] referencing_common::ReferencingError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
