//! Error types for the referencing data model.

use crate::unit::Unit;
use thiserror::Error;

/// Result type alias using ReferencingError.
pub type ReferencingResult<T> = Result<T, ReferencingError>;

/// Errors raised by the shared referencing types.
#[derive(Debug, Error)]
pub enum ReferencingError {
    /// Two units belong to different dimensions and cannot be converted.
    #[error("Cannot convert from '{from}' to '{to}': incompatible units")]
    IncompatibleUnits { from: Unit, to: Unit },

    /// A coordinate system was constructed without any axis.
    #[error("A coordinate system requires at least one axis: {0}")]
    EmptyCoordinateSystem(String),
}
