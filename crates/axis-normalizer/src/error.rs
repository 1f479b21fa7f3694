//! Error types for axis normalization.

use referencing_common::ReferencingError;
use thiserror::Error;

/// Result type alias using NormalizeError.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Errors raised while normalizing axes or coordinate systems.
///
/// All variants indicate incoherent caller-supplied configuration;
/// normalization itself is a total function over well-formed input.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A filter requested a unit replacement across dimensions.
    #[error("Cannot normalize axis '{axis}': {source}")]
    IncompatibleUnit {
        axis: String,
        #[source]
        source: ReferencingError,
    },

    /// Rebuilding the coordinate system failed, typically because the
    /// filter rejected every axis.
    #[error(transparent)]
    Referencing(#[from] ReferencingError),
}
