//! Error types for vector accessors and view construction.

use crate::element::ElementType;
use thiserror::Error;

/// Result type alias using VectorError.
pub type VectorResult<T> = Result<T, VectorError>;

/// Errors raised by vector accessors and view constructors.
///
/// A failed narrowing access is fatal to that access only; the vector
/// itself stays usable through a wider accessor.
#[derive(Debug, Error)]
pub enum VectorError {
    /// A value does not fit losslessly in the requested integer kind.
    #[error("Value {value} at index {index} cannot be represented as {target}")]
    NarrowingLoss {
        index: usize,
        value: f64,
        target: &'static str,
    },

    /// A value cannot be stored in the underlying primitive kind.
    #[error("Value {value} cannot be stored in a vector of element type {kind}")]
    CannotStore { value: f64, kind: ElementType },

    /// A view index points outside the vector.
    #[error("Index {index} is out of bounds for a vector of length {length}")]
    InvalidIndex { index: usize, length: usize },

    /// A strided range maps outside the vector.
    #[error("Range [first={first}, step={step}, length={length}] is invalid for a vector of length {backing}")]
    IllegalRange {
        first: usize,
        step: isize,
        length: usize,
        backing: usize,
    },

    /// The vector computes its values and cannot be written to.
    #[error("A computed sequence vector is read-only")]
    ReadOnly,
}
