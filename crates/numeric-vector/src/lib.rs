//! Type-erased numeric sequences with zero-copy views.
//!
//! A [`Vector`] is a fixed-length, random-access sequence of numbers
//! whose element kind (signed 8/16/32/64-bit integer, 32/64-bit float)
//! is erased behind a uniform accessor API. Vectors are either backed by
//! an owned primitive buffer, computed on the fly (arithmetic
//! sequences), or structural views over another vector: explicit index
//! subsets, strided ranges (used for reversal and sub-lists), and
//! concatenations. Views never copy the backing storage; they are small
//! descriptors that translate indices.
//!
//! The usual entry points are [`Vector::create`] for wrapping a buffer
//! and [`Vector::sequence`] for arithmetic progressions:
//!
//! ```
//! use numeric_vector::Vector;
//!
//! let v = Vector::create(vec![10.0_f32, 11.0, 12.0, 13.0], false);
//! let tail = v.sub_list(2, 4).unwrap();
//! assert_eq!(tail.f64_value(0), 12.0);
//! ```
//!
//! Value accessors make abstraction of the storage kind: reading a
//! `f64` from an `i16` buffer widens, reading an `i32` from a `f64`
//! buffer rounds and fails if the rounded value does not fit. Integer
//! buffers may additionally be declared unsigned, in which case the
//! bitmask is applied before any conversion.

pub mod buffer;
pub mod element;
pub mod error;
pub mod vector;

pub use buffer::Buffer;
pub use element::ElementType;
pub use error::{VectorError, VectorResult};
pub use vector::Vector;
