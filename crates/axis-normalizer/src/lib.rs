//! Canonicalization of coordinate-system axes.
//!
//! Derives a coordinate system from an existing one by substituting
//! units and directions, dropping axes rejected by a caller-supplied
//! filter, and reordering the remainder toward a right-handed system.
//! The main entry point is [`for_convention`], which maps each
//! [`AxesConvention`] to the appropriate combination of filtering,
//! normalization, sorting, and range shifting. Every entry point
//! returns `None` when the input is already in the requested form, so
//! callers can skip rebuilding downstream objects.

pub mod convention;
pub mod error;
pub mod filter;
pub mod meridian;
pub mod normalizer;

pub use convention::AxesConvention;
pub use error::{NormalizeError, NormalizeResult};
pub use filter::AxisFilter;
pub use meridian::DirectionAlongMeridian;
pub use normalizer::{for_convention, normalize_axis, normalize_cs, shift_axis_range, sort_axes};
