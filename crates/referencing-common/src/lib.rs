//! Common types shared across the datum-grid referencing crates.

pub mod axis;
pub mod cs;
pub mod direction;
pub mod error;
pub mod unit;

pub use axis::{Axis, RangeMeaning, UNNAMED};
pub use cs::{CoordinateSystem, CsKind};
pub use direction::AxisDirection;
pub use error::{ReferencingError, ReferencingResult};
pub use unit::{Unit, UnitConverter};
