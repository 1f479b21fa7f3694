//! Coordinate-system axes.

use crate::direction::AxisDirection;
use crate::unit::Unit;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to axes whose proper name is not known, typically after a
/// direction change invalidated the original name. Callers are expected
/// to substitute an authoritative name afterward.
pub const UNNAMED: &str = "Unnamed";

/// Meaning of an axis value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeMeaning {
    /// Values outside the range are invalid.
    Exact,
    /// Values wrap at the range boundary (e.g. longitudes).
    Wraparound,
}

/// One dimension of a coordinate system.
///
/// Axes are immutable once constructed; operations that change an axis
/// (unit substitution, range shifting) build a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    /// Display name, e.g. "Geodetic longitude".
    pub name: String,
    /// Short symbolic abbreviation, e.g. "λ" or "E".
    pub abbreviation: String,
    /// Direction of increasing values.
    pub direction: AxisDirection,
    /// Unit of measurement for values along this axis.
    pub unit: Unit,
    /// Minimum valid value, possibly negative infinity.
    pub min_value: f64,
    /// Maximum valid value, possibly positive infinity.
    pub max_value: f64,
    /// How values outside [min, max] are interpreted.
    pub range_meaning: RangeMeaning,
    /// Authority identifier, if the axis came from a registry.
    pub identifier: Option<String>,
}

impl Axis {
    /// Create an axis with an unbounded exact range.
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        direction: AxisDirection,
        unit: Unit,
    ) -> Self {
        Self {
            name: name.into(),
            abbreviation: abbreviation.into(),
            direction,
            unit,
            min_value: f64::NEG_INFINITY,
            max_value: f64::INFINITY,
            range_meaning: RangeMeaning::Exact,
            identifier: None,
        }
    }

    /// Set the valid range and its meaning.
    pub fn with_range(mut self, min: f64, max: f64, meaning: RangeMeaning) -> Self {
        self.min_value = min;
        self.max_value = max;
        self.range_meaning = meaning;
        self
    }

    /// Set the authority identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Whether this axis and another have the same content apart from
    /// their identifiers.
    pub fn equals_ignore_identifier(&self, other: &Axis) -> bool {
        self.name == other.name
            && self.abbreviation == other.abbreviation
            && self.direction == other.direction
            && self.unit == other.unit
            && self.min_value == other.min_value
            && self.max_value == other.max_value
            && self.range_meaning == other.range_meaning
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.direction, self.unit)
    }
}

/// Common axis definitions.
pub mod axes {
    use super::*;

    /// Geodetic longitude in degrees, wrapping at ±180°.
    pub fn geodetic_longitude() -> Axis {
        Axis::new(
            "Geodetic longitude",
            "λ",
            AxisDirection::East,
            Unit::Degree,
        )
        .with_range(-180.0, 180.0, RangeMeaning::Wraparound)
    }

    /// Geodetic latitude in degrees.
    pub fn geodetic_latitude() -> Axis {
        Axis::new(
            "Geodetic latitude",
            "φ",
            AxisDirection::North,
            Unit::Degree,
        )
        .with_range(-90.0, 90.0, RangeMeaning::Exact)
    }

    /// Ellipsoidal height in metres.
    pub fn ellipsoidal_height() -> Axis {
        Axis::new("Ellipsoidal height", "h", AxisDirection::Up, Unit::Metre)
    }

    /// Gravity-related depth in metres, increasing downward.
    pub fn depth() -> Axis {
        Axis::new("Depth", "D", AxisDirection::Down, Unit::Metre)
    }

    /// Time in seconds, increasing toward the future.
    pub fn time() -> Axis {
        Axis::new("Time", "t", AxisDirection::Future, Unit::Second)
    }
}
