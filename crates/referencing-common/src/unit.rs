//! Units of measurement and linear unit conversion.
//!
//! The engine only needs the well-known units appearing in geodetic axis
//! definitions, so units are a closed enumeration with a scale factor to
//! the base unit of their dimension. Conversion across dimensions is a
//! configuration error, never a silent pass-through.

use crate::error::ReferencingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The dimension a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Plane angles (base unit: degree).
    Angle,
    /// Lengths (base unit: metre).
    Length,
    /// Durations (base unit: second).
    Time,
    /// Dimensionless scale factors (base unit: unity).
    Scale,
}

impl Dimension {
    /// The canonical unit used when normalizing axes of this dimension.
    pub fn canonical_unit(&self) -> Unit {
        match self {
            Dimension::Angle => Unit::Degree,
            Dimension::Length => Unit::Metre,
            Dimension::Time => Unit::Second,
            Dimension::Scale => Unit::Unity,
        }
    }
}

/// Well-known units of measurement for coordinate-system axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Degree,
    Radian,
    Grad,
    ArcSecond,
    Metre,
    Kilometre,
    Foot,
    Second,
    Day,
    Unity,
    PartsPerMillion,
}

impl Unit {
    /// The dimension this unit measures.
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::Degree | Unit::Radian | Unit::Grad | Unit::ArcSecond => Dimension::Angle,
            Unit::Metre | Unit::Kilometre | Unit::Foot => Dimension::Length,
            Unit::Second | Unit::Day => Dimension::Time,
            Unit::Unity | Unit::PartsPerMillion => Dimension::Scale,
        }
    }

    /// Scale factor from this unit to the base unit of its dimension.
    pub fn to_base(&self) -> f64 {
        match self {
            Unit::Degree => 1.0,
            Unit::Radian => 180.0 / std::f64::consts::PI,
            Unit::Grad => 0.9,
            Unit::ArcSecond => 1.0 / 3600.0,
            Unit::Metre => 1.0,
            Unit::Kilometre => 1000.0,
            Unit::Foot => 0.3048,
            Unit::Second => 1.0,
            Unit::Day => 86400.0,
            Unit::Unity => 1.0,
            Unit::PartsPerMillion => 1E-6,
        }
    }

    /// Unit symbol as conventionally printed after axis abbreviations.
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Degree => "°",
            Unit::Radian => "rad",
            Unit::Grad => "grad",
            Unit::ArcSecond => "″",
            Unit::Metre => "m",
            Unit::Kilometre => "km",
            Unit::Foot => "ft",
            Unit::Second => "s",
            Unit::Day => "d",
            Unit::Unity => "unity",
            Unit::PartsPerMillion => "ppm",
        }
    }

    /// Get a converter from this unit to the target unit.
    ///
    /// Fails if the units measure different dimensions; callers treat
    /// that as a fatal configuration error.
    pub fn converter_to(&self, target: Unit) -> Result<UnitConverter, ReferencingError> {
        if self.dimension() != target.dimension() {
            return Err(ReferencingError::IncompatibleUnits {
                from: *self,
                to: target,
            });
        }
        Ok(UnitConverter {
            factor: self.to_base() / target.to_base(),
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A linear conversion between two units of the same dimension.
#[derive(Debug, Clone, Copy)]
pub struct UnitConverter {
    factor: f64,
}

impl UnitConverter {
    /// Convert a value expressed in the source unit to the target unit.
    pub fn convert(&self, value: f64) -> f64 {
        value * self.factor
    }

    /// Whether this conversion leaves values unchanged.
    pub fn is_identity(&self) -> bool {
        self.factor == 1.0
    }
}
