//! Coordinate systems: ordered, fixed-length tuples of axes.

use crate::axis::Axis;
use crate::error::ReferencingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The geometric category of a coordinate system.
///
/// The category is preserved when a coordinate system is rebuilt with
/// normalized axes; only the axes and the name change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CsKind {
    Cartesian,
    Ellipsoidal,
    Spherical,
    Cylindrical,
    Polar,
    Vertical,
    Temporal,
    Linear,
}

impl CsKind {
    /// Conventional display name, used when synthesizing the name of a
    /// renormalized coordinate system.
    pub fn display_name(&self) -> &'static str {
        match self {
            CsKind::Cartesian => "Cartesian CS",
            CsKind::Ellipsoidal => "Ellipsoidal CS",
            CsKind::Spherical => "Spherical CS",
            CsKind::Cylindrical => "Cylindrical CS",
            CsKind::Polar => "Polar CS",
            CsKind::Vertical => "Vertical CS",
            CsKind::Temporal => "Temporal CS",
            CsKind::Linear => "Linear CS",
        }
    }
}

impl fmt::Display for CsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An ordered tuple of axes. The dimension is fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateSystem {
    name: String,
    kind: CsKind,
    axes: Vec<Axis>,
}

impl CoordinateSystem {
    /// Create a coordinate system from its axes.
    pub fn new(
        name: impl Into<String>,
        kind: CsKind,
        axes: Vec<Axis>,
    ) -> Result<Self, ReferencingError> {
        let name = name.into();
        if axes.is_empty() {
            return Err(ReferencingError::EmptyCoordinateSystem(name));
        }
        Ok(Self { name, kind, axes })
    }

    /// Display name of this coordinate system.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometric category of this coordinate system.
    pub fn kind(&self) -> CsKind {
        self.kind
    }

    /// Number of axes.
    pub fn dimension(&self) -> usize {
        self.axes.len()
    }

    /// The axis at the given position.
    pub fn axis(&self, i: usize) -> &Axis {
        &self.axes[i]
    }

    /// All axes in order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Build a coordinate system of the same category with different
    /// axes, synthesizing a descriptive name from the axis list.
    pub fn for_axes(&self, axes: Vec<Axis>) -> Result<Self, ReferencingError> {
        let name = Self::synthesized_name(self.kind, &axes);
        Self::new(name, self.kind, axes)
    }

    /// Build a coordinate system of the same category with different
    /// axes, keeping the current name.
    pub fn with_same_name(&self, axes: Vec<Axis>) -> Result<Self, ReferencingError> {
        Self::new(self.name.clone(), self.kind, axes)
    }

    /// Descriptive name listing the axis directions and units, e.g.
    /// "Ellipsoidal CS: East (°), North (°)."
    pub fn synthesized_name(kind: CsKind, axes: &[Axis]) -> String {
        let mut name = String::from(kind.display_name());
        name.push_str(": ");
        for (i, axis) in axes.iter().enumerate() {
            if i != 0 {
                name.push_str(", ");
            }
            name.push_str(&axis.to_string());
        }
        name.push('.');
        name
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::axes;

    #[test]
    fn test_dimension_fixed() {
        let cs = CoordinateSystem::new(
            "WGS 84",
            CsKind::Ellipsoidal,
            vec![axes::geodetic_latitude(), axes::geodetic_longitude()],
        )
        .unwrap();
        assert_eq!(cs.dimension(), 2);
        assert_eq!(cs.axis(0).abbreviation, "φ");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(CoordinateSystem::new("empty", CsKind::Cartesian, vec![]).is_err());
    }

    #[test]
    fn test_synthesized_name() {
        let axes = vec![axes::geodetic_longitude(), axes::geodetic_latitude()];
        let name = CoordinateSystem::synthesized_name(CsKind::Ellipsoidal, &axes);
        assert_eq!(name, "Ellipsoidal CS: East (°), North (°).");
    }

    #[test]
    fn test_for_axes_keeps_kind() {
        let cs = CoordinateSystem::new(
            "WGS 84",
            CsKind::Ellipsoidal,
            vec![axes::geodetic_latitude(), axes::geodetic_longitude()],
        )
        .unwrap();
        let rebuilt = cs
            .for_axes(vec![axes::geodetic_longitude(), axes::geodetic_latitude()])
            .unwrap();
        assert_eq!(rebuilt.kind(), CsKind::Ellipsoidal);
        assert!(rebuilt.name().starts_with("Ellipsoidal CS"));
    }
}
