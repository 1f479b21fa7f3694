//! Axis conventions a coordinate system can be rebuilt for.

use crate::filter::AxisFilter;
use referencing_common::{AxisDirection, Unit};

/// The target convention of a normalization request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxesConvention {
    /// Conventional directions, canonical units, right-handed order.
    Normalized,
    /// Conventional directions and right-handed order, units kept.
    ConventionallyOriented,
    /// Right-handed axis order only; units and directions kept.
    RightHanded,
    /// Wraparound ranges shifted to non-negative values, e.g.
    /// longitudes renumbered from [-180, 180) to [0, 360).
    PositiveRange,
}

impl AxisFilter for AxesConvention {
    fn unit_replacement(&self, unit: Unit) -> Unit {
        match self {
            AxesConvention::Normalized => unit.dimension().canonical_unit(),
            _ => unit,
        }
    }

    fn direction_replacement(&self, direction: &AxisDirection) -> AxisDirection {
        match self {
            AxesConvention::Normalized | AxesConvention::ConventionallyOriented => {
                direction.absolute()
            }
            _ => direction.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_replaces_units() {
        let convention = AxesConvention::Normalized;
        assert_eq!(convention.unit_replacement(Unit::Grad), Unit::Degree);
        assert_eq!(convention.unit_replacement(Unit::Kilometre), Unit::Metre);
        assert_eq!(convention.unit_replacement(Unit::Day), Unit::Second);
    }

    #[test]
    fn test_conventionally_oriented_keeps_units() {
        let convention = AxesConvention::ConventionallyOriented;
        assert_eq!(convention.unit_replacement(Unit::Grad), Unit::Grad);
        assert_eq!(
            convention.direction_replacement(&AxisDirection::South),
            AxisDirection::North
        );
        assert_eq!(
            convention.direction_replacement(&AxisDirection::Down),
            AxisDirection::Up
        );
    }

    #[test]
    fn test_right_handed_keeps_everything() {
        let convention = AxesConvention::RightHanded;
        assert_eq!(convention.unit_replacement(Unit::Grad), Unit::Grad);
        assert_eq!(
            convention.direction_replacement(&AxisDirection::West),
            AxisDirection::West
        );
    }
}
