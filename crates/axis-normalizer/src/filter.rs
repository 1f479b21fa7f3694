//! Per-axis filtering and replacement policy.

use referencing_common::{Axis, AxisDirection, Unit};

/// Policy object deciding which axes to keep and which unit and
/// direction to substitute on each kept axis.
///
/// Implementations are stateless from the normalizer's point of view;
/// one is supplied per normalization call. The default methods keep
/// everything unchanged.
pub trait AxisFilter {
    /// Whether the given axis should be kept.
    fn accept(&self, _axis: &Axis) -> bool {
        true
    }

    /// The unit to use in place of the given unit.
    fn unit_replacement(&self, unit: Unit) -> Unit {
        unit
    }

    /// The direction to use in place of the given direction.
    fn direction_replacement(&self, direction: &AxisDirection) -> AxisDirection {
        direction.clone()
    }
}
