//! Axis sorting and coordinate-system normalization.

use crate::convention::AxesConvention;
use crate::error::NormalizeError;
use crate::filter::AxisFilter;
use crate::meridian::DirectionAlongMeridian;
use referencing_common::direction::is_acronym_for_words;
use referencing_common::{Axis, AxisDirection, CoordinateSystem, RangeMeaning, UNNAMED};
use std::cmp::Ordering;

/// Per-axis ordering key, computed once before sorting an axis array.
struct OrderingKey {
    direction: AxisDirection,
    meridian: Option<DirectionAlongMeridian>,
}

impl OrderingKey {
    fn new(axis: &Axis) -> OrderingKey {
        let meridian = if axis.direction.is_user_defined() {
            DirectionAlongMeridian::parse(&axis.direction)
        } else {
            None
        };
        OrderingKey {
            direction: axis.direction.clone(),
            meridian,
        }
    }

    /// Order favoring right-handed systems: compass directions first
    /// (North before East), then along-meridian directions by bearing,
    /// then everything else in enumeration order.
    fn compare(&self, other: &OrderingKey) -> Ordering {
        if let Some(steps) = self.direction.compass_steps_from(&other.direction) {
            if steps == 0 {
                return Ordering::Equal;
            }
            if steps.abs() == 8 {
                // Opposite compass directions measure +8 in both
                // operand orders; enumeration order keeps the
                // comparator total.
                return self.direction.ordinal().cmp(&other.direction.ordinal());
            }
            return steps.cmp(&0);
        }
        match (self.direction.is_compass(), other.direction.is_compass()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        match (&self.meridian, &other.meridian) {
            (Some(left), Some(right)) => left.compare(right),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.direction.ordinal().cmp(&other.direction.ordinal()),
        }
    }
}

/// Sort axes in place in an attempt to create a right-handed system.
///
/// The sort is stable; axes with equal ordering keys keep their
/// relative order. Returns whether at least one axis moved.
pub fn sort_axes(axes: &mut [Axis]) -> bool {
    let keys: Vec<OrderingKey> = axes.iter().map(OrderingKey::new).collect();
    let mut order: Vec<usize> = (0..axes.len()).collect();
    order.sort_by(|&left, &right| keys[left].compare(&keys[right]));
    let changed = order
        .iter()
        .enumerate()
        .any(|(position, &source)| position != source);
    if changed {
        let mut sorted: Vec<Axis> = order.iter().map(|&i| axes[i].clone()).collect();
        axes.swap_with_slice(&mut sorted);
    }
    changed
}

/// Produce a replacement axis with unit and direction substituted per
/// the filter, or `None` if neither changes.
///
/// When the direction changes, the abbreviation is re-derived only for
/// well-known cases (compass acronyms becoming "E"/"N", a new UP
/// becoming "z", a new FUTURE becoming "t"); any other abbreviation
/// change resets the axis name to the [`UNNAMED`] placeholder so a
/// proper name can be resolved from an authority afterward. Identifiers
/// never survive normalization.
pub fn normalize_axis(
    axis: &Axis,
    filter: &dyn AxisFilter,
) -> Result<Option<Axis>, NormalizeError> {
    let new_unit = filter.unit_replacement(axis.unit);
    let new_direction = filter.direction_replacement(&axis.direction);
    let same_direction = new_direction == axis.direction;
    if same_direction && new_unit == axis.unit {
        return Ok(None);
    }
    let mut abbreviation = axis.abbreviation.clone();
    if !same_direction {
        if axis.direction.is_compass() {
            if is_acronym_for_words(&abbreviation, &axis.direction.to_string()) {
                if new_direction == AxisDirection::East {
                    abbreviation = "E".to_string();
                } else if new_direction == AxisDirection::North {
                    abbreviation = "N".to_string();
                }
            }
        } else if new_direction == AxisDirection::Up {
            abbreviation = "z".to_string();
        } else if new_direction == AxisDirection::Future {
            abbreviation = "t".to_string();
        }
    }
    let name = if abbreviation == axis.abbreviation {
        axis.name.clone()
    } else {
        UNNAMED.to_string()
    };
    let converter =
        axis.unit
            .converter_to(new_unit)
            .map_err(|source| NormalizeError::IncompatibleUnit {
                axis: axis.name.clone(),
                source,
            })?;
    Ok(Some(Axis {
        name,
        abbreviation,
        direction: new_direction,
        unit: new_unit,
        min_value: converter.convert(axis.min_value),
        max_value: converter.convert(axis.max_value),
        range_meaning: axis.range_meaning,
        identifier: None,
    }))
}

/// Filter, normalize, and optionally reorder the axes of a coordinate
/// system. Returns `None` when the resulting axis sequence is identical
/// to the input in both content and order, so no new coordinate system
/// is needed.
pub fn normalize_cs(
    cs: &CoordinateSystem,
    filter: Option<&dyn AxisFilter>,
    reorder: bool,
) -> Result<Option<CoordinateSystem>, NormalizeError> {
    let dimension = cs.dimension();
    let mut changed = false;
    let mut axes: Vec<Axis> = Vec::with_capacity(dimension);
    for axis in cs.axes() {
        match filter {
            Some(filter) => {
                if !filter.accept(axis) {
                    continue;
                }
                match normalize_axis(axis, filter)? {
                    Some(normalized) => {
                        changed = true;
                        axes.push(normalized);
                    }
                    None => axes.push(axis.clone()),
                }
            }
            None => axes.push(axis.clone()),
        }
    }
    if reorder {
        changed |= sort_axes(&mut axes);
    }
    if !changed && axes.len() == dimension {
        return Ok(None);
    }
    Ok(Some(cs.for_axes(axes)?))
}

/// Shift wraparound axes with a negative minimum to a range of positive
/// values, e.g. longitudes from [-180, 180) to [0, 360).
///
/// Both bounds move by an integer multiple of half the range, which
/// does not change the meaning of coordinate values — only the
/// preferred way of numbering them. Returns `None` when no axis
/// required shifting. A degenerate shift (new minimum not below the new
/// maximum, as happens with non-finite bounds) leaves the axis
/// unchanged.
pub fn shift_axis_range(
    cs: &CoordinateSystem,
) -> Result<Option<CoordinateSystem>, NormalizeError> {
    let mut changed = false;
    let mut axes: Vec<Axis> = Vec::with_capacity(cs.dimension());
    for axis in cs.axes() {
        let mut axis = axis.clone();
        if axis.range_meaning == RangeMeaning::Wraparound && axis.min_value < 0.0 {
            let mut min = axis.min_value;
            let mut max = axis.max_value;
            let mut offset = (max - min) / 2.0;
            offset *= (min / offset + 1E-10).floor();
            min -= offset;
            max -= offset;
            if min < max {
                axis.min_value = min;
                axis.max_value = max;
                axis.identifier = None;
                changed = true;
            }
        }
        axes.push(axis);
    }
    if !changed {
        return Ok(None);
    }
    Ok(Some(cs.with_same_name(axes)?))
}

/// Rebuild a coordinate system for the given convention, or return
/// `None` if it is already compatible.
pub fn for_convention(
    cs: &CoordinateSystem,
    convention: AxesConvention,
) -> Result<Option<CoordinateSystem>, NormalizeError> {
    match convention {
        AxesConvention::Normalized | AxesConvention::ConventionallyOriented => {
            normalize_cs(cs, Some(&convention), true)
        }
        AxesConvention::RightHanded => normalize_cs(cs, None, true),
        AxesConvention::PositiveRange => shift_axis_range(cs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use referencing_common::axis::axes;
    use referencing_common::{CsKind, Unit};

    fn axis(direction: AxisDirection) -> Axis {
        Axis::new(format!("{}", direction), "a", direction, Unit::Metre)
    }

    #[test]
    fn test_sort_north_east() {
        let mut axes = vec![axis(AxisDirection::East), axis(AxisDirection::North)];
        assert!(sort_axes(&mut axes));
        assert_eq!(axes[0].direction, AxisDirection::North);
        assert_eq!(axes[1].direction, AxisDirection::East);
        // Sorting again is a no-op.
        assert!(!sort_axes(&mut axes));
    }

    #[test]
    fn test_sort_compass_before_vertical() {
        let mut axes = vec![
            axis(AxisDirection::Down),
            axis(AxisDirection::East),
            axis(AxisDirection::North),
        ];
        assert!(sort_axes(&mut axes));
        assert_eq!(axes[0].direction, AxisDirection::North);
        assert_eq!(axes[1].direction, AxisDirection::East);
        assert_eq!(axes[2].direction, AxisDirection::Down);
    }

    #[test]
    fn test_sort_meridian_axes_by_bearing() {
        let along_90 = axis(AxisDirection::Other("South along 90 deg East".into()));
        let along_0 = axis(AxisDirection::Other("South along 0 deg East".into()));
        let mut axes = vec![along_90.clone(), along_0.clone()];
        assert!(sort_axes(&mut axes));
        assert_eq!(axes[0].direction, along_0.direction);
        assert_eq!(axes[1].direction, along_90.direction);
    }

    #[test]
    fn test_sort_meridian_after_compass() {
        let meridian = axis(AxisDirection::Other("South along 0 deg East".into()));
        let mut axes = vec![meridian.clone(), axis(AxisDirection::North)];
        assert!(sort_axes(&mut axes));
        assert_eq!(axes[0].direction, AxisDirection::North);
        assert_eq!(axes[1].direction, meridian.direction);
    }

    #[test]
    fn test_normalize_axis_no_change_is_none() {
        let lat = axes::geodetic_latitude();
        let unchanged = normalize_axis(&lat, &AxesConvention::Normalized).unwrap();
        assert!(unchanged.is_none());
    }

    #[test]
    fn test_normalize_axis_westing_becomes_easting() {
        let westing = Axis::new("Westing", "W", AxisDirection::West, Unit::Metre);
        let replaced = normalize_axis(&westing, &AxesConvention::ConventionallyOriented)
            .unwrap()
            .unwrap();
        assert_eq!(replaced.direction, AxisDirection::East);
        assert_eq!(replaced.abbreviation, "E");
        // The abbreviation changed, so the old name no longer applies.
        assert_eq!(replaced.name, UNNAMED);
    }

    #[test]
    fn test_normalize_axis_converts_range() {
        let lon_grad = Axis::new("Longitude", "λ", AxisDirection::East, Unit::Grad)
            .with_range(-200.0, 200.0, RangeMeaning::Wraparound);
        let replaced = normalize_axis(&lon_grad, &AxesConvention::Normalized)
            .unwrap()
            .unwrap();
        assert_eq!(replaced.unit, Unit::Degree);
        assert_eq!(replaced.min_value, -180.0);
        assert_eq!(replaced.max_value, 180.0);
        assert_eq!(replaced.range_meaning, RangeMeaning::Wraparound);
        // Only the unit changed, so the name survives.
        assert_eq!(replaced.name, "Longitude");
    }

    #[test]
    fn test_normalize_axis_depth_becomes_height() {
        let depth = axes::depth();
        let replaced = normalize_axis(&depth, &AxesConvention::Normalized)
            .unwrap()
            .unwrap();
        assert_eq!(replaced.direction, AxisDirection::Up);
        assert_eq!(replaced.abbreviation, "z");
        assert_eq!(replaced.name, UNNAMED);
    }

    #[test]
    fn test_incompatible_unit_replacement_is_fatal() {
        struct BadFilter;
        impl AxisFilter for BadFilter {
            fn unit_replacement(&self, _unit: Unit) -> Unit {
                Unit::Second
            }
        }
        let result = normalize_axis(&axes::geodetic_latitude(), &BadFilter);
        assert!(matches!(
            result,
            Err(NormalizeError::IncompatibleUnit { .. })
        ));
    }

    #[test]
    fn test_normalize_cs_reorders() {
        let cs = CoordinateSystem::new(
            "lon/lat",
            CsKind::Ellipsoidal,
            vec![axes::geodetic_longitude(), axes::geodetic_latitude()],
        )
        .unwrap();
        let normalized = for_convention(&cs, AxesConvention::Normalized)
            .unwrap()
            .expect("axis order changed");
        assert_eq!(normalized.axis(0).direction, AxisDirection::North);
        assert_eq!(normalized.axis(1).direction, AxisDirection::East);
        assert_eq!(normalized.kind(), CsKind::Ellipsoidal);
        assert!(normalized.name().starts_with("Ellipsoidal CS"));

        // Idempotence: a canonical system is never perturbed further.
        let again = for_convention(&normalized, AxesConvention::Normalized).unwrap();
        assert!(again.is_none());
    }

    #[test]
    fn test_normalize_cs_filter_drops_axes() {
        struct HorizontalOnly;
        impl AxisFilter for HorizontalOnly {
            fn accept(&self, axis: &Axis) -> bool {
                axis.direction.is_compass()
            }
        }
        let cs = CoordinateSystem::new(
            "lon/lat/height",
            CsKind::Ellipsoidal,
            vec![
                axes::geodetic_longitude(),
                axes::geodetic_latitude(),
                axes::ellipsoidal_height(),
            ],
        )
        .unwrap();
        let filtered = normalize_cs(&cs, Some(&HorizontalOnly), false)
            .unwrap()
            .expect("one axis dropped");
        assert_eq!(filtered.dimension(), 2);
    }

    #[test]
    fn test_shift_axis_range() {
        let cs = CoordinateSystem::new(
            "geographic",
            CsKind::Ellipsoidal,
            vec![axes::geodetic_longitude(), axes::geodetic_latitude()],
        )
        .unwrap();
        let shifted = for_convention(&cs, AxesConvention::PositiveRange)
            .unwrap()
            .expect("longitude range shifted");
        assert_eq!(shifted.axis(0).min_value, 0.0);
        assert_eq!(shifted.axis(0).max_value, 360.0);
        // Latitude is EXACT and stays untouched.
        assert_eq!(shifted.axis(1).min_value, -90.0);
        assert_eq!(shifted.name(), "geographic");

        // Already positive: nothing to do.
        assert!(for_convention(&shifted, AxesConvention::PositiveRange)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_shift_axis_range_degenerate_is_noop() {
        let unbounded = Axis::new("wrap", "w", AxisDirection::East, Unit::Degree).with_range(
            f64::NEG_INFINITY,
            f64::INFINITY,
            RangeMeaning::Wraparound,
        );
        let cs = CoordinateSystem::new("degenerate", CsKind::Ellipsoidal, vec![unbounded]).unwrap();
        assert!(shift_axis_range(&cs).unwrap().is_none());
    }
}
