//! Directions expressed relative to a meridian.
//!
//! Polar coordinate systems use axis directions such as
//! "South along 90°E" or "North along 130 deg West". These are carried
//! as user-defined directions; this module parses them into a base
//! direction plus a signed meridian so that such axes can be ordered by
//! bearing when sorting toward a right-handed system.

use referencing_common::AxisDirection;
use std::cmp::Ordering;

/// A direction like "South along 90°E", parsed from a user-defined
/// axis direction name.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionAlongMeridian {
    /// The base direction of travel (usually North or South).
    pub base: AxisDirection,
    /// The meridian followed, in degrees east of Greenwich, normalized
    /// to the (-180, 180] range.
    pub meridian: f64,
}

impl DirectionAlongMeridian {
    /// Parse a user-defined direction of the form
    /// `<base> along <angle> [deg|°] [East|West]`.
    ///
    /// Returns `None` for directions that do not follow that pattern.
    pub fn parse(direction: &AxisDirection) -> Option<DirectionAlongMeridian> {
        let name = match direction {
            AxisDirection::Other(name) => name,
            _ => return None,
        };
        let mut tokens = name.split_whitespace();
        let base = match tokens.next()?.to_ascii_lowercase().as_str() {
            "north" => AxisDirection::North,
            "south" => AxisDirection::South,
            "east" => AxisDirection::East,
            "west" => AxisDirection::West,
            _ => return None,
        };
        if !tokens.next()?.eq_ignore_ascii_case("along") {
            return None;
        }
        let raw = tokens.next()?;
        let numeric_end = raw
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(raw.len());
        let value: f64 = raw[..numeric_end].parse().ok()?;

        // Whatever follows the number — glued to it or as separate
        // tokens — may only be a unit word and/or a hemisphere.
        let mut trailer = raw[numeric_end..].to_string();
        for token in tokens {
            trailer.push(' ');
            trailer.push_str(token);
        }
        let mut sign = 1.0;
        for part in trailer
            .to_ascii_lowercase()
            .split(|c: char| c.is_whitespace() || c == '°')
            .filter(|part| !part.is_empty())
        {
            match part {
                "deg" | "degree" | "degrees" => {}
                "east" | "e" => sign = 1.0,
                "west" | "w" => sign = -1.0,
                _ => return None,
            }
        }
        Some(DirectionAlongMeridian {
            base,
            meridian: normalize_meridian(sign * value),
        })
    }

    /// Order two along-meridian directions: first by base direction,
    /// then by bearing so that the direction whose meridian lies to the
    /// east (by less than a half turn) sorts last.
    pub fn compare(&self, other: &DirectionAlongMeridian) -> Ordering {
        let by_base = self.base.ordinal().cmp(&other.base.ordinal());
        if by_base != Ordering::Equal {
            return by_base;
        }
        let delta = normalize_meridian(other.meridian - self.meridian);
        if delta == 0.0 {
            return Ordering::Equal;
        }
        if delta == 180.0 {
            // Opposite meridians have no eastward winner; fall back to
            // the raw values so the order stays total.
            return self
                .meridian
                .partial_cmp(&other.meridian)
                .unwrap_or(Ordering::Equal);
        }
        if delta > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

/// Wrap a meridian to the (-180, 180] range.
fn normalize_meridian(mut degrees: f64) -> f64 {
    degrees %= 360.0;
    if degrees <= -180.0 {
        degrees += 360.0;
    } else if degrees > 180.0 {
        degrees -= 360.0;
    }
    degrees
}
