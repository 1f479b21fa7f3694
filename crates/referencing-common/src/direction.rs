//! Axis directions and compass arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of compass points on the direction circle (22.5° apart).
pub const COMPASS_COUNT: i32 = 16;

/// Direction of a coordinate-system axis.
///
/// The sixteen compass points are declared clockwise from North so that
/// their declaration order doubles as the position on the compass circle.
/// Directions that are not part of any predefined set (e.g. the polar
/// "South along 90°E" directions) use the `Other` variant with their
/// original name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisDirection {
    North,
    NorthNorthEast,
    NorthEast,
    EastNorthEast,
    East,
    EastSouthEast,
    SouthEast,
    SouthSouthEast,
    South,
    SouthSouthWest,
    SouthWest,
    WestSouthWest,
    West,
    WestNorthWest,
    NorthWest,
    NorthNorthWest,
    /// Away from the Earth's center.
    Up,
    /// Toward the Earth's center.
    Down,
    /// Toward the prime meridian at the equator.
    GeocentricX,
    /// Toward 90°E at the equator.
    GeocentricY,
    /// Toward the North pole.
    GeocentricZ,
    /// Toward later instants.
    Future,
    /// Toward earlier instants.
    Past,
    /// A direction outside the predefined set, kept by name.
    Other(String),
}

impl AxisDirection {
    /// Position of the enumeration constant in declaration order.
    ///
    /// Used as the last-resort stable tiebreak when sorting axes.
    pub fn ordinal(&self) -> usize {
        use AxisDirection::*;
        match self {
            North => 0,
            NorthNorthEast => 1,
            NorthEast => 2,
            EastNorthEast => 3,
            East => 4,
            EastSouthEast => 5,
            SouthEast => 6,
            SouthSouthEast => 7,
            South => 8,
            SouthSouthWest => 9,
            SouthWest => 10,
            WestSouthWest => 11,
            West => 12,
            WestNorthWest => 13,
            NorthWest => 14,
            NorthNorthWest => 15,
            Up => 16,
            Down => 17,
            GeocentricX => 18,
            GeocentricY => 19,
            GeocentricZ => 20,
            Future => 21,
            Past => 22,
            Other(_) => 23,
        }
    }

    /// Position on the compass circle, clockwise from North, or `None`
    /// if this is not a compass direction.
    pub fn compass_index(&self) -> Option<i32> {
        let n = self.ordinal();
        if n < COMPASS_COUNT as usize {
            Some(n as i32)
        } else {
            None
        }
    }

    /// Whether this is one of the sixteen compass directions.
    pub fn is_compass(&self) -> bool {
        self.compass_index().is_some()
    }

    /// Whether this direction is outside the predefined set.
    pub fn is_user_defined(&self) -> bool {
        matches!(self, AxisDirection::Other(_))
    }

    /// Signed number of 22.5° steps separating two compass directions,
    /// positive when `self` lies clockwise of `other`, wrapped to the
    /// (-8, +8] range. `None` unless both directions are compass points.
    ///
    /// Note that opposite directions yield +8 regardless of operand
    /// order; callers that need a total order must break that tie
    /// themselves.
    pub fn compass_steps_from(&self, other: &AxisDirection) -> Option<i32> {
        let a = self.compass_index()?;
        let b = other.compass_index()?;
        let mut n = a - b;
        if n <= -COMPASS_COUNT / 2 {
            n += COMPASS_COUNT;
        } else if n > COMPASS_COUNT / 2 {
            n -= COMPASS_COUNT;
        }
        Some(n)
    }

    /// The direction pointing the opposite way, when one exists.
    pub fn opposite(&self) -> Option<AxisDirection> {
        use AxisDirection::*;
        if let Some(i) = self.compass_index() {
            let j = (i + COMPASS_COUNT / 2) % COMPASS_COUNT;
            return Some(Self::from_compass_index(j));
        }
        match self {
            Up => Some(Down),
            Down => Some(Up),
            Future => Some(Past),
            Past => Some(Future),
            _ => None,
        }
    }

    /// The "absolute" form of this direction: whichever of the direction
    /// or its opposite enumerates first (NORTH rather than SOUTH, EAST
    /// rather than WEST, UP rather than DOWN, FUTURE rather than PAST).
    pub fn absolute(&self) -> AxisDirection {
        if let Some(op) = self.opposite() {
            if op.ordinal() < self.ordinal() {
                return op;
            }
        }
        self.clone()
    }

    fn from_compass_index(i: i32) -> AxisDirection {
        use AxisDirection::*;
        match i {
            0 => North,
            1 => NorthNorthEast,
            2 => NorthEast,
            3 => EastNorthEast,
            4 => East,
            5 => EastSouthEast,
            6 => SouthEast,
            7 => SouthSouthEast,
            8 => South,
            9 => SouthSouthWest,
            10 => SouthWest,
            11 => WestSouthWest,
            12 => West,
            13 => WestNorthWest,
            14 => NorthWest,
            _ => NorthNorthWest,
        }
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use AxisDirection::*;
        let name = match self {
            North => "North",
            NorthNorthEast => "North north-east",
            NorthEast => "North-east",
            EastNorthEast => "East north-east",
            East => "East",
            EastSouthEast => "East south-east",
            SouthEast => "South-east",
            SouthSouthEast => "South south-east",
            South => "South",
            SouthSouthWest => "South south-west",
            SouthWest => "South-west",
            WestSouthWest => "West south-west",
            West => "West",
            WestNorthWest => "West north-west",
            NorthWest => "North-west",
            NorthNorthWest => "North north-west",
            Up => "Up",
            Down => "Down",
            GeocentricX => "Geocentric X",
            GeocentricY => "Geocentric Y",
            GeocentricZ => "Geocentric Z",
            Future => "Future",
            Past => "Past",
            Other(name) => name,
        };
        write!(f, "{}", name)
    }
}

/// Check whether `abbreviation` is the acronym of the words in `name`.
///
/// Words are separated by spaces or hyphens; the comparison ignores case.
/// For example "NE" is the acronym of "North-east".
pub fn is_acronym_for_words(abbreviation: &str, name: &str) -> bool {
    let initials: String = name
        .split(|c: char| c == ' ' || c == '-' || c == '_')
        .filter_map(|word| word.chars().next())
        .collect();
    !initials.is_empty() && abbreviation.eq_ignore_ascii_case(&initials)
}
