//! Element kinds stored in a vector.

use std::fmt;

/// The primitive kind of the values held by a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl ElementType {
    /// Whether this is one of the integer kinds.
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            ElementType::Int8 | ElementType::Int16 | ElementType::Int32 | ElementType::Int64
        )
    }

    /// Whether this is one of the floating-point kinds.
    pub fn is_float(&self) -> bool {
        matches!(self, ElementType::Float32 | ElementType::Float64)
    }

    /// Storage size of one element, in bytes.
    pub fn size_bytes(&self) -> usize {
        match self {
            ElementType::Int8 => 1,
            ElementType::Int16 => 2,
            ElementType::Int32 | ElementType::Float32 => 4,
            ElementType::Int64 | ElementType::Float64 => 8,
        }
    }

    /// Rank in the widening lattice: every integer kind ranks below
    /// every float kind, wider kinds rank higher within each family.
    fn rank(&self) -> u8 {
        match self {
            ElementType::Int8 => 0,
            ElementType::Int16 => 1,
            ElementType::Int32 => 2,
            ElementType::Int64 => 3,
            ElementType::Float32 => 4,
            ElementType::Float64 => 5,
        }
    }

    /// The wider of two element kinds.
    pub fn widest(a: ElementType, b: ElementType) -> ElementType {
        if a.rank() >= b.rank() {
            a
        } else {
            b
        }
    }

    /// The narrowest kind able to exactly represent every value of the
    /// arithmetic sequence `first + i * increment` for `i < length`.
    ///
    /// Integral kinds are preferred when the first value and the
    /// increment are both integral.
    pub fn narrowest_for_sequence(first: f64, increment: f64, length: usize) -> ElementType {
        if length == 0 {
            return ElementType::Float64;
        }
        let last = first + increment * (length - 1) as f64;
        const EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
        if first.fract() == 0.0
            && increment.fract() == 0.0
            && last.fract() == 0.0
            && first.abs() <= EXACT
            && last.abs() <= EXACT
        {
            let min = first.min(last);
            let max = first.max(last);
            if min >= i8::MIN as f64 && max <= i8::MAX as f64 {
                ElementType::Int8
            } else if min >= i16::MIN as f64 && max <= i16::MAX as f64 {
                ElementType::Int16
            } else if min >= i32::MIN as f64 && max <= i32::MAX as f64 {
                ElementType::Int32
            } else {
                ElementType::Int64
            }
        } else if (first as f32) as f64 == first
            && (increment as f32) as f64 == increment
            && (last as f32) as f64 == last
        {
            ElementType::Float32
        } else {
            ElementType::Float64
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementType::Int8 => "i8",
            ElementType::Int16 => "i16",
            ElementType::Int32 => "i32",
            ElementType::Int64 => "i64",
            ElementType::Float32 => "f32",
            ElementType::Float64 => "f64",
        };
        write!(f, "{}", name)
    }
}
