//! The vector type and its structural views.
//!
//! A `Vector` is a small handle (one `Arc`) over one of five cases: an
//! owned primitive buffer, an explicit index view, a strided-range view,
//! a computed arithmetic sequence, or a concatenation of two vectors.
//! View constructors collapse chains where the geometry allows: an index
//! view of an index view references the true backing vector directly,
//! and a strided view of a strided view folds into a single composite
//! stride.

use crate::buffer::{float_to_i64, Buffer};
use crate::element::ElementType;
use crate::error::VectorError;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A fixed-length, random-access sequence of numeric values.
///
/// Cloning a `Vector` is cheap and yields a handle to the same
/// underlying data: values written through [`Vector::set`] are visible
/// through every view of the same backing storage.
#[derive(Debug, Clone)]
pub struct Vector {
    repr: Arc<Repr>,
}

#[derive(Debug)]
enum Repr {
    /// An owned primitive buffer.
    Array {
        data: RwLock<Buffer>,
        unsigned: bool,
        length: usize,
        element: ElementType,
    },
    /// A view selecting explicit (possibly repeated) backing indices.
    Indexed {
        backing: Vector,
        indices: Box<[usize]>,
    },
    /// A view mapping index `i` to `first + i * step` in the backing
    /// vector. `step` may be negative (reversal) or zero.
    Strided {
        backing: Vector,
        first: usize,
        step: isize,
        length: usize,
    },
    /// A computed arithmetic sequence; has no backing storage.
    Sequence {
        first: f64,
        increment: f64,
        length: usize,
        element: ElementType,
    },
    /// The logical join of two vectors.
    Concatenated {
        head: Vector,
        tail: Vector,
        split: usize,
    },
}

fn read_buffer(lock: &RwLock<Buffer>) -> RwLockReadGuard<'_, Buffer> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_buffer(lock: &RwLock<Buffer>) -> RwLockWriteGuard<'_, Buffer> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn check_index(index: usize, length: usize) {
    assert!(
        index < length,
        "index {} out of bounds for vector of length {}",
        index,
        length
    );
}

impl Vector {
    /// Wrap a primitive buffer in a vector without copying it.
    ///
    /// The `unsigned` flag requests the unsigned interpretation of
    /// integer elements and is ignored for float kinds.
    pub fn create(buffer: impl Into<Buffer>, unsigned: bool) -> Vector {
        let buffer = buffer.into();
        let length = buffer.len();
        let element = buffer.element_type();
        Vector {
            repr: Arc::new(Repr::Array {
                data: RwLock::new(buffer),
                unsigned: unsigned && element.is_integer(),
                length,
                element,
            }),
        }
    }

    /// A lazily computed arithmetic sequence `first + i * increment`
    /// for `i` in `0..length`. The declared element kind is the
    /// narrowest kind able to exactly represent every generated value.
    pub fn sequence(first: f64, increment: f64, length: usize) -> Vector {
        Vector {
            repr: Arc::new(Repr::Sequence {
                first,
                increment,
                length,
                element: ElementType::narrowest_for_sequence(first, increment, length),
            }),
        }
    }

    /// Number of values in this vector.
    pub fn len(&self) -> usize {
        match &*self.repr {
            Repr::Array { length, .. } => *length,
            Repr::Indexed { indices, .. } => indices.len(),
            Repr::Strided { length, .. } => *length,
            Repr::Sequence { length, .. } => *length,
            Repr::Concatenated { tail, split, .. } => split + tail.len(),
        }
    }

    /// Whether this vector holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The declared element kind of this vector's values.
    pub fn element_type(&self) -> ElementType {
        match &*self.repr {
            Repr::Array { element, .. } => *element,
            Repr::Indexed { backing, .. } => backing.element_type(),
            Repr::Strided { backing, .. } => backing.element_type(),
            Repr::Sequence { element, .. } => *element,
            Repr::Concatenated { head, tail, .. } => {
                ElementType::widest(head.element_type(), tail.element_type())
            }
        }
    }

    /// Whether integer values are interpreted as unsigned.
    pub fn is_unsigned(&self) -> bool {
        match &*self.repr {
            Repr::Array { unsigned, .. } => *unsigned,
            Repr::Indexed { backing, .. } => backing.is_unsigned(),
            Repr::Strided { backing, .. } => backing.is_unsigned(),
            Repr::Sequence { .. } => false,
            Repr::Concatenated { head, tail, .. } => head.is_unsigned() && tail.is_unsigned(),
        }
    }

    /// Whether two handles refer to the same vector instance.
    pub fn same_vector(&self, other: &Vector) -> bool {
        Arc::ptr_eq(&self.repr, &other.repr)
    }

    /// The value at `index` as `f64`, the safest accessor: every
    /// supported element kind converts to `f64`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn f64_value(&self, index: usize) -> f64 {
        match &*self.repr {
            Repr::Array {
                data,
                unsigned,
                length,
                ..
            } => {
                check_index(index, *length);
                read_buffer(data).get_f64(index, *unsigned)
            }
            Repr::Indexed { backing, indices } => backing.f64_value(indices[index]),
            Repr::Strided {
                backing,
                first,
                step,
                length,
            } => {
                check_index(index, *length);
                backing.f64_value(strided_offset(*first, *step, index))
            }
            Repr::Sequence {
                first,
                increment,
                length,
                ..
            } => {
                check_index(index, *length);
                first + increment * index as f64
            }
            Repr::Concatenated { head, tail, split } => {
                if index < *split {
                    head.f64_value(index)
                } else {
                    tail.f64_value(index - split)
                }
            }
        }
    }

    /// The value at `index` as `f32`. Narrowing from `f64` storage
    /// saturates to infinities and never fails.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn f32_value(&self, index: usize) -> f32 {
        self.f64_value(index) as f32
    }

    /// The value at `index` as `i64`. Floating-point storage is rounded
    /// to the nearest integer; the conversion fails if the (masked)
    /// value cannot be represented.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn i64_value(&self, index: usize) -> Result<i64, VectorError> {
        match &*self.repr {
            Repr::Array {
                data,
                unsigned,
                length,
                ..
            } => {
                check_index(index, *length);
                read_buffer(data).get_i64(index, *unsigned)
            }
            Repr::Indexed { backing, indices } => backing.i64_value(indices[index]),
            Repr::Strided {
                backing,
                first,
                step,
                length,
            } => {
                check_index(index, *length);
                backing.i64_value(strided_offset(*first, *step, index))
            }
            Repr::Sequence {
                first,
                increment,
                length,
                ..
            } => {
                check_index(index, *length);
                float_to_i64(first + increment * index as f64, index)
            }
            Repr::Concatenated { head, tail, split } => {
                if index < *split {
                    head.i64_value(index)
                } else {
                    tail.i64_value(index - split)
                }
            }
        }
    }

    /// The value at `index` as `i32`; fails if it does not fit.
    pub fn i32_value(&self, index: usize) -> Result<i32, VectorError> {
        let value = self.i64_value(index)?;
        i32::try_from(value).map_err(|_| VectorError::NarrowingLoss {
            index,
            value: value as f64,
            target: "i32",
        })
    }

    /// The value at `index` as `i16`; fails if it does not fit.
    pub fn i16_value(&self, index: usize) -> Result<i16, VectorError> {
        let value = self.i64_value(index)?;
        i16::try_from(value).map_err(|_| VectorError::NarrowingLoss {
            index,
            value: value as f64,
            target: "i16",
        })
    }

    /// The value at `index` as `i8`; fails if it does not fit.
    pub fn i8_value(&self, index: usize) -> Result<i8, VectorError> {
        let value = self.i64_value(index)?;
        i8::try_from(value).map_err(|_| VectorError::NarrowingLoss {
            index,
            value: value as f64,
            target: "i8",
        })
    }

    /// Whether the value at `index` is NaN. Integer-backed vectors are
    /// never NaN.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn is_nan(&self, index: usize) -> bool {
        match &*self.repr {
            Repr::Array { data, length, .. } => {
                check_index(index, *length);
                read_buffer(data).is_nan(index)
            }
            Repr::Indexed { backing, indices } => backing.is_nan(indices[index]),
            Repr::Strided {
                backing,
                first,
                step,
                length,
            } => {
                check_index(index, *length);
                backing.is_nan(strided_offset(*first, *step, index))
            }
            Repr::Sequence {
                first,
                increment,
                length,
                ..
            } => {
                check_index(index, *length);
                (first + increment * index as f64).is_nan()
            }
            Repr::Concatenated { head, tail, split } => {
                if index < *split {
                    head.is_nan(index)
                } else {
                    tail.is_nan(index - split)
                }
            }
        }
    }

    /// String form of the value at `index`, honoring the unsigned
    /// interpretation of integer storage.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn value_string(&self, index: usize) -> String {
        match &*self.repr {
            Repr::Array {
                data,
                unsigned,
                length,
                ..
            } => {
                check_index(index, *length);
                read_buffer(data).format(index, *unsigned)
            }
            Repr::Indexed { backing, indices } => backing.value_string(indices[index]),
            Repr::Strided {
                backing,
                first,
                step,
                length,
            } => {
                check_index(index, *length);
                backing.value_string(strided_offset(*first, *step, index))
            }
            Repr::Sequence {
                first,
                increment,
                length,
                element,
            } => {
                check_index(index, *length);
                let value = first + increment * index as f64;
                if element.is_integer() {
                    (value as i64).to_string()
                } else {
                    value.to_string()
                }
            }
            Repr::Concatenated { head, tail, split } => {
                if index < *split {
                    head.value_string(index)
                } else {
                    tail.value_string(index - split)
                }
            }
        }
    }

    /// Store a value at `index`, writing through to the backing storage.
    /// The write is visible through every view of that storage.
    ///
    /// Fails if the value cannot be stored in the underlying primitive
    /// kind, or if this vector computes its values.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn set(&self, index: usize, value: f64) -> Result<(), VectorError> {
        match &*self.repr {
            Repr::Array {
                data,
                unsigned,
                length,
                ..
            } => {
                check_index(index, *length);
                write_buffer(data).set_f64(index, value, *unsigned)
            }
            Repr::Indexed { backing, indices } => backing.set(indices[index], value),
            Repr::Strided {
                backing,
                first,
                step,
                length,
            } => {
                check_index(index, *length);
                backing.set(strided_offset(*first, *step, index), value)
            }
            Repr::Sequence { .. } => Err(VectorError::ReadOnly),
            Repr::Concatenated { head, tail, split } => {
                if index < *split {
                    head.set(index, value)
                } else {
                    tail.set(index - split, value)
                }
            }
        }
    }

    /// A view of this vector at the given indices, without copying.
    ///
    /// Indices may repeat and need not be ordered, so a view can be
    /// larger than the vector it selects from. When the index list is a
    /// contiguous arithmetic progression (including a single index or
    /// an empty list) the result is a strided-range view, which composes
    /// more cheaply later; otherwise it is an index view referencing the
    /// true backing vector.
    pub fn view(&self, indices: &[usize]) -> Result<Vector, VectorError> {
        let (backing, mapped) = self.to_backing(indices)?;
        match mapped.len() {
            0 => backing.sub_sampling(0, 1, 0),
            1 => backing.sub_sampling(mapped[0], 1, 1),
            _ => {
                let first = mapped[0];
                let step = mapped[1] as isize - first as isize;
                let progression = mapped
                    .windows(2)
                    .all(|pair| pair[1] as isize - pair[0] as isize == step);
                if progression {
                    backing.sub_sampling(first, step, mapped.len())
                } else {
                    Ok(Vector {
                        repr: Arc::new(Repr::Indexed {
                            backing,
                            indices: mapped.into_boxed_slice(),
                        }),
                    })
                }
            }
        }
    }

    /// A view mapping index `i` to `first + i * step` in this vector.
    /// `step` may be negative (reversal) or zero (a constant run).
    pub fn sub_sampling(
        &self,
        first: usize,
        step: isize,
        length: usize,
    ) -> Result<Vector, VectorError> {
        let size = self.len();
        if length == 0 {
            if size == 0 {
                return Ok(self.clone());
            }
            return Ok(Vector {
                repr: Arc::new(Repr::Strided {
                    backing: self.backing_vector(),
                    first: 0,
                    step: 1,
                    length: 0,
                }),
            });
        }
        let last = first as isize + step * (length - 1) as isize;
        if first >= size || last < 0 || last as usize >= size {
            return Err(VectorError::IllegalRange {
                first,
                step,
                length,
                backing: size,
            });
        }
        if first == 0 && step == 1 && length == size {
            return Ok(self.clone());
        }
        self.create_sub_sampling(first, step, length)
    }

    /// A view of the values in the index range `lower..upper`.
    pub fn sub_list(&self, lower: usize, upper: usize) -> Result<Vector, VectorError> {
        if upper < lower {
            return Err(VectorError::IllegalRange {
                first: lower,
                step: 1,
                length: 0,
                backing: self.len(),
            });
        }
        self.sub_sampling(lower, 1, upper - lower)
    }

    /// A view of this vector's values in reverse order.
    pub fn reverse(&self) -> Vector {
        let length = self.len();
        if length == 0 {
            return self.clone();
        }
        self.sub_sampling(length - 1, -1, length)
            .unwrap_or_else(|_| self.clone())
    }

    /// The concatenation of this vector with another, without copying.
    ///
    /// Returns the other operand unchanged when one side is empty.
    /// Adjacent compatible views over the same backing vector fold into
    /// a single equivalent view instead of stacking wrappers.
    pub fn concatenate(&self, other: &Vector) -> Vector {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        if let Some(folded) = self.fold_concatenate(other) {
            return folded;
        }
        let split = self.len();
        Vector {
            repr: Arc::new(Repr::Concatenated {
                head: self.clone(),
                tail: other.clone(),
                split,
            }),
        }
    }

    /// The vector a view delegates to, or this vector if it is not a
    /// view.
    fn backing_vector(&self) -> Vector {
        match &*self.repr {
            Repr::Indexed { backing, .. } => backing.clone(),
            Repr::Strided { backing, .. } => backing.clone(),
            _ => self.clone(),
        }
    }

    /// Validate view indices and translate them to the backing vector's
    /// index space.
    fn to_backing(&self, indices: &[usize]) -> Result<(Vector, Vec<usize>), VectorError> {
        let length = self.len();
        match &*self.repr {
            Repr::Indexed {
                backing,
                indices: own,
            } => {
                let mut mapped = Vec::with_capacity(indices.len());
                for &i in indices {
                    if i >= length {
                        return Err(VectorError::InvalidIndex { index: i, length });
                    }
                    mapped.push(own[i]);
                }
                Ok((backing.clone(), mapped))
            }
            Repr::Strided {
                backing,
                first,
                step,
                ..
            } => {
                let mut mapped = Vec::with_capacity(indices.len());
                for &i in indices {
                    if i >= length {
                        return Err(VectorError::InvalidIndex { index: i, length });
                    }
                    mapped.push(strided_offset(*first, *step, i));
                }
                Ok((backing.clone(), mapped))
            }
            _ => {
                for &i in indices {
                    if i >= length {
                        return Err(VectorError::InvalidIndex { index: i, length });
                    }
                }
                Ok((self.clone(), indices.to_vec()))
            }
        }
    }

    /// Build the view for a validated, non-identity sampling range.
    fn create_sub_sampling(
        &self,
        first: usize,
        step: isize,
        length: usize,
    ) -> Result<Vector, VectorError> {
        match &*self.repr {
            Repr::Indexed { backing, indices } => {
                let mut mapped = Vec::with_capacity(length);
                let mut position = first as isize;
                for _ in 0..length {
                    mapped.push(indices[position as usize]);
                    position += step;
                }
                backing.view(&mapped)
            }
            Repr::Strided {
                backing,
                first: own_first,
                step: own_step,
                ..
            } => {
                let folded_first = (*own_first as isize + own_step * first as isize) as usize;
                backing.sub_sampling(folded_first, own_step * step, length)
            }
            Repr::Sequence {
                first: value,
                increment,
                ..
            } => Ok(Vector::sequence(
                value + increment * first as f64,
                increment * step as f64,
                length,
            )),
            _ => Ok(Vector {
                repr: Arc::new(Repr::Strided {
                    backing: self.clone(),
                    first,
                    step,
                    length,
                }),
            }),
        }
    }

    /// Fold two adjacent compatible views into one, when possible.
    fn fold_concatenate(&self, other: &Vector) -> Option<Vector> {
        match (&*self.repr, &*other.repr) {
            (
                Repr::Strided {
                    backing: left,
                    first,
                    step,
                    length,
                },
                Repr::Strided {
                    backing: right,
                    first: tail_first,
                    step: tail_step,
                    length: tail_length,
                },
            ) => {
                if left.same_vector(right)
                    && step == tail_step
                    && *tail_first as isize == *first as isize + step * *length as isize
                {
                    return Some(Vector {
                        repr: Arc::new(Repr::Strided {
                            backing: left.clone(),
                            first: *first,
                            step: *step,
                            length: length + tail_length,
                        }),
                    });
                }
                None
            }
            (
                Repr::Indexed {
                    backing: left,
                    indices: head_indices,
                },
                Repr::Indexed {
                    backing: right,
                    indices: tail_indices,
                },
            ) => {
                if left.same_vector(right) {
                    let mut joined = Vec::with_capacity(head_indices.len() + tail_indices.len());
                    joined.extend_from_slice(head_indices);
                    joined.extend_from_slice(tail_indices);
                    return left.view(&joined).ok();
                }
                None
            }
            _ => None,
        }
    }
}

fn strided_offset(first: usize, step: isize, index: usize) -> usize {
    (first as isize + step * index as isize) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_read() {
        let v = Vector::create(vec![1_i16, 2, 3], false);
        assert_eq!(v.len(), 3);
        assert_eq!(v.element_type(), ElementType::Int16);
        assert_eq!(v.f64_value(1), 2.0);
        assert_eq!(v.i64_value(2).unwrap(), 3);
    }

    #[test]
    fn test_unsigned_flag_only_for_integers() {
        let v = Vector::create(vec![-1_i8], true);
        assert!(v.is_unsigned());
        assert_eq!(v.f64_value(0), 255.0);

        let f = Vector::create(vec![-1.0_f32], true);
        assert!(!f.is_unsigned());
        assert_eq!(f.f64_value(0), -1.0);
    }

    #[test]
    fn test_narrowing_is_recoverable() {
        let v = Vector::create(vec![40_000.0_f64], false);
        assert!(v.i16_value(0).is_err());
        assert_eq!(v.i32_value(0).unwrap(), 40_000);
    }

    #[test]
    fn test_sequence() {
        let v = Vector::sequence(100.0, 2.0, 10);
        assert_eq!(v.element_type(), ElementType::Int8);
        assert_eq!(v.f64_value(0), 100.0);
        assert_eq!(v.f64_value(9), 118.0);
        assert!(matches!(v.set(0, 1.0), Err(VectorError::ReadOnly)));
    }

    #[test]
    fn test_view_progression_becomes_strided() {
        let v = Vector::create(vec![0.0_f64, 1.0, 2.0, 3.0, 4.0, 5.0], false);
        let even = v.view(&[0, 2, 4]).unwrap();
        assert_eq!(even.len(), 3);
        assert_eq!(even.f64_value(2), 4.0);
        // A progression view of a progression view folds: still one
        // translation away from the buffer.
        let reversed = even.reverse();
        assert_eq!(reversed.f64_value(0), 4.0);
        assert_eq!(reversed.f64_value(2), 0.0);
    }

    #[test]
    fn test_view_with_repeated_indices() {
        let v = Vector::create(vec![10.0_f32, 20.0, 30.0], false);
        let w = v.view(&[2, 0, 0, 1]).unwrap();
        assert_eq!(w.len(), 4);
        assert_eq!(w.f64_value(0), 30.0);
        assert_eq!(w.f64_value(2), 10.0);
    }

    #[test]
    fn test_view_rejects_out_of_bounds() {
        let v = Vector::create(vec![1.0_f64, 2.0], false);
        assert!(v.view(&[0, 5]).is_err());
        assert!(v.sub_sampling(0, 1, 3).is_err());
        assert!(v.sub_sampling(1, -2, 2).is_err());
    }

    #[test]
    fn test_write_through_view() {
        let v = Vector::create(vec![0.0_f32; 4], false);
        let tail = v.sub_list(2, 4).unwrap();
        tail.set(0, 7.5).unwrap();
        assert_eq!(v.f64_value(2), 7.5);
        assert_eq!(tail.f64_value(0), 7.5);
    }

    #[test]
    fn test_identity_subsampling_returns_self() {
        let v = Vector::create(vec![1_i32, 2, 3], false);
        let w = v.sub_sampling(0, 1, 3).unwrap();
        assert!(v.same_vector(&w));
    }

    #[test]
    fn test_concatenate_folds_adjacent_ranges() {
        let v = Vector::create(vec![0.0_f64, 1.0, 2.0, 3.0, 4.0, 5.0], false);
        let a = v.sub_list(0, 2).unwrap();
        let b = v.sub_list(2, 5).unwrap();
        let joined = a.concatenate(&b);
        assert_eq!(joined.len(), 5);
        for i in 0..5 {
            assert_eq!(joined.f64_value(i), i as f64);
        }
    }

    #[test]
    fn test_concatenate_element_type_widens() {
        let ints = Vector::create(vec![1_i8, 2], false);
        let floats = Vector::create(vec![0.5_f32], false);
        let joined = ints.concatenate(&floats);
        assert_eq!(joined.element_type(), ElementType::Float32);
        assert_eq!(joined.f64_value(2), 0.5);
    }

    #[test]
    fn test_value_string_unsigned() {
        let v = Vector::create(vec![-1_i16], true);
        assert_eq!(v.value_string(0), "65535");
    }

    #[test]
    fn test_zero_step_constant_run() {
        let v = Vector::create(vec![1.0_f64, 9.0], false);
        let constant = v.sub_sampling(1, 0, 4).unwrap();
        assert_eq!(constant.len(), 4);
        for i in 0..4 {
            assert_eq!(constant.f64_value(i), 9.0);
        }
    }
}
