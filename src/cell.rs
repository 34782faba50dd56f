//! Physically-typed cells used as predicate bounds.

use std::{cmp::Ordering, fmt};

use bytes::Bytes;

use crate::{arena::Arena, types::DataType};

const F32_MAX_BITS: u32 = 0x7FFF_FFFF;
const F64_MAX_BITS: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Owned datum in a column's physical representation.
///
/// Variable-length cells hold [`Bytes`], usually carved out of an [`Arena`].
#[derive(Clone, Debug)]
pub enum Cell {
    /// Boolean.
    Bool(bool),
    /// Signed 8-bit integer.
    Int8(i8),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Variable-length bytes (strings and binary).
    Binary(Bytes),
}

/// Borrowed view over a physical datum.
#[derive(Clone, Copy, Debug)]
pub enum CellRef<'a> {
    /// Boolean.
    Bool(bool),
    /// Signed 8-bit integer.
    Int8(i8),
    /// Signed 16-bit integer.
    Int16(i16),
    /// Signed 32-bit integer.
    Int32(i32),
    /// Signed 64-bit integer.
    Int64(i64),
    /// 32-bit float.
    Float(f32),
    /// 64-bit float.
    Double(f64),
    /// Variable-length bytes.
    Binary(&'a [u8]),
}

impl<'a> CellRef<'a> {
    /// Physical type of the referenced datum.
    #[must_use]
    pub fn physical_type(self) -> DataType {
        match self {
            CellRef::Bool(_) => DataType::Bool,
            CellRef::Int8(_) => DataType::Int8,
            CellRef::Int16(_) => DataType::Int16,
            CellRef::Int32(_) => DataType::Int32,
            CellRef::Int64(_) => DataType::Int64,
            CellRef::Float(_) => DataType::Float,
            CellRef::Double(_) => DataType::Double,
            CellRef::Binary(_) => DataType::Binary,
        }
    }

    /// Produces an owned cell, copying variable-length data into `arena`.
    pub fn materialize(self, arena: &mut Arena) -> Cell {
        match self {
            CellRef::Bool(v) => Cell::Bool(v),
            CellRef::Int8(v) => Cell::Int8(v),
            CellRef::Int16(v) => Cell::Int16(v),
            CellRef::Int32(v) => Cell::Int32(v),
            CellRef::Int64(v) => Cell::Int64(v),
            CellRef::Float(v) => Cell::Float(v),
            CellRef::Double(v) => Cell::Double(v),
            CellRef::Binary(v) => Cell::Binary(arena.alloc_copy(v)),
        }
    }
}

impl Cell {
    /// Returns a borrowed view over this cell.
    #[must_use]
    pub fn as_ref(&self) -> CellRef<'_> {
        match self {
            Cell::Bool(v) => CellRef::Bool(*v),
            Cell::Int8(v) => CellRef::Int8(*v),
            Cell::Int16(v) => CellRef::Int16(*v),
            Cell::Int32(v) => CellRef::Int32(*v),
            Cell::Int64(v) => CellRef::Int64(*v),
            Cell::Float(v) => CellRef::Float(*v),
            Cell::Double(v) => CellRef::Double(*v),
            Cell::Binary(v) => CellRef::Binary(&v[..]),
        }
    }

    /// Physical type of this cell.
    #[must_use]
    pub fn physical_type(&self) -> DataType {
        self.as_ref().physical_type()
    }

    /// Orders two cells of the same physical type; `None` when types differ.
    ///
    /// Floats use the IEEE total order: negative NaNs sort before `-inf`,
    /// `-0.0 < 0.0`, and positive NaNs sort after `+inf`.
    pub fn compare(&self, other: &Cell) -> Option<Ordering> {
        match (self, other) {
            (Cell::Bool(l), Cell::Bool(r)) => Some(l.cmp(r)),
            (Cell::Int8(l), Cell::Int8(r)) => Some(l.cmp(r)),
            (Cell::Int16(l), Cell::Int16(r)) => Some(l.cmp(r)),
            (Cell::Int32(l), Cell::Int32(r)) => Some(l.cmp(r)),
            (Cell::Int64(l), Cell::Int64(r)) => Some(l.cmp(r)),
            (Cell::Float(l), Cell::Float(r)) => Some(l.total_cmp(r)),
            (Cell::Double(l), Cell::Double(r)) => Some(l.total_cmp(r)),
            (Cell::Binary(l), Cell::Binary(r)) => Some(l.cmp(r)),
            _ => None,
        }
    }

    /// Whether no value of this type orders after this one.
    ///
    /// Floats follow the IEEE total order, whose maximum is the positive NaN
    /// with every payload bit set. Variable-length values are never maximal.
    #[must_use]
    pub fn is_max_value(&self) -> bool {
        match self {
            Cell::Bool(v) => *v,
            Cell::Int8(v) => *v == i8::MAX,
            Cell::Int16(v) => *v == i16::MAX,
            Cell::Int32(v) => *v == i32::MAX,
            Cell::Int64(v) => *v == i64::MAX,
            Cell::Float(v) => v.to_bits() == F32_MAX_BITS,
            Cell::Double(v) => v.to_bits() == F64_MAX_BITS,
            Cell::Binary(_) => false,
        }
    }

    /// Immediate successor in the type's ordering, or `None` for the maximum.
    ///
    /// Binary successors append a zero byte and are allocated in `arena`.
    pub fn successor(&self, arena: &mut Arena) -> Option<Cell> {
        match self {
            Cell::Bool(v) => (!*v).then_some(Cell::Bool(true)),
            Cell::Int8(v) => v.checked_add(1).map(Cell::Int8),
            Cell::Int16(v) => v.checked_add(1).map(Cell::Int16),
            Cell::Int32(v) => v.checked_add(1).map(Cell::Int32),
            Cell::Int64(v) => v.checked_add(1).map(Cell::Int64),
            Cell::Float(v) => next_up_f32(*v).map(Cell::Float),
            Cell::Double(v) => next_up_f64(*v).map(Cell::Double),
            Cell::Binary(v) => Some(Cell::Binary(arena.alloc_with_suffix(v, 0))),
        }
    }

    /// Whether `upper` is the immediate successor of `lower`.
    #[must_use]
    pub fn are_consecutive(lower: &Cell, upper: &Cell) -> bool {
        match (lower, upper) {
            (Cell::Bool(l), Cell::Bool(r)) => !*l && *r,
            (Cell::Int8(l), Cell::Int8(r)) => l.checked_add(1) == Some(*r),
            (Cell::Int16(l), Cell::Int16(r)) => l.checked_add(1) == Some(*r),
            (Cell::Int32(l), Cell::Int32(r)) => l.checked_add(1) == Some(*r),
            (Cell::Int64(l), Cell::Int64(r)) => l.checked_add(1) == Some(*r),
            (Cell::Float(l), Cell::Float(r)) => {
                next_up_f32(*l).map(f32::to_bits) == Some(r.to_bits())
            }
            (Cell::Double(l), Cell::Double(r)) => {
                next_up_f64(*l).map(f64::to_bits) == Some(r.to_bits())
            }
            (Cell::Binary(l), Cell::Binary(r)) => {
                r.len() == l.len() + 1 && r.starts_with(l) && r[l.len()] == 0
            }
            _ => false,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Bool(v) => write!(f, "{v}"),
            Cell::Int8(v) => write!(f, "{v}"),
            Cell::Int16(v) => write!(f, "{v}"),
            Cell::Int32(v) => write!(f, "{v}"),
            Cell::Int64(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v}"),
            Cell::Double(v) => write!(f, "{v}"),
            Cell::Binary(v) => match std::str::from_utf8(v) {
                Ok(text) => write!(f, "{text:?}"),
                Err(_) => write!(f, "{v:?}"),
            },
        }
    }
}

// Total-order keys: flipping negative patterns and setting the sign bit of
// positive ones makes the unsigned key order match `total_cmp`.
fn ordered_key_f32(bits: u32) -> u32 {
    if bits >> 31 == 0 {
        bits | 0x8000_0000
    } else {
        !bits
    }
}

fn from_ordered_key_f32(key: u32) -> u32 {
    if key >> 31 == 1 {
        key & 0x7FFF_FFFF
    } else {
        !key
    }
}

fn ordered_key_f64(bits: u64) -> u64 {
    if bits >> 63 == 0 {
        bits | 0x8000_0000_0000_0000
    } else {
        !bits
    }
}

fn from_ordered_key_f64(key: u64) -> u64 {
    if key >> 63 == 1 {
        key & 0x7FFF_FFFF_FFFF_FFFF
    } else {
        !key
    }
}

// Successor in IEEE total order. Only the all-ones positive NaN has none.
fn next_up_f32(v: f32) -> Option<f32> {
    let key = ordered_key_f32(v.to_bits()).checked_add(1)?;
    Some(f32::from_bits(from_ordered_key_f32(key)))
}

fn next_up_f64(v: f64) -> Option<f64> {
    let key = ordered_key_f64(v.to_bits()).checked_add(1)?;
    Some(f64::from_bits(from_ordered_key_f64(key)))
}
