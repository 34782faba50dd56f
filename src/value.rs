//! User-facing, type-erased predicate values.

use std::fmt;

use bytes::Bytes;

use crate::{
    cell::CellRef,
    error::{PredicateError, Result},
    types::DataType,
};

/// Scalar supplied by the caller when building a predicate.
///
/// A value only records its broad kind. Whether it is usable against a column
/// is decided by [`Value::check_type_and_get_cell`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal, narrowed to the column width on use.
    Int(i64),
    /// 32-bit float literal.
    Float(f32),
    /// 64-bit float literal.
    Double(f64),
    /// String or binary literal.
    Slice(Bytes),
}

impl Value {
    /// Boolean value.
    #[must_use]
    pub fn from_bool(v: bool) -> Self {
        Value::Bool(v)
    }

    /// Integer value usable with any integer or timestamp column.
    #[must_use]
    pub fn from_int(v: i64) -> Self {
        Value::Int(v)
    }

    /// Value for a `float` column.
    #[must_use]
    pub fn from_float(v: f32) -> Self {
        Value::Float(v)
    }

    /// Value for a `double` column.
    #[must_use]
    pub fn from_double(v: f64) -> Self {
        Value::Double(v)
    }

    /// Copies a string into a new value.
    #[must_use]
    pub fn copy_string(v: &str) -> Self {
        Value::Slice(Bytes::copy_from_slice(v.as_bytes()))
    }

    /// Copies raw bytes into a new value.
    #[must_use]
    pub fn copy_binary(v: &[u8]) -> Self {
        Value::Slice(Bytes::copy_from_slice(v))
    }

    /// Name of the value's kind as it appears in errors.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Double(_) => "double",
            Value::Slice(_) => "slice",
        }
    }

    /// Checks this value against a column's type and returns a view of it in
    /// the column's physical representation.
    ///
    /// Integers are narrowed to the column width and rejected when they do not
    /// fit. Every other kind must match exactly.
    pub fn check_type_and_get_cell(
        &self,
        column: &str,
        data_type: DataType,
    ) -> Result<CellRef<'_>> {
        let physical = data_type.physical_type();
        let out_of_range = |value: i64| PredicateError::ValueOutOfRange {
            column: column.to_string(),
            data_type,
            value,
        };
        match (physical, self) {
            (DataType::Bool, Value::Bool(v)) => Ok(CellRef::Bool(*v)),
            (DataType::Int8, Value::Int(v)) => i8::try_from(*v)
                .map(CellRef::Int8)
                .map_err(|_| out_of_range(*v)),
            (DataType::Int16, Value::Int(v)) => i16::try_from(*v)
                .map(CellRef::Int16)
                .map_err(|_| out_of_range(*v)),
            (DataType::Int32, Value::Int(v)) => i32::try_from(*v)
                .map(CellRef::Int32)
                .map_err(|_| out_of_range(*v)),
            (DataType::Int64, Value::Int(v)) => Ok(CellRef::Int64(*v)),
            (DataType::Float, Value::Float(v)) => Ok(CellRef::Float(*v)),
            (DataType::Double, Value::Double(v)) => Ok(CellRef::Double(*v)),
            (DataType::Binary, Value::Slice(v)) => Ok(CellRef::Binary(&v[..])),
            (_, value) => Err(PredicateError::TypeMismatch {
                column: column.to_string(),
                expected: data_type,
                actual: value.kind_name(),
            }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Slice(v) => match std::str::from_utf8(v) {
                Ok(text) => write!(f, "{text:?}"),
                Err(_) => write!(f, "{v:?}"),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::copy_string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Slice(Bytes::from(value))
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::copy_binary(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Slice(Bytes::from(value))
    }
}

impl From<Bytes> for Value {
    fn from(value: Bytes) -> Self {
        Value::Slice(value)
    }
}
