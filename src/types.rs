//! Column types and their storage representation.

use std::fmt;

use arrow::datatypes::{DataType as ArrowType, TimeUnit};

/// Closed set of column types understood by the tablet store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Boolean.
    Bool,
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Microseconds since the Unix epoch, stored as `Int64`.
    UnixtimeMicros,
    /// 32-bit IEEE float.
    Float,
    /// 64-bit IEEE float.
    Double,
    /// UTF-8 string, stored as `Binary`.
    String,
    /// Arbitrary bytes.
    Binary,
}

impl DataType {
    /// Returns the storage-level type used to hold values of this type.
    #[must_use]
    pub fn physical_type(self) -> DataType {
        match self {
            DataType::UnixtimeMicros => DataType::Int64,
            DataType::String => DataType::Binary,
            other => other,
        }
    }

    /// Returns the lower-case name used in messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DataType::Bool => "bool",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::UnixtimeMicros => "unixtime_micros",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::String => "string",
            DataType::Binary => "binary",
        }
    }

    /// Byte width of fixed-width types; `None` for variable-length types.
    #[must_use]
    pub fn size(self) -> Option<usize> {
        match self {
            DataType::Bool | DataType::Int8 => Some(1),
            DataType::Int16 => Some(2),
            DataType::Int32 | DataType::Float => Some(4),
            DataType::Int64 | DataType::UnixtimeMicros | DataType::Double => Some(8),
            DataType::String | DataType::Binary => None,
        }
    }

    /// Whether values of this type have no fixed width.
    #[must_use]
    pub fn is_variable_length(self) -> bool {
        self.size().is_none()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<&ArrowType> for DataType {
    type Error = ArrowType;

    /// Maps an Arrow type onto a column type, handing back the Arrow type when
    /// it has no counterpart.
    fn try_from(value: &ArrowType) -> Result<Self, Self::Error> {
        match value {
            ArrowType::Boolean => Ok(DataType::Bool),
            ArrowType::Int8 => Ok(DataType::Int8),
            ArrowType::Int16 => Ok(DataType::Int16),
            ArrowType::Int32 => Ok(DataType::Int32),
            ArrowType::Int64 => Ok(DataType::Int64),
            ArrowType::Timestamp(TimeUnit::Microsecond, _) => Ok(DataType::UnixtimeMicros),
            ArrowType::Float32 => Ok(DataType::Float),
            ArrowType::Float64 => Ok(DataType::Double),
            ArrowType::Utf8 => Ok(DataType::String),
            ArrowType::Binary => Ok(DataType::Binary),
            other => Err(other.clone()),
        }
    }
}
