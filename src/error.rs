use arrow::datatypes::DataType as ArrowType;
use thiserror::Error;

use crate::{predicate::ComparisonOp, types::DataType};

/// Errors raised while building predicates or contributing them to a scan.
#[derive(Debug, Error, PartialEq)]
pub enum PredicateError {
    /// The value's declared kind does not match the column's physical type.
    #[error("type mismatch for column '{column}': expected {expected} value, got {actual}")]
    TypeMismatch {
        /// Column the value was checked against.
        column: String,
        /// Physical type of the column.
        expected: DataType,
        /// Kind of the supplied value.
        actual: &'static str,
    },
    /// An integer value does not fit the column's width.
    #[error("value {value} out of bounds for {data_type} column '{column}'")]
    ValueOutOfRange {
        /// Column the value was checked against.
        column: String,
        /// Physical type of the column.
        data_type: DataType,
        /// Offending value.
        value: i64,
    },
    /// The comparison operator has no translation into a column predicate.
    #[error("invalid comparison op {op} on column '{column}'")]
    InvalidOperator {
        /// Column the predicate targets.
        column: String,
        /// Offending operator.
        op: ComparisonOp,
    },
    /// A raw operator tag outside the known operator set.
    #[error("invalid comparison op tag: {0}")]
    InvalidOperatorTag(i32),
    /// No column with the given name exists in the schema.
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    /// A schema was built with two columns sharing a name.
    #[error("duplicate column name: {0}")]
    DuplicateColumn(String),
    /// An Arrow field type with no column type counterpart.
    #[error("unsupported type {data_type:?} for column '{column}'")]
    UnsupportedType {
        /// Column carrying the type.
        column: String,
        /// Arrow type that could not be mapped.
        data_type: ArrowType,
    },
    /// Arena chunk sizes are zero or inverted.
    #[error("invalid arena options: initial chunk {initial} bytes, max chunk {max} bytes")]
    InvalidArenaOptions {
        /// Requested initial chunk size.
        initial: usize,
        /// Requested maximum chunk size.
        max: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = PredicateError> = std::result::Result<T, E>;
