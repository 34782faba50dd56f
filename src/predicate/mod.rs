//! User-facing predicates and their translation into column predicates.
//!
//! A [`Predicate`] is an opaque handle built by scan-builder code. Before a
//! scan starts, each handle contributes itself to the scan's [`ScanSpec`],
//! which type-checks its value against the column and reduces it to one of
//! the engine's native predicate shapes.

mod comparison;

use std::fmt;

pub use comparison::ComparisonPredicateData;

use crate::{
    arena::Arena,
    column_predicate::ColumnPredicate,
    error::{PredicateError, Result},
    observability::log_debug,
    scan_spec::ScanSpec,
    schema::ColumnSchema,
    value::Value,
};

/// Comparison operator of a column-versus-value predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Less than or equal to (`<=`).
    LessEqual,
    /// Greater than or equal to (`>=`).
    GreaterEqual,
    /// Equals (`=`).
    Equal,
    /// Less than (`<`).
    Less,
    /// Greater than (`>`).
    Greater,
    /// Not equals (`!=`).
    NotEqual,
}

impl ComparisonOp {
    /// Returns a textual representation of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::Equal => "=",
            ComparisonOp::Less => "<",
            ComparisonOp::Greater => ">",
            ComparisonOp::NotEqual => "!=",
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for ComparisonOp {
    type Error = PredicateError;

    /// Decodes the wire tag of an operator.
    fn try_from(tag: i32) -> Result<Self> {
        match tag {
            0 => Ok(ComparisonOp::LessEqual),
            1 => Ok(ComparisonOp::GreaterEqual),
            2 => Ok(ComparisonOp::Equal),
            3 => Ok(ComparisonOp::Less),
            4 => Ok(ComparisonOp::Greater),
            5 => Ok(ComparisonOp::NotEqual),
            other => Err(PredicateError::InvalidOperatorTag(other)),
        }
    }
}

/// `IS NOT NULL` on one column.
#[derive(Clone, Debug, PartialEq)]
pub struct IsNotNullPredicateData {
    column: ColumnSchema,
}

impl IsNotNullPredicateData {
    /// Creates the predicate for `column`.
    #[must_use]
    pub fn new(column: ColumnSchema) -> Self {
        Self { column }
    }

    /// Column under test.
    #[must_use]
    pub fn column(&self) -> &ColumnSchema {
        &self.column
    }

    /// Adds the null filter; a non-nullable column needs none.
    pub fn add_to_scan_spec(&self, spec: &mut ScanSpec, _arena: &mut Arena) -> Result<()> {
        if !self.column.is_nullable() {
            log_debug!(
                component = "predicate",
                event = "null_filter_skipped",
                column = %self.column.name(),
            );
            return Ok(());
        }
        spec.add_predicate(ColumnPredicate::is_not_null(self.column.clone()));
        Ok(())
    }
}

/// Internal representation owned by a [`Predicate`].
#[derive(Clone, Debug, PartialEq)]
pub enum PredicateData {
    /// Column compared against a value.
    Comparison(ComparisonPredicateData),
    /// Column required to be non-NULL.
    IsNotNull(IsNotNullPredicateData),
}

impl PredicateData {
    /// Expresses this predicate as column predicates added to `spec`.
    ///
    /// On error `spec` is left as it was.
    pub fn add_to_scan_spec(&self, spec: &mut ScanSpec, arena: &mut Arena) -> Result<()> {
        match self {
            PredicateData::Comparison(data) => data.add_to_scan_spec(spec, arena),
            PredicateData::IsNotNull(data) => data.add_to_scan_spec(spec, arena),
        }
    }
}

impl From<ComparisonPredicateData> for PredicateData {
    fn from(data: ComparisonPredicateData) -> Self {
        PredicateData::Comparison(data)
    }
}

impl From<IsNotNullPredicateData> for PredicateData {
    fn from(data: IsNotNullPredicateData) -> Self {
        PredicateData::IsNotNull(data)
    }
}

/// Opaque predicate handle consumed by scan builders.
///
/// Cloning copies the underlying data; clones never share state.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    data: Box<PredicateData>,
}

impl Predicate {
    /// Wraps predicate data, taking ownership of it.
    #[must_use]
    pub fn new<D>(data: D) -> Self
    where
        D: Into<PredicateData>,
    {
        Self {
            data: Box::new(data.into()),
        }
    }

    /// Predicate comparing `column` against `value` with `op`.
    #[must_use]
    pub fn comparison<V>(column: ColumnSchema, op: ComparisonOp, value: V) -> Self
    where
        V: Into<Value>,
    {
        Self::new(ComparisonPredicateData::new(column, op, value.into()))
    }

    /// Predicate requiring `column` to be non-NULL.
    #[must_use]
    pub fn is_not_null(column: ColumnSchema) -> Self {
        Self::new(IsNotNullPredicateData::new(column))
    }

    /// Adds this predicate to `spec`, allocating derived values in `arena`.
    pub fn add_to_scan_spec(&self, spec: &mut ScanSpec, arena: &mut Arena) -> Result<()> {
        self.data.add_to_scan_spec(spec, arena)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataType;

    #[test]
    fn operator_tags_round_trip_known_values() {
        for tag in 0..6 {
            let op = ComparisonOp::try_from(tag).expect("known tag");
            assert!(!op.as_str().is_empty());
        }
        assert_eq!(ComparisonOp::try_from(2), Ok(ComparisonOp::Equal));
        assert_eq!(
            ComparisonOp::try_from(17),
            Err(PredicateError::InvalidOperatorTag(17))
        );
        assert_eq!(ComparisonOp::LessEqual.to_string(), "<=");
    }

    #[test]
    fn clones_are_independent() {
        let original = Predicate::comparison(
            ColumnSchema::new("name", DataType::String),
            ComparisonOp::Equal,
            "bob",
        );
        let clone = original.clone();
        assert_eq!(clone, original);
        assert!(!std::ptr::eq(&*original.data, &*clone.data));

        drop(original);
        let mut spec = ScanSpec::new();
        let mut arena = Arena::new();
        clone
            .add_to_scan_spec(&mut spec, &mut arena)
            .expect("clone still usable");
        assert_eq!(spec.len(), 1);
    }

    #[test]
    fn is_not_null_only_filters_nullable_columns() {
        let mut arena = Arena::new();

        let mut spec = ScanSpec::new();
        Predicate::is_not_null(ColumnSchema::nullable("email", DataType::String))
            .add_to_scan_spec(&mut spec, &mut arena)
            .expect("no value to check");
        assert_eq!(spec.to_string(), "`email` IS NOT NULL");

        let mut spec = ScanSpec::new();
        Predicate::is_not_null(ColumnSchema::new("id", DataType::Int64))
            .add_to_scan_spec(&mut spec, &mut arena)
            .expect("no value to check");
        assert!(spec.is_empty());
    }
}
