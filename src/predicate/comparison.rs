use crate::{
    arena::Arena,
    column_predicate::ColumnPredicate,
    error::{PredicateError, Result},
    observability::{log_debug, log_warn},
    predicate::ComparisonOp,
    scan_spec::ScanSpec,
    schema::ColumnSchema,
    value::Value,
};

/// A column compared against a value.
///
/// Only `=`, `<=` and `>=` translate into column predicates; the remaining
/// operators are rejected when the predicate is added to a scan.
#[derive(Clone, Debug, PartialEq)]
pub struct ComparisonPredicateData {
    column: ColumnSchema,
    op: ComparisonOp,
    value: Value,
}

impl ComparisonPredicateData {
    /// Creates the predicate `column op value`.
    #[must_use]
    pub fn new(column: ColumnSchema, op: ComparisonOp, value: Value) -> Self {
        Self { column, op, value }
    }

    /// Column on the left-hand side.
    #[must_use]
    pub fn column(&self) -> &ColumnSchema {
        &self.column
    }

    /// Comparison operator.
    #[must_use]
    pub fn op(&self) -> ComparisonOp {
        self.op
    }

    /// Value on the right-hand side.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Translates the comparison and adds the result to `spec`.
    ///
    /// The value is checked against the column's type before anything else.
    /// `<=` becomes a half-open range ending at the value's successor; when
    /// that range constrains nothing no predicate is added.
    pub fn add_to_scan_spec(&self, spec: &mut ScanSpec, arena: &mut Arena) -> Result<()> {
        let cell = self
            .value
            .check_type_and_get_cell(self.column.name(), self.column.data_type())
            .map_err(|err| {
                log_warn!(
                    component = "predicate",
                    event = "value_rejected",
                    column = %self.column.name(),
                    op = %self.op,
                    error = %err,
                );
                err
            })?;

        let predicate = match self.op {
            ComparisonOp::LessEqual => {
                let upper = cell.materialize(arena);
                ColumnPredicate::inclusive_range(self.column.clone(), None, Some(upper), arena)
            }
            ComparisonOp::GreaterEqual => Some(ColumnPredicate::range(
                self.column.clone(),
                Some(cell.materialize(arena)),
                None,
            )),
            ComparisonOp::Equal => Some(ColumnPredicate::equality(
                self.column.clone(),
                cell.materialize(arena),
            )),
            ComparisonOp::Less | ComparisonOp::Greater | ComparisonOp::NotEqual => {
                log_warn!(
                    component = "predicate",
                    event = "operator_rejected",
                    column = %self.column.name(),
                    op = %self.op,
                );
                return Err(PredicateError::InvalidOperator {
                    column: self.column.name().to_string(),
                    op: self.op,
                });
            }
        };

        match predicate {
            Some(predicate) => spec.add_predicate(predicate),
            None => {
                log_debug!(
                    component = "predicate",
                    event = "unbounded_range_dropped",
                    column = %self.column.name(),
                    op = %self.op,
                    value = %self.value,
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::{cell::Cell, column_predicate::PredicateType, types::DataType};

    fn translate(column: ColumnSchema, op: ComparisonOp, value: Value) -> Result<ScanSpec> {
        let mut spec = ScanSpec::new();
        let mut arena = Arena::new();
        ComparisonPredicateData::new(column, op, value).add_to_scan_spec(&mut spec, &mut arena)?;
        Ok(spec)
    }

    #[test]
    fn less_equal_becomes_exclusive_successor() {
        let age = ColumnSchema::new("age", DataType::Int32);
        let spec = translate(age.clone(), ComparisonOp::LessEqual, Value::from(10i32))
            .expect("types match");
        assert_eq!(spec.len(), 1);
        assert_eq!(
            spec.predicate("age"),
            Some(&ColumnPredicate::range(age, None, Some(Cell::Int32(11))))
        );
        assert_eq!(spec.to_string(), "`age` < 11");
    }

    #[test]
    fn less_equal_on_string_appends_zero_byte() {
        let name = ColumnSchema::new("name", DataType::String);
        let spec =
            translate(name, ComparisonOp::LessEqual, Value::from("bob")).expect("types match");
        let predicate = spec.predicate("name").expect("predicate added");
        assert_eq!(predicate.lower(), None);
        assert_eq!(
            predicate.upper(),
            Some(&Cell::Binary(Bytes::from_static(b"bob\0")))
        );
    }

    #[test]
    fn greater_equal_is_open_above() {
        let seen = ColumnSchema::new("seen_at", DataType::UnixtimeMicros);
        let spec = translate(seen, ComparisonOp::GreaterEqual, Value::from(1_000i64))
            .expect("types match");
        let predicate = spec.predicate("seen_at").expect("predicate added");
        assert_eq!(predicate.predicate_type(), PredicateType::Range);
        assert_eq!(predicate.lower(), Some(&Cell::Int64(1_000)));
        assert_eq!(predicate.upper(), None);
    }

    #[test]
    fn equal_is_equality() {
        let name = ColumnSchema::new("name", DataType::String);
        let spec = translate(name.clone(), ComparisonOp::Equal, Value::from("bob"))
            .expect("types match");
        assert_eq!(
            spec.predicate("name"),
            Some(&ColumnPredicate::equality(
                name,
                Cell::Binary(Bytes::from_static(b"bob"))
            ))
        );
    }

    #[test]
    fn less_equal_max_policy() {
        let id = ColumnSchema::new("id", DataType::Int64);
        let spec =
            translate(id, ComparisonOp::LessEqual, Value::from(i64::MAX)).expect("types match");
        assert!(spec.is_empty());

        let score = ColumnSchema::nullable("score", DataType::Int16);
        let spec = translate(score, ComparisonOp::LessEqual, Value::from(i16::MAX))
            .expect("types match");
        assert_eq!(spec.to_string(), "`score` IS NOT NULL");

        let flag = ColumnSchema::new("flag", DataType::Bool);
        let spec =
            translate(flag, ComparisonOp::LessEqual, Value::from(true)).expect("types match");
        assert!(spec.is_empty());
    }

    #[test]
    fn type_mismatch_fails_before_operator_dispatch() {
        let age = ColumnSchema::new("age", DataType::Int32);
        for op in [ComparisonOp::Equal, ComparisonOp::LessEqual, ComparisonOp::NotEqual] {
            let err = translate(age.clone(), op, Value::from("ten")).unwrap_err();
            assert!(
                matches!(err, PredicateError::TypeMismatch { .. }),
                "{op}: {err}"
            );
        }
    }

    #[test]
    fn unsupported_operators_are_invalid_arguments() {
        let age = ColumnSchema::new("age", DataType::Int32);
        for op in [ComparisonOp::Less, ComparisonOp::Greater, ComparisonOp::NotEqual] {
            let mut spec = ScanSpec::new();
            let mut arena = Arena::new();
            let err = ComparisonPredicateData::new(age.clone(), op, Value::from(3i32))
                .add_to_scan_spec(&mut spec, &mut arena)
                .unwrap_err();
            assert_eq!(
                err,
                PredicateError::InvalidOperator {
                    column: "age".to_string(),
                    op,
                }
            );
            assert!(spec.is_empty());
            assert_eq!(arena.allocated_bytes(), 0);
        }
    }
}
