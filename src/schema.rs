//! Column descriptors and the table schema predicates are built against.

use std::{collections::HashMap, fmt, sync::Arc};

use arrow::datatypes::{Field, Schema as ArrowSchema};

use crate::{
    error::{PredicateError, Result},
    predicate::{ComparisonOp, Predicate},
    types::DataType,
    value::Value,
};

/// Immutable description of one column.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ColumnSchema {
    name: Arc<str>,
    data_type: DataType,
    nullable: bool,
}

impl ColumnSchema {
    /// Creates a non-nullable column.
    #[must_use]
    pub fn new<N>(name: N, data_type: DataType) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            data_type,
            nullable: false,
        }
    }

    /// Creates a nullable column.
    #[must_use]
    pub fn nullable<N>(name: N, data_type: DataType) -> Self
    where
        N: Into<Arc<str>>,
    {
        Self {
            name: name.into(),
            data_type,
            nullable: true,
        }
    }

    /// Column name, unique within its table.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared column type.
    #[must_use]
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// Storage-level type of the column.
    #[must_use]
    pub fn physical_type(&self) -> DataType {
        self.data_type.physical_type()
    }

    /// Whether the column may hold NULL.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if self.nullable {
            f.write_str(" NULLABLE")
        } else {
            f.write_str(" NOT NULL")
        }
    }
}

impl TryFrom<&Field> for ColumnSchema {
    type Error = PredicateError;

    fn try_from(field: &Field) -> Result<Self> {
        let data_type =
            DataType::try_from(field.data_type()).map_err(|data_type| {
                PredicateError::UnsupportedType {
                    column: field.name().clone(),
                    data_type,
                }
            })?;
        Ok(Self {
            name: Arc::from(field.name().as_str()),
            data_type,
            nullable: field.is_nullable(),
        })
    }
}

/// Ordered set of uniquely named columns.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
    by_name: HashMap<Arc<str>, usize>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate column names.
    pub fn new(columns: Vec<ColumnSchema>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            if by_name.insert(Arc::clone(&column.name), idx).is_some() {
                return Err(PredicateError::DuplicateColumn(column.name().to_string()));
            }
        }
        Ok(Self { columns, by_name })
    }

    /// Columns in declaration order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    /// Position of the named column.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.column_index(name).map(|idx| &self.columns[idx])
    }

    /// Builds a comparison predicate on the named column.
    ///
    /// The value is not type-checked here; mismatches surface when the
    /// predicate is added to a scan.
    pub fn new_comparison_predicate<V>(
        &self,
        name: &str,
        op: ComparisonOp,
        value: V,
    ) -> Result<Predicate>
    where
        V: Into<Value>,
    {
        let column = self.require(name)?;
        Ok(Predicate::comparison(column.clone(), op, value))
    }

    /// Builds an `IS NOT NULL` predicate on the named column.
    pub fn new_is_not_null_predicate(&self, name: &str) -> Result<Predicate> {
        let column = self.require(name)?;
        Ok(Predicate::is_not_null(column.clone()))
    }

    fn require(&self, name: &str) -> Result<&ColumnSchema> {
        self.column(name)
            .ok_or_else(|| PredicateError::UnknownColumn(name.to_string()))
    }
}

impl TryFrom<&ArrowSchema> for Schema {
    type Error = PredicateError;

    fn try_from(schema: &ArrowSchema) -> Result<Self> {
        let columns = schema
            .fields()
            .iter()
            .map(|field| ColumnSchema::try_from(field.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Schema::new(columns)
    }
}

#[cfg(test)]
mod tests {
    use arrow::datatypes::{DataType as ArrowType, TimeUnit};

    use super::*;

    fn arrow_schema() -> ArrowSchema {
        ArrowSchema::new(vec![
            Field::new("id", ArrowType::Int64, false),
            Field::new("name", ArrowType::Utf8, true),
            Field::new(
                "seen_at",
                ArrowType::Timestamp(TimeUnit::Microsecond, None),
                true,
            ),
        ])
    }

    #[test]
    fn schema_from_arrow_keeps_order_and_nullability() {
        let schema = Schema::try_from(&arrow_schema()).expect("supported types");
        let names: Vec<_> = schema.columns().iter().map(ColumnSchema::name).collect();
        assert_eq!(names, vec!["id", "name", "seen_at"]);

        let seen_at = schema.column("seen_at").expect("column exists");
        assert_eq!(seen_at.data_type(), DataType::UnixtimeMicros);
        assert_eq!(seen_at.physical_type(), DataType::Int64);
        assert!(seen_at.is_nullable());
        assert!(!schema.column("id").expect("column exists").is_nullable());
        assert_eq!(schema.column_index("name"), Some(1));
    }

    #[test]
    fn unsupported_arrow_field_is_rejected() {
        let field = Field::new("day", ArrowType::Date32, false);
        assert_eq!(
            ColumnSchema::try_from(&field).unwrap_err(),
            PredicateError::UnsupportedType {
                column: "day".to_string(),
                data_type: ArrowType::Date32,
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Schema::new(vec![
            ColumnSchema::new("a", DataType::Int32),
            ColumnSchema::new("a", DataType::String),
        ])
        .unwrap_err();
        assert_eq!(err, PredicateError::DuplicateColumn("a".to_string()));
    }

    #[test]
    fn predicates_require_known_columns() {
        let schema = Schema::new(vec![ColumnSchema::new("age", DataType::Int32)])
            .expect("unique names");
        assert!(schema
            .new_comparison_predicate("age", ComparisonOp::Equal, 3i32)
            .is_ok());
        assert_eq!(
            schema
                .new_comparison_predicate("height", ComparisonOp::Equal, 3i32)
                .unwrap_err(),
            PredicateError::UnknownColumn("height".to_string())
        );
        assert!(schema.new_is_not_null_predicate("missing").is_err());
    }

    #[test]
    fn display_includes_nullability() {
        assert_eq!(
            ColumnSchema::nullable("name", DataType::String).to_string(),
            "name string NULLABLE"
        );
    }
}
