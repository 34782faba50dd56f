//! Accumulates the column predicates of one scan.

use std::{
    collections::{btree_map::Entry, BTreeMap},
    fmt,
};

use crate::{
    column_predicate::{ColumnPredicate, PredicateType},
    observability::log_debug,
};

/// Conjunction of column predicates pushed down with a scan.
///
/// At most one predicate is kept per column: adding a second predicate on a
/// column intersects it with the first, so the order of additions never
/// changes the resulting set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScanSpec {
    predicates: BTreeMap<String, ColumnPredicate>,
}

impl ScanSpec {
    /// Creates a spec without predicates.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `predicate`, merging it with any predicate already on its column.
    pub fn add_predicate(&mut self, predicate: ColumnPredicate) {
        match self.predicates.entry(predicate.column().name().to_string()) {
            Entry::Occupied(mut existing) => {
                existing.get_mut().merge(&predicate);
                log_debug!(
                    component = "scan_spec",
                    event = "predicate_merged",
                    column = %existing.key(),
                    predicate = %existing.get(),
                );
            }
            Entry::Vacant(slot) => {
                log_debug!(
                    component = "scan_spec",
                    event = "predicate_added",
                    column = %slot.key(),
                    predicate = %predicate,
                );
                slot.insert(predicate);
            }
        }
    }

    /// Predicates in column-name order.
    pub fn predicates(&self) -> impl ExactSizeIterator<Item = &ColumnPredicate> {
        self.predicates.values()
    }

    /// Predicate on the named column, if any.
    #[must_use]
    pub fn predicate(&self, column: &str) -> Option<&ColumnPredicate> {
        self.predicates.get(column)
    }

    /// Number of constrained columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Whether no predicate has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Whether some predicate matches nothing, so the scan returns no rows.
    #[must_use]
    pub fn can_short_circuit(&self) -> bool {
        self.predicates
            .values()
            .any(|predicate| predicate.predicate_type() == PredicateType::None)
    }
}

impl fmt::Display for ScanSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, predicate) in self.predicates.values().enumerate() {
            if idx > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cell::Cell, schema::ColumnSchema, types::DataType};

    fn at_least(column: &ColumnSchema, v: i32) -> ColumnPredicate {
        ColumnPredicate::range(column.clone(), Some(Cell::Int32(v)), None)
    }

    fn below(column: &ColumnSchema, v: i32) -> ColumnPredicate {
        ColumnPredicate::range(column.clone(), None, Some(Cell::Int32(v)))
    }

    #[test]
    fn same_column_predicates_merge() {
        let age = ColumnSchema::new("age", DataType::Int32);
        let mut spec = ScanSpec::new();
        spec.add_predicate(at_least(&age, 3));
        spec.add_predicate(below(&age, 11));

        assert_eq!(spec.len(), 1);
        assert_eq!(
            spec.predicate("age"),
            Some(&ColumnPredicate::range(
                age,
                Some(Cell::Int32(3)),
                Some(Cell::Int32(11))
            ))
        );
        assert!(!spec.can_short_circuit());
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = ColumnSchema::new("a", DataType::Int32);
        let b = ColumnSchema::new("b", DataType::Int32);
        let preds = vec![at_least(&a, 1), below(&b, 5), below(&a, 9), at_least(&b, 2)];

        let mut forward = ScanSpec::new();
        for pred in preds.iter().cloned() {
            forward.add_predicate(pred);
        }
        let mut backward = ScanSpec::new();
        for pred in preds.into_iter().rev() {
            backward.add_predicate(pred);
        }
        assert_eq!(forward, backward);
        assert_eq!(forward.to_string(), "`a` >= 1 AND `a` < 9 AND `b` >= 2 AND `b` < 5");
    }

    #[test]
    fn disjoint_ranges_short_circuit() {
        let age = ColumnSchema::new("age", DataType::Int32);
        let mut spec = ScanSpec::new();
        spec.add_predicate(below(&age, 3));
        spec.add_predicate(at_least(&age, 5));
        assert!(spec.can_short_circuit());
        assert_eq!(
            spec.predicates().map(ColumnPredicate::predicate_type).collect::<Vec<_>>(),
            vec![PredicateType::None]
        );
    }

    #[test]
    fn empty_spec() {
        let spec = ScanSpec::new();
        assert!(spec.is_empty());
        assert_eq!(spec.predicates().len(), 0);
        assert_eq!(spec.to_string(), "");
    }
}
