//! Physically-typed predicates on a single column.
//!
//! A [`ColumnPredicate`] is what a scan specification carries down into the
//! storage layer. Ranges are half-open, inclusive below and exclusive above,
//! and constructors normalise degenerate shapes: an empty range becomes
//! [`PredicateType::None`] and a range holding a single value becomes an
//! equality.

use std::{cmp::Ordering, fmt};

use crate::{arena::Arena, cell::Cell, schema::ColumnSchema};

/// Shape of a column predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PredicateType {
    /// Matches no rows.
    None,
    /// Matches rows equal to one value.
    Equality,
    /// Matches rows in `[lower, upper)`; either bound may be open.
    Range,
    /// Matches every non-NULL row.
    IsNotNull,
}

#[derive(Clone, Debug, PartialEq)]
enum Bounds {
    None,
    Equality(Cell),
    Range {
        lower: Option<Cell>,
        upper: Option<Cell>,
    },
    IsNotNull,
}

/// A predicate on one column in the column's physical representation.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnPredicate {
    column: ColumnSchema,
    bounds: Bounds,
}

impl ColumnPredicate {
    /// Predicate matching rows equal to `value`.
    #[must_use]
    pub fn equality(column: ColumnSchema, value: Cell) -> Self {
        debug_assert_eq!(value.physical_type(), column.physical_type());
        Self {
            column,
            bounds: Bounds::Equality(value),
        }
    }

    /// Predicate matching rows in the half-open range `[lower, upper)`.
    ///
    /// A missing bound leaves that side open. With both sides open the result
    /// is `IS NOT NULL`, which is what a comparison against any value implies.
    #[must_use]
    pub fn range(column: ColumnSchema, lower: Option<Cell>, upper: Option<Cell>) -> Self {
        debug_assert!(lower
            .iter()
            .chain(upper.iter())
            .all(|cell| cell.physical_type() == column.physical_type()));
        if lower.is_none() && upper.is_none() {
            return Self::is_not_null(column);
        }
        let mut predicate = Self {
            column,
            bounds: Bounds::Range { lower, upper },
        };
        predicate.simplify();
        predicate
    }

    /// Predicate matching rows in the closed range `[lower, upper]`.
    ///
    /// The upper bound is converted to its successor so the result is a
    /// half-open range; derived variable-length values are allocated in
    /// `arena`. An upper bound at the type's maximum leaves the range open
    /// above. When neither bound remains, the range selects every non-NULL
    /// row: nullable columns get `IS NOT NULL` and non-nullable columns get no
    /// predicate at all.
    #[must_use]
    pub fn inclusive_range(
        column: ColumnSchema,
        lower: Option<Cell>,
        upper: Option<Cell>,
        arena: &mut Arena,
    ) -> Option<Self> {
        let upper = upper.and_then(|bound| bound.successor(arena));
        if lower.is_none() && upper.is_none() {
            return column.is_nullable().then(|| Self::is_not_null(column));
        }
        Some(Self::range(column, lower, upper))
    }

    /// Predicate matching every non-NULL row.
    #[must_use]
    pub fn is_not_null(column: ColumnSchema) -> Self {
        Self {
            column,
            bounds: Bounds::IsNotNull,
        }
    }

    /// Predicate matching no rows.
    #[must_use]
    pub fn none(column: ColumnSchema) -> Self {
        Self {
            column,
            bounds: Bounds::None,
        }
    }

    /// Column the predicate applies to.
    #[must_use]
    pub fn column(&self) -> &ColumnSchema {
        &self.column
    }

    /// Shape of the predicate.
    #[must_use]
    pub fn predicate_type(&self) -> PredicateType {
        match self.bounds {
            Bounds::None => PredicateType::None,
            Bounds::Equality(_) => PredicateType::Equality,
            Bounds::Range { .. } => PredicateType::Range,
            Bounds::IsNotNull => PredicateType::IsNotNull,
        }
    }

    /// Inclusive lower bound of a range, or the value of an equality.
    #[must_use]
    pub fn lower(&self) -> Option<&Cell> {
        match &self.bounds {
            Bounds::Equality(value) => Some(value),
            Bounds::Range { lower, .. } => lower.as_ref(),
            Bounds::None | Bounds::IsNotNull => None,
        }
    }

    /// Exclusive upper bound of a range.
    #[must_use]
    pub fn upper(&self) -> Option<&Cell> {
        match &self.bounds {
            Bounds::Range { upper, .. } => upper.as_ref(),
            _ => None,
        }
    }

    /// Intersects `other` into this predicate. Both must target the same column.
    pub fn merge(&mut self, other: &ColumnPredicate) {
        debug_assert_eq!(self.column.name(), other.column.name());
        let merged = match (&self.bounds, &other.bounds) {
            (Bounds::None, _) | (_, Bounds::IsNotNull) => return,
            (_, Bounds::None) => Bounds::None,
            (Bounds::IsNotNull, bounds) => bounds.clone(),
            (Bounds::Equality(left), Bounds::Equality(right)) => {
                if left == right {
                    return;
                }
                Bounds::None
            }
            (Bounds::Equality(value), Bounds::Range { lower, upper }) => {
                if range_contains(lower.as_ref(), upper.as_ref(), value) {
                    return;
                }
                Bounds::None
            }
            (Bounds::Range { lower, upper }, Bounds::Equality(value)) => {
                if range_contains(lower.as_ref(), upper.as_ref(), value) {
                    Bounds::Equality(value.clone())
                } else {
                    Bounds::None
                }
            }
            (
                Bounds::Range { lower, upper },
                Bounds::Range {
                    lower: other_lower,
                    upper: other_upper,
                },
            ) => Bounds::Range {
                lower: pick(lower, other_lower, Ordering::Greater),
                upper: pick(upper, other_upper, Ordering::Less),
            },
        };
        self.bounds = merged;
        self.simplify();
    }

    fn simplify(&mut self) {
        if let Bounds::Range {
            lower: Some(lower),
            upper: Some(upper),
        } = &self.bounds
        {
            if lower.compare(upper) != Some(Ordering::Less) {
                self.bounds = Bounds::None;
            } else if Cell::are_consecutive(lower, upper) {
                self.bounds = Bounds::Equality(lower.clone());
            }
        }
    }
}

// The tighter of two optional bounds; `wins` is the ordering that makes the
// left bound tighter.
fn pick(left: &Option<Cell>, right: &Option<Cell>, wins: Ordering) -> Option<Cell> {
    match (left, right) {
        (Some(l), Some(r)) => {
            if l.compare(r) == Some(wins) {
                Some(l.clone())
            } else {
                Some(r.clone())
            }
        }
        (Some(bound), None) | (None, Some(bound)) => Some(bound.clone()),
        (None, None) => None,
    }
}

fn range_contains(lower: Option<&Cell>, upper: Option<&Cell>, value: &Cell) -> bool {
    let above_lower = lower.map_or(true, |l| l.compare(value) != Some(Ordering::Greater));
    let below_upper = upper.map_or(true, |u| value.compare(u) == Some(Ordering::Less));
    above_lower && below_upper
}

impl fmt::Display for ColumnPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.column.name();
        match &self.bounds {
            Bounds::None => write!(f, "`{name}` NONE"),
            Bounds::IsNotNull => write!(f, "`{name}` IS NOT NULL"),
            Bounds::Equality(value) => write!(f, "`{name}` = {value}"),
            Bounds::Range { lower, upper } => match (lower, upper) {
                (Some(l), Some(u)) => write!(f, "`{name}` >= {l} AND `{name}` < {u}"),
                (Some(l), None) => write!(f, "`{name}` >= {l}"),
                (None, Some(u)) => write!(f, "`{name}` < {u}"),
                (None, None) => write!(f, "`{name}` IS NOT NULL"),
            },
        }
    }
}
