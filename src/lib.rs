#![deny(missing_docs)]
//! Client-side scan predicate translation for a columnar tablet store.
//!
//! Scan builders describe filters with type-erased [`Predicate`] handles:
//! a column, a [`ComparisonOp`] and a [`Value`]. Before the scan starts, each
//! handle adds itself to a [`ScanSpec`], which checks the value against the
//! column's physical type and reduces the comparison to one of the engine's
//! native [`ColumnPredicate`] shapes: equality, half-open range, or
//! `IS NOT NULL`. Values derived during translation, such as the successor
//! used to turn `<=` into `<`, are allocated in a scan-scoped [`Arena`].
//!
//! ```
//! use tablet_scan::{Arena, ColumnSchema, ComparisonOp, DataType, ScanSpec, Schema};
//!
//! let schema = Schema::new(vec![
//!     ColumnSchema::new("age", DataType::Int32),
//!     ColumnSchema::new("name", DataType::String),
//! ])?;
//! let mut spec = ScanSpec::new();
//! let mut arena = Arena::new();
//!
//! schema
//!     .new_comparison_predicate("age", ComparisonOp::LessEqual, 10)?
//!     .add_to_scan_spec(&mut spec, &mut arena)?;
//! schema
//!     .new_comparison_predicate("name", ComparisonOp::Equal, "bob")?
//!     .add_to_scan_spec(&mut spec, &mut arena)?;
//!
//! assert_eq!(spec.to_string(), "`age` < 11 AND `name` = \"bob\"");
//! # Ok::<(), tablet_scan::PredicateError>(())
//! ```

mod observability;

/// Scan-scoped bump allocation.
pub mod arena;
/// Physically-typed cells.
pub mod cell;
/// Native column predicates and their constructors.
pub mod column_predicate;
/// Crate error type.
pub mod error;
/// User-facing predicate handles.
pub mod predicate;
/// Scan specifications.
pub mod scan_spec;
/// Column descriptors and schemas.
pub mod schema;
/// Column types.
pub mod types;
/// Type-erased predicate values.
pub mod value;

pub use crate::{
    arena::{Arena, ArenaOptions},
    cell::{Cell, CellRef},
    column_predicate::{ColumnPredicate, PredicateType},
    error::{PredicateError, Result},
    predicate::{
        ComparisonOp, ComparisonPredicateData, IsNotNullPredicateData, Predicate, PredicateData,
    },
    scan_spec::ScanSpec,
    schema::{ColumnSchema, Schema},
    types::DataType,
    value::Value,
};
