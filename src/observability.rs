//! Structured logging for predicate translation.
//!
//! Every event is a `tracing` event under the `tablet_scan` target with an
//! `event` name and the `component` that emitted it. No subscriber is
//! installed here.
//!
//! | event | level | component | fields |
//! |-------|-------|-----------|--------|
//! | `value_rejected` | warn | `predicate` | `column`, `op`, `error` |
//! | `operator_rejected` | warn | `predicate` | `column`, `op` |
//! | `unbounded_range_dropped` | debug | `predicate` | `column`, `op` |
//! | `null_filter_skipped` | debug | `predicate` | `column` |
//! | `predicate_added` | debug | `scan_spec` | `column`, `predicate` |
//! | `predicate_merged` | debug | `scan_spec` | `column`, `predicate` |
//!
//! The two warn events fire right before the matching [`PredicateError`] is
//! returned, so a failed `add_to_scan_spec` always leaves one behind.
//!
//! [`PredicateError`]: crate::PredicateError

/// Target for all log events emitted by this crate.
pub(crate) const SCAN_TARGET: &str = "tablet_scan";

/// Debug-level event, e.g.
/// `log_debug!(component = "scan_spec", event = "predicate_added", column = %name)`.
macro_rules! log_debug {
    ($($field:tt)*) => {
        ::tracing::debug!(target: $crate::observability::SCAN_TARGET, $($field)*)
    };
}

/// Warn-level event for rejected predicates.
macro_rules! log_warn {
    ($($field:tt)*) => {
        ::tracing::warn!(target: $crate::observability::SCAN_TARGET, $($field)*)
    };
}

pub(crate) use log_debug;
pub(crate) use log_warn;
