//! Append-only iteration trace shared by all root-finding methods.
//!
//! Every solver records one [`IterationRecord`] per algorithm step into a
//! [`Trace`], which is wrapped into the final
//! [`MethodResult`](crate::result::MethodResult) when the run terminates.
//! Records carry the method's working points, the function value at the
//! current iterate, and the current error estimate, so a caller can replay
//! the entire convergence history.

use serde::Serialize;

/// One row of the iteration history.
///
/// `values` carries the method's working points for the step: `[a, b, m]`
/// for bisection, `[x_n]` for Newton-Raphson, and `[x_{n-1}, x_n, x_{n+1}]`
/// for the secant method. `f_value` is the function value at the step's
/// iterate and `error` is the method's error estimate for the step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    /// 1-based iteration index
    pub iteration: usize,
    /// The method's working points for this step
    pub values: Vec<f64>,
    /// Function value at the step's iterate
    pub f_value: f64,
    /// Error estimate for this step
    pub error: f64,
}

/// An append-only accumulator of iteration records.
///
/// Iteration indices are assigned on append and are strictly increasing,
/// starting at 1. The records are consumed as a read-only ordered sequence.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    records: Vec<IterationRecord>,
}

impl Trace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one iteration record, assigning the next iteration index.
    pub fn record(&mut self, values: Vec<f64>, f_value: f64, error: f64) {
        self.records.push(IterationRecord {
            iteration: self.records.len() + 1,
            values,
            f_value,
            error,
        });
    }

    /// Number of recorded iterations.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no iterations have been recorded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The recorded history as a read-only ordered slice.
    pub fn records(&self) -> &[IterationRecord] {
        &self.records
    }

    /// Error estimate of the most recent record, if any.
    pub fn last_error(&self) -> Option<f64> {
        self.records.last().map(|record| record.error)
    }

    /// Consumes the trace, yielding the ordered history.
    pub fn into_records(self) -> Vec<IterationRecord> {
        self.records
    }
}
