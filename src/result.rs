//! Terminal results of a root-finding run.
//!
//! A solver produces exactly one immutable [`MethodResult`] per run: the root
//! estimate, convergence diagnostics, wall-clock timing, and the full ordered
//! iteration history. Results serialize to the wire shape consumed by
//! external collaborators:
//!
//! ```json
//! {
//!   "method": "newton",
//!   "root": 1.4142135623746899,
//!   "converged": true,
//!   "iterations": 4,
//!   "error": 1.5947243525715749e-12,
//!   "executionTime": 0.000014,
//!   "history": [ { "iteration": 1, "values": [1.5], "fValue": 0.25, "error": 0.0833 } ],
//!   "failureReason": null
//! }
//! ```

use std::time::Instant;

use colored::Colorize;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

use crate::errors::EvalError;
use crate::trace::{IterationRecord, Trace};

/// The root-finding methods offered by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Bracket-based halving search
    Bisection,
    /// Derivative-based linearization search
    Newton,
    /// Two-point finite-difference search
    Secant,
}

impl Method {
    /// Stable lowercase wire name of the method.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Bisection => "bisection",
            Method::Newton => "newton",
            Method::Secant => "secant",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Terminal conditions that end a run without convergence.
///
/// These are annotations on the result, not errors: the run still produces a
/// fully-formed [`MethodResult`] with its partial iteration history. They
/// serialize as their display string under the `failureReason` key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Failure {
    /// Newton-Raphson hit a (near-)zero derivative and could not divide
    #[error("derivative is zero at x = {at}")]
    ZeroDerivative { at: f64 },
    /// The secant method's two most recent function values coincide
    #[error("function values stagnated near x = {at}")]
    Stagnation { at: f64 },
    /// The function was undefined at an iterate
    #[error("evaluation failed at x = {at}: {source}")]
    Domain { at: f64, source: EvalError },
}

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The terminal output of one root-finding run.
///
/// Created once when the run ends and immutable thereafter. Soft
/// non-convergence (`converged = false` with no failure annotation) is a
/// valid outcome carrying the best estimate found within the iteration
/// budget.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodResult {
    /// Which method produced this result
    pub method: Method,
    /// Best root estimate, when one exists
    pub root: Option<f64>,
    /// Whether the run met the configured tolerance
    pub converged: bool,
    /// Number of completed iterations
    pub iterations: usize,
    /// Final error estimate (method-specific; see the engine docs)
    pub error: f64,
    /// Wall-clock time of the whole run, in seconds
    pub execution_time: f64,
    /// Full ordered iteration history
    pub history: Vec<IterationRecord>,
    /// Terminal failure annotation, if the run ended abnormally
    #[serde(rename = "failureReason")]
    pub failure: Option<Failure>,
}

impl MethodResult {
    /// Assembles the immutable result at the end of a run.
    ///
    /// The iteration count is taken from the trace, and the elapsed time is
    /// measured from `started`, which wraps the whole engine call.
    pub(crate) fn finish(
        method: Method,
        root: Option<f64>,
        converged: bool,
        error: f64,
        failure: Option<Failure>,
        trace: Trace,
        started: Instant,
    ) -> Self {
        Self {
            method,
            root,
            converged,
            iterations: trace.len(),
            error,
            execution_time: started.elapsed().as_secs_f64(),
            history: trace.into_records(),
            failure,
        }
    }
}

impl std::fmt::Display for MethodResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.converged {
            "converged".green()
        } else {
            "not converged".red()
        };
        write!(
            f,
            "{}: root = {}, {} after {} iterations (error = {:.3e}, {:.3} ms)",
            self.method.name().cyan(),
            self.root
                .map_or_else(|| "none".to_string(), |root| format!("{root:.6}")),
            status,
            self.iterations,
            self.error,
            self.execution_time * 1e3,
        )?;
        if let Some(failure) = &self.failure {
            write!(f, " [{failure}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_wire_names() {
        assert_eq!(Method::Bisection.name(), "bisection");
        assert_eq!(
            serde_json::to_string(&Method::Newton).unwrap(),
            "\"newton\""
        );
        let parsed: Method = serde_json::from_str("\"secant\"").unwrap();
        assert_eq!(parsed, Method::Secant);
    }

    #[test]
    fn test_serialized_shape() {
        let mut trace = Trace::new();
        trace.record(vec![1.5], 0.25, 0.0833);
        let result = MethodResult::finish(
            Method::Newton,
            Some(1.4142),
            true,
            1e-7,
            None,
            trace,
            Instant::now(),
        );

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["method"], "newton");
        assert_eq!(json["converged"], true);
        assert_eq!(json["iterations"], 1);
        assert!(json["executionTime"].is_number());
        assert!(json["failureReason"].is_null());
        assert_eq!(json["history"][0]["iteration"], 1);
    }

    #[test]
    fn test_failure_serializes_as_string() {
        let failure = Failure::ZeroDerivative { at: 0.0 };
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json, "derivative is zero at x = 0");
    }
}
