//! Side-by-side comparison of all root-finding methods on one expression.
//!
//! The comparator compiles the expression once, then runs each method for
//! which parameters were supplied. The runs are independent pure
//! computations over the shared compiled function, so they execute in
//! parallel. Every per-method failure, such as a bracket without a sign
//! change or a derivative that fails to compile, is captured as that
//! method's entry and never aborts the other methods: the comparison is
//! best-effort and always returns whatever subset succeeded plus the
//! failure reasons for the rest.

use serde::{Deserialize, Serialize};

use crate::api::{BisectionParams, NewtonParams, SecantParams};
use crate::errors::{FunctionError, SolveError};
use crate::function::Function;
use crate::methods::{bisection, newton, secant};
use crate::result::MethodResult;
use crate::settings::Settings;

/// Per-method parameters for a comparison run.
///
/// A method whose entry is `None` is skipped; the comparison covers
/// whichever subset the caller supplies parameters for.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct CompareParams {
    /// Bracket for the bisection method
    pub bisection: Option<BisectionParams>,
    /// Initial guess for Newton-Raphson
    pub newton: Option<NewtonParams>,
    /// Two initial guesses for the secant method
    pub secant: Option<SecantParams>,
}

/// One method's entry in a comparison: either a full result or the reason
/// the run could not start.
///
/// A run that started but did not converge (zero derivative, stagnation,
/// iteration cap) is still `Solved`, carrying its diagnostics on the
/// [`MethodResult`] itself.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MethodOutcome {
    /// The method ran to termination and produced a result
    Solved(MethodResult),
    /// The method could not run at all
    Failed {
        #[serde(rename = "failureReason")]
        failure_reason: String,
    },
}

impl MethodOutcome {
    fn from_run(run: Result<MethodResult, SolveError>) -> Self {
        match run {
            Ok(result) => MethodOutcome::Solved(result),
            Err(error) => MethodOutcome::Failed {
                failure_reason: error.to_string(),
            },
        }
    }

    /// The method's result, when the run produced one.
    pub fn result(&self) -> Option<&MethodResult> {
        match self {
            MethodOutcome::Solved(result) => Some(result),
            MethodOutcome::Failed { .. } => None,
        }
    }
}

/// The assembled side-by-side comparison for one expression.
#[derive(Debug, Serialize)]
pub struct Comparison {
    /// The expression all methods ran against
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bisection: Option<MethodOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newton: Option<MethodOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secant: Option<MethodOutcome>,
}

/// Runs every method with supplied parameters against one expression.
///
/// # Errors
/// Returns a [`FunctionError`] only when the shared expression fails to
/// compile; nothing can run without a compiled function. Per-method
/// failures are captured in the corresponding [`MethodOutcome`] instead.
pub fn compare(
    expression: &str,
    params: &CompareParams,
    settings: &Settings,
) -> Result<Comparison, FunctionError> {
    let f = Function::parse(expression)?;

    let ((bisection, newton), secant) = rayon::join(
        || {
            rayon::join(
                || {
                    params.bisection.map(|p| {
                        MethodOutcome::from_run(bisection::solve(&f, p.a, p.b, settings))
                    })
                },
                || params.newton.map(|p| newton_outcome(&f, p.x0, settings)),
            )
        },
        || {
            params
                .secant
                .map(|p| MethodOutcome::from_run(secant::solve(&f, p.x0, p.x1, settings)))
        },
    );

    Ok(Comparison {
        expression: expression.to_string(),
        bisection,
        newton,
        secant,
    })
}

/// Newton needs the derivative compiled first; a differentiation failure is
/// that method's failure, not the comparison's.
fn newton_outcome(f: &Function, x0: f64, settings: &Settings) -> MethodOutcome {
    match f.derivative() {
        Ok(f_prime) => MethodOutcome::from_run(newton::solve(f, &f_prime, x0, settings)),
        Err(error) => MethodOutcome::Failed {
            failure_reason: error.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Failure;
    use approx::assert_relative_eq;

    fn all_params(a: f64, b: f64, x0: f64, x1: f64, guess: f64) -> CompareParams {
        CompareParams {
            bisection: Some(BisectionParams { a, b }),
            newton: Some(NewtonParams { x0: guess }),
            secant: Some(SecantParams { x0, x1 }),
        }
    }

    #[test]
    fn test_all_methods_agree_on_the_root() {
        let params = all_params(1.0, 2.0, 1.0, 1.5, 1.5);
        let comparison =
            compare("x^3 - x - 1", &params, &Settings::default()).unwrap();

        for outcome in [
            comparison.bisection.as_ref().unwrap(),
            comparison.newton.as_ref().unwrap(),
            comparison.secant.as_ref().unwrap(),
        ] {
            let result = outcome.result().unwrap();
            assert!(result.converged);
            assert_relative_eq!(result.root.unwrap(), 1.324718, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_newton_failure_does_not_block_other_methods() {
        // The derivative of x^2 - 2 vanishes at the chosen guess 0
        let params = all_params(0.0, 2.0, 0.0, 2.0, 0.0);
        let comparison =
            compare("x^2 - 2", &params, &Settings::default()).unwrap();

        let newton = comparison.newton.unwrap();
        let newton_result = newton.result().unwrap();
        assert!(!newton_result.converged);
        assert!(matches!(
            newton_result.failure,
            Some(Failure::ZeroDerivative { .. })
        ));

        for outcome in [&comparison.bisection, &comparison.secant] {
            let result = outcome.as_ref().unwrap().result().unwrap();
            assert!(result.converged);
            assert_relative_eq!(result.root.unwrap(), 2.0f64.sqrt(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_bad_bracket_is_captured_per_method() {
        let params = CompareParams {
            bisection: Some(BisectionParams { a: 2.0, b: 3.0 }),
            newton: Some(NewtonParams { x0: 1.5 }),
            secant: None,
        };
        let comparison =
            compare("x^2 - 2", &params, &Settings::default()).unwrap();

        let bisection = comparison.bisection.unwrap();
        assert!(bisection.result().is_none());
        assert!(matches!(bisection, MethodOutcome::Failed { .. }));

        assert!(comparison.newton.unwrap().result().unwrap().converged);
        assert!(comparison.secant.is_none());
    }

    #[test]
    fn test_parse_error_fails_the_whole_comparison() {
        let params = all_params(0.0, 2.0, 0.0, 2.0, 1.0);
        assert!(compare("x +* 2", &params, &Settings::default()).is_err());
    }

    #[test]
    fn test_skipped_methods_are_not_serialized() {
        let params = CompareParams {
            newton: Some(NewtonParams { x0: 1.5 }),
            ..CompareParams::default()
        };
        let comparison =
            compare("x^2 - 2", &params, &Settings::default()).unwrap();
        let json = serde_json::to_value(&comparison).unwrap();
        assert!(json.get("bisection").is_none());
        assert!(json.get("secant").is_none());
        assert!(json["newton"]["converged"].as_bool().unwrap());
    }
}
