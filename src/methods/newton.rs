//! Newton-Raphson method: derivative-based linearization search.
//!
//! Iterates `x_{n+1} = x_n - f(x_n) / f'(x_n)`, following the tangent line
//! at each point to its zero crossing. Convergence is quadratic near simple
//! roots with a well-behaved derivative; a poor initial guess may
//! legitimately fail to converge, which is reported, not corrected.
//!
//! A (near-)zero derivative is a first-class terminal condition: the run
//! ends with `converged = false` and [`Failure::ZeroDerivative`] instead of
//! dividing.

use std::time::Instant;

use crate::errors::SolveError;
use crate::function::Function;
use crate::result::{Failure, Method, MethodResult};
use crate::settings::{Settings, DERIVATIVE_FLOOR};
use crate::trace::Trace;

/// Finds a root of `f` starting from the initial guess `x0`, using the
/// derivative `f_prime` (usually obtained from
/// [`Function::derivative`]).
///
/// The per-iteration error estimate is the step size `|x_{n+1} - x_n|`;
/// the run converges when the step or the residual `|f(x_n)|` drops to the
/// configured tolerance. Each record carries `[x_n]`, `f(x_n)`, and the step
/// error. At the iteration cap the last iterate is reported with the
/// residual as the final error, matching what the step estimate can no
/// longer tell us.
///
/// # Errors
/// Returns `SolveError::InvalidSettings` for a bad configuration; everything
/// discovered while iterating (zero derivative, domain error) terminates
/// with an annotated unconverged result instead.
pub fn solve(
    f: &Function,
    f_prime: &Function,
    x0: f64,
    settings: &Settings,
) -> Result<MethodResult, SolveError> {
    settings.validate()?;
    let started = Instant::now();
    let mut trace = Trace::new();

    let mut x = x0;
    for _ in 0..settings.max_iterations {
        let fx = match f.eval(x) {
            Ok(value) => value,
            Err(source) => return Ok(domain_failure(x, source, trace, started)),
        };
        let dfx = match f_prime.eval(x) {
            Ok(value) => value,
            Err(source) => return Ok(domain_failure(x, source, trace, started)),
        };

        if dfx.abs() < DERIVATIVE_FLOOR {
            return Ok(MethodResult::finish(
                Method::Newton,
                Some(x),
                false,
                fx.abs(),
                Some(Failure::ZeroDerivative { at: x }),
                trace,
                started,
            ));
        }

        let next = x - fx / dfx;
        let error = (next - x).abs();
        trace.record(vec![x], fx, error);

        if error <= settings.tolerance || fx.abs() <= settings.tolerance {
            return Ok(MethodResult::finish(
                Method::Newton,
                Some(next),
                true,
                error,
                None,
                trace,
                started,
            ));
        }

        x = next;
    }

    // Iteration budget exhausted: report the last iterate with its residual.
    let residual = f.eval(x).map_or(f64::INFINITY, f64::abs);
    Ok(MethodResult::finish(
        Method::Newton,
        Some(x),
        false,
        residual,
        None,
        trace,
        started,
    ))
}

fn domain_failure(
    x: f64,
    source: crate::errors::EvalError,
    trace: Trace,
    started: Instant,
) -> MethodResult {
    let error = trace.last_error().unwrap_or(f64::INFINITY);
    MethodResult::finish(
        Method::Newton,
        Some(x),
        false,
        error,
        Some(Failure::Domain { at: x, source }),
        trace,
        started,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn with_derivative(expression: &str) -> (Function, Function) {
        let f = Function::parse(expression).unwrap();
        let df = f.derivative().unwrap();
        (f, df)
    }

    #[test]
    fn test_sqrt_two() {
        let (f, df) = with_derivative("x^2 - 2");
        let result = solve(&f, &df, 1.5, &Settings::default()).unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.root.unwrap(), 2.0f64.sqrt(), epsilon = 1e-6);
        assert!(result.iterations <= 6);
    }

    #[test]
    fn test_step_error_strictly_decreases_after_first_iteration() {
        let (f, df) = with_derivative("x^2 - 2");
        let result = solve(&f, &df, 1.5, &Settings::default()).unwrap();
        for pair in result.history.windows(2) {
            assert!(pair[1].error < pair[0].error);
        }
    }

    #[test]
    fn test_zero_derivative_terminates_immediately() {
        let (f, df) = with_derivative("x^2");
        let result = solve(&f, &df, 0.0, &Settings::default()).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 0);
        assert!(result.history.is_empty());
        assert!(matches!(
            result.failure,
            Some(Failure::ZeroDerivative { at }) if at == 0.0
        ));
        assert_eq!(result.root, Some(0.0));
    }

    #[test]
    fn test_domain_failure_is_annotated() {
        // From x0 = 100 the first Newton step lands at -40, where sqrt is
        // undefined: x - (sqrt(x) - 3) * 2 * sqrt(x) = -x + 6 * sqrt(x)
        let (f, df) = with_derivative("sqrt(x) - 3");
        let result = solve(&f, &df, 100.0, &Settings::default()).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 1);
        assert!(matches!(result.failure, Some(Failure::Domain { .. })));
    }

    #[test]
    fn test_unconverged_at_iteration_cap() {
        let (f, df) = with_derivative("x^2 - 2");
        let settings = Settings {
            max_iterations: 2,
            ..Settings::default()
        };
        let result = solve(&f, &df, 100.0, &settings).unwrap();
        assert!(!result.converged);
        assert!(result.failure.is_none());
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn test_deterministic_history() {
        let (f, df) = with_derivative("cos(x) - x");
        let first = solve(&f, &df, 1.0, &Settings::default()).unwrap();
        let second = solve(&f, &df, 1.0, &Settings::default()).unwrap();
        assert_eq!(first.history, second.history);
        assert_eq!(first.root, second.root);
    }
}
