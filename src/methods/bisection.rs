//! Bisection method: bracket-based halving search.
//!
//! Given a bracket `[a, b]` where `f` changes sign, the Intermediate Value
//! Theorem guarantees a root inside the interval. Each iteration evaluates
//! the midpoint and keeps the half-bracket whose endpoints still change
//! sign. Convergence is linear: the error bound halves every iteration, and
//! the method cannot diverge given a valid bracket.
//!
//! The reported error estimate is `(b - a) / 2`, the guaranteed theoretical
//! bound from the bracket width. This is deliberately not the residual
//! `|f(m)|`; the bound is what the textbook convergence argument speaks
//! about, and the history is meant to show it halving.

use std::time::Instant;

use crate::errors::SolveError;
use crate::function::Function;
use crate::result::{Failure, Method, MethodResult};
use crate::settings::Settings;
use crate::trace::Trace;

/// Finds a root of `f` inside the bracket `[a, b]`.
///
/// Records `[a, b, m]`, `f(m)`, and the bracket-halving error bound for each
/// iteration. Converges when `|f(m)|` or the error bound drops to the
/// configured tolerance; at the iteration cap the best midpoint is reported
/// with `converged = false`.
///
/// # Errors
/// Returns `SolveError::NoBracket` when `f(a)` and `f(b)` do not have
/// opposite signs (no iteration is performed), and `SolveError::Eval` when
/// an endpoint cannot be evaluated.
pub fn solve(
    f: &Function,
    a: f64,
    b: f64,
    settings: &Settings,
) -> Result<MethodResult, SolveError> {
    settings.validate()?;
    let started = Instant::now();
    let mut trace = Trace::new();

    let (mut a, mut b) = (a, b);
    let mut fa = f.eval(a).map_err(|source| SolveError::Eval { x: a, source })?;
    let fb = f.eval(b).map_err(|source| SolveError::Eval { x: b, source })?;

    if fa * fb > 0.0 {
        return Err(SolveError::NoBracket { a, b, fa, fb });
    }

    // An endpoint may already be a root within tolerance.
    if fa.abs() <= settings.tolerance {
        return Ok(MethodResult::finish(
            Method::Bisection,
            Some(a),
            true,
            fa.abs(),
            None,
            trace,
            started,
        ));
    }
    if fb.abs() <= settings.tolerance {
        return Ok(MethodResult::finish(
            Method::Bisection,
            Some(b),
            true,
            fb.abs(),
            None,
            trace,
            started,
        ));
    }

    for _ in 0..settings.max_iterations {
        let m = (a + b) / 2.0;
        let error = (b - a).abs() / 2.0;

        let fm = match f.eval(m) {
            Ok(value) => value,
            Err(source) => {
                return Ok(MethodResult::finish(
                    Method::Bisection,
                    Some(m),
                    false,
                    error,
                    Some(Failure::Domain { at: m, source }),
                    trace,
                    started,
                ));
            }
        };

        trace.record(vec![a, b, m], fm, error);

        if fm.abs() <= settings.tolerance || error <= settings.tolerance {
            return Ok(MethodResult::finish(
                Method::Bisection,
                Some(m),
                true,
                error,
                None,
                trace,
                started,
            ));
        }

        if fa * fm < 0.0 {
            b = m;
        } else {
            a = m;
            fa = fm;
        }
    }

    // Iteration budget exhausted: report the best midpoint, unconverged.
    let m = (a + b) / 2.0;
    let error = (b - a).abs() / 2.0;
    Ok(MethodResult::finish(
        Method::Bisection,
        Some(m),
        false,
        error,
        None,
        trace,
        started,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_root() {
        let f = Function::parse("x^3 - 2*x - 5").unwrap();
        let result = solve(&f, 2.0, 3.0, &Settings::default()).unwrap();
        assert!(result.converged);
        assert_relative_eq!(result.root.unwrap(), 2.094551, epsilon = 1e-5);
        assert!(result.failure.is_none());
        assert_eq!(result.iterations, result.history.len());
    }

    #[test]
    fn test_error_bound_halves_each_step() {
        let f = Function::parse("x^3 - 2*x - 5").unwrap();
        let result = solve(&f, 2.0, 3.0, &Settings::default()).unwrap();
        for pair in result.history.windows(2) {
            assert_relative_eq!(pair[1].error, pair[0].error / 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_converges_within_theoretical_bound() {
        let f = Function::parse("x^3 - 2*x - 5").unwrap();
        let settings = Settings::default();
        let result = solve(&f, 2.0, 3.0, &settings).unwrap();
        // ceil(log2((b - a) / tolerance)) iterations suffice for a unit bracket
        let bound = (1.0f64 / settings.tolerance).log2().ceil() as usize;
        assert!(result.converged);
        assert!(result.iterations <= bound);
    }

    #[test]
    fn test_no_bracket_is_an_error_with_zero_iterations() {
        let f = Function::parse("x^2 + 1").unwrap();
        let error = solve(&f, -1.0, 1.0, &Settings::default()).unwrap_err();
        assert!(matches!(error, SolveError::NoBracket { .. }));
    }

    #[test]
    fn test_endpoint_already_a_root() {
        let f = Function::parse("x^2 - 4").unwrap();
        let result = solve(&f, 2.0, 5.0, &Settings::default()).unwrap();
        assert!(result.converged);
        assert_eq!(result.iterations, 0);
        assert_relative_eq!(result.root.unwrap(), 2.0);
    }

    #[test]
    fn test_unconverged_at_iteration_cap() {
        let f = Function::parse("x^3 - 2*x - 5").unwrap();
        let settings = Settings {
            max_iterations: 3,
            ..Settings::default()
        };
        let result = solve(&f, 2.0, 3.0, &settings).unwrap();
        assert!(!result.converged);
        assert!(result.failure.is_none());
        assert_eq!(result.iterations, 3);
        assert!(result.root.is_some());
    }

    #[test]
    fn test_domain_failure_mid_run_is_a_result() {
        // 1/x changes sign over [-2, 2] but is undefined at the first
        // midpoint, 0
        let f = Function::parse("1/x").unwrap();
        let result = solve(&f, -2.0, 2.0, &Settings::default()).unwrap();
        assert!(!result.converged);
        assert!(matches!(result.failure, Some(Failure::Domain { .. })));
    }

    #[test]
    fn test_deterministic_history() {
        let f = Function::parse("cos(x) - x").unwrap();
        let first = solve(&f, 0.0, 1.0, &Settings::default()).unwrap();
        let second = solve(&f, 0.0, 1.0, &Settings::default()).unwrap();
        assert_eq!(first.history, second.history);
        assert_eq!(first.root, second.root);
    }
}
