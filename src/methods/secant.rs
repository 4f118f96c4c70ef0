//! Secant method: two-point finite-difference search.
//!
//! Iterates `x_{n+1} = x_n - f(x_n) * (x_n - x_{n-1}) / (f(x_n) - f(x_{n-1}))`,
//! replacing Newton's analytical derivative with the slope of the secant
//! through the two most recent iterates. Convergence is superlinear (order
//! about 1.618, the golden ratio) as an emergent property of the update
//! rule; nothing enforces it separately.
//!
//! When the two most recent function values coincide the secant is
//! horizontal and the update is undefined; the run ends with
//! `converged = false` and [`Failure::Stagnation`], the analogue of
//! Newton's zero-derivative case.

use std::time::Instant;

use crate::errors::SolveError;
use crate::function::Function;
use crate::result::{Failure, Method, MethodResult};
use crate::settings::{Settings, DERIVATIVE_FLOOR};
use crate::trace::Trace;

/// Finds a root of `f` from the two initial guesses `x0` and `x1`.
///
/// The per-iteration error estimate is the step size `|x_{n+1} - x_n|`; the
/// run converges when the step or the residual `|f(x_{n+1})|` drops to the
/// configured tolerance. Each record carries both working points and the new
/// iterate `[x_{n-1}, x_n, x_{n+1}]`, with `f(x_{n+1})` and the step error.
/// At the iteration cap the last iterate is reported with its residual as
/// the final error.
///
/// # Errors
/// Returns `SolveError::InvalidSettings` for a bad configuration and
/// `SolveError::Eval` when one of the two seed points cannot be evaluated;
/// everything discovered while iterating terminates with an annotated
/// unconverged result instead.
pub fn solve(
    f: &Function,
    x0: f64,
    x1: f64,
    settings: &Settings,
) -> Result<MethodResult, SolveError> {
    settings.validate()?;
    let started = Instant::now();
    let mut trace = Trace::new();

    let (mut x0, mut x1) = (x0, x1);
    let mut f0 = f.eval(x0).map_err(|source| SolveError::Eval { x: x0, source })?;
    let mut f1 = f.eval(x1).map_err(|source| SolveError::Eval { x: x1, source })?;

    for _ in 0..settings.max_iterations {
        if (f1 - f0).abs() < DERIVATIVE_FLOOR {
            return Ok(MethodResult::finish(
                Method::Secant,
                Some(x1),
                false,
                f1.abs(),
                Some(Failure::Stagnation { at: x1 }),
                trace,
                started,
            ));
        }

        let x2 = x1 - f1 * (x1 - x0) / (f1 - f0);
        let error = (x2 - x1).abs();

        let f2 = match f.eval(x2) {
            Ok(value) => value,
            Err(source) => {
                return Ok(MethodResult::finish(
                    Method::Secant,
                    Some(x1),
                    false,
                    error,
                    Some(Failure::Domain { at: x2, source }),
                    trace,
                    started,
                ));
            }
        };

        trace.record(vec![x0, x1, x2], f2, error);

        if error <= settings.tolerance || f2.abs() <= settings.tolerance {
            return Ok(MethodResult::finish(
                Method::Secant,
                Some(x2),
                true,
                error,
                None,
                trace,
                started,
            ));
        }

        (x0, f0) = (x1, f1);
        (x1, f1) = (x2, f2);
    }

    // Iteration budget exhausted: report the last iterate with its residual.
    Ok(MethodResult::finish(
        Method::Secant,
        Some(x1),
        false,
        f1.abs(),
        None,
        trace,
        started,
    ))
}
