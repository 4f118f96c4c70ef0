//! Core-facing request contract for external collaborators.
//!
//! The web layer, persistence, and UI of a hosting application are external
//! to this crate; they talk to the core through [`SolveRequest`], which
//! deserializes directly from the collaborator JSON:
//!
//! ```json
//! {
//!   "expression": "x^2 - 2",
//!   "method": "newton",
//!   "parameters": { "x0": 1.5 },
//!   "tolerance": 1e-6,
//!   "maxIterations": 100
//! }
//! ```
//!
//! `tolerance` and `maxIterations` default to `1e-6` and `100` when absent.
//! [`solve`] compiles the expression (differentiating it when the method is
//! Newton-Raphson) and dispatches to the matching engine.

use serde::Deserialize;

use crate::errors::SolveError;
use crate::function::Function;
use crate::methods::{bisection, newton, secant};
use crate::result::{Method, MethodResult};
use crate::settings::{default_max_iterations, default_tolerance, Settings};

/// Bracket parameters for the bisection method.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BisectionParams {
    pub a: f64,
    pub b: f64,
}

/// Initial guess for Newton-Raphson.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewtonParams {
    pub x0: f64,
}

/// Two initial guesses for the secant method.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecantParams {
    pub x0: f64,
    pub x1: f64,
}

/// Method-specific parameters, distinguished by their field sets.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MethodParams {
    /// `{ "a": .., "b": .. }`
    Bisection(BisectionParams),
    /// `{ "x0": .., "x1": .. }`
    Secant(SecantParams),
    /// `{ "x0": .. }`
    Newton(NewtonParams),
}

/// One root-finding request as consumed from an external collaborator.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolveRequest {
    /// The formula to find a root of
    pub expression: String,
    /// Which method to run
    pub method: Method,
    /// Method-specific parameters
    pub parameters: MethodParams,
    /// Convergence tolerance (default `1e-6`)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Iteration budget (default `100`)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl SolveRequest {
    /// The solver settings carried by this request.
    pub fn settings(&self) -> Settings {
        Settings {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

/// Compiles the requested expression and runs the requested method.
///
/// # Errors
/// Returns the compilation error for a malformed expression,
/// `SolveError::Params` when the parameter payload does not match the
/// chosen method, and whatever precondition error the engine raises.
pub fn solve(request: &SolveRequest) -> Result<MethodResult, SolveError> {
    let f = Function::parse(&request.expression)?;
    let settings = request.settings();
    match (request.method, &request.parameters) {
        (Method::Bisection, MethodParams::Bisection(p)) => {
            bisection::solve(&f, p.a, p.b, &settings)
        }
        (Method::Newton, MethodParams::Newton(p)) => {
            let f_prime = f.derivative()?;
            newton::solve(&f, &f_prime, p.x0, &settings)
        }
        (Method::Secant, MethodParams::Secant(p)) => secant::solve(&f, p.x0, p.x1, &settings),
        (method, _) => Err(SolveError::Params(method)),
    }
}
