//! Error types for the root-finder crate.
//!
//! This module defines the various error types that can occur while parsing
//! expressions, evaluating them at a point, differentiating them, and running
//! the root-finding methods. The main error types are:
//!
//! - `ConvertError`: Errors during conversion from the evalexpr AST to our internal representation
//! - `EvalError`: Domain errors when evaluating a compiled function at a point
//! - `DerivativeError`: Errors during symbolic differentiation
//! - `FunctionError`: High-level errors when compiling a function from its textual form
//! - `SolveError`: Precondition and configuration errors raised by the solvers
//!
//! Soft non-convergence is never an error: a solver that runs out of iterations
//! returns a fully-formed [`MethodResult`](crate::result::MethodResult) with
//! `converged = false`. Terminal conditions discovered mid-loop (a vanishing
//! derivative, a stagnating secant, a domain error at an iterate) are carried
//! as a [`Failure`](crate::result::Failure) annotation on the result instead.

use evalexpr::{DefaultNumericTypes, EvalexprError};
use thiserror::Error;

use crate::result::Method;

/// Errors that can occur during conversion from the evalexpr AST to our internal AST.
///
/// The expression vocabulary is closed: a fixed set of operators and functions
/// over a single free variable named `x`. Anything outside that vocabulary is
/// rejected here rather than silently coerced.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Error when encountering an operator that is not in the supported vocabulary
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    /// Error when encountering a function that is not in the supported vocabulary
    #[error("Unsupported function: {0}")]
    UnsupportedFunction(String),
    /// Error when an identifier is neither the free variable `x` nor a known constant
    #[error("Unknown identifier: {0} (the free variable must be named x)")]
    UnknownIdentifier(String),
    /// Error when a constant value is not a number
    #[error("Expected numeric constant: {0}")]
    ConstOperator(String),
    /// Error when the root node does not have exactly one child
    #[error("Expected single child for root node: {0}")]
    RootNode(String),
    /// Error when a function or operator receives the wrong number of arguments
    #[error("Wrong number of arguments for {name}: expected {expected}, got {got}")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Domain errors raised when evaluating a compiled function at a point.
///
/// Evaluation never returns a silent NaN: every undefined operation is
/// reported as a typed error so the solvers can translate it into a
/// per-run failure instead of feeding garbage into the convergence logic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Division by zero at the given point
    #[error("division by zero at x = {x}")]
    DivisionByZero { x: f64 },
    /// Logarithm of a non-positive argument
    #[error("logarithm of non-positive value {value} at x = {x}")]
    LogDomain { x: f64, value: f64 },
    /// Square root of a negative argument
    #[error("square root of negative value {value} at x = {x}")]
    SqrtDomain { x: f64, value: f64 },
    /// The expression evaluated to NaN or infinity
    #[error("expression evaluated to a non-finite value at x = {x}")]
    NonFinite { x: f64 },
}

/// Errors during symbolic differentiation.
///
/// Every construct in the supported vocabulary has a differentiation rule, so
/// this should not occur in practice, but it is part of the contract rather
/// than an assumption.
#[derive(Error, Debug)]
pub enum DerivativeError {
    /// No differentiation rule is known for the given construct
    #[error("No differentiation rule for: {0}")]
    NoRule(String),
}

/// High-level errors when compiling a function from its textual form.
///
/// Wraps the lower-level errors from expression parsing, AST conversion,
/// and symbolic differentiation.
#[derive(Debug, Error)]
pub enum FunctionError {
    /// Error when parsing the expression string with evalexpr
    #[error("Failed to parse expression")]
    Parse(#[from] EvalexprError<DefaultNumericTypes>),
    /// Error when converting from the evalexpr AST to our internal AST
    #[error("Failed to build expression AST")]
    Convert(#[from] ConvertError),
    /// Error when symbolically differentiating the expression
    #[error("Failed to differentiate expression")]
    Derivative(#[from] DerivativeError),
}

/// Precondition and configuration errors raised by the solvers.
///
/// These are raised immediately, before any iteration runs; they never carry
/// a partial iteration history.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Error when compiling the expression for a solve request
    #[error(transparent)]
    Function(#[from] FunctionError),
    /// Error when the solver settings are invalid
    #[error("invalid settings: {0}")]
    InvalidSettings(&'static str),
    /// Error when the bisection bracket does not change sign
    #[error("no sign change over [{a}, {b}]: f(a) = {fa}, f(b) = {fb}")]
    NoBracket { a: f64, b: f64, fa: f64, fb: f64 },
    /// Error when a precondition evaluation fails (bracket endpoints, secant seeds)
    #[error("failed to evaluate function at x = {x}")]
    Eval { x: f64, source: EvalError },
    /// Error when the supplied parameters do not match the chosen method
    #[error("parameters do not match the {0} method")]
    Params(Method),
}
