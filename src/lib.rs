//! Root finding for nonlinear equations with symbolic differentiation.
//!
//! This crate compiles a textual mathematical expression in one free
//! variable into an evaluable function, differentiates it symbolically when
//! a method needs the derivative, and runs classical root-finding
//! algorithms (bisection, Newton-Raphson, and the secant method) while
//! recording a full iteration trace, convergence diagnostics, and timing.
//! It builds on the [evalexpr](https://github.com/ISibboI/evalexpr) crate
//! for parsing; evaluation walks a whitelisted expression tree rather than
//! interpreting input as code.
//!
//! # Features
//!
//! - Safe expression compilation with a closed function vocabulary
//! - Exact symbolic differentiation (never finite differences)
//! - Three root-finding methods with a shared result and trace shape
//! - A best-effort comparator that runs all methods side by side
//! - Serialization of results to the JSON shape web collaborators consume
//!
//! # Example
//!
//! ```rust
//! use root_finder::{methods::bisection, Function, Settings};
//!
//! let f = Function::parse("x^3 - 2*x - 5").unwrap();
//! let result = bisection::solve(&f, 2.0, 3.0, &Settings::default()).unwrap();
//!
//! assert!(result.converged);
//! assert!((result.root.unwrap() - 2.094551).abs() < 1e-5);
//! assert_eq!(result.iterations, result.history.len());
//! ```

pub use compare::{compare, CompareParams, Comparison, MethodOutcome};
pub use function::Function;
pub use result::{Failure, Method, MethodResult};
pub use settings::Settings;
pub use trace::{IterationRecord, Trace};

pub mod prelude {
    pub use crate::api::{solve, SolveRequest};
    pub use crate::compare::{compare, CompareParams};
    pub use crate::function::Function;
    pub use crate::result::{Method, MethodResult};
    pub use crate::settings::Settings;
}

/// Request contract consumed by external collaborators
pub mod api;
/// Predefined test expressions resolvable by name
pub mod catalog;
/// Side-by-side comparison of all methods
pub mod compare;
/// Conversion from parsed expressions to the internal AST
pub mod convert;
/// Error types for the various failure modes
pub mod errors;
/// Expression tree, evaluation, and symbolic differentiation
pub mod expr;
/// Compiled single-variable functions
pub mod function;
/// Terminal run results and method names
pub mod result;
/// Shared solver configuration
pub mod settings;
/// Append-only iteration trace
pub mod trace;
/// The root-finding engines
pub mod methods {
    pub mod bisection;
    pub mod newton;
    pub mod secant;
}
