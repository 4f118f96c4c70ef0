//! Compiled single-variable functions with symbolic differentiation.
//!
//! This module provides the core [`Function`] type which represents a
//! mathematical expression in one free variable `x` that can be evaluated
//! repeatedly and differentiated exactly. Expressions are parsed with the
//! evalexpr crate, converted into our internal AST, and simplified once on
//! creation; evaluation walks the tree with a closed operator set rather than
//! interpreting the input as code.
//!
//! # Example
//!
//! ```
//! use root_finder::Function;
//!
//! let f = Function::parse("x^2 - 2").unwrap();
//! assert_eq!(f.eval(2.0).unwrap(), 2.0);
//!
//! let df = f.derivative().unwrap(); // 2x, derived symbolically
//! assert_eq!(df.eval(3.0).unwrap(), 6.0);
//! ```

use evalexpr::build_operator_tree;

use crate::convert::build_ast;
use crate::errors::{EvalError, FunctionError};
use crate::expr::Expr;

/// A compiled mathematical function of one real variable.
///
/// Holds the original expression string and the simplified expression tree.
/// Construction is the only fallible parsing step; evaluation can still fail
/// pointwise with a domain error. Parsing and differentiation are pure, so a
/// `Function` can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct Function {
    expression: String,
    ast: Expr,
}

impl Function {
    /// Compiles a `Function` from its textual form.
    ///
    /// # Arguments
    /// * `expression` - The formula as a string (e.g. `"x^3 - 2*x - 5"`)
    ///
    /// # Errors
    /// Returns `FunctionError::Parse` when the grammar is violated (unbalanced
    /// parentheses, stray operators) and `FunctionError::Convert` when the
    /// expression uses an unsupported function or an identifier other than
    /// `x`, `pi`, or `e`.
    pub fn parse(expression: &str) -> Result<Self, FunctionError> {
        let node = build_operator_tree(expression)?;
        let ast = build_ast(&node)?.simplify();
        Ok(Self {
            expression: expression.to_string(),
            ast,
        })
    }

    /// Evaluates the function at the given point.
    ///
    /// # Errors
    /// Returns an [`EvalError`] when the expression is undefined at `x`
    /// (division by zero, logarithm of a non-positive value, square root of a
    /// negative value) or when the result is not finite. A NaN is never
    /// returned silently.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        let value = self.ast.eval(x)?;
        if !value.is_finite() {
            return Err(EvalError::NonFinite { x });
        }
        Ok(value)
    }

    /// Computes the exact symbolic derivative of this function.
    ///
    /// The differentiation rules are applied recursively on the expression
    /// tree (never a finite-difference approximation) and the resulting tree
    /// is simplified before being wrapped into a new `Function`.
    ///
    /// # Errors
    /// Returns `FunctionError::Derivative` when the expression contains a
    /// construct without a differentiation rule. This cannot happen for the
    /// supported vocabulary, but the case is handled rather than assumed away.
    pub fn derivative(&self) -> Result<Self, FunctionError> {
        let ast = self.ast.derivative()?.simplify();
        Ok(Self {
            expression: format!("d/dx({})", self.expression),
            ast,
        })
    }

    /// The expression string this function was compiled from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The simplified expression tree, in standard mathematical notation.
    pub fn formula(&self) -> String {
        self.ast.to_string()
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_and_eval() {
        let f = Function::parse("x^3 - 6*x^2 + 11*x - 6").unwrap();
        // roots at 1, 2, 3
        assert_relative_eq!(f.eval(1.0).unwrap(), 0.0);
        assert_relative_eq!(f.eval(2.0).unwrap(), 0.0);
        assert_relative_eq!(f.eval(3.0).unwrap(), 0.0);
        assert_relative_eq!(f.eval(4.0).unwrap(), 6.0);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Function::parse("sin(x"),
            Err(FunctionError::Parse(_))
        ));
    }

    #[test]
    fn test_stray_operator_is_rejected() {
        // Grammatical per evalexpr (an Add over a one-child Mul) but
        // rejected during conversion rather than compiled as `x + 2`
        assert!(matches!(
            Function::parse("x +* 2"),
            Err(FunctionError::Convert(_))
        ));
    }

    #[test]
    fn test_unknown_identifier_is_convert_error() {
        assert!(matches!(
            Function::parse("x + y"),
            Err(FunctionError::Convert(_))
        ));
    }

    #[test]
    fn test_derivative() {
        let f = Function::parse("x^2 - 2").unwrap();
        let df = f.derivative().unwrap();
        assert_relative_eq!(df.eval(1.5).unwrap(), 3.0);
        assert_relative_eq!(df.eval(-2.0).unwrap(), -4.0);
    }

    #[test]
    fn test_derivative_transcendental() {
        // d/dx(cos(x) - x) = -sin(x) - 1
        let f = Function::parse("cos(x) - x").unwrap();
        let df = f.derivative().unwrap();
        let x = 0.5f64;
        assert_relative_eq!(df.eval(x).unwrap(), -x.sin() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_eval_domain_error() {
        let f = Function::parse("ln(x)").unwrap();
        assert!(matches!(f.eval(-1.0), Err(EvalError::LogDomain { .. })));

        let f = Function::parse("1/x").unwrap();
        assert!(matches!(f.eval(0.0), Err(EvalError::DivisionByZero { .. })));
    }

    #[test]
    fn test_eval_non_finite() {
        // (-1)^0.5 is NaN in floating point
        let f = Function::parse("x^0.5").unwrap();
        assert!(matches!(f.eval(-1.0), Err(EvalError::NonFinite { .. })));
    }

    #[test]
    fn test_display() {
        let f = Function::parse("x^2 - 2").unwrap();
        assert_eq!(f.to_string(), "x^2 - 2");
        assert_eq!(f.derivative().unwrap().to_string(), "d/dx(x^2 - 2)");
    }
}
