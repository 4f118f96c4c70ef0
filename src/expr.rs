//! Expression tree for single-variable mathematical functions.
//!
//! This module defines the core expression type used to represent a parsed
//! formula in one free variable `x`. The tree is built recursively using
//! `Box<Expr>` for nested expressions and can be:
//!
//! - Evaluated at a point by walking the tree (no dynamic code execution)
//! - Symbolically differentiated by recursive rule application
//! - Simplified using algebraic rewrite rules
//!
//! # Expression Tree Structure
//! Each node is one of:
//! - Leaf nodes: constants and the free variable
//! - Unary operations: Neg, Abs, Exp, Ln, Sqrt, Sin, Cos, Tan
//! - Binary operations: Add, Sub, Mul, Div
//! - Powers: integer exponent, float exponent, or a full expression exponent
//!
//! # Evaluation
//! `eval` walks the tree with a closed, whitelisted operator set and reports
//! undefined operations (division by zero, log of a non-positive value, sqrt
//! of a negative value) as typed [`EvalError`]s instead of producing NaN.
//!
//! # Symbolic Differentiation
//! `derivative` applies the standard calculus rules (sum, product, quotient,
//! power, chain) and the derivatives of the supported special functions to
//! build a new expression tree. The result is usually passed through
//! `simplify` to prune the `0 *` and `+ 0` terms the rules leave behind.

use crate::errors::{DerivativeError, EvalError};

/// An expression tree node for a function of one real variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant floating point value
    Const(f64),
    /// The free variable `x`
    Var,
    /// Addition of two expressions
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction of two expressions
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication of two expressions
    Mul(Box<Expr>, Box<Expr>),
    /// Division of two expressions
    Div(Box<Expr>, Box<Expr>),
    /// Negation of an expression
    Neg(Box<Expr>),
    /// Absolute value of an expression
    Abs(Box<Expr>),
    /// Exponentiation by an integer constant
    Pow(Box<Expr>, i64),
    /// Exponentiation by a floating point constant
    PowFloat(Box<Expr>, f64),
    /// Exponentiation by another expression
    PowExpr(Box<Expr>, Box<Expr>),
    /// Exponential function of an expression
    Exp(Box<Expr>),
    /// Natural logarithm of an expression
    Ln(Box<Expr>),
    /// Square root of an expression
    Sqrt(Box<Expr>),
    /// Sine of an expression (argument in radians)
    Sin(Box<Expr>),
    /// Cosine of an expression (argument in radians)
    Cos(Box<Expr>),
    /// Tangent of an expression (argument in radians)
    Tan(Box<Expr>),
}

impl Expr {
    /// Evaluates the expression at the given point.
    ///
    /// Walks the tree recursively; every undefined operation is reported as a
    /// typed [`EvalError`] rather than a silent NaN. Note that operations that
    /// merely overflow (for example `tan` near an odd multiple of pi/2) can
    /// still produce non-finite values; [`Function::eval`](crate::function::Function::eval)
    /// adds a final finiteness check on top of this method.
    pub fn eval(&self, x: f64) -> Result<f64, EvalError> {
        match self {
            Expr::Const(c) => Ok(*c),
            Expr::Var => Ok(x),
            Expr::Add(left, right) => Ok(left.eval(x)? + right.eval(x)?),
            Expr::Sub(left, right) => Ok(left.eval(x)? - right.eval(x)?),
            Expr::Mul(left, right) => Ok(left.eval(x)? * right.eval(x)?),
            Expr::Div(left, right) => {
                let denominator = right.eval(x)?;
                if denominator == 0.0 {
                    return Err(EvalError::DivisionByZero { x });
                }
                Ok(left.eval(x)? / denominator)
            }
            Expr::Neg(expr) => Ok(-expr.eval(x)?),
            Expr::Abs(expr) => Ok(expr.eval(x)?.abs()),
            Expr::Pow(base, exp) => {
                let value = base.eval(x)?;
                Ok(match i32::try_from(*exp) {
                    Ok(exp) => value.powi(exp),
                    Err(_) => value.powf(*exp as f64),
                })
            }
            Expr::PowFloat(base, exp) => Ok(base.eval(x)?.powf(*exp)),
            Expr::PowExpr(base, exponent) => Ok(base.eval(x)?.powf(exponent.eval(x)?)),
            Expr::Exp(expr) => Ok(expr.eval(x)?.exp()),
            Expr::Ln(expr) => {
                let value = expr.eval(x)?;
                if value <= 0.0 {
                    return Err(EvalError::LogDomain { x, value });
                }
                Ok(value.ln())
            }
            Expr::Sqrt(expr) => {
                let value = expr.eval(x)?;
                if value < 0.0 {
                    return Err(EvalError::SqrtDomain { x, value });
                }
                Ok(value.sqrt())
            }
            Expr::Sin(expr) => Ok(expr.eval(x)?.sin()),
            Expr::Cos(expr) => Ok(expr.eval(x)?.cos()),
            Expr::Tan(expr) => Ok(expr.eval(x)?.tan()),
        }
    }

    /// Computes the symbolic derivative of this expression with respect to `x`.
    ///
    /// Recursively applies the rules of differentiation to build a new
    /// expression tree representing the derivative:
    /// - d/dx(c) = 0 for constants
    /// - d/dx(x) = 1
    /// - Sum rule: d/dx(f + g) = df/dx + dg/dx
    /// - Product rule: d/dx(f * g) = f * dg/dx + g * df/dx
    /// - Quotient rule: d/dx(f/g) = (g * df/dx - f * dg/dx) / g^2
    /// - Power rule: d/dx(f^n) = n * f^(n-1) * df/dx
    /// - General power: d/dx(f^g) = f^g * (dg/dx * ln(f) + g * df/dx / f)
    /// - Chain rule for abs: d/dx|f| = f/|f| * df/dx
    /// - Chain rule for exp: d/dx(e^f) = e^f * df/dx
    /// - Chain rule for ln: d/dx(ln(f)) = 1/f * df/dx
    /// - Chain rule for sqrt: d/dx(sqrt(f)) = 1/(2*sqrt(f)) * df/dx
    /// - Trig rules: d/dx(sin f) = cos(f) * df/dx, d/dx(cos f) = -sin(f) * df/dx,
    ///   d/dx(tan f) = df/dx / cos(f)^2
    ///
    /// Every construct in the supported vocabulary has a rule, so the error
    /// case exists for contract completeness rather than an expected path.
    pub fn derivative(&self) -> Result<Expr, DerivativeError> {
        let result = match self {
            Expr::Const(_) => Expr::Const(0.0),
            Expr::Var => Expr::Const(1.0),

            Expr::Add(left, right) => Expr::Add(
                Box::new(left.derivative()?),
                Box::new(right.derivative()?),
            ),

            Expr::Sub(left, right) => Expr::Sub(
                Box::new(left.derivative()?),
                Box::new(right.derivative()?),
            ),

            Expr::Mul(left, right) => Expr::Add(
                Box::new(Expr::Mul(left.clone(), Box::new(right.derivative()?))),
                Box::new(Expr::Mul(right.clone(), Box::new(left.derivative()?))),
            ),

            Expr::Div(left, right) => Expr::Div(
                Box::new(Expr::Sub(
                    Box::new(Expr::Mul(right.clone(), Box::new(left.derivative()?))),
                    Box::new(Expr::Mul(left.clone(), Box::new(right.derivative()?))),
                )),
                Box::new(Expr::Pow(right.clone(), 2)),
            ),

            Expr::Neg(expr) => Expr::Neg(Box::new(expr.derivative()?)),

            // d/dx|f| = f/|f| * df/dx
            Expr::Abs(expr) => Expr::Mul(
                Box::new(Expr::Div(expr.clone(), Box::new(Expr::Abs(expr.clone())))),
                Box::new(expr.derivative()?),
            ),

            Expr::Pow(base, exp) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(*exp as f64)),
                    Box::new(Expr::Pow(base.clone(), exp.saturating_sub(1))),
                )),
                Box::new(base.derivative()?),
            ),

            Expr::PowFloat(base, exp) => Expr::Mul(
                Box::new(Expr::Mul(
                    Box::new(Expr::Const(*exp)),
                    Box::new(Expr::PowFloat(base.clone(), exp - 1.0)),
                )),
                Box::new(base.derivative()?),
            ),

            // d/dx(f^g) = f^g * (g' * ln(f) + g * f'/f)
            Expr::PowExpr(base, exponent) => Expr::Mul(
                Box::new(Expr::PowExpr(base.clone(), exponent.clone())),
                Box::new(Expr::Add(
                    Box::new(Expr::Mul(
                        Box::new(exponent.derivative()?),
                        Box::new(Expr::Ln(base.clone())),
                    )),
                    Box::new(Expr::Mul(
                        exponent.clone(),
                        Box::new(Expr::Div(Box::new(base.derivative()?), base.clone())),
                    )),
                )),
            ),

            Expr::Exp(expr) => Expr::Mul(
                Box::new(Expr::Exp(expr.clone())),
                Box::new(expr.derivative()?),
            ),

            Expr::Ln(expr) => Expr::Mul(
                Box::new(Expr::Div(Box::new(Expr::Const(1.0)), expr.clone())),
                Box::new(expr.derivative()?),
            ),

            Expr::Sqrt(expr) => Expr::Mul(
                Box::new(Expr::Div(
                    Box::new(Expr::Const(1.0)),
                    Box::new(Expr::Mul(
                        Box::new(Expr::Const(2.0)),
                        Box::new(Expr::Sqrt(expr.clone())),
                    )),
                )),
                Box::new(expr.derivative()?),
            ),

            Expr::Sin(expr) => Expr::Mul(
                Box::new(Expr::Cos(expr.clone())),
                Box::new(expr.derivative()?),
            ),

            Expr::Cos(expr) => Expr::Mul(
                Box::new(Expr::Neg(Box::new(Expr::Sin(expr.clone())))),
                Box::new(expr.derivative()?),
            ),

            // d/dx(tan f) = f' / cos(f)^2
            Expr::Tan(expr) => Expr::Div(
                Box::new(expr.derivative()?),
                Box::new(Expr::Pow(Box::new(Expr::Cos(expr.clone())), 2)),
            ),
        };
        Ok(result)
    }

    /// Simplifies the expression by folding constants and applying basic algebraic rules.
    ///
    /// Performs constant folding (`2 + 3` -> `5`), identity rules (`x + 0` -> `x`,
    /// `x * 1` -> `x`, `x / 1` -> `x`), zero propagation (`x * 0` -> `0`), and
    /// exponent rules (`x^0` -> `1`, `x^1` -> `x`). This matters most for the
    /// trees produced by [`Expr::derivative`], which are littered with `0 *`
    /// and `+ 0` terms before simplification.
    pub fn simplify(&self) -> Expr {
        match self {
            Expr::Const(_) | Expr::Var => self.clone(),

            Expr::Add(left, right) => {
                let l = left.simplify();
                let r = right.simplify();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a + b),
                    (expr, Expr::Const(c)) | (Expr::Const(c), expr) if *c == 0.0 => expr.clone(),
                    _ => Expr::Add(Box::new(l), Box::new(r)),
                }
            }

            Expr::Sub(left, right) => {
                let l = left.simplify();
                let r = right.simplify();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a - b),
                    (expr, Expr::Const(c)) if *c == 0.0 => expr.clone(),
                    (a, b) if a == b => Expr::Const(0.0),
                    _ => Expr::Sub(Box::new(l), Box::new(r)),
                }
            }

            Expr::Mul(left, right) => {
                let l = left.simplify();
                let r = right.simplify();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) => Expr::Const(a * b),
                    (Expr::Const(c), _) | (_, Expr::Const(c)) if *c == 0.0 => Expr::Const(0.0),
                    (expr, Expr::Const(c)) | (Expr::Const(c), expr) if *c == 1.0 => expr.clone(),
                    (expr, Expr::Const(c)) | (Expr::Const(c), expr) if *c == -1.0 => {
                        Expr::Neg(Box::new(expr.clone()))
                    }
                    (a, b) if a == b => Expr::Pow(Box::new(a.clone()), 2),
                    _ => Expr::Mul(Box::new(l), Box::new(r)),
                }
            }

            Expr::Div(left, right) => {
                let l = left.simplify();
                let r = right.simplify();
                match (&l, &r) {
                    (Expr::Const(a), Expr::Const(b)) if *b != 0.0 => Expr::Const(a / b),
                    (Expr::Const(c), _) if *c == 0.0 => Expr::Const(0.0),
                    (expr, Expr::Const(c)) if *c == 1.0 => expr.clone(),
                    (a, b) if a == b => Expr::Const(1.0),
                    _ => Expr::Div(Box::new(l), Box::new(r)),
                }
            }

            Expr::Neg(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) => Expr::Const(-a),
                    Expr::Neg(inner) => (**inner).clone(),
                    _ => Expr::Neg(Box::new(e)),
                }
            }

            Expr::Abs(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) => Expr::Const(a.abs()),
                    Expr::Abs(inner) => Expr::Abs(inner.clone()),
                    Expr::Neg(inner) => Expr::Abs(inner.clone()),
                    _ => Expr::Abs(Box::new(e)),
                }
            }

            Expr::Pow(base, exp) => {
                let b = base.simplify();
                match (&b, exp) {
                    (_, 0) => Expr::Const(1.0),
                    (expr, 1) => expr.clone(),
                    (Expr::Const(a), exp) => Expr::Const(a.powi(*exp as i32)),
                    (Expr::Pow(inner, inner_exp), exp) => {
                        Expr::Pow(inner.clone(), inner_exp.saturating_mul(*exp))
                    }
                    _ => Expr::Pow(Box::new(b), *exp),
                }
            }

            Expr::PowFloat(base, exp) => {
                let b = base.simplify();
                if *exp == 0.0 {
                    Expr::Const(1.0)
                } else if *exp == 1.0 {
                    b
                } else if exponent_is_integral(*exp) {
                    Expr::Pow(Box::new(b), *exp as i64).simplify()
                } else if let Expr::Const(a) = b {
                    Expr::Const(a.powf(*exp))
                } else {
                    Expr::PowFloat(Box::new(b), *exp)
                }
            }

            Expr::PowExpr(base, exponent) => {
                let b = base.simplify();
                let e = exponent.simplify();
                match (&b, &e) {
                    (Expr::Const(a), Expr::Const(c)) => Expr::Const(a.powf(*c)),
                    (_, Expr::Const(c)) if exponent_is_integral(*c) => {
                        Expr::Pow(Box::new(b), *c as i64).simplify()
                    }
                    (_, Expr::Const(c)) => Expr::PowFloat(Box::new(b), *c),
                    _ => Expr::PowExpr(Box::new(b), Box::new(e)),
                }
            }

            Expr::Exp(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) => Expr::Const(a.exp()),
                    Expr::Ln(inner) => (**inner).clone(),
                    _ => Expr::Exp(Box::new(e)),
                }
            }

            Expr::Ln(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) if *a > 0.0 => Expr::Const(a.ln()),
                    Expr::Exp(inner) => (**inner).clone(),
                    _ => Expr::Ln(Box::new(e)),
                }
            }

            Expr::Sqrt(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) if *a >= 0.0 => Expr::Const(a.sqrt()),
                    _ => Expr::Sqrt(Box::new(e)),
                }
            }

            Expr::Sin(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) => Expr::Const(a.sin()),
                    _ => Expr::Sin(Box::new(e)),
                }
            }

            Expr::Cos(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) => Expr::Const(a.cos()),
                    _ => Expr::Cos(Box::new(e)),
                }
            }

            Expr::Tan(expr) => {
                let e = expr.simplify();
                match &e {
                    Expr::Const(a) => Expr::Const(a.tan()),
                    _ => Expr::Tan(Box::new(e)),
                }
            }
        }
    }
}

fn exponent_is_integral(exp: f64) -> bool {
    exp.fract() == 0.0 && exp.abs() <= i32::MAX as f64
}

/// Formats expressions in standard mathematical notation.
///
/// Binary operations are wrapped in parentheses, functions use call
/// notation, absolute value uses `|x|`, and exponents use `^`.
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Const(val) => write!(f, "{val}"),
            Expr::Var => write!(f, "x"),
            Expr::Add(left, right) => write!(f, "({left} + {right})"),
            Expr::Sub(left, right) => write!(f, "({left} - {right})"),
            Expr::Mul(left, right) => write!(f, "({left} * {right})"),
            Expr::Div(left, right) => write!(f, "({left} / {right})"),
            Expr::Neg(expr) => write!(f, "-{expr}"),
            Expr::Abs(expr) => write!(f, "|{expr}|"),
            Expr::Pow(base, exp) => write!(f, "({base}^{exp})"),
            Expr::PowFloat(base, exp) => write!(f, "({base}^{exp})"),
            Expr::PowExpr(base, exponent) => write!(f, "({base}^{exponent})"),
            Expr::Exp(expr) => write!(f, "exp({expr})"),
            Expr::Ln(expr) => write!(f, "ln({expr})"),
            Expr::Sqrt(expr) => write!(f, "sqrt({expr})"),
            Expr::Sin(expr) => write!(f, "sin({expr})"),
            Expr::Cos(expr) => write!(f, "cos({expr})"),
            Expr::Tan(expr) => write!(f, "tan({expr})"),
        }
    }
}
