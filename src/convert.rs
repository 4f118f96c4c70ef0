//! Conversion from evalexpr AST nodes into our internal expression representation.
//!
//! This module converts the operator tree produced by the evalexpr crate into
//! our own [`Expr`] type, which supports tree-walking evaluation and symbolic
//! differentiation. The expression vocabulary is closed: arithmetic operators,
//! a whitelisted set of functions (`sin`, `cos`, `tan`, `exp`, `ln`/`log`,
//! `sqrt`, `abs`), the constants `pi` and `e`, and a single free variable
//! named `x`. Everything else is rejected with a [`ConvertError`].
//!
//! The main entry point is [`build_ast`], which recursively traverses the
//! evalexpr AST and builds up our expression tree.

use crate::{errors::ConvertError, expr::Expr};
use evalexpr::{Node, Operator};

/// Converts an evalexpr AST node into our internal expression representation.
///
/// # Arguments
/// * `node` - The evalexpr AST node to convert
///
/// # Returns
/// * `Result<Expr, ConvertError>` - The converted expression, or an error when
///   the node uses something outside the supported vocabulary
pub fn build_ast(node: &Node) -> Result<Expr, ConvertError> {
    match node.operator() {
        // Addition combines multiple children into a series of binary Add expressions
        Operator::Add => {
            let children = variadic_children(node, "+")?;
            children
                .iter()
                .skip(1)
                .try_fold(build_ast(&children[0])?, |acc, child| {
                    Ok(Expr::Add(Box::new(acc), Box::new(build_ast(child)?)))
                })
        }
        // Multiplication combines multiple children into a series of binary Mul expressions
        Operator::Mul => {
            let children = variadic_children(node, "*")?;
            children.iter().skip(1).try_fold(
                build_ast(&children[0])?,
                |acc, child| -> Result<Expr, ConvertError> {
                    Ok(Expr::Mul(Box::new(acc), Box::new(build_ast(child)?)))
                },
            )
        }
        Operator::Sub => {
            let children = binary_children(node, "-")?;
            Ok(Expr::Sub(
                Box::new(build_ast(&children[0])?),
                Box::new(build_ast(&children[1])?),
            ))
        }
        Operator::Div => {
            let children = binary_children(node, "/")?;
            Ok(Expr::Div(
                Box::new(build_ast(&children[0])?),
                Box::new(build_ast(&children[1])?),
            ))
        }
        Operator::Neg => {
            let children = node.children();
            Ok(Expr::Neg(Box::new(build_ast(&children[0])?)))
        }
        // Constant value - must be numeric
        Operator::Const { value } => match value {
            evalexpr::Value::Float(f) => Ok(Expr::Const(*f)),
            evalexpr::Value::Int(i) => Ok(Expr::Const(*i as f64)),
            _ => Err(ConvertError::ConstOperator(format!(
                "Expected numeric constant: {:?}",
                value
            ))),
        },
        // Identifiers: the free variable `x` or a named mathematical constant
        Operator::VariableIdentifierRead { identifier } => match identifier.as_str() {
            "x" => Ok(Expr::Var),
            "pi" => Ok(Expr::Const(std::f64::consts::PI)),
            "e" => Ok(Expr::Const(std::f64::consts::E)),
            other => Err(ConvertError::UnknownIdentifier(other.to_string())),
        },
        // Function call over the whitelisted vocabulary
        Operator::FunctionIdentifier { identifier } => {
            let children = node.children();
            if children.len() != 1 {
                return Err(ConvertError::Arity {
                    name: identifier.to_string(),
                    expected: 1,
                    got: children.len(),
                });
            }
            let argument = Box::new(build_ast(&children[0])?);
            match identifier.as_str() {
                "abs" => Ok(Expr::Abs(argument)),
                "exp" => Ok(Expr::Exp(argument)),
                "ln" => Ok(Expr::Ln(argument)),
                "log" => Ok(Expr::Ln(argument)),
                "sqrt" => Ok(Expr::Sqrt(argument)),
                "sin" => Ok(Expr::Sin(argument)),
                "cos" => Ok(Expr::Cos(argument)),
                "tan" => Ok(Expr::Tan(argument)),
                _ => Err(ConvertError::UnsupportedFunction(format!(
                    "Unsupported function: {:?}",
                    identifier
                ))),
            }
        }
        // Root node - should have exactly one child
        Operator::RootNode => {
            let children = node.children();
            if children.len() == 1 {
                build_ast(&children[0])
            } else {
                Err(ConvertError::RootNode(format!(
                    "Expected single child for root node: {:?}",
                    children
                )))
            }
        }
        // Exponentiation - integer and float constant exponents get dedicated
        // variants (they have simpler derivative rules), anything else becomes
        // a general expression power
        Operator::Exp => {
            let children = binary_children(node, "^")?;
            let base = Box::new(build_ast(&children[0])?);
            if let Operator::Const { value } = children[1].operator() {
                match value {
                    // Integer exponents outside powi range degrade to a
                    // float power instead of truncating through a cast
                    evalexpr::Value::Int(exp) => match i32::try_from(*exp) {
                        Ok(exp) => return Ok(Expr::Pow(base, exp.into())),
                        Err(_) => return Ok(Expr::PowFloat(base, *exp as f64)),
                    },
                    evalexpr::Value::Float(exp) => return Ok(Expr::PowFloat(base, *exp)),
                    _ => {}
                }
            }
            Ok(Expr::PowExpr(base, Box::new(build_ast(&children[1])?)))
        }
        // Any other operator is unsupported
        _ => Err(ConvertError::UnsupportedOperator(format!(
            "Unsupported operator: {:?}",
            node.operator()
        ))),
    }
}

fn binary_children<'a>(node: &'a Node, name: &str) -> Result<&'a [Node], ConvertError> {
    let children = node.children();
    if children.len() != 2 {
        return Err(ConvertError::Arity {
            name: name.to_string(),
            expected: 2,
            got: children.len(),
        });
    }
    Ok(children)
}

// Add and Mul fold any number of children, but a stray operator like `x +* 2`
// parses as an Add whose second child is a one-child Mul. Folding that would
// silently drop the malformed operator, so underfull nodes are rejected.
fn variadic_children<'a>(node: &'a Node, name: &str) -> Result<&'a [Node], ConvertError> {
    let children = node.children();
    if children.len() < 2 {
        return Err(ConvertError::Arity {
            name: name.to_string(),
            expected: 2,
            got: children.len(),
        });
    }
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use evalexpr::build_operator_tree;

    fn parse(expression: &str) -> Result<Expr, ConvertError> {
        let node = build_operator_tree(expression).unwrap();
        build_ast(&node)
    }

    #[test]
    fn test_polynomial() {
        let expr = parse("x^3 - 2*x - 5").unwrap();
        assert_relative_eq!(expr.eval(3.0).unwrap(), 16.0);
    }

    #[test]
    fn test_named_constants() {
        let expr = parse("sin(pi) + e").unwrap();
        assert_relative_eq!(
            expr.eval(0.0).unwrap(),
            std::f64::consts::E,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_float_exponent() {
        let expr = parse("x^2.5").unwrap();
        assert_relative_eq!(expr.eval(4.0).unwrap(), 32.0, epsilon = 1e-12);
    }

    #[test]
    fn test_expression_exponent() {
        let expr = parse("2^x").unwrap();
        assert_relative_eq!(expr.eval(3.0).unwrap(), 8.0);
    }

    #[test]
    fn test_stray_operator_is_rejected() {
        // evalexpr parses `x +* 2` as an Add whose second child is a
        // one-child Mul; folding it would evaluate as `x + 2`
        assert!(matches!(parse("x +* 2"), Err(ConvertError::Arity { .. })));
    }

    #[test]
    fn test_exponent_beyond_powi_range_degrades_to_float_power() {
        let expr = parse("x^4294967296").unwrap();
        assert!(matches!(expr, Expr::PowFloat(_, _)));
        assert!(matches!(expr.simplify(), Expr::PowFloat(_, _)));
        assert_relative_eq!(expr.eval(1.0).unwrap(), 1.0);
    }

    #[test]
    fn test_unknown_identifier() {
        assert!(matches!(
            parse("y + 1"),
            Err(ConvertError::UnknownIdentifier(name)) if name == "y"
        ));
    }

    #[test]
    fn test_unsupported_function() {
        assert!(matches!(
            parse("sinh(x)"),
            Err(ConvertError::UnsupportedFunction(_))
        ));
    }

    #[test]
    fn test_log_alias() {
        let expr = parse("log(x)").unwrap();
        assert_relative_eq!(expr.eval(std::f64::consts::E).unwrap(), 1.0);
    }
}
