//! Predefined test expressions.
//!
//! A small catalog of classic root-finding exercises, resolvable by name.
//! Hosting applications use this as the `(name) -> expression` lookup
//! behind their prefilled examples; the solvers themselves never depend
//! on it.

use serde::Serialize;

/// One predefined test expression with its known roots.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFunction {
    /// Lookup name
    pub name: &'static str,
    /// Expression text in the crate's vocabulary
    pub expression: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Known roots, for checking results against
    pub roots: &'static [f64],
    /// Interval containing the interesting behavior, for plotting
    pub domain: [f64; 2],
}

/// The built-in catalog.
pub const TEST_FUNCTIONS: &[TestFunction] = &[
    TestFunction {
        name: "polynomial",
        expression: "x^3 - 6*x^2 + 11*x - 6",
        description: "f(x) = x^3 - 6x^2 + 11x - 6 (roots at x = 1, 2, 3)",
        roots: &[1.0, 2.0, 3.0],
        domain: [0.0, 4.0],
    },
    TestFunction {
        name: "transcendental1",
        expression: "cos(x) - x",
        description: "f(x) = cos(x) - x (root ~ 0.739)",
        roots: &[0.739_085_133_2],
        domain: [-2.0, 2.0],
    },
    TestFunction {
        name: "transcendental2",
        expression: "exp(x) - 3*x^2",
        description: "f(x) = e^x - 3x^2 (roots ~ -0.459 and 0.910)",
        roots: &[-0.458_962_267_5, 0.910_007_572_5],
        domain: [-1.0, 3.0],
    },
    TestFunction {
        name: "trigonometric",
        expression: "sin(x) - x/2",
        description: "f(x) = sin(x) - x/2",
        roots: &[0.0, 1.895_494_267_0],
        domain: [-1.0, 3.0],
    },
    TestFunction {
        name: "exponential",
        expression: "x*exp(x) - 1",
        description: "f(x) = x*e^x - 1",
        roots: &[0.567_143_290_4],
        domain: [0.0, 1.0],
    },
];

/// Resolves a predefined test function by name.
pub fn lookup(name: &str) -> Option<&'static TestFunction> {
    TEST_FUNCTIONS.iter().find(|f| f.name == name)
}

/// All predefined test functions, in catalog order.
pub fn all() -> &'static [TestFunction] {
    TEST_FUNCTIONS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use approx::assert_relative_eq;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("polynomial").unwrap().roots, &[1.0, 2.0, 3.0]);
        assert!(lookup("unknown").is_none());
    }

    #[test]
    fn test_every_entry_parses_and_vanishes_at_its_roots() {
        for entry in all() {
            let f = Function::parse(entry.expression).unwrap();
            for &root in entry.roots {
                assert_relative_eq!(f.eval(root).unwrap(), 0.0, epsilon = 1e-6);
            }
        }
    }
}
