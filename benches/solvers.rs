//! Root-Finding Benchmarks
//!
//! This benchmark suite measures the three phases of a solve: compiling an
//! expression string into an evaluable function, evaluating the compiled
//! function, and running each root-finding method to convergence.
//!
//! ## Benchmark Structure
//!
//! ### 1. Compilation (`benchmark_compilation`)
//! Parse, convert, and simplify expression strings of varying complexity.
//! This is the one-time setup cost paid per expression.
//!
//! ### 2. Evaluation (`benchmark_evaluation`)
//! Evaluate pre-compiled functions and their symbolic derivatives at a
//! single point. Solvers call this in a tight loop, so it dominates the
//! per-iteration cost.
//!
//! ### 3. Solvers (`benchmark_solvers`)
//! Run bisection, Newton-Raphson, and the secant method to convergence on
//! the predefined test functions at the default tolerance. Compilation is
//! excluded; functions are compiled during setup.
//!
//! ## Usage
//!
//! Run with: `cargo bench --bench solvers`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use root_finder::methods::{bisection, newton, secant};
use root_finder::{catalog, Function, Settings};

const EXPRESSIONS: &[(&str, &str)] = &[
    ("linear", "2*x - 7"),
    ("cubic", "x^3 - 2*x - 5"),
    ("transcendental", "exp(x) - 3*x^2"),
    ("composed", "sin(x^2) / (1 + cos(x)) - ln(x + 4)"),
];

fn benchmark_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");
    for (name, expression) in EXPRESSIONS {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            expression,
            |b, expression| b.iter(|| Function::parse(black_box(expression)).unwrap()),
        );
    }
    group.finish();
}

fn benchmark_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluation");
    for (name, expression) in EXPRESSIONS {
        let f = Function::parse(expression).unwrap();
        let f_prime = f.derivative().unwrap();
        group.bench_function(BenchmarkId::new("f", name), |b| {
            b.iter(|| f.eval(black_box(1.5)).unwrap())
        });
        group.bench_function(BenchmarkId::new("f_prime", name), |b| {
            b.iter(|| f_prime.eval(black_box(1.5)).unwrap())
        });
    }
    group.finish();
}

fn benchmark_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solvers");
    let settings = Settings::default();

    for entry in catalog::all() {
        let f = Function::parse(entry.expression).unwrap();
        let f_prime = f.derivative().unwrap();
        // Every catalogued root is simple, so a tight symmetric interval
        // around it is a valid bracket.
        let (a, b) = (entry.roots[0] - 0.5, entry.roots[0] + 0.5);
        let guess = entry.roots[0] + 0.3;

        group.bench_function(BenchmarkId::new("bisection", entry.name), |bench| {
            bench.iter(|| bisection::solve(&f, black_box(a), black_box(b), &settings).unwrap())
        });
        group.bench_function(BenchmarkId::new("newton", entry.name), |bench| {
            bench.iter(|| newton::solve(&f, &f_prime, black_box(guess), &settings).unwrap())
        });
        group.bench_function(BenchmarkId::new("secant", entry.name), |bench| {
            bench.iter(|| {
                secant::solve(&f, black_box(guess), black_box(guess + 0.2), &settings).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_compilation,
    benchmark_evaluation,
    benchmark_solvers
);
criterion_main!(benches);
