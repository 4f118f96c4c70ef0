use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use root_finder::methods::{bisection, newton, secant};
use root_finder::{catalog, compare, CompareParams, Function, MethodOutcome, Settings};
use root_finder::api::{BisectionParams, NewtonParams, SecantParams};
use std::process;

#[derive(Parser)]
#[command(name = "root-finder")]
#[command(about = "Find roots of nonlinear equations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
    /// Print the full result as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Bracket-based halving search over [A, B]
    Bisection {
        /// Expression in x, or the name of a predefined test function
        expression: String,
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
        #[command(flatten)]
        opts: SolverOpts,
    },
    /// Newton-Raphson from an initial guess (derivative is derived symbolically)
    Newton {
        expression: String,
        #[arg(allow_negative_numbers = true)]
        x0: f64,
        #[command(flatten)]
        opts: SolverOpts,
    },
    /// Secant method from two initial guesses
    Secant {
        expression: String,
        #[arg(allow_negative_numbers = true)]
        x0: f64,
        #[arg(allow_negative_numbers = true)]
        x1: f64,
        #[command(flatten)]
        opts: SolverOpts,
    },
    /// Run every method you supply parameters for, side by side
    Compare {
        expression: String,
        /// Bracket for bisection
        #[arg(long, num_args = 2, value_names = ["A", "B"], allow_negative_numbers = true)]
        bracket: Option<Vec<f64>>,
        /// Initial guess for Newton-Raphson
        #[arg(long, allow_negative_numbers = true)]
        guess: Option<f64>,
        /// Two initial guesses for the secant method
        #[arg(long, num_args = 2, value_names = ["X0", "X1"], allow_negative_numbers = true)]
        points: Option<Vec<f64>>,
        #[command(flatten)]
        opts: SolverOpts,
    },
    /// List the predefined test functions
    Functions,
}

#[derive(ClapArgs)]
struct SolverOpts {
    /// Convergence tolerance
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,
    /// Iteration budget
    #[arg(long, default_value_t = 100)]
    max_iterations: usize,
}

impl SolverOpts {
    fn settings(&self) -> Settings {
        Settings {
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Bisection {
            expression,
            a,
            b,
            opts,
        } => {
            let f = Function::parse(&resolve(&expression))?;
            let result = bisection::solve(&f, a, b, &opts.settings())?;
            print_result(&result, cli.json)?;
        }
        Command::Newton {
            expression,
            x0,
            opts,
        } => {
            let f = Function::parse(&resolve(&expression))?;
            let f_prime = f.derivative()?;
            let result = newton::solve(&f, &f_prime, x0, &opts.settings())?;
            print_result(&result, cli.json)?;
        }
        Command::Secant {
            expression,
            x0,
            x1,
            opts,
        } => {
            let f = Function::parse(&resolve(&expression))?;
            let result = secant::solve(&f, x0, x1, &opts.settings())?;
            print_result(&result, cli.json)?;
        }
        Command::Compare {
            expression,
            bracket,
            guess,
            points,
            opts,
        } => {
            let params = CompareParams {
                bisection: bracket.map(|b| BisectionParams { a: b[0], b: b[1] }),
                newton: guess.map(|x0| NewtonParams { x0 }),
                secant: points.map(|p| SecantParams { x0: p[0], x1: p[1] }),
            };
            let comparison = compare(&resolve(&expression), &params, &opts.settings())?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                println!("{}", comparison.expression.bold());
                print_outcome("bisection", comparison.bisection.as_ref());
                print_outcome("newton", comparison.newton.as_ref());
                print_outcome("secant", comparison.secant.as_ref());
            }
        }
        Command::Functions => {
            for entry in catalog::all() {
                println!("{:<16} {}", entry.name.cyan(), entry.description);
            }
        }
    }
    Ok(())
}

/// Expressions may be given by catalog name.
fn resolve(expression: &str) -> String {
    match catalog::lookup(expression) {
        Some(entry) => entry.expression.to_string(),
        None => expression.to_string(),
    }
}

fn print_result(
    result: &root_finder::MethodResult,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{result}");
    }
    Ok(())
}

fn print_outcome(name: &str, outcome: Option<&MethodOutcome>) {
    match outcome {
        None => println!("{}: {}", name.cyan(), "skipped".dimmed()),
        Some(MethodOutcome::Solved(result)) => println!("{result}"),
        Some(MethodOutcome::Failed { failure_reason }) => {
            println!("{}: {}", name.cyan(), failure_reason.red());
        }
    }
}
