use std::{fs, process::ExitCode};

use clap::{ArgAction, Parser};
use newton::{
    Evaluator, compile_with,
    interpreter::evaluator::{core::DivisionPolicy, function::FunctionTable},
    newton::{NewtonConfig, NewtonSteps},
    parse,
};
use tracing_subscriber::EnvFilter;

/// newton evaluates expressions in one variable `x` and steps Newton's method
/// on them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells newton to read the expression from a file instead of the
    /// argument.
    #[arg(short, long)]
    file: bool,

    /// Value bound to `x` when evaluating.
    #[arg(short = 'x', long = "at", default_value_t = 0.0, allow_hyphen_values = true)]
    at: f64,

    /// Run Newton's method from this starting point and print every step.
    #[arg(long, value_name = "START", allow_hyphen_values = true)]
    newton: Option<f64>,

    /// Maximum number of Newton steps.
    #[arg(long, default_value_t = NewtonConfig::default().max_iterations)]
    max_iterations: usize,

    /// A Newton step with |f(x)| at or below this value has converged.
    #[arg(long, default_value_t = NewtonConfig::default().tolerance)]
    tolerance: f64,

    /// Report division by zero as an error instead of producing inf/NaN.
    #[arg(long)]
    strict_division: bool,

    /// Use reciprocal definitions for sec, csc and cot.
    #[arg(long)]
    conventional_trig: bool,

    /// Print the parsed expression tree instead of evaluating it.
    #[arg(long)]
    ast: bool,

    /// Increase logging verbosity (-v: debug, -vv+: trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                     EnvFilter::new(directive_for_verbosity(args.verbose))
                 });
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .init();

    let source = if args.file {
        match fs::read_to_string(&args.contents) {
            Ok(source) => source,
            Err(_) => {
                eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                          &args.contents);
                return ExitCode::FAILURE;
            },
        }
    } else {
        args.contents.clone()
    };

    match run(&args, source.trim()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args, source: &str) -> Result<(), Box<dyn std::error::Error>> {
    if args.ast {
        println!("{}", parse(source)?);
        return Ok(());
    }

    let function = compile_with(source, evaluator_for(args))?;

    let Some(start) = args.newton else {
        println!("{}", function.call(args.at)?);
        return Ok(());
    };

    let config = NewtonConfig { max_iterations: args.max_iterations,
                                tolerance: args.tolerance,
                                ..NewtonConfig::default() };

    let mut converged = false;
    for step in NewtonSteps::new(&function, start, config) {
        let step = step?;
        println!("{:>3}  x = {:<24} f(x) = {:<24} f'(x) = {}",
                 step.iteration, step.x, step.value, step.slope);
        converged = step.converged;
    }

    if !converged {
        return Err(format!("No root found within {} iterations.", args.max_iterations).into());
    }
    Ok(())
}

fn evaluator_for(args: &Args) -> Evaluator {
    let functions = if args.conventional_trig {
        FunctionTable::conventional()
    } else {
        FunctionTable::standard()
    };
    let division = if args.strict_division {
        DivisionPolicy::Error
    } else {
        DivisionPolicy::Ieee754
    };

    Evaluator::default().with_functions(functions)
                        .with_division_policy(division)
}

const fn directive_for_verbosity(v: u8) -> &'static str {
    match v {
        0 => "newton=warn",
        1 => "newton=debug",
        _ => "newton=trace",
    }
}
