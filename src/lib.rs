//! # newton
//!
//! newton parses and evaluates arithmetic expressions over a single free
//! variable `x`. An expression can be evaluated once, or compiled into a
//! reusable function and fed to the Newton's-method stepper.
//!
//! The grammar supports `+ - * / ^`, prefix minus, parentheses, the constant
//! `pi` and the functions `sin cos tan sec csc cot`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

pub use crate::{
    ast::Expr,
    error::Error,
    interpreter::{
        evaluator::{compiler::CompiledFunction, core::Evaluator},
        parser::core::parse,
        value::Value,
    },
};

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and the binary operator type. The AST
/// is built by the parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines one variant per syntactic construct.
/// - Records the source position of every node for error reporting.
/// - Renders trees back to fully parenthesised text.
pub mod ast;
/// Provides error types for lexing, parsing, and evaluation.
///
/// Each stage has its own error enum so callers can tell an unbalanced
/// parenthesis from an unknown function; [`Error`] wraps all three.
pub mod error;
/// Orchestrates lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser and evaluator.
/// - Defines the scalar value type.
pub mod interpreter;
/// Newton's method over compiled functions.
pub mod newton;

/// Parses `source` and evaluates it once with `x` bound to `variable`.
///
/// Uses [`Evaluator::default`]: the standard functions, `pi`, and IEEE-754
/// division.
///
/// # Errors
/// Returns [`Error::Lex`], [`Error::Parse`] or [`Error::Evaluation`]
/// depending on the stage that failed.
///
/// # Examples
/// ```
/// use newton::{Error, parse_and_evaluate};
///
/// assert_eq!(parse_and_evaluate("(1+2)*(3+4)", 0.0).unwrap(), 21.0);
/// assert_eq!(parse_and_evaluate("x^2 + 1", 3.0).unwrap(), 10.0);
///
/// assert!(matches!(parse_and_evaluate("foo(1)", 0.0), Err(Error::Evaluation(_))));
/// assert!(matches!(parse_and_evaluate("1 +", 0.0), Err(Error::Parse(_))));
/// ```
pub fn parse_and_evaluate(source: &str, variable: Value) -> Result<Value, Error> {
    let expr = parse(source)?;
    let value = Evaluator::default().eval(&expr, variable)?;
    debug!(source, variable, value, "evaluated expression");
    Ok(value)
}

/// Parses `source` once and returns a function of `x`.
///
/// Keywords and function names are checked here, so the returned function
/// can only fail on division by zero under the strict division policy, which
/// the default evaluator does not use.
///
/// # Errors
/// Returns [`Error::Lex`], [`Error::Parse`] or [`Error::Evaluation`].
///
/// # Examples
/// ```
/// let f = newton::compile("sin(x) + 1").unwrap();
/// assert_eq!(f.call(0.0).unwrap(), 1.0);
///
/// assert!(newton::compile("bar(x)").is_err());
/// ```
pub fn compile(source: &str) -> Result<CompiledFunction, Error> {
    compile_with(source, Evaluator::default())
}

/// Like [`compile`], with a caller-configured evaluator.
///
/// # Errors
/// Returns [`Error::Lex`], [`Error::Parse`] or [`Error::Evaluation`].
pub fn compile_with(source: &str, evaluator: Evaluator) -> Result<CompiledFunction, Error> {
    let expr = parse(source)?;
    Ok(evaluator.compile(expr)?)
}
