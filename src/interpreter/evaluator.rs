/// Core evaluation logic.
///
/// Defines the [`core::Evaluator`], its configuration, tree walking and
/// validation.
pub mod core;

/// Binary operator evaluation.
///
/// Applies `+ - * / ^` to already evaluated operands under the configured
/// division policy.
pub mod binary;

/// Function table.
///
/// Maps function names to unary numeric functions; holds the built-in
/// trigonometric set.
pub mod function;

/// Keyword table.
///
/// Maps bare identifiers to named constants such as `pi`.
pub mod keyword;

/// Compiled functions.
///
/// Closes over a validated tree so it can be evaluated repeatedly, from any
/// thread, without re-parsing.
pub mod compiler;
