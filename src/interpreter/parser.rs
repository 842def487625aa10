/// Entry points and shared parser types.
///
/// Holds the top-level `parse` function, the expression entry point and the
/// `ParseResult` alias.
pub mod core;

/// Binary operator parsing.
///
/// Implements the additive, multiplicative and exponent precedence levels.
pub mod binary;

/// Unary and primary expression parsing.
///
/// Handles prefix minus, literals, the variable, keywords, function calls and
/// parenthesised groups.
pub mod unary;
