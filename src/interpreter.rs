/// The evaluator module computes values from AST nodes.
///
/// The evaluator walks a parsed tree with the free variable bound to a
/// caller-supplied value, resolving keywords and functions through tables it
/// owns. It can also close over a tree to produce a reusable function.
///
/// # Responsibilities
/// - Evaluates every AST node kind.
/// - Owns the function and keyword tables and the division policy.
/// - Reports unknown names, arity mismatches and (optionally) division by
///   zero.
pub mod evaluator;
/// The lexer module tokenizes source text for further parsing.
///
/// The lexer reads the raw expression and produces tokens for numbers,
/// identifiers, operators and parentheses, each with its byte offset.
///
/// # Responsibilities
/// - Skips white space.
/// - Parses numeric literals into [`value::Value`].
/// - Reports unexpected characters and malformed numerals.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// A recursive-descent parser with one function per precedence level.
///
/// # Responsibilities
/// - Encodes precedence and associativity of `+ - * / ^` and prefix minus.
/// - Distinguishes the variable, keywords and function calls.
/// - Requires the whole input to form exactly one expression.
pub mod parser;
/// The scalar value type and numeric helpers.
pub mod value;
