/// Lexing errors.
///
/// Raised while turning source text into tokens: characters outside the
/// grammar's alphabet and malformed numeric literals.
pub mod lex_error;
/// Parsing errors.
///
/// Raised when a token is valid on its own but not at its position in the
/// grammar, when parentheses are unbalanced, or when input ends early.
pub mod parse_error;
/// Evaluation errors.
///
/// Raised while walking a well-formed tree: unknown keywords or functions,
/// wrong argument counts, and (under the strict policy) division by zero.
pub mod evaluation_error;

pub use evaluation_error::EvaluationError;
pub use lex_error::LexError;
pub use parse_error::ParseError;

/// Any failure produced by the parse/evaluate pipeline.
///
/// Each variant wraps the error of one stage, so callers can match on the
/// stage and then on the precise cause.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The source could not be split into tokens.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens do not form a valid expression.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The tree could not be evaluated.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
}
