use std::iter::Peekable;

use tracing::debug;

use crate::{
    ast::Expr,
    error::{Error, ParseError},
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::parse_additive,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Name of the single free variable.
pub const VARIABLE_NAME: &str = "x";

/// Deepest nesting of prefix minus, parentheses, call arguments and
/// exponents the parser accepts.
///
/// Each level costs several stack frames; past this limit parsing stops with
/// [`ParseError::NestingTooDeep`] instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Parses a complete source string into an expression tree.
///
/// The source is tokenized first, then parsed starting at the lowest
/// precedence level. The whole input must form exactly one expression.
///
/// # Errors
/// - [`Error::Lex`] if the source contains characters outside the grammar or
///   malformed numerals.
/// - [`Error::Parse`] if the tokens do not form one well-formed expression.
///
/// # Example
/// ```
/// use newton::interpreter::parser::core::parse;
///
/// let expr = parse("1 + 2 * 3").unwrap();
/// assert_eq!(expr.to_string(), "(1 + (2 * 3))");
///
/// assert!(parse("1 +").is_err());
/// ```
pub fn parse(source: &str) -> Result<Expr, Error> {
    let tokens = tokenize(source)?;
    let mut iter = tokens.iter().peekable();

    let expr = parse_expression(&mut iter, 0)?;
    expect_end_of_text(&mut iter)?;

    debug!(source, nodes = expr.node_count(), "parsed expression");
    Ok(expr)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, addition, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := additive`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, position)` pairs.
/// - `depth`: Number of enclosing nested constructs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    parse_additive(tokens, depth)
}

/// Fails with [`ParseError::NestingTooDeep`] once `depth` passes
/// [`MAX_NESTING_DEPTH`].
pub(super) fn check_depth<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if depth > MAX_NESTING_DEPTH {
        let position = tokens.peek().map_or(0, |(_, position)| *position);
        return Err(ParseError::NestingTooDeep { limit: MAX_NESTING_DEPTH,
                                                position });
    }
    Ok(())
}

/// Requires that the next token is [`Token::EndOfText`].
///
/// Anything else is reported as trailing input; this is how adjacency without
/// an operator (`2x`, `2(3)`, `M1`) is rejected.
fn expect_end_of_text<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::EndOfText, _)) | None => Ok(()),
        Some((tok, position)) => {
            Err(ParseError::UnexpectedTrailingTokens { token:    tok.to_string(),
                                                       position: *position, })
        },
    }
}
