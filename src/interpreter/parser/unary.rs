use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_exponent,
            core::{ParseResult, VARIABLE_NAME, check_depth, parse_expression},
        },
    },
};

/// Parses a unary expression.
///
/// Prefix minus is right-recursive, so `--1` and `-(-1)` both denote `1`.
/// Minus binds looser than `^` on its operand: `-2^2` is `-(2^2)`.
///
/// Grammar:
/// ```text
///     unary := "-" unary
///            | exponent
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `depth`: Current nesting depth; each minus adds one.
///
/// # Returns
/// An [`Expr::UnaryMinus`] or the exponent-level expression.
///
/// # Errors
/// `NestingTooDeep` once `depth` exceeds the nesting limit.
pub fn parse_unary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    check_depth(tokens, depth)?;
    if let Some((Token::Minus, position)) = tokens.peek() {
        let position = *position;
        tokens.next();
        let operand = parse_unary(tokens, depth + 1)?;
        Ok(Expr::UnaryMinus { operand: Box::new(operand),
                              position })
    } else {
        parse_exponent(tokens, depth)
    }
}

/// Parses a primary (atomic) expression.
///
/// Grammar:
/// ```text
///     primary := NUMBER
///              | "(" expression ")"
///              | IDENT "(" expression ")"
///              | IDENT
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
/// - `depth`: Current nesting depth.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
///
/// # Errors
/// - `UnexpectedEndOfInput` when the input ends where an operand is required.
/// - `UnexpectedToken` for an operator or `)` in operand position.
pub fn parse_primary<'a, I>(tokens: &mut Peekable<I>, depth: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Number(value), position)) => Ok(Expr::Number { value:    *value,
                                                                    position: *position, }),
        Some((Token::LParen, position)) => parse_grouping(tokens, *position, depth),
        Some((Token::Identifier(name), position)) => {
            parse_identifier_or_function(tokens, name, *position, depth)
        },
        Some((Token::EndOfText, position)) => {
            Err(ParseError::UnexpectedEndOfInput { position: *position })
        },
        Some((tok, position)) => Err(ParseError::UnexpectedToken { token:    tok.to_string(),
                                                                   position: *position, }),
        None => Err(ParseError::UnexpectedEndOfInput { position: 0 }),
    }
}

/// Parses a parenthesized expression.
///
/// Expected form `( expression )`
///
/// The opening parenthesis has already been consumed. Failure to find the
/// closing parenthesis yields `ParseError::ExpectedClosingParen`.
///
/// Grammar `grouping := "(" expression ")"`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after `(`.
/// - `open`: Position of the `(`.
/// - `depth`: Nesting depth outside the parentheses.
///
/// # Returns
/// The inner expression as-is (no wrapper node).
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>,
                         open: usize,
                         depth: usize)
                         -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let expr = parse_expression(tokens, depth + 1)?;
    expect_closing_paren(tokens, open)?;
    Ok(expr)
}

/// Parses an identifier, the variable, or a function call.
///
/// Supported forms:
///
/// - `x`           the free variable
/// - `name`        a keyword such as `pi`
/// - `name(expr)`  a call with exactly one argument
///
/// Whether a keyword or function name is known is checked at evaluation time.
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the identifier.
/// - `name`: The identifier.
/// - `position`: Position of the identifier.
/// - `depth`: Nesting depth outside the call.
///
/// # Returns
/// - [`Expr::FunctionCall`] if followed by parentheses,
/// - [`Expr::Variable`] for `x`,
/// - [`Expr::Keyword`] otherwise.
fn parse_identifier_or_function<'a, I>(tokens: &mut Peekable<I>,
                                       name: &str,
                                       position: usize,
                                       depth: usize)
                                       -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::LParen, open)) => {
            let open = *open;
            tokens.next();
            let argument = parse_expression(tokens, depth + 1)?;
            expect_closing_paren(tokens, open)?;
            Ok(Expr::FunctionCall { name: name.to_string(),
                                    arguments: vec![argument],
                                    position })
        },
        _ if name == VARIABLE_NAME => Ok(Expr::Variable { position }),
        _ => Ok(Expr::Keyword { name: name.to_string(),
                                position }),
    }
}

fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>, open: usize) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(()),
        Some((_, position)) => Err(ParseError::ExpectedClosingParen { open,
                                                                      position: *position }),
        None => Err(ParseError::ExpectedClosingParen { open,
                                                       position: open }),
    }
}
