use std::fmt;

use logos::Logos;
use tracing::trace;

use crate::{error::LexError, interpreter::value::Value};

/// Result type used by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// Failure categories reported by the generated lexer.
///
/// Converted into a positioned [`LexError`] by [`next_token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No rule matched the current character.
    #[default]
    UnexpectedCharacter,
    /// A numeral with a dangling or bare decimal point.
    MalformedNumber,
}

/// Represents a lexical token in the source input.
///
/// A token is the smallest meaningful unit of an expression. Whitespace is
/// skipped; validity of identifiers is decided later by the evaluator.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Numeric literal tokens, such as `3`, `3.14` or `0.5`.
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    #[regex(r"[0-9]+\.", malformed_number)]
    #[regex(r"\.[0-9]*", malformed_number)]
    Number(Value),
    /// A run of letters such as `x`, `pi` or `sin`.
    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Marks the end of the input. Never produced by the generated lexer
    /// itself; [`next_token`] returns it once the source is exhausted.
    EndOfText,
    /// Spaces, tabs, newlines and other white space.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Identifier(name) => write!(f, "'{name}'"),
            Self::Plus => write!(f, "'+'"),
            Self::Minus => write!(f, "'-'"),
            Self::Star => write!(f, "'*'"),
            Self::Slash => write!(f, "'/'"),
            Self::Caret => write!(f, "'^'"),
            Self::LParen => write!(f, "'('"),
            Self::RParen => write!(f, "')'"),
            Self::EndOfText => write!(f, "end of input"),
            Self::Ignored => write!(f, "white space"),
        }
    }
}

/// Parses a numeric literal from the current token slice.
///
/// The regex only admits digit runs with an optional fractional part, which
/// always parse as `f64`.
fn parse_number(lex: &logos::Lexer<Token>) -> Result<Value, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::MalformedNumber)
}

fn malformed_number(_: &logos::Lexer<Token>) -> Result<Value, LexErrorKind> {
    Err(LexErrorKind::MalformedNumber)
}

/// Reads the next token starting at byte offset `cursor`.
///
/// Leading white space is skipped. Returns the token paired with the byte
/// offset where it starts, and the cursor just past it. Once the source is
/// exhausted the token is [`Token::EndOfText`], positioned at the end of the
/// source; calling again keeps returning it.
///
/// # Errors
/// - [`LexError::UnexpectedCharacter`] when the character at the cursor starts
///   no token.
/// - [`LexError::MalformedNumber`] for numerals like `1.` or `.5`.
///
/// # Example
/// ```
/// use newton::interpreter::lexer::{Token, next_token};
///
/// let ((token, position), cursor) = next_token("  12.5 + x", 0).unwrap();
/// assert_eq!(token, Token::Number(12.5));
/// assert_eq!((position, cursor), (2, 6));
///
/// let ((token, _), _) = next_token("  12.5 + x", cursor).unwrap();
/// assert_eq!(token, Token::Plus);
/// ```
pub fn next_token(source: &str, cursor: usize) -> LexResult<((Token, usize), usize)> {
    let rest = source.get(cursor..).unwrap_or_default();
    let mut lexer = Token::lexer(rest);

    match lexer.next() {
        None => Ok(((Token::EndOfText, source.len()), source.len())),
        Some(Ok(token)) => {
            let span = lexer.span();
            Ok(((token, cursor + span.start), cursor + span.end))
        },
        Some(Err(kind)) => {
            let span = lexer.span();
            let position = cursor + span.start;
            Err(match kind {
                LexErrorKind::MalformedNumber => {
                    LexError::MalformedNumber { literal: lexer.slice().to_string(),
                                                position }
                },
                LexErrorKind::UnexpectedCharacter => {
                    let character = lexer.slice().chars().next().unwrap_or('\u{FFFD}');
                    LexError::UnexpectedCharacter { character,
                                                    position }
                },
            })
        },
    }
}

/// Splits the whole source into tokens.
///
/// Calls [`next_token`] until it reports [`Token::EndOfText`]. The returned
/// list always ends with that token.
///
/// # Errors
/// Returns the first [`LexError`] encountered.
///
/// # Example
/// ```
/// use newton::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("sin(x)").unwrap();
/// let kinds: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
/// assert_eq!(kinds,
///            vec![Token::Identifier("sin".into()),
///                 Token::LParen,
///                 Token::Identifier("x".into()),
///                 Token::RParen,
///                 Token::EndOfText]);
/// ```
pub fn tokenize(source: &str) -> LexResult<Vec<(Token, usize)>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    loop {
        let ((token, position), next) = next_token(source, cursor)?;
        trace!(%token, position, "lexed token");
        let done = token == Token::EndOfText;
        tokens.push((token, position));
        if done {
            return Ok(tokens);
        }
        cursor = next;
    }
}
