#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while parsing a token stream.
pub enum ParseError {
    /// Found a token that cannot appear at this point of the grammar.
    #[error("Error at position {position}: Unexpected token: {token}.")]
    UnexpectedToken {
        /// The token encountered.
        token:    String,
        /// Byte offset of the token.
        position: usize,
    },
    /// Reached the end of input in the middle of an expression.
    #[error("Error at position {position}: Unexpected end of input.")]
    UnexpectedEndOfInput {
        /// Byte offset of the end of input.
        position: usize,
    },
    /// A closing parenthesis `)` was expected but not found.
    #[error("Error at position {position}: Expected closing parenthesis ')' for the '(' at position {open}.")]
    ExpectedClosingParen {
        /// Byte offset of the unmatched `(`.
        open:     usize,
        /// Byte offset where `)` was expected.
        position: usize,
    },
    /// Found extra tokens after a complete expression.
    #[error("Error at position {position}: Extra tokens after expression, starting at {token}.")]
    UnexpectedTrailingTokens {
        /// The first extra token.
        token:    String,
        /// Byte offset of the first extra token.
        position: usize,
    },
    /// Prefix minus, parentheses, calls or exponents nested past the limit.
    #[error("Error at position {position}: Expression is nested more than {limit} levels deep.")]
    NestingTooDeep {
        /// The deepest accepted nesting.
        limit:    usize,
        /// Byte offset of the token where the limit was passed.
        position: usize,
    },
}

impl ParseError {
    /// Byte offset in the source where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEndOfInput { position }
            | Self::ExpectedClosingParen { position, .. }
            | Self::UnexpectedTrailingTokens { position, .. }
            | Self::NestingTooDeep { position, .. } => *position,
        }
    }
}
