#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while tokenizing.
pub enum LexError {
    /// A character that starts no token of the grammar.
    #[error("Error at position {position}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character in the source.
        position:  usize,
    },
    /// A numeral with a dangling or bare decimal point, such as `1.` or `.5`.
    #[error("Error at position {position}: Malformed number '{literal}'.")]
    MalformedNumber {
        /// The text that was read as the literal.
        literal:  String,
        /// Byte offset where the literal starts.
        position: usize,
    },
}

impl LexError {
    /// Byte offset in the source where the error was detected.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { position, .. } | Self::MalformedNumber { position, .. } => {
                *position
            },
        }
    }
}
