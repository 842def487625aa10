#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while evaluating a parsed expression.
pub enum EvaluationError {
    /// A bare identifier that names no known constant.
    #[error("Error at position {position}: Unknown keyword '{name}'.")]
    UnknownKeyword {
        /// The identifier as written.
        name:     String,
        /// Byte offset of the identifier.
        position: usize,
    },
    /// Called a function that is not in the function table.
    #[error("Error at position {position}: Unknown function '{name}'.")]
    UnknownFunction {
        /// The function name as written.
        name:     String,
        /// Byte offset of the function name.
        position: usize,
    },
    /// A function received a number of arguments other than its arity.
    #[error("Error at position {position}: Function '{name}' expects {expected} argument(s), found {found}.")]
    ArgumentCountMismatch {
        /// The function name.
        name:     String,
        /// The arity of the function.
        expected: usize,
        /// The number of arguments supplied.
        found:    usize,
        /// Byte offset of the call.
        position: usize,
    },
    /// Division by an exact zero under [`DivisionPolicy::Error`].
    ///
    /// [`DivisionPolicy::Error`]: crate::interpreter::evaluator::core::DivisionPolicy::Error
    #[error("Error at position {position}: Division by zero.")]
    DivisionByZero {
        /// Byte offset of the `/` operator.
        position: usize,
    },
}
