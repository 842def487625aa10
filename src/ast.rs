use std::fmt;

use crate::interpreter::value::Value;

/// The five binary arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`).
    Add,
    /// Subtraction (`-`).
    Sub,
    /// Multiplication (`*`).
    Mul,
    /// Division (`/`).
    Div,
    /// Exponentiation (`^`).
    Pow,
}

impl BinaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// An abstract syntax tree (AST) node representing an expression over the
/// single free variable `x`.
///
/// Each node owns its children and records the byte offset of the token that
/// introduced it. Trees are built bottom-up by the parser and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Number {
        /// The literal value.
        value:    Value,
        /// Byte offset in the source.
        position: usize,
    },
    /// The free variable `x`.
    Variable {
        /// Byte offset in the source.
        position: usize,
    },
    /// Prefix negation.
    UnaryMinus {
        /// The negated expression.
        operand:  Box<Self>,
        /// Byte offset of the `-`.
        position: usize,
    },
    /// A binary arithmetic operation.
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       BinaryOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Byte offset of the operator.
        position: usize,
    },
    /// A named constant such as `pi`.
    Keyword {
        /// The identifier as written.
        name:     String,
        /// Byte offset in the source.
        position: usize,
    },
    /// A call such as `sin(x)`.
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Byte offset of the function name.
        position:  usize,
    },
}

impl Expr {
    /// Returns the byte offset of the token that introduced this node.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Number { position, .. }
            | Self::Variable { position }
            | Self::UnaryMinus { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Keyword { position, .. }
            | Self::FunctionCall { position, .. } => *position,
        }
    }

    /// Counts the nodes of the tree, this one included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Number { .. } | Self::Variable { .. } | Self::Keyword { .. } => 1,
            Self::UnaryMinus { operand, .. } => 1 + operand.node_count(),
            Self::BinaryOp { left, right, .. } => 1 + left.node_count() + right.node_count(),
            Self::FunctionCall { arguments, .. } => {
                1 + arguments.iter().map(Self::node_count).sum::<usize>()
            },
        }
    }
}

/// Renders the tree fully parenthesised, so the grouping chosen by the parser
/// is visible.
///
/// # Example
/// ```
/// let expr = newton::parse("-2^2 + 3*x").unwrap();
/// assert_eq!(expr.to_string(), "((-(2 ^ 2)) + (3 * x))");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Variable { .. } => f.write_str("x"),
            Self::UnaryMinus { operand, .. } => write!(f, "(-{operand})"),
            Self::BinaryOp { left, op, right, .. } => write!(f, "({left} {op} {right})"),
            Self::Keyword { name, .. } => f.write_str(name),
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "{name}(")?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(")")
            },
        }
    }
}
