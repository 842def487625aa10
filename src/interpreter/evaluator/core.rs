use crate::{
    ast::Expr,
    error::EvaluationError,
    interpreter::{
        evaluator::{
            function::{FUNCTION_ARITY, FunctionTable, UnaryFn},
            keyword::KeywordTable,
        },
        value::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvaluationError` describing the failure.
pub type EvalResult<T> = Result<T, EvaluationError>;

/// What happens when the divisor of `/` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionPolicy {
    /// Follow IEEE-754: `1/0` is infinity, `0/0` is NaN.
    #[default]
    Ieee754,
    /// Report [`EvaluationError::DivisionByZero`].
    Error,
}

/// Walks expression trees and computes their value.
///
/// An evaluator owns the function and keyword tables and the division policy.
/// It holds no per-evaluation state, so one evaluator can serve any number of
/// trees and threads.
///
/// ## Usage
///
/// `Evaluator::default()` gives the standard configuration; the `with_*`
/// builders swap or extend individual parts.
///
/// ```
/// use newton::{
///     interpreter::evaluator::core::{DivisionPolicy, Evaluator},
///     parse,
/// };
///
/// let evaluator = Evaluator::default().with_division_policy(DivisionPolicy::Error)
///                                     .with_keyword("tau", std::f64::consts::TAU);
///
/// let expr = parse("tau / x").unwrap();
/// assert!(evaluator.eval(&expr, 0.0).is_err());
/// assert_eq!(evaluator.eval(&expr, 2.0).unwrap(), std::f64::consts::PI);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    pub(crate) functions: FunctionTable,
    pub(crate) keywords:  KeywordTable,
    pub(crate) division:  DivisionPolicy,
}

impl Evaluator {
    /// Replaces the function table.
    #[must_use]
    pub fn with_functions(mut self, functions: FunctionTable) -> Self {
        self.functions = functions;
        self
    }

    /// Adds or replaces a single function.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>, func: UnaryFn) -> Self {
        self.functions = self.functions.with_function(name, func);
        self
    }

    /// Adds or replaces a single keyword constant.
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: Value) -> Self {
        self.keywords = self.keywords.with_keyword(name, value);
        self
    }

    /// Selects how division by zero is handled.
    #[must_use]
    pub fn with_division_policy(mut self, division: DivisionPolicy) -> Self {
        self.division = division;
        self
    }

    /// The function table in use.
    #[must_use]
    pub const fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// The division policy in use.
    #[must_use]
    pub const fn division_policy(&self) -> DivisionPolicy {
        self.division
    }

    /// Evaluates an expression with the free variable bound to `x`.
    ///
    /// The walk is depth-first and post-order; binary operands are evaluated
    /// left before right.
    ///
    /// # Errors
    /// - `UnknownKeyword` / `UnknownFunction` for names missing from the
    ///   tables.
    /// - `ArgumentCountMismatch` for a call with other than one argument.
    /// - `DivisionByZero` under [`DivisionPolicy::Error`].
    pub fn eval(&self, expr: &Expr, x: Value) -> EvalResult<Value> {
        match expr {
            Expr::Number { value, .. } => Ok(*value),
            Expr::Variable { .. } => Ok(x),
            Expr::UnaryMinus { operand, .. } => Ok(-self.eval(operand, x)?),
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                let l = self.eval(left, x)?;
                let r = self.eval(right, x)?;
                self.eval_binary_op(*op, l, r, *position)
            },
            Expr::Keyword { name, position } => self.eval_keyword(name, *position),
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => {
                self.eval_function_call(name, arguments, *position, x)
            },
        }
    }

    /// Checks every keyword and function call in the tree against the tables
    /// without computing anything.
    ///
    /// # Errors
    /// The first `UnknownKeyword`, `UnknownFunction` or
    /// `ArgumentCountMismatch` found, in left-to-right order.
    pub fn validate(&self, expr: &Expr) -> EvalResult<()> {
        match expr {
            Expr::Number { .. } | Expr::Variable { .. } => Ok(()),
            Expr::UnaryMinus { operand, .. } => self.validate(operand),
            Expr::BinaryOp { left, right, .. } => {
                self.validate(left)?;
                self.validate(right)
            },
            Expr::Keyword { name, position } => self.eval_keyword(name, *position).map(|_| ()),
            Expr::FunctionCall { name,
                                 arguments,
                                 position, } => {
                self.lookup_function(name, arguments.len(), *position)?;
                arguments.iter().try_for_each(|argument| self.validate(argument))
            },
        }
    }

    fn eval_keyword(&self, name: &str, position: usize) -> EvalResult<Value> {
        self.keywords
            .get(name)
            .ok_or_else(|| EvaluationError::UnknownKeyword { name: name.to_string(),
                                                             position })
    }

    /// Evaluates a function call.
    ///
    /// The name and arity are checked before the argument is evaluated, so an
    /// unknown function is reported even if its argument would also fail.
    fn eval_function_call(&self,
                          name: &str,
                          arguments: &[Expr],
                          position: usize,
                          x: Value)
                          -> EvalResult<Value> {
        let func = self.lookup_function(name, arguments.len(), position)?;
        let argument = self.eval(&arguments[0], x)?;
        Ok(func(argument))
    }

    fn lookup_function(&self,
                       name: &str,
                       found: usize,
                       position: usize)
                       -> EvalResult<UnaryFn> {
        let func =
            self.functions
                .get(name)
                .ok_or_else(|| EvaluationError::UnknownFunction { name: name.to_string(),
                                                                  position })?;
        if found != FUNCTION_ARITY {
            return Err(EvaluationError::ArgumentCountMismatch { name: name.to_string(),
                                                                expected: FUNCTION_ARITY,
                                                                found,
                                                                position });
        }
        Ok(func)
    }
}
