use crate::{
    ast::BinaryOperator,
    error::EvaluationError,
    interpreter::{
        evaluator::core::{DivisionPolicy, EvalResult, Evaluator},
        value::Value,
    },
};

impl Evaluator {
    /// Applies a binary operator to two evaluated operands.
    ///
    /// `^` uses `powf`, so fractional and negative exponents are supported.
    /// Division by zero follows the evaluator's [`DivisionPolicy`].
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand (the base for `^`).
    /// - `right`: Right operand (the exponent for `^`).
    /// - `position`: Position of the operator for error reporting.
    ///
    /// # Example
    /// ```
    /// use newton::{ast::BinaryOperator, interpreter::evaluator::core::Evaluator};
    ///
    /// let evaluator = Evaluator::default();
    /// assert_eq!(evaluator.eval_binary_op(BinaryOperator::Pow, 4.0, 0.5, 0).unwrap(), 2.0);
    /// assert!(evaluator.eval_binary_op(BinaryOperator::Div, 1.0, 0.0, 0)
    ///                  .unwrap()
    ///                  .is_infinite());
    /// ```
    pub fn eval_binary_op(&self,
                          op: BinaryOperator,
                          left: Value,
                          right: Value,
                          position: usize)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => Ok(left + right),
            BinaryOperator::Sub => Ok(left - right),
            BinaryOperator::Mul => Ok(left * right),
            BinaryOperator::Div => self.eval_division(left, right, position),
            BinaryOperator::Pow => Ok(left.powf(right)),
        }
    }

    fn eval_division(&self, left: Value, right: Value, position: usize) -> EvalResult<Value> {
        if right == 0.0 && self.division == DivisionPolicy::Error {
            return Err(EvaluationError::DivisionByZero { position });
        }
        Ok(left / right)
    }
}
