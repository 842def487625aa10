use std::sync::Arc;

use tracing::debug;

use crate::{
    ast::Expr,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::Value,
    },
};

/// A parsed, validated expression ready to be evaluated for many values of
/// `x`.
///
/// The tree and evaluator are shared behind `Arc`s and never mutated, so
/// clones are cheap and calls from several threads need no locking.
///
/// # Example
/// ```
/// let f = newton::compile("x^2 - 2").unwrap();
/// assert_eq!(f.call(3.0).unwrap(), 7.0);
///
/// let g = f.as_fn();
/// assert_eq!(g(0.0).unwrap(), -2.0);
/// ```
#[derive(Debug, Clone)]
pub struct CompiledFunction {
    expr:      Arc<Expr>,
    evaluator: Arc<Evaluator>,
}

impl CompiledFunction {
    /// Evaluates the expression with the free variable bound to `x`.
    ///
    /// # Errors
    /// Only `DivisionByZero` under the strict division policy; names and
    /// arities were checked when compiling.
    pub fn call(&self, x: Value) -> EvalResult<Value> {
        self.evaluator.eval(&self.expr, x)
    }

    /// Borrows the function as a closure.
    pub fn as_fn(&self) -> impl Fn(Value) -> EvalResult<Value> + Send + Sync + '_ {
        move |x| self.call(x)
    }

    /// The compiled tree.
    #[must_use]
    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl Evaluator {
    /// Validates `expr` and closes over it.
    ///
    /// # Errors
    /// The first unknown keyword, unknown function or arity mismatch in the
    /// tree.
    pub fn compile(self, expr: Expr) -> EvalResult<CompiledFunction> {
        self.validate(&expr)?;
        debug!(expr = %expr, "compiled expression");
        Ok(CompiledFunction { expr:      Arc::new(expr),
                              evaluator: Arc::new(self), })
    }
}
