//! Newton's method over a compiled function.
//!
//! Each step evaluates `f(x)`, estimates `f'(x)` with a central difference
//! and moves to `x - f(x) / f'(x)`. Steps are produced lazily so a caller can
//! render them one at a time.

use tracing::{debug, trace};

use crate::{
    error::EvaluationError,
    interpreter::{evaluator::compiler::CompiledFunction, value::Value},
};

/// Tuning for the solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Upper bound on the number of steps.
    pub max_iterations: usize,
    /// A step whose `|f(x)|` is at most this value is converged.
    pub tolerance:      Value,
    /// Relative width of the central difference.
    pub step:           Value,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self { max_iterations: 50,
               tolerance:      1e-10,
               step:           1e-6, }
    }
}

/// One iteration of the method.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonStep {
    /// Zero-based iteration number.
    pub iteration: usize,
    /// The point evaluated in this step.
    pub x:         Value,
    /// `f(x)`.
    pub value:     Value,
    /// The estimated derivative at `x`.
    pub slope:     Value,
    /// The point for the next step; equal to `x` once converged.
    pub next:      Value,
    /// Whether `|f(x)|` is within tolerance.
    pub converged: bool,
}

/// Ways the solver can stop without a root.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NewtonError {
    /// The function itself failed to evaluate.
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    /// The derivative vanished, so the tangent never meets the axis.
    #[error("Derivative is zero at x = {x}; the tangent line has no root.")]
    StationaryPoint {
        /// Where the slope vanished.
        x: Value,
    },
    /// The function or its derivative is infinite or NaN.
    #[error("Function is not finite near x = {x}.")]
    NonFinite {
        /// Where the value or slope was not finite.
        x: Value,
    },
    /// The iteration budget ran out.
    #[error("No root found after {iterations} iterations; last x = {x}.")]
    DidNotConverge {
        /// Steps taken.
        iterations: usize,
        /// The last point reached.
        x:          Value,
    },
}

/// Estimates `f'(x)` with a central difference.
///
/// # Errors
/// Propagates evaluation failures of `f`.
pub fn derivative(function: &CompiledFunction,
                  x: Value,
                  step: Value)
                  -> Result<Value, EvaluationError> {
    let h = step * x.abs().max(1.0);
    let ahead = function.call(x + h)?;
    let behind = function.call(x - h)?;
    Ok((ahead - behind) / (2.0 * h))
}

/// Lazy sequence of Newton steps from a starting point.
///
/// Yields at most `max_iterations` items and stops after the first converged
/// step or the first error.
///
/// # Example
/// ```
/// use newton::newton::{NewtonConfig, NewtonSteps};
///
/// let f = newton::compile("x^2 - 2").unwrap();
/// let last = NewtonSteps::new(&f, 1.0, NewtonConfig::default()).last()
///                                                             .unwrap()
///                                                             .unwrap();
/// assert!(last.converged);
/// assert!((last.x - 2f64.sqrt()).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct NewtonSteps<'f> {
    function:  &'f CompiledFunction,
    config:    NewtonConfig,
    x:         Value,
    iteration: usize,
    finished:  bool,
}

impl<'f> NewtonSteps<'f> {
    /// Starts the iteration at `start`.
    #[must_use]
    pub const fn new(function: &'f CompiledFunction, start: Value, config: NewtonConfig) -> Self {
        Self { function,
               config,
               x: start,
               iteration: 0,
               finished: false }
    }

    fn step(&self) -> Result<NewtonStep, NewtonError> {
        let x = self.x;
        let value = self.function.call(x)?;
        if !value.is_finite() {
            return Err(NewtonError::NonFinite { x });
        }

        let slope = derivative(self.function, x, self.config.step)?;
        if !slope.is_finite() {
            return Err(NewtonError::NonFinite { x });
        }

        let converged = value.abs() <= self.config.tolerance;
        if converged {
            return Ok(NewtonStep { iteration: self.iteration,
                                   x,
                                   value,
                                   slope,
                                   next: x,
                                   converged });
        }
        if slope == 0.0 {
            return Err(NewtonError::StationaryPoint { x });
        }

        Ok(NewtonStep { iteration: self.iteration,
                        x,
                        value,
                        slope,
                        next: x - value / slope,
                        converged })
    }
}

impl Iterator for NewtonSteps<'_> {
    type Item = Result<NewtonStep, NewtonError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.iteration >= self.config.max_iterations {
            return None;
        }

        let result = self.step();
        match &result {
            Ok(step) => {
                trace!(iteration = step.iteration,
                       x = step.x,
                       value = step.value,
                       slope = step.slope,
                       "newton step");
                self.finished = step.converged;
                self.x = step.next;
                self.iteration += 1;
            },
            Err(_) => self.finished = true,
        }
        Some(result)
    }
}

/// Runs the method to convergence and returns the converged step.
///
/// # Errors
/// - Any error yielded by [`NewtonSteps`].
/// - [`NewtonError::DidNotConverge`] when the iteration budget runs out.
///
/// # Example
/// ```
/// use newton::newton::{NewtonConfig, solve};
///
/// let f = newton::compile("cos(x) - x").unwrap();
/// let root = solve(&f, 1.0, NewtonConfig::default()).unwrap();
/// assert!((root.x - 0.739_085_133_215_160_6).abs() < 1e-9);
/// ```
pub fn solve(function: &CompiledFunction,
             start: Value,
             config: NewtonConfig)
             -> Result<NewtonStep, NewtonError> {
    let mut steps = NewtonSteps::new(function, start, config);
    let mut last_x = start;

    for step in steps.by_ref() {
        let step = step?;
        if step.converged {
            debug!(x = step.x, iterations = step.iteration + 1, "newton converged");
            return Ok(step);
        }
        last_x = step.next;
    }

    Err(NewtonError::DidNotConverge { iterations: steps.iteration,
                                      x:          last_x, })
}
