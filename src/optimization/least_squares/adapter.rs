//! Adapter that exposes an [`Objective`] as an `argmin` problem.
//!
//! The objective value is handed to the solver unchanged as the cost.
//! Without an analytic gradient the cost closure is finite-differenced,
//! central first and forward as a fallback.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    least_squares::{
        traits::Objective,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges an [`Objective`] to `argmin`'s `CostFunction` and `Gradient`.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: Objective> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Objective> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

impl<'a, F: Objective> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `c(θ)`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the objective's `value`.
    /// - `NonFiniteCost` if the objective returns `NaN` or `±∞`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: Objective> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate `∇c(θ)`.
    ///
    /// - An analytic gradient is validated and returned as is.
    /// - On `GradientNotImplemented`, central differences of the cost are
    ///   tried first. If a cost evaluation failed during that sweep, or the
    ///   result is not finite, one forward-difference retry is made.
    ///
    /// The FD closure must return `f64`, so the first cost error is parked
    /// in `closure_err` and the closure yields `NaN`.
    ///
    /// # Errors
    /// - Objective errors other than `GradientNotImplemented`.
    /// - Cost errors raised during the forward-difference retry.
    /// - Dimension or finiteness failures of the final gradient.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                let fd_grad = theta.central_diff(&cost_func);
                if closure_err.borrow().is_some() {
                    return forward_diff_checked(theta, &cost_func, &closure_err);
                }
                match validate_grad(&fd_grad, dim) {
                    Ok(()) => Ok(fd_grad),
                    Err(_) => forward_diff_checked(theta, &cost_func, &closure_err),
                }
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn forward_diff_checked<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}
