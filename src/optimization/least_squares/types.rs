//! least_squares::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the
//! least-squares optimizer so the rest of the optimization code stays
//! agnostic to `ndarray` and Argmin generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are column vectors with length equal to the number
//!   of free (unconstrained) parameters.
//! - `Cost` is the scalar objective being *minimized*, e.g. a sum of
//!   squared autocorrelation residuals.
//! - `DEFAULT_LBFGS_MEM` encodes the typical history size for L-BFGS;
//!   callers may override this via [`FitOptions`](super::FitOptions).
//! - `HAGER_ZHANG_MAX_STEP` bounds the initial bracket of the Hager–Zhang
//!   line search.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ` in unconstrained optimizer space.
pub type Theta = Array1<f64>;

/// Gradient vector `∇c(θ)`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Scalar objective value `c(θ)` minimized by the optimizer.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Largest step the Hager–Zhang line search brackets on its first trial.
///
/// Argmin's default (`1e5`) evaluates the objective far outside the region
/// where exponential or power terms stay finite, and a non-finite trial
/// cost ends the whole L-BFGS run.
pub const HAGER_ZHANG_MAX_STEP: f64 = 10.0;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
