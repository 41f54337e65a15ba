//! Public API surface for least-squares minimization.
//!
//! - [`Objective`]: trait fitting routines implement for their loss.
//! - [`FitOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`FitOutcome`]: normalized result returned by the high-level `minimize` API.
//!
//! Convention: the objective *is* the cost. Nothing is negated; an analytic
//! gradient, when supplied, is the gradient of that same cost.
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// Objective minimized by the optimizer, typically a sum of squared residuals.
///
/// - `type Data`: per-problem payload carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `c(θ)`.
/// - `check(&Theta, &Data) -> OptResult<()>`: reject obviously invalid
///   `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇c(θ)`.
///   The default returns [`OptError::GradientNotImplemented`], which routes
///   the solver to finite differences.
pub trait Objective {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Implements `FromStr` with case-insensitive names (`"MoreThuente"`,
/// `"HagerZhang"`). Unknown names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances`: numerical tolerances and iteration limits.
/// - `line_searcher: LineSearcher`: line-search algorithm used by L-BFGS.
/// - `verbose: bool`: if `true`, attaches an observer (behind the `obs_slog`
///   feature) and prints the initial objective.
/// - `lbfgs_mem: Option<usize>`: L-BFGS history size; `None` uses
///   [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM).
///
/// Default:
/// - `tols`: `tol_grad = 1e-8`, `tol_cost = 1e-12`, `max_iter = 200`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl FitOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-8), tol_cost: Some(1e-12), max_iter: Some(200) }
    }
}

/// Canonical result returned by `minimize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best objective value `c(θ̂)`.
/// - `converged`: `true` only if the solver stopped on its own convergence
///   test (`SolverConverged`) or reached the target cost. Runs cut off by
///   the iteration cap report `false`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`
///   (`cost_count`, `gradient_count`, ...).
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl FitOutcome {
    /// Build a validated [`FitOutcome`] from raw solver state.
    ///
    /// # Errors
    /// - [`OptError::SolverExit`] if the solver aborted, e.g. because its
    ///   line search broke down. The last iterate is not a fit in that case.
    /// - Propagates validation errors for `theta_hat` (missing or non-finite)
    ///   and for `value` (non-finite).
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let status = match &termination {
            TerminationStatus::NotTerminated => "Not terminated".to_string(),
            other => format!("{other:?}"),
        };
        let converged = match termination {
            TerminationStatus::Terminated(TerminationReason::SolverExit(text)) => {
                return Err(OptError::SolverExit { text });
            }
            TerminationStatus::Terminated(
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached,
            ) => true,
            _ => false,
        };
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}
