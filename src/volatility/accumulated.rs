//! volatility::accumulated — accumulated power volatility from one path.
//!
//! Purpose
//! -------
//! Estimate `∫_0^t σ_s^p ds` at every grid point `t = k/n` from an observed
//! BSS path `Y` sampled `n` times per unit time:
//!
//! ```text
//! V_p[k] = (1 / n) · Σ_{i<=k} |Y[i+1] - Y[i]|^p / (τ^p · m_p),
//! ```
//!
//! where `τ` is the scale factor of the Gaussian core at step `1/n` and
//! `m_p = E|N(0,1)|^p`.
//!
//! Key behaviors
//! -------------
//! - [`estimate`] / [`estimate_with_options`]: resolve the strategy, validate
//!   inputs, estimate `τ` with [`scale_factor`], then [`accumulate`].
//! - [`scale_factor`] dispatches on [`ScaleStrategy`]:
//!   - `CofGamma`: `α̂` by change of frequency, asymptotic gamma `τ(n, α̂)`.
//!   - `AcfGamma` / `AcfPower`: ACF least squares, exact kernel `τ(n)`.
//!   - `NonParametric`: root mean square of the increments.
//! - [`accumulate`] is the pure core for a known `τ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - One scalar `τ` is applied to the whole path.
//! - The output has length `len(Y) - 1`, is non-negative and non-decreasing:
//!   it is a running sum of non-negative terms over a positive constant.
//! - Strategy resolution happens before data validation, so an unsupported
//!   `(method, kernel)` pair is reported whatever the data.
//!
//! Conventions
//! -----------
//! - Collaborator errors are mapped to [`VolError::EstimationFailed`] with
//!   `Stage::ScaleFactorFit` for data fits and `Stage::ScaleFactorFormula`
//!   for closed-form evaluations.

use crate::fitting::{
    acf::{AcfFitOptions, fit_gamma_kernel, fit_power_kernel},
    cof::cof_alpha_fit_with_power,
    nonparametric::tau_nonparametric,
};
use crate::kernels::{BssKernel, gamma_kernel_tau_asymptotic};
use crate::numerics::abs_normal_moment;
use crate::volatility::{
    errors::{Stage, VolError, VolResult},
    method::{Kernel, Method, ScaleStrategy},
    validation::{validate_path, validate_power, validate_sampling_rate, validate_scale_factor},
};
use ndarray::Array1;

/// Tuning of the scale-factor collaborators.
///
/// - `acf`: lag count and optimizer options of the ACF least-squares fits.
/// - `cof_power`: power used by the change-of-frequency `α` estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorOptions {
    pub acf: AcfFitOptions,
    pub cof_power: f64,
}

impl EstimatorOptions {
    /// # Errors
    /// - [`VolError::InvalidPower`] if `cof_power` is not finite and `> 0`.
    pub fn new(acf: AcfFitOptions, cof_power: f64) -> VolResult<Self> {
        validate_power(cof_power)?;
        Ok(Self { acf, cof_power })
    }
}

impl Default for EstimatorOptions {
    fn default() -> Self {
        Self { acf: AcfFitOptions::default(), cof_power: 2.0 }
    }
}

/// `m_p = 2^{p/2} Γ((p+1)/2) / √π`, the `p`-th absolute moment of `N(0,1)`.
pub fn moment_constant(p: f64) -> f64 {
    abs_normal_moment(p)
}

/// Accumulated power volatility with default [`EstimatorOptions`].
///
/// # Errors
/// See [`estimate_with_options`].
pub fn estimate(
    path: &[f64], n: usize, p: f64, method: Method, kernel: Kernel,
) -> VolResult<Array1<f64>> {
    estimate_with_options(path, n, p, method, kernel, &EstimatorOptions::default())
}

/// Accumulated power volatility of `path` at sampling rate `n`.
///
/// Returns an array of length `path.len() - 1`; entry `k` estimates the
/// accumulated `p`-th power volatility up to time `(k + 1) / n`.
///
/// # Errors
/// - [`VolError::UnsupportedCombination`] for `(Cof, Power)`.
/// - Validation errors from [`crate::volatility::validation`].
/// - [`VolError::EstimationFailed`] if the scale factor cannot be estimated
///   or the normalization overflows.
pub fn estimate_with_options(
    path: &[f64], n: usize, p: f64, method: Method, kernel: Kernel, opts: &EstimatorOptions,
) -> VolResult<Array1<f64>> {
    let strategy = ScaleStrategy::resolve(method, kernel)?;
    validate_path(path)?;
    validate_sampling_rate(n)?;
    validate_power(p)?;
    let tau = scale_factor(path, n, strategy, opts)?;
    accumulate(path, n, p, tau)
}

/// Estimate the scale factor `τ` with the given strategy.
///
/// # Errors
/// - [`VolError::EstimationFailed`] at `Stage::ScaleFactorFit` when the
///   data fit fails (including constant paths), or at
///   `Stage::ScaleFactorFormula` when the kernel formula fails or yields a
///   non-positive `τ`.
pub fn scale_factor(
    path: &[f64], n: usize, strategy: ScaleStrategy, opts: &EstimatorOptions,
) -> VolResult<f64> {
    let fit_failed = VolError::at_stage(Stage::ScaleFactorFit);
    let formula_failed = VolError::at_stage(Stage::ScaleFactorFormula);
    let tau = match strategy {
        ScaleStrategy::CofGamma => {
            let alpha = cof_alpha_fit_with_power(path, opts.cof_power).map_err(fit_failed)?;
            log::debug!("COF alpha estimate: {alpha:.6}");
            gamma_kernel_tau_asymptotic(n, alpha).map_err(formula_failed)?
        }
        ScaleStrategy::AcfGamma => {
            let fit = fit_gamma_kernel(path, n, &opts.acf).map_err(fit_failed)?;
            fit.kernel.tau(n).map_err(formula_failed)?
        }
        ScaleStrategy::AcfPower => {
            let fit = fit_power_kernel(path, n, &opts.acf).map_err(fit_failed)?;
            fit.kernel.tau(n).map_err(formula_failed)?
        }
        ScaleStrategy::NonParametric => tau_nonparametric(path).map_err(fit_failed)?,
    };
    if !tau.is_finite() || tau <= 0.0 {
        return Err(VolError::EstimationFailed {
            stage: Stage::ScaleFactorFormula,
            reason: format!("scale factor {tau} is not finite and > 0"),
        });
    }
    log::debug!("scale factor ({strategy:?}, n = {n}): tau = {tau:.6e}");
    Ok(tau)
}

/// Normalized running sum of `|ΔY|^p` for a known scale factor `tau`.
///
/// # Errors
/// - Validation errors for `path`, `n`, `p` and `tau`.
/// - [`VolError::EstimationFailed`] at `Stage::Accumulation` if the
///   normalizing constant or the sum is not finite.
pub fn accumulate(path: &[f64], n: usize, p: f64, tau: f64) -> VolResult<Array1<f64>> {
    validate_path(path)?;
    validate_sampling_rate(n)?;
    validate_power(p)?;
    validate_scale_factor(tau)?;

    let norm = n as f64 * tau.powf(p) * moment_constant(p);
    if !norm.is_finite() || norm <= 0.0 {
        return Err(VolError::EstimationFailed {
            stage: Stage::Accumulation,
            reason: format!("normalizing constant n * tau^p * m_p = {norm} is not finite and > 0"),
        });
    }

    let mut running = 0.0;
    let out: Array1<f64> = path
        .windows(2)
        .map(|w| {
            running += (w[1] - w[0]).abs().powf(p);
            running / norm
        })
        .collect();

    // The sum is non-decreasing: an overflow shows up in the last entry.
    let last = out[out.len() - 1];
    if !last.is_finite() {
        return Err(VolError::EstimationFailed {
            stage: Stage::Accumulation,
            reason: format!("accumulated power variation overflowed: {last}"),
        });
    }
    Ok(out)
}
