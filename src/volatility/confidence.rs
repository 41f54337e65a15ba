//! volatility::confidence — pointwise confidence bands for accumulated volatility.
//!
//! Purpose
//! -------
//! Wrap the power-`p` estimate `V_p` in a symmetric normal band. The
//! asymptotic variance of `V_p[k]` is `K_p² · V_{2p}[k]`, so
//!
//! ```text
//! half_width[k] = z_a · K_p · sqrt(V_{2p}[k]),   z_a = Φ⁻¹(1/2 + level/2),
//! ```
//!
//! with `K_p` from [`crate::fitting::higher_moment::estimate_k`].
//!
//! Key behaviors
//! -------------
//! - [`estimate_ci`]: validates `method` and `kernel`, then builds both
//!   estimates with the non-parametric scale factor. The band theory is
//!   derived for that estimator.
//! - [`estimate_ci_with_method`]: forwards the caller's `(method, kernel)`
//!   to both estimates.
//! - The scale factor is estimated once and shared by `V_p` and `V_{2p}`;
//!   it does not depend on the power.
//!
//! Invariants & assumptions
//! ------------------------
//! - `lower[k] <= mean[k] <= upper[k]` for every `k`, since `z_a >= 0` and
//!   `V_{2p} >= 0`.
//! - `level = 0` gives `lower == upper == mean` exactly.
//! - `lower` is not clamped at zero; small samples may produce negative
//!   lower bounds.
//!
//! Testing notes
//! -------------
//! - Degenerate and monotone behaviour in the level, the half-width formula,
//!   and the pinned versus forwarded method are covered below.

use crate::fitting::higher_moment::estimate_k;
use crate::volatility::{
    accumulated::{EstimatorOptions, accumulate, scale_factor},
    errors::{Stage, VolError, VolResult},
    method::{Kernel, Method, ScaleStrategy},
    validation::{validate_confidence_level, validate_path, validate_power, validate_sampling_rate},
};
use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, Normal};

/// Pointwise band around the accumulated volatility estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceBand {
    pub lower: Array1<f64>,
    pub upper: Array1<f64>,
    /// The power-`p` point estimate the band is centred on.
    pub mean: Array1<f64>,
}

impl ConfidenceBand {
    pub fn len(&self) -> usize {
        self.mean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mean.is_empty()
    }

    /// `upper - lower` at every index.
    pub fn width(&self) -> Array1<f64> {
        &self.upper - &self.lower
    }
}

/// Two-sided standard normal quantile `Φ⁻¹(1/2 + level/2)`.
///
/// # Errors
/// - [`VolError::InvalidConfidenceLevel`] unless `0 <= level < 1`.
/// - [`VolError::EstimationFailed`] at `Stage::NormalQuantile` if the
///   inversion is not finite.
pub fn normal_quantile(level: f64) -> VolResult<f64> {
    validate_confidence_level(level)?;
    if level == 0.0 {
        return Ok(0.0);
    }
    let normal = Normal::new(0.0, 1.0).map_err(VolError::at_stage(Stage::NormalQuantile))?;
    let z = normal.inverse_cdf(0.5 + 0.5 * level);
    if !z.is_finite() {
        return Err(VolError::EstimationFailed {
            stage: Stage::NormalQuantile,
            reason: format!("inverse normal CDF at level {level} is {z}"),
        });
    }
    // Levels near zero can round to a tiny negative quantile.
    Ok(z.max(0.0))
}

/// Confidence band with both estimates pinned to the non-parametric method.
///
/// `method` and `kernel` are not forwarded. The pinned band historically
/// ignored them altogether; here they are still validated, so `(Cof, Power)`
/// is rejected even though it would not change the result. This departs
/// from the pinned behaviour on purpose: a selector pair that
/// [`crate::volatility::estimate`] refuses is refused by the band as well.
/// Use [`estimate_ci_with_method`] to centre the band on another method.
///
/// # Errors
/// - [`VolError::UnsupportedCombination`] for `(Cof, Power)`.
/// - See [`estimate_ci_with_method`].
pub fn estimate_ci(
    path: &[f64], n: usize, p: f64, method: Method, kernel: Kernel, confidence_level: f64,
) -> VolResult<ConfidenceBand> {
    ScaleStrategy::resolve(method, kernel)?;
    estimate_ci_with_method(
        path,
        n,
        p,
        Method::NonParametric,
        Kernel::Gamma,
        confidence_level,
        &EstimatorOptions::default(),
    )
}

/// Confidence band using the caller's method and kernel for the scale factor.
///
/// # Errors
/// - [`VolError::UnsupportedCombination`] for `(Cof, Power)`.
/// - Validation errors for `path`, `n`, `p` and `confidence_level`.
/// - [`VolError::EstimationFailed`] at `Stage::HigherMomentConstant` if
///   `K_p` cannot be estimated, or at the scale-factor and accumulation
///   stages as in [`crate::volatility::estimate_with_options`].
pub fn estimate_ci_with_method(
    path: &[f64], n: usize, p: f64, method: Method, kernel: Kernel, confidence_level: f64,
    opts: &EstimatorOptions,
) -> VolResult<ConfidenceBand> {
    let strategy = ScaleStrategy::resolve(method, kernel)?;
    validate_path(path)?;
    validate_sampling_rate(n)?;
    validate_power(p)?;

    let z = normal_quantile(confidence_level)?;
    let k_p = estimate_k(path, n, p).map_err(VolError::at_stage(Stage::HigherMomentConstant))?;
    let tau = scale_factor(path, n, strategy, opts)?;
    let mean = accumulate(path, n, p, tau)?;
    let var_term = accumulate(path, n, 2.0 * p, tau)?;

    let half_width = var_term.mapv(|v| z * k_p * v.sqrt());
    let lower = &mean - &half_width;
    let upper = &mean + &half_width;
    log::debug!(
        "confidence band: level = {confidence_level}, z = {z:.6}, K_p = {k_p:.6e}, \
         final half-width = {:.6e}",
        half_width[half_width.len() - 1]
    );
    Ok(ConfidenceBand { lower, upper, mean })
}
