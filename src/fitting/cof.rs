//! fitting::cof — change-of-frequency estimator of the smoothness `α`.
//!
//! Purpose
//! -------
//! Estimate the roughness index of a BSS path from the ratio of power
//! variations at two sampling frequencies. For a kernel behaving like
//! `x^α` near zero, increments over `k` steps scale like `k^{α+1/2}`, so
//!
//! ```text
//! mean|Y[i+2] - Y[i]|^p / mean|Y[i+1] - Y[i]|^p  →  2^{p(α + 1/2)}
//! ```
//!
//! and `α̂ = log2(ratio) / p - 1/2`. Volatility cancels in the ratio, which
//! makes the estimator usable before any scale factor is known.
//!
//! Conventions
//! -----------
//! - The estimate is not clamped; callers that need `α ∈ (-1/2, 1/2)` clamp
//!   themselves (the ACF fit clamps its start value, the COF strategy lets
//!   the asymptotic scale factor reject the value).
use crate::fitting::errors::{FitError, FitResult};

/// COF estimate of `α` with the default power `p = 2`.
///
/// # Errors
/// See [`cof_alpha_fit_with_power`].
pub fn cof_alpha_fit(path: &[f64]) -> FitResult<f64> {
    cof_alpha_fit_with_power(path, 2.0)
}

/// COF estimate of `α` with power `p`.
///
/// # Errors
/// - [`FitError::InvalidPower`] if `p` is not finite or `p <= 0`.
/// - [`FitError::InsufficientData`] if `path.len() < 3`.
/// - [`FitError::ZeroVariancePath`] if all one-step increments vanish.
/// - [`FitError::NonFiniteEstimate`] if the ratio is not finite or zero.
pub fn cof_alpha_fit_with_power(path: &[f64], p: f64) -> FitResult<f64> {
    if !p.is_finite() || p <= 0.0 {
        return Err(FitError::InvalidPower { p });
    }
    if path.len() < 3 {
        return Err(FitError::InsufficientData { len: path.len(), required: 3 });
    }
    let fine = power_variation_mean(path, 1, p);
    let coarse = power_variation_mean(path, 2, p);
    if fine == 0.0 {
        return Err(FitError::ZeroVariancePath);
    }
    let ratio = coarse / fine;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(FitError::NonFiniteEstimate {
            quantity: "COF power-variation ratio",
            value: ratio,
        });
    }
    Ok(ratio.log2() / p - 0.5)
}

/// `mean_i |Y[i+lag] - Y[i]|^p`.
fn power_variation_mean(path: &[f64], lag: usize, p: f64) -> f64 {
    let count = path.len() - lag;
    let total: f64 = path.iter().zip(&path[lag..]).map(|(a, b)| (b - a).abs().powf(p)).sum();
    total / count as f64
}
