//! fitting::higher_moment — constant `K_p` of the confidence band.
//!
//! Purpose
//! -------
//! The power-`p` accumulated volatility estimate is a normalized sum of
//! `|ΔY|^p`. Its asymptotic variance involves the long-run variance of
//! `|ΔY_i / τ|^p`, which depends on the correlation of neighbouring
//! increments. For standard normals `X`, `Y` with correlation `r`,
//!
//! ```text
//! Cov(|X|^p, |Y|^p) = m_p² (₂F₁(-p/2, -p/2; 1/2; r²) - 1),
//! ```
//!
//! so the long-run variance is
//!
//! ```text
//! λ_p = m_{2p} - m_p² + 2 Σ_{k=1}^{L} m_p² (₂F₁(-p/2, -p/2; 1/2; r̂(k)²) - 1),
//! ```
//!
//! where `r̂(k)` is the sample autocorrelation of the increments and
//! `L = ⌊N^{1/3}⌋` (at least 1). The band constant is
//! `K_p = sqrt(λ_p / n) / m_p`, such that `K_p² · V_{2p}` is the variance of
//! the power-`p` estimate, `V_{2p}` being the power-`2p` estimate.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every covariance term is non-negative (the hypergeometric series has
//!   non-negative coefficients), hence `λ_p >= m_{2p} - m_p² > 0`.
//! - A path with fewer than two distinct increments carries no serial
//!   information; `λ_p` is then `m_{2p} - m_p²`.
use crate::fitting::{
    acf::empirical_acf,
    errors::{FitError, FitResult},
};
use crate::numerics::{abs_normal_cross_moment, abs_normal_moment};

/// Estimate `K_p` from the observed path at sampling rate `n`.
///
/// When the increment autocorrelation cannot be estimated (a single
/// increment, or increments that are all equal) the serial terms are
/// dropped and `λ_p = m_{2p} - m_p²`, the independent-increment value.
///
/// # Errors
/// - [`FitError::InvalidPower`] if `p` is not finite or `p <= 0`.
/// - [`FitError::InvalidSamplingRate`] if `n == 0`.
/// - [`FitError::InsufficientData`] if `path.len() < 2`.
/// - [`FitError::NonFiniteEstimate`] if the increment variance, `λ_p` or
///   `K_p` is not finite.
pub fn estimate_k(path: &[f64], n: usize, p: f64) -> FitResult<f64> {
    if !p.is_finite() || p <= 0.0 {
        return Err(FitError::InvalidPower { p });
    }
    if n == 0 {
        return Err(FitError::InvalidSamplingRate { n });
    }
    if path.len() < 2 {
        return Err(FitError::InsufficientData { len: path.len(), required: 2 });
    }
    let increments: Vec<f64> = path.windows(2).map(|w| w[1] - w[0]).collect();

    let mp = abs_normal_moment(p);
    let mp2 = mp * mp;
    let (serial, num_lags) = if increments.iter().all(|&d| d == increments[0]) {
        log::debug!(
            "estimate_k: increment ACF undefined for {} equal increment(s); no serial terms",
            increments.len()
        );
        (0.0, 0)
    } else {
        let num_lags = truncation_lag(path.len()).min(increments.len() - 1);
        let acf = empirical_acf(&increments, num_lags)?;
        let serial: f64 = acf.iter().map(|&r| abs_normal_cross_moment(p, r) - mp2).sum();
        (serial, num_lags)
    };
    let lambda_p = abs_normal_moment(2.0 * p) - mp2 + 2.0 * serial;
    if !lambda_p.is_finite() || lambda_p <= 0.0 {
        return Err(FitError::NonFiniteEstimate { quantity: "long-run variance", value: lambda_p });
    }
    let k = (lambda_p / n as f64).sqrt() / mp;
    if !k.is_finite() {
        return Err(FitError::NonFiniteEstimate { quantity: "K_p", value: k });
    }
    log::debug!("estimate_k: p = {p}, lags = {num_lags}, lambda_p = {lambda_p:.6}, K_p = {k:.6e}");
    Ok(k)
}

/// `⌊N^{1/3}⌋`, at least 1.
fn truncation_lag(len: usize) -> usize {
    ((len as f64).cbrt().floor() as usize).max(1)
}
