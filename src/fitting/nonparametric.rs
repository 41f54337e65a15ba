//! Non-parametric scale factor: root mean square of the increments.
use crate::fitting::errors::{FitError, FitResult};

/// `tau = sqrt(mean((Y[i+1] - Y[i])²))`.
///
/// Needs no kernel model; under a BSS model with unit-mean squared
/// volatility this is a consistent estimator of the increment scale.
///
/// # Errors
/// - [`FitError::InsufficientData`] if `path.len() < 2`.
/// - [`FitError::ZeroVariancePath`] if every increment is zero.
/// - [`FitError::NonFiniteEstimate`] if the sum of squares overflows.
pub fn tau_nonparametric(path: &[f64]) -> FitResult<f64> {
    if path.len() < 2 {
        return Err(FitError::InsufficientData { len: path.len(), required: 2 });
    }
    let count = (path.len() - 1) as f64;
    let mean_square = path.windows(2).map(|w| (w[1] - w[0]).powi(2)).sum::<f64>() / count;
    if !mean_square.is_finite() {
        return Err(FitError::NonFiniteEstimate {
            quantity: "mean squared increment",
            value: mean_square,
        });
    }
    if mean_square == 0.0 {
        return Err(FitError::ZeroVariancePath);
    }
    Ok(mean_square.sqrt())
}
