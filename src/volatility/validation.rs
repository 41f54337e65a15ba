//! volatility::validation — precondition checks run before any estimation.
//!
//! Purpose
//! -------
//! Reject malformed inputs with a typed [`VolError`] before the scale-factor
//! collaborators see them, so a `NaN` never reaches a division.
//!
//! Invariants & assumptions
//! ------------------------
//! - A path needs at least two observations for one increment.
//! - Every observation must be finite.
//! - `n >= 1`; `p` finite and `> 0`; confidence level finite in `[0, 1)`.
//!   A level of exactly `0` is admitted and yields a zero-width band.

use crate::volatility::errors::{VolError, VolResult};

/// Check the path length and finiteness of every observation.
///
/// # Errors
/// - [`VolError::InsufficientData`] if `path.len() < 2`.
/// - [`VolError::NonFiniteData`] with the index of the first bad value.
pub fn validate_path(path: &[f64]) -> VolResult<()> {
    if path.len() < 2 {
        return Err(VolError::InsufficientData { len: path.len() });
    }
    if let Some((index, &value)) = path.iter().enumerate().find(|(_, y)| !y.is_finite()) {
        return Err(VolError::NonFiniteData { index, value });
    }
    Ok(())
}

pub fn validate_sampling_rate(n: usize) -> VolResult<()> {
    if n == 0 {
        return Err(VolError::InvalidSamplingRate { n });
    }
    Ok(())
}

pub fn validate_power(p: f64) -> VolResult<()> {
    if !p.is_finite() || p <= 0.0 {
        return Err(VolError::InvalidPower { p });
    }
    Ok(())
}

pub fn validate_confidence_level(level: f64) -> VolResult<()> {
    if !level.is_finite() || !(0.0..1.0).contains(&level) {
        return Err(VolError::InvalidConfidenceLevel { level });
    }
    Ok(())
}

pub fn validate_scale_factor(tau: f64) -> VolResult<()> {
    if !tau.is_finite() || tau <= 0.0 {
        return Err(VolError::InvalidScaleFactor { tau });
    }
    Ok(())
}
