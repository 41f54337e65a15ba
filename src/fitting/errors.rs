//! fitting::errors — failures of scale-factor and kernel-parameter fits.
//!
//! Purpose
//! -------
//! Collect every way a path-based estimator can fail: too few observations,
//! degenerate (constant) paths, bad tuning constants, non-finite
//! estimates, and errors bubbling up from the kernel and optimization
//! layers.
//!
//! Conventions
//! -----------
//! - Kernel and optimizer errors are wrapped, not flattened, so callers can
//!   still match on the underlying cause.
//! - `ZeroVariancePath` is kept distinct from the other data errors: a
//!   constant path is a legitimate input that simply carries no volatility
//!   information.

use crate::kernels::errors::KernelError;
use crate::optimization::errors::OptError;
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type FitResult<T> = Result<T, FitError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    // ---- Input ----
    /// Fewer observations than the estimator needs.
    InsufficientData { len: usize, required: usize },
    /// Increments (or levels, for the ACF) have zero variance.
    ZeroVariancePath,
    /// Lag count outside `1..=len - 1`.
    InvalidNumLags { num_lags: usize, len: usize },
    /// Power must be finite and strictly positive.
    InvalidPower { p: f64 },
    /// Sampling rate must be strictly positive.
    InvalidSamplingRate { n: usize },

    // ---- Output ----
    /// An intermediate or final estimate was `NaN` or infinite.
    NonFiniteEstimate { quantity: &'static str, value: f64 },

    // ---- Wrapped ----
    Kernel(KernelError),
    Optimization(OptError),
}

impl std::error::Error for FitError {}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::InsufficientData { len, required } => {
                write!(f, "Insufficient data: {len} observations, at least {required} required")
            }
            FitError::ZeroVariancePath => {
                write!(f, "Path has zero variance: increments are all zero")
            }
            FitError::InvalidNumLags { num_lags, len } => {
                write!(f, "Invalid number of lags {num_lags}: must satisfy 1 <= lags < {len}")
            }
            FitError::InvalidPower { p } => {
                write!(f, "Invalid power {p}: must be finite and > 0")
            }
            FitError::InvalidSamplingRate { n } => {
                write!(f, "Invalid sampling rate n = {n}: must be > 0")
            }
            FitError::NonFiniteEstimate { quantity, value } => {
                write!(f, "Non-finite {quantity}: {value}")
            }
            FitError::Kernel(err) => write!(f, "Kernel error: {err}"),
            FitError::Optimization(err) => write!(f, "Optimization error: {err}"),
        }
    }
}

impl From<KernelError> for FitError {
    fn from(err: KernelError) -> Self {
        FitError::Kernel(err)
    }
}

impl From<OptError> for FitError {
    fn from(err: OptError) -> Self {
        FitError::Optimization(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<FitError> for PyErr {
    fn from(err: FitError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Wrapped errors keep their cause and mention it in the message.
    //
    // Given
    // -----
    // - `KernelError::InvalidLambda { lambda: -1.0 }` and
    //   `OptError::MissingThetaHat` converted with `?`-style `From`.
    //
    // Expect
    // ------
    // - `FitError::Kernel(..)` / `FitError::Optimization(..)` whose messages
    //   contain the inner message.
    fn wrapped_errors_preserve_cause() {
        // Arrange
        let kernel_err = KernelError::InvalidLambda { lambda: -1.0 };
        let opt_err = OptError::MissingThetaHat;

        // Act
        let from_kernel = FitError::from(kernel_err.clone());
        let from_opt = FitError::from(opt_err.clone());

        // Assert
        assert_eq!(from_kernel, FitError::Kernel(kernel_err.clone()));
        assert!(from_kernel.to_string().contains(&kernel_err.to_string()));
        assert!(from_opt.to_string().contains(&opt_err.to_string()));
    }
}
