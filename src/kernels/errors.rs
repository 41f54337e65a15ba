//! kernels::errors — parameter and evaluation failures of BSS kernels.
//!
//! Every kernel constructor and evaluation returns [`KernelResult<T>`].
//! Messages are phrased as the violated domain constraint
//! ("alpha must lie in (-1/2, ∞)") so they can be forwarded verbatim to
//! Python callers.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type KernelResult<T> = Result<T, KernelError>;

/// KernelError: invalid kernel parameters or non-finite kernel quantities.
///
/// Variants
/// --------
/// - `InvalidAlpha { alpha, reason }`: smoothness outside its admissible range
///   (`α > -1/2`, or `α ∈ (-1/2, 1/2)` for the asymptotic scale factor).
/// - `InvalidLambda { lambda }`: gamma-kernel decay rate not finite and `> 0`.
/// - `InvalidBeta { beta }`: power-kernel tail exponent not finite and `> 1/2`.
/// - `InvalidSamplingRate { n }`: `n == 0`.
/// - `InvalidLag { lag }`: negative or non-finite lag.
/// - `NonFiniteResult { quantity, value }`: a closed form or quadrature
///   produced `NaN`/`∞`; `quantity` names what was being computed.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    InvalidAlpha { alpha: f64, reason: &'static str },
    InvalidLambda { lambda: f64 },
    InvalidBeta { beta: f64 },
    InvalidSamplingRate { n: usize },
    InvalidLag { lag: f64 },
    NonFiniteResult { quantity: &'static str, value: f64 },
}

impl std::error::Error for KernelError {}

impl std::fmt::Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::InvalidAlpha { alpha, reason } => {
                write!(f, "Invalid alpha {alpha}: {reason}")
            }
            KernelError::InvalidLambda { lambda } => {
                write!(f, "Invalid lambda {lambda}: must be finite and > 0")
            }
            KernelError::InvalidBeta { beta } => {
                write!(f, "Invalid beta {beta}: must be finite and > 1/2")
            }
            KernelError::InvalidSamplingRate { n } => {
                write!(f, "Invalid sampling rate n = {n}: must be > 0")
            }
            KernelError::InvalidLag { lag } => {
                write!(f, "Invalid lag {lag}: must be finite and >= 0")
            }
            KernelError::NonFiniteResult { quantity, value } => {
                write!(f, "Non-finite {quantity}: {value}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<KernelError> for PyErr {
    fn from(err: KernelError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
