//! fitting — path-based estimators feeding the volatility layer.
//!
//! Purpose
//! -------
//! Turn an observed path into the scalars the accumulated-volatility
//! estimators need: the smoothness `α` (change of frequency), kernel
//! parameters (autocorrelation matching), the non-parametric scale factor,
//! and the band constant `K_p`.
//!
//! Key behaviors
//! -------------
//! - [`cof`]: `α̂` from the ratio of power variations at lags 2 and 1.
//! - [`acf`]: sample ACF and least-squares fits of gamma / power kernels.
//! - [`nonparametric`]: `tau = sqrt(mean((ΔY)²))`.
//! - [`higher_moment`]: `K_p` from the increments' autocorrelation.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite; the volatility layer validates data before calling
//!   in. Each function still checks lengths and degeneracy on its own.
//! - Constant paths are reported as [`errors::FitError::ZeroVariancePath`].
//!
//! Downstream usage
//! ----------------
//! - `volatility::accumulated` selects one of `cof`, `acf` or
//!   `nonparametric` per scale strategy.
//! - `volatility::confidence` calls [`higher_moment::estimate_k`].

pub mod acf;
pub mod cof;
pub mod errors;
pub mod higher_moment;
pub mod nonparametric;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::acf::{AcfFit, AcfFitOptions, empirical_acf, fit_gamma_kernel, fit_power_kernel};
pub use self::cof::{cof_alpha_fit, cof_alpha_fit_with_power};
pub use self::errors::{FitError, FitResult};
pub use self::higher_moment::estimate_k;
pub use self::nonparametric::tau_nonparametric;
