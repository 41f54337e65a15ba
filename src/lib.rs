//! bss_volatility — accumulated volatility of Brownian semistationary paths.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the estimators to Python via the `_bss_volatility` extension
//! module. When the `python-bindings` feature is enabled, this module
//! defines the Python-facing functions of the `bss_volatility` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the estimator layer ([`volatility`]) together with the
//!   collaborators it is built on: kernel formulas ([`kernels`]), path-based
//!   fits ([`fitting`]), the least-squares optimizer ([`optimization`]) and
//!   scalar numerics ([`numerics`]).
//! - Define the `#[pyfunction]` wrappers and the `#[pymodule]` initializer
//!   for `_bss_volatility`.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue and error mapping.
//! - Strings from Python are parsed into closed enums once, here; unknown
//!   names raise `ValueError` instead of falling back to a default method.
//!
//! Conventions
//! -----------
//! - Layering is `volatility` → {`fitting`, `kernels`} → {`optimization`,
//!   `numerics`}; lower layers never depend on higher ones.
//! - Each layer has its own error enum; `volatility::VolError` names the
//!   failing stage and is what Python callers see as `ValueError`.
//! - Diagnostics go through the `log` facade (`debug!` for fitted
//!   parameters and scale factors, `warn!` for non-converged fits). No
//!   logger is installed by the library.
//!
//! Downstream usage
//! ----------------
//! - Rust: `use bss_volatility::volatility::prelude::*;` then
//!   `estimate(&path, n, 2.0, Method::Acf, Kernel::Gamma)?`.
//! - Python: `_bss_volatility.volatility.estimate_accumulated_volatility`
//!   and `estimate_accumulated_volatility_ci`, usually wrapped by the
//!   pure-Python `bss_volatility` package.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each module; `tests/` holds end-to-end runs of
//!   the public estimators on simulated paths.

pub mod fitting;
pub mod kernels;
pub mod numerics;
pub mod optimization;
pub mod utils;
pub mod volatility;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    utils::{extract_f64_array, parse_selectors},
    volatility::{estimate, estimate_ci},
};

/// estimate_accumulated_volatility: accumulated power volatility from Python.
///
/// Parameters
/// ----------
/// - `data`: 1-D array-like of finite `float64` observations, length >= 2.
/// - `n`: observations per unit time, `> 0`.
/// - `p`: power, finite and `> 0` (default `2.0`).
/// - `method`: `"acf"`, `"cof"` or `"nonparametric"` (default).
/// - `kernel`: `"gamma"` (default) or `"power"`.
///
/// Returns
/// -------
/// `numpy.ndarray` of length `len(data) - 1`, non-decreasing.
///
/// Errors
/// ------
/// - `ValueError` for unknown selectors, the `("cof", "power")` pair,
///   invalid data, or a failed estimation stage.
/// - `TypeError` if `data` cannot be read as a float64 vector.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, n, p = 2.0, method = "nonparametric", kernel = "gamma"),
    text_signature = "(data, n, /, p=2.0, method='nonparametric', kernel='gamma')"
)]
pub fn estimate_accumulated_volatility<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, n: usize, p: f64, method: &str, kernel: &str,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let (method, kernel) = parse_selectors(method, kernel)?;
    let arr: PyReadonlyArray1<f64> = extract_f64_array(py, data)?;
    let path: &[f64] = arr.as_slice()?;
    let values = estimate(path, n, p, method, kernel)?;
    Ok(values.into_pyarray(py))
}

/// estimate_accumulated_volatility_ci: pointwise confidence band from Python.
///
/// Parameters
/// ----------
/// - `data`, `n`, `p`, `method`, `kernel`: as in
///   `estimate_accumulated_volatility`. The selectors are validated but the
///   band is always built from the non-parametric estimates.
/// - `confidence_level`: two-sided level in `[0, 1)`.
///
/// Returns
/// -------
/// `(lower, upper)`: two `numpy.ndarray`s of length `len(data) - 1`.
///
/// Errors
/// ------
/// - `ValueError` as for `estimate_accumulated_volatility`, plus invalid
///   confidence levels and failures of the `K_p` estimate.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (data, n, confidence_level, p = 2.0, method = "nonparametric", kernel = "gamma"),
    text_signature = "(data, n, confidence_level, /, p=2.0, method='nonparametric', kernel='gamma')"
)]
pub fn estimate_accumulated_volatility_ci<'py>(
    py: Python<'py>, data: &Bound<'py, PyAny>, n: usize, confidence_level: f64, p: f64,
    method: &str, kernel: &str,
) -> PyResult<(Bound<'py, PyArray1<f64>>, Bound<'py, PyArray1<f64>>)> {
    let (method, kernel) = parse_selectors(method, kernel)?;
    let arr: PyReadonlyArray1<f64> = extract_f64_array(py, data)?;
    let path: &[f64] = arr.as_slice()?;
    let band = estimate_ci(path, n, p, method, kernel, confidence_level)?;
    Ok((band.lower.into_pyarray(py), band.upper.into_pyarray(py)))
}

/// _bss_volatility: PyO3 module initializer for the Python extension.
///
/// Creates the `volatility` submodule, attaches it to `_bss_volatility`, and
/// registers it in `sys.modules` so that `bss_volatility.volatility` is
/// importable with dot notation.
///
/// Errors
/// ------
/// - `PyErr` if creating the submodule or updating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _bss_volatility<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let volatility_mod = PyModule::new(_py, "volatility")?;
    volatility(_py, m, &volatility_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("bss_volatility.volatility", volatility_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn volatility<'py>(
    _py: Python, bss_volatility: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(estimate_accumulated_volatility, m)?)?;
    m.add_function(wrap_pyfunction!(estimate_accumulated_volatility_ci, m)?)?;
    bss_volatility.add_submodule(m)?;
    Ok(())
}
