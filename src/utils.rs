//! utils — conversion helpers shared by the PyO3 bindings.
//!
//! Everything here is gated behind `python-bindings`: array extraction from
//! NumPy / pandas / sequences, and parsing of the string selectors.

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::volatility::{Kernel, Method};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Borrow a contiguous `f64` view of `raw_data`, copying only when needed.
///
/// Accepts a 1-D `numpy.ndarray`, anything with a `to_numpy()` method
/// (pandas `Series`), or a Python sequence of floats.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Parse the `method` / `kernel` strings passed from Python.
///
/// Unknown names raise `ValueError` through `From<VolError> for PyErr`.
#[cfg(feature = "python-bindings")]
pub fn parse_selectors(method: &str, kernel: &str) -> PyResult<(Method, Kernel)> {
    let method: Method = method.parse()?;
    let kernel: Kernel = kernel.parse()?;
    Ok((method, kernel))
}
