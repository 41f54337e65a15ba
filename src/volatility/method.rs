//! volatility::method — method and kernel selectors and their resolution.
//!
//! Purpose
//! -------
//! Parse the caller's `method` / `kernel` choice once, at the boundary, and
//! turn the pair into the single scale-factor strategy that will run.
//!
//! Key behaviors
//! -------------
//! - [`Method`] and [`Kernel`] parse case-insensitively from strings via
//!   `FromStr`; unknown names are errors, never a silent fallback.
//! - [`ScaleStrategy::resolve`] matches exhaustively on the pair.
//!   `(Cof, Power)` has no asymptotic formula and is rejected with
//!   [`VolError::UnsupportedCombination`].
//! - `NonParametric` ignores the kernel.
use crate::volatility::errors::{VolError, VolResult};
use std::str::FromStr;

/// How the scale factor `tau` is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// Change of frequency: fit `α` only, use the asymptotic formula.
    Cof,
    /// Least squares on the autocorrelation: fit all kernel parameters.
    Acf,
    /// Root mean square of the increments.
    #[default]
    NonParametric,
}

/// Parametric kernel family used by `Cof` and `Acf`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Kernel {
    #[default]
    Gamma,
    Power,
}

impl FromStr for Method {
    type Err = VolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cof" => Ok(Method::Cof),
            "acf" => Ok(Method::Acf),
            "nonparametric" => Ok(Method::NonParametric),
            _ => Err(VolError::UnknownMethod { name: s.to_string() }),
        }
    }
}

impl FromStr for Kernel {
    type Err = VolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gamma" => Ok(Kernel::Gamma),
            "power" => Ok(Kernel::Power),
            _ => Err(VolError::UnknownKernel { name: s.to_string() }),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Cof => "cof",
            Method::Acf => "acf",
            Method::NonParametric => "nonparametric",
        };
        f.write_str(name)
    }
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Kernel::Gamma => "gamma",
            Kernel::Power => "power",
        };
        f.write_str(name)
    }
}

/// The scale-factor procedure selected by a `(Method, Kernel)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleStrategy {
    CofGamma,
    AcfGamma,
    AcfPower,
    NonParametric,
}

impl ScaleStrategy {
    /// Map a selector pair to its strategy.
    ///
    /// # Errors
    /// - [`VolError::UnsupportedCombination`] for `(Cof, Power)`.
    pub fn resolve(method: Method, kernel: Kernel) -> VolResult<Self> {
        match (method, kernel) {
            (Method::Cof, Kernel::Gamma) => Ok(ScaleStrategy::CofGamma),
            (Method::Cof, Kernel::Power) => {
                Err(VolError::UnsupportedCombination { method, kernel })
            }
            (Method::Acf, Kernel::Gamma) => Ok(ScaleStrategy::AcfGamma),
            (Method::Acf, Kernel::Power) => Ok(ScaleStrategy::AcfPower),
            (Method::NonParametric, _) => Ok(ScaleStrategy::NonParametric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - String parsing of selectors, including case and whitespace.
    // - Rejection of unknown names (no silent fallback).
    // - The resolution table, including `(Cof, Power)`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Selectors parse regardless of case and surrounding whitespace.
    //
    // Given
    // -----
    // - "ACF", " cof ", "NonParametric", "Gamma", "power".
    //
    // Expect
    // ------
    // - The matching variants; `Display` gives back the lowercase name.
    fn selectors_parse_case_insensitively() {
        assert_eq!("ACF".parse::<Method>(), Ok(Method::Acf));
        assert_eq!(" cof ".parse::<Method>(), Ok(Method::Cof));
        assert_eq!("NonParametric".parse::<Method>(), Ok(Method::NonParametric));
        assert_eq!("Gamma".parse::<Kernel>(), Ok(Kernel::Gamma));
        assert_eq!("power".parse::<Kernel>(), Ok(Kernel::Power));
        assert_eq!(Method::NonParametric.to_string(), "nonparametric");
    }

    #[test]
    // Purpose
    // -------
    // Typos are reported instead of falling through to the non-parametric
    // method.
    //
    // Given
    // -----
    // - "acff" as a method and "matern" as a kernel.
    //
    // Expect
    // ------
    // - `UnknownMethod` / `UnknownKernel` carrying the raw string.
    fn unknown_selectors_are_errors() {
        assert_eq!(
            "acff".parse::<Method>(),
            Err(VolError::UnknownMethod { name: "acff".to_string() })
        );
        assert_eq!(
            "matern".parse::<Kernel>(),
            Err(VolError::UnknownKernel { name: "matern".to_string() })
        );
    }

    #[test]
    // Purpose
    // -------
    // Check every row of the resolution table.
    //
    // Given
    // -----
    // - All six `(Method, Kernel)` pairs.
    //
    // Expect
    // ------
    // - Three parametric strategies, non-parametric for both kernels, and
    //   `UnsupportedCombination` for `(Cof, Power)`.
    fn resolve_covers_every_pair() {
        assert_eq!(ScaleStrategy::resolve(Method::Cof, Kernel::Gamma), Ok(ScaleStrategy::CofGamma));
        assert_eq!(ScaleStrategy::resolve(Method::Acf, Kernel::Gamma), Ok(ScaleStrategy::AcfGamma));
        assert_eq!(ScaleStrategy::resolve(Method::Acf, Kernel::Power), Ok(ScaleStrategy::AcfPower));
        for kernel in [Kernel::Gamma, Kernel::Power] {
            assert_eq!(
                ScaleStrategy::resolve(Method::NonParametric, kernel),
                Ok(ScaleStrategy::NonParametric)
            );
        }
        assert_eq!(
            ScaleStrategy::resolve(Method::Cof, Kernel::Power),
            Err(VolError::UnsupportedCombination { method: Method::Cof, kernel: Kernel::Power })
        );
    }
}
