//! volatility — accumulated power volatility of BSS paths and its confidence band.
//!
//! Purpose
//! -------
//! Public entry points of the crate. Given one observed path `Y` sampled `n`
//! times per unit time, estimate `∫_0^t σ_s^p ds` on the sampling grid and
//! wrap it in a pointwise normal band.
//!
//! Key behaviors
//! -------------
//! - [`estimate`] / [`estimate_with_options`]: normalized running sum of
//!   `|ΔY|^p` with a scale factor chosen by `(Method, Kernel)`.
//! - [`estimate_ci`]: band built from the non-parametric estimates at `p`
//!   and `2p`; [`estimate_ci_with_method`] forwards the caller's selectors.
//! - [`accumulate`]: the pure core for a caller-supplied scale factor.
//!
//! Invariants & assumptions
//! ------------------------
//! - Selectors are closed enums; `(Cof, Power)` is rejected by
//!   [`ScaleStrategy::resolve`] before any data is read.
//! - Inputs are validated by [`validation`] before any collaborator runs.
//! - Outputs have length `len(Y) - 1`; estimates are non-negative and
//!   non-decreasing.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use the functions re-exported here or `prelude::*`.
//! - The Python bindings parse strings into [`Method`] / [`Kernel`] and call
//!   [`estimate`] and [`estimate_ci`].

pub mod accumulated;
pub mod confidence;
pub mod errors;
pub mod method;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::accumulated::{
    EstimatorOptions, accumulate, estimate, estimate_with_options, moment_constant, scale_factor,
};
pub use self::confidence::{ConfidenceBand, estimate_ci, estimate_ci_with_method, normal_quantile};
pub use self::errors::{Stage, VolError, VolResult};
pub use self::method::{Kernel, Method, ScaleStrategy};

pub mod prelude {
    pub use super::accumulated::{EstimatorOptions, estimate, estimate_with_options};
    pub use super::confidence::{ConfidenceBand, estimate_ci, estimate_ci_with_method};
    pub use super::errors::{Stage, VolError, VolResult};
    pub use super::method::{Kernel, Method};
}
