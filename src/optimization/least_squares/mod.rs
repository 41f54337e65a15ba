//! least_squares — argmin-powered minimizer for curve-fitting objectives.
//!
//! Purpose
//! -------
//! Provide a small, Argmin-backed optimization layer for **minimizing**
//! scalar objectives `c(θ)`, in practice sums of squared residuals between
//! an empirical statistic and a parametric model. Callers implement
//! [`Objective`] and invoke [`minimize`] to run L-BFGS with a configurable
//! line search, tolerances, and finite-difference gradients.
//!
//! Key behaviors
//! -------------
//! - Expose [`Objective`] values to Argmin unchanged via
//!   [`adapter::ArgMinAdapter`], with central/forward finite differences
//!   when no analytic gradient is supplied.
//! - [`minimize`] validates `θ₀` through [`Objective::check`], selects a
//!   solver via [`builders`] based on [`LineSearcher`], executes it via
//!   [`run::run_lbfgs`], and normalizes results into a [`FitOutcome`].
//! - Centralize configuration ([`Tolerances`], [`FitOptions`]) and checks
//!   ([`validation`]) so that solver code can assume finite inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters live in an unconstrained space; constrained model
//!   parameters are produced by the caller through the transforms in
//!   `numerical_stability`.
//! - Objectives report domain problems as [`OptError`](crate::optimization::errors::OptError)
//!   values, never panics.
//!
//! Testing notes
//! -------------
//! - Submodule tests cover cost pass-through and finite differences
//!   ([`adapter`]), solver construction ([`builders`]), configuration rules
//!   ([`traits`]), and a small exponential-decay regression ([`api`]).
//! - The kernel fitting routines in `fitting::acf` exercise [`minimize`]
//!   end to end.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{FitOptions, FitOutcome, LineSearcher, Objective, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{FitOptions, FitOutcome, LineSearcher, Objective, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
