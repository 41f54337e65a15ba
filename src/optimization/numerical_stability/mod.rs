//! numerical_stability — overflow-safe parameter transforms.
//!
//! Purpose
//! -------
//! Map unconstrained optimizer coordinates onto admissible kernel
//! parameters and back:
//! - `α = -1/2 + logistic(θ)` keeps a smoothness parameter inside
//!   `(-1/2, 1/2)`,
//! - `λ = softplus(θ)` and `β = 1/2 + softplus(θ)` keep decay parameters
//!   positive (or above 1/2).
//!
//! Conventions
//! -----------
//! - Pure scalar functions on `f64`; no I/O, no allocation.
//! - Inputs are assumed finite; range checks on the model side are done by
//!   the kernel constructors.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    LOGIT_EPS, safe_logistic, safe_logit, safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{safe_logistic, safe_logit, safe_softplus, safe_softplus_inv};
}
