//! numerics — quadrature and special functions for kernel evaluations.
//!
//! Purpose
//! -------
//! Supply the scalar numerics that kernel formulas need beyond what
//! `statrs` provides: double-exponential quadrature for autocovariance
//! integrals with endpoint singularities and heavy tails, the modified
//! Bessel function `K_ν`, the hypergeometric series `₂F₁`, and absolute
//! moments of Gaussian variables.
//!
//! Conventions
//! -----------
//! - Functions return plain `f64`; invalid arguments yield `NaN`/`∞`
//!   rather than errors. Callers (the kernel layer) check finiteness and
//!   convert failures into `KernelError::NonFiniteResult`.
//! - No allocation, no logging.

pub mod quadrature;
pub mod special;

pub use self::quadrature::{DEFAULT_STEP, exp_sinh, tanh_sinh};
pub use self::special::{abs_normal_cross_moment, abs_normal_moment, bessel_k, hyp2f1};
