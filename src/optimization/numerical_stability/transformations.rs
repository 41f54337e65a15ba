//! Numerical stability utilities.
//!
//! Provides safe implementations of the nonlinear maps used to move kernel
//! parameters between unconstrained optimizer space and their admissible
//! ranges. The guards follow the usual strategy of common ML libraries:
//! explicit cutoffs (`|x| > 20.0`) keep `f64` arithmetic well conditioned.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: clamp applied to probabilities before [`safe_logit`].
//! - [`safe_softplus(x)`]: `ln(1 + exp(x))`, ℝ → (0, ∞).
//! - [`safe_softplus_inv(x)`]: its inverse, (0, ∞) → ℝ.
//! - [`safe_logistic(x)`]: `1 / (1 + exp(-x))`, ℝ → (0, 1).
//! - [`safe_logit(p)`]: its inverse, (0, 1) → ℝ.

/// Probabilities are clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` before the
/// logit so that boundary start values still map to finite `θ`.
pub const LOGIT_EPS: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For `x > 20`, `softplus(x) ≈ x`.
/// - Otherwise `ln1p(exp(x))`, which is accurate for very negative `x`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: `t = ln(exp(x) - 1)`.
///
/// - For `x > 20`, `t ≈ x`.
/// - Otherwise `ln(expm1(x))`.
///
/// `x` must be finite and `> 0`; the caller validates this.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic sigmoid `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluates `exp` only on non-positive arguments so neither branch
/// overflows.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse of [`safe_logistic`]: `logit(p) = ln(p / (1 - p))`.
///
/// `p` is clamped into `[LOGIT_EPS, 1 - LOGIT_EPS]` first.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}
