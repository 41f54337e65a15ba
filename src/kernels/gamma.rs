//! kernels::gamma — gamma kernel `g(x) = x^α e^{-λx}`.
//!
//! Purpose
//! -------
//! Closed-form second-order structure of the Gaussian core driven by the
//! gamma kernel, plus the small-lag asymptotic scale factor used by the
//! change-of-frequency strategy.
//!
//! Key behaviors
//! -------------
//! - [`GammaKernel::autocorrelation`]: the Matérn correlation
//!   `ρ(h) = 2^{1/2-α} / Γ(α+1/2) · (λh)^{α+1/2} K_{α+1/2}(λh)`.
//! - [`GammaKernel::variance`]: `Γ(2α+1) / (2λ)^{2α+1}`.
//! - [`GammaKernel::tau`]: `sqrt(2 Var (1 - ρ(1/n)))`.
//! - [`gamma_kernel_tau_asymptotic`]: leading-order term of `tau` as
//!   `n → ∞`, which does not depend on `λ`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `α > -1/2` and `λ > 0` are enforced by [`GammaKernel::new`].
//! - The asymptotic formula needs `α ∈ (-1/2, 1/2)` (the rough regime);
//!   outside it the increments are dominated by the smooth part and the
//!   expansion does not hold.
//!
//! Testing notes
//! -------------
//! - Closed forms are checked against direct quadrature of the kernel
//!   integrals, against the exponential case `α = 0`, and the asymptotic
//!   factor against the exact `tau` at large `n`.
use crate::kernels::{
    BssKernel,
    errors::{KernelError, KernelResult},
    validation::{check_finite, validate_lag, validate_sampling_rate},
};
use crate::numerics::bessel_k;
use statrs::function::gamma::{gamma, ln_gamma};
use std::f64::consts::{LN_2, PI};

/// Gamma kernel `g(x) = x^α e^{-λx}` with `α > -1/2`, `λ > 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GammaKernel {
    alpha: f64,
    lambda: f64,
}

impl GammaKernel {
    /// Validate and build a gamma kernel.
    ///
    /// # Errors
    /// - [`KernelError::InvalidAlpha`] if `α` is not finite or `α <= -1/2`.
    /// - [`KernelError::InvalidLambda`] if `λ` is not finite or `λ <= 0`.
    pub fn new(alpha: f64, lambda: f64) -> KernelResult<Self> {
        if !alpha.is_finite() || alpha <= -0.5 {
            return Err(KernelError::InvalidAlpha {
                alpha,
                reason: "alpha must be finite and > -1/2",
            });
        }
        if !lambda.is_finite() || lambda <= 0.0 {
            return Err(KernelError::InvalidLambda { lambda });
        }
        Ok(Self { alpha, lambda })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Stationary variance of the Gaussian core, `Γ(2α+1) / (2λ)^{2α+1}`.
    pub fn variance(&self) -> KernelResult<f64> {
        let a2 = 2.0 * self.alpha + 1.0;
        let var = (ln_gamma(a2) - a2 * (2.0 * self.lambda).ln()).exp();
        check_finite("gamma kernel variance", var)
    }
}

impl BssKernel for GammaKernel {
    fn autocorrelation(&self, h: f64) -> KernelResult<f64> {
        validate_lag(h)?;
        if h == 0.0 {
            return Ok(1.0);
        }
        let nu = self.alpha + 0.5;
        let z = self.lambda * h;
        let k = bessel_k(nu, z);
        // z → 0 overflows K_ν while the product tends to 1.
        if k.is_infinite() {
            return Ok(1.0);
        }
        let log_prefactor = (1.0 - nu) * LN_2 - ln_gamma(nu) + nu * z.ln();
        let rho = (log_prefactor.exp() * k).min(1.0);
        check_finite("gamma kernel autocorrelation", rho)
    }

    fn tau(&self, n: usize) -> KernelResult<f64> {
        validate_sampling_rate(n)?;
        let rho = self.autocorrelation(1.0 / n as f64)?;
        let tau = (2.0 * self.variance()? * (1.0 - rho)).max(0.0).sqrt();
        check_finite("gamma kernel tau", tau)
    }
}

/// Small-lag asymptotic scale factor of the gamma kernel.
///
/// `sqrt(Γ(α+1)² / (Γ(2α+2) sin(π(α+1/2)))) · n^{-(α+1/2)}`.
///
/// # Errors
/// - [`KernelError::InvalidAlpha`] unless `α ∈ (-1/2, 1/2)`.
/// - [`KernelError::InvalidSamplingRate`] if `n == 0`.
pub fn gamma_kernel_tau_asymptotic(n: usize, alpha: f64) -> KernelResult<f64> {
    if !alpha.is_finite() || alpha <= -0.5 || alpha >= 0.5 {
        return Err(KernelError::InvalidAlpha {
            alpha,
            reason: "asymptotic scale factor requires alpha in (-1/2, 1/2)",
        });
    }
    validate_sampling_rate(n)?;
    let g1 = gamma(alpha + 1.0);
    let constant = g1 * g1 / (gamma(2.0 * alpha + 2.0) * (PI * (alpha + 0.5)).sin());
    let tau = constant.sqrt() * (n as f64).powf(-(alpha + 0.5));
    check_finite("asymptotic gamma kernel tau", tau)
}
