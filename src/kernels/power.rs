//! kernels::power — power kernel `g(x) = x^α (1+x)^{-β-α}`.
//!
//! No closed form is available for the correlation structure, so both
//! `ρ(h)` and `tau(n)` are evaluated by double-exponential quadrature:
//!
//! - `ρ(h) = ∫₀^∞ g(x) g(x+h) dx / ∫₀^∞ g(x)² dx`, split at `x = h`
//!   (tanh–sinh below, exp–sinh above with scale `h`);
//! - `tau(n)² = ∫₀^∞ (g(x+Δ) - g(x))² dx + ∫₀^Δ g(x)² dx`, `Δ = 1/n`,
//!   split the same way at `x = Δ`.
//!
//! The normalizing integral `∫₀^∞ g²` is computed once in [`PowerKernel::new`].
//! `ρ` uses a coarser step than `tau` since it is evaluated many times
//! inside the least-squares fit.
use crate::kernels::{
    BssKernel,
    errors::{KernelError, KernelResult},
    validation::{check_finite, validate_lag, validate_sampling_rate},
};
use crate::numerics::{DEFAULT_STEP, exp_sinh, tanh_sinh};

const AUTOCORRELATION_STEP: f64 = 1.0 / 32.0;

/// Power kernel with `α > -1/2` (local roughness) and `β > 1/2` (tail decay).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerKernel {
    alpha: f64,
    beta: f64,
    variance: f64,
}

impl PowerKernel {
    /// Validate parameters and precompute `∫₀^∞ g(x)² dx`.
    ///
    /// # Errors
    /// - [`KernelError::InvalidAlpha`] if `α` is not finite or `α <= -1/2`.
    /// - [`KernelError::InvalidBeta`] if `β` is not finite or `β <= 1/2`.
    /// - [`KernelError::NonFiniteResult`] if the variance integral fails.
    pub fn new(alpha: f64, beta: f64) -> KernelResult<Self> {
        if !alpha.is_finite() || alpha <= -0.5 {
            return Err(KernelError::InvalidAlpha {
                alpha,
                reason: "alpha must be finite and > -1/2",
            });
        }
        if !beta.is_finite() || beta <= 0.5 {
            return Err(KernelError::InvalidBeta { beta });
        }
        let g2 = |x: f64| {
            let g = kernel(alpha, beta, x);
            g * g
        };
        let variance = tanh_sinh(g2, 0.0, 1.0, AUTOCORRELATION_STEP)
            + exp_sinh(g2, 1.0, 1.0, AUTOCORRELATION_STEP);
        let variance = check_finite("power kernel variance", variance)?;
        Ok(Self { alpha, beta, variance })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// `∫₀^∞ g(x)² dx`, the stationary variance of the Gaussian core.
    pub fn variance(&self) -> f64 {
        self.variance
    }

    fn g(&self, x: f64) -> f64 {
        kernel(self.alpha, self.beta, x)
    }
}

fn kernel(alpha: f64, beta: f64, x: f64) -> f64 {
    x.powf(alpha) * (1.0 + x).powf(-beta - alpha)
}

impl BssKernel for PowerKernel {
    fn autocorrelation(&self, h: f64) -> KernelResult<f64> {
        validate_lag(h)?;
        if h == 0.0 {
            return Ok(1.0);
        }
        let cross = |x: f64| self.g(x) * self.g(x + h);
        let num = tanh_sinh(cross, 0.0, h, AUTOCORRELATION_STEP)
            + exp_sinh(cross, h, h, AUTOCORRELATION_STEP);
        check_finite("power kernel autocorrelation", (num / self.variance).min(1.0))
    }

    fn tau(&self, n: usize) -> KernelResult<f64> {
        validate_sampling_rate(n)?;
        let delta = 1.0 / n as f64;
        let diff2 = |x: f64| {
            let d = self.g(x + delta) - self.g(x);
            d * d
        };
        let head = |x: f64| {
            let g = self.g(x);
            g * g
        };
        let tau2 = tanh_sinh(diff2, 0.0, delta, DEFAULT_STEP)
            + exp_sinh(diff2, delta, delta, DEFAULT_STEP)
            + tanh_sinh(head, 0.0, delta, DEFAULT_STEP);
        check_finite("power kernel tau", tau2.max(0.0).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parameter validation.
    // - The closed-form case `α = 0`, `β = 1`, where `g(x) = 1/(1+x)`.
    // - Consistency `tau² = 2 Var (1 - ρ(Δ))` between the two quadrature
    //   routes for rough and smooth parameter choices.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Reject parameters outside the admissible region.
    //
    // Given
    // -----
    // - `β = 0.5` and `α = -0.7`.
    //
    // Expect
    // ------
    // - `InvalidBeta` and `InvalidAlpha`.
    fn constructor_rejects_inadmissible_parameters() {
        assert_eq!(PowerKernel::new(0.0, 0.5), Err(KernelError::InvalidBeta { beta: 0.5 }));
        assert!(matches!(PowerKernel::new(-0.7, 1.0), Err(KernelError::InvalidAlpha { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify against closed forms when `g(x) = 1/(1+x)`.
    //
    // Given
    // -----
    // - `α = 0`, `β = 1`, `h = 0.5`, `n = 100`.
    //
    // Expect
    // ------
    // - `Var = 1`, `ρ(h) = ln(1+h)/h`, `tau² = 2 - 2 ln(1+Δ)/Δ`.
    fn harmonic_case_matches_closed_forms() {
        // Arrange
        let kernel = PowerKernel::new(0.0, 1.0).expect("valid kernel");
        let delta: f64 = 0.01;

        // Act
        let rho = kernel.autocorrelation(0.5).expect("finite rho");
        let tau = kernel.tau(100).expect("finite tau");

        // Assert
        assert_relative_eq!(kernel.variance(), 1.0, max_relative = 1e-10);
        assert_relative_eq!(rho, 1.5_f64.ln() / 0.5, max_relative = 1e-10);
        assert_relative_eq!(
            tau * tau,
            2.0 - 2.0 * (1.0 + delta).ln() / delta,
            max_relative = 1e-8
        );
    }

    #[test]
    // Purpose
    // -------
    // Cross-check `tau` with the stationary identity
    // `E[(G(t+Δ) - G(t))²] = 2 Var (1 - ρ(Δ))`.
    //
    // Given
    // -----
    // - `(α, β) ∈ {(-0.2, 1.5), (0.3, 0.8), (-0.4, 2.0)}`, `n = 100`.
    //
    // Expect
    // ------
    // - Relative agreement to 1e-8.
    fn tau_agrees_with_variance_and_autocorrelation() {
        for (alpha, beta) in [(-0.2, 1.5), (0.3, 0.8), (-0.4, 2.0)] {
            // Arrange
            let kernel = PowerKernel::new(alpha, beta).expect("valid kernel");

            // Act
            let tau = kernel.tau(100).expect("finite tau");
            let rho = kernel.autocorrelation(0.01).expect("finite rho");

            // Assert
            let identity = 2.0 * kernel.variance() * (1.0 - rho);
            assert_relative_eq!(tau * tau, identity, max_relative = 1e-8);
        }
    }
}
