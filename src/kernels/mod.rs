//! kernels — second-order structure of Brownian semistationary cores.
//!
//! Purpose
//! -------
//! A BSS process `Y(t) = ∫_{-∞}^t g(t-s) σ(s) dW(s)` with unit volatility
//! reduces to its Gaussian core `G(t) = ∫_{-∞}^t g(t-s) dW(s)`. This module
//! evaluates, for concrete kernels `g`, the two quantities the volatility
//! estimators need:
//! - the autocorrelation `ρ(h)` of `G`, matched against empirical
//!   autocorrelations when fitting kernel parameters, and
//! - the scale factor `tau(n) = sqrt(E[(G(t+1/n) - G(t))²])` that
//!   normalizes power variations sampled at rate `n`.
//!
//! Key behaviors
//! -------------
//! - [`BssKernel`] is the seam between fitting/estimation code and kernel
//!   families.
//! - [`gamma::GammaKernel`] has closed forms (Matérn correlation) and an
//!   asymptotic scale factor [`gamma::gamma_kernel_tau_asymptotic`].
//! - [`power::PowerKernel`] is evaluated by quadrature.
//!
//! Invariants & assumptions
//! ------------------------
//! - Kernel parameters are validated at construction; a constructed kernel
//!   is always square integrable.
//! - `autocorrelation(0) == 1` and `tau(n) >= 0` for every admissible kernel.
//! - Non-finite intermediate results are reported as
//!   [`errors::KernelError::NonFiniteResult`], never returned.
//!
//! Conventions
//! -----------
//! - Lags `h` are in model time units; a lag of `k` observations at rate
//!   `n` is `h = k / n`.
//!
//! Downstream usage
//! ----------------
//! - `fitting::acf` minimizes the squared distance between empirical and
//!   model autocorrelations over kernel parameters.
//! - `volatility::accumulated` calls `tau(n)` on the fitted kernel.

pub mod errors;
pub mod gamma;
pub mod power;
pub mod validation;

use self::errors::KernelResult;

/// A square-integrable BSS kernel `g` on `(0, ∞)`.
pub trait BssKernel {
    /// Autocorrelation `ρ(h)` of the Gaussian core at lag `h >= 0`.
    fn autocorrelation(&self, h: f64) -> KernelResult<f64>;

    /// Scale factor `sqrt(E[(G(t+1/n) - G(t))²])` at sampling rate `n`.
    fn tau(&self, n: usize) -> KernelResult<f64>;
}

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::KernelError;
pub use self::gamma::{GammaKernel, gamma_kernel_tau_asymptotic};
pub use self::power::PowerKernel;

pub mod prelude {
    pub use super::BssKernel;
    pub use super::errors::{KernelError, KernelResult};
    pub use super::gamma::{GammaKernel, gamma_kernel_tau_asymptotic};
    pub use super::power::PowerKernel;
}
