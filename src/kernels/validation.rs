//! Argument and result checks shared by the kernel implementations.
use crate::kernels::errors::{KernelError, KernelResult};

/// `h` must be finite and non-negative.
pub fn validate_lag(h: f64) -> KernelResult<()> {
    if !h.is_finite() || h < 0.0 {
        return Err(KernelError::InvalidLag { lag: h });
    }
    Ok(())
}

/// `n` must be strictly positive.
pub fn validate_sampling_rate(n: usize) -> KernelResult<()> {
    if n == 0 {
        return Err(KernelError::InvalidSamplingRate { n });
    }
    Ok(())
}

/// Pass `value` through if finite, otherwise name the failing `quantity`.
pub fn check_finite(quantity: &'static str, value: f64) -> KernelResult<f64> {
    if !value.is_finite() {
        return Err(KernelError::NonFiniteResult { quantity, value });
    }
    Ok(value)
}
