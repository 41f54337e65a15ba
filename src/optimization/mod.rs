//! optimization — least-squares stack, stable transforms, and error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer behind the kernel fits: an Argmin-backed
//! L-BFGS minimizer (`least_squares`), numerically stable parameter
//! transforms (`numerical_stability`), and a single error/result surface
//! (`errors::OptError`, `OptResult<T>`).
//!
//! Key behaviors
//! -------------
//! - Minimize user objectives `c(θ)` over an unconstrained parameter
//!   vector, with configurable tolerances, line search and history size.
//! - Normalize configuration issues, numerical failures and backend solver
//!   errors into [`errors::OptError`].
//!
//! Conventions
//! -----------
//! - Parameters and gradients are `ndarray` vectors (`Theta`, `Grad`).
//! - Callers never see raw Argmin errors.
//! - No logging here beyond the optional `obs_slog` observer; fitting code
//!   reports through the `log` facade.

pub mod errors;
pub mod least_squares;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::least_squares::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
