//! Builders for L-BFGS solvers used by the least-squares optimizer.
//!
//! Each builder picks the line search, applies the history size from
//! [`FitOptions::lbfgs_mem`] (falling back to [`DEFAULT_LBFGS_MEM`]), and
//! wires the optional gradient and cost tolerances through
//! [`configure_lbfgs`]. The Hager–Zhang bracket is capped at
//! [`HAGER_ZHANG_MAX_STEP`].
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    least_squares::{
        traits::FitOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HAGER_ZHANG_MAX_STEP, HagerZhangLS, LbfgsHagerZhang,
            LbfgsMoreThuente, MoreThuenteLS, Theta,
        },
    },
};

/// L-BFGS with a Hager–Zhang line search whose steps lie in
/// `[ε, HAGER_ZHANG_MAX_STEP]`.
///
/// # Errors
/// Propagates Argmin's rejection of the step bounds or of the configured
/// tolerances.
pub fn build_optimizer_hager_zhang(opts: &FitOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new().with_bounds(f64::EPSILON, HAGER_ZHANG_MAX_STEP)?;
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsHagerZhang::new(hager_zhang, mem), opts)
}

/// L-BFGS with a More–Thuente line search.
///
/// # Errors
/// Propagates Argmin's rejection of the configured tolerances.
pub fn build_optimizer_more_thuente(opts: &FitOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LbfgsMoreThuente::new(more_thuente, mem), opts)
}

/// Apply `tol_grad` / `tol_cost` from `opts` to an L-BFGS solver.
///
/// `max_iter` is not a solver property; it is set on the executor state in
/// [`run_lbfgs`](super::run::run_lbfgs).
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &FitOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::least_squares::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of both solver flavours with default and explicit
    //   L-BFGS memory.
    // - Tolerance wiring when only `max_iter` is configured.
    //
    // They intentionally DO NOT cover:
    // - Executor behavior, which is tested through `minimize`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure both builders succeed with default memory and with an explicit
    // memory value.
    //
    // Given
    // -----
    // - Valid tolerances, `lbfgs_mem = None` and `Some(11)`.
    //
    // Expect
    // ------
    // - All four builder calls return `Ok(_)`.
    fn builders_accept_default_and_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), Some(1e-10), Some(50)).expect("valid tolerances");
        let default_mem =
            FitOptions::new(tols, LineSearcher::HagerZhang, false, None).expect("valid options");
        let explicit_mem =
            FitOptions::new(tols, LineSearcher::MoreThuente, false, Some(11)).expect("valid");

        // Act / Assert
        assert!(build_optimizer_hager_zhang(&default_mem).is_ok());
        assert!(build_optimizer_hager_zhang(&explicit_mem).is_ok());
        assert!(build_optimizer_more_thuente(&default_mem).is_ok());
        assert!(build_optimizer_more_thuente(&explicit_mem).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // Verify that an iteration-only configuration leaves the solver
    // tolerances untouched and still builds.
    //
    // Given
    // -----
    // - `Tolerances { tol_grad: None, tol_cost: None, max_iter: Some(10) }`.
    //
    // Expect
    // ------
    // - `build_optimizer_more_thuente` returns `Ok(_)`.
    fn builder_accepts_iteration_only_tolerances() {
        // Arrange
        let tols = Tolerances::new(None, None, Some(10)).expect("valid tolerances");
        let opts =
            FitOptions::new(tols, LineSearcher::MoreThuente, false, None).expect("valid options");

        // Act
        let solver = build_optimizer_more_thuente(&opts);

        // Assert
        assert!(solver.is_ok());
    }
}
