//! High-level `minimize` entrypoint.
use crate::optimization::{
    errors::OptResult,
    least_squares::{
        FitOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{FitOptions, LineSearcher, Objective},
    },
};

/// Minimize an [`Objective`] with L-BFGS starting from `theta0`.
///
/// Runs `f.check(&theta0, data)` first, then dispatches on
/// `opts.line_searcher` to the matching solver builder.
///
/// # Errors
/// - Anything returned by `check`.
/// - Solver construction failures (invalid tolerances).
/// - Execution failures reported by [`run_lbfgs`].
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &FitOptions,
) -> OptResult<FitOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::{
        errors::OptError,
        least_squares::{Cost, Tolerances, validation::validate_theta},
    };
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of the minimizer of a small nonlinear least-squares problem
    //   with both line searches and finite-difference gradients.
    // - Short-circuiting on `check` failures.
    // -------------------------------------------------------------------------

    /// Exponential-decay regression: `y_k = a · exp(-b · x_k)` with
    /// `θ = (a, b)`.
    struct DecayFit;

    struct DecayData {
        x: Array1<f64>,
        y: Array1<f64>,
    }

    impl Objective for DecayFit {
        type Data = DecayData;

        fn value(&self, theta: &Theta, data: &DecayData) -> OptResult<Cost> {
            let (a, b) = (theta[0], theta[1]);
            Ok(data
                .x
                .iter()
                .zip(data.y.iter())
                .map(|(&x, &y)| (a * (-b * x).exp() - y).powi(2))
                .sum())
        }

        fn check(&self, theta: &Theta, _data: &DecayData) -> OptResult<()> {
            validate_theta(theta, 2)
        }
    }

    fn decay_data(a: f64, b: f64) -> DecayData {
        let x = Array1::linspace(0.0, 4.0, 21);
        let y = x.mapv(|x| a * (-b * x).exp());
        DecayData { x, y }
    }

    #[test]
    // Purpose
    // -------
    // Verify that `minimize` recovers noise-free decay parameters with both
    // line-search choices.
    //
    // Given
    // -----
    // - Data generated from `a = 2`, `b = 0.7`, start `θ₀ = (1, 0.3)`. Large
    //   trial steps overflow `exp(-b·x)`, so the Hager–Zhang bracket must
    //   stay within `HAGER_ZHANG_MAX_STEP`.
    //
    // Expect
    // ------
    // - A converged run with `theta_hat ≈ (2, 0.7)` and a near-zero
    //   objective value.
    fn minimize_recovers_exponential_decay_parameters() {
        // Arrange
        let data = decay_data(2.0, 0.7);
        let tols = Tolerances::new(Some(1e-10), Some(1e-14), Some(500)).expect("valid");

        for line_searcher in [LineSearcher::MoreThuente, LineSearcher::HagerZhang] {
            let opts = FitOptions::new(tols, line_searcher, false, None).expect("valid");

            // Act
            let outcome =
                minimize(&DecayFit, array![1.0, 0.3], &data, &opts).expect("fit should succeed");

            // Assert
            assert!(outcome.converged, "{line_searcher:?}: {}", outcome.status);
            assert_relative_eq!(outcome.theta_hat[0], 2.0, epsilon = 1e-3);
            assert_relative_eq!(outcome.theta_hat[1], 0.7, epsilon = 1e-3);
            assert!(outcome.value < 1e-6, "residual too large: {}", outcome.value);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure that a failing `check` stops `minimize` before any solver work.
    //
    // Given
    // -----
    // - A start vector of the wrong length.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 2, actual: 3 }`.
    fn minimize_propagates_check_failure() {
        // Arrange
        let data = decay_data(1.0, 1.0);

        // Act
        let result = minimize(&DecayFit, array![1.0, 1.0, 1.0], &data, &FitOptions::default());

        // Assert
        assert_eq!(result, Err(OptError::ThetaLengthMismatch { expected: 2, actual: 3 }));
    }
}
