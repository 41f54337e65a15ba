//! Executor wiring for L-BFGS runs.
//!
//! [`run_lbfgs`] seeds the Argmin executor with `θ₀`, applies the
//! iteration cap, optionally attaches a slog observer (`obs_slog` feature
//! with `verbose = true`), and converts the final state into a validated
//! [`FitOutcome`].
use crate::optimization::{
    errors::OptResult,
    least_squares::{FitOptions, FitOutcome, Grad, Objective, Theta, adapter::ArgMinAdapter},
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an L-BFGS solver on `problem` starting from `theta0`.
///
/// # Errors
/// - Backend failures (objective errors) converted through
///   `From<argmin::core::Error> for OptError`.
/// - [`OptError::SolverExit`](crate::optimization::errors::OptError::SolverExit)
///   when the solver aborts, e.g. on a line-search breakdown.
/// - Validation failures of the best parameter or best cost.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &FitOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<FitOutcome>
where
    F: Objective,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    FitOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: cost(theta0) = {:.6e}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6e}", n)).unwrap_or_default()
    );
    Ok(())
}
