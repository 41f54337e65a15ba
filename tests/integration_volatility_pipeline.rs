//! Integration tests for the accumulated-volatility pipeline.
//!
//! Purpose
//! -------
//! - Validate the public estimators end to end on simulated
//!   volatility-modulated Ornstein–Uhlenbeck paths (gamma kernel with
//!   `α = 0`), from strategy resolution through kernel fitting to the
//!   confidence band.
//!
//! Coverage
//! --------
//! - `volatility::estimate` with every supported `(method, kernel)` pair.
//! - `volatility::estimate_ci` and `estimate_ci_with_method`.
//! - Configuration and data errors surfaced through the public API.
//!
//! Exclusions
//! ----------
//! - Accuracy of individual fits and kernel formulas; covered by unit
//!   tests in `fitting` and `kernels`.
//! - Python bindings.
use bss_volatility::volatility::{
    ConfidenceBand, EstimatorOptions, Kernel, Method, Stage, VolError, estimate, estimate_ci,
    estimate_ci_with_method,
};
use ndarray::Array1;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

/// Purpose
/// -------
/// Simulate `len` points of an OU process with decay `lambda`, sampled `n`
/// times per unit time, whose innovations are scaled by the deterministic
/// volatility `σ(t) = 1 + 0.5 sin(2π t / T)`.
///
/// Notes
/// -----
/// - Starts from the stationary law of the unit-volatility process.
fn modulated_ou_path(seed: u64, len: usize, n: usize, lambda: f64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dt = 1.0 / n as f64;
    let phi = (-lambda * dt).exp();
    let innovation_sd = ((1.0 - phi * phi) / (2.0 * lambda)).sqrt();
    let horizon = len as f64;

    let z0: f64 = StandardNormal.sample(&mut rng);
    let mut x = z0 / (2.0 * lambda).sqrt();
    let mut path = Vec::with_capacity(len);
    path.push(x);
    for i in 1..len {
        let sigma = 1.0 + 0.5 * (2.0 * std::f64::consts::PI * i as f64 / horizon).sin();
        let z: f64 = StandardNormal.sample(&mut rng);
        x = phi * x + sigma * innovation_sd * z;
        path.push(x);
    }
    path
}

fn assert_valid_estimate(values: &Array1<f64>, expected_len: usize) {
    assert_eq!(values.len(), expected_len);
    assert!(values.iter().all(|v| v.is_finite() && *v >= 0.0));
    for (i, w) in values.windows(2).into_iter().enumerate() {
        assert!(w[1] >= w[0], "decrease at {i}: {} -> {}", w[0], w[1]);
    }
}

#[test]
// Purpose
// -------
// End-to-end run of the ACF/gamma strategy at the reference size.
//
// Given
// -----
// - A 10 001-point modulated OU path with `λ = 2` at `n = 100`, `p = 2`.
//
// Expect
// ------
// - 10 000 finite, non-negative, non-decreasing values.
// - The ACF/gamma estimate is a constant multiple of the non-parametric one
//   (same power variation, different scale factor).
fn acf_gamma_end_to_end_on_reference_path() {
    // Arrange
    let path = modulated_ou_path(2024, 10_001, 100, 2.0);

    // Act
    let acf = estimate(&path, 100, 2.0, Method::Acf, Kernel::Gamma).expect("acf/gamma estimate");
    let np = estimate(&path, 100, 2.0, Method::NonParametric, Kernel::Gamma)
        .expect("non-parametric estimate");

    // Assert
    assert_valid_estimate(&acf, 10_000);
    assert_valid_estimate(&np, 10_000);
    let ratio = acf[9_999] / np[9_999];
    assert!(ratio.is_finite() && ratio > 0.0, "ratio = {ratio}");
    for k in [99, 2_499, 4_999, 7_499] {
        if np[k] > 0.0 {
            let rel = (acf[k] / np[k] - ratio).abs() / ratio;
            assert!(rel < 1e-9, "index {k}: relative deviation {rel}");
        }
    }
}

#[test]
// Purpose
// -------
// The remaining strategies run on the same kind of path.
//
// Given
// -----
// - A 3 001-point modulated OU path at `n = 50`, `p ∈ {1, 2}`.
//
// Expect
// ------
// - `(Cof, Gamma)` and `(Acf, Power)` return valid estimates of length
//   3 000; `(Cof, Power)` is a configuration error.
fn every_supported_strategy_produces_a_valid_estimate() {
    // Arrange
    let path = modulated_ou_path(7, 3_001, 50, 1.5);

    for p in [1.0, 2.0] {
        // Act
        let cof = estimate(&path, 50, p, Method::Cof, Kernel::Gamma).expect("cof/gamma estimate");
        let acf_power =
            estimate(&path, 50, p, Method::Acf, Kernel::Power).expect("acf/power estimate");

        // Assert
        assert_valid_estimate(&cof, 3_000);
        assert_valid_estimate(&acf_power, 3_000);
    }
    assert_eq!(
        estimate(&path, 50, 2.0, Method::Cof, Kernel::Power),
        Err(VolError::UnsupportedCombination { method: Method::Cof, kernel: Kernel::Power })
    );
}

#[test]
// Purpose
// -------
// The confidence band brackets the point estimate and collapses at level 0.
//
// Given
// -----
// - A 5 001-point modulated OU path at `n = 100`, `p = 2`.
//
// Expect
// ------
// - `lower <= mean <= upper` at level 0.95, with the band centred on the
//   non-parametric estimate whatever the requested method.
// - `lower == upper == mean` at level 0.
fn confidence_band_end_to_end() {
    // Arrange
    let path = modulated_ou_path(99, 5_001, 100, 2.0);
    let np = estimate(&path, 100, 2.0, Method::NonParametric, Kernel::Gamma)
        .expect("non-parametric estimate");

    // Act
    let band: ConfidenceBand =
        estimate_ci(&path, 100, 2.0, Method::Acf, Kernel::Gamma, 0.95).expect("band");
    let flat = estimate_ci(&path, 100, 2.0, Method::NonParametric, Kernel::Power, 0.0)
        .expect("zero-level band");

    // Assert
    assert_eq!(band.len(), 5_000);
    assert_eq!(band.mean, np);
    for k in 0..band.len() {
        assert!(band.lower[k] <= band.mean[k] && band.mean[k] <= band.upper[k], "index {k}");
    }
    assert_eq!(flat.lower, flat.mean);
    assert_eq!(flat.upper, flat.mean);
}

#[test]
// Purpose
// -------
// The generic band uses the requested strategy for its centre.
//
// Given
// -----
// - A 3 001-point modulated OU path at `n = 50`, `(Acf, Gamma)`, level 0.9.
//
// Expect
// ------
// - `mean` equals `estimate(.., Acf, Gamma)`; widths are non-negative.
fn generic_band_forwards_the_method() {
    // Arrange
    let path = modulated_ou_path(31, 3_001, 50, 2.0);
    let opts = EstimatorOptions::default();

    // Act
    let band = estimate_ci_with_method(&path, 50, 2.0, Method::Acf, Kernel::Gamma, 0.9, &opts)
        .expect("generic band");
    let acf = estimate(&path, 50, 2.0, Method::Acf, Kernel::Gamma).expect("acf/gamma estimate");

    // Assert
    assert_eq!(band.mean, acf);
    assert!(band.width().iter().all(|w| *w >= 0.0));
}

#[test]
// Purpose
// -------
// Degenerate input fails loudly through the public surface.
//
// Given
// -----
// - The constant path `[0, 0, 0, 0, 0]` and a one-point path.
//
// Expect
// ------
// - `EstimationFailed` at `ScaleFactorFit` for the non-parametric estimate,
//   `InsufficientData` for the one-point path.
fn degenerate_paths_are_reported() {
    match estimate(&[0.0; 5], 10, 2.0, Method::NonParametric, Kernel::Gamma) {
        Err(VolError::EstimationFailed { stage: Stage::ScaleFactorFit, reason }) => {
            assert!(reason.contains("zero variance"), "{reason}");
        }
        other => panic!("expected a scale-factor failure, got {other:?}"),
    }
    assert_eq!(
        estimate(&[1.0], 10, 2.0, Method::NonParametric, Kernel::Gamma),
        Err(VolError::InsufficientData { len: 1 })
    );
}
