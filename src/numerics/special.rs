//! Special functions not covered by `statrs`.
//!
//! - [`bessel_k`]: modified Bessel function of the second kind `K_ν(z)`
//!   from its integral representation `∫₀^∞ e^{-z cosh t} cosh(νt) dt`.
//! - [`hyp2f1`]: Gauss hypergeometric series `₂F₁(a, b; c; x)` for
//!   `|x| < 1`, `NaN` when the series does not settle in time.
//! - [`abs_normal_moment`]: `m_p = E|Z|^p` for `Z ~ N(0, 1)`.
//! - [`abs_normal_cross_moment`]: `E[|X|^p |Y|^p]` for a standard bivariate
//!   normal pair with correlation `r`.
use statrs::function::gamma::ln_gamma;
use std::f64::consts::{LN_2, PI};

const BESSEL_STEP: f64 = 0.1;
const BESSEL_EXPONENT_CUTOFF: f64 = 50.0;
const BESSEL_MAX_NODES: usize = 100_000;

const HYP2F1_MAX_TERMS: usize = 100_000;
const HYP2F1_TOL: f64 = 1e-16;

/// Above this `r²` the cross-moment series converges too slowly; the value
/// is interpolated towards its exact limit at `r² = 1`.
const CROSS_MOMENT_MAX_SERIES_R2: f64 = 0.999;

/// Modified Bessel function of the second kind `K_ν(z)` for `z > 0`.
///
/// Trapezoid rule with step 0.1 on `∫₀^∞ e^{-z cosh t} cosh(νt) dt`,
/// truncated once `z cosh t - |ν| t` exceeds 50. The integrand is analytic
/// and doubly-exponentially decaying, so the fixed step already gives close
/// to machine precision for moderate `z`.
///
/// Returns `+∞` for `z <= 0` and `NaN` for non-finite input.
pub fn bessel_k(nu: f64, z: f64) -> f64 {
    if !nu.is_finite() || z.is_nan() {
        return f64::NAN;
    }
    if z <= 0.0 {
        return f64::INFINITY;
    }
    let nu = nu.abs();
    let mut sum = 0.5 * (-z).exp();
    for k in 1..BESSEL_MAX_NODES {
        let t = k as f64 * BESSEL_STEP;
        let exponent = z * t.cosh() - nu * t;
        if exponent > BESSEL_EXPONENT_CUTOFF {
            break;
        }
        sum += (-z * t.cosh()).exp() * (nu * t).cosh();
    }
    sum * BESSEL_STEP
}

/// Gauss hypergeometric function `₂F₁(a, b; c; x)` by direct summation.
///
/// Intended for `|x| < 1`; terminates early for polynomial cases (`a` or
/// `b` a non-positive integer). Returns `NaN` if `|x| >= 1`, and also if
/// the terms are still above the relative tolerance after
/// `HYP2F1_MAX_TERMS` terms, which happens for `x` close to 1 when the
/// terms only decay like a power of `k`. A truncated partial sum is never
/// returned.
pub fn hyp2f1(a: f64, b: f64, c: f64, x: f64) -> f64 {
    if x.abs() >= 1.0 || !x.is_finite() {
        return f64::NAN;
    }
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 0..HYP2F1_MAX_TERMS {
        let kf = k as f64;
        term *= (a + kf) * (b + kf) / ((c + kf) * (kf + 1.0)) * x;
        sum += term;
        if term == 0.0 || term.abs() <= HYP2F1_TOL * sum.abs() {
            return sum;
        }
    }
    f64::NAN
}

/// Absolute moment of a standard normal, `m_p = 2^{p/2} Γ((p+1)/2) / √π`.
///
/// Evaluated on the log scale to avoid overflow of `Γ` for large `p`.
/// Defined for `p > -1`; the caller validates the range.
pub fn abs_normal_moment(p: f64) -> f64 {
    (0.5 * p * LN_2 + ln_gamma(0.5 * (p + 1.0)) - 0.5 * PI.ln()).exp()
}

/// `E[|X|^p |Y|^p]` for standard normals with correlation `r`.
///
/// Equals `m_p² · ₂F₁(-p/2, -p/2; 1/2; r²)`. At `|r| = 1` the pair is
/// degenerate and the value is `m_{2p}`, which is also Gauss's sum of the
/// series at 1.
///
/// For `r² > 0.999` the series terms decay only like `k^{-(p + 3/2)}`, so
/// the value is interpolated linearly in `r²` between the series at 0.999
/// and `m_{2p}` at 1. The function is convex and increasing in `r²`, hence
/// the chord overestimates by less than `m_{2p} - m_p² ₂F₁(..; 0.999)`.
pub fn abs_normal_cross_moment(p: f64, r: f64) -> f64 {
    let r2 = (r * r).min(1.0);
    let m2p = abs_normal_moment(2.0 * p);
    if r2 >= 1.0 {
        return m2p;
    }
    let mp = abs_normal_moment(p);
    let series = |x: f64| mp * mp * hyp2f1(-0.5 * p, -0.5 * p, 0.5, x);
    if r2 <= CROSS_MOMENT_MAX_SERIES_R2 {
        return series(r2);
    }
    let at_cap = series(CROSS_MOMENT_MAX_SERIES_R2);
    let weight = (r2 - CROSS_MOMENT_MAX_SERIES_R2) / (1.0 - CROSS_MOMENT_MAX_SERIES_R2);
    log::debug!("cross moment: r^2 = {r2:.6} above series range; interpolating to m_2p");
    at_cap + weight * (m2p - at_cap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `K_ν` at half-integer orders, where closed forms exist.
    // - Polynomial and classical closed forms of `₂F₁`.
    // - Known absolute normal moments and the `r = 0` / `r = 1` limits of
    //   the cross moment, including the range near `|r| = 1` where the
    //   series is replaced by interpolation.
    // - Unconverged series reported as `NaN`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Compare `bessel_k` with the closed forms at half-integer order.
    //
    // Given
    // -----
    // - `K_{1/2}(z) = √(π/2z) e^{-z}`, `K_{3/2}(z) = √(π/2z) e^{-z} (1 + 1/z)`.
    // - `z ∈ {0.01, 0.5, 3, 20}`.
    //
    // Expect
    // ------
    // - Relative agreement to 1e-10.
    fn bessel_k_matches_half_integer_closed_forms() {
        for z in [0.01_f64, 0.5, 3.0, 20.0] {
            // Arrange
            let base = (PI / (2.0 * z)).sqrt() * (-z).exp();

            // Act / Assert
            assert_relative_eq!(bessel_k(0.5, z), base, max_relative = 1e-10);
            assert_relative_eq!(bessel_k(1.5, z), base * (1.0 + 1.0 / z), max_relative = 1e-10);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure degenerate arguments are flagged rather than silently wrong.
    //
    // Given
    // -----
    // - `z = 0` and `z = NaN`.
    //
    // Expect
    // ------
    // - `+∞` and `NaN`.
    fn bessel_k_flags_degenerate_arguments() {
        assert_eq!(bessel_k(0.5, 0.0), f64::INFINITY);
        assert!(bessel_k(0.5, f64::NAN).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Verify `hyp2f1` on a terminating case and a classical identity.
    //
    // Given
    // -----
    // - `₂F₁(-1, -1; 1/2; x) = 1 + 2x`.
    // - `₂F₁(1, 1; 2; x) = -ln(1 - x) / x`.
    //
    // Expect
    // ------
    // - Both to within 1e-12 relative at `x = 0.3`.
    fn hyp2f1_matches_closed_forms() {
        // Arrange
        let x = 0.3;

        // Act / Assert
        assert_relative_eq!(hyp2f1(-1.0, -1.0, 0.5, x), 1.0 + 2.0 * x, max_relative = 1e-12);
        assert_relative_eq!(hyp2f1(1.0, 1.0, 2.0, x), -(1.0 - x).ln() / x, max_relative = 1e-12);
        assert!(hyp2f1(1.0, 1.0, 2.0, 1.0).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // A series that cannot settle within the term budget is flagged
    // instead of returned as a partial sum.
    //
    // Given
    // -----
    // - `₂F₁(1, 1; 2; x) = -ln(1 - x) / x` at `x = 1 - 1e-9`, whose terms
    //   `x^k / (k + 1)` need about `4e10` terms to drop below `1e-16`.
    //
    // Expect
    // ------
    // - `NaN`.
    fn hyp2f1_flags_unconverged_series() {
        assert!(hyp2f1(1.0, 1.0, 2.0, 1.0 - 1e-9).is_nan());
    }

    #[test]
    // Purpose
    // -------
    // Check the absolute normal moments against textbook values.
    //
    // Given
    // -----
    // - `p ∈ {1, 2, 4}`.
    //
    // Expect
    // ------
    // - `m_1 = √(2/π)`, `m_2 = 1`, `m_4 = 3`.
    fn abs_normal_moment_matches_known_values() {
        assert_relative_eq!(abs_normal_moment(1.0), (2.0 / PI).sqrt(), max_relative = 1e-12);
        assert_relative_eq!(abs_normal_moment(2.0), 1.0, max_relative = 1e-12);
        assert_relative_eq!(abs_normal_moment(4.0), 3.0, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Verify the cross moment at the independent and degenerate limits and
    // at `p = 2`, where `E[X²Y²] = 1 + 2r²`.
    //
    // Given
    // -----
    // - `r ∈ {0, 0.6, 1}` with `p = 1.5` and `p = 2`.
    //
    // Expect
    // ------
    // - `m_p²` at `r = 0`, `m_{2p}` at `r = 1`, `1 + 2·0.36` for `p = 2`.
    fn abs_normal_cross_moment_limits() {
        // Arrange
        let p = 1.5;
        let mp = abs_normal_moment(p);

        // Act / Assert
        assert_relative_eq!(abs_normal_cross_moment(p, 0.0), mp * mp, max_relative = 1e-12);
        assert_relative_eq!(
            abs_normal_cross_moment(p, 1.0),
            abs_normal_moment(2.0 * p),
            max_relative = 1e-12
        );
        assert_relative_eq!(abs_normal_cross_moment(2.0, 0.6), 1.72, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Near `|r| = 1` the cross moment stays finite, increasing, and tends
    // to its degenerate limit, also for small `p` where the series is
    // slowest.
    //
    // Given
    // -----
    // - `p ∈ {0.1, 1.5, 3.3}` and `r² ∈ {0.998, 0.999, 0.9999, 1 - 1e-12, 1}`.
    //
    // Expect
    // ------
    // - Finite values, non-decreasing in `r²`, bounded by `m_{2p}`, and
    //   within `1e-9` relative of `m_{2p}` at `r² = 1 - 1e-12`.
    fn abs_normal_cross_moment_is_continuous_near_one() {
        for p in [0.1_f64, 1.5, 3.3] {
            // Arrange
            let m2p = abs_normal_moment(2.0 * p);

            // Act
            let values: Vec<f64> = [0.998_f64, 0.999, 0.9999, 1.0 - 1e-12, 1.0]
                .iter()
                .map(|r2| abs_normal_cross_moment(p, r2.sqrt()))
                .collect();

            // Assert
            assert!(values.iter().all(|v| v.is_finite() && *v <= m2p * (1.0 + 1e-12)));
            for w in values.windows(2) {
                assert!(w[1] >= w[0], "p = {p}: {} -> {}", w[0], w[1]);
            }
            assert_relative_eq!(values[3], m2p, max_relative = 1e-9);
            assert_relative_eq!(values[4], m2p, max_relative = 1e-12);
        }
    }
}
