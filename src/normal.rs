//! Standard normal distribution primitives.
//!
//! The CDF uses the five-term polynomial approximation of Abramowitz & Stegun
//! (26.2.17), accurate to about 7 significant digits. Both pricing models and
//! every Greek inherit that precision.
//!
//! # Formula
//! ```text
//! k    = 1 / (1 + 0.2316419·|x|)
//! N(x) ≈ 1 − n(x)·(a1·k + a2·k² + a3·k³ + a4·k⁴ + a5·k⁵)   for x ≥ 0
//! N(x) = 1 − N(|x|)                                       for x < 0
//! ```

use std::f64::consts::PI;

/// Polynomial coefficient a1.
pub const A1: f64 = 0.319381530;
/// Polynomial coefficient a2.
pub const A2: f64 = -0.356563782;
/// Polynomial coefficient a3.
pub const A3: f64 = 1.781477937;
/// Polynomial coefficient a4.
pub const A4: f64 = -1.821255978;
/// Polynomial coefficient a5.
pub const A5: f64 = 1.330274429;
/// Scale applied to `|x|` in the rational term `k`.
pub const K_SCALE: f64 = 0.2316419;

/// Cumulative distribution function `P(Z ≤ x)` of the standard normal.
///
/// Defined for all finite `x`; never fails.
///
/// # Examples
/// ```
/// use optcalc::normal;
/// assert!((normal::cdf(0.0) - 0.5).abs() < 1e-7);
/// assert!((normal::cdf(1.0) + normal::cdf(-1.0) - 1.0).abs() < 1e-15);
/// ```
pub fn cdf(x: f64) -> f64 {
    let l = x.abs();
    let k = 1.0 / (1.0 + K_SCALE * l);
    // powf, not powi: the reference values are reproduced bit for bit with libm pow.
    let p = 1.0
        - 1.0 / (2.0 * PI).powf(0.5)
            * (-l.powf(2.0) / 2.0).exp()
            * (A1 * k + A2 * k.powf(2.0) + A3 * k.powf(3.0) + A4 * k.powf(4.0) + A5 * k.powf(5.0));

    if x >= 0.0 { p } else { 1.0 - p }
}

/// Probability density function `exp(−x²/2)/√(2π)` of the standard normal.
pub fn pdf(x: f64) -> f64 {
    (-x.powf(2.0) / 2.0).exp() / (2.0 * PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cdf_at_zero_is_half() {
        assert_abs_diff_eq!(cdf(0.0), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn cdf_matches_tabulated_values() {
        // Exact N(x) from standard tables.
        assert_abs_diff_eq!(cdf(1.0), 0.841_344_746_068_543, epsilon = 1e-7);
        assert_abs_diff_eq!(cdf(1.96), 0.975_002_104_851_780, epsilon = 1e-7);
        assert_abs_diff_eq!(cdf(-2.5), 0.006_209_665_325_776, epsilon = 1e-7);
    }

    #[test]
    fn cdf_is_symmetric() {
        for &x in &[0.1, 0.5, 1.3, 2.7, 4.0] {
            assert_abs_diff_eq!(cdf(x) + cdf(-x), 1.0, epsilon = 1e-15);
        }
    }

    #[test]
    fn cdf_is_monotone() {
        let mut prev = cdf(-8.0);
        for i in -79..=80 {
            let x = i as f64 / 10.0;
            let c = cdf(x);
            assert!(c >= prev, "cdf decreased at x = {x}");
            prev = c;
        }
    }

    #[test]
    fn cdf_saturates_in_tails() {
        assert_abs_diff_eq!(cdf(10.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(cdf(-10.0), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn pdf_peak_and_symmetry() {
        assert_abs_diff_eq!(pdf(0.0), 1.0 / (2.0 * PI).sqrt(), epsilon = 1e-16);
        assert_eq!(pdf(1.7), pdf(-1.7));
        assert_abs_diff_eq!(pdf(1.0), 0.241_970_724_519_143, epsilon = 1e-15);
    }
}
