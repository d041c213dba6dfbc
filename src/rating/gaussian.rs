//! Standard-normal helpers for the TrueSkill closed forms
//!
//! Density, cumulative distribution and its inverse, built on the
//! Numerical Recipes rational `erfc` approximation with Halley
//! refinement for the inverse, plus the truncated-Gaussian correction
//! functions used by the two-team update.

use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

/// Probability density of the standard normal distribution
pub(crate) fn pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Cumulative distribution of the standard normal distribution
pub(crate) fn cdf(x: f64) -> f64 {
    0.5 * erfc(-x * FRAC_1_SQRT_2)
}

/// Inverse of [`cdf`], defined for p in (0, 1)
pub(crate) fn inv_cdf(p: f64) -> f64 {
    -SQRT_2 * inv_erfc(2.0 * p)
}

/// Complementary error function, fractional error below 1.2e-7 everywhere
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + z / 2.0);
    let ans = t
        * (-z * z - 1.265_512_23
            + t * (1.000_023_68
                + t * (0.374_091_96
                    + t * (0.096_784_18
                        + t * (-0.186_288_06
                            + t * (0.278_868_07
                                + t * (-1.135_203_98
                                    + t * (1.488_515_87
                                        + t * (-0.822_152_23 + t * 0.170_872_77)))))))))
            .exp();
    if x >= 0.0 {
        ans
    } else {
        2.0 - ans
    }
}

/// Inverse complementary error function
///
/// Rational initial estimate refined with two Halley steps, accurate to
/// full double precision over the open interval (0, 2).
fn inv_erfc(y: f64) -> f64 {
    if y >= 2.0 {
        return -100.0;
    }
    if y <= 0.0 {
        return 100.0;
    }

    let lower_half = y < 1.0;
    let y = if lower_half { y } else { 2.0 - y };

    let t = (-2.0 * (y / 2.0).ln()).sqrt();
    let mut x = -FRAC_1_SQRT_2
        * ((2.30753 + t * 0.27061) / (1.0 + t * (0.99229 + t * 0.04481)) - t);

    for _ in 0..2 {
        let err = erfc(x) - y;
        x += err / ((2.0 / PI.sqrt()) * (-x * x).exp() - x * err);
    }

    if lower_half {
        x
    } else {
        -x
    }
}

/// Mean-shift multiplier for a win observation
///
/// `diff` is the scaled performance difference, `margin` the scaled draw
/// margin. Strictly positive; falls back to the asymptote when the
/// denominator underflows far in the tail.
pub(crate) fn v_win(diff: f64, margin: f64) -> f64 {
    let x = diff - margin;
    let denom = cdf(x);
    if denom < f64::MIN_POSITIVE {
        -x
    } else {
        pdf(x) / denom
    }
}

/// Variance-shrink multiplier for a win observation, always in (0, 1)
pub(crate) fn w_win(diff: f64, margin: f64) -> f64 {
    let x = diff - margin;
    let denom = cdf(x);
    if denom < f64::MIN_POSITIVE {
        return if x < 0.0 { 1.0 } else { 0.0 };
    }
    let v = pdf(x) / denom;
    v * (v + x)
}
