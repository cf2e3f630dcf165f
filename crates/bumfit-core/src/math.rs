//! Special-function wrappers for the mixture model.
//!
//! Keeps `statrs` behind one seam so the rest of the crate never imports it
//! directly.

use statrs::function::beta::beta_reg;

/// Beta CDF: the regularized incomplete Beta function `I_x(a, b)`.
///
/// Clamped at the domain edges so callers can evaluate the mixture CDF at
/// exactly 0 or 1. Shape parameters must be positive; the fitter's clamps
/// guarantee that for every evaluation it performs.
#[inline]
pub fn beta_cdf(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    beta_reg(a, b, x)
}
