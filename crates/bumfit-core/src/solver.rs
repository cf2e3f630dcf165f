//! Converts a target false discovery rate into a p-value cutoff.
//!
//! The q-value is non-decreasing in `p` for any valid fit, so the cutoff
//! where `q(p) = q*` can be found by bisection on `[0, 1]`.

use crate::constants::BOUND_TOLERANCE;
use crate::model::q_value;
use crate::types::{GlobalFit, SignificanceThreshold};

/// Bisection steps after which the search gives up tightening.
///
/// Ordinary targets converge in ~15 steps; the cap only matters for fits
/// whose q-value sits above the target arbitrarily close to zero, where the
/// relative-width test alone would keep halving indefinitely.
const MAX_BISECTION_STEPS: usize = 200;

/// Find the p-value cutoff whose q-value equals the target FDR.
///
/// If the fitted alternative fraction `1 - pi0` is at or below the target,
/// no cutoff can beat it and everything is accepted (`cutoff = 1`).
/// Otherwise bisects until the bracket's relative width is within
/// [`BOUND_TOLERANCE`](crate::constants::BOUND_TOLERANCE) and returns the
/// final midpoint.
///
/// # Panics
///
/// Panics if `target_fdr` is outside `(0, 1)` or the fit's parameters are
/// non-finite; both are caller contract violations.
pub fn significance_cutoff(fit: &GlobalFit, target_fdr: f64) -> SignificanceThreshold {
    assert!(
        target_fdr > 0.0 && target_fdr < 1.0,
        "target FDR must be in (0, 1), got {}",
        target_fdr
    );
    let params = fit.params();
    assert!(
        params.pi0.is_finite() && params.alpha.is_finite() && params.beta.is_finite(),
        "fit parameters must be finite"
    );

    // Too few alternatives to ever beat the target: accept everything.
    if 1.0 - params.pi0 <= target_fdr {
        return SignificanceThreshold { cutoff: 1.0 };
    }

    let mut lower = 0.0_f64;
    let mut upper = 1.0_f64;
    let mut remaining = MAX_BISECTION_STEPS;
    let cutoff = loop {
        let guess = (lower + upper) / 2.0;
        if q_value(guess, &params) <= target_fdr {
            lower = guess;
        } else {
            upper = guess;
        }
        remaining -= 1;
        if (upper - lower) / upper <= BOUND_TOLERANCE || remaining == 0 {
            break guess;
        }
    };

    SignificanceThreshold { cutoff }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartialFit;

    fn fit(pi0: f64, alpha: f64, beta: f64) -> GlobalFit {
        PartialFit {
            pi0,
            alpha,
            beta,
            count: 5000,
        }
    }

    #[test]
    fn test_short_circuit_when_alternatives_scarce() {
        // 1 - pi0 = 0.05 <= q* = 0.05: accept everything
        let threshold = significance_cutoff(&fit(0.95, 0.4, 4.0), 0.05);
        assert_eq!(threshold.cutoff, 1.0);

        // And strictly scarcer
        let threshold = significance_cutoff(&fit(0.99, 0.4, 4.0), 0.05);
        assert_eq!(threshold.cutoff, 1.0);
    }

    #[test]
    fn test_cutoff_hits_target_q_value() {
        let global = fit(0.7, 0.4, 4.0);
        let target = 0.05;
        let threshold = significance_cutoff(&global, target);

        assert!(threshold.cutoff > 0.0 && threshold.cutoff < 1.0);
        let q = q_value(threshold.cutoff, &global.params());
        assert!(
            (q - target).abs() < 0.01,
            "q at the cutoff should be close to the target: got {}",
            q
        );
    }

    #[test]
    fn test_tighter_target_gives_smaller_cutoff() {
        let global = fit(0.7, 0.4, 4.0);
        let loose = significance_cutoff(&global, 0.10).cutoff;
        let tight = significance_cutoff(&global, 0.01).cutoff;
        assert!(
            tight < loose,
            "a stricter FDR target must lower the cutoff: {} vs {}",
            tight,
            loose
        );
    }

    #[test]
    #[should_panic(expected = "target FDR must be in (0, 1)")]
    fn test_target_of_zero_rejected() {
        significance_cutoff(&fit(0.7, 0.4, 4.0), 0.0);
    }
}
