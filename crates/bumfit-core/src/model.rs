//! Beta-Uniform mixture model evaluation.
//!
//! Pure functions of `(p, parameters)`; no state. The mixture CDF is
//!
//! ```text
//! F(p) = pi0 * p + (1 - pi0) * I_p(alpha, beta)
//! ```
//!
//! where `I_p` is the regularized incomplete Beta function, and the q-value
//! at `p` is the estimated false discovery rate among findings with p-values
//! at or below `p`:
//!
//! ```text
//! q(p) = pi0 * p / (pi0 * p + (1 - pi0) * I_p(alpha, beta))
//! ```
//!
//! Both expect `alpha > 0` and `beta > 1`; the fitter's clamps keep every
//! parameter triple it produces inside that domain.

use crate::math;
use crate::types::BumParameters;

/// Mixture CDF at `p`.
pub fn model_cdf(p: f64, params: &BumParameters) -> f64 {
    params.pi0 * p + (1.0 - params.pi0) * math::beta_cdf(p, params.alpha, params.beta)
}

/// Estimated FDR among findings with p-values at or below `p`.
///
/// Non-decreasing in `p` for any valid parameter triple. Defined for
/// `p ∈ (0, 1]`; at `p = 0` both discovery masses vanish and the ratio is
/// meaningless (NaN).
pub fn q_value(p: f64, params: &BumParameters) -> f64 {
    let false_discoveries = params.pi0 * p;
    let true_discoveries = (1.0 - params.pi0) * math::beta_cdf(p, params.alpha, params.beta);
    false_discoveries / (false_discoveries + true_discoveries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIFORM_BETA: BumParameters = BumParameters {
        pi0: 0.8,
        alpha: 1.0,
        beta: 1.0,
    };

    #[test]
    fn test_q_value_uniform_beta_case() {
        // Beta(1,1) CDF at 0.1 is 0.1, so q = 0.8*0.1 / (0.8*0.1 + 0.2*0.1)
        let q = q_value(0.1, &UNIFORM_BETA);
        assert!((q - 0.8).abs() < 1e-12, "expected q = 0.8, got {}", q);
    }

    #[test]
    fn test_model_cdf_endpoints() {
        let params = BumParameters {
            pi0: 0.7,
            alpha: 0.4,
            beta: 4.0,
        };
        assert_eq!(model_cdf(0.0, &params), 0.0);
        assert!((model_cdf(1.0, &params) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_model_cdf_dominates_uniform_for_enriched_mixture() {
        // With alpha < 1 the alternative component front-loads small p-values,
        // so the mixture CDF sits above the diagonal everywhere inside (0,1).
        let params = BumParameters {
            pi0: 0.7,
            alpha: 0.4,
            beta: 4.0,
        };
        for i in 1..20 {
            let p = i as f64 / 20.0;
            assert!(
                model_cdf(p, &params) > p,
                "mixture CDF at {} should exceed the uniform CDF",
                p
            );
        }
    }

    #[test]
    fn test_q_value_monotone_in_p() {
        let params = BumParameters {
            pi0: 0.6,
            alpha: 0.3,
            beta: 5.0,
        };
        let mut last = 0.0;
        for i in 1..=1000 {
            let p = i as f64 / 1000.0;
            let q = q_value(p, &params);
            assert!(
                q >= last - 1e-12,
                "q-value decreased at p={}: {} -> {}",
                p,
                last,
                q
            );
            last = q;
        }
    }

    #[test]
    fn test_q_value_all_null_is_one() {
        // pi0 = 1 means every discovery is a false discovery
        let params = BumParameters {
            pi0: 1.0,
            alpha: 0.5,
            beta: 2.0,
        };
        assert!((q_value(0.3, &params) - 1.0).abs() < 1e-12);
    }
}
