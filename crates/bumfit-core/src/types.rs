//! Value objects passed between fitting stages.
//!
//! `BumParameters` is owned exclusively by one fitting run and threaded
//! through the descent loop as a value. `PartialFit` and `GlobalFit` are
//! immutable once created; they are the only things that cross partition
//! boundaries.

use serde::{Deserialize, Serialize};

/// The three parameters of a Beta-Uniform mixture.
///
/// `pi0` is the weight of the uniform (null) component; `alpha` and `beta`
/// shape the Beta (alternative) component. The fitter keeps `pi0 ∈ [0, 1]`,
/// `alpha ∈ (0, 1)`, and `beta > 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BumParameters {
    /// Mixture weight of the uniform component (proportion of nulls).
    pub pi0: f64,
    /// First shape parameter of the Beta component.
    pub alpha: f64,
    /// Second shape parameter of the Beta component.
    pub beta: f64,
}

impl BumParameters {
    /// Copy with `pi0` replaced. Used for finite-difference perturbations.
    #[inline]
    pub fn with_pi0(self, pi0: f64) -> Self {
        Self { pi0, ..self }
    }

    /// Copy with `alpha` replaced.
    #[inline]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    /// Copy with `beta` replaced.
    #[inline]
    pub fn with_beta(self, beta: f64) -> Self {
        Self { beta, ..self }
    }
}

/// One partition's fitted parameters plus the evidence weight behind them.
///
/// The weight is the number of p-values the fit consumed, which makes the
/// weighted-mean aggregation exact under any grouping of partial results.
/// This is the canonical four-field tuple the aggregation layer exchanges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartialFit {
    /// Fitted mixture weight of the uniform component.
    pub pi0: f64,
    /// Fitted first shape parameter of the Beta component.
    pub alpha: f64,
    /// Fitted second shape parameter of the Beta component.
    pub beta: f64,
    /// Number of p-values this fit was derived from.
    pub count: u64,
}

impl PartialFit {
    /// Bundle fitted parameters with the size of the batch that produced them.
    pub fn new(params: BumParameters, count: u64) -> Self {
        Self {
            pi0: params.pi0,
            alpha: params.alpha,
            beta: params.beta,
            count,
        }
    }

    /// The parameter triple, without the weight.
    pub fn params(&self) -> BumParameters {
        BumParameters {
            pi0: self.pi0,
            alpha: self.alpha,
            beta: self.beta,
        }
    }
}

/// The weighted-mean combination of every partition's `PartialFit`.
///
/// Same shape as a partial fit; the distinction is purely which stage of the
/// pipeline produced it.
pub type GlobalFit = PartialFit;

/// p-value acceptance threshold for one (global fit, target FDR) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignificanceThreshold {
    /// Findings with `p <= cutoff` are accepted at the requested FDR.
    pub cutoff: f64,
}

impl SignificanceThreshold {
    /// Whether a finding with the given p-value is accepted.
    #[inline]
    pub fn accepts(&self, p: f64) -> bool {
        p <= self.cutoff
    }
}
