//! Weighted aggregation of per-partition fits into one global fit.
//!
//! Each partial fit carries the number of p-values it consumed, so the
//! weighted mean is exact under any grouping: aggregating all fits in one
//! pass, or pairwise combining partial aggregates in a reduction tree,
//! yields the same result modulo floating-point summation order.

use crate::error::FitError;
use crate::types::{GlobalFit, PartialFit};

/// Weighted-mean aggregation over any number of partial fits.
///
/// # Errors
///
/// `EmptyAggregation` if the sequence is empty or its total weight is zero.
pub fn aggregate<I>(fits: I) -> Result<GlobalFit, FitError>
where
    I: IntoIterator<Item = PartialFit>,
{
    let mut pi0_sum = 0.0;
    let mut alpha_sum = 0.0;
    let mut beta_sum = 0.0;
    let mut count: u64 = 0;

    for fit in fits {
        let weight = fit.count as f64;
        pi0_sum += weight * fit.pi0;
        alpha_sum += weight * fit.alpha;
        beta_sum += weight * fit.beta;
        count += fit.count;
    }

    if count == 0 {
        return Err(FitError::EmptyAggregation);
    }

    let total = count as f64;
    Ok(GlobalFit {
        pi0: pi0_sum / total,
        alpha: alpha_sum / total,
        beta: beta_sum / total,
        count,
    })
}

/// Exact pairwise combination of two partial fits.
///
/// Associative and commutative up to floating-point order, with zero-weight
/// fits acting as the identity — the building block for hierarchical
/// (map → combine → reduce) aggregation topologies.
pub fn combine(a: PartialFit, b: PartialFit) -> PartialFit {
    if a.count == 0 {
        return b;
    }
    if b.count == 0 {
        return a;
    }

    let wa = a.count as f64;
    let wb = b.count as f64;
    let total = wa + wb;
    PartialFit {
        pi0: (wa * a.pi0 + wb * b.pi0) / total,
        alpha: (wa * a.alpha + wb * b.alpha) / total,
        beta: (wa * a.beta + wb * b.beta) / total,
        count: a.count + b.count,
    }
}
