//! Builder-style entry point for fitting partitions of p-values.
//!
//! A partition is an independently processed slice of the full dataset. Each
//! partition is consumed in chunks of `samples_per_fit` p-values; every chunk
//! builds its own empirical CDF, runs its own seeded descent, and emits one
//! `PartialFit` weighted by the chunk length. Partial fits from any number of
//! partitions then reduce to one `GlobalFit`.
//!
//! Nothing here shares mutable state across partitions, so with the
//! `parallel` feature the per-partition work runs on a rayon pool and only
//! the final aggregation joins the results.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use bumfit_core::error::{FitError, InvalidInput};
use bumfit_core::{aggregate, sgd, EmpiricalCdf, GlobalFit, PartialFit};

use crate::config::FitConfig;

/// Fits Beta-Uniform mixtures over partitioned batches of p-values.
///
/// # Example
///
/// ```ignore
/// use bumfit::BumEstimator;
///
/// let partitions: Vec<Vec<f64>> = load_pvalue_partitions();
/// let global = BumEstimator::new()
///     .samples_per_fit(5000)
///     .seed(42)
///     .fit(&partitions)?;
/// let threshold = bumfit::significance_cutoff(&global, 0.05);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BumEstimator {
    config: FitConfig,
}

impl BumEstimator {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an explicit configuration.
    pub fn with_config(config: FitConfig) -> Self {
        Self { config }
    }

    /// Set the number of p-values per partition-local fit.
    pub fn samples_per_fit(mut self, n: usize) -> Self {
        self.config.samples_per_fit = n;
        self
    }

    /// Set the smallest trailing chunk still fitted on its own.
    pub fn min_fit_size(mut self, n: usize) -> Self {
        self.config.min_fit_size = n;
        self
    }

    /// Set the base seed for all per-chunk generators.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the epoch ceiling of every descent run.
    pub fn max_epochs(mut self, n: usize) -> Self {
        self.config.sgd.max_epochs = n;
        self
    }

    /// Set the convergence tolerance of every descent run.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.sgd.tolerance = tolerance;
        self
    }

    /// Get the current configuration.
    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    /// Fit one partition, emitting one partial fit per chunk.
    ///
    /// `partition_index` feeds the per-chunk seed derivation; callers fitting
    /// several partitions give each a distinct index.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an empty partition or a zero `samples_per_fit`;
    /// any chunk's own validation or convergence failure aborts the whole
    /// partition.
    pub fn fit_partition(
        &self,
        pvalues: &[f64],
        partition_index: u64,
    ) -> Result<Vec<PartialFit>, FitError> {
        if self.config.samples_per_fit == 0 {
            return Err(InvalidInput::NonPositiveChunkSize.into());
        }
        if pvalues.is_empty() {
            return Err(InvalidInput::EmptyBatch.into());
        }

        let mut partials = Vec::with_capacity(pvalues.len() / self.config.samples_per_fit + 1);
        for (chunk_index, chunk) in pvalues.chunks(self.config.samples_per_fit).enumerate() {
            if chunk.len() < self.config.samples_per_fit && chunk.len() < self.config.min_fit_size
            {
                debug!(
                    partition = partition_index,
                    chunk = chunk_index,
                    len = chunk.len(),
                    "skipping trailing chunk below the minimum fit size"
                );
                continue;
            }

            let mut table = EmpiricalCdf::from_pvalues(chunk)?;
            let seed = chunk_seed(self.config.seed, partition_index, chunk_index as u64);
            let fit = sgd::fit(&mut table, &self.config.sgd, seed)?;
            debug!(
                partition = partition_index,
                chunk = chunk_index,
                epochs = fit.epochs,
                pi0 = fit.params.pi0,
                "chunk fitted"
            );
            partials.push(PartialFit::new(fit.params, chunk.len() as u64));
        }

        Ok(partials)
    }

    /// Fit every partition sequentially and aggregate into one global fit.
    ///
    /// # Errors
    ///
    /// The first partition failure, or `EmptyAggregation` if no chunk
    /// produced a partial fit.
    pub fn fit<P: AsRef<[f64]>>(&self, partitions: &[P]) -> Result<GlobalFit, FitError> {
        let mut partials = Vec::new();
        for (index, partition) in partitions.iter().enumerate() {
            partials.extend(self.fit_partition(partition.as_ref(), index as u64)?);
        }
        aggregate(partials)
    }

    /// Fit partitions on the rayon pool and aggregate into one global fit.
    ///
    /// Identical numeric result to [`fit`](Self::fit): per-chunk seeds depend
    /// only on the partition and chunk indices, and the partial fits are
    /// aggregated in partition order regardless of completion order.
    #[cfg(feature = "parallel")]
    pub fn fit_parallel<P: AsRef<[f64]> + Sync>(
        &self,
        partitions: &[P],
    ) -> Result<GlobalFit, FitError> {
        let per_partition: Vec<Vec<PartialFit>> = partitions
            .par_iter()
            .enumerate()
            .map(|(index, partition)| self.fit_partition(partition.as_ref(), index as u64))
            .collect::<Result<_, _>>()?;
        aggregate(per_partition.into_iter().flatten())
    }
}

/// Derive one chunk's generator seed from the base seed and its coordinates.
///
/// The multipliers decorrelate adjacent indices; `Xoshiro256PlusPlus`'s
/// `seed_from_u64` finishes the mixing. Chunks never share a generator, which
/// keeps parallel execution reproducible and order-independent.
fn chunk_seed(base: u64, partition: u64, chunk: u64) -> u64 {
    base ^ partition.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ chunk.wrapping_mul(0xBF58_476D_1CE4_E5B9)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_samples_per_fit_rejected() {
        let estimator = BumEstimator::new().samples_per_fit(0);
        let err = estimator.fit_partition(&[0.1, 0.2], 0).unwrap_err();
        assert_eq!(
            err,
            FitError::InvalidInput(InvalidInput::NonPositiveChunkSize)
        );
    }

    #[test]
    fn test_empty_partition_rejected() {
        let err = BumEstimator::new().fit_partition(&[], 0).unwrap_err();
        assert_eq!(err, FitError::InvalidInput(InvalidInput::EmptyBatch));
    }

    #[test]
    fn test_chunk_seeds_are_distinct() {
        let mut seeds = Vec::new();
        for partition in 0..4u64 {
            for chunk in 0..4u64 {
                seeds.push(chunk_seed(7, partition, chunk));
            }
        }
        let mut deduped = seeds.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), seeds.len(), "per-chunk seeds must not collide");
    }

    #[test]
    fn test_tiny_trailing_chunk_is_skipped() {
        // 64 values with samples_per_fit 60: trailing chunk of 4 < min 8
        let pvalues: Vec<f64> = (0..64).map(|i| (i as f64 + 0.5) / 64.0).collect();
        let estimator = BumEstimator::new().samples_per_fit(60).min_fit_size(8);
        let partials = estimator.fit_partition(&pvalues, 0).unwrap();
        assert_eq!(partials.len(), 1);
        assert_eq!(partials[0].count, 60);
    }
}
