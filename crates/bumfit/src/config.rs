//! Configuration for partitioned mixture fitting.

use bumfit_core::constants::DEFAULT_SEED;
use bumfit_core::SgdOptions;

/// Default number of p-values one partition-local fit consumes.
pub const DEFAULT_SAMPLES_PER_FIT: usize = 5000;

/// Default smallest trailing chunk still worth fitting on its own.
pub const DEFAULT_MIN_FIT_SIZE: usize = 8;

/// Configuration options for [`BumEstimator`](crate::BumEstimator).
#[derive(Debug, Clone)]
pub struct FitConfig {
    // =========================================================================
    // Partition chunking
    // =========================================================================
    /// Number of p-values a partition-local fit consumes before emitting one
    /// partial fit.
    ///
    /// A partition holding more p-values than this yields multiple partial
    /// fits; the weighted aggregation makes that equivalent to one big fit in
    /// expectation while bounding per-fit memory. Default: 5,000.
    pub samples_per_fit: usize,

    /// Smallest trailing chunk still fitted on its own.
    ///
    /// A partition's final chunk is usually shorter than `samples_per_fit`;
    /// it is still fitted (its weight reflects its true length) unless it is
    /// shorter than this, in which case it is skipped — a one- or two-point
    /// empirical CDF carries no usable shape. Default: 8.
    pub min_fit_size: usize,

    // =========================================================================
    // Descent schedule
    // =========================================================================
    /// Knobs forwarded to every per-chunk descent run.
    pub sgd: SgdOptions,

    // =========================================================================
    // Reproducibility
    // =========================================================================
    /// Base seed. Each chunk's generator is seeded from this plus the
    /// partition and chunk indices, so parallel runs are reproducible and
    /// mutually independent.
    pub seed: u64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            samples_per_fit: DEFAULT_SAMPLES_PER_FIT,
            min_fit_size: DEFAULT_MIN_FIT_SIZE,
            sgd: SgdOptions::default(),
            seed: DEFAULT_SEED,
        }
    }
}
