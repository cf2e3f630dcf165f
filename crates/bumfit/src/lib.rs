//! Partitioned Beta-Uniform mixture fitting with FDR-bounded significance
//! cutoffs.
//!
//! This crate wraps the [`bumfit_core`] statistical engine with everything a
//! batch-processing caller needs: chunking of partitions into fixed-size
//! fits, optional data-parallel execution, the persisted wire format, and a
//! synthetic generator for self-contained testing.
//!
//! # Quick start
//!
//! ```ignore
//! use bumfit::{significance_cutoff, BumEstimator};
//!
//! // One vector of p-values per partition, however the data was split.
//! let partitions: Vec<Vec<f64>> = load_pvalue_partitions();
//!
//! let global = BumEstimator::new()
//!     .samples_per_fit(5000)
//!     .seed(42)
//!     .fit_parallel(&partitions)?;
//!
//! // p-values at or below the cutoff are significant at 5% FDR.
//! let threshold = significance_cutoff(&global, 0.05);
//! let significant = records.iter().filter(|r| threshold.accepts(r.p));
//! ```
//!
//! # Feature flags
//!
//! - `parallel` (default): fit partitions on the rayon pool via
//!   [`BumEstimator::fit_parallel`].

pub mod config;
pub mod estimator;
pub mod synthetic;
pub mod wire;

pub use config::FitConfig;
pub use estimator::BumEstimator;

// Re-export the core vocabulary so most callers need only this crate.
pub use bumfit_core::{
    aggregate, combine, model_cdf, q_value, significance_cutoff, BumParameters, EmpiricalCdf,
    EmpiricalPoint, FitError, GlobalFit, InvalidInput, PartialFit, SgdFit, SgdOptions,
    SignificanceThreshold,
};
