//! Beta-Uniform mixture estimation for false discovery rate control.
//!
//! A large collection of p-values drawn from many hypothesis tests follows a
//! Beta-Uniform Mixture (BUM): null hypotheses contribute a `U(0,1)` component
//! with weight `pi0`, true alternatives a `Beta(alpha, beta)` component with
//! weight `1 - pi0`. Fitting that mixture to the empirical CDF of a batch
//! yields a model from which a p-value acceptance cutoff with bounded expected
//! false discovery rate can be solved.
//!
//! This crate is the statistical engine only: it consumes plain `f64`
//! p-values and produces parameter triples and cutoffs. Partition chunking,
//! parallel dispatch, and the persisted wire format live in the `bumfit`
//! crate.
//!
//! # Pipeline
//!
//! ```text
//! p-values ─► EmpiricalCdf ─► sgd::fit ─► PartialFit ─┐
//! p-values ─► EmpiricalCdf ─► sgd::fit ─► PartialFit ─┼► aggregate ─► GlobalFit ─► significance_cutoff
//! p-values ─► EmpiricalCdf ─► sgd::fit ─► PartialFit ─┘
//! ```
//!
//! Every stage is a value-in/value-out function; no stage shares mutable
//! state with another, so per-partition fits can run concurrently without
//! synchronization.

pub mod aggregate;
pub mod constants;
pub mod ecdf;
pub mod error;
pub mod math;
pub mod model;
pub mod sgd;
pub mod solver;
pub mod types;

// Re-export commonly used items at crate root
pub use aggregate::{aggregate, combine};
pub use ecdf::{EmpiricalCdf, EmpiricalPoint};
pub use error::{FitError, InvalidInput};
pub use model::{model_cdf, q_value};
pub use sgd::{SgdFit, SgdOptions};
pub use solver::significance_cutoff;
pub use types::{BumParameters, GlobalFit, PartialFit, SignificanceThreshold};
