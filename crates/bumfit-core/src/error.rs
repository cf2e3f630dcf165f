//! Error types for mixture fitting and aggregation.
//!
//! Every error is local to one partition or one fit: a failed batch never
//! invalidates another partition's fit, and no error is retried here. Retry
//! policy, if any, belongs to the caller's orchestration layer.

use std::fmt;

/// Error returned when fitting or aggregation fails.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// The input batch (or its chunking configuration) cannot be fitted.
    ///
    /// Surfaced to the caller immediately, aborting that partition's fit.
    InvalidInput(InvalidInput),

    /// Aggregation was attempted over zero total weight.
    ///
    /// The caller must supply at least one partial fit with a positive count.
    EmptyAggregation,

    /// Gradient descent exceeded the epoch ceiling without meeting tolerance.
    ///
    /// The annealing rule bounds oscillation in practice but does not
    /// guarantee convergence, so the ceiling turns a potentially unbounded
    /// loop into a reportable condition.
    NonConvergence {
        /// Number of epochs that ran before giving up.
        epochs: usize,
        /// Running update norm when the run was abandoned.
        avg_delta: f64,
    },
}

/// Reasons an input batch is rejected before any fitting starts.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// The batch contained no p-values.
    EmptyBatch,

    /// A p-value fell outside `[0, 1]` (NaN included).
    PValueOutOfRange {
        /// Position of the offending value in the input sequence.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The configured number of samples per partition-local fit was zero.
    NonPositiveChunkSize,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::InvalidInput(reason) => write!(f, "invalid input: {}", reason),
            FitError::EmptyAggregation => {
                write!(f, "aggregation over zero total weight; supply at least one partial fit")
            }
            FitError::NonConvergence { epochs, avg_delta } => write!(
                f,
                "fit did not converge within {} epochs (running update norm {:.3e})",
                epochs, avg_delta
            ),
        }
    }
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::EmptyBatch => write!(f, "empty batch of p-values"),
            InvalidInput::PValueOutOfRange { index, value } => {
                write!(f, "p-value {} at position {} is outside [0, 1]", value, index)
            }
            InvalidInput::NonPositiveChunkSize => {
                write!(f, "samples-per-fit must be positive")
            }
        }
    }
}

impl std::error::Error for FitError {}

impl From<InvalidInput> for FitError {
    fn from(reason: InvalidInput) -> Self {
        FitError::InvalidInput(reason)
    }
}
