//! Tuning constants used throughout the crate.

/// Default deterministic seed for fitting runs.
///
/// This seed ensures reproducibility: same seed + same batch = same fit.
/// The value `0x7076616C7565` is "pvalue" encoded in ASCII.
pub const DEFAULT_SEED: u64 = 0x7076616C7565;

/// Step size for the symmetric finite-difference gradients.
///
/// Each partial derivative is estimated as
/// `(err(x + h/2) - err(x - h/2)) / h` with this `h`. The same value bounds
/// the parameter clamps so that perturbed evaluations stay inside the Beta
/// domain. Deliberately a separate constant from [`CONVERGENCE_TOLERANCE`],
/// even though they share a value.
pub const GRADIENT_STEP: f64 = 1e-4;

/// Termination threshold for the running update norm.
///
/// Corresponds to four significant digits in the fitted parameters.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-4;

/// Momentum coefficient blending each raw gradient with the previous step.
pub const MOMENTUM: f64 = 0.5;

/// Learning rate at the start of a fitting run.
pub const INITIAL_LEARNING_RATE: f64 = 2.0;

/// Multiplier applied to the learning rate after an epoch whose running
/// update norm increased (a likely overshoot of a local minimum).
pub const LEARNING_RATE_BACKOFF: f64 = 0.9;

/// Default ceiling on fitting epochs before the run is abandoned as
/// non-convergent.
pub const DEFAULT_MAX_EPOCHS: usize = 1000;

/// Relative interval width at which the cutoff bisection terminates.
pub const BOUND_TOLERANCE: f64 = 1e-4;
