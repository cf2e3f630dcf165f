//! Momentum-based stochastic gradient descent for the mixture parameters.
//!
//! One run fits a single empirical CDF table by minimizing the squared error
//! between the mixture CDF and the empirical ordinates, one row at a time:
//!
//! - Partial derivatives are symmetric finite differences with step
//!   [`GRADIENT_STEP`](crate::constants::GRADIENT_STEP):
//!   `d/dx err ≈ (err(x + h/2) - err(x - h/2)) / h`.
//! - Each raw derivative is blended with the previous step through a fixed
//!   momentum coefficient before being applied.
//! - A running exponential blend of the Euclidean norm of the three steps
//!   (`avg_delta`) tracks how much the parameters are still moving; the run
//!   terminates once it drops below tolerance.
//! - After an epoch whose running norm increased, the learning rate is backed
//!   off — a local minimum was likely overshot.
//!
//! The run is deterministic given a seed: the table reshuffle order and the
//! initial `alpha`/`beta` draws all come from one `Xoshiro256PlusPlus`
//! instantiated per run, so concurrent fits never share generator state.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use tracing::{debug, trace};

use crate::constants::{
    CONVERGENCE_TOLERANCE, DEFAULT_MAX_EPOCHS, GRADIENT_STEP, INITIAL_LEARNING_RATE,
    LEARNING_RATE_BACKOFF, MOMENTUM,
};
use crate::ecdf::{EmpiricalCdf, EmpiricalPoint};
use crate::error::FitError;
use crate::model::model_cdf;
use crate::types::BumParameters;

/// Tunable knobs for one fitting run.
///
/// The defaults reproduce the reference schedule; they are exposed mainly so
/// tests can tighten the epoch ceiling or relax the tolerance.
#[derive(Debug, Clone)]
pub struct SgdOptions {
    /// Finite-difference step `h`; also bounds the domain clamps.
    pub gradient_step: f64,
    /// Terminate once the running update norm drops below this.
    pub tolerance: f64,
    /// Momentum coefficient in `[0, 1)`.
    pub momentum: f64,
    /// Learning rate at the start of the run.
    pub initial_learning_rate: f64,
    /// Learning-rate multiplier after a worsening epoch.
    pub learning_rate_backoff: f64,
    /// Epoch ceiling; exceeded runs fail with `NonConvergence`.
    pub max_epochs: usize,
}

impl Default for SgdOptions {
    fn default() -> Self {
        Self {
            gradient_step: GRADIENT_STEP,
            tolerance: CONVERGENCE_TOLERANCE,
            momentum: MOMENTUM,
            initial_learning_rate: INITIAL_LEARNING_RATE,
            learning_rate_backoff: LEARNING_RATE_BACKOFF,
            max_epochs: DEFAULT_MAX_EPOCHS,
        }
    }
}

/// Result of a converged fitting run, with its diagnostics.
#[derive(Debug, Clone)]
pub struct SgdFit {
    /// The fitted parameter triple.
    pub params: BumParameters,
    /// Epochs consumed before the tolerance was met.
    pub epochs: usize,
    /// Running update norm at termination.
    pub avg_delta: f64,
    /// Learning rate at termination, after any annealing.
    pub learning_rate: f64,
}

/// Descent state threaded through the loop as a value.
#[derive(Debug, Clone, Copy)]
struct SgdState {
    params: BumParameters,
    /// Momentum-blended steps for (pi0, alpha, beta).
    delta: [f64; 3],
    /// Running exponential blend of the step norms.
    avg_delta: f64,
}

/// Fit the mixture parameters to one empirical CDF table.
///
/// The table is reshuffled in place at every epoch; its `(p, cdf)` pairs are
/// otherwise untouched. Same seed + same table = same fit.
///
/// # Errors
///
/// `NonConvergence` if the running update norm has not met tolerance within
/// `options.max_epochs` epochs.
pub fn fit(
    table: &mut EmpiricalCdf,
    options: &SgdOptions,
    seed: u64,
) -> Result<SgdFit, FitError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let h = options.gradient_step;

    // pi0 starts at 1.0: conservatively assume every hypothesis is null until
    // the data argues otherwise. The shape draws are clamped into the same
    // domain the per-step updates enforce, so every perturbed evaluation of
    // the Beta CDF stays inside alpha > 0, beta > 1.
    let mut state = SgdState {
        params: BumParameters {
            pi0: 1.0,
            alpha: rng.random::<f64>().clamp(h, 1.0 - h),
            beta: (1.0 + 9.0 * rng.random::<f64>()).max(1.0 + h),
        },
        delta: [0.0; 3],
        avg_delta: 1.0,
    };
    let mut learning_rate = options.initial_learning_rate;

    for epoch in 1..=options.max_epochs {
        let old_delta = state.avg_delta;
        state = run_epoch(table, state, learning_rate, options, &mut rng);

        if old_delta < state.avg_delta {
            learning_rate *= options.learning_rate_backoff;
        }
        debug!(
            epoch,
            avg_delta = state.avg_delta,
            learning_rate,
            pi0 = state.params.pi0,
            alpha = state.params.alpha,
            beta = state.params.beta,
            "descent epoch"
        );

        if state.avg_delta < options.tolerance {
            return Ok(SgdFit {
                params: state.params,
                epochs: epoch,
                avg_delta: state.avg_delta,
                learning_rate,
            });
        }
    }

    Err(FitError::NonConvergence {
        epochs: options.max_epochs,
        avg_delta: state.avg_delta,
    })
}

/// One pass over the reshuffled table.
fn run_epoch<R: Rng + ?Sized>(
    table: &mut EmpiricalCdf,
    mut state: SgdState,
    learning_rate: f64,
    options: &SgdOptions,
    rng: &mut R,
) -> SgdState {
    table.shuffle(rng);

    let blend = 1.0 - options.momentum;
    for point in table.points() {
        // All three derivatives are taken against the un-updated triple; the
        // clamped update is applied only after the running norm is blended.
        let grad = gradients(point, &state.params, options.gradient_step);
        for k in 0..3 {
            state.delta[k] = options.momentum * state.delta[k] + blend * learning_rate * grad[k];
        }

        let norm =
            (state.delta[0] * state.delta[0] + state.delta[1] * state.delta[1]
                + state.delta[2] * state.delta[2])
                .sqrt();
        state.avg_delta = (state.avg_delta + norm) / 2.0;
        trace!(avg_delta = state.avg_delta, "descent step");

        state.params = apply_update(state.params, &state.delta, options.gradient_step);
    }

    state
}

/// Squared error of the mixture CDF against one empirical ordinate.
#[inline]
fn squared_error(point: &EmpiricalPoint, params: &BumParameters) -> f64 {
    let diff = point.cdf - model_cdf(point.p, params);
    diff * diff
}

/// Symmetric finite-difference partials of the squared error w.r.t.
/// (pi0, alpha, beta).
fn gradients(point: &EmpiricalPoint, params: &BumParameters, h: f64) -> [f64; 3] {
    let half = h / 2.0;
    [
        (squared_error(point, &params.with_pi0(params.pi0 + half))
            - squared_error(point, &params.with_pi0(params.pi0 - half)))
            / h,
        (squared_error(point, &params.with_alpha(params.alpha + half))
            - squared_error(point, &params.with_alpha(params.alpha - half)))
            / h,
        (squared_error(point, &params.with_beta(params.beta + half))
            - squared_error(point, &params.with_beta(params.beta - half)))
            / h,
    ]
}

/// Descend along the blended steps and clamp back into the valid domain.
///
/// The clamps keep `alpha` and `beta` far enough inside their bounds that the
/// next round of `±h/2` perturbations cannot leave the Beta domain.
fn apply_update(params: BumParameters, delta: &[f64; 3], h: f64) -> BumParameters {
    BumParameters {
        pi0: (params.pi0 - delta[0]).clamp(0.0, 1.0),
        alpha: (params.alpha - delta[1]).clamp(h, 1.0 - h),
        beta: (params.beta - delta[2]).max(1.0 + h),
    }
}
