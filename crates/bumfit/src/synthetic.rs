//! Synthetic p-value batches with known mixture parameters.
//!
//! Generates the same family the fitter estimates: with probability `pi0` a
//! draw is `U(0,1)` (a null hypothesis), otherwise `Beta(alpha, beta)` (a
//! true alternative). Ground-truth parameters in, p-values out — which makes
//! recovery tests and benches self-contained.

use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Ground-truth mixture a synthetic batch is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mixture {
    /// Proportion of uniform (null) draws, in `[0, 1]`.
    pub pi0: f64,
    /// First shape parameter of the Beta component.
    pub alpha: f64,
    /// Second shape parameter of the Beta component.
    pub beta: f64,
}

impl Mixture {
    /// Define a mixture to sample from.
    ///
    /// # Panics
    ///
    /// Panics unless `pi0 ∈ [0, 1]` and both shape parameters are positive
    /// and finite.
    pub fn new(pi0: f64, alpha: f64, beta: f64) -> Self {
        assert!(
            (0.0..=1.0).contains(&pi0),
            "pi0 must be in [0, 1], got {}",
            pi0
        );
        assert!(
            alpha > 0.0 && alpha.is_finite(),
            "alpha must be positive and finite, got {}",
            alpha
        );
        assert!(
            beta > 0.0 && beta.is_finite(),
            "beta must be positive and finite, got {}",
            beta
        );
        Self { pi0, alpha, beta }
    }

    /// Sample `n` p-values from the mixture with a dedicated generator.
    pub fn sample(&self, n: usize, seed: u64) -> Vec<f64> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let alternative =
            Beta::new(self.alpha, self.beta).expect("shape parameters validated in Mixture::new");

        (0..n)
            .map(|_| {
                if rng.random::<f64>() <= self.pi0 {
                    rng.random::<f64>()
                } else {
                    alternative.sample(&mut rng)
                }
            })
            .collect()
    }
}
