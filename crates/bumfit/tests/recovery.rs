//! Parameter recovery on synthetic batches with known ground truth.
//!
//! Stochastic but seed-controlled: every generator involved is seeded, so
//! these tests are deterministic run to run.

use bumfit::synthetic::Mixture;
use bumfit::BumEstimator;

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn test_recovers_known_mixture_parameters() {
    init_tracing();

    let truth = Mixture::new(0.7, 0.4, 4.0);
    let batch = truth.sample(5000, 42);

    let partials = BumEstimator::new()
        .samples_per_fit(5000)
        .seed(42)
        .fit_partition(&batch, 0)
        .expect("fit should converge on a well-behaved synthetic batch");
    assert_eq!(partials.len(), 1);
    let fit = partials[0];

    assert_eq!(fit.count, 5000);
    assert!(
        (fit.pi0 - truth.pi0).abs() < 0.05,
        "pi0 recovery: expected {} ± 0.05, got {}",
        truth.pi0,
        fit.pi0
    );
    assert!(
        (fit.alpha - truth.alpha).abs() < 0.05,
        "alpha recovery: expected {} ± 0.05, got {}",
        truth.alpha,
        fit.alpha
    );
    assert!(
        (fit.beta - truth.beta).abs() < 0.05,
        "beta recovery: expected {} ± 0.05, got {}",
        truth.beta,
        fit.beta
    );
}

#[test]
fn test_partitioned_fit_close_to_single_fit() {
    init_tracing();

    let truth = Mixture::new(0.6, 0.3, 5.0);
    // Four partitions of one shared population
    let partitions: Vec<Vec<f64>> = (0..4).map(|i| truth.sample(1500, 100 + i)).collect();

    let estimator = BumEstimator::new().samples_per_fit(1500).seed(7);
    let global = estimator.fit(&partitions).unwrap();

    assert_eq!(global.count, 6000);
    assert!(
        (global.pi0 - truth.pi0).abs() < 0.1,
        "aggregated pi0 should sit near the shared truth: expected {} ± 0.1, got {}",
        truth.pi0,
        global.pi0
    );
}
