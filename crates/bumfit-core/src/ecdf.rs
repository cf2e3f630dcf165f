//! Empirical CDF construction from a batch of p-values.
//!
//! The table assigns ordinate `rank/N` to the rank'th smallest p-value, so
//! the final row always carries exactly 1.0. Ties receive successive
//! ordinates in whatever order the sort left them, the standard empirical-CDF
//! convention for tied p-values.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{FitError, InvalidInput};

/// One row of the empirical CDF table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmpiricalPoint {
    /// The p-value, in `[0, 1]`.
    pub p: f64,
    /// Empirical CDF ordinate `rank/N`, in `(0, 1]`.
    pub cdf: f64,
}

/// Sorted table of p-values with their empirical CDF ordinates.
///
/// Built once per batch and owned by a single fitting run, which reshuffles
/// it at the start of every descent epoch. Never shared across batches.
#[derive(Debug, Clone)]
pub struct EmpiricalCdf {
    points: Vec<EmpiricalPoint>,
}

impl EmpiricalCdf {
    /// Build the table from an unordered batch of p-values.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the batch is empty or any value falls outside
    /// `[0, 1]` (NaN included).
    pub fn from_pvalues(pvalues: &[f64]) -> Result<Self, FitError> {
        if pvalues.is_empty() {
            return Err(InvalidInput::EmptyBatch.into());
        }
        for (index, &value) in pvalues.iter().enumerate() {
            if !(0.0..=1.0).contains(&value) {
                return Err(InvalidInput::PValueOutOfRange { index, value }.into());
            }
        }

        let mut sorted = pvalues.to_vec();
        sorted.sort_unstable_by(|a, b| a.total_cmp(b));

        let n = sorted.len() as f64;
        let points = sorted
            .into_iter()
            .enumerate()
            .map(|(i, p)| EmpiricalPoint {
                p,
                cdf: (i + 1) as f64 / n,
            })
            .collect();

        Ok(Self { points })
    }

    /// Number of rows (the batch size). Never zero.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; construction rejects empty batches.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The rows, in their current (possibly shuffled) order.
    pub fn points(&self) -> &[EmpiricalPoint] {
        &self.points
    }

    /// Fisher–Yates reshuffle of the rows.
    ///
    /// The descent loop visits rows in a fresh random order each epoch; the
    /// `(p, cdf)` pairing of each row is untouched.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.points.shuffle(rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn test_three_point_table() {
        let cdf = EmpiricalCdf::from_pvalues(&[0.9, 0.1, 0.5]).unwrap();
        let points = cdf.points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].p, 0.1);
        assert!((points[0].cdf - 1.0 / 3.0).abs() < 1e-15);
        assert_eq!(points[1].p, 0.5);
        assert!((points[1].cdf - 2.0 / 3.0).abs() < 1e-15);
        assert_eq!(points[2].p, 0.9);
        assert_eq!(points[2].cdf, 1.0);
    }

    #[test]
    fn test_last_ordinate_is_exactly_one() {
        for n in [1usize, 2, 7, 100] {
            let batch: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
            let cdf = EmpiricalCdf::from_pvalues(&batch).unwrap();
            assert_eq!(
                cdf.points().last().unwrap().cdf,
                1.0,
                "last ordinate must be exactly 1.0 for n={}",
                n
            );
        }
    }

    #[test]
    fn test_sorted_ascending_with_ties() {
        let cdf = EmpiricalCdf::from_pvalues(&[0.5, 0.2, 0.5, 0.1]).unwrap();
        let ps: Vec<f64> = cdf.points().iter().map(|pt| pt.p).collect();
        assert!(ps.windows(2).all(|w| w[0] <= w[1]), "table must be sorted: {:?}", ps);
        // Tied values still receive successive rank/N ordinates
        assert!((cdf.points()[1].cdf - 0.5).abs() < 1e-15);
        assert!((cdf.points()[2].cdf - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_empty_batch_rejected() {
        let err = EmpiricalCdf::from_pvalues(&[]).unwrap_err();
        assert_eq!(err, FitError::InvalidInput(InvalidInput::EmptyBatch));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = EmpiricalCdf::from_pvalues(&[0.2, 1.5]).unwrap_err();
        match err {
            FitError::InvalidInput(InvalidInput::PValueOutOfRange { index, value }) => {
                assert_eq!(index, 1);
                assert_eq!(value, 1.5);
            }
            other => panic!("expected PValueOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_rejected() {
        let err = EmpiricalCdf::from_pvalues(&[0.2, f64::NAN]).unwrap_err();
        assert!(
            matches!(
                err,
                FitError::InvalidInput(InvalidInput::PValueOutOfRange { index: 1, .. })
            ),
            "NaN must be rejected as out of range, got {:?}",
            err
        );
    }

    #[test]
    fn test_shuffle_preserves_pairing() {
        let batch: Vec<f64> = (0..50).map(|i| i as f64 / 50.0).collect();
        let mut cdf = EmpiricalCdf::from_pvalues(&batch).unwrap();
        let before: Vec<EmpiricalPoint> = cdf.points().to_vec();

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        cdf.shuffle(&mut rng);

        let mut after: Vec<EmpiricalPoint> = cdf.points().to_vec();
        after.sort_by(|a, b| a.p.total_cmp(&b.p));
        assert_eq!(before, after, "shuffle must permute rows, not re-pair them");
    }
}
