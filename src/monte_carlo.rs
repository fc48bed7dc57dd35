//! Approximate combination of sample sets.

use crate::error::{Error, Result};
use crate::ops::PairwiseOp;

/// Draws `n` independent pairs — one element picked uniformly with
/// replacement from each input (the inputs need not have equal length) —
/// applies `op` element-wise and returns the results as a new empirical
/// sample set for the combined independent random variables.
///
/// # Errors
///
/// Returns [`Error::EmptySamples`] if either input is empty, and
/// [`Error::DivisionByZero`] if `op` is division and a zero denominator is
/// drawn — the whole batch fails, not the one pair.
pub fn combine(
    rng: &mut fastrand::Rng,
    left: &[f64],
    right: &[f64],
    op: PairwiseOp,
    n: usize,
) -> Result<Vec<f64>> {
    if left.is_empty() || right.is_empty() {
        return Err(Error::EmptySamples);
    }

    (0..n)
        .map(|_| {
            let a = left[rng.usize(0..left.len())];
            let b = right[rng.usize(0..right.len())];
            op.apply_double(a, b)
        })
        .collect()
}

/// Raises every sample of a distribution base to a scalar power.
#[must_use]
pub fn power(samples: &[f64], exponent: f64) -> Vec<f64> {
    samples.iter().map(|v| v.powf(exponent)).collect()
}

/// Bins samples into a histogram; returns `(counts, edges)` with
/// `edges.len() == bins + 1`. Samples on the upper boundary land in the last
/// bin.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
#[must_use]
pub fn histogram(samples: &[f64], bins: usize) -> (Vec<usize>, Vec<f64>) {
    if samples.is_empty() || bins == 0 {
        return (Vec::new(), Vec::new());
    }

    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    let edges = (0..=bins).map(|i| min + i as f64 * width).collect();
    let mut counts = vec![0_usize; bins];
    for &sample in samples {
        let bin = if width == 0.0 {
            0
        } else {
            (((sample - min) / width) as usize).min(bins - 1)
        };
        counts[bin] += 1;
    }

    (counts, edges)
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_draws_requested_count() {
        let mut rng = fastrand::Rng::with_seed(42);
        let left = vec![1.0, 2.0, 3.0];
        let right = vec![10.0, 20.0];

        let result = combine(&mut rng, &left, &right, PairwiseOp::Add, 5_000).unwrap();

        assert_eq!(result.len(), 5_000);
        // Every draw is some left element plus some right element.
        assert!(result.iter().all(|&v| (11.0..=23.0).contains(&v)));
    }

    #[test]
    fn test_combine_mean_of_sum() {
        let mut rng = fastrand::Rng::with_seed(42);
        // Means 2.0 and 15.0; the sum's mean is 17.0.
        let left = vec![1.0, 2.0, 3.0];
        let right = vec![10.0, 20.0];

        let result = combine(&mut rng, &left, &right, PairwiseOp::Add, 50_000).unwrap();
        let mean = result.iter().sum::<f64>() / result.len() as f64;

        assert!((mean - 17.0).abs() < 0.1);
    }

    #[test]
    fn test_combine_empty_input_fails() {
        let mut rng = fastrand::Rng::with_seed(42);
        assert!(matches!(
            combine(&mut rng, &[], &[1.0], PairwiseOp::Add, 10),
            Err(Error::EmptySamples)
        ));
    }

    #[test]
    fn test_combine_division_by_drawn_zero_fails_batch() {
        let mut rng = fastrand::Rng::with_seed(42);
        let left = vec![1.0];
        let right = vec![0.0];

        assert!(matches!(
            combine(&mut rng, &left, &right, PairwiseOp::Div, 10),
            Err(Error::DivisionByZero)
        ));
    }

    #[test]
    fn test_power_maps_every_sample() {
        let samples = vec![1.0, 2.0, 3.0];
        assert_eq!(power(&samples, 2.0), vec![1.0, 4.0, 9.0]);
    }

    #[test]
    fn test_histogram_counts_and_edges() {
        let samples = vec![0.0, 0.5, 1.0, 1.5, 2.0];
        let (counts, edges) = histogram(&samples, 2);

        assert_eq!(counts, vec![2, 3]);
        assert_eq!(edges.len(), 3);
        assert!((edges[0] - 0.0).abs() < 1e-12);
        assert!((edges[2] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_degenerate_samples() {
        let samples = vec![3.0, 3.0, 3.0];
        let (counts, _) = histogram(&samples, 4);
        assert_eq!(counts[0], 3);
        assert_eq!(counts.iter().sum::<usize>(), 3);
    }
}
