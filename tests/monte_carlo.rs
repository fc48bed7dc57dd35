//! Monte Carlo combination properties: support bounds and the analytic
//! shape of the uniform-sum density.

use stoex::{monte_carlo, PairwiseOp};

/// Evenly spaced samples over `[low, high]`, an equally-weighted stand-in
/// for a continuous uniform distribution.
fn uniform_samples(low: f64, high: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| low + (high - low) * i as f64 / (n - 1) as f64)
        .collect()
}

/// Analytic mass of `U[1,2] + U[3,5]` over `[lo, hi)`. The density is the
/// trapezoid rising on [4,5], flat at 1/2 on [5,6], falling on [6,7].
fn trapezoid_mass(lo: f64, hi: f64) -> f64 {
    fn cdf(z: f64) -> f64 {
        if z <= 4.0 {
            0.0
        } else if z <= 5.0 {
            (z - 4.0) * (z - 4.0) / 4.0
        } else if z <= 6.0 {
            0.25 + (z - 5.0) / 2.0
        } else if z <= 7.0 {
            1.0 - (7.0 - z) * (7.0 - z) / 4.0
        } else {
            1.0
        }
    }
    cdf(hi) - cdf(lo)
}

#[test]
fn test_uniform_sum_support_and_shape() {
    let left = uniform_samples(1.0, 2.0, 1_000);
    let right = uniform_samples(3.0, 5.0, 1_000);

    let mut rng = fastrand::Rng::with_seed(42);
    let n = 100_000;
    let sum = monte_carlo::combine(&mut rng, &left, &right, PairwiseOp::Add, n).unwrap();

    // Support lies inside [4, 7] and reaches both ends.
    let min = sum.iter().copied().fold(f64::INFINITY, f64::min);
    let max = sum.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(min >= 4.0 - 0.05 && min <= 4.0 + 0.05, "min {min}");
    assert!(max >= 7.0 - 0.05 && max <= 7.0 + 0.05, "max {max}");

    // Per-decile mass over [4, 7] matches the analytic trapezoid within
    // half a percent.
    for decile in 0..10 {
        let lo = 4.0 + 0.3 * f64::from(decile);
        let hi = lo + 0.3;
        let count = sum
            .iter()
            .filter(|&&v| v >= lo && (v < hi || (decile == 9 && v <= hi)))
            .count();
        let observed = count as f64 / n as f64;
        let expected = trapezoid_mass(lo, hi);
        assert!(
            (observed - expected).abs() < 0.005,
            "decile [{lo}, {hi}): observed {observed:.4}, expected {expected:.4}"
        );
    }
}

#[test]
fn test_combine_handles_unequal_lengths() {
    let left = uniform_samples(0.0, 1.0, 17);
    let right = uniform_samples(10.0, 11.0, 1_003);

    let mut rng = fastrand::Rng::with_seed(7);
    let result = monte_carlo::combine(&mut rng, &left, &right, PairwiseOp::Add, 10_000).unwrap();

    assert_eq!(result.len(), 10_000);
    assert!(result.iter().all(|&v| (10.0..=13.0).contains(&v)));
}

#[test]
fn test_combine_subtraction_support() {
    let left = uniform_samples(5.0, 6.0, 100);
    let right = uniform_samples(1.0, 2.0, 100);

    let mut rng = fastrand::Rng::with_seed(7);
    let result = monte_carlo::combine(&mut rng, &left, &right, PairwiseOp::Sub, 10_000).unwrap();

    assert!(result.iter().all(|&v| (3.0..=5.0).contains(&v)));
}

#[test]
fn test_combine_division_avoids_silent_skips() {
    // A zero anywhere in the denominator support eventually fails the
    // whole batch rather than skipping pairs.
    let left = vec![1.0, 2.0];
    let right = vec![0.0, 1.0];

    let mut rng = fastrand::Rng::with_seed(7);
    let result = monte_carlo::combine(&mut rng, &left, &right, PairwiseOp::Div, 10_000);
    assert!(result.is_err());
}
