//! Drawing i.i.d. samples from distribution values.

use parking_lot::Mutex;

use crate::distribution::{Distribution, IntPmf};
use crate::error::Result;
use crate::expand;
use crate::rng_util;

/// Default number of samples materialized when an operator falls back to
/// sampling. One named default instead of the assortment of per-call-site
/// constants; override per [`Sampler`] or per call.
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Draws i.i.d. samples from a single distribution.
///
/// The generator is owned by the sampler and locked per draw, so sampling
/// works through `&self`. Construct [`with_seed`](Sampler::with_seed) for
/// reproducible sequences.
///
/// # Examples
///
/// ```
/// use stoex::{Distribution, Sampler};
///
/// let sampler = Sampler::with_seed(42);
/// let dist = Distribution::normal(0.0, 1.0).unwrap();
/// let samples = sampler.draw(&dist).unwrap();
/// assert_eq!(samples.len(), stoex::DEFAULT_SAMPLE_COUNT);
/// ```
pub struct Sampler {
    rng: Mutex<fastrand::Rng>,
    sample_count: usize,
}

impl Sampler {
    /// Creates a sampler with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }

    /// Creates a sampler with a fixed seed for reproducibility.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
            sample_count: DEFAULT_SAMPLE_COUNT,
        }
    }

    /// Sets the number of samples drawn by [`draw`](Self::draw) and by the
    /// operator fallbacks that use this sampler.
    #[must_use]
    pub fn sample_count(mut self, count: usize) -> Self {
        self.sample_count = count;
        self
    }

    /// Returns the configured sample count.
    #[must_use]
    pub fn count(&self) -> usize {
        self.sample_count
    }

    /// Draws [`count`](Self::count) samples from `dist`.
    ///
    /// # Errors
    ///
    /// See [`samples`](Self::samples).
    pub fn draw(&self, dist: &Distribution) -> Result<Vec<f64>> {
        self.samples(dist, self.sample_count)
    }

    /// Draws `n` samples from `dist`.
    ///
    /// Parametric continuous kinds use their variate transform (Box-Muller
    /// for Normal, inverse-CDF for Exponential, Marsaglia-Tsang / Weibull
    /// rejection for Gamma, exponentiated Normal for Lognormal). The
    /// materialized carriers return their stored values unchanged, whatever
    /// `n` says. Discrete kinds are expanded to a mass function and sampled
    /// by CDF inversion.
    ///
    /// # Errors
    ///
    /// Propagates expansion errors for discrete kinds.
    pub fn samples(&self, dist: &Distribution, n: usize) -> Result<Vec<f64>> {
        let mut rng = self.rng.lock();
        match dist {
            Distribution::Normal { mu, sigma } => Ok((0..n)
                .map(|_| mu + sigma * rng_util::standard_normal(&mut rng))
                .collect()),
            Distribution::Exponential { lambda } => Ok((0..n)
                .map(|_| rng_util::exponential(&mut rng, *lambda))
                .collect()),
            Distribution::Gamma { alpha, theta } => Ok((0..n)
                .map(|_| rng_util::gamma(&mut rng, *alpha, *theta))
                .collect()),
            Distribution::Lognormal { mu, sigma } => Ok((0..n)
                .map(|_| (mu + sigma * rng_util::standard_normal(&mut rng)).exp())
                .collect()),
            // Already materialized: hand back the stored values.
            Distribution::Sampled { values } => Ok(values.clone()),
            Distribution::BoxedPdf { points } => Ok(points.iter().map(|(v, _)| *v).collect()),
            _ => {
                let pmf = expand::to_pmf(dist)?;
                Ok(draw_from_pmf(&mut rng, &pmf, n))
            }
        }
    }

    /// Runs `f` with the locked generator. Lets the Monte Carlo combinator
    /// share this sampler's random stream.
    pub(crate) fn with_rng<T>(&self, f: impl FnOnce(&mut fastrand::Rng) -> T) -> T {
        f(&mut self.rng.lock())
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws `n` values from a finite mass function by inverting its CDF.
#[allow(clippy::cast_precision_loss)]
fn draw_from_pmf(rng: &mut fastrand::Rng, pmf: &IntPmf, n: usize) -> Vec<f64> {
    let points = pmf.points();
    if points.is_empty() {
        return Vec::new();
    }
    let mut cdf = Vec::with_capacity(points.len());
    let mut cumulative = 0.0;
    for (_, p) in points {
        cumulative += p;
        cdf.push(cumulative);
    }

    (0..n)
        .map(|_| {
            let u = rng.f64() * cumulative;
            let idx = cdf.iter().position(|&c| u <= c).unwrap_or(points.len() - 1);
            points[idx].0 as f64
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
mod tests {
    use super::*;

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    #[test]
    fn test_normal_samples_match_parameters() {
        let sampler = Sampler::with_seed(42);
        let dist = Distribution::normal(5.0, 2.0).unwrap();
        let samples = sampler.samples(&dist, 20_000).unwrap();

        let m = mean(&samples);
        let var = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / samples.len() as f64;

        assert!((m - 5.0).abs() < 0.1);
        assert!((var - 4.0).abs() < 0.2);
    }

    #[test]
    fn test_exponential_samples_are_nonnegative() {
        let sampler = Sampler::with_seed(42);
        let dist = Distribution::exponential(1.5).unwrap();
        let samples = sampler.samples(&dist, 10_000).unwrap();

        assert!(samples.iter().all(|&x| x >= 0.0));
        assert!((mean(&samples) - 1.0 / 1.5).abs() < 0.05);
    }

    #[test]
    fn test_lognormal_samples_match_mean() {
        let sampler = Sampler::with_seed(42);
        let dist = Distribution::lognormal(0.0, 0.5).unwrap();
        let samples = sampler.samples(&dist, 20_000).unwrap();

        // E[Lognormal(0, 0.5)] = exp(0.125)
        assert!((mean(&samples) - 0.125_f64.exp()).abs() < 0.05);
        assert!(samples.iter().all(|&x| x > 0.0));
    }

    #[test]
    fn test_materialized_values_returned_unchanged() {
        let sampler = Sampler::with_seed(42);
        let stored = vec![1.0, 2.0, 3.0];
        let dist = Distribution::sampled(stored.clone());

        assert_eq!(sampler.samples(&dist, 99).unwrap(), stored);

        let boxed = Distribution::boxed_pdf(vec![(1.0, 0.5), (2.0, 0.5)]);
        assert_eq!(sampler.samples(&boxed, 99).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_discrete_sampling_by_cdf_inversion() {
        let sampler = Sampler::with_seed(42);
        let dist = Distribution::bernoulli(0.7).unwrap();
        let samples = sampler.samples(&dist, 20_000).unwrap();

        assert!(samples.iter().all(|&x| x == 0.0 || x == 1.0));
        assert!((mean(&samples) - 0.7).abs() < 0.02);
    }

    #[test]
    fn test_seeded_sampling_is_reproducible() {
        let dist = Distribution::normal(0.0, 1.0).unwrap();
        let a = Sampler::with_seed(7).samples(&dist, 100).unwrap();
        let b = Sampler::with_seed(7).samples(&dist, 100).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_count_builder() {
        let sampler = Sampler::with_seed(1).sample_count(500);
        let dist = Distribution::normal(0.0, 1.0).unwrap();
        assert_eq!(sampler.draw(&dist).unwrap().len(), 500);
    }
}
