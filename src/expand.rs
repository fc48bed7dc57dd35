//! Expansion of analytic discrete distributions into explicit mass functions.

use crate::distribution::{Distribution, IntPmf};
use crate::error::{Error, Result};

/// Truncation bound for Poisson expansion: support is cut at `10 * lambda`.
///
/// The true support is infinite; the tail mass beyond the bound is dropped,
/// trading accuracy for a finite convolution. Raise the factor for more of
/// the tail at a quadratic cost in convolution size.
pub const POISSON_SUPPORT_FACTOR: f64 = 10.0;

/// Expands a discrete distribution into an explicit finite value/probability
/// list. Explicit mass functions pass through unchanged.
///
/// # Errors
///
/// Returns [`Error::NotDiscrete`] for continuous kinds.
///
/// # Examples
///
/// ```
/// use stoex::{expand, Distribution};
///
/// let pmf = expand::to_pmf(&Distribution::bernoulli(0.8).unwrap()).unwrap();
/// assert!((pmf.probability(1) - 0.8).abs() < 1e-12);
/// assert!((pmf.probability(0) - 0.2).abs() < 1e-12);
/// ```
pub fn to_pmf(dist: &Distribution) -> Result<IntPmf> {
    match dist {
        Distribution::Bernoulli { p } => {
            Ok(IntPmf::from_points([(1, *p), (0, 1.0 - p)]))
        }
        Distribution::Binomial { n, p } => {
            let n = *n;
            Ok((0..=n)
                .map(|k| (i64::from(k), binomial_mass(n, *p, k)))
                .collect())
        }
        Distribution::Poisson { lambda } => {
            #[allow(clippy::cast_possible_truncation)]
            let bound = (POISSON_SUPPORT_FACTOR * lambda).floor() as i64;
            let mut pmf = IntPmf::new();
            // p(0) = e^-lambda, p(k) = p(k-1) * lambda / k.
            let mut mass = (-lambda).exp();
            pmf.insert(0, mass);
            for k in 1..=bound {
                #[allow(clippy::cast_precision_loss)]
                {
                    mass *= lambda / k as f64;
                }
                pmf.insert(k, mass);
            }
            Ok(pmf)
        }
        Distribution::DiscreteUniform { a, b } => {
            #[allow(clippy::cast_precision_loss)]
            let probability = 1.0 / (b - a + 1) as f64;
            Ok((*a..=*b).map(|k| (k, probability)).collect())
        }
        Distribution::Pmf(pmf) => Ok(pmf.clone()),
        other => Err(Error::NotDiscrete { kind: other.kind() }),
    }
}

/// Binomial probability mass `C(n, k) p^k (1-p)^(n-k)`, with the coefficient
/// accumulated multiplicatively.
#[allow(clippy::cast_possible_wrap)]
fn binomial_mass(n: u32, p: f64, k: u32) -> f64 {
    let mut coefficient = 1.0;
    for i in 0..k {
        coefficient *= f64::from(n - i) / f64::from(i + 1);
    }
    coefficient * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32)
}
