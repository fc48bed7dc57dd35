//! Distribution value types.
//!
//! [`Distribution`] is a closed tagged union over every distribution kind the
//! expression language can produce: the parametric continuous and discrete
//! families, plus the non-parametric carriers that operator fallbacks
//! materialize ([`Sampled`](Distribution::Sampled) for raw Monte Carlo
//! output, [`BoxedPdf`](Distribution::BoxedPdf) for explicit discretized
//! densities, [`IntPmf`] for finite mass functions).
//!
//! Distribution values are immutable: operators always build new result
//! objects, never mutate their operands.

use crate::error::{Error, Result};

/// A finite probability mass function over integer values.
///
/// Support points are kept in insertion order and values are unique:
/// inserting an existing value adds the probabilities together, which is
/// exactly the collision rule discrete convolution relies on.
///
/// Probabilities are *not* validated to sum to 1 — callers may construct a
/// mass function whose total differs, and downstream results inherit the
/// discrepancy.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntPmf {
    points: Vec<(i64, f64)>,
}

impl IntPmf {
    /// Creates an empty mass function.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mass function from `(value, probability)` pairs, merging
    /// duplicate values by summing their probabilities.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (i64, f64)>,
    {
        let mut pmf = Self::new();
        for (value, probability) in points {
            pmf.insert(value, probability);
        }
        pmf
    }

    /// Adds probability mass at `value`, merging with an existing point.
    pub fn insert(&mut self, value: i64, probability: f64) {
        if let Some(point) = self.points.iter_mut().find(|(v, _)| *v == value) {
            point.1 += probability;
        } else {
            self.points.push((value, probability));
        }
    }

    /// Returns the support points in insertion order.
    #[must_use]
    pub fn points(&self) -> &[(i64, f64)] {
        &self.points
    }

    /// Returns the probability mass at `value` (0.0 off-support).
    #[must_use]
    pub fn probability(&self, value: i64) -> f64 {
        self.points
            .iter()
            .find(|(v, _)| *v == value)
            .map_or(0.0, |(_, p)| *p)
    }

    /// Returns the number of support points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the mass function has no support points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the sum of all probability masses.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        self.points.iter().map(|(_, p)| p).sum()
    }

    /// Returns the probability-weighted mean of the support.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.points.iter().map(|(v, p)| *v as f64 * p).sum()
    }
}

impl FromIterator<(i64, f64)> for IntPmf {
    fn from_iter<I: IntoIterator<Item = (i64, f64)>>(iter: I) -> Self {
        Self::from_points(iter)
    }
}

/// A probability distribution value.
///
/// Parameter invariants (σ > 0, λ > 0, α > 0, θ > 0, p ∈ [0,1], n ≥ 1,
/// a ≤ b) are enforced by the checked constructors. The non-parametric
/// carriers are unchecked: their mass/density is assumed, not validated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Distribution {
    /// Normal distribution with mean `mu` and standard deviation `sigma`.
    Normal {
        /// Mean.
        mu: f64,
        /// Standard deviation (strictly positive).
        sigma: f64,
    },
    /// Exponential distribution with rate `lambda`.
    Exponential {
        /// Rate (strictly positive).
        lambda: f64,
    },
    /// Gamma distribution with shape `alpha` and scale `theta`.
    Gamma {
        /// Shape (strictly positive).
        alpha: f64,
        /// Scale (strictly positive).
        theta: f64,
    },
    /// Lognormal distribution: `exp(N(mu, sigma))`.
    Lognormal {
        /// Log-domain mean.
        mu: f64,
        /// Log-domain standard deviation (strictly positive).
        sigma: f64,
    },
    /// An empirical continuous distribution given by raw samples.
    Sampled {
        /// The sample values, in draw order.
        values: Vec<f64>,
    },
    /// An explicit discretized density: `(value, probability)` pairs.
    BoxedPdf {
        /// The density sample points.
        points: Vec<(f64, f64)>,
    },
    /// Bernoulli distribution over `{0, 1}` with success probability `p`.
    Bernoulli {
        /// Success probability, in `[0, 1]`.
        p: f64,
    },
    /// Binomial distribution: successes in `n` trials of probability `p`.
    Binomial {
        /// Trial count (at least 1).
        n: u32,
        /// Success probability, in `[0, 1]`.
        p: f64,
    },
    /// Poisson distribution with mean `lambda`.
    Poisson {
        /// Mean (strictly positive).
        lambda: f64,
    },
    /// Uniform distribution over the integers `a..=b`.
    DiscreteUniform {
        /// Inclusive lower bound.
        a: i64,
        /// Inclusive upper bound (at least `a`).
        b: i64,
    },
    /// An explicit finite probability mass function.
    Pmf(IntPmf),
}

impl Distribution {
    /// Creates a normal distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveParameter`] if `sigma <= 0`.
    pub fn normal(mu: f64, sigma: f64) -> Result<Self> {
        ensure_positive("sigma", sigma)?;
        Ok(Self::Normal { mu, sigma })
    }

    /// Creates an exponential distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveParameter`] if `lambda <= 0`.
    pub fn exponential(lambda: f64) -> Result<Self> {
        ensure_positive("lambda", lambda)?;
        Ok(Self::Exponential { lambda })
    }

    /// Creates a gamma distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveParameter`] if `alpha <= 0` or `theta <= 0`.
    pub fn gamma(alpha: f64, theta: f64) -> Result<Self> {
        ensure_positive("alpha", alpha)?;
        ensure_positive("theta", theta)?;
        Ok(Self::Gamma { alpha, theta })
    }

    /// Creates a lognormal distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveParameter`] if `sigma <= 0`.
    pub fn lognormal(mu: f64, sigma: f64) -> Result<Self> {
        ensure_positive("sigma", sigma)?;
        Ok(Self::Lognormal { mu, sigma })
    }

    /// Creates a Bernoulli distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ProbabilityOutOfRange`] if `p` is outside `[0, 1]`.
    pub fn bernoulli(p: f64) -> Result<Self> {
        ensure_probability(p)?;
        Ok(Self::Bernoulli { p })
    }

    /// Creates a binomial distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ZeroTrialCount`] if `n == 0` and
    /// [`Error::ProbabilityOutOfRange`] if `p` is outside `[0, 1]`.
    pub fn binomial(n: u32, p: f64) -> Result<Self> {
        if n == 0 {
            return Err(Error::ZeroTrialCount);
        }
        ensure_probability(p)?;
        Ok(Self::Binomial { n, p })
    }

    /// Creates a Poisson distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositiveParameter`] if `lambda <= 0`.
    pub fn poisson(lambda: f64) -> Result<Self> {
        ensure_positive("lambda", lambda)?;
        Ok(Self::Poisson { lambda })
    }

    /// Creates a discrete uniform distribution over `a..=b`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSupportBounds`] if `a > b`.
    pub fn discrete_uniform(a: i64, b: i64) -> Result<Self> {
        if a > b {
            return Err(Error::InvalidSupportBounds { a, b });
        }
        Ok(Self::DiscreteUniform { a, b })
    }

    /// Wraps raw Monte Carlo output as an empirical distribution.
    #[must_use]
    pub fn sampled(values: Vec<f64>) -> Self {
        Self::Sampled { values }
    }

    /// Wraps an explicit discretized density.
    #[must_use]
    pub fn boxed_pdf(points: Vec<(f64, f64)>) -> Self {
        Self::BoxedPdf { points }
    }

    /// Returns `true` for continuous kinds (parametric or empirical).
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        matches!(
            self,
            Self::Normal { .. }
                | Self::Exponential { .. }
                | Self::Gamma { .. }
                | Self::Lognormal { .. }
                | Self::Sampled { .. }
                | Self::BoxedPdf { .. }
        )
    }

    /// Returns `true` for discrete kinds (parametric or explicit PMF).
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        !self.is_continuous()
    }

    /// Returns `true` when both operands are the *same parametric* kind, the
    /// precondition for the closed-form operator overloads. Non-parametric
    /// carriers never match: they are combined through sampling or
    /// convolution instead.
    #[must_use]
    pub fn same_parametric_kind(&self, other: &Self) -> bool {
        use Distribution::{
            Bernoulli, Binomial, DiscreteUniform, Exponential, Gamma, Lognormal, Normal, Poisson,
        };
        matches!(
            (self, other),
            (Normal { .. }, Normal { .. })
                | (Exponential { .. }, Exponential { .. })
                | (Gamma { .. }, Gamma { .. })
                | (Lognormal { .. }, Lognormal { .. })
                | (Bernoulli { .. }, Bernoulli { .. })
                | (Binomial { .. }, Binomial { .. })
                | (Poisson { .. }, Poisson { .. })
                | (DiscreteUniform { .. }, DiscreteUniform { .. })
        )
    }

    /// A short kind name for error messages and logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Normal { .. } => "Normal",
            Self::Exponential { .. } => "Exponential",
            Self::Gamma { .. } => "Gamma",
            Self::Lognormal { .. } => "Lognormal",
            Self::Sampled { .. } => "SampledDistribution",
            Self::BoxedPdf { .. } => "BoxedPDF",
            Self::Bernoulli { .. } => "Bernoulli",
            Self::Binomial { .. } => "Binomial",
            Self::Poisson { .. } => "Poisson",
            Self::DiscreteUniform { .. } => "DiscreteUniform",
            Self::Pmf(_) => "IntPMF",
        }
    }

    /// Returns the mean of the distribution.
    ///
    /// Analytic per parametric kind; the empirical average for
    /// [`Sampled`](Self::Sampled) (NaN when empty) and the
    /// probability-weighted average for the explicit carriers.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn mean(&self) -> f64 {
        match self {
            Self::Normal { mu, .. } => *mu,
            Self::Exponential { lambda } => 1.0 / lambda,
            Self::Gamma { alpha, theta } => alpha * theta,
            Self::Lognormal { mu, sigma } => (mu + sigma * sigma / 2.0).exp(),
            Self::Sampled { values } => {
                values.iter().sum::<f64>() / values.len() as f64
            }
            Self::BoxedPdf { points } => points.iter().map(|(v, p)| v * p).sum(),
            Self::Bernoulli { p } => *p,
            Self::Binomial { n, p } => f64::from(*n) * p,
            Self::Poisson { lambda } => *lambda,
            Self::DiscreteUniform { a, b } => (*a as f64 + *b as f64) / 2.0,
            Self::Pmf(pmf) => pmf.mean(),
        }
    }
}

impl From<IntPmf> for Distribution {
    fn from(pmf: IntPmf) -> Self {
        Self::Pmf(pmf)
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::NonPositiveParameter { name, value })
    }
}

fn ensure_probability(p: f64) -> Result<()> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(Error::ProbabilityOutOfRange(p))
    }
}
