//! Addition.
//!
//! Closed forms for independent operands: Normal sums add means and combine
//! deviations in quadrature; equal-rate Exponentials sum to a Gamma;
//! equal-scale Gammas add shapes; Poissons always add rates; equal-p
//! Bernoulli/Binomial pairs add trial counts. Everything else falls back to
//! exact convolution (discrete) or Monte Carlo (continuous).

use crate::distribution::Distribution;
use crate::error::Result;
use crate::ops::{family_fallback, OpContext, OperatorAlgebra, PairwiseOp};

pub(crate) struct AddOp;

impl OperatorAlgebra for AddOp {
    const PAIRWISE: PairwiseOp = PairwiseOp::Add;

    #[allow(clippy::float_cmp)]
    fn same_kind(
        ctx: &OpContext<'_>,
        left: &Distribution,
        right: &Distribution,
    ) -> Result<Distribution> {
        use Distribution::{Bernoulli, Binomial, Exponential, Gamma, Normal, Poisson};
        match (left, right) {
            (Normal { mu: m1, sigma: s1 }, Normal { mu: m2, sigma: s2 }) => {
                Distribution::normal(m1 + m2, (s1.powi(2) + s2.powi(2)).sqrt())
            }
            // Closed form exists only for equal rates.
            (Exponential { lambda: l1 }, Exponential { lambda: l2 }) if l1 == l2 => {
                Distribution::gamma(2.0, 1.0 / l1)
            }
            // Closed form exists only for equal scales.
            (Gamma { alpha: a1, theta: t1 }, Gamma { alpha: a2, theta: t2 }) if t1 == t2 => {
                Distribution::gamma(a1 + a2, *t1)
            }
            (Poisson { lambda: l1 }, Poisson { lambda: l2 }) => {
                Distribution::poisson(l1 + l2)
            }
            // Closed form exists only for equal success probabilities.
            (Bernoulli { p: p1 }, Bernoulli { p: p2 }) if p1 == p2 => {
                Distribution::binomial(2, *p1)
            }
            (Binomial { n: n1, p: p1 }, Binomial { n: n2, p: p2 }) if p1 == p2 => {
                Distribution::binomial(n1 + n2, *p1)
            }
            _ => family_fallback::<Self>(ctx, left, right),
        }
    }

    fn dist_scalar(ctx: &OpContext<'_>, dist: &Distribution, scalar: f64) -> Result<Distribution> {
        match dist {
            // Shifting a Normal shifts the mean, the deviation is unchanged.
            Distribution::Normal { mu, sigma } => Distribution::normal(mu + scalar, *sigma),
            _ => {
                let values = ctx.samples_of(dist)?.into_iter().map(|v| v + scalar).collect();
                Ok(Distribution::sampled(values))
            }
        }
    }

    fn scalar_dist(ctx: &OpContext<'_>, scalar: f64, dist: &Distribution) -> Result<Distribution> {
        Self::dist_scalar(ctx, dist, scalar)
    }
}
