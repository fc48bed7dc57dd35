//! Subtraction.
//!
//! The only closed form is the Normal difference: means subtract while the
//! variances still add, because the operands are assumed independent. All
//! other same-kind pairs fall back to convolution or Monte Carlo.

use crate::distribution::Distribution;
use crate::error::Result;
use crate::ops::{family_fallback, OpContext, OperatorAlgebra, PairwiseOp};

pub(crate) struct SubOp;

impl OperatorAlgebra for SubOp {
    const PAIRWISE: PairwiseOp = PairwiseOp::Sub;

    fn same_kind(
        ctx: &OpContext<'_>,
        left: &Distribution,
        right: &Distribution,
    ) -> Result<Distribution> {
        match (left, right) {
            (
                Distribution::Normal { mu: m1, sigma: s1 },
                Distribution::Normal { mu: m2, sigma: s2 },
            ) => Distribution::normal(m1 - m2, (s1.powi(2) + s2.powi(2)).sqrt()),
            _ => family_fallback::<Self>(ctx, left, right),
        }
    }

    fn dist_scalar(ctx: &OpContext<'_>, dist: &Distribution, scalar: f64) -> Result<Distribution> {
        match dist {
            Distribution::Normal { mu, sigma } => Distribution::normal(mu - scalar, *sigma),
            _ => {
                let values = ctx.samples_of(dist)?.into_iter().map(|v| v - scalar).collect();
                Ok(Distribution::sampled(values))
            }
        }
    }

    fn scalar_dist(ctx: &OpContext<'_>, scalar: f64, dist: &Distribution) -> Result<Distribution> {
        match dist {
            Distribution::Normal { mu, sigma } => Distribution::normal(scalar - mu, *sigma),
            _ => {
                let values = ctx.samples_of(dist)?.into_iter().map(|v| scalar - v).collect();
                Ok(Distribution::sampled(values))
            }
        }
    }
}
