//! Multiplication.
//!
//! The product of independent Lognormals is again Lognormal (log-domain
//! additivity). There is no closed form for Normal x Normal — that pair goes
//! through Monte Carlo like every other continuous product. Scaling a Normal
//! by a scalar scales the mean and takes the deviation through the absolute
//! value.

use crate::distribution::Distribution;
use crate::error::Result;
use crate::ops::{family_fallback, OpContext, OperatorAlgebra, PairwiseOp};

pub(crate) struct MulOp;

impl OperatorAlgebra for MulOp {
    const PAIRWISE: PairwiseOp = PairwiseOp::Mul;

    fn same_kind(
        ctx: &OpContext<'_>,
        left: &Distribution,
        right: &Distribution,
    ) -> Result<Distribution> {
        match (left, right) {
            (
                Distribution::Lognormal { mu: m1, sigma: s1 },
                Distribution::Lognormal { mu: m2, sigma: s2 },
            ) => Distribution::lognormal(m1 + m2, (s1.powi(2) + s2.powi(2)).sqrt()),
            _ => family_fallback::<Self>(ctx, left, right),
        }
    }

    fn dist_scalar(ctx: &OpContext<'_>, dist: &Distribution, scalar: f64) -> Result<Distribution> {
        match dist {
            Distribution::Normal { mu, sigma } => {
                Distribution::normal(mu * scalar, sigma * scalar.abs())
            }
            _ => {
                let values = ctx.samples_of(dist)?.into_iter().map(|v| v * scalar).collect();
                Ok(Distribution::sampled(values))
            }
        }
    }

    fn scalar_dist(ctx: &OpContext<'_>, scalar: f64, dist: &Distribution) -> Result<Distribution> {
        Self::dist_scalar(ctx, dist, scalar)
    }
}
