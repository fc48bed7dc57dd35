//! Division.
//!
//! The ratio of independent Lognormals stays Lognormal (log-domain means
//! subtract). Dividing an `IntPMF` by an integer keeps only the support
//! points that divide evenly — the support narrows, which is lossy and
//! documented as such. Zero divisors are an error everywhere: scalar
//! division, convolution support points and denominators drawn during Monte
//! Carlo all raise rather than skip.

use crate::distribution::{Distribution, IntPmf};
use crate::error::{Error, Result};
use crate::ops::{family_fallback, OpContext, OperatorAlgebra, PairwiseOp};

pub(crate) struct DivOp;

impl OperatorAlgebra for DivOp {
    const PAIRWISE: PairwiseOp = PairwiseOp::Div;

    fn same_kind(
        ctx: &OpContext<'_>,
        left: &Distribution,
        right: &Distribution,
    ) -> Result<Distribution> {
        match (left, right) {
            (
                Distribution::Lognormal { mu: m1, sigma: s1 },
                Distribution::Lognormal { mu: m2, sigma: s2 },
            ) => Distribution::lognormal(m1 - m2, (s1.powi(2) + s2.powi(2)).sqrt()),
            _ => family_fallback::<Self>(ctx, left, right),
        }
    }

    fn dist_scalar(ctx: &OpContext<'_>, dist: &Distribution, scalar: f64) -> Result<Distribution> {
        if scalar == 0.0 {
            return Err(Error::DivisionByZero);
        }
        match dist {
            Distribution::Normal { mu, sigma } => {
                Distribution::normal(mu / scalar, sigma / scalar.abs())
            }
            _ => {
                let values = ctx.samples_of(dist)?.into_iter().map(|v| v / scalar).collect();
                Ok(Distribution::sampled(values))
            }
        }
    }

    fn scalar_dist(ctx: &OpContext<'_>, scalar: f64, dist: &Distribution) -> Result<Distribution> {
        match dist {
            Distribution::Normal { mu, sigma } => {
                Distribution::normal(scalar / mu, scalar.abs() / sigma)
            }
            _ => {
                let values = ctx
                    .samples_of(dist)?
                    .into_iter()
                    .map(|v| Self::PAIRWISE.apply_double(scalar, v))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Distribution::sampled(values))
            }
        }
    }

    /// Keeps only support points divisible evenly by the scalar; the rest of
    /// the mass is dropped.
    fn pmf_int(left: &IntPmf, right: i64) -> Result<IntPmf> {
        if right == 0 {
            return Err(Error::DivisionByZero);
        }
        Ok(left
            .points()
            .iter()
            .filter(|(v, _)| v % right == 0)
            .map(|&(v, p)| (v / right, p))
            .collect())
    }

    /// Mirror rule: keeps only support points that divide the scalar evenly.
    fn int_pmf(left: i64, right: &IntPmf) -> Result<IntPmf> {
        let mut result = IntPmf::new();
        for &(v, p) in right.points() {
            if v == 0 {
                return Err(Error::DivisionByZero);
            }
            if left % v == 0 {
                result.insert(left / v, p);
            }
        }
        Ok(result)
    }
}
