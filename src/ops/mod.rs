//! Per-operator algebra.
//!
//! Each arithmetic operator implements [`OperatorAlgebra`]: the closed-form
//! identities it knows for same-kind operand pairs, its scalar shift/scale
//! rules, and the fallbacks (exact discrete convolution, Monte Carlo
//! combination) everything else routes through. Modulo and power do not fit
//! the shared overload set and keep their own entry points.

pub(crate) mod add;
pub(crate) mod div;
pub(crate) mod mul;
pub(crate) mod pow;
pub(crate) mod rem;
pub(crate) mod sub;

use crate::convolve;
use crate::distribution::{Distribution, IntPmf};
use crate::error::{Error, Result};
use crate::expand;
use crate::monte_carlo;
use crate::sampler::Sampler;

/// The element-wise operation applied per operand pair inside discrete
/// convolution and Monte Carlo combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PairwiseOp {
    /// `left + right`
    Add,
    /// `left - right`
    Sub,
    /// `left * right`
    Mul,
    /// `left / right` (zero divisors are an error, never skipped).
    Div,
}

impl PairwiseOp {
    /// The operator symbol, for error messages.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }

    /// Applies the operation to an integer pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] for a zero right-hand value under
    /// [`Div`](Self::Div).
    pub fn apply_int(self, left: i64, right: i64) -> Result<i64> {
        match self {
            Self::Add => Ok(left + right),
            Self::Sub => Ok(left - right),
            Self::Mul => Ok(left * right),
            Self::Div => {
                if right == 0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }

    /// Applies the operation to a double pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DivisionByZero`] for a zero right-hand value under
    /// [`Div`](Self::Div).
    pub fn apply_double(self, left: f64, right: f64) -> Result<f64> {
        match self {
            Self::Add => Ok(left + right),
            Self::Sub => Ok(left - right),
            Self::Mul => Ok(left * right),
            Self::Div => {
                if right == 0.0 {
                    Err(Error::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }
}

impl std::fmt::Display for PairwiseOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Shared context handed into operator calls: the sampler that materializes
/// continuous operands and drives the Monte Carlo fallback.
pub(crate) struct OpContext<'a> {
    pub(crate) sampler: &'a Sampler,
}

impl OpContext<'_> {
    /// Materializes any distribution into a sample array.
    pub(crate) fn samples_of(&self, dist: &Distribution) -> Result<Vec<f64>> {
        self.sampler.draw(dist)
    }

    /// Monte Carlo-combines two sample arrays into an empirical distribution.
    pub(crate) fn monte_carlo(
        &self,
        op: PairwiseOp,
        left: &[f64],
        right: &[f64],
    ) -> Result<Distribution> {
        let n = self.sampler.count();
        let values = self
            .sampler
            .with_rng(|rng| monte_carlo::combine(rng, left, right, op, n))?;
        Ok(Distribution::sampled(values))
    }
}

/// The overload set every arithmetic operator provides. Defaults encode the
/// no-closed-form fallbacks; operator impls override where an identity
/// exists.
pub(crate) trait OperatorAlgebra {
    /// Element-wise operation for the convolution / Monte Carlo fallbacks.
    const PAIRWISE: PairwiseOp;

    /// `int OP int`
    fn int(left: i64, right: i64) -> Result<i64> {
        Self::PAIRWISE.apply_int(left, right)
    }

    /// `double OP double`
    fn double(left: f64, right: f64) -> Result<f64> {
        Self::PAIRWISE.apply_double(left, right)
    }

    /// Both operands share the same parametric kind. Overrides hold the
    /// closed forms; anything unhandled falls back by family.
    fn same_kind(
        ctx: &OpContext<'_>,
        left: &Distribution,
        right: &Distribution,
    ) -> Result<Distribution> {
        family_fallback::<Self>(ctx, left, right)
    }

    /// Fallback signature: combine two materialized sample arrays.
    fn samples(ctx: &OpContext<'_>, left: &[f64], right: &[f64]) -> Result<Distribution> {
        ctx.monte_carlo(Self::PAIRWISE, left, right)
    }

    /// Continuous distribution OP scalar. The default materializes samples
    /// and applies the scalar element-wise.
    fn dist_scalar(ctx: &OpContext<'_>, dist: &Distribution, scalar: f64) -> Result<Distribution> {
        let values = ctx
            .samples_of(dist)?
            .into_iter()
            .map(|v| Self::double(v, scalar))
            .collect::<Result<Vec<_>>>()?;
        Ok(Distribution::sampled(values))
    }

    /// Scalar OP continuous distribution.
    fn scalar_dist(ctx: &OpContext<'_>, scalar: f64, dist: &Distribution) -> Result<Distribution> {
        let values = ctx
            .samples_of(dist)?
            .into_iter()
            .map(|v| Self::double(scalar, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Distribution::sampled(values))
    }

    /// `IntPMF OP IntPMF`: exact convolution.
    fn pmf_pmf(left: &IntPmf, right: &IntPmf) -> Result<IntPmf> {
        convolve::convolve(left, right, Self::PAIRWISE)
    }

    /// `IntPMF OP int`: element-wise over the support, probabilities kept.
    fn pmf_int(left: &IntPmf, right: i64) -> Result<IntPmf> {
        left.points()
            .iter()
            .map(|&(v, p)| Ok((Self::int(v, right)?, p)))
            .collect()
    }

    /// `int OP IntPMF`: element-wise over the support, probabilities kept.
    fn int_pmf(left: i64, right: &IntPmf) -> Result<IntPmf> {
        right
            .points()
            .iter()
            .map(|&(v, p)| Ok((Self::int(left, v)?, p)))
            .collect()
    }
}

/// Same-kind pairing with no closed form: discrete kinds expand and
/// convolve exactly, continuous kinds materialize and Monte Carlo-combine.
pub(crate) fn family_fallback<A: OperatorAlgebra + ?Sized>(
    ctx: &OpContext<'_>,
    left: &Distribution,
    right: &Distribution,
) -> Result<Distribution> {
    if left.is_discrete() && right.is_discrete() {
        trace_debug!(
            left = left.kind(),
            right = right.kind(),
            "no closed form, expanding to PMFs for exact convolution"
        );
        let left = expand::to_pmf(left)?;
        let right = expand::to_pmf(right)?;
        A::pmf_pmf(&left, &right).map(Distribution::Pmf)
    } else {
        trace_debug!(
            left = left.kind(),
            right = right.kind(),
            "no closed form, falling back to Monte Carlo combination"
        );
        let left = ctx.samples_of(left)?;
        let right = ctx.samples_of(right)?;
        A::samples(ctx, &left, &right)
    }
}
