//! Exact combination of finite discrete distributions.

use crate::distribution::IntPmf;
use crate::error::Result;
use crate::ops::PairwiseOp;

/// Convolves two finite mass functions under `op`: every support pair
/// `(v1, p1) x (v2, p2)` contributes mass `p1 * p2` at `op(v1, v2)`, and
/// pairs landing on the same result value have their masses summed, so no
/// two result points share a value.
///
/// # Errors
///
/// Returns [`Error::DivisionByZero`](crate::Error::DivisionByZero) when `op`
/// is division and the right support contains zero — the pair is never
/// silently excluded.
///
/// # Examples
///
/// ```
/// use stoex::{convolve, IntPmf, PairwiseOp};
///
/// let die = IntPmf::from_points([(1, 0.5), (2, 0.5)]);
/// let sum = convolve::convolve(&die, &die, PairwiseOp::Add).unwrap();
/// assert!((sum.probability(3) - 0.5).abs() < 1e-12);
/// ```
pub fn convolve(left: &IntPmf, right: &IntPmf, op: PairwiseOp) -> Result<IntPmf> {
    let mut result = IntPmf::new();
    for &(v1, p1) in left.points() {
        for &(v2, p2) in right.points() {
            result.insert(op.apply_int(v1, v2)?, p1 * p2);
        }
    }
    Ok(result)
}
