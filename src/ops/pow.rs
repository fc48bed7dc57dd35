//! Exponentiation.
//!
//! `int ^ int` is computed in doubles and truncated back, so negative
//! exponents collapse to zero; `double ^ double` is plain `powf`. A
//! distribution base with a
//! numeric scalar exponent raises every materialized sample of the base to
//! that power — there is no closed form, discrete bases included. A
//! distribution exponent is a type error.

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::monte_carlo;
use crate::sampler::Sampler;
use crate::value::Value;

pub(crate) fn apply(sampler: &Sampler, left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (_, Value::Distribution(_)) => Err(Error::UnsupportedOperands {
            op: "^",
            left: left.kind(),
            right: right.kind(),
        }),
        (Value::Distribution(base), Value::Int(_) | Value::Double(_)) => {
            let exponent = right.as_f64()?;
            let samples = sampler.draw(base)?;
            Ok(Value::Distribution(Distribution::sampled(
                monte_carlo::power(&samples, exponent),
            )))
        }
        (Value::Distribution(_), _) => Err(Error::UnsupportedOperands {
            op: "^",
            left: left.kind(),
            right: right.kind(),
        }),
        (Value::Int(base), Value::Int(exponent)) => Ok(Value::Int(int_pow(*base, *exponent))),
        _ => {
            let base = left.as_f64()?;
            let exponent = right.as_f64()?;
            Ok(Value::Double(base.powf(exponent)))
        }
    }
}

/// Integer power computed in doubles and truncated, so `2 ^ -1 == 0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn int_pow(base: i64, exponent: i64) -> i64 {
    (base as f64).powf(exponent as f64) as i64
}
