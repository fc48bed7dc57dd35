//! Operand classification and routing.
//!
//! [`Dispatcher::apply`] classifies both operands of an arithmetic node and
//! routes them to the matching overload of the operator's algebra, in
//! priority order: same-parametric-kind closed forms first, then the
//! parametric scalar shift/scale rules, then the exact discrete convolution
//! route, then Monte Carlo materialization, and finally plain scalar
//! arithmetic over numerically-coerced operands. It is a pure function of
//! its inputs and the chosen operator.

use crate::ast::BinaryOp;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::expand;
use crate::ops::add::AddOp;
use crate::ops::div::DivOp;
use crate::ops::mul::MulOp;
use crate::ops::sub::SubOp;
use crate::ops::{pow, rem, OpContext, OperatorAlgebra};
use crate::sampler::Sampler;
use crate::value::Value;

/// Routes operand pairs to operator overloads.
///
/// Owns the [`Sampler`] that materializes continuous operands, so seeding
/// the dispatcher makes every Monte Carlo route reproducible.
///
/// # Examples
///
/// ```
/// use stoex::{BinaryOp, Dispatcher, Distribution, Value};
///
/// let dispatcher = Dispatcher::with_seed(42);
/// let left = Value::from(Distribution::normal(0.0, 1.0).unwrap());
/// let right = Value::from(Distribution::normal(2.0, 3.0).unwrap());
///
/// let result = dispatcher.apply(BinaryOp::Add, &left, &right).unwrap();
/// let expected = Distribution::normal(2.0, 10.0_f64.sqrt()).unwrap();
/// assert_eq!(result, Value::from(expected));
/// ```
pub struct Dispatcher {
    sampler: Sampler,
}

impl Dispatcher {
    /// Creates a dispatcher with a randomly seeded sampler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sampler: Sampler::new(),
        }
    }

    /// Creates a dispatcher whose sampling routes are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            sampler: Sampler::with_seed(seed),
        }
    }

    /// Creates a dispatcher around an explicitly configured sampler.
    #[must_use]
    pub fn with_sampler(sampler: Sampler) -> Self {
        Self { sampler }
    }

    /// The sampler backing the Monte Carlo routes.
    #[must_use]
    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Applies `op` to two evaluated operands.
    ///
    /// # Errors
    ///
    /// Propagates validation, arithmetic and type errors from the routed
    /// overload; operand pairs no rule covers raise
    /// [`Error::UnsupportedOperands`].
    pub fn apply(&self, op: BinaryOp, left: &Value, right: &Value) -> Result<Value> {
        match op {
            BinaryOp::Add => self.dispatch::<AddOp>("+", left, right),
            BinaryOp::Sub => self.dispatch::<SubOp>("-", left, right),
            BinaryOp::Mul => self.dispatch::<MulOp>("*", left, right),
            BinaryOp::Div => self.dispatch::<DivOp>("/", left, right),
            // Modulo and power have their own, narrower rule sets.
            BinaryOp::Rem => rem::apply(left, right),
            BinaryOp::Pow => pow::apply(&self.sampler, left, right),
        }
    }

    fn dispatch<A: OperatorAlgebra>(
        &self,
        symbol: &'static str,
        left: &Value,
        right: &Value,
    ) -> Result<Value> {
        let ctx = OpContext {
            sampler: &self.sampler,
        };
        match (left, right) {
            (Value::Distribution(l), Value::Distribution(r)) => {
                if l.same_parametric_kind(r) {
                    A::same_kind(&ctx, l, r).map(Value::Distribution)
                } else if l.is_discrete() && r.is_discrete() {
                    // Mixed discrete kinds expand and convolve exactly.
                    let l = expand::to_pmf(l)?;
                    let r = expand::to_pmf(r)?;
                    A::pmf_pmf(&l, &r)
                        .map(Distribution::Pmf)
                        .map(Value::Distribution)
                } else {
                    // Both continuous, or discrete mixed with continuous:
                    // materialize both sides and combine by Monte Carlo.
                    let l = ctx.samples_of(l)?;
                    let r = ctx.samples_of(r)?;
                    A::samples(&ctx, &l, &r).map(Value::Distribution)
                }
            }
            (Value::Distribution(dist), scalar) => {
                scalar_route::<A>(symbol, dist, scalar, Side::DistLeft, &ctx)
            }
            (scalar, Value::Distribution(dist)) => {
                scalar_route::<A>(symbol, dist, scalar, Side::DistRight, &ctx)
            }
            (Value::Int(l), Value::Int(r)) => A::int(*l, *r).map(Value::Int),
            _ => {
                // Last resort: coerce both operands to numbers.
                let type_error = || Error::UnsupportedOperands {
                    op: symbol,
                    left: left.kind(),
                    right: right.kind(),
                };
                let l = left.as_f64().map_err(|_| type_error())?;
                let r = right.as_f64().map_err(|_| type_error())?;
                A::double(l, r).map(Value::Double)
            }
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Distribution paired with a scalar: integer scalars reach discrete
/// supports element-wise, numeric scalars reach continuous kinds through
/// the shift/scale rules. Booleans and strings never pair with a
/// distribution.
fn scalar_route<A: OperatorAlgebra>(
    symbol: &'static str,
    dist: &Distribution,
    scalar: &Value,
    side: Side,
    ctx: &OpContext<'_>,
) -> Result<Value> {
    let type_error = || {
        Err(Error::UnsupportedOperands {
            op: symbol,
            left: match side {
                Side::DistLeft => dist.kind(),
                Side::DistRight => scalar.kind(),
            },
            right: match side {
                Side::DistLeft => scalar.kind(),
                Side::DistRight => dist.kind(),
            },
        })
    };

    if dist.is_discrete() {
        match scalar {
            Value::Int(i) => {
                let pmf = expand::to_pmf(dist)?;
                let result = match side {
                    Side::DistLeft => A::pmf_int(&pmf, *i)?,
                    Side::DistRight => A::int_pmf(*i, &pmf)?,
                };
                Ok(Value::Distribution(Distribution::Pmf(result)))
            }
            _ => type_error(),
        }
    } else {
        match scalar {
            Value::Int(_) | Value::Double(_) => {
                let s = scalar.as_f64()?;
                let result = match side {
                    Side::DistLeft => A::dist_scalar(ctx, dist, s)?,
                    Side::DistRight => A::scalar_dist(ctx, s, dist)?,
                };
                Ok(Value::Distribution(result))
            }
            _ => type_error(),
        }
    }
}

/// Which side of the operator the distribution operand sits on.
#[derive(Clone, Copy)]
enum Side {
    DistLeft,
    DistRight,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::IntPmf;

    fn dist(d: Distribution) -> Value {
        Value::Distribution(d)
    }

    #[test]
    fn test_scalar_int_arithmetic() {
        let dispatcher = Dispatcher::with_seed(1);
        assert_eq!(
            dispatcher
                .apply(BinaryOp::Add, &Value::Int(2), &Value::Int(3))
                .unwrap(),
            Value::Int(5)
        );
        assert_eq!(
            dispatcher
                .apply(BinaryOp::Div, &Value::Int(7), &Value::Int(2))
                .unwrap(),
            Value::Int(3)
        );
    }

    #[test]
    fn test_scalar_coercion_fallback() {
        let dispatcher = Dispatcher::with_seed(1);
        // bool -> 1.0, numeric string -> double
        assert_eq!(
            dispatcher
                .apply(BinaryOp::Add, &Value::Bool(true), &Value::Int(1))
                .unwrap(),
            Value::Double(2.0)
        );
        assert_eq!(
            dispatcher
                .apply(BinaryOp::Mul, &Value::from("2.5"), &Value::Int(2))
                .unwrap(),
            Value::Double(5.0)
        );
    }

    #[test]
    fn test_failed_coercion_names_both_kinds() {
        let dispatcher = Dispatcher::with_seed(1);
        let result = dispatcher.apply(BinaryOp::Add, &Value::from("pony"), &Value::Int(1));
        assert!(matches!(
            result,
            Err(Error::UnsupportedOperands {
                op: "+",
                left: "string",
                right: "int",
            })
        ));
    }

    #[test]
    fn test_same_kind_closed_form_route() {
        let dispatcher = Dispatcher::with_seed(1);
        let result = dispatcher
            .apply(
                BinaryOp::Add,
                &dist(Distribution::poisson(1.5).unwrap()),
                &dist(Distribution::poisson(2.5).unwrap()),
            )
            .unwrap();
        assert_eq!(result, dist(Distribution::poisson(4.0).unwrap()));
    }

    #[test]
    fn test_mixed_discrete_route_convolves() {
        let dispatcher = Dispatcher::with_seed(1);
        let pmf = IntPmf::from_points([(0, 0.2), (1, 0.8)]);
        let result = dispatcher
            .apply(
                BinaryOp::Add,
                &dist(Distribution::Pmf(pmf)),
                &dist(Distribution::discrete_uniform(1, 2).unwrap()),
            )
            .unwrap();

        let Value::Distribution(Distribution::Pmf(result)) = result else {
            panic!("expected an explicit PMF");
        };
        assert_eq!(result.len(), 3);
        assert!((result.probability(1) - 0.1).abs() < 1e-12);
        assert!((result.probability(2) - 0.5).abs() < 1e-12);
        assert!((result.probability(3) - 0.4).abs() < 1e-12);
        assert!((result.total_mass() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pmf_scalar_route() {
        let dispatcher = Dispatcher::with_seed(1);
        let pmf = IntPmf::from_points([(1, 0.5), (2, 0.5)]);
        let result = dispatcher
            .apply(BinaryOp::Add, &dist(Distribution::Pmf(pmf)), &Value::Int(10))
            .unwrap();

        let Value::Distribution(Distribution::Pmf(result)) = result else {
            panic!("expected an explicit PMF");
        };
        assert!((result.probability(11) - 0.5).abs() < 1e-12);
        assert!((result.probability(12) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_continuous_generic_scalar_route() {
        // Exponential has no scalar closed form; the route materializes
        // samples and shifts them.
        let dispatcher = Dispatcher::with_seed(42);
        let result = dispatcher
            .apply(
                BinaryOp::Add,
                &dist(Distribution::exponential(1.0).unwrap()),
                &Value::Double(100.0),
            )
            .unwrap();

        let Value::Distribution(Distribution::Sampled { values }) = result else {
            panic!("expected a sampled distribution");
        };
        assert!(values.iter().all(|&v| v >= 100.0));
    }

    #[test]
    fn test_bool_with_distribution_is_type_error() {
        let dispatcher = Dispatcher::with_seed(1);
        let result = dispatcher.apply(
            BinaryOp::Add,
            &Value::Bool(true),
            &dist(Distribution::normal(0.0, 1.0).unwrap()),
        );
        assert!(matches!(result, Err(Error::UnsupportedOperands { .. })));
    }

    #[test]
    fn test_double_with_discrete_is_type_error() {
        let dispatcher = Dispatcher::with_seed(1);
        let result = dispatcher.apply(
            BinaryOp::Mul,
            &dist(Distribution::bernoulli(0.5).unwrap()),
            &Value::Double(0.5),
        );
        assert!(matches!(result, Err(Error::UnsupportedOperands { .. })));
    }
}
