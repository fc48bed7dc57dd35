//! Tree-walking evaluation.
//!
//! Recursive, synchronous, single-threaded: each node's children are
//! evaluated first, then the node combines them — arithmetic through the
//! [`Dispatcher`], everything else (comparisons, boolean connectives,
//! conditionals, builtin calls) directly here.

use std::collections::HashMap;

use crate::ast::{CompareOp, Expr, LogicalOp};
use crate::dispatch::Dispatcher;
use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::value::Value;

/// Tolerance for `==` / `!=` over doubles.
const EQ_TOLERANCE: f64 = 1e-10;

/// Evaluates expression trees against a variable environment.
///
/// The environment is preloaded with the constants `PI` and `E`.
///
/// # Examples
///
/// ```
/// use stoex::{Evaluator, Expr, Value};
///
/// let evaluator = Evaluator::with_seed(42);
/// // 2 + 3 * 4
/// let expr = Expr::add(
///     Expr::Int(2),
///     Expr::mul(Expr::Int(3), Expr::Int(4)),
/// );
/// assert_eq!(evaluator.evaluate(&expr).unwrap(), Value::Int(14));
/// ```
pub struct Evaluator {
    dispatcher: Dispatcher,
    variables: HashMap<String, Value>,
}

impl Evaluator {
    /// Creates an evaluator with a randomly seeded dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Dispatcher::new())
    }

    /// Creates an evaluator whose Monte Carlo routes are reproducible.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_dispatcher(Dispatcher::with_seed(seed))
    }

    /// Creates an evaluator around an explicitly configured dispatcher.
    #[must_use]
    pub fn with_dispatcher(dispatcher: Dispatcher) -> Self {
        let mut variables = HashMap::new();
        variables.insert("PI".to_owned(), Value::Double(std::f64::consts::PI));
        variables.insert("E".to_owned(), Value::Double(std::f64::consts::E));
        Self {
            dispatcher,
            variables,
        }
    }

    /// Binds `name` for subsequent evaluations.
    pub fn set_variable(&mut self, name: &str, value: impl Into<Value>) {
        self.variables.insert(name.to_owned(), value.into());
    }

    /// Returns the bound value for `name`, if any.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// The dispatcher backing arithmetic nodes.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Evaluates a tree to a single value.
    ///
    /// # Errors
    ///
    /// Propagates every error of the core: validation failures from
    /// distribution constructor nodes, arithmetic and type errors from
    /// operators, and [`Error::UndefinedVariable`] for unbound names.
    pub fn evaluate(&self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Int(v) => Ok(Value::Int(*v)),
            Expr::Double(v) => Ok(Value::Double(*v)),
            Expr::Bool(v) => Ok(Value::Bool(*v)),
            Expr::Str(v) => Ok(Value::Str(v.clone())),
            Expr::Var(name) => self
                .variables
                .get(name)
                .cloned()
                .ok_or_else(|| Error::UndefinedVariable(name.clone())),

            Expr::Normal { mu, sigma } => {
                let mu = self.eval_f64(mu)?;
                let sigma = self.eval_f64(sigma)?;
                Ok(Value::Distribution(Distribution::normal(mu, sigma)?))
            }
            Expr::Exponential { lambda } => {
                let lambda = self.eval_f64(lambda)?;
                Ok(Value::Distribution(Distribution::exponential(lambda)?))
            }
            Expr::Gamma { alpha, theta } => {
                let alpha = self.eval_f64(alpha)?;
                let theta = self.eval_f64(theta)?;
                Ok(Value::Distribution(Distribution::gamma(alpha, theta)?))
            }
            Expr::Lognormal { mu, sigma } => {
                let mu = self.eval_f64(mu)?;
                let sigma = self.eval_f64(sigma)?;
                Ok(Value::Distribution(Distribution::lognormal(mu, sigma)?))
            }
            Expr::Bernoulli { p } => {
                let p = self.eval_f64(p)?;
                Ok(Value::Distribution(Distribution::bernoulli(p)?))
            }
            Expr::Binomial { n, p } => {
                let n = self.eval_int(n)?;
                let p = self.eval_f64(p)?;
                let n = u32::try_from(n).map_err(|_| Error::ZeroTrialCount)?;
                Ok(Value::Distribution(Distribution::binomial(n, p)?))
            }
            Expr::Poisson { lambda } => {
                let lambda = self.eval_f64(lambda)?;
                Ok(Value::Distribution(Distribution::poisson(lambda)?))
            }
            Expr::DiscreteUniform { a, b } => {
                let a = self.eval_int(a)?;
                let b = self.eval_int(b)?;
                Ok(Value::Distribution(Distribution::discrete_uniform(a, b)?))
            }
            Expr::DistributionLiteral(dist) => Ok(Value::Distribution(dist.clone())),

            Expr::Binary { op, left, right } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.dispatcher.apply(*op, &left, &right)
            }
            Expr::Compare { op, left, right } => {
                let left = self.evaluate(left)?.as_f64()?;
                let right = self.evaluate(right)?.as_f64()?;
                Ok(Value::Bool(compare(*op, left, right)))
            }
            Expr::Logical { op, left, right } => {
                let left = self.evaluate(left)?.as_bool()?;
                let right = self.evaluate(right)?.as_bool()?;
                let result = match op {
                    LogicalOp::And => left && right,
                    LogicalOp::Or => left || right,
                    LogicalOp::Xor => left ^ right,
                };
                Ok(Value::Bool(result))
            }
            Expr::IfElse {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.evaluate(condition)?;
                let condition = condition.as_bool().map_err(|_| Error::NonBooleanCondition {
                    found: condition.kind(),
                })?;
                if condition {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }
            Expr::Neg(inner) => Ok(Value::Double(-self.eval_f64(inner)?)),
            Expr::Not(inner) => Ok(Value::Bool(!self.evaluate(inner)?.as_bool()?)),
            Expr::Call { function, args } => self.call(function, args),
        }
    }

    fn eval_f64(&self, expr: &Expr) -> Result<f64> {
        self.evaluate(expr)?.as_f64()
    }

    fn eval_int(&self, expr: &Expr) -> Result<i64> {
        match self.evaluate(expr)? {
            Value::Int(i) => Ok(i),
            other => Err(Error::NotNumeric { kind: other.kind() }),
        }
    }

    fn call(&self, function: &str, args: &[Expr]) -> Result<Value> {
        let unary = |name| self.unary_arg(name, args);
        match function.to_ascii_lowercase().as_str() {
            "sin" => Ok(Value::Double(unary("sin")?.sin())),
            "cos" => Ok(Value::Double(unary("cos")?.cos())),
            "sqrt" => Ok(Value::Double(unary("sqrt")?.sqrt())),
            "abs" => Ok(Value::Double(unary("abs")?.abs())),
            "min" => {
                let (a, b) = self.binary_args("min", args)?;
                Ok(Value::Double(a.min(b)))
            }
            "max" => {
                let (a, b) = self.binary_args("max", args)?;
                Ok(Value::Double(a.max(b)))
            }
            _ => Err(Error::UnknownFunction(function.to_owned())),
        }
    }

    fn unary_arg(&self, function: &'static str, args: &[Expr]) -> Result<f64> {
        if args.len() != 1 {
            return Err(Error::ArityMismatch {
                function,
                expected: 1,
                got: args.len(),
            });
        }
        self.eval_f64(&args[0])
    }

    fn binary_args(&self, function: &'static str, args: &[Expr]) -> Result<(f64, f64)> {
        if args.len() != 2 {
            return Err(Error::ArityMismatch {
                function,
                expected: 2,
                got: args.len(),
            });
        }
        Ok((self.eval_f64(&args[0])?, self.eval_f64(&args[1])?))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(op: CompareOp, left: f64, right: f64) -> bool {
    match op {
        CompareOp::Greater => left > right,
        CompareOp::GreaterEqual => left >= right,
        CompareOp::Less => left < right,
        CompareOp::LessEqual => left <= right,
        CompareOp::Equal => (left - right).abs() < EQ_TOLERANCE,
        CompareOp::NotEqual => (left - right).abs() >= EQ_TOLERANCE,
    }
}
