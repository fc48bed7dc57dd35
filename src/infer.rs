//! Static type inference.
//!
//! Walks the same tree shape as the evaluator but never touches numeric
//! values — only categories. The promotion rules mirror the dispatcher's
//! runtime routing: same-family combinations collapse to the generic
//! `DoublePmf`/`DoublePdf` tags, a distribution paired with a scalar keeps
//! its specific tag, and mixing a discrete with a continuous category
//! promotes to `DoublePdf`.

use std::collections::HashMap;

use crate::ast::{BinaryOp, Expr};
use crate::distribution::Distribution;
use crate::error::{Error, Result};

/// The static category of an expression: a scalar kind, a specific
/// parametric-distribution tag, or one of the generic collapse tags used
/// once specific identity is lost through mixing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeCategory {
    /// Integer scalar.
    Int,
    /// Double scalar.
    Double,
    /// Boolean scalar.
    Bool,
    /// String scalar.
    Str,
    /// `Normal(..)`
    NormalPdf,
    /// `Exponential(..)`
    ExponentialPdf,
    /// `Gamma(..)`
    GammaPdf,
    /// `Lognormal(..)`
    LognormalPdf,
    /// Generic continuous distribution.
    DoublePdf,
    /// `Bernoulli(..)`
    BernoulliPmf,
    /// `Binomial(..)`
    BinomialPmf,
    /// `Poisson(..)`
    PoissonPmf,
    /// `DiscreteUniform(..)`
    DiscreteUniformPmf,
    /// Explicit integer mass function.
    IntPmf,
    /// Generic discrete distribution.
    DoublePmf,
    /// Distribution over booleans, produced by comparing distributions.
    BoolPmf,
}

impl TypeCategory {
    /// The category name, for error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Double => "DOUBLE",
            Self::Bool => "BOOL",
            Self::Str => "STRING",
            Self::NormalPdf => "NORMAL_PDF",
            Self::ExponentialPdf => "EXPONENTIAL_PDF",
            Self::GammaPdf => "GAMMA_PDF",
            Self::LognormalPdf => "LOGNORMAL_PDF",
            Self::DoublePdf => "DOUBLE_PDF",
            Self::BernoulliPmf => "BERNOULLI_PMF",
            Self::BinomialPmf => "BINOMIAL_PMF",
            Self::PoissonPmf => "POISSON_PMF",
            Self::DiscreteUniformPmf => "DISCRETE_UNIFORM_PMF",
            Self::IntPmf => "INT_PMF",
            Self::DoublePmf => "DOUBLE_PMF",
            Self::BoolPmf => "BOOL_PMF",
        }
    }

    /// Returns `true` for the numeric scalar categories.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Int | Self::Double)
    }

    /// Returns `true` for discrete distribution categories.
    #[must_use]
    pub fn is_discrete(self) -> bool {
        matches!(
            self,
            Self::BernoulliPmf
                | Self::BinomialPmf
                | Self::PoissonPmf
                | Self::DiscreteUniformPmf
                | Self::IntPmf
                | Self::DoublePmf
                | Self::BoolPmf
        )
    }

    /// Returns `true` for continuous distribution categories.
    #[must_use]
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Self::NormalPdf
                | Self::ExponentialPdf
                | Self::GammaPdf
                | Self::LognormalPdf
                | Self::DoublePdf
        )
    }

    /// Returns `true` for any distribution category.
    #[must_use]
    pub fn is_distribution(self) -> bool {
        self.is_discrete() || self.is_continuous()
    }

    /// The specific category of a distribution value.
    #[must_use]
    pub fn of_distribution(dist: &Distribution) -> Self {
        match dist {
            Distribution::Normal { .. } => Self::NormalPdf,
            Distribution::Exponential { .. } => Self::ExponentialPdf,
            Distribution::Gamma { .. } => Self::GammaPdf,
            Distribution::Lognormal { .. } => Self::LognormalPdf,
            Distribution::Sampled { .. } | Distribution::BoxedPdf { .. } => Self::DoublePdf,
            Distribution::Bernoulli { .. } => Self::BernoulliPmf,
            Distribution::Binomial { .. } => Self::BinomialPmf,
            Distribution::Poisson { .. } => Self::PoissonPmf,
            Distribution::DiscreteUniform { .. } => Self::DiscreteUniformPmf,
            Distribution::Pmf(_) => Self::IntPmf,
        }
    }
}

/// Infers the category of an expression without evaluating it.
///
/// Holds a variable-name → category environment. Unbound variables default
/// to `Double`, matching the runtime convention that variables are supplied
/// by the surrounding evaluator.
///
/// # Examples
///
/// ```
/// use stoex::{Expr, TypeCategory, TypeInference};
///
/// let inference = TypeInference::new();
/// let expr = Expr::add(
///     Expr::bernoulli(Expr::Double(0.5)),
///     Expr::normal(Expr::Double(0.0), Expr::Double(1.0)),
/// );
/// assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::DoublePdf);
/// ```
#[derive(Default)]
pub struct TypeInference {
    variables: HashMap<String, TypeCategory>,
}

impl TypeInference {
    /// Creates an inference pass with an empty variable environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the category of a variable for subsequent inferences.
    pub fn set_variable_category(&mut self, name: &str, category: TypeCategory) {
        self.variables.insert(name.to_owned(), category);
    }

    /// Infers the category of `expr`.
    ///
    /// # Errors
    ///
    /// Returns type errors for combinations no promotion rule covers, for
    /// non-boolean conditions and for incompatible conditional branches.
    pub fn infer(&self, expr: &Expr) -> Result<TypeCategory> {
        match expr {
            Expr::Int(_) => Ok(TypeCategory::Int),
            Expr::Double(_) => Ok(TypeCategory::Double),
            Expr::Bool(_) => Ok(TypeCategory::Bool),
            Expr::Str(_) => Ok(TypeCategory::Str),
            Expr::Var(name) => Ok(self
                .variables
                .get(name)
                .copied()
                .unwrap_or(TypeCategory::Double)),

            Expr::Normal { .. } => Ok(TypeCategory::NormalPdf),
            Expr::Exponential { .. } => Ok(TypeCategory::ExponentialPdf),
            Expr::Gamma { .. } => Ok(TypeCategory::GammaPdf),
            Expr::Lognormal { .. } => Ok(TypeCategory::LognormalPdf),
            Expr::Bernoulli { .. } => Ok(TypeCategory::BernoulliPmf),
            Expr::Binomial { .. } => Ok(TypeCategory::BinomialPmf),
            Expr::Poisson { .. } => Ok(TypeCategory::PoissonPmf),
            Expr::DiscreteUniform { .. } => Ok(TypeCategory::DiscreteUniformPmf),
            Expr::DistributionLiteral(dist) => Ok(TypeCategory::of_distribution(dist)),

            Expr::Binary { op, left, right } => {
                let left = self.infer(left)?;
                let right = self.infer(right)?;
                infer_arithmetic(*op, left, right)
            }
            Expr::Compare { left, right, .. } => {
                let left = self.infer(left)?;
                let right = self.infer(right)?;
                if left.is_distribution() || right.is_distribution() {
                    Ok(TypeCategory::BoolPmf)
                } else {
                    Ok(TypeCategory::Bool)
                }
            }
            Expr::Logical { left, right, .. } => {
                for side in [self.infer(left)?, self.infer(right)?] {
                    if side.is_distribution() {
                        return Err(Error::NotBoolean { kind: side.name() });
                    }
                }
                Ok(TypeCategory::Bool)
            }
            Expr::IfElse {
                condition,
                then_branch,
                else_branch,
            } => {
                let condition = self.infer(condition)?;
                let then_branch = self.infer(then_branch)?;
                let else_branch = self.infer(else_branch)?;

                // A distribution-valued condition makes the whole node
                // uncertain; a scalar condition must be boolean.
                if !condition.is_distribution() && condition != TypeCategory::Bool {
                    return Err(Error::NonBooleanCondition {
                        found: condition.name(),
                    });
                }
                promote(then_branch, else_branch)
            }
            Expr::Neg(inner) => {
                let inner = self.infer(inner)?;
                if inner.is_numeric() {
                    Ok(TypeCategory::Double)
                } else {
                    Err(Error::NotNumeric { kind: inner.name() })
                }
            }
            Expr::Not(inner) => {
                let inner = self.infer(inner)?;
                if inner.is_distribution() {
                    Err(Error::NotBoolean { kind: inner.name() })
                } else {
                    Ok(TypeCategory::Bool)
                }
            }
            Expr::Call { function, args } => self.infer_call(function, args),
        }
    }

    fn infer_call(&self, function: &str, args: &[Expr]) -> Result<TypeCategory> {
        let (name, expected): (&'static str, usize) =
            match function.to_ascii_lowercase().as_str() {
                "sin" => ("sin", 1),
                "cos" => ("cos", 1),
                "sqrt" => ("sqrt", 1),
                "abs" => ("abs", 1),
                "min" => ("min", 2),
                "max" => ("max", 2),
                _ => return Err(Error::UnknownFunction(function.to_owned())),
            };
        if args.len() != expected {
            return Err(Error::ArityMismatch {
                function: name,
                expected,
                got: args.len(),
            });
        }
        for arg in args {
            let category = self.infer(arg)?;
            if category.is_distribution() {
                return Err(Error::NotNumeric {
                    kind: category.name(),
                });
            }
        }
        Ok(TypeCategory::Double)
    }
}

fn infer_arithmetic(op: BinaryOp, left: TypeCategory, right: TypeCategory) -> Result<TypeCategory> {
    let type_error = || {
        Err(Error::UnsupportedOperands {
            op: op.symbol(),
            left: left.name(),
            right: right.name(),
        })
    };

    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            // Same family collapses to the generic tag.
            if left.is_discrete() && right.is_discrete() {
                return Ok(TypeCategory::DoublePmf);
            }
            if left.is_continuous() && right.is_continuous() {
                return Ok(TypeCategory::DoublePdf);
            }
            // A scalar shifts or scales the distribution in place: the
            // specific tag survives.
            if left.is_distribution() && right.is_numeric() {
                return Ok(left);
            }
            if left.is_numeric() && right.is_distribution() {
                return Ok(right);
            }
            // Discrete mixed with continuous promotes to a density.
            if left.is_distribution() && right.is_distribution() {
                return Ok(TypeCategory::DoublePdf);
            }
            if left.is_numeric() && right.is_numeric() {
                if left == TypeCategory::Double || right == TypeCategory::Double {
                    return Ok(TypeCategory::Double);
                }
                return Ok(TypeCategory::Int);
            }
            type_error()
        }
        BinaryOp::Rem => {
            if left.is_distribution() || right.is_distribution() {
                return type_error();
            }
            if left.is_numeric() && right.is_numeric() {
                if left == TypeCategory::Int && right == TypeCategory::Int {
                    return Ok(TypeCategory::Int);
                }
                return Ok(TypeCategory::Double);
            }
            type_error()
        }
        BinaryOp::Pow => {
            if left.is_distribution() {
                // Distribution base with a numeric exponent keeps its tag.
                if right.is_numeric() {
                    return Ok(left);
                }
                return type_error();
            }
            if left.is_numeric() && right.is_numeric() {
                if left == TypeCategory::Int && right == TypeCategory::Int {
                    return Ok(TypeCategory::Int);
                }
                return Ok(TypeCategory::Double);
            }
            type_error()
        }
    }
}

/// Least common supertype of two branch categories.
fn promote(left: TypeCategory, right: TypeCategory) -> Result<TypeCategory> {
    if left == right {
        return Ok(left);
    }
    if left.is_distribution() || right.is_distribution() {
        if left.is_continuous() || right.is_continuous() {
            return Ok(TypeCategory::DoublePdf);
        }
        return Ok(TypeCategory::DoublePmf);
    }
    if left.is_numeric() && right.is_numeric() {
        if left == TypeCategory::Double || right == TypeCategory::Double {
            return Ok(TypeCategory::Double);
        }
        return Ok(TypeCategory::Int);
    }
    Err(Error::IncompatibleBranches {
        then_branch: left.name(),
        else_branch: right.name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bernoulli() -> Expr {
        Expr::bernoulli(Expr::Double(0.5))
    }

    fn normal() -> Expr {
        Expr::normal(Expr::Double(0.0), Expr::Double(1.0))
    }

    fn poisson() -> Expr {
        Expr::poisson(Expr::Double(2.0))
    }

    #[test]
    fn test_literals() {
        let inference = TypeInference::new();
        assert_eq!(inference.infer(&Expr::Int(42)).unwrap(), TypeCategory::Int);
        assert_eq!(
            inference.infer(&Expr::Double(3.14)).unwrap(),
            TypeCategory::Double
        );
        assert_eq!(
            inference.infer(&Expr::Bool(true)).unwrap(),
            TypeCategory::Bool
        );
        assert_eq!(
            inference.infer(&Expr::Str("x".into())).unwrap(),
            TypeCategory::Str
        );
    }

    #[test]
    fn test_constructor_nodes_keep_specific_tags() {
        let inference = TypeInference::new();
        assert_eq!(
            inference.infer(&normal()).unwrap(),
            TypeCategory::NormalPdf
        );
        assert_eq!(
            inference.infer(&bernoulli()).unwrap(),
            TypeCategory::BernoulliPmf
        );
    }

    #[test]
    fn test_discrete_plus_continuous_promotes_to_pdf() {
        let inference = TypeInference::new();
        let expr = Expr::add(bernoulli(), normal());
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::DoublePdf);
    }

    #[test]
    fn test_discrete_pair_collapses_to_pmf() {
        let inference = TypeInference::new();
        let expr = Expr::add(bernoulli(), poisson());
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::DoublePmf);
    }

    #[test]
    fn test_scalar_preserves_specific_tag() {
        let inference = TypeInference::new();
        let expr = Expr::add(normal(), Expr::Int(3));
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::NormalPdf);

        let expr = Expr::mul(Expr::Double(2.0), poisson());
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::PoissonPmf);
    }

    #[test]
    fn test_numeric_promotion() {
        let inference = TypeInference::new();
        assert_eq!(
            inference
                .infer(&Expr::add(Expr::Int(2), Expr::Int(3)))
                .unwrap(),
            TypeCategory::Int
        );
        assert_eq!(
            inference
                .infer(&Expr::add(Expr::Int(2), Expr::Double(3.0)))
                .unwrap(),
            TypeCategory::Double
        );
    }

    #[test]
    fn test_comparison_over_distribution_is_bool_pmf() {
        let inference = TypeInference::new();
        let expr = Expr::compare(crate::ast::CompareOp::Greater, normal(), Expr::Int(0));
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::BoolPmf);

        let expr = Expr::compare(crate::ast::CompareOp::Greater, Expr::Int(5), Expr::Int(3));
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::Bool);
    }

    #[test]
    fn test_conditional_promotion() {
        let inference = TypeInference::new();
        // true ? Bernoulli(0.5) : Poisson(1.0) -> both discrete
        let expr = Expr::if_else(Expr::Bool(true), bernoulli(), poisson());
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::DoublePmf);

        // A continuous branch promotes the pair to a density.
        let expr = Expr::if_else(Expr::Bool(true), bernoulli(), normal());
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::DoublePdf);
    }

    #[test]
    fn test_conditional_condition_must_be_boolean() {
        let inference = TypeInference::new();
        let expr = Expr::if_else(Expr::Int(1), Expr::Int(1), Expr::Int(0));
        assert!(matches!(
            inference.infer(&expr),
            Err(Error::NonBooleanCondition { found: "INT" })
        ));

        // A distribution condition is allowed and promotes the branches.
        let expr = Expr::if_else(bernoulli(), Expr::Int(1), Expr::Int(0));
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::Int);
    }

    #[test]
    fn test_incompatible_branches() {
        let inference = TypeInference::new();
        let expr = Expr::if_else(Expr::Bool(true), Expr::Str("a".into()), Expr::Int(1));
        assert!(matches!(
            inference.infer(&expr),
            Err(Error::IncompatibleBranches { .. })
        ));
    }

    #[test]
    fn test_modulo_rejects_distributions() {
        let inference = TypeInference::new();
        let expr = Expr::binary(BinaryOp::Rem, normal(), Expr::Int(2));
        assert!(matches!(
            inference.infer(&expr),
            Err(Error::UnsupportedOperands { op: "%", .. })
        ));
    }

    #[test]
    fn test_power_keeps_distribution_base_tag() {
        let inference = TypeInference::new();
        let expr = Expr::binary(BinaryOp::Pow, normal(), Expr::Int(2));
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::NormalPdf);

        let expr = Expr::binary(BinaryOp::Pow, Expr::Int(2), normal());
        assert!(matches!(
            inference.infer(&expr),
            Err(Error::UnsupportedOperands { .. })
        ));
    }

    #[test]
    fn test_variable_environment() {
        let mut inference = TypeInference::new();
        inference.set_variable_category("load", TypeCategory::NormalPdf);

        let expr = Expr::add(Expr::var("load"), Expr::Int(1));
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::NormalPdf);

        // Unbound variables default to Double.
        let expr = Expr::var("unknown");
        assert_eq!(inference.infer(&expr).unwrap(), TypeCategory::Double);
    }

    #[test]
    fn test_string_mixed_with_distribution_is_type_error() {
        let inference = TypeInference::new();
        let expr = Expr::add(Expr::Str("a".into()), normal());
        assert!(matches!(
            inference.infer(&expr),
            Err(Error::UnsupportedOperands { .. })
        ));
    }
}
