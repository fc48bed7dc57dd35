//! Error type shared across the crate.
//!
//! The variants partition into four groups: parameter validation (a
//! distribution constructed with an out-of-domain parameter), arithmetic
//! (zero divisors, including ones drawn mid-batch during Monte Carlo),
//! type errors (operand-kind combinations no rule covers, failed coercions)
//! and lookup errors (unresolved variables). All errors propagate to the
//! caller at the point of detection; nothing is recovered internally.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a shape, rate or scale parameter is not strictly positive.
    #[error("invalid {name}: {value} must be strictly positive")]
    NonPositiveParameter {
        /// The parameter name (e.g. `sigma`, `lambda`).
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when a probability parameter falls outside `[0.0, 1.0]`.
    #[error("invalid probability: {0} must be in [0.0, 1.0]")]
    ProbabilityOutOfRange(f64),

    /// Returned when a binomial trial count is zero.
    #[error("invalid trial count: binomial n must be at least 1")]
    ZeroTrialCount,

    /// Returned when a discrete-uniform support is inverted.
    #[error("invalid support bounds: a ({a}) must be less than or equal to b ({b})")]
    InvalidSupportBounds {
        /// The lower bound.
        a: i64,
        /// The upper bound.
        b: i64,
    },

    /// Returned on division by zero, including a zero right-hand support
    /// point during discrete convolution or a zero denominator drawn during
    /// Monte Carlo combination (the whole batch fails, not the one pair).
    #[error("division by zero")]
    DivisionByZero,

    /// Returned when the right-hand side of a modulo operation is zero.
    #[error("modulo by zero")]
    ModuloByZero,

    /// Returned when a sample set handed to the Monte Carlo combinator is empty.
    #[error("Monte Carlo combination requires non-empty sample sets")]
    EmptySamples,

    /// Returned when a value cannot be coerced to a number.
    #[error("cannot coerce {kind} value to a number")]
    NotNumeric {
        /// The kind of the offending value.
        kind: &'static str,
    },

    /// Returned when a value cannot be coerced to a boolean.
    #[error("cannot coerce {kind} value to a boolean")]
    NotBoolean {
        /// The kind of the offending value.
        kind: &'static str,
    },

    /// Returned when no evaluation rule covers the operand-kind pair.
    #[error("unsupported operand kinds for {op}: {left} and {right}")]
    UnsupportedOperands {
        /// The operator symbol.
        op: &'static str,
        /// The kind of the left operand.
        left: &'static str,
        /// The kind of the right operand.
        right: &'static str,
    },

    /// Returned when a continuous distribution is expanded to a mass function.
    #[error("cannot expand {kind} to a probability mass function")]
    NotDiscrete {
        /// The kind of the offending distribution.
        kind: &'static str,
    },

    /// Returned when an if-else condition is neither boolean nor coercible.
    #[error("if-else condition must be boolean, got {found}")]
    NonBooleanCondition {
        /// The kind of the condition value.
        found: &'static str,
    },

    /// Returned when if-else branch categories have no common supertype.
    #[error("incompatible branch types: {then_branch} and {else_branch}")]
    IncompatibleBranches {
        /// Category of the then-branch.
        then_branch: &'static str,
        /// Category of the else-branch.
        else_branch: &'static str,
    },

    /// Returned when a builtin function name is not recognized.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// Returned when a builtin function is called with the wrong arity.
    #[error("{function}() requires exactly {expected} parameter(s), got {got}")]
    ArityMismatch {
        /// The function name.
        function: &'static str,
        /// The number of parameters the function takes.
        expected: usize,
        /// The number of parameters supplied.
        got: usize,
    },

    /// Returned when a variable is not bound in the evaluation environment.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),
}
