#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]

//! Evaluation of stochastic expressions whose values may be plain scalars
//! or probability distributions, discrete and continuous alike.
//!
//! For every arithmetic node the engine picks the most precise method it
//! has: an analytic closed form when one exists (`Normal(0,1) + Normal(2,3)`
//! is exactly `Normal(2, sqrt(10))`), exact convolution when both operands
//! have finite discrete support, and Monte Carlo resampling as the last
//! resort for continuous operands. A companion static pass predicts the
//! *category* of a result (scalar, discrete PMF, continuous PDF) without
//! evaluating anything.
//!
//! # Getting Started
//!
//! ```
//! use stoex::{Evaluator, Expr, Distribution, Value};
//!
//! let mut evaluator = Evaluator::with_seed(42);
//! evaluator.set_variable("demand", Distribution::normal(100.0, 15.0).unwrap());
//!
//! // demand * 2 + 50
//! let expr = Expr::add(
//!     Expr::mul(Expr::var("demand"), Expr::Int(2)),
//!     Expr::Int(50),
//! );
//!
//! let result = evaluator.evaluate(&expr).unwrap();
//! assert_eq!(
//!     result,
//!     Value::from(Distribution::normal(250.0, 30.0).unwrap()),
//! );
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Value`] | A scalar (`int`, `double`, `bool`, `string`) or a [`Distribution`]. |
//! | [`Distribution`] | Closed union of parametric and empirical distribution kinds. |
//! | [`Expr`] | The expression tree walked by both passes. |
//! | [`Evaluator`] | Tree-walking evaluation against a variable environment. |
//! | [`Dispatcher`] | Classifies operand pairs and routes them to operator overloads. |
//! | [`Sampler`] | Draws i.i.d. samples; owns the injectable, seedable generator. |
//! | [`TypeInference`] | Static category prediction mirroring the dispatcher. |
//!
//! # Precision ladder
//!
//! | Route | When | Result |
//! |-------|------|--------|
//! | Closed form | Same parametric kind with a known identity, or scalar shift/scale | Parametric distribution |
//! | Convolution | Both operands have finite discrete support | [`IntPmf`] |
//! | Monte Carlo | Any continuous operand without a closed form | `Sampled` values |
//!
//! Closed-form routes are deterministic and bit-stable across repeated
//! evaluation. Monte Carlo routes are reproducible only under a seeded
//! sampler ([`Sampler::with_seed`]); unseeded results agree statistically,
//! not bitwise.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `serde` | `Serialize`/`Deserialize` on the public data model | off |
//! | `tracing` | Structured log events at dispatch and sampling decisions | off |

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod ast;
pub mod convolve;
mod dispatch;
mod distribution;
mod error;
mod eval;
pub mod expand;
mod infer;
pub mod monte_carlo;
mod ops;
mod rng_util;
mod sampler;
mod value;

pub use ast::{BinaryOp, CompareOp, Expr, LogicalOp};
pub use dispatch::Dispatcher;
pub use distribution::{Distribution, IntPmf};
pub use error::{Error, Result};
pub use eval::Evaluator;
pub use infer::{TypeCategory, TypeInference};
pub use ops::PairwiseOp;
pub use sampler::{Sampler, DEFAULT_SAMPLE_COUNT};
pub use value::Value;
