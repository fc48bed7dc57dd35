//! Runtime values of the expression language.

use crate::distribution::Distribution;
use crate::error::{Error, Result};

/// A value produced by evaluating an expression node: a plain scalar or a
/// probability distribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Double(f64),
    /// A boolean.
    Bool(bool),
    /// A string. Numeric strings are coercible in arithmetic positions.
    Str(String),
    /// A probability distribution.
    Distribution(Distribution),
}

impl Value {
    /// A short kind name for error messages and logging.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Distribution(dist) => dist.kind(),
        }
    }

    /// Coerces the value to a double: integers widen, booleans map to
    /// 0.0/1.0, strings are parsed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotNumeric`] for distributions and non-numeric
    /// strings.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Self::Int(i) => Ok(*i as f64),
            Self::Double(d) => Ok(*d),
            Self::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Self::Str(s) => s.parse().map_err(|_| Error::NotNumeric { kind: "string" }),
            Self::Distribution(_) => Err(Error::NotNumeric { kind: self.kind() }),
        }
    }

    /// Coerces the value to a boolean: nonzero numbers are true, the strings
    /// `"true"` (case-insensitive) and `"1"` are true, all other strings
    /// false.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotBoolean`] for distributions.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            Self::Int(i) => Ok(*i != 0),
            Self::Double(d) => Ok(*d != 0.0),
            Self::Str(s) => Ok(s.eq_ignore_ascii_case("true") || s == "1"),
            Self::Distribution(_) => Err(Error::NotBoolean { kind: self.kind() }),
        }
    }

    /// Returns the contained distribution, if any.
    #[must_use]
    pub fn as_distribution(&self) -> Option<&Distribution> {
        match self {
            Self::Distribution(dist) => Some(dist),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<Distribution> for Value {
    fn from(dist: Distribution) -> Self {
        Self::Distribution(dist)
    }
}
