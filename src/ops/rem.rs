//! Modulo. Defined for scalars only — a distribution on either side is an
//! immediate type error.

use crate::error::{Error, Result};
use crate::value::Value;

pub(crate) fn apply(left: &Value, right: &Value) -> Result<Value> {
    if matches!(left, Value::Distribution(_)) || matches!(right, Value::Distribution(_)) {
        return Err(Error::UnsupportedOperands {
            op: "%",
            left: left.kind(),
            right: right.kind(),
        });
    }

    if let (Value::Int(l), Value::Int(r)) = (left, right) {
        if *r == 0 {
            return Err(Error::ModuloByZero);
        }
        return Ok(Value::Int(l % r));
    }

    let l = left.as_f64()?;
    let r = right.as_f64()?;
    if r == 0.0 {
        return Err(Error::ModuloByZero);
    }
    Ok(Value::Double(l % r))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::Distribution;

    #[test]
    fn test_int_modulo() {
        assert_eq!(apply(&Value::Int(7), &Value::Int(3)).unwrap(), Value::Int(1));
        assert_eq!(apply(&Value::Int(-7), &Value::Int(3)).unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_double_modulo() {
        let result = apply(&Value::Double(7.5), &Value::Double(2.0)).unwrap();
        assert_eq!(result, Value::Double(1.5));
    }

    #[test]
    fn test_modulo_by_zero() {
        assert!(matches!(
            apply(&Value::Int(7), &Value::Int(0)),
            Err(Error::ModuloByZero)
        ));
        assert!(matches!(
            apply(&Value::Double(7.0), &Value::Double(0.0)),
            Err(Error::ModuloByZero)
        ));
    }

    #[test]
    fn test_distribution_operand_is_type_error() {
        let dist = Value::from(Distribution::normal(0.0, 1.0).unwrap());
        assert!(matches!(
            apply(&dist, &Value::Int(2)),
            Err(Error::UnsupportedOperands { op: "%", .. })
        ));
        assert!(matches!(
            apply(&Value::Int(2), &dist),
            Err(Error::UnsupportedOperands { .. })
        ));
    }
}
