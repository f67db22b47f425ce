//! Unary operator implementations.

use wend_ir::UnaryOp;

use crate::errors::{illegal_operation, EvalError};
use crate::value::{Number, Value, ValueKind};

/// Apply `op` to an evaluated operand.
///
/// Errors come back unpositioned; the caller knows the operator's span.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> Result<Value, EvalError> {
    let kind = match (&value.kind, op) {
        (_, UnaryOp::Pos) => return Ok(value.clone()),
        (ValueKind::Number(n), UnaryOp::Neg) => ValueKind::Number(*n * Number::Int(-1)),
        (ValueKind::Number(n), UnaryOp::Not) => {
            ValueKind::Number(Number::Int(i64::from(n.is_zero())))
        }
        _ => {
            return Err(illegal_operation(format!(
                "{} {}",
                op.as_symbol(),
                value.type_name()
            )))
        }
    };
    Ok(Value {
        kind,
        span: value.span,
        context: value.context,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EvalErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_negate_numbers() {
        assert_eq!(evaluate_unary(&Value::int(5), UnaryOp::Neg), Ok(Value::int(-5)));
        assert_eq!(
            evaluate_unary(&Value::float(2.5), UnaryOp::Neg),
            Ok(Value::float(-2.5))
        );
    }

    #[test]
    fn test_negate_min_int_widens_to_float() {
        let result = evaluate_unary(&Value::int(i64::MIN), UnaryOp::Neg);
        assert!(matches!(
            result.map(|v| v.kind),
            Ok(ValueKind::Number(Number::Float(_)))
        ));
    }

    #[test]
    fn test_not_maps_zero_to_one() {
        assert_eq!(evaluate_unary(&Value::int(0), UnaryOp::Not), Ok(Value::int(1)));
        assert_eq!(evaluate_unary(&Value::int(9), UnaryOp::Not), Ok(Value::int(0)));
        assert_eq!(
            evaluate_unary(&Value::float(0.5), UnaryOp::Not),
            Ok(Value::int(0))
        );
    }

    #[test]
    fn test_plus_is_identity_for_every_variant() {
        assert_eq!(evaluate_unary(&Value::int(3), UnaryOp::Pos), Ok(Value::int(3)));
        assert_eq!(
            evaluate_unary(&Value::string("s"), UnaryOp::Pos),
            Ok(Value::string("s"))
        );
    }

    #[test]
    fn test_negate_string_is_illegal() {
        let err = evaluate_unary(&Value::string("abc"), UnaryOp::Neg).err();
        assert_eq!(
            err.map(|e| e.kind),
            Some(EvalErrorKind::IllegalOperation {
                operation: "- string".to_string()
            })
        );
    }

    #[test]
    fn test_not_string_is_illegal() {
        let err = evaluate_unary(&Value::string(""), UnaryOp::Not).err();
        assert!(matches!(
            err.map(|e| e.kind),
            Some(EvalErrorKind::IllegalOperation { .. })
        ));
    }
}
